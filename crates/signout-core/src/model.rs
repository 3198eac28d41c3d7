//! Core data model types for signout-sim.
//!
//! A hand-off moves through three shapes: the raw [`HandoffSubmission`] as
//! it arrives, the validated [`HandoffDraft`] with canonical list fields, and
//! the stored [`HandoffRecord`] carrying an identifier and creation time.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::SignoutError;
use crate::normalize::{normalize, ListInput};

/// Acuity classification of the patient being handed off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IllnessSeverity {
    Stable,
    Watcher,
    Unstable,
}

impl IllnessSeverity {
    pub const ALL: [IllnessSeverity; 3] = [
        IllnessSeverity::Stable,
        IllnessSeverity::Watcher,
        IllnessSeverity::Unstable,
    ];
}

impl fmt::Display for IllnessSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllnessSeverity::Stable => write!(f, "Stable"),
            IllnessSeverity::Watcher => write!(f, "Watcher"),
            IllnessSeverity::Unstable => write!(f, "Unstable"),
        }
    }
}

impl FromStr for IllnessSeverity {
    type Err = SignoutError;

    /// Exact match only; "stable" or "STABLE" are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Stable" => Ok(IllnessSeverity::Stable),
            "Watcher" => Ok(IllnessSeverity::Watcher),
            "Unstable" => Ok(IllnessSeverity::Unstable),
            other => Err(SignoutError::UnknownSeverity(other.to_string())),
        }
    }
}

/// A hand-off as submitted, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct HandoffSubmission {
    pub case_id: String,
    pub illness_severity: String,
    pub patient_summary: String,
    pub action_list: Option<ListInput>,
    pub situational_awareness: Option<ListInput>,
    pub contingency_plans: Option<ListInput>,
    pub receiver_synthesis: String,
    pub free_text: Option<String>,
}

/// Wire shape of a submission. List fields stay untyped until they are
/// resolved into a [`ListInput`].
#[derive(Debug, Deserialize)]
struct RawSubmission {
    case_id: String,
    illness_severity: String,
    #[serde(default)]
    patient_summary: String,
    #[serde(default)]
    action_list: Value,
    #[serde(default)]
    situational_awareness: Value,
    #[serde(default)]
    contingency_plans: Value,
    #[serde(default)]
    receiver_synthesis: String,
    #[serde(default)]
    free_text: Option<String>,
}

impl HandoffSubmission {
    /// Read a submission from a JSON document.
    ///
    /// List fields may be a single newline-separated string, a list of
    /// strings, null, or absent. Anything else is an
    /// [`SignoutError::InvalidFieldShape`].
    pub fn from_json(value: Value) -> Result<Self, SignoutError> {
        let raw: RawSubmission = serde_json::from_value(value)
            .map_err(|e| SignoutError::MalformedSubmission(e.to_string()))?;

        Ok(Self {
            case_id: raw.case_id,
            illness_severity: raw.illness_severity,
            patient_summary: raw.patient_summary,
            action_list: ListInput::from_json("action_list", raw.action_list)?,
            situational_awareness: ListInput::from_json(
                "situational_awareness",
                raw.situational_awareness,
            )?,
            contingency_plans: ListInput::from_json("contingency_plans", raw.contingency_plans)?,
            receiver_synthesis: raw.receiver_synthesis,
            free_text: raw.free_text,
        })
    }

    /// Parse a submission from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self, SignoutError> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| SignoutError::MalformedSubmission(e.to_string()))?;
        Self::from_json(value)
    }

    /// Check the severity and case reference and normalize the list fields.
    pub fn validate(self) -> Result<HandoffDraft, SignoutError> {
        let case_id = self.case_id.trim();
        if case_id.is_empty() {
            return Err(SignoutError::MissingField("case_id"));
        }
        let illness_severity: IllnessSeverity = self.illness_severity.parse()?;

        Ok(HandoffDraft {
            case_id: case_id.to_string(),
            illness_severity,
            patient_summary: self.patient_summary,
            action_list: normalize(self.action_list.as_ref()),
            situational_awareness: normalize(self.situational_awareness.as_ref()),
            contingency_plans: normalize(self.contingency_plans.as_ref()),
            receiver_synthesis: self.receiver_synthesis,
            free_text: self.free_text,
        })
    }
}

/// A validated hand-off whose list fields are already normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoffDraft {
    pub case_id: String,
    pub illness_severity: IllnessSeverity,
    pub patient_summary: String,
    pub action_list: Vec<String>,
    pub situational_awareness: Vec<String>,
    pub contingency_plans: Vec<String>,
    pub receiver_synthesis: String,
    #[serde(default)]
    pub free_text: Option<String>,
}

/// A stored hand-off. Never mutated; updates replace the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoffRecord {
    pub id: Uuid,
    pub case_id: String,
    pub illness_severity: IllnessSeverity,
    pub patient_summary: String,
    pub action_list: Vec<String>,
    pub situational_awareness: Vec<String>,
    pub contingency_plans: Vec<String>,
    pub receiver_synthesis: String,
    #[serde(default)]
    pub free_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl HandoffRecord {
    /// Create a record with a fresh identifier, timestamped now.
    pub fn new(draft: HandoffDraft) -> Self {
        Self::with_identity(Uuid::new_v4(), Utc::now(), draft)
    }

    /// Create a record with a known identity, e.g. when replacing one.
    pub fn with_identity(id: Uuid, created_at: DateTime<Utc>, draft: HandoffDraft) -> Self {
        Self {
            id,
            case_id: draft.case_id,
            illness_severity: draft.illness_severity,
            patient_summary: draft.patient_summary,
            action_list: draft.action_list,
            situational_awareness: draft.situational_awareness,
            contingency_plans: draft.contingency_plans,
            receiver_synthesis: draft.receiver_synthesis,
            free_text: draft.free_text,
            created_at,
        }
    }

    pub fn metadata(&self) -> HandoffMetadata {
        HandoffMetadata {
            id: self.id,
            created_at: self.created_at,
        }
    }
}

/// The list-view projection of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoffMetadata {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}
