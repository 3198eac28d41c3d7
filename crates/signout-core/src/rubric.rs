//! Heuristic rubric scoring for hand-offs.
//!
//! Each of the six domains gets an integer sub-score plus feedback notes.
//! Scalar fields (severity, summary, synthesis) have their own rules; the
//! three list fields share [`score_list_domain`]. The result is a pure
//! function of the record.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::keywords::{ACKNOWLEDGEMENT, DIAGNOSIS, STATUS, THRESHOLD, TREATMENT};
use crate::model::{HandoffRecord, IllnessSeverity};

/// Version tag of the scoring formula. Bump on any change to keywords,
/// weights, or feedback rules.
pub const RUBRIC_VERSION: &str = "v0.1";

/// The scored domains of a hand-off, in rubric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    IllnessSeverity,
    PatientSummary,
    ActionList,
    SituationalAwareness,
    ContingencyPlans,
    ReceiverSynthesis,
}

impl Domain {
    pub const ALL: [Domain; 6] = [
        Domain::IllnessSeverity,
        Domain::PatientSummary,
        Domain::ActionList,
        Domain::SituationalAwareness,
        Domain::ContingencyPlans,
        Domain::ReceiverSynthesis,
    ];

    /// Field name used in feedback and serialized output.
    pub fn label(&self) -> &'static str {
        match self {
            Domain::IllnessSeverity => "illness_severity",
            Domain::PatientSummary => "patient_summary",
            Domain::ActionList => "action_list",
            Domain::SituationalAwareness => "situational_awareness",
            Domain::ContingencyPlans => "contingency_plans",
            Domain::ReceiverSynthesis => "receiver_synthesis",
        }
    }

    /// Highest sub-score the domain can reach.
    pub fn max_score(&self) -> u32 {
        match self {
            Domain::IllnessSeverity => 2,
            Domain::PatientSummary => 4,
            Domain::ActionList | Domain::SituationalAwareness | Domain::ContingencyPlans => 2,
            Domain::ReceiverSynthesis => 3,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Qualitative notes collected while scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feedback {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub missing_critical: Vec<String>,
}

impl Feedback {
    fn strength(&mut self, note: impl Into<String>) {
        self.strengths.push(note.into());
    }

    fn improvement(&mut self, note: impl Into<String>) {
        self.improvements.push(note.into());
    }

    fn missing(&mut self, note: impl Into<String>) {
        self.missing_critical.push(note.into());
    }

    fn append(&mut self, other: Feedback) {
        self.strengths.extend(other.strengths);
        self.improvements.extend(other.improvements);
        self.missing_critical.extend(other.missing_critical);
    }
}

/// Sub-score and notes for one domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainScore {
    pub score: u32,
    pub feedback: Feedback,
}

/// Score a list domain on presence, quantity, and trigger language.
///
/// - empty: 0, flagged as missing-critical
/// - non-empty: 1
/// - any item carries a threshold/time cue: +1
///
/// Item count only changes feedback, never points. Max 2.
pub fn score_list_domain(items: &[String], label: &str) -> DomainScore {
    let mut out = DomainScore::default();

    if items.is_empty() {
        out.feedback.missing(format!("{label} is empty"));
        out.feedback
            .improvement(format!("Populate {label} with at least one item"));
        return out;
    }

    out.score = 1;

    if items.len() >= 2 {
        out.feedback
            .strength(format!("{label} lists {} items", items.len()));
    } else {
        out.feedback.improvement(format!("Add more items to {label}"));
    }

    if THRESHOLD.matches(&items.join(" ")) {
        out.score += 1;
        out.feedback
            .strength(format!("{label} includes a trigger or time threshold"));
    } else {
        out.feedback
            .improvement(format!("Add a trigger or time threshold to {label}"));
    }

    out
}

fn score_severity(severity: IllnessSeverity) -> DomainScore {
    let mut out = DomainScore {
        score: 2,
        ..Default::default()
    };
    out.feedback
        .strength(format!("Illness severity classified as {severity}"));
    out
}

fn score_summary(summary: &str) -> DomainScore {
    let mut out = DomainScore::default();

    if summary.trim().is_empty() {
        out.feedback.missing("patient_summary is empty");
        out.feedback
            .improvement("Add a patient summary covering diagnosis, status, and treatment");
        return out;
    }

    out.score = 1;

    if DIAGNOSIS.matches(summary) {
        out.score += 1;
    } else {
        out.feedback
            .improvement("Name the working diagnosis in the patient summary");
    }

    if STATUS.matches(summary) {
        out.score += 1;
    } else {
        out.feedback
            .improvement("Describe current status or trajectory in the patient summary");
    }

    if TREATMENT.matches(summary) {
        out.score += 1;
    } else {
        out.feedback
            .improvement("Mention active treatment in the patient summary");
    }

    if out.score >= 3 {
        out.feedback.strength("Patient summary is detailed");
    }

    out
}

fn score_synthesis(synthesis: &str) -> DomainScore {
    let mut out = DomainScore::default();

    if synthesis.trim().is_empty() {
        out.feedback.missing("receiver_synthesis is empty");
        out.feedback
            .improvement("Have the receiver restate the plan in their own words");
        return out;
    }

    out.score = 1;

    if ACKNOWLEDGEMENT.matches(synthesis) {
        out.score += 2;
        out.feedback
            .strength("Receiver synthesis closes the loop with explicit plan language");
    } else {
        out.feedback
            .improvement("State an explicit plan or acknowledgement in the receiver synthesis");
    }

    out
}

/// Score a normalized hand-off record.
pub fn score(record: &HandoffRecord) -> RubricResult {
    let domains = [
        (Domain::IllnessSeverity, score_severity(record.illness_severity)),
        (Domain::PatientSummary, score_summary(&record.patient_summary)),
        (
            Domain::ActionList,
            score_list_domain(&record.action_list, Domain::ActionList.label()),
        ),
        (
            Domain::SituationalAwareness,
            score_list_domain(
                &record.situational_awareness,
                Domain::SituationalAwareness.label(),
            ),
        ),
        (
            Domain::ContingencyPlans,
            score_list_domain(&record.contingency_plans, Domain::ContingencyPlans.label()),
        ),
        (
            Domain::ReceiverSynthesis,
            score_synthesis(&record.receiver_synthesis),
        ),
    ];

    let mut subscores = BTreeMap::new();
    let mut feedback = Feedback::default();
    for (domain, scored) in domains {
        subscores.insert(domain, scored.score);
        feedback.append(scored.feedback);
    }

    RubricResult::new(subscores, feedback)
}

/// The outcome of scoring one hand-off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricResult {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub missing_critical: Vec<String>,
    pub subscores: BTreeMap<Domain, u32>,
    /// Always the sum of `subscores`.
    pub total_score: u32,
    pub rubric_version: String,
}

impl RubricResult {
    fn new(subscores: BTreeMap<Domain, u32>, feedback: Feedback) -> Self {
        let total_score = subscores.values().sum();
        Self {
            strengths: feedback.strengths,
            improvements: feedback.improvements,
            missing_critical: feedback.missing_critical,
            subscores,
            total_score,
            rubric_version: RUBRIC_VERSION.to_string(),
        }
    }

    /// Highest total the current rubric can award.
    pub fn max_total() -> u32 {
        Domain::ALL.iter().map(Domain::max_score).sum()
    }

    /// Sub-score for a domain (0 if absent).
    pub fn subscore(&self, domain: Domain) -> u32 {
        self.subscores.get(&domain).copied().unwrap_or(0)
    }

    /// Format the result as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "## Rubric score: {}/{} ({})\n\n",
            self.total_score,
            Self::max_total(),
            self.rubric_version
        ));

        md.push_str("| Domain | Score | Max |\n");
        md.push_str("|--------|-------|-----|\n");
        for (domain, score) in &self.subscores {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                domain,
                score,
                domain.max_score()
            ));
        }
        md.push('\n');

        for (heading, notes) in [
            ("Missing critical", &self.missing_critical),
            ("Strengths", &self.strengths),
            ("Improvements", &self.improvements),
        ] {
            if notes.is_empty() {
                continue;
            }
            md.push_str(&format!("### {heading}\n\n"));
            for note in notes {
                md.push_str(&format!("- {note}\n"));
            }
            md.push('\n');
        }

        md
    }
}
