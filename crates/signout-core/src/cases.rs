//! Read-only case catalog.
//!
//! Cases are loaded once from a JSON document of the form
//! `{"cases": [...]}` and served in file order. Exam mode hides the
//! hidden-truth section from learners.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::SignoutError;

/// A scalar value in the vitals or labs table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

/// What the learner sees when drafting a hand-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSnapshot {
    pub one_liner: String,
    #[serde(default)]
    pub active_problems: Vec<String>,
    #[serde(default)]
    pub vitals: BTreeMap<String, Option<Measurement>>,
    #[serde(default)]
    pub labs: BTreeMap<String, Option<Measurement>>,
    #[serde(default)]
    pub meds: Vec<String>,
    #[serde(default)]
    pub pending: Vec<String>,
    pub code_status: String,
}

/// Answer key for practice mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiddenTruth {
    pub diagnosis: String,
    #[serde(default)]
    pub pitfalls: Vec<String>,
    #[serde(default)]
    pub recommended_actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub case_id: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub difficulty: String,
    pub snapshot: CaseSnapshot,
    pub hidden_truth: HiddenTruth,
}

/// Catalog listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub case_id: String,
    pub title: String,
    pub tags: Vec<String>,
    pub difficulty: String,
}

/// How much of a case to reveal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseView {
    #[default]
    Practice,
    Exam,
}

impl FromStr for CaseView {
    type Err = SignoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "practice" => Ok(CaseView::Practice),
            "exam" => Ok(CaseView::Exam),
            _ => Err(SignoutError::UnknownCaseView(s.to_string())),
        }
    }
}

/// Case detail as returned to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDetail {
    pub case_id: String,
    pub title: String,
    pub tags: Vec<String>,
    pub difficulty: String,
    pub snapshot: CaseSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_truth: Option<HiddenTruth>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    cases: Vec<Case>,
}

/// All known cases, in file order.
#[derive(Debug, Clone, Default)]
pub struct CaseCatalog {
    cases: Vec<Case>,
}

impl CaseCatalog {
    pub fn new(cases: Vec<Case>) -> Self {
        Self { cases }
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read case catalog: {}", path.display()))?;
        let catalog = Self::from_json_str(&content)
            .with_context(|| format!("failed to parse case catalog: {}", path.display()))?;
        tracing::info!("loaded {} cases from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Parse a catalog from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(content)?;

        let mut seen = std::collections::HashSet::new();
        for case in &file.cases {
            if !seen.insert(case.case_id.as_str()) {
                anyhow::bail!("duplicate case_id: {}", case.case_id);
            }
        }

        Ok(Self { cases: file.cases })
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn summaries(&self) -> Vec<CaseSummary> {
        self.cases
            .iter()
            .map(|case| CaseSummary {
                case_id: case.case_id.clone(),
                title: case.title.clone(),
                tags: case.tags.clone(),
                difficulty: case.difficulty.clone(),
            })
            .collect()
    }

    pub fn get(&self, case_id: &str) -> Option<&Case> {
        self.cases.iter().find(|case| case.case_id == case_id)
    }

    /// Case detail for the given view. Exam mode drops the hidden truth.
    pub fn detail(&self, case_id: &str, view: CaseView) -> Result<CaseDetail, SignoutError> {
        let case = self
            .get(case_id)
            .ok_or_else(|| SignoutError::CaseNotFound(case_id.to_string()))?;

        Ok(CaseDetail {
            case_id: case.case_id.clone(),
            title: case.title.clone(),
            tags: case.tags.clone(),
            difficulty: case.difficulty.clone(),
            snapshot: case.snapshot.clone(),
            hidden_truth: match view {
                CaseView::Practice => Some(case.hidden_truth.clone()),
                CaseView::Exam => None,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
  "cases": [
    {
      "case_id": "case-001",
      "title": "Overnight fever",
      "tags": ["sepsis"],
      "difficulty": "intermediate",
      "snapshot": {
        "one_liner": "68F with urosepsis",
        "active_problems": ["urosepsis"],
        "vitals": {"hr": 104, "temp_c": 38.4, "bp": "96/58", "on_pressors": false, "rr": null},
        "labs": {"lactate": 2.6},
        "meds": ["ceftriaxone"],
        "pending": ["blood cultures"],
        "code_status": "Full code"
      },
      "hidden_truth": {
        "diagnosis": "Evolving septic shock",
        "pitfalls": ["anchoring on UTI"]
      }
    },
    {
      "case_id": "case-002",
      "title": "Chest pain",
      "tags": [],
      "difficulty": "easy",
      "snapshot": {"one_liner": "54M with chest pain", "code_status": "DNR"},
      "hidden_truth": {"diagnosis": "NSTEMI"}
    }
  ]
}"#;

    #[test]
    fn parse_catalog_in_order() {
        let catalog = CaseCatalog::from_json_str(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);
        let ids: Vec<_> = catalog.summaries().into_iter().map(|s| s.case_id).collect();
        assert_eq!(ids, vec!["case-001", "case-002"]);

        let case = catalog.get("case-001").unwrap();
        assert_eq!(
            case.snapshot.vitals.get("hr"),
            Some(&Some(Measurement::Integer(104)))
        );
        assert_eq!(case.snapshot.vitals.get("rr"), Some(&None));
        assert_eq!(
            case.snapshot.vitals.get("on_pressors"),
            Some(&Some(Measurement::Flag(false)))
        );
    }

    #[test]
    fn exam_view_hides_truth() {
        let catalog = CaseCatalog::from_json_str(CATALOG).unwrap();

        let practice = catalog.detail("case-001", CaseView::Practice).unwrap();
        assert!(practice.hidden_truth.is_some());

        let exam = catalog.detail("case-001", CaseView::Exam).unwrap();
        let json = serde_json::to_value(&exam).unwrap();
        assert!(json.get("hidden_truth").is_none());
        assert!(json.get("snapshot").is_some());
    }

    #[test]
    fn unknown_case() {
        let catalog = CaseCatalog::from_json_str(CATALOG).unwrap();
        let err = catalog.detail("case-404", CaseView::Practice).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let doubled = r#"{"cases": [
            {"case_id": "a", "title": "A", "difficulty": "easy",
             "snapshot": {"one_liner": "x", "code_status": "Full"},
             "hidden_truth": {"diagnosis": "y"}},
            {"case_id": "a", "title": "B", "difficulty": "easy",
             "snapshot": {"one_liner": "x", "code_status": "Full"},
             "hidden_truth": {"diagnosis": "y"}}
        ]}"#;
        assert!(CaseCatalog::from_json_str(doubled).is_err());
    }

    #[test]
    fn case_view_parse() {
        assert_eq!("exam".parse::<CaseView>().unwrap(), CaseView::Exam);
        assert_eq!("Practice".parse::<CaseView>().unwrap(), CaseView::Practice);
        assert!(matches!(
            "review".parse::<CaseView>(),
            Err(SignoutError::UnknownCaseView(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cases.json");
        std::fs::write(&path, CATALOG).unwrap();
        let catalog = CaseCatalog::load(&path).unwrap();
        assert!(!catalog.is_empty());
    }
}
