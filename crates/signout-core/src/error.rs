//! Hand-off error types.
//!
//! Defined in `signout-core` so the service layer and the HTTP server can
//! downcast an `anyhow::Error` and classify it without string matching.

use thiserror::Error;
use uuid::Uuid;

/// Errors raised while ingesting, resolving, or looking up hand-offs.
#[derive(Debug, Error)]
pub enum SignoutError {
    /// A list field was neither a text block nor a list of strings.
    #[error("{field} must be a list of strings or newline-separated text")]
    InvalidFieldShape { field: &'static str },

    /// The severity value is outside Stable|Watcher|Unstable.
    #[error("illness_severity must be one of Stable|Watcher|Unstable, got '{0}'")]
    UnknownSeverity(String),

    /// A required text field was empty.
    #[error("{0} must not be empty")]
    MissingField(&'static str),

    /// The submission body could not be read as a hand-off.
    #[error("malformed submission: {0}")]
    MalformedSubmission(String),

    /// A case view other than practice or exam was requested.
    #[error("mode must be one of practice|exam, got '{0}'")]
    UnknownCaseView(String),

    /// A query parameter that should be a count was not one.
    #[error("{param} must be a non-negative integer, got '{value}'")]
    InvalidQueryParam { param: &'static str, value: String },

    /// No stored hand-off has this identifier.
    #[error("signout not found: {0}")]
    RecordNotFound(Uuid),

    /// The identifier is not even a UUID, so nothing can be stored under it.
    #[error("signout not found: {0}")]
    UnknownSignoutId(String),

    /// No case in the catalog has this identifier.
    #[error("case not found: {0}")]
    CaseNotFound(String),
}

impl SignoutError {
    /// Returns `true` if the caller sent something that failed validation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SignoutError::InvalidFieldShape { .. }
                | SignoutError::UnknownSeverity(_)
                | SignoutError::MissingField(_)
                | SignoutError::MalformedSubmission(_)
                | SignoutError::UnknownCaseView(_)
                | SignoutError::InvalidQueryParam { .. }
        )
    }

    /// Returns `true` if the error means the requested item does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SignoutError::RecordNotFound(_)
                | SignoutError::UnknownSignoutId(_)
                | SignoutError::CaseNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(SignoutError::InvalidFieldShape { field: "action_list" }.is_validation());
        assert!(SignoutError::UnknownSeverity("Critical".into()).is_validation());
        assert!(!SignoutError::RecordNotFound(Uuid::nil()).is_validation());
        assert!(SignoutError::RecordNotFound(Uuid::nil()).is_not_found());
        assert!(SignoutError::CaseNotFound("case-009".into()).is_not_found());
        assert!(SignoutError::UnknownSignoutId("not-a-uuid".into()).is_not_found());

        let bad_limit = SignoutError::InvalidQueryParam {
            param: "limit",
            value: "abc".into(),
        };
        assert!(bad_limit.is_validation());
        assert!(!bad_limit.is_not_found());
        assert_eq!(
            bad_limit.to_string(),
            "limit must be a non-negative integer, got 'abc'"
        );
    }

    #[test]
    fn messages_name_the_field() {
        let err = SignoutError::InvalidFieldShape {
            field: "contingency_plans",
        };
        assert_eq!(
            err.to_string(),
            "contingency_plans must be a list of strings or newline-separated text"
        );
    }
}
