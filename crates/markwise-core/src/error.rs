//! Error types for scheme construction, analysis and roster edits.
//!
//! Every variant is recoverable: callers decide whether to surface the
//! error to the user or to fall back to a neutral state (see
//! [`MarkwiseError::is_no_data`]).

use thiserror::Error;
use uuid::Uuid;

/// Errors produced by the markwise core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarkwiseError {
    /// The exam scheme is malformed (no questions, non-positive max score, ...).
    #[error("invalid exam scheme: {0}")]
    InvalidScheme(String),

    /// No built-in scheme has this name.
    #[error("unknown exam preset: {0}")]
    UnknownPreset(String),

    /// A student's score count disagrees with the active scheme.
    #[error(
        "scores are incompatible with the current exam scheme (expected {expected}, found {actual})"
    )]
    ScoreLengthMismatch { expected: usize, actual: usize },

    /// A raw topic label was assigned to two merge groups.
    #[error("topic '{topic}' appears in merge groups '{first}' and '{second}'")]
    AmbiguousMerge {
        topic: String,
        first: String,
        second: String,
    },

    /// Analytics were requested with no eligible students.
    #[error("no students with scores matching the current exam scheme")]
    NoData,

    /// A student record was rejected on entry.
    #[error("invalid student record: {0}")]
    InvalidStudent(String),

    /// No student with this id is on the roster.
    #[error("student not found: {0}")]
    StudentNotFound(Uuid),

    /// A judgement or track label did not match the closed set.
    #[error("unknown {kind}: {label}")]
    UnknownLabel { kind: &'static str, label: String },
}

impl MarkwiseError {
    /// Returns `true` for the empty-class state, which callers show as neutral.
    pub fn is_no_data(&self) -> bool {
        matches!(self, MarkwiseError::NoData)
    }

    /// Returns `true` if a record does not fit the active scheme.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, MarkwiseError::ScoreLengthMismatch { .. })
    }
}

/// Convenience alias for core results.
pub type Result<T> = std::result::Result<T, MarkwiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_message_mentions_scheme() {
        let err = MarkwiseError::ScoreLengthMismatch {
            expected: 5,
            actual: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("incompatible with the current exam scheme"));
        assert!(msg.contains("expected 5, found 3"));
        assert!(err.is_mismatch());
        assert!(!err.is_no_data());
    }

    #[test]
    fn no_data_predicate() {
        assert!(MarkwiseError::NoData.is_no_data());
        assert!(!MarkwiseError::InvalidScheme("x".into()).is_no_data());
    }
}
