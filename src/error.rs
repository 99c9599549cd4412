//! Error types for the po-forecast library.

use thiserror::Error;

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while building a price forecast.
///
/// A forecast attempt either succeeds completely or fails with one of these;
/// nothing is retried internally and no partial result is ever returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// A caller-supplied argument was rejected before any data access.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Fewer monthly price points than required, before the CPI join.
    #[error("not enough monthly history for part {part_code}: need at least {needed}, got {got}")]
    InsufficientHistory {
        part_code: String,
        needed: usize,
        got: usize,
    },

    /// Fewer monthly points than required after the CPI join.
    ///
    /// Distinct from [`ForecastError::InsufficientHistory`] so callers can
    /// tell whether the gap is price history or CPI coverage.
    #[error(
        "not enough CPI-aligned months for part {part_code}: need at least {needed}, got {got}"
    )]
    InsufficientAlignedHistory {
        part_code: String,
        needed: usize,
        got: usize,
    },

    /// A price or CPI source failed; propagated unchanged, never retried.
    #[error("repository error: {0}")]
    Repository(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = ForecastError::InvalidArgument("months must be positive".to_string());
        assert_eq!(err.to_string(), "invalid argument: months must be positive");

        let err = ForecastError::InsufficientHistory {
            part_code: "AB-100".to_string(),
            needed: 24,
            got: 7,
        };
        assert_eq!(
            err.to_string(),
            "not enough monthly history for part AB-100: need at least 24, got 7"
        );

        let err = ForecastError::InsufficientAlignedHistory {
            part_code: "AB-100".to_string(),
            needed: 24,
            got: 20,
        };
        assert_eq!(
            err.to_string(),
            "not enough CPI-aligned months for part AB-100: need at least 24, got 20"
        );

        let err = ForecastError::Repository("file not found".to_string());
        assert_eq!(err.to_string(), "repository error: file not found");
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = ForecastError::Repository("boom".to_string());
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
