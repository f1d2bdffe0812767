//! Error types for statistical operations.

use std::fmt;

/// Result type for statistics operations.
pub type StatsResult<T> = Result<T, StatsError>;

/// Errors that can occur during statistical operations.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsError {
    /// Invalid parameter value for a distribution or computation.
    InvalidParameter {
        name: String,
        value: f64,
        reason: String,
    },

    /// Probability value outside the open interval (0, 1).
    InvalidProbability { value: f64 },

    /// Input data has insufficient length.
    InsufficientData {
        required: usize,
        got: usize,
        context: String,
    },

    /// Degenerate domain, e.g. a zero-width plotting range.
    DomainEmpty { context: String },

    /// Mismatched array lengths.
    LengthMismatch {
        expected: usize,
        got: usize,
        context: String,
    },

    /// Numerical computation failed.
    NumericalError { message: String },
}

impl StatsError {
    pub(crate) fn invalid(name: &str, value: f64, reason: &str) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            value,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn domain_empty(context: impl Into<String>) -> Self {
        Self::DomainEmpty {
            context: context.into(),
        }
    }
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                name,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{}' = {}: {}", name, value, reason)
            }
            Self::InvalidProbability { value } => {
                write!(f, "Invalid probability {}: must be in (0, 1)", value)
            }
            Self::InsufficientData {
                required,
                got,
                context,
            } => {
                write!(
                    f,
                    "Insufficient data in {}: need {} elements, got {}",
                    context, required, got
                )
            }
            Self::DomainEmpty { context } => {
                write!(f, "Empty domain in {}", context)
            }
            Self::LengthMismatch {
                expected,
                got,
                context,
            } => {
                write!(
                    f,
                    "Length mismatch in {}: expected {}, got {}",
                    context, expected, got
                )
            }
            Self::NumericalError { message } => {
                write!(f, "Numerical error: {}", message)
            }
        }
    }
}

impl std::error::Error for StatsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StatsError::InvalidParameter {
            name: "sigma".to_string(),
            value: -1.0,
            reason: "must be positive".to_string(),
        };
        assert!(err.to_string().contains("sigma"));
        assert!(err.to_string().contains("-1"));

        let err = StatsError::InvalidProbability { value: 1.5 };
        assert!(err.to_string().contains("1.5"));
        assert!(err.to_string().contains("(0, 1)"));

        let err = StatsError::InsufficientData {
            required: 2,
            got: 1,
            context: "linear_fit".to_string(),
        };
        assert!(err.to_string().contains("need 2"));

        let err = StatsError::domain_empty("linspace [1, 1]");
        assert!(err.to_string().contains("[1, 1]"));
    }
}
