//! Error types for CDS analytics.

use strata_core::StrataError;
use strata_math::MathError;
use thiserror::Error;

/// A specialized Result type for credit operations.
pub type CreditResult<T> = Result<T, CreditError>;

/// Error types for CDS analytics and credit curve calibration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CreditError {
    /// Invalid input to a constructor or calculation.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of what's invalid.
        reason: String,
    },

    /// The bootstrap found no hazard rate repricing an instrument.
    #[error("Credit curve calibration failed at knot {knot}: {reason}")]
    Calibration {
        /// Index of the instrument being fitted.
        knot: usize,
        /// Underlying cause.
        reason: String,
    },

    /// Premium leg schedule could not be built.
    #[error("Schedule error: {reason}")]
    Schedule {
        /// Description of the problem.
        reason: String,
    },

    /// Numerical error.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Error from core types.
    #[error(transparent)]
    Core(#[from] StrataError),
}

impl CreditError {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Creates a calibration error.
    #[must_use]
    pub fn calibration(knot: usize, reason: impl Into<String>) -> Self {
        Self::Calibration {
            knot,
            reason: reason.into(),
        }
    }

    /// Creates a schedule error.
    #[must_use]
    pub fn schedule(reason: impl Into<String>) -> Self {
        Self::Schedule {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CreditError::calibration(3, "no root below hazard rate 10");
        assert_eq!(
            err.to_string(),
            "Credit curve calibration failed at knot 3: no root below hazard rate 10"
        );
        let err: CreditError = MathError::invalid_input("bad").into();
        assert!(matches!(err, CreditError::Math(_)));
    }
}
