//! Error types for curve operations.

use strata_core::StrataError;
use strata_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// A constructor or operation received an argument outside its domain.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of what's invalid.
        reason: String,
    },

    /// A parameter index beyond the curve's parameter count.
    #[error("Parameter index {index} out of range for curve '{curve}' with {count} parameters")]
    InvalidParameterIndex {
        /// Curve name.
        curve: String,
        /// Requested index.
        index: usize,
        /// Number of parameters of the curve.
        count: usize,
    },

    /// A provider has no curve for the requested key.
    #[error("Curve not found: {key}")]
    MissingCurve {
        /// Description of the missing key.
        key: String,
    },

    /// The curve does not support the requested operation.
    #[error("Unsupported operation on curve '{curve}': {operation}")]
    Unsupported {
        /// Curve name.
        curve: String,
        /// The operation requested.
        operation: String,
    },

    /// Interpolation or numerical error.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Error from core types (FX, dates).
    #[error(transparent)]
    Core(#[from] StrataError),
}

impl CurveError {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Creates an invalid parameter index error.
    #[must_use]
    pub fn invalid_parameter_index(curve: impl Into<String>, index: usize, count: usize) -> Self {
        Self::InvalidParameterIndex {
            curve: curve.into(),
            index,
            count,
        }
    }

    /// Creates a missing curve error.
    #[must_use]
    pub fn missing_curve(key: impl Into<String>) -> Self {
        Self::MissingCurve { key: key.into() }
    }

    /// Creates an unsupported operation error.
    #[must_use]
    pub fn unsupported(curve: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::Unsupported {
            curve: curve.into(),
            operation: operation.into(),
        }
    }
}
