//! Error types for pricing, horizon and sensitivity calculations.

use strata_core::StrataError;
use strata_curves::CurveError;
use thiserror::Error;

/// A specialized Result type for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

/// Errors that can occur while building derivatives or pricing them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Invalid input parameter.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of what's invalid.
        reason: String,
    },

    /// The calculation is not available for these inputs.
    #[error("Unsupported operation: {operation}")]
    Unsupported {
        /// The operation requested.
        operation: String,
    },

    /// A curve needed for pricing is not in the provider.
    #[error("Curve not found: {key}")]
    MissingCurve {
        /// Description of the missing key.
        key: String,
    },

    /// A fixing needed to build a coupon is not published.
    #[error("Missing fixing for {series} on {date}")]
    MissingFixing {
        /// Fixing series name.
        series: String,
        /// Fixing date.
        date: String,
    },

    /// An FX rate needed to aggregate currencies is not available.
    #[error("Missing FX rate {from}/{to}")]
    MissingFxRate {
        /// Source currency code.
        from: String,
        /// Target currency code.
        to: String,
    },

    /// Curve error.
    #[error(transparent)]
    Curve(CurveError),

    /// Error from core types.
    #[error(transparent)]
    Core(StrataError),
}

impl PricingError {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Creates an unsupported operation error.
    #[must_use]
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported {
            operation: operation.into(),
        }
    }

    /// Creates a missing curve error.
    #[must_use]
    pub fn missing_curve(key: impl Into<String>) -> Self {
        Self::MissingCurve { key: key.into() }
    }

    /// Creates a missing fixing error.
    #[must_use]
    pub fn missing_fixing(series: impl Into<String>, date: impl ToString) -> Self {
        Self::MissingFixing {
            series: series.into(),
            date: date.to_string(),
        }
    }
}

impl From<CurveError> for PricingError {
    fn from(err: CurveError) -> Self {
        match err {
            CurveError::MissingCurve { key } => Self::MissingCurve { key },
            CurveError::Core(core) => core.into(),
            other => Self::Curve(other),
        }
    }
}

impl From<StrataError> for PricingError {
    fn from(err: StrataError) -> Self {
        match err {
            StrataError::MissingFixing { series, date } => Self::MissingFixing { series, date },
            StrataError::MissingFxRate { from, to } => Self::MissingFxRate {
                from: from.to_string(),
                to: to.to_string(),
            },
            other => Self::Core(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::types::Currency;

    #[test]
    fn test_lookup_errors_are_lifted() {
        let err: PricingError = CurveError::missing_curve("USD discounting").into();
        assert_eq!(err, PricingError::missing_curve("USD discounting"));

        let err: PricingError = StrataError::missing_fx_rate(Currency::EUR, Currency::USD).into();
        assert!(matches!(err, PricingError::MissingFxRate { .. }));

        let err: PricingError = CurveError::invalid_argument("bad").into();
        assert!(matches!(err, PricingError::Curve(_)));
    }
}
