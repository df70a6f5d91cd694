//! Error types for the Strata core crate.
//!
//! Dates, calendars, FX lookups and fixings report failures through
//! [`StrataError`]; higher crates wrap it in their own error enums.

use thiserror::Error;

use crate::types::Currency;

/// A specialized Result type for core operations.
pub type StrataResult<T> = Result<T, StrataError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrataError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Tenor string or value could not be interpreted.
    #[error("Invalid tenor: {message}")]
    InvalidTenor {
        /// Description of the tenor error.
        message: String,
    },

    /// A caller supplied an argument outside its valid domain.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of what's invalid.
        reason: String,
    },

    /// No FX rate is available for the currency pair.
    #[error("Missing FX rate for {from}/{to}")]
    MissingFxRate {
        /// Currency converted from.
        from: Currency,
        /// Currency converted into.
        to: Currency,
    },

    /// A fixing required for a past reset date is absent.
    #[error("Missing fixing on {date} for {series}")]
    MissingFixing {
        /// Name of the fixing series.
        series: String,
        /// The fixing date.
        date: String,
    },
}

impl StrataError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid tenor error.
    #[must_use]
    pub fn invalid_tenor(message: impl Into<String>) -> Self {
        Self::InvalidTenor {
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Creates a missing FX rate error.
    #[must_use]
    pub fn missing_fx_rate(from: Currency, to: Currency) -> Self {
        Self::MissingFxRate { from, to }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StrataError::invalid_date("2025-02-30");
        assert_eq!(err.to_string(), "Invalid date: 2025-02-30");

        let err = StrataError::missing_fx_rate(Currency::EUR, Currency::USD);
        assert_eq!(err.to_string(), "Missing FX rate for EUR/USD");

        let err = StrataError::missing_fixing("USD-LIBOR-3M", "2024-01-02");
        assert!(err.to_string().contains("USD-LIBOR-3M"));
    }
}
