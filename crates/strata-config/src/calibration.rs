//! Credit curve calibration settings.

use serde::{Deserialize, Serialize};

use crate::error::{Validate, ValidationError};

/// Accrual-on-default formula used when repricing CDS during calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccrualOnDefaultKind {
    /// ISDA standard model, with the half-day accrual offset.
    #[default]
    OriginalIsda,
    /// Markit's variant of the accrual integral.
    MarkitFix,
    /// The exact accrual integral.
    Exact,
}

/// Settings for the sequential credit curve bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Absolute tolerance on the repricing error, per unit notional.
    pub tolerance: f64,

    /// Iteration budget per knot.
    pub max_iterations: u32,

    /// Upper end of the zero hazard rate search.
    pub max_hazard_rate: f64,

    /// Accrual-on-default formula.
    pub accrual_on_default: AccrualOnDefaultKind,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-15,
            max_iterations: 100,
            max_hazard_rate: 10.0,
            accrual_on_default: AccrualOnDefaultKind::OriginalIsda,
        }
    }
}

impl CalibrationConfig {
    /// Builder method to set the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder method to set the iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder method to set the hazard rate cap.
    #[must_use]
    pub fn with_max_hazard_rate(mut self, max_hazard_rate: f64) -> Self {
        self.max_hazard_rate = max_hazard_rate;
        self
    }

    /// Builder method to set the accrual-on-default formula.
    #[must_use]
    pub fn with_accrual_on_default(mut self, kind: AccrualOnDefaultKind) -> Self {
        self.accrual_on_default = kind;
        self
    }
}

impl Validate for CalibrationConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            errors.push(ValidationError::with_rule(
                "tolerance",
                "Tolerance must be positive and finite",
                "positive_tolerance",
            ));
        }

        if self.max_iterations == 0 {
            errors.push(ValidationError::with_rule(
                "max_iterations",
                "At least one iteration is required",
                "positive_iterations",
            ));
        }

        if !(self.max_hazard_rate > 0.0 && self.max_hazard_rate.is_finite()) {
            errors.push(ValidationError::with_rule(
                "max_hazard_rate",
                "Hazard rate cap must be positive and finite",
                "positive_hazard_cap",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CalibrationConfig::default();
        assert_eq!(config.tolerance, 1e-15);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.max_hazard_rate, 10.0);
        assert_eq!(config.accrual_on_default, AccrualOnDefaultKind::OriginalIsda);
        assert!(config.is_valid());
    }

    #[test]
    fn test_validation() {
        let config = CalibrationConfig::default()
            .with_tolerance(0.0)
            .with_max_iterations(0);
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "tolerance");
        assert_eq!(errors[1].field, "max_iterations");
    }
}
