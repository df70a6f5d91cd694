//! Sensitivity and horizon calculation settings.

use serde::{Deserialize, Serialize};

use crate::error::{Validate, ValidationError};

/// Settings for finite-difference parameter sensitivities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensitivityConfig {
    /// Absolute shift applied to each curve parameter.
    pub shift: f64,
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self { shift: 1e-6 }
    }
}

impl SensitivityConfig {
    /// Builder method to set the shift.
    #[must_use]
    pub fn with_shift(mut self, shift: f64) -> Self {
        self.shift = shift;
        self
    }
}

impl Validate for SensitivityConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if !(self.shift > 0.0 && self.shift.is_finite()) {
            errors.push(ValidationError::with_rule(
                "shift",
                "Shift must be positive and finite",
                "positive_shift",
            ));
        }
        errors
    }
}

/// How market data moves when the valuation date rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RolldownMode {
    /// Rates as a function of residual maturity are kept.
    #[default]
    ConstantSpread,
    /// Today's forwards are realised.
    Forward,
}

/// Settings for horizon (theta) calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizonConfig {
    /// Market data rolldown.
    pub rolldown: RolldownMode,

    /// Negate the result when rolling backward, so that both directions
    /// report the change over the elapsed day.
    pub normalise_direction: bool,
}

impl HorizonConfig {
    /// Builder method to set the rolldown mode.
    #[must_use]
    pub fn with_rolldown(mut self, rolldown: RolldownMode) -> Self {
        self.rolldown = rolldown;
        self
    }

    /// Builder method to set direction normalisation.
    #[must_use]
    pub fn with_normalise_direction(mut self, normalise: bool) -> Self {
        self.normalise_direction = normalise;
        self
    }
}

impl Validate for HorizonConfig {
    fn validate(&self) -> Vec<ValidationError> {
        Vec::new()
    }
}
