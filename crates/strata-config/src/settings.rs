//! The complete library configuration and its loaders.

use serde::{Deserialize, Serialize};

use crate::calibration::CalibrationConfig;
use crate::error::{ConfigResult, Validate, ValidationError};
use crate::risk::{HorizonConfig, SensitivityConfig};

/// All Strata settings.
///
/// Missing sections and fields take their defaults, so partial documents
/// are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrataConfig {
    /// Credit curve calibration.
    pub calibration: CalibrationConfig,

    /// Finite-difference sensitivities.
    pub sensitivity: SensitivityConfig,

    /// Horizon calculations.
    pub horizon: HorizonConfig,
}

impl StrataConfig {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// `ConfigError::Parse` for malformed input, validation errors otherwise.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// `ConfigError::Parse` for malformed input, validation errors otherwise.
    pub fn from_toml_str(toml: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(toml)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// TOML document.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Builder method to set the calibration section.
    #[must_use]
    pub fn with_calibration(mut self, calibration: CalibrationConfig) -> Self {
        self.calibration = calibration;
        self
    }

    /// Builder method to set the sensitivity section.
    #[must_use]
    pub fn with_sensitivity(mut self, sensitivity: SensitivityConfig) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Builder method to set the horizon section.
    #[must_use]
    pub fn with_horizon(mut self, horizon: HorizonConfig) -> Self {
        self.horizon = horizon;
        self
    }
}

impl Validate for StrataConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let sections = [
            ("calibration", self.calibration.validate()),
            ("sensitivity", self.sensitivity.validate()),
            ("horizon", self.horizon.validate()),
        ];
        sections
            .into_iter()
            .flat_map(|(section, errors)| errors.into_iter().map(move |e| e.in_section(section)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::AccrualOnDefaultKind;
    use crate::error::ConfigError;
    use crate::risk::RolldownMode;

    #[test]
    fn test_partial_toml() {
        let config = StrataConfig::from_toml_str(
            r#"
            [calibration]
            accrual_on_default = "markit_fix"

            [horizon]
            rolldown = "forward"
            "#,
        )
        .unwrap();
        assert_eq!(config.calibration.accrual_on_default, AccrualOnDefaultKind::MarkitFix);
        assert_eq!(config.calibration.max_iterations, 100);
        assert_eq!(config.horizon.rolldown, RolldownMode::Forward);
        assert_eq!(config.sensitivity, SensitivityConfig::default());
    }

    #[test]
    fn test_invalid_document_is_rejected() {
        let err = StrataConfig::from_json_str(r#"{"sensitivity": {"shift": -1.0}}"#).unwrap_err();
        assert_eq!(
            err,
            ConfigError::validation("sensitivity.shift", "Shift must be positive and finite")
        );

        let err = StrataConfig::from_toml_str("calibration = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_json_round_trip() {
        let config = StrataConfig::default()
            .with_horizon(HorizonConfig::default().with_normalise_direction(true));
        let json = config.to_json_string().unwrap();
        assert_eq!(StrataConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_json_round_trip_is_exact_for_floats() {
        let config = StrataConfig::default().with_calibration(
            CalibrationConfig::default().with_tolerance(3.023_112_962_031_257_4e-8),
        );
        let json = config.to_json_string().unwrap();
        let loaded = StrataConfig::from_json_str(&json).unwrap();
        assert_eq!(
            loaded.calibration.tolerance.to_bits(),
            config.calibration.tolerance.to_bits()
        );
    }
}
