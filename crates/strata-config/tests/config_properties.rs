//! Property tests for configuration loading.

use proptest::prelude::*;
use strata_config::{CalibrationConfig, SensitivityConfig, StrataConfig, Validate};

proptest! {
    #[test]
    fn prop_valid_configs_survive_json(
        tolerance in 1e-16f64..1e-6,
        iterations in 1u32..1000,
        cap in 0.1f64..50.0,
        shift in 1e-9f64..1e-2,
    ) {
        let config = StrataConfig::default()
            .with_calibration(
                CalibrationConfig::default()
                    .with_tolerance(tolerance)
                    .with_max_iterations(iterations)
                    .with_max_hazard_rate(cap),
            )
            .with_sensitivity(SensitivityConfig::default().with_shift(shift));
        prop_assert!(config.is_valid());
        let json = config.to_json_string().unwrap();
        prop_assert_eq!(StrataConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn prop_non_positive_shift_rejected(shift in -1.0f64..=0.0) {
        let config = StrataConfig::default()
            .with_sensitivity(SensitivityConfig::default().with_shift(shift));
        prop_assert!(config.validate_or_error().is_err());
    }
}
