//! Strata Configuration Layer
//!
//! Settings for the Strata analytics library, loadable from JSON or TOML.
//!
//! # Features
//!
//! - **Calibration**: tolerance, iteration budget and hazard rate cap of the
//!   credit curve bootstrap, and the accrual-on-default formula
//! - **Sensitivity**: the parameter shift of finite-difference sensitivities
//! - **Horizon**: market data rolldown mode and sign convention of theta
//!
//! Consumers take the relevant section as an explicit argument; nothing is
//! read from global state.
//!
//! # Example
//!
//! ```rust
//! use strata_config::{StrataConfig, RolldownMode, Validate};
//!
//! let config = StrataConfig::from_toml_str(
//!     r#"
//!     [sensitivity]
//!     shift = 1e-5
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.sensitivity.shift, 1e-5);
//! assert_eq!(config.horizon.rolldown, RolldownMode::ConstantSpread);
//! assert!(config.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod calibration;
mod error;
mod risk;
mod settings;

pub use calibration::{AccrualOnDefaultKind, CalibrationConfig};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use risk::{HorizonConfig, RolldownMode, SensitivityConfig};
pub use settings::StrataConfig;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calibration::{AccrualOnDefaultKind, CalibrationConfig};
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::risk::{HorizonConfig, RolldownMode, SensitivityConfig};
    pub use crate::settings::StrataConfig;
}
