//! Curve sensitivities.
//!
//! - [`MulticurveSensitivity`]: dPV/dr at the times where a value touches
//!   each curve
//! - [`ParameterSensitivity`]: dPV/dp for every parameter of each curve
//! - [`ParameterSensitivityCalculator`]: chains point sensitivities with the
//!   curves' parameter sensitivities
//! - [`ParameterSensitivityFdCalculator`]: bump-and-reprice reference

mod fd;
mod parameter;
mod point;

pub use fd::ParameterSensitivityFdCalculator;
pub use parameter::{ParameterSensitivity, ParameterSensitivityCalculator};
pub use point::MulticurveSensitivity;
