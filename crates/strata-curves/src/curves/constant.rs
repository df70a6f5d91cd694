//! Flat yield curve.

use std::sync::Arc;

use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// A curve with the same zero rate at every maturity.
///
/// Its single parameter is the rate itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantCurve {
    name: String,
    rate: f64,
}

impl ConstantCurve {
    /// Creates a flat curve.
    #[must_use]
    pub fn new(name: impl Into<String>, rate: f64) -> Self {
        Self {
            name: name.into(),
            rate,
        }
    }

    /// The flat rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Curve for ConstantCurve {
    fn name(&self) -> &str {
        &self.name
    }

    fn interest_rate(&self, _t: f64) -> f64 {
        self.rate
    }

    fn forward_rate(&self, _t: f64) -> f64 {
        self.rate
    }

    fn number_of_parameters(&self) -> usize {
        1
    }

    fn interest_rate_parameter_sensitivity(&self, _t: f64) -> Vec<f64> {
        vec![1.0]
    }

    fn with_parameter_shift(&self, index: usize, shift: f64) -> CurveResult<Arc<dyn Curve>> {
        if index != 0 {
            return Err(CurveError::invalid_parameter_index(&self.name, index, 1));
        }
        Ok(Arc::new(Self::new(self.name.clone(), self.rate + shift)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_curve() {
        let curve = ConstantCurve::new("FLAT", 0.02);
        assert_relative_eq!(curve.discount_factor(10.0), (-0.2_f64).exp());
        assert_eq!(curve.interest_rate_parameter_sensitivity(3.0), vec![1.0]);

        let bumped = curve.with_parameter_shift(0, 0.0001).unwrap();
        assert_relative_eq!(bumped.interest_rate(1.0), 0.0201);
        assert_eq!(bumped.name(), "FLAT");
        assert!(curve.with_parameter_shift(1, 0.0001).is_err());
    }
}
