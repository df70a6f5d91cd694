//! Curve seen from a later (or earlier) valuation time.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::CurveResult;
use crate::traits::Curve;

/// Maturities below which the zero rate is taken as its limit.
const SMALL_TIME: f64 = 1e-8;

/// The underlying curve rolled by `shift` years along its own forwards.
///
/// Discount factors are the underlying's forward discount factors:
///
/// ```text
/// DF'(t) = DF(t + s) / DF(s)
/// ```
///
/// so that `r'(t) t = r(t + s)(t + s) - r(s) s` and, at `t = 0`, the zero
/// rate is the instantaneous forward at `s`. The curve keeps the
/// underlying's name and parameters.
#[derive(Debug, Clone)]
pub struct TimeShiftedCurve {
    underlying: Arc<dyn Curve>,
    shift: f64,
}

impl TimeShiftedCurve {
    /// Rolls `underlying` by `shift` years.
    #[must_use]
    pub fn new(underlying: Arc<dyn Curve>, shift: f64) -> Self {
        Self { underlying, shift }
    }

    /// The roll in years.
    #[must_use]
    pub fn shift(&self) -> f64 {
        self.shift
    }

    /// The unrolled curve.
    #[must_use]
    pub fn underlying(&self) -> &Arc<dyn Curve> {
        &self.underlying
    }
}

impl Curve for TimeShiftedCurve {
    fn name(&self) -> &str {
        self.underlying.name()
    }

    fn interest_rate(&self, t: f64) -> f64 {
        let s = self.shift;
        if t.abs() < SMALL_TIME {
            return self.underlying.forward_rate(s);
        }
        (self.underlying.interest_rate(t + s) * (t + s) - self.underlying.interest_rate(s) * s) / t
    }

    fn forward_rate(&self, t: f64) -> f64 {
        self.underlying.forward_rate(t + self.shift)
    }

    fn number_of_parameters(&self) -> usize {
        self.underlying.number_of_parameters()
    }

    fn interest_rate_parameter_sensitivity(&self, t: f64) -> Vec<f64> {
        let s = self.shift;
        let t = if t.abs() < SMALL_TIME { SMALL_TIME } else { t };
        let end = self.underlying.interest_rate_parameter_sensitivity(t + s);
        let start = self.underlying.interest_rate_parameter_sensitivity(s);
        end.iter()
            .zip(start.iter())
            .map(|(e, b)| (e * (t + s) - b * s) / t)
            .collect()
    }

    fn underlying_curve_names(&self) -> Vec<String> {
        self.underlying.underlying_curve_names()
    }

    fn number_of_intrinsic_parameters(&self, excluded: &BTreeSet<String>) -> usize {
        self.underlying.number_of_intrinsic_parameters(excluded)
    }

    fn with_parameter_shift(&self, index: usize, shift: f64) -> CurveResult<Arc<dyn Curve>> {
        Ok(Arc::new(Self::new(
            self.underlying.with_parameter_shift(index, shift)?,
            self.shift,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::{ConstantCurve, InterpolatedCurve};
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_curve_is_unchanged() {
        let flat: Arc<dyn Curve> = Arc::new(ConstantCurve::new("FLAT", 0.03));
        let rolled = TimeShiftedCurve::new(flat, 1.0 / 365.0);
        assert_relative_eq!(rolled.interest_rate(2.0), 0.03, epsilon = 1e-14);
        assert_relative_eq!(rolled.interest_rate(0.0), 0.03, epsilon = 1e-14);
        assert_eq!(rolled.name(), "FLAT");
    }

    #[test]
    fn test_discount_factor_is_forward_discount() {
        let curve: Arc<dyn Curve> = Arc::new(
            InterpolatedCurve::new("EUR", vec![1.0, 3.0, 10.0], vec![0.01, 0.02, 0.025]).unwrap(),
        );
        let s = 0.5;
        let rolled = TimeShiftedCurve::new(curve.clone(), s);
        for t in [0.25, 2.0, 8.0] {
            assert_relative_eq!(
                rolled.discount_factor(t),
                curve.discount_factor(t + s) / curve.discount_factor(s),
                epsilon = 1e-14
            );
        }
    }

    #[test]
    fn test_sensitivity_matches_bump() {
        let curve: Arc<dyn Curve> = Arc::new(
            InterpolatedCurve::new("EUR", vec![1.0, 3.0, 10.0], vec![0.01, 0.02, 0.025]).unwrap(),
        );
        let rolled = TimeShiftedCurve::new(curve, 0.75);
        let t = 2.5;
        let sensitivity = rolled.interest_rate_parameter_sensitivity(t);
        for (i, s) in sensitivity.iter().enumerate() {
            let bumped = rolled.with_parameter_shift(i, 1e-5).unwrap();
            let fd = (bumped.interest_rate(t) - rolled.interest_rate(t)) / 1e-5;
            assert_relative_eq!(*s, fd, epsilon = 1e-8);
        }
    }
}
