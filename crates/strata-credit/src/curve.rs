//! ISDA curves.
//!
//! The ISDA standard model represents both the yield curve and the credit
//! curve by zero rates `r_i` at knot times `t_i`, interpolated linearly in
//! `r t`. The instantaneous forward (or hazard) rate is therefore piecewise
//! flat: `r_0` before the first knot, the slope of `r t` between knots, and
//! the last segment's slope beyond the last knot.

use std::collections::BTreeSet;
use std::ops::Deref;
use std::sync::Arc;

use strata_curves::{Curve, CurveError, CurveResult};

use crate::error::{CreditError, CreditResult};

/// Knot times and zero rates, interpolated linearly in `r t`.
#[derive(Debug, Clone, PartialEq)]
pub struct IsdaCurve {
    name: String,
    t: Vec<f64>,
    r: Vec<f64>,
    rt: Vec<f64>,
}

impl IsdaCurve {
    /// Creates a curve.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidArgument` unless there is at least one
    /// knot, the lengths match, the times are positive and strictly
    /// increasing, and every value is finite.
    pub fn new(name: impl Into<String>, t: Vec<f64>, r: Vec<f64>) -> CreditResult<Self> {
        if t.is_empty() {
            return Err(CreditError::invalid_argument("ISDA curve needs at least one knot"));
        }
        if t.len() != r.len() {
            return Err(CreditError::invalid_argument(format!(
                "{} knot times but {} rates",
                t.len(),
                r.len()
            )));
        }
        if !(t[0] > 0.0) || t.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(CreditError::invalid_argument(
                "knot times must be positive and strictly increasing",
            ));
        }
        if t.iter().chain(r.iter()).any(|v| !v.is_finite()) {
            return Err(CreditError::invalid_argument("non-finite knot"));
        }
        Ok(Self::from_validated(name.into(), t, r))
    }

    /// Builds a curve from knots already known to be valid.
    pub(crate) fn from_validated(name: String, t: Vec<f64>, r: Vec<f64>) -> Self {
        let rt = t.iter().zip(r.iter()).map(|(t, r)| t * r).collect();
        Self { name, t, r, rt }
    }

    /// The curve's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of knots.
    #[must_use]
    pub fn number_of_knots(&self) -> usize {
        self.t.len()
    }

    /// Knot times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.t
    }

    /// Knot zero rates.
    #[must_use]
    pub fn rates(&self) -> &[f64] {
        &self.r
    }

    /// Time of knot `index`.
    #[must_use]
    pub fn time_at(&self, index: usize) -> f64 {
        self.t[index]
    }

    /// Zero rate of knot `index`.
    #[must_use]
    pub fn rate_at(&self, index: usize) -> f64 {
        self.r[index]
    }

    /// `r(t) t`, the integrated forward rate from 0 to `t`.
    #[must_use]
    pub fn rt(&self, t: f64) -> f64 {
        let n = self.t.len();
        if t <= self.t[0] {
            return self.r[0] * t;
        }
        if t >= self.t[n - 1] {
            if n == 1 {
                return self.r[0] * t;
            }
            let slope = (self.rt[n - 1] - self.rt[n - 2]) / (self.t[n - 1] - self.t[n - 2]);
            return self.rt[n - 1] + (t - self.t[n - 1]) * slope;
        }
        let i = self.segment(t);
        let w = (self.t[i] - t) / (self.t[i] - self.t[i - 1]);
        w * self.rt[i - 1] + (1.0 - w) * self.rt[i]
    }

    /// Zero rate at `t`; the first knot's rate at `t = 0`.
    #[must_use]
    pub fn zero_rate(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return self.r[0];
        }
        self.rt(t) / t
    }

    /// Instantaneous forward rate at `t`, right-continuous at the knots.
    #[must_use]
    pub fn forward_rate(&self, t: f64) -> f64 {
        let n = self.t.len();
        if t < self.t[0] || n == 1 {
            return self.r[0];
        }
        let i = if t >= self.t[n - 1] {
            n - 1
        } else {
            self.segment_right(t)
        };
        (self.rt[i] - self.rt[i - 1]) / (self.t[i] - self.t[i - 1])
    }

    /// `exp(-r(t) t)`.
    #[must_use]
    pub fn exp_minus_rt(&self, t: f64) -> f64 {
        (-self.rt(t)).exp()
    }

    /// Derivative of `rt(t)` with respect to the zero rate of knot `index`.
    ///
    /// Zero for indices out of range.
    #[must_use]
    pub fn rt_sensitivity(&self, t: f64, index: usize) -> f64 {
        let n = self.t.len();
        if index >= n {
            return 0.0;
        }
        if t <= self.t[0] || n == 1 {
            return if index == 0 { t } else { 0.0 };
        }
        if t >= self.t[n - 1] {
            let a = (t - self.t[n - 1]) / (self.t[n - 1] - self.t[n - 2]);
            return if index == n - 1 {
                (1.0 + a) * self.t[n - 1]
            } else if index == n - 2 {
                -a * self.t[n - 2]
            } else {
                0.0
            };
        }
        let i = self.segment(t);
        let w = (self.t[i] - t) / (self.t[i] - self.t[i - 1]);
        if index == i - 1 {
            w * self.t[i - 1]
        } else if index == i {
            (1.0 - w) * self.t[i]
        } else {
            0.0
        }
    }

    /// Derivatives of `rt(t)` with respect to every knot rate.
    #[must_use]
    pub fn rt_sensitivities(&self, t: f64) -> Vec<f64> {
        (0..self.t.len()).map(|k| self.rt_sensitivity(t, k)).collect()
    }

    /// A copy with the rate of knot `index` replaced.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidArgument` for an out-of-range index or a
    /// non-finite rate.
    pub fn with_rate(&self, index: usize, rate: f64) -> CreditResult<Self> {
        if index >= self.t.len() {
            return Err(CreditError::invalid_argument(format!(
                "knot {index} out of range 0..{}",
                self.t.len()
            )));
        }
        if !rate.is_finite() {
            return Err(CreditError::invalid_argument("non-finite rate"));
        }
        let mut r = self.r.clone();
        r[index] = rate;
        Ok(Self::from_validated(self.name.clone(), self.t.clone(), r))
    }

    /// A copy with all knot rates replaced.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidArgument` if the length differs from the
    /// number of knots.
    pub fn with_rates(&self, rates: Vec<f64>) -> CreditResult<Self> {
        Self::new(self.name.clone(), self.t.clone(), rates)
    }

    /// Index `i` of the segment with `t[i-1] < t <= t[i]`; `t` must be interior.
    fn segment(&self, t: f64) -> usize {
        self.t.partition_point(|&k| k < t)
    }

    /// Index `i` of the segment with `t[i-1] <= t < t[i]`; `t` must be interior.
    fn segment_right(&self, t: f64) -> usize {
        self.t.partition_point(|&k| k <= t)
    }
}

/// The ISDA discount curve.
#[derive(Debug, Clone, PartialEq)]
pub struct IsdaYieldCurve(IsdaCurve);

impl IsdaYieldCurve {
    /// Default name of a yield curve.
    pub const DEFAULT_NAME: &'static str = "ISDA-YIELD";

    /// Creates a yield curve from knot times and zero rates.
    ///
    /// # Errors
    ///
    /// See [`IsdaCurve::new`].
    pub fn new(t: Vec<f64>, r: Vec<f64>) -> CreditResult<Self> {
        Ok(Self(IsdaCurve::new(Self::DEFAULT_NAME, t, r)?))
    }

    /// A flat curve with a single knot.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite rate.
    pub fn flat(rate: f64) -> CreditResult<Self> {
        Self::new(vec![1.0], vec![rate])
    }

    /// The same curve under another name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.0.name = name.into();
        self
    }

    /// Discount factor to `t`.
    #[must_use]
    pub fn discount_factor(&self, t: f64) -> f64 {
        self.0.exp_minus_rt(t)
    }

    /// A copy with the rate of knot `index` replaced.
    pub fn with_rate(&self, index: usize, rate: f64) -> CreditResult<Self> {
        Ok(Self(self.0.with_rate(index, rate)?))
    }

    /// A copy with all knot rates replaced.
    pub fn with_rates(&self, rates: Vec<f64>) -> CreditResult<Self> {
        Ok(Self(self.0.with_rates(rates)?))
    }
}

impl Deref for IsdaYieldCurve {
    type Target = IsdaCurve;

    fn deref(&self) -> &IsdaCurve {
        &self.0
    }
}

/// The ISDA credit curve: zero hazard rates with piecewise flat forward hazard.
#[derive(Debug, Clone, PartialEq)]
pub struct IsdaCreditCurve(IsdaCurve);

impl IsdaCreditCurve {
    /// Default name of a credit curve.
    pub const DEFAULT_NAME: &'static str = "ISDA-CREDIT";

    /// Creates a credit curve from knot times and zero hazard rates.
    ///
    /// # Errors
    ///
    /// See [`IsdaCurve::new`].
    pub fn new(t: Vec<f64>, r: Vec<f64>) -> CreditResult<Self> {
        Ok(Self(IsdaCurve::new(Self::DEFAULT_NAME, t, r)?))
    }

    /// A flat hazard curve with a single knot.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite rate.
    pub fn flat(hazard_rate: f64) -> CreditResult<Self> {
        Self::new(vec![1.0], vec![hazard_rate])
    }

    pub(crate) fn from_validated(t: Vec<f64>, r: Vec<f64>) -> Self {
        Self(IsdaCurve::from_validated(Self::DEFAULT_NAME.to_string(), t, r))
    }

    /// The same curve under another name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.0.name = name.into();
        self
    }

    /// Survival probability to `t`.
    #[must_use]
    pub fn survival_probability(&self, t: f64) -> f64 {
        self.0.exp_minus_rt(t)
    }

    /// Instantaneous hazard rate at `t`.
    #[must_use]
    pub fn hazard_rate(&self, t: f64) -> f64 {
        self.0.forward_rate(t)
    }

    /// A copy with the rate of knot `index` replaced.
    pub fn with_rate(&self, index: usize, rate: f64) -> CreditResult<Self> {
        Ok(Self(self.0.with_rate(index, rate)?))
    }

    /// A copy with all knot rates replaced.
    pub fn with_rates(&self, rates: Vec<f64>) -> CreditResult<Self> {
        Ok(Self(self.0.with_rates(rates)?))
    }
}

impl Deref for IsdaCreditCurve {
    type Target = IsdaCurve;

    fn deref(&self) -> &IsdaCurve {
        &self.0
    }
}

macro_rules! impl_curve {
    ($curve:ty) => {
        impl Curve for $curve {
            fn name(&self) -> &str {
                self.0.name()
            }

            fn interest_rate(&self, t: f64) -> f64 {
                self.0.zero_rate(t)
            }

            fn discount_factor(&self, t: f64) -> f64 {
                self.0.exp_minus_rt(t)
            }

            fn forward_rate(&self, t: f64) -> f64 {
                self.0.forward_rate(t)
            }

            fn number_of_parameters(&self) -> usize {
                self.0.number_of_knots()
            }

            fn interest_rate_parameter_sensitivity(&self, t: f64) -> Vec<f64> {
                if t <= 0.0 {
                    let mut sensitivity = vec![0.0; self.0.number_of_knots()];
                    sensitivity[0] = 1.0;
                    return sensitivity;
                }
                self.0.rt_sensitivities(t).into_iter().map(|s| s / t).collect()
            }

            fn number_of_intrinsic_parameters(&self, _excluded: &BTreeSet<String>) -> usize {
                self.0.number_of_knots()
            }

            fn with_parameter_shift(
                &self,
                index: usize,
                shift: f64,
            ) -> CurveResult<Arc<dyn Curve>> {
                if index >= self.0.number_of_knots() {
                    return Err(CurveError::invalid_parameter_index(
                        self.0.name(),
                        index,
                        self.0.number_of_knots(),
                    ));
                }
                let mut r = self.0.rates().to_vec();
                r[index] += shift;
                Ok(Arc::new(Self(IsdaCurve::from_validated(
                    self.0.name.clone(),
                    self.0.t.clone(),
                    r,
                ))))
            }
        }
    };
}

impl_curve!(IsdaYieldCurve);
impl_curve!(IsdaCreditCurve);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn curve() -> IsdaCurve {
        IsdaCurve::new("TEST", vec![0.5, 1.0, 3.0, 5.0], vec![0.01, 0.015, 0.02, 0.022]).unwrap()
    }

    #[test]
    fn test_invalid_knots() {
        assert!(IsdaCurve::new("X", vec![], vec![]).is_err());
        assert!(IsdaCurve::new("X", vec![1.0, 1.0], vec![0.01, 0.02]).is_err());
        assert!(IsdaCurve::new("X", vec![0.0, 1.0], vec![0.01, 0.02]).is_err());
        assert!(IsdaCurve::new("X", vec![1.0], vec![0.01, 0.02]).is_err());
    }

    #[test]
    fn test_rt_interpolation() {
        let c = curve();
        assert_relative_eq!(c.rt(0.25), 0.0025);
        assert_relative_eq!(c.rt(1.0), 0.015);
        assert_relative_eq!(c.rt(2.0), 0.5 * (0.015 + 0.06), epsilon = 1e-15);
        // flat forward beyond the last knot
        let slope = (0.11 - 0.06) / 2.0;
        assert_relative_eq!(c.rt(7.0), 0.11 + 2.0 * slope, epsilon = 1e-15);
        assert_relative_eq!(c.forward_rate(7.0), slope, epsilon = 1e-15);
        assert_relative_eq!(c.forward_rate(0.2), 0.01);
        assert_relative_eq!(c.zero_rate(0.0), 0.01);
    }

    #[test]
    fn test_forward_is_piecewise_flat() {
        let c = curve();
        let h = 1e-7;
        for t in [0.75, 2.0, 4.0] {
            let numerical = (c.rt(t + h) - c.rt(t - h)) / (2.0 * h);
            assert_relative_eq!(c.forward_rate(t), numerical, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_rt_sensitivity_matches_bump() {
        let c = curve();
        let bump = 1e-6;
        for t in [0.3, 0.5, 0.8, 2.0, 5.0, 6.5] {
            for k in 0..c.number_of_knots() {
                let bumped = c.with_rate(k, c.rate_at(k) + bump).unwrap();
                let fd = (bumped.rt(t) - c.rt(t)) / bump;
                assert_relative_eq!(c.rt_sensitivity(t, k), fd, epsilon = 1e-8);
            }
        }
    }

    #[test]
    fn test_credit_curve_survival() {
        let credit = IsdaCreditCurve::new(vec![1.0, 3.0], vec![0.02, 0.03]).unwrap();
        assert_relative_eq!(credit.survival_probability(1.0), (-0.02_f64).exp());
        assert!(credit.survival_probability(2.0) > credit.survival_probability(3.0));
        assert_relative_eq!(credit.hazard_rate(2.0), 0.035, epsilon = 1e-15);

        let bumped = credit.with_rates(vec![0.03, 0.03]).unwrap();
        assert_relative_eq!(bumped.rate_at(0), 0.03);
        assert!(credit.with_rates(vec![0.03]).is_err());
    }

    #[test]
    fn test_yield_curve_as_curve() {
        let yc = IsdaYieldCurve::new(vec![1.0, 2.0], vec![0.01, 0.02])
            .unwrap()
            .named("USD-ISDA");
        let curve: Arc<dyn Curve> = Arc::new(yc.clone());
        assert_eq!(curve.name(), "USD-ISDA");
        assert_relative_eq!(curve.discount_factor(1.5), yc.discount_factor(1.5));

        let t = 1.5;
        let sensitivity = curve.interest_rate_parameter_sensitivity(t);
        for (k, s) in sensitivity.iter().enumerate() {
            let bumped = curve.with_parameter_shift(k, 1e-6).unwrap();
            let fd = (bumped.interest_rate(t) - curve.interest_rate(t)) / 1e-6;
            assert_relative_eq!(*s, fd, epsilon = 1e-8);
        }
    }
}
