//! Forward price curves.
//!
//! A [`ForwardCurve`] holds a forward price function `F(t)` together with
//! its drift `mu(t) = d ln F / dt`. Either side can be supplied and the
//! other is derived: the drift by finite differences of `ln F`, the
//! forward by integrating the drift from the spot.

use std::sync::Arc;

use strata_math::differentiation::{central_difference, forward_difference};
use strata_math::integration::integrate;

use crate::error::{CurveError, CurveResult};
use crate::scalar::{ConstantScalarCurve, FunctionalScalarCurve};
use crate::traits::{Curve, ScalarCurve};

/// Step used to differentiate `ln F`.
const DRIFT_EPS: f64 = 1e-3;

/// Accuracy of the drift integral.
const DRIFT_INTEGRAL_TOLERANCE: f64 = 1e-12;

/// A forward price curve with its drift.
///
/// ```rust
/// use strata_curves::forward::ForwardCurve;
///
/// let curve = ForwardCurve::from_spot_constant_drift(100.0, 0.03);
/// assert!((curve.forward(1.0) - 100.0 * 0.03_f64.exp()).abs() < 1e-12);
/// assert_eq!(curve.drift(5.0), 0.03);
/// ```
#[derive(Debug, Clone)]
pub struct ForwardCurve {
    forward: Arc<dyn ScalarCurve>,
    drift: Arc<dyn ScalarCurve>,
    spot: f64,
}

impl ForwardCurve {
    /// Builds from a forward price curve, deriving the drift numerically.
    ///
    /// The drift is the centred difference of `ln F` with step `1e-3`, or the
    /// forward difference for `t` below the step. The spot is `F(0)`.
    #[must_use]
    pub fn from_forward_curve(forward: Arc<dyn ScalarCurve>) -> Self {
        let source = forward.clone();
        let drift = FunctionalScalarCurve::new("DERIVED-DRIFT", move |t: f64| {
            let ln_f = |s: f64| source.value(s).ln();
            let derivative = if t < DRIFT_EPS {
                forward_difference(ln_f, t, DRIFT_EPS)
            } else {
                central_difference(ln_f, t, DRIFT_EPS)
            };
            derivative.unwrap_or_else(|err| {
                log::warn!("drift at t={t} could not be derived: {err}");
                f64::NAN
            })
        });
        let spot = forward.value(0.0);
        Self {
            forward,
            drift: Arc::new(drift),
            spot,
        }
    }

    /// Builds from a forward curve and an explicitly supplied drift.
    #[must_use]
    pub fn with_drift_curve(forward: Arc<dyn ScalarCurve>, drift: Arc<dyn ScalarCurve>) -> Self {
        let spot = forward.value(0.0);
        Self {
            forward,
            drift,
            spot,
        }
    }

    /// `F(t) = spot * exp(drift * t)`.
    #[must_use]
    pub fn from_spot_constant_drift(spot: f64, drift: f64) -> Self {
        let forward =
            FunctionalScalarCurve::new("CONSTANT-DRIFT-FORWARD", move |t: f64| {
                spot * (drift * t).exp()
            });
        Self {
            forward: Arc::new(forward),
            drift: Arc::new(ConstantScalarCurve::new(drift)),
            spot,
        }
    }

    /// `F(t) = spot * exp(integral of drift from 0 to t)`.
    ///
    /// The integral is evaluated with adaptive Runge-Kutta on every call.
    /// Should the integration fail the forward is `NaN` and a warning is logged.
    #[must_use]
    pub fn from_spot_drift_curve(spot: f64, drift: Arc<dyn ScalarCurve>) -> Self {
        let integrand = drift.clone();
        let forward = FunctionalScalarCurve::new("INTEGRATED-DRIFT-FORWARD", move |t: f64| {
            match integrate(|s| integrand.value(s), 0.0, t, DRIFT_INTEGRAL_TOLERANCE) {
                Ok(integral) => spot * integral.exp(),
                Err(err) => {
                    log::warn!("drift integration to t={t} failed: {err}");
                    f64::NAN
                }
            }
        });
        Self {
            forward: Arc::new(forward),
            drift,
            spot,
        }
    }

    /// Cost-of-carry forward: `F(t) = spot * DF_coc(t) / DF_rf(t)`.
    ///
    /// The drift is `f_rf(t) - f_coc(t)`, the difference of the curves'
    /// instantaneous forward rates.
    #[must_use]
    pub fn from_spot_and_curves(
        spot: f64,
        risk_free: Arc<dyn Curve>,
        cost_of_carry: Arc<dyn Curve>,
    ) -> Self {
        let (rf, coc) = (risk_free.clone(), cost_of_carry.clone());
        let forward = FunctionalScalarCurve::new("CARRY-FORWARD", move |t: f64| {
            spot * coc.discount_factor(t) / rf.discount_factor(t)
        });
        let drift = FunctionalScalarCurve::new("CARRY-DRIFT", move |t: f64| {
            risk_free.forward_rate(t) - cost_of_carry.forward_rate(t)
        });
        Self {
            forward: Arc::new(forward),
            drift: Arc::new(drift),
            spot,
        }
    }

    /// Forward price at `t`.
    #[must_use]
    pub fn forward(&self, t: f64) -> f64 {
        self.forward.value(t)
    }

    /// Drift at `t`.
    #[must_use]
    pub fn drift(&self, t: f64) -> f64 {
        self.drift.value(t)
    }

    /// Spot price.
    #[must_use]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// The curve with every forward scaled by `1 + shift`; the drift is kept.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidArgument` unless `shift > -1`.
    pub fn with_fractional_shift(&self, shift: f64) -> CurveResult<Self> {
        if !(shift > -1.0) {
            return Err(CurveError::invalid_argument(format!(
                "fractional shift must be greater than -1, got {shift}"
            )));
        }
        let base = self.forward.clone();
        let scale = 1.0 + shift;
        let forward = FunctionalScalarCurve::new("SHIFTED-FORWARD", move |t: f64| {
            scale * base.value(t)
        });
        Ok(Self {
            forward: Arc::new(forward),
            drift: self.drift.clone(),
            spot: scale * self.spot,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::ConstantCurve;
    use crate::scalar::InterpolatedScalarCurve;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_drift_round_trip() {
        let curve = ForwardCurve::from_spot_constant_drift(50.0, 0.04);
        let derived = ForwardCurve::from_forward_curve(Arc::new(FunctionalScalarCurve::new(
            "F",
            move |t: f64| curve.forward(t),
        )));
        assert_relative_eq!(derived.spot(), 50.0);
        for t in [0.0, 0.0005, 0.5, 3.0] {
            assert_relative_eq!(derived.drift(t), 0.04, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_drift_curve_integration() {
        let drift = Arc::new(InterpolatedScalarCurve::new(vec![0.0, 2.0], vec![0.02, 0.06]).unwrap());
        let curve = ForwardCurve::from_spot_drift_curve(10.0, drift);
        // integral of 0.02 + 0.02 s from 0 to 1
        assert_relative_eq!(curve.forward(1.0), 10.0 * 0.03_f64.exp(), epsilon = 1e-9);
        assert_relative_eq!(curve.drift(1.0), 0.04, epsilon = 1e-15);
    }

    #[test]
    fn test_cost_of_carry() {
        let rf: Arc<dyn Curve> = Arc::new(ConstantCurve::new("RF", 0.05));
        let coc: Arc<dyn Curve> = Arc::new(ConstantCurve::new("DIV", 0.02));
        let curve = ForwardCurve::from_spot_and_curves(100.0, rf, coc);
        assert_relative_eq!(curve.forward(2.0), 100.0 * (0.06_f64).exp(), epsilon = 1e-10);
        assert_relative_eq!(curve.drift(2.0), 0.03, epsilon = 1e-12);
    }

    #[test]
    fn test_fractional_shift() {
        let curve = ForwardCurve::from_spot_constant_drift(100.0, 0.01);
        let shifted = curve.with_fractional_shift(0.1).unwrap();
        assert_relative_eq!(shifted.forward(2.0), 1.1 * curve.forward(2.0), epsilon = 1e-12);
        assert_relative_eq!(shifted.spot(), 110.0, epsilon = 1e-12);
        assert_eq!(shifted.drift(2.0), curve.drift(2.0));

        assert!(matches!(
            curve.with_fractional_shift(-1.0),
            Err(CurveError::InvalidArgument { .. })
        ));
    }
}
