//! Rolling market data to a different valuation time.
//!
//! Two assumptions are provided:
//!
//! - [`ConstantSpreadRolldown`]: each curve keeps its rates as a function of
//!   residual maturity. Times are measured from the new valuation date, so
//!   the curves themselves are reused unchanged.
//! - [`ForwardRolldown`]: forwards are realised. A curve rolled by `s`
//!   discounts with `DF(t + s) / DF(s)`.

use std::fmt;
use std::sync::Arc;

use crate::curves::TimeShiftedCurve;
use crate::provider::{IssuerProvider, MulticurveProvider};
use crate::traits::Curve;

/// Moves curves, and whole providers, by a time shift in years.
pub trait RolldownFunction: Send + Sync + fmt::Debug {
    /// The curve as seen `shift_time` years later (earlier if negative).
    fn roll_curve(&self, curve: &Arc<dyn Curve>, shift_time: f64) -> Arc<dyn Curve>;

    /// Rolls every rate curve of a multicurve provider.
    ///
    /// Price-index curves are kept as they are.
    fn roll_multicurve(&self, provider: &MulticurveProvider, shift_time: f64) -> MulticurveProvider {
        provider.map_curves(|c| self.roll_curve(c, shift_time))
    }

    /// Rolls every rate curve of an issuer provider, issuer curves included.
    fn roll_issuer(&self, provider: &IssuerProvider, shift_time: f64) -> IssuerProvider {
        log::debug!("rolling issuer provider by {shift_time} years with {self:?}");
        provider.map_curves(|c| self.roll_curve(c, shift_time))
    }
}

/// Rates as a function of residual maturity are preserved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstantSpreadRolldown;

impl RolldownFunction for ConstantSpreadRolldown {
    fn roll_curve(&self, curve: &Arc<dyn Curve>, _shift_time: f64) -> Arc<dyn Curve> {
        Arc::clone(curve)
    }
}

/// Forward rates are realised over the shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForwardRolldown;

impl RolldownFunction for ForwardRolldown {
    fn roll_curve(&self, curve: &Arc<dyn Curve>, shift_time: f64) -> Arc<dyn Curve> {
        Arc::new(TimeShiftedCurve::new(Arc::clone(curve), shift_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::InterpolatedCurve;
    use approx::assert_relative_eq;
    use strata_core::types::Currency;

    fn provider() -> MulticurveProvider {
        MulticurveProvider::default().with_discount_curve(
            Currency::USD,
            Arc::new(InterpolatedCurve::new("USD", vec![1.0, 5.0], vec![0.01, 0.03]).unwrap()),
        )
    }

    #[test]
    fn test_constant_spread_keeps_residual_rates() {
        let rolled = ConstantSpreadRolldown.roll_multicurve(&provider(), 1.0 / 365.0);
        for t in [0.5, 2.0, 4.0] {
            assert_eq!(
                rolled.discount_factor(Currency::USD, t).unwrap(),
                provider().discount_factor(Currency::USD, t).unwrap()
            );
        }
    }

    #[test]
    fn test_forward_rolldown_realises_forwards() {
        let base = provider();
        let s = 0.25;
        let rolled = ForwardRolldown.roll_multicurve(&base, s);
        let df = |p: &MulticurveProvider, t: f64| p.discount_factor(Currency::USD, t).unwrap();
        assert_relative_eq!(df(&rolled, 2.0), df(&base, 2.25) / df(&base, 0.25), epsilon = 1e-14);
        assert_eq!(rolled.discount_curve(Currency::USD).unwrap().name(), "USD");
    }
}
