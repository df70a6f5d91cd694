//! Core curve traits.
//!
//! Every curve is a named, immutable function of time to maturity `t`
//! (in years from the valuation date) that also reports how its value
//! moves with each of its parameters. Scenario and bump operations never
//! mutate a curve; they build a new one.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::error::CurveResult;

/// Step used by the default numerical forward rate.
const FORWARD_BUMP: f64 = 1e-6;

/// A yield / discount curve.
///
/// Rates are continuously compounded zero rates. All evaluation methods are
/// total functions of `t`: curves extrapolate rather than fail.
///
/// # Contract
///
/// * `discount_factor(t) == exp(-interest_rate(t) * t)`
/// * `interest_rate_parameter_sensitivity(t).len() == number_of_parameters()`
pub trait Curve: Send + Sync + fmt::Debug {
    /// The curve's name, unique within a provider.
    fn name(&self) -> &str;

    /// Continuously compounded zero rate to time `t`.
    fn interest_rate(&self, t: f64) -> f64;

    /// Discount factor to time `t`.
    fn discount_factor(&self, t: f64) -> f64 {
        (-self.interest_rate(t) * t).exp()
    }

    /// Instantaneous forward rate at `t`, i.e. `d(r(t) t)/dt`.
    ///
    /// The default differentiates `r(t) t` numerically, one-sided near zero.
    fn forward_rate(&self, t: f64) -> f64 {
        let rt = |s: f64| self.interest_rate(s) * s;
        if t < FORWARD_BUMP {
            (rt(t + FORWARD_BUMP) - rt(t)) / FORWARD_BUMP
        } else {
            (rt(t + FORWARD_BUMP) - rt(t - FORWARD_BUMP)) / (2.0 * FORWARD_BUMP)
        }
    }

    /// Number of parameters driving the curve.
    fn number_of_parameters(&self) -> usize;

    /// Derivative of `interest_rate(t)` with respect to each parameter.
    fn interest_rate_parameter_sensitivity(&self, t: f64) -> Vec<f64>;

    /// Names of the curves this curve is built from (empty for a primitive curve).
    fn underlying_curve_names(&self) -> Vec<String> {
        Vec::new()
    }

    /// Number of parameters that are not owned by an excluded curve.
    ///
    /// A primitive curve owns all its parameters; combinators drop the
    /// parameters of underlying curves whose names are in `excluded`.
    fn number_of_intrinsic_parameters(&self, excluded: &BTreeSet<String>) -> usize {
        let _ = excluded;
        self.number_of_parameters()
    }

    /// A new curve with parameter `index` moved by `shift`.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidParameterIndex` if `index` is out of range.
    fn with_parameter_shift(&self, index: usize, shift: f64) -> CurveResult<Arc<dyn Curve>>;
}

/// A price-index curve: the projected level of an index (e.g. CPI) at `t`.
///
/// Mirrors [`Curve`] with the index level in place of the rate.
pub trait PriceIndexCurve: Send + Sync + fmt::Debug {
    /// The curve's name.
    fn name(&self) -> &str;

    /// Projected index level at time `t`.
    fn price_index(&self, t: f64) -> f64;

    /// Number of parameters driving the curve.
    fn number_of_parameters(&self) -> usize;

    /// Derivative of `price_index(t)` with respect to each parameter.
    fn price_index_parameter_sensitivity(&self, t: f64) -> Vec<f64>;

    /// Names of the curves this curve is built from.
    fn underlying_curve_names(&self) -> Vec<String> {
        Vec::new()
    }

    /// Number of parameters not owned by an excluded curve.
    fn number_of_intrinsic_parameters(&self, excluded: &BTreeSet<String>) -> usize {
        let _ = excluded;
        self.number_of_parameters()
    }

    /// A new curve with parameter `index` moved by `shift`.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidParameterIndex` if `index` is out of range.
    fn with_parameter_shift(
        &self,
        index: usize,
        shift: f64,
    ) -> CurveResult<Arc<dyn PriceIndexCurve>>;
}

/// A deterministic scalar function of time with no calibrated parameters.
///
/// Used for drift curves, forward-price functions and seasonal adjustments.
pub trait ScalarCurve: Send + Sync + fmt::Debug {
    /// Value at time `t`.
    fn value(&self, t: f64) -> f64;
}

/// Locates the underlying curve owning the combined parameter `index`.
///
/// Returns `(curve position, index within that curve)`.
pub(crate) fn locate_parameter(counts: &[usize], index: usize) -> Option<(usize, usize)> {
    let mut offset = 0;
    for (position, count) in counts.iter().enumerate() {
        if index < offset + count {
            return Some((position, index - offset));
        }
        offset += count;
    }
    None
}
