//! Zero-rate curve interpolated between nodes.

use std::sync::Arc;

use strata_math::interpolation::LinearInterpolator;

use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// Zero rates linearly interpolated in time, flat beyond the end nodes.
///
/// Each node rate is one parameter; the parameter sensitivity at `t` is the
/// interpolation weight of each node.
///
/// ```rust
/// use strata_curves::curves::InterpolatedCurve;
/// use strata_curves::Curve;
///
/// let curve = InterpolatedCurve::new("USD-DSC", vec![1.0, 5.0], vec![0.01, 0.03]).unwrap();
/// assert!((curve.interest_rate(3.0) - 0.02).abs() < 1e-15);
/// assert_eq!(curve.interest_rate_parameter_sensitivity(3.0), vec![0.5, 0.5]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedCurve {
    name: String,
    interpolator: LinearInterpolator,
}

impl InterpolatedCurve {
    /// Creates a curve from node times and zero rates.
    ///
    /// # Errors
    ///
    /// Returns an error for empty, mismatched or non-increasing nodes.
    pub fn new(name: impl Into<String>, times: Vec<f64>, rates: Vec<f64>) -> CurveResult<Self> {
        let interpolator = LinearInterpolator::new(times, rates)?;
        Ok(Self {
            name: name.into(),
            interpolator,
        })
    }

    /// Node times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        self.interpolator.xs()
    }

    /// Node zero rates.
    #[must_use]
    pub fn rates(&self) -> &[f64] {
        self.interpolator.ys()
    }
}

impl Curve for InterpolatedCurve {
    fn name(&self) -> &str {
        &self.name
    }

    fn interest_rate(&self, t: f64) -> f64 {
        self.interpolator.value(t)
    }

    fn forward_rate(&self, t: f64) -> f64 {
        self.interpolator.value(t) + t * self.interpolator.derivative(t)
    }

    fn number_of_parameters(&self) -> usize {
        self.interpolator.len()
    }

    fn interest_rate_parameter_sensitivity(&self, t: f64) -> Vec<f64> {
        self.interpolator.node_weights(t)
    }

    fn with_parameter_shift(&self, index: usize, shift: f64) -> CurveResult<Arc<dyn Curve>> {
        if index >= self.number_of_parameters() {
            return Err(CurveError::invalid_parameter_index(
                &self.name,
                index,
                self.number_of_parameters(),
            ));
        }
        Ok(Arc::new(Self {
            name: self.name.clone(),
            interpolator: self.interpolator.with_shifted_node(index, shift)?,
        }))
    }
}
