//! Price-index curve interpolated on index levels.

use std::sync::Arc;

use strata_math::interpolation::LinearInterpolator;

use crate::error::{CurveError, CurveResult};
use crate::traits::PriceIndexCurve;

/// Index levels linearly interpolated in time, flat outside the nodes.
///
/// Each node level is one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedPriceIndexCurve {
    name: String,
    interpolator: LinearInterpolator,
}

impl InterpolatedPriceIndexCurve {
    /// Creates the curve from node times and index levels.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid nodes or non-positive levels.
    pub fn new(name: impl Into<String>, times: Vec<f64>, levels: Vec<f64>) -> CurveResult<Self> {
        let name = name.into();
        if levels.iter().any(|l| *l <= 0.0) {
            return Err(CurveError::invalid_argument(format!(
                "price index curve '{name}' has a non-positive level"
            )));
        }
        Ok(Self {
            name,
            interpolator: LinearInterpolator::new(times, levels)?,
        })
    }

    /// Node times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        self.interpolator.xs()
    }

    /// Node levels.
    #[must_use]
    pub fn levels(&self) -> &[f64] {
        self.interpolator.ys()
    }
}

impl PriceIndexCurve for InterpolatedPriceIndexCurve {
    fn name(&self) -> &str {
        &self.name
    }

    fn price_index(&self, t: f64) -> f64 {
        self.interpolator.value(t)
    }

    fn number_of_parameters(&self) -> usize {
        self.interpolator.len()
    }

    fn price_index_parameter_sensitivity(&self, t: f64) -> Vec<f64> {
        self.interpolator.node_weights(t)
    }

    fn with_parameter_shift(
        &self,
        index: usize,
        shift: f64,
    ) -> CurveResult<Arc<dyn PriceIndexCurve>> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_levels() {
        let curve =
            InterpolatedPriceIndexCurve::new("US-CPI", vec![0.0, 1.0, 2.0], vec![300.0, 306.0, 312.0])
                .unwrap();
        assert_relative_eq!(curve.price_index(1.5), 309.0);
        assert_eq!(curve.price_index_parameter_sensitivity(1.5), vec![0.0, 0.5, 0.5]);

        let bumped = curve.with_parameter_shift(2, 1.0).unwrap();
        assert_relative_eq!(bumped.price_index(2.0), 313.0);
    }

    #[test]
    fn test_non_positive_level_rejected() {
        assert!(InterpolatedPriceIndexCurve::new("BAD", vec![0.0, 1.0], vec![100.0, 0.0]).is_err());
    }
}
