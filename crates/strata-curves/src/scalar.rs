//! Deterministic scalar curves.

use std::fmt;
use std::sync::Arc;

use strata_math::interpolation::LinearInterpolator;

use crate::error::CurveResult;
use crate::traits::ScalarCurve;

/// The same value at every time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantScalarCurve {
    value: f64,
}

impl ConstantScalarCurve {
    /// Creates a constant curve.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl ScalarCurve for ConstantScalarCurve {
    fn value(&self, _t: f64) -> f64 {
        self.value
    }
}

/// A scalar curve backed by a closure.
#[derive(Clone)]
pub struct FunctionalScalarCurve {
    name: String,
    function: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
}

impl FunctionalScalarCurve {
    /// Wraps `function` under `name`.
    pub fn new(
        name: impl Into<String>,
        function: impl Fn(f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            function: Arc::new(function),
        }
    }

    /// The curve's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for FunctionalScalarCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionalScalarCurve")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl ScalarCurve for FunctionalScalarCurve {
    fn value(&self, t: f64) -> f64 {
        (self.function)(t)
    }
}

/// Values linearly interpolated between nodes, flat outside.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedScalarCurve {
    interpolator: LinearInterpolator,
}

impl InterpolatedScalarCurve {
    /// Creates the curve from node times and values.
    ///
    /// # Errors
    ///
    /// Returns an error for empty, mismatched or non-increasing nodes.
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> CurveResult<Self> {
        Ok(Self {
            interpolator: LinearInterpolator::new(times, values)?,
        })
    }
}

impl ScalarCurve for InterpolatedScalarCurve {
    fn value(&self, t: f64) -> f64 {
        self.interpolator.value(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scalar_curves() {
        assert_relative_eq!(ConstantScalarCurve::new(0.02).value(7.0), 0.02);

        let functional = FunctionalScalarCurve::new("SQUARE", |t| t * t);
        assert_relative_eq!(functional.value(3.0), 9.0);
        assert!(format!("{functional:?}").contains("SQUARE"));

        let interpolated = InterpolatedScalarCurve::new(vec![0.0, 1.0], vec![1.0, 3.0]).unwrap();
        assert_relative_eq!(interpolated.value(0.25), 1.5);
        assert_relative_eq!(interpolated.value(5.0), 3.0);
    }
}
