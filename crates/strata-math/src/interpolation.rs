//! Linear interpolation with node sensitivities.
//!
//! Besides the interpolated value, [`LinearInterpolator::node_weights`]
//! returns how the value at `x` moves per unit move of each node value.
//! Because linear interpolation is linear in the node values these
//! weights are exact, and curves use them as their parameter sensitivity.

use crate::error::{MathError, MathResult};

/// Piecewise-linear interpolator with flat extrapolation.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearInterpolator {
    /// Creates an interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than one point is supplied, if lengths
    /// differ, or if `xs` is not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.is_empty() {
            return Err(MathError::insufficient_data(1, 0));
        }
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "{} abscissas but {} values",
                xs.len(),
                ys.len()
            )));
        }
        if xs.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(MathError::invalid_input(
                "abscissas must be strictly increasing",
            ));
        }
        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(MathError::invalid_input("non-finite node"));
        }
        Ok(Self { xs, ys })
    }

    /// The node abscissas.
    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// The node values.
    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false; an interpolator holds at least one node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// A copy with the value of node `index` moved by `shift`.
    ///
    /// # Errors
    ///
    /// Returns `MathError::InvalidInput` if `index` is out of range.
    pub fn with_shifted_node(&self, index: usize, shift: f64) -> MathResult<Self> {
        let mut ys = self.ys.clone();
        let value = ys.get_mut(index).ok_or_else(|| {
            MathError::invalid_input(format!("node {index} out of range 0..{}", self.len()))
        })?;
        *value += shift;
        Ok(Self {
            xs: self.xs.clone(),
            ys,
        })
    }

    /// Interpolated value.
    #[must_use]
    pub fn value(&self, x: f64) -> f64 {
        match self.locate(x) {
            Location::Left => self.ys[0],
            Location::Right => self.ys[self.len() - 1],
            Location::Inside(i, w) => (1.0 - w) * self.ys[i] + w * self.ys[i + 1],
        }
    }

    /// Slope of the interpolant at `x` (zero in the flat extrapolation zones).
    #[must_use]
    pub fn derivative(&self, x: f64) -> f64 {
        match self.locate(x) {
            Location::Inside(i, _) => {
                (self.ys[i + 1] - self.ys[i]) / (self.xs[i + 1] - self.xs[i])
            }
            _ => 0.0,
        }
    }

    /// Sensitivity of `value(x)` to each node value.
    #[must_use]
    pub fn node_weights(&self, x: f64) -> Vec<f64> {
        let mut weights = vec![0.0; self.len()];
        match self.locate(x) {
            Location::Left => weights[0] = 1.0,
            Location::Right => weights[self.len() - 1] = 1.0,
            Location::Inside(i, w) => {
                weights[i] = 1.0 - w;
                weights[i + 1] = w;
            }
        }
        weights
    }

    fn locate(&self, x: f64) -> Location {
        let n = self.len();
        if x <= self.xs[0] {
            return Location::Left;
        }
        if x >= self.xs[n - 1] {
            return Location::Right;
        }
        // first node strictly greater than x
        let upper = self.xs.partition_point(|&node| node <= x);
        let i = upper - 1;
        let w = (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
        Location::Inside(i, w)
    }
}

enum Location {
    Left,
    Right,
    Inside(usize, f64),
}
