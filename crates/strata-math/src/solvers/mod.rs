//! Root-finding algorithms.
//!
//! - [`brent`]: bracketing method combining bisection, secant and inverse
//!   quadratic interpolation
//! - [`newton_bracketed`]: Newton-Raphson kept inside a sign-changing bracket,
//!   with bisection steps when Newton leaves it and a Brent fallback when it
//!   stalls
//! - [`expand_upper_bracket`]: grows the upper end of an interval until the
//!   function changes sign
//!
//! ```rust
//! use strata_math::solvers::{newton_bracketed, SolverConfig};
//!
//! let f = |x: f64| x * x - 2.0;
//! let df = |x: f64| 2.0 * x;
//! let config = SolverConfig::default().with_tolerance(1e-14);
//! let result = newton_bracketed(f, df, 1.0, 0.0, 2.0, &config).unwrap();
//! assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-12);
//! ```

mod brent;
mod newton;

pub use brent::brent;
pub use newton::{expand_upper_bracket, newton_bracketed};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Absolute tolerance on the function value and on the step.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builders() {
        let config = SolverConfig::default()
            .with_tolerance(1e-14)
            .with_max_iterations(50);
        assert_eq!(config, SolverConfig::new(1e-14, 50));
    }
}
