//! Runge-Kutta integration.
//!
//! [`runge_kutta`] solves `y' = f(t, y)` with a classical fourth-order
//! scheme and step doubling for error control; [`integrate`] uses it as a
//! quadrature rule for `int_a^b g(s) ds`.

use crate::error::{MathError, MathResult};

/// Smallest step, relative to the interval length, before giving up.
const MIN_RELATIVE_STEP: f64 = 1e-12;

/// Steps the interval is initially split into.
const INITIAL_STEPS: f64 = 8.0;

/// Integrates `y' = f(t, y)` from `(t0, y0)` to `t1`.
///
/// Every step is taken once with width `h` and once as two half steps; the
/// step is accepted when the two results agree to `tolerance` (scaled by the
/// step's share of the interval) and the more accurate one is kept, with
/// Richardson extrapolation.
///
/// # Errors
///
/// Returns `MathError::InvalidInput` for a non-positive tolerance and
/// `MathError::ConvergenceFailed` if the step size collapses.
pub fn runge_kutta<F>(f: F, t0: f64, y0: f64, t1: f64, tolerance: f64) -> MathResult<f64>
where
    F: Fn(f64, f64) -> f64,
{
    if !(tolerance > 0.0) {
        return Err(MathError::invalid_input("tolerance must be positive"));
    }
    let length = t1 - t0;
    if length == 0.0 {
        return Ok(y0);
    }

    let min_step = length.abs() * MIN_RELATIVE_STEP;
    let mut h = length / INITIAL_STEPS;
    let mut t = t0;
    let mut y = y0;
    let mut steps = 0u32;

    while (t1 - t) * length.signum() > 0.0 {
        let last = (t + h - t1) * length.signum() >= 0.0;
        if last {
            h = t1 - t;
        }

        let full = rk4_step(&f, t, y, h);
        let half = rk4_step(&f, t, y, 0.5 * h);
        let double_half = rk4_step(&f, t + 0.5 * h, half, 0.5 * h);
        let error = (double_half - full).abs() / 15.0;
        let allowed = tolerance * (h / length).abs();

        if error <= allowed || h.abs() <= min_step {
            t = if last { t1 } else { t + h };
            y = double_half + (double_half - full) / 15.0;
            steps += 1;
            if error < allowed / 32.0 {
                h *= 2.0;
            }
        } else {
            h *= 0.5;
        }
        if !y.is_finite() {
            return Err(MathError::convergence_failed(steps, y));
        }
    }

    Ok(y)
}

/// Integrates `g` over `[a, b]`.
///
/// ```rust
/// use strata_math::integration::integrate;
///
/// let area = integrate(|s| s * s, 0.0, 3.0, 1e-12).unwrap();
/// assert!((area - 9.0).abs() < 1e-10);
/// ```
///
/// # Errors
///
/// Propagates the errors of [`runge_kutta`].
pub fn integrate<G>(g: G, a: f64, b: f64, tolerance: f64) -> MathResult<f64>
where
    G: Fn(f64) -> f64,
{
    runge_kutta(|t, _| g(t), a, 0.0, b, tolerance)
}

fn rk4_step<F>(f: &F, t: f64, y: f64, h: f64) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    let k1 = f(t, y);
    let k2 = f(t + 0.5 * h, y + 0.5 * h * k1);
    let k3 = f(t + 0.5 * h, y + 0.5 * h * k2);
    let k4 = f(t + h, y + h * k3);
    y + h / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4)
}
