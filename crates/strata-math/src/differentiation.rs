//! Finite-difference derivatives.

use crate::error::{MathError, MathResult};

/// Centred difference `(f(x + h) - f(x - h)) / 2h`.
///
/// # Errors
///
/// Returns `MathError::DivisionByZero` if `h` is zero or not finite.
pub fn central_difference<F>(f: F, x: f64, h: f64) -> MathResult<f64>
where
    F: Fn(f64) -> f64,
{
    check_step(h)?;
    Ok((f(x + h) - f(x - h)) / (2.0 * h))
}

/// Forward difference `(f(x + h) - f(x)) / h`.
///
/// # Errors
///
/// Returns `MathError::DivisionByZero` if `h` is zero or not finite.
pub fn forward_difference<F>(f: F, x: f64, h: f64) -> MathResult<f64>
where
    F: Fn(f64) -> f64,
{
    check_step(h)?;
    Ok((f(x + h) - f(x)) / h)
}

fn check_step(h: f64) -> MathResult<()> {
    if h == 0.0 || !h.is_finite() {
        return Err(MathError::division_by_zero(h));
    }
    Ok(())
}
