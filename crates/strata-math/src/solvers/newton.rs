//! Newton-Raphson safeguarded by a bracket.

use crate::error::{MathError, MathResult};
use crate::solvers::{brent, SolverConfig, SolverResult};

/// Newton-Raphson restricted to a sign-changing interval.
///
/// The bracket `[lower, upper]` is tightened after every evaluation. A Newton
/// step that would leave it (or a vanishing derivative) is replaced by a
/// bisection step. If the iteration budget runs out, Brent's method is run
/// on the original bracket.
///
/// # Errors
///
/// * `MathError::InvalidInput` if `lower >= upper`
/// * `MathError::InvalidBracket` if `f(lower)` and `f(upper)` share a sign
/// * `MathError::ConvergenceFailed` if the Brent fallback also fails
pub fn newton_bracketed<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    lower: f64,
    upper: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    if !(lower < upper) {
        return Err(MathError::invalid_input(format!(
            "bracket [{lower}, {upper}] is empty"
        )));
    }

    let f_lower = f(lower);
    let f_upper = f(upper);
    for (x, fx) in [(lower, f_lower), (upper, f_upper)] {
        if fx == 0.0 {
            return Ok(SolverResult {
                root: x,
                iterations: 0,
                residual: 0.0,
            });
        }
    }
    if f_lower * f_upper > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lower,
            b: upper,
            fa: f_lower,
            fb: f_upper,
        });
    }

    // negative side / positive side of the root
    let (mut neg, mut pos) = if f_lower < 0.0 {
        (lower, upper)
    } else {
        (upper, lower)
    };

    let mut x = if initial_guess > lower && initial_guess < upper {
        initial_guess
    } else {
        0.5 * (lower + upper)
    };

    for iteration in 0..config.max_iterations {
        let fx = f(x);
        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }
        if fx < 0.0 {
            neg = x;
        } else {
            pos = x;
        }

        let dfx = df(x);
        let newton = x - fx / dfx;
        let next = if dfx != 0.0 && newton.is_finite() && (newton - neg) * (newton - pos) < 0.0 {
            newton
        } else {
            0.5 * (neg + pos)
        };

        let step = next - x;
        x = next;
        if step.abs() <= config.tolerance * x.abs().max(1.0) {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: f(x),
            });
        }
    }

    log::debug!(
        "Newton did not converge in {} iterations on [{lower}, {upper}], falling back to Brent",
        config.max_iterations
    );
    brent(&f, lower, upper, config)
}

/// Doubles the width of `[lower, upper]` until `f` changes sign.
///
/// The upper end never exceeds `max_upper`.
///
/// # Errors
///
/// * `MathError::InvalidInput` if `upper <= lower`
/// * `MathError::InvalidBracket` if no sign change is found below `max_upper`
pub fn expand_upper_bracket<F>(f: F, lower: f64, upper: f64, max_upper: f64) -> MathResult<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    if upper <= lower {
        return Err(MathError::invalid_input(format!(
            "upper {upper} must exceed lower {lower}"
        )));
    }

    let f_lower = f(lower);
    let mut hi = upper.min(max_upper);
    let mut f_hi = f(hi);

    while f_lower * f_hi > 0.0 {
        if hi >= max_upper {
            return Err(MathError::InvalidBracket {
                a: lower,
                b: hi,
                fa: f_lower,
                fb: f_hi,
            });
        }
        hi = (lower + 2.0 * (hi - lower)).min(max_upper);
        f_hi = f(hi);
        log::trace!("bracket expanded to [{lower}, {hi}]");
    }

    Ok((lower, hi))
}
