//! # Strata Math
//!
//! Numerical building blocks for the Strata analytics library.
//!
//! - **Solvers**: Brent and bracket-safeguarded Newton root finding
//! - **Integration**: adaptive Runge-Kutta quadrature
//! - **Differentiation**: finite-difference derivatives
//! - **Interpolation**: linear interpolation exposing node weights, so that
//!   curves built on it can report parameter sensitivities exactly

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]

pub mod differentiation;
pub mod error;
pub mod integration;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::differentiation::{central_difference, forward_difference};
    pub use crate::error::{MathError, MathResult};
    pub use crate::integration::{integrate, runge_kutta};
    pub use crate::interpolation::LinearInterpolator;
    pub use crate::solvers::{
        brent, expand_upper_bracket, newton_bracketed, SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
