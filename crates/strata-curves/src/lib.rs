//! # Strata Curves
//!
//! Composable market curves for the Strata analytics library.
//!
//! Every curve exposes its value together with the sensitivity of that
//! value to each of its parameters, and combinators propagate both:
//! a spread curve's parameters are its components' parameters
//! concatenated in order.
//!
//! - **Yield curves**: [`curves::ConstantCurve`], [`curves::InterpolatedCurve`],
//!   [`curves::AddZeroSpreadCurve`], [`curves::TimeShiftedCurve`]
//! - **Price-index curves**: interpolated levels, fixed seasonal adjustments
//!   and spreads of several curves
//! - **Forward curves**: forward price and drift, each derivable from the other
//! - **Providers**: immutable multicurve and issuer snapshots with FX rates
//! - **Rolldown**: moving a provider to a new valuation time
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use strata_curves::prelude::*;
//!
//! let ois: Arc<dyn Curve> = Arc::new(ConstantCurve::new("USD-OIS", 0.01));
//! let spread: Arc<dyn Curve> = Arc::new(ConstantCurve::new("UST-SPREAD", 0.004));
//! let issuer = AddZeroSpreadCurve::new("UST", false, vec![ois, spread]).unwrap();
//!
//! assert!((issuer.interest_rate(5.0) - 0.014).abs() < 1e-15);
//! assert_eq!(issuer.interest_rate_parameter_sensitivity(5.0), vec![1.0, 1.0]);
//! ```

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
#![allow(clippy::float_cmp)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::needless_pass_by_value)]

pub mod curves;
pub mod error;
pub mod forward;
pub mod index;
pub mod inflation;
pub mod provider;
pub mod rolldown;
pub mod scalar;
pub mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::curves::{AddZeroSpreadCurve, ConstantCurve, InterpolatedCurve, TimeShiftedCurve};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::forward::ForwardCurve;
    pub use crate::index::{IborIndex, IssuerKey, OvernightIndex, PriceIndex};
    pub use crate::inflation::{
        InterpolatedPriceIndexCurve, PriceIndexAddFixedCurve, PriceIndexAddSpreadCurve,
    };
    pub use crate::provider::{IssuerProvider, MulticurveProvider};
    pub use crate::rolldown::{ConstantSpreadRolldown, ForwardRolldown, RolldownFunction};
    pub use crate::scalar::{ConstantScalarCurve, FunctionalScalarCurve, InterpolatedScalarCurve};
    pub use crate::traits::{Curve, PriceIndexCurve, ScalarCurve};
}

pub use error::{CurveError, CurveResult};
pub use traits::{Curve, PriceIndexCurve, ScalarCurve};
