//! # Strata Credit
//!
//! Credit default swap analytics under the ISDA standard model.
//!
//! - **Curves**: [`curve::IsdaYieldCurve`] and [`curve::IsdaCreditCurve`],
//!   zero rates interpolated linearly in `r t`
//! - **Contracts**: premium leg schedules with stubs, coupons in curve time
//!   and the [`analytic::CdsAnalytic`] description of a trade, built by
//!   [`analytic::CdsAnalyticFactory`] for standard IMM contracts
//! - **Pricing**: closed-form protection and premium legs, par spreads,
//!   and exact derivatives with respect to every curve knot
//! - **Calibration**: [`builder::SimpleCreditCurveBuilder`] bootstraps a
//!   credit curve from par spreads or upfront quotes
//!
//! ## Example
//!
//! ```rust
//! use strata_core::types::{Date, Tenor};
//! use strata_credit::prelude::*;
//!
//! let trade = Date::from_ymd(2024, 6, 14).unwrap();
//! let cds = CdsAnalyticFactory::new(0.4).make_imm_cds(trade, Tenor::years(5)).unwrap();
//! let yc = IsdaYieldCurve::flat(0.03).unwrap();
//!
//! let builder = SimpleCreditCurveBuilder::new();
//! let cc = builder.calibrate(&[cds.clone()], &[0.01], &yc).unwrap();
//! let pv = builder.pricer().pv(&cds, &yc, &cc, 0.01, PriceType::Clean);
//! assert!(pv.abs() < 1e-14);
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
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]
#![allow(clippy::return_self_not_must_use)]

pub mod analytic;
pub mod builder;
pub mod coupon;
pub mod curve;
pub mod error;
pub mod pricer;
pub mod schedule;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analytic::{CdsAnalytic, CdsAnalyticFactory, CdsTerms};
    pub use crate::builder::SimpleCreditCurveBuilder;
    pub use crate::coupon::CdsCoupon;
    pub use crate::curve::{IsdaCreditCurve, IsdaCurve, IsdaYieldCurve};
    pub use crate::error::{CreditError, CreditResult};
    pub use crate::pricer::{AccrualOnDefault, AnalyticCdsPricer, PriceType};
    pub use crate::schedule::{IsdaPremiumLegSchedule, StubType};
}

pub use error::{CreditError, CreditResult};
