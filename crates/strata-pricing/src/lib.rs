//! # Strata Pricing
//!
//! Bond-like instruments, their discounting prices, and the risk
//! calculators built on top of them.
//!
//! - **Definitions**: fixed coupon bonds, bills, bond futures and bond total
//!   return swaps described in dates ([`definition`])
//! - **Derivatives**: the same instruments seen from a valuation date, in
//!   curve time ([`derivative`])
//! - **Discounting**: present values against an
//!   [`IssuerProvider`](strata_curves::provider::IssuerProvider)
//!   ([`discounting`])
//! - **Horizon**: one-business-day theta with rolled market data
//!   ([`horizon`])
//! - **Sensitivities**: point, parameter and finite-difference curve
//!   sensitivities ([`sensitivity`])
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use strata_core::prelude::*;
//! use strata_curves::prelude::*;
//! use strata_pricing::prelude::*;
//!
//! let ust = IssuerKey::new("UST", Currency::USD);
//! let provider = IssuerProvider::new(
//!     MulticurveProvider::default()
//!         .with_discount_curve(Currency::USD, Arc::new(ConstantCurve::new("USD-OIS", 0.01))),
//! )
//! .with_issuer_curve(ust.clone(), Arc::new(ConstantCurve::new("UST", 0.02)));
//!
//! let bill = BillSecurityDefinition::new(ust, Date::from_ymd(2025, 6, 2).unwrap(), 100.0);
//! let trade = BillTransactionDefinition::new(bill, 1.0, Date::from_ymd(2024, 6, 5).unwrap(), -98.0);
//! let today = Date::from_ymd(2024, 6, 3).unwrap();
//!
//! let pv = present_value(&trade.to_derivative(today).unwrap().into(), &provider).unwrap();
//! let carry = theta(&trade.into(), today, &provider, 1, &WeekendCalendar, None, None).unwrap();
//! assert!(pv.amount(Currency::USD) > 0.0);
//! assert!(carry.amount(Currency::USD) > 0.0);
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

pub mod definition;
pub mod derivative;
pub mod discounting;
pub mod error;
pub mod horizon;
pub mod sensitivity;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::definition::{
        BillSecurityDefinition, BillTransactionDefinition, BondFuturesSecurityDefinition,
        BondFuturesTransactionDefinition, BondTotalReturnSwapDefinition,
        BondTransactionDefinition, FixedCouponBondDefinition, FundingLegDefinition,
        InstrumentDefinition,
    };
    pub use crate::derivative::InstrumentDerivative;
    pub use crate::discounting::{present_value, present_value_curve_sensitivity};
    pub use crate::error::{PricingError, PricingResult};
    pub use crate::horizon::{
        theta, BillTransactionHorizon, BondFuturesTransactionHorizon, BondTotalReturnSwapHorizon,
        BondTransactionHorizon, HorizonCalculator, HorizonData,
    };
    pub use crate::sensitivity::{
        MulticurveSensitivity, ParameterSensitivity, ParameterSensitivityCalculator,
        ParameterSensitivityFdCalculator,
    };
}

pub use error::{PricingError, PricingResult};
