//! Instruments in pricing form.
//!
//! A derivative is an instrument definition seen from one valuation date:
//! dates become times in years (ACT/365F) from that date, past cash flows
//! are dropped and past fixings are resolved. Pricing methods work only
//! with derivatives.

mod bond;
mod futures;
mod payment;
mod trs;

pub use bond::{BillSecurity, BillTransaction, BondFixedSecurity, BondTransaction};
pub use futures::{BondFuturesSecurity, BondFuturesTransaction};
pub use payment::{Coupon, CouponFixed, CouponIbor, PaymentFixed};
pub use trs::{BondTotalReturnSwap, FundingLeg};

use serde::{Deserialize, Serialize};

/// Every instrument the discounting method prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstrumentDerivative {
    /// A single payment.
    PaymentFixed(PaymentFixed),
    /// A fixed bond security.
    BondFixedSecurity(BondFixedSecurity),
    /// A bond transaction.
    BondTransaction(BondTransaction),
    /// A bill security.
    BillSecurity(BillSecurity),
    /// A bill transaction.
    BillTransaction(BillTransaction),
    /// A bond futures transaction.
    BondFuturesTransaction(BondFuturesTransaction),
    /// A bond total return swap.
    BondTotalReturnSwap(BondTotalReturnSwap),
}

macro_rules! impl_from_derivative {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for InstrumentDerivative {
                fn from(value: $variant) -> Self {
                    InstrumentDerivative::$variant(value)
                }
            }
        )*
    };
}

impl_from_derivative!(
    PaymentFixed,
    BondFixedSecurity,
    BondTransaction,
    BillSecurity,
    BillTransaction,
    BondFuturesTransaction,
    BondTotalReturnSwap
);
