//! Instrument definitions.
//!
//! A definition describes a trade in dates and amounts, independent of any
//! valuation date. `to_derivative` turns it into the time-based form the
//! pricing methods consume.

mod bond;
mod futures;
mod trs;

pub use bond::{
    BillSecurityDefinition, BillTransactionDefinition, BondTransactionDefinition, CouponPeriod,
    FixedCouponBondDefinition,
};
pub use futures::{BondFuturesSecurityDefinition, BondFuturesTransactionDefinition};
pub use trs::{
    BondTotalReturnSwapDefinition, CouponDefinition, CouponFixedDefinition, CouponIborDefinition,
    FundingLegDefinition,
};

use serde::{Deserialize, Serialize};
use strata_core::daycounts::DayCount;
use strata_core::types::{Date, FixingSeries};

use crate::derivative::InstrumentDerivative;
use crate::error::PricingResult;

/// Day count turning dates into curve times.
pub const TIME_DAY_COUNT: DayCount = DayCount::Act365Fixed;

/// Time in years from `valuation` to `date`; negative for past dates.
#[must_use]
pub fn time_from(valuation: Date, date: Date) -> f64 {
    TIME_DAY_COUNT.year_fraction(valuation, date)
}

/// Every instrument with a horizon calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstrumentDefinition {
    /// Fixed coupon bond transaction.
    BondTransaction(BondTransactionDefinition),
    /// Bill transaction.
    BillTransaction(BillTransactionDefinition),
    /// Bond futures transaction.
    BondFuturesTransaction(BondFuturesTransactionDefinition),
    /// Bond total return swap.
    BondTotalReturnSwap(BondTotalReturnSwapDefinition),
}

impl InstrumentDefinition {
    /// The instrument seen from `date`.
    ///
    /// `fixings` is read by total return swaps with term rate funding;
    /// `last_margin_price` by futures after their trade date.
    ///
    /// # Errors
    ///
    /// Propagates the conversion error of the underlying definition.
    pub fn to_derivative(
        &self,
        date: Date,
        fixings: Option<&FixingSeries>,
        last_margin_price: Option<f64>,
    ) -> PricingResult<InstrumentDerivative> {
        Ok(match self {
            InstrumentDefinition::BondTransaction(d) => d.to_derivative(date)?.into(),
            InstrumentDefinition::BillTransaction(d) => d.to_derivative(date)?.into(),
            InstrumentDefinition::BondFuturesTransaction(d) => {
                d.to_derivative(date, last_margin_price)?.into()
            }
            InstrumentDefinition::BondTotalReturnSwap(d) => d.to_derivative(date, fixings)?.into(),
        })
    }
}

macro_rules! impl_from_definition {
    ($($variant:ident => $ty:ty),*) => {
        $(
            impl From<$ty> for InstrumentDefinition {
                fn from(value: $ty) -> Self {
                    InstrumentDefinition::$variant(value)
                }
            }
        )*
    };
}

impl_from_definition!(
    BondTransaction => BondTransactionDefinition,
    BillTransaction => BillTransactionDefinition,
    BondFuturesTransaction => BondFuturesTransactionDefinition,
    BondTotalReturnSwap => BondTotalReturnSwapDefinition
);
