//! Bond total return swap derivatives.

use serde::{Deserialize, Serialize};
use strata_core::types::Currency;

use super::bond::BondFixedSecurity;
use super::payment::{Coupon, PaymentFixed};

/// The funding leg of a total return swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingLeg {
    /// Leg currency.
    pub currency: Currency,
    /// Notional exchanges.
    pub notional_payments: Vec<PaymentFixed>,
    /// Funding coupons.
    pub coupons: Vec<Coupon>,
}

/// A total return swap on a fixed coupon bond.
///
/// The total return receiver is economically long the bond between the
/// effective and termination dates and pays the funding leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondTotalReturnSwap {
    /// Time to the effective date.
    pub effective_time: f64,
    /// Time to the termination date.
    pub termination_time: f64,
    /// Bond flows from the later of today and the effective date.
    pub asset: BondFixedSecurity,
    /// Bond notional held (negative for the total return payer).
    pub asset_quantity: f64,
    /// Funding leg, signed from the total return receiver's side.
    pub funding: FundingLeg,
}
