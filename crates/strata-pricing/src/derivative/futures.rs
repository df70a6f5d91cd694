//! Bond futures derivatives.

use serde::{Deserialize, Serialize};
use strata_core::types::Currency;

use super::bond::BondFixedSecurity;

/// A bond futures contract with its deliverable basket.
///
/// Each deliverable is described as if bought for settlement on the
/// delivery date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondFuturesSecurity {
    /// Contract currency.
    pub currency: Currency,
    /// Time to the last trading date.
    pub last_trading_time: f64,
    /// Time to delivery.
    pub delivery_time: f64,
    /// Deliverable bonds, settling at delivery.
    pub basket: Vec<BondFixedSecurity>,
    /// Conversion factor of each deliverable.
    pub conversion_factors: Vec<f64>,
    /// Contract notional.
    pub notional: f64,
}

/// A futures position marked against a reference price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondFuturesTransaction {
    /// The contract.
    pub underlying: BondFuturesSecurity,
    /// Number of contracts.
    pub quantity: f64,
    /// Trade price on the trade date, last margin price afterwards.
    pub reference_price: f64,
}
