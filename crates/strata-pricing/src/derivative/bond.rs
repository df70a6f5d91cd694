//! Bond and bill derivatives.

use serde::{Deserialize, Serialize};
use strata_core::types::Currency;
use strata_curves::index::IssuerKey;

use super::payment::{CouponFixed, PaymentFixed};

/// A fixed coupon bond as seen from a valuation date.
///
/// Holds the cash flows received by a holder settling at `settlement_time`:
/// coupons and principal paid after settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondFixedSecurity {
    /// Issuer curve key.
    pub issuer: IssuerKey,
    /// Principal repayments.
    pub nominal: Vec<PaymentFixed>,
    /// Coupons.
    pub coupons: Vec<CouponFixed>,
    /// Time to settlement; negative once settled.
    pub settlement_time: f64,
    /// Accrued interest at settlement for the whole notional.
    pub accrued_interest: f64,
    /// Bond notional.
    pub notional: f64,
}

impl BondFixedSecurity {
    /// Currency of the bond.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.issuer.currency
    }

    /// Every cash flow, coupons first.
    pub fn cash_flows(&self) -> impl Iterator<Item = PaymentFixed> + '_ {
        self.coupons
            .iter()
            .map(CouponFixed::to_payment)
            .chain(self.nominal.iter().copied())
    }
}

/// A position in a fixed coupon bond, with its settlement payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondTransaction {
    /// The bond flows received by the buyer.
    pub security: BondFixedSecurity,
    /// Number of bonds (negative for a short position).
    pub quantity: f64,
    /// Price paid at settlement; `None` once settled.
    pub settlement: Option<PaymentFixed>,
}

/// A zero-coupon bill as seen from a valuation date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillSecurity {
    /// Issuer curve key.
    pub issuer: IssuerKey,
    /// Time to maturity.
    pub end_time: f64,
    /// Amount repaid at maturity.
    pub notional: f64,
}

impl BillSecurity {
    /// Currency of the bill.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.issuer.currency
    }
}

/// A position in a bill, with its settlement payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillTransaction {
    /// The bill.
    pub security: BillSecurity,
    /// Number of bills.
    pub quantity: f64,
    /// Price paid at settlement; `None` once settled.
    pub settlement: Option<PaymentFixed>,
}
