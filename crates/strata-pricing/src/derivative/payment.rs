//! Single payments and coupons in time-to-payment form.

use serde::{Deserialize, Serialize};
use strata_core::types::Currency;
use strata_curves::index::IborIndex;

/// A known amount paid at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentFixed {
    /// Payment currency.
    pub currency: Currency,
    /// Time to payment in years.
    pub payment_time: f64,
    /// Signed amount; negative when paid.
    pub amount: f64,
}

impl PaymentFixed {
    /// Creates a payment.
    #[must_use]
    pub fn new(currency: Currency, payment_time: f64, amount: f64) -> Self {
        Self {
            currency,
            payment_time,
            amount,
        }
    }
}

/// A coupon with a known rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CouponFixed {
    /// Payment currency.
    pub currency: Currency,
    /// Time to payment in years.
    pub payment_time: f64,
    /// Accrual year fraction of the period.
    pub payment_year_fraction: f64,
    /// Signed notional.
    pub notional: f64,
    /// Annual coupon rate.
    pub rate: f64,
}

impl CouponFixed {
    /// Creates a coupon.
    #[must_use]
    pub fn new(
        currency: Currency,
        payment_time: f64,
        payment_year_fraction: f64,
        notional: f64,
        rate: f64,
    ) -> Self {
        Self {
            currency,
            payment_time,
            payment_year_fraction,
            notional,
            rate,
        }
    }

    /// The amount paid.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.notional * self.rate * self.payment_year_fraction
    }

    /// The coupon as a fixed payment.
    #[must_use]
    pub fn to_payment(&self) -> PaymentFixed {
        PaymentFixed::new(self.currency, self.payment_time, self.amount())
    }
}

/// A coupon on a term rate index that has not fixed yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponIbor {
    /// Payment currency.
    pub currency: Currency,
    /// Time to payment in years.
    pub payment_time: f64,
    /// Accrual year fraction of the period.
    pub payment_year_fraction: f64,
    /// Signed notional.
    pub notional: f64,
    /// The index.
    pub index: IborIndex,
    /// Start of the index deposit period.
    pub fixing_period_start_time: f64,
    /// End of the index deposit period.
    pub fixing_period_end_time: f64,
    /// Index year fraction of the deposit period.
    pub fixing_year_fraction: f64,
    /// Spread added to the index rate.
    pub spread: f64,
}

/// A coupon of a funding or floating leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Coupon {
    /// Known rate (fixed, or a floating coupon already fixed).
    Fixed(CouponFixed),
    /// Term rate coupon to be projected from the index curve.
    Ibor(CouponIbor),
}

impl Coupon {
    /// Currency of the payment.
    #[must_use]
    pub fn currency(&self) -> Currency {
        match self {
            Coupon::Fixed(c) => c.currency,
            Coupon::Ibor(c) => c.currency,
        }
    }

    /// Time to payment.
    #[must_use]
    pub fn payment_time(&self) -> f64 {
        match self {
            Coupon::Fixed(c) => c.payment_time,
            Coupon::Ibor(c) => c.payment_time,
        }
    }
}
