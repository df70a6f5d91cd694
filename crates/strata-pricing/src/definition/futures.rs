//! Bond futures.

use serde::{Deserialize, Serialize};
use strata_core::types::{Currency, Date};

use super::bond::FixedCouponBondDefinition;
use super::time_from;
use crate::derivative::{BondFuturesSecurity, BondFuturesTransaction};
use crate::error::{PricingError, PricingResult};

/// A deliverable bond futures contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondFuturesSecurityDefinition {
    currency: Currency,
    last_trading_date: Date,
    delivery_date: Date,
    basket: Vec<FixedCouponBondDefinition>,
    conversion_factors: Vec<f64>,
    notional: f64,
}

impl BondFuturesSecurityDefinition {
    /// Creates a contract.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidArgument` if the basket is empty, the
    /// conversion factors do not match it or are not positive, or delivery
    /// precedes the last trading date.
    pub fn new(
        currency: Currency,
        last_trading_date: Date,
        delivery_date: Date,
        basket: Vec<FixedCouponBondDefinition>,
        conversion_factors: Vec<f64>,
        notional: f64,
    ) -> PricingResult<Self> {
        if basket.is_empty() {
            return Err(PricingError::invalid_argument("delivery basket is empty"));
        }
        if basket.len() != conversion_factors.len() {
            return Err(PricingError::invalid_argument(format!(
                "{} deliverables but {} conversion factors",
                basket.len(),
                conversion_factors.len()
            )));
        }
        if conversion_factors.iter().any(|cf| !(*cf > 0.0)) {
            return Err(PricingError::invalid_argument("conversion factors must be positive"));
        }
        if delivery_date < last_trading_date {
            return Err(PricingError::invalid_argument(format!(
                "delivery {delivery_date} precedes last trading date {last_trading_date}"
            )));
        }
        if let Some(bond) = basket.iter().find(|b| b.currency() != currency) {
            return Err(PricingError::invalid_argument(format!(
                "deliverable in {} for a {currency} contract",
                bond.currency()
            )));
        }
        Ok(Self {
            currency,
            last_trading_date,
            delivery_date,
            basket,
            conversion_factors,
            notional,
        })
    }

    /// Contract currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Last trading date.
    pub fn last_trading_date(&self) -> Date {
        self.last_trading_date
    }

    /// Delivery date.
    pub fn delivery_date(&self) -> Date {
        self.delivery_date
    }

    /// Deliverable bonds.
    pub fn basket(&self) -> &[FixedCouponBondDefinition] {
        &self.basket
    }

    /// Conversion factor of each deliverable.
    pub fn conversion_factors(&self) -> &[f64] {
        &self.conversion_factors
    }

    /// Contract notional.
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// The contract seen from `date`, deliverables settling at delivery.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidArgument` after the last trading date.
    pub fn to_derivative(&self, date: Date) -> PricingResult<BondFuturesSecurity> {
        if date > self.last_trading_date {
            return Err(PricingError::invalid_argument(format!(
                "futures stopped trading on {}",
                self.last_trading_date
            )));
        }
        let basket = self
            .basket
            .iter()
            .map(|bond| bond.to_derivative(date, self.delivery_date))
            .collect::<PricingResult<Vec<_>>>()?;
        Ok(BondFuturesSecurity {
            currency: self.currency,
            last_trading_time: time_from(date, self.last_trading_date),
            delivery_time: time_from(date, self.delivery_date),
            basket,
            conversion_factors: self.conversion_factors.clone(),
            notional: self.notional,
        })
    }
}

/// A futures position opened at a trade price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondFuturesTransactionDefinition {
    /// The contract.
    pub underlying: BondFuturesSecurityDefinition,
    /// Number of contracts; negative when short.
    pub quantity: f64,
    /// Trade date.
    pub trade_date: Date,
    /// Trade price.
    pub trade_price: f64,
}

impl BondFuturesTransactionDefinition {
    /// Creates a transaction.
    pub fn new(
        underlying: BondFuturesSecurityDefinition,
        quantity: f64,
        trade_date: Date,
        trade_price: f64,
    ) -> Self {
        Self {
            underlying,
            quantity,
            trade_date,
            trade_price,
        }
    }

    /// The position seen from `date`.
    ///
    /// On the trade date the position is marked against the trade price;
    /// afterwards against `last_margin_price`, the previous day's settlement
    /// price.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::Unsupported` after the trade date without a
    /// margin price, and `PricingError::InvalidArgument` before the trade
    /// date.
    pub fn to_derivative(
        &self,
        date: Date,
        last_margin_price: Option<f64>,
    ) -> PricingResult<BondFuturesTransaction> {
        if date < self.trade_date {
            return Err(PricingError::invalid_argument(format!(
                "valuation date {date} before trade date {}",
                self.trade_date
            )));
        }
        let reference_price = if date == self.trade_date {
            self.trade_price
        } else {
            last_margin_price.ok_or_else(|| {
                PricingError::unsupported(
                    "bond futures after the trade date need the last margin price",
                )
            })?
        };
        Ok(BondFuturesTransaction {
            underlying: self.underlying.to_derivative(date)?,
            quantity: self.quantity,
            reference_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::calendars::{BusinessDayConvention, WeekendCalendar};
    use strata_core::daycounts::DayCount;
    use strata_core::types::Frequency;
    use strata_curves::index::IssuerKey;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn deliverable(maturity: Date, rate: f64) -> FixedCouponBondDefinition {
        FixedCouponBondDefinition::new(
            IssuerKey::new("UST", Currency::USD),
            date(2020, 5, 15),
            maturity,
            Frequency::SemiAnnual,
            rate,
            100_000.0,
            DayCount::Thirty360,
            BusinessDayConvention::Following,
            &WeekendCalendar,
        )
        .unwrap()
    }

    fn contract() -> BondFuturesSecurityDefinition {
        BondFuturesSecurityDefinition::new(
            Currency::USD,
            date(2024, 12, 19),
            date(2024, 12, 31),
            vec![deliverable(date(2031, 5, 15), 0.02), deliverable(date(2032, 5, 15), 0.03)],
            vec![0.85, 0.9],
            100_000.0,
        )
        .unwrap()
    }

    #[test]
    fn test_basket_validation() {
        let err = BondFuturesSecurityDefinition::new(
            Currency::USD,
            date(2024, 12, 19),
            date(2024, 12, 31),
            vec![deliverable(date(2031, 5, 15), 0.02)],
            vec![0.85, 0.9],
            100_000.0,
        );
        assert!(matches!(err, Err(PricingError::InvalidArgument { .. })));
    }

    #[test]
    fn test_reference_price() {
        let trade = BondFuturesTransactionDefinition::new(contract(), 10.0, date(2024, 9, 2), 1.1);
        let on_trade = trade.to_derivative(date(2024, 9, 2), None).unwrap();
        assert_eq!(on_trade.reference_price, 1.1);

        let later = trade.to_derivative(date(2024, 9, 3), Some(1.12)).unwrap();
        assert_eq!(later.reference_price, 1.12);
        assert_eq!(later.underlying.basket.len(), 2);

        let missing = trade.to_derivative(date(2024, 9, 3), None);
        assert!(matches!(missing, Err(PricingError::Unsupported { .. })));
    }

    #[test]
    fn test_deliverables_settle_at_delivery() {
        let d = contract().to_derivative(date(2024, 9, 3)).unwrap();
        for bond in &d.basket {
            assert_eq!(bond.settlement_time, d.delivery_time);
            assert!(bond.coupons.iter().all(|c| c.payment_time > d.delivery_time));
        }
    }
}
