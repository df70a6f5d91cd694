//! Amounts in several currencies and the FX matrix used to convert them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Add, Neg, Sub};

use super::Currency;
use crate::error::{StrataError, StrataResult};

/// A signed amount per currency.
///
/// Present values of multi-leg instruments are returned in this form so
/// that currencies are never summed implicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiCurrencyAmount {
    amounts: BTreeMap<Currency, f64>,
}

impl MultiCurrencyAmount {
    /// An empty amount.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An amount in a single currency.
    #[must_use]
    pub fn of(currency: Currency, amount: f64) -> Self {
        let mut amounts = BTreeMap::new();
        amounts.insert(currency, amount);
        Self { amounts }
    }

    /// Adds an amount in one currency, returning the new total.
    #[must_use]
    pub fn plus_amount(mut self, currency: Currency, amount: f64) -> Self {
        *self.amounts.entry(currency).or_insert(0.0) += amount;
        self
    }

    /// Adds every currency of `other`.
    #[must_use]
    pub fn plus(self, other: &Self) -> Self {
        other
            .iter()
            .fold(self, |acc, (currency, amount)| acc.plus_amount(currency, amount))
    }

    /// Subtracts every currency of `other`.
    #[must_use]
    pub fn minus(self, other: &Self) -> Self {
        self.plus(&other.multiplied_by(-1.0))
    }

    /// Scales every amount.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        Self {
            amounts: self.amounts.iter().map(|(c, a)| (*c, a * factor)).collect(),
        }
    }

    /// The amount in `currency`, zero if absent.
    #[must_use]
    pub fn amount(&self, currency: Currency) -> f64 {
        self.amounts.get(&currency).copied().unwrap_or(0.0)
    }

    /// Currencies present in the amount.
    pub fn currencies(&self) -> impl Iterator<Item = Currency> + '_ {
        self.amounts.keys().copied()
    }

    /// Iterates over `(currency, amount)` pairs in currency order.
    pub fn iter(&self) -> impl Iterator<Item = (Currency, f64)> + '_ {
        self.amounts.iter().map(|(c, a)| (*c, *a))
    }

    /// Number of currencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    /// Returns true when no currency is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

impl Add for MultiCurrencyAmount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.plus(&rhs)
    }
}

impl Sub for MultiCurrencyAmount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.minus(&rhs)
    }
}

impl Neg for MultiCurrencyAmount {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.multiplied_by(-1.0)
    }
}

/// FX rates quoted against a single pivot currency.
///
/// `rate(from, to)` is the number of units of `to` per unit of `from`;
/// cross rates go through the pivot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxMatrix {
    pivot: Currency,
    // units of pivot per unit of currency
    to_pivot: BTreeMap<Currency, f64>,
}

impl FxMatrix {
    /// A matrix knowing only its pivot currency.
    #[must_use]
    pub fn new(pivot: Currency) -> Self {
        let mut to_pivot = BTreeMap::new();
        to_pivot.insert(pivot, 1.0);
        Self { pivot, to_pivot }
    }

    /// Adds a currency with `rate` units of `currency` per unit of the pivot.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::InvalidArgument` for a non-positive rate.
    pub fn with_rate(mut self, currency: Currency, rate: f64) -> StrataResult<Self> {
        if !(rate > 0.0 && rate.is_finite()) {
            return Err(StrataError::invalid_argument(format!(
                "FX rate {}/{currency} must be positive, got {rate}",
                self.pivot
            )));
        }
        self.to_pivot.insert(currency, 1.0 / rate);
        Ok(self)
    }

    /// The pivot currency.
    #[must_use]
    pub fn pivot(&self) -> Currency {
        self.pivot
    }

    /// Units of `to` per unit of `from`.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::MissingFxRate` if either currency is unknown.
    pub fn rate(&self, from: Currency, to: Currency) -> StrataResult<f64> {
        if from == to {
            return Ok(1.0);
        }
        let from_pivot = self.to_pivot.get(&from);
        let to_pivot = self.to_pivot.get(&to);
        match (from_pivot, to_pivot) {
            (Some(f), Some(t)) => Ok(f / t),
            _ => Err(StrataError::missing_fx_rate(from, to)),
        }
    }

    /// Converts every currency of `amount` into `currency` and sums.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::MissingFxRate` if a rate is missing.
    pub fn convert(&self, amount: &MultiCurrencyAmount, currency: Currency) -> StrataResult<f64> {
        amount.iter().try_fold(0.0, |total, (ccy, value)| {
            Ok(total + value * self.rate(ccy, currency)?)
        })
    }
}

impl Default for FxMatrix {
    fn default() -> Self {
        Self::new(Currency::USD)
    }
}
