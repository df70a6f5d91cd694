//! Index and issuer identifiers used to key provider curves.

use std::fmt;

use serde::{Deserialize, Serialize};
use strata_core::calendars::BusinessDayConvention;
use strata_core::daycounts::DayCount;
use strata_core::types::{Currency, Tenor};

/// A term rate index such as EURIBOR 6M.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IborIndex {
    /// Index name, e.g. `"EURIBOR6M"`.
    pub name: String,
    /// Currency of the index.
    pub currency: Currency,
    /// Tenor of the underlying deposit.
    pub tenor: Tenor,
    /// Accrual day count.
    pub day_count: DayCount,
    /// Adjustment of the deposit end date.
    pub business_day_convention: BusinessDayConvention,
    /// Business days between fixing and deposit start.
    pub spot_lag: i32,
}

impl IborIndex {
    /// Creates an index with `ModifiedFollowing` and a two-day spot lag.
    pub fn new(name: impl Into<String>, currency: Currency, tenor: Tenor, day_count: DayCount) -> Self {
        Self {
            name: name.into(),
            currency,
            tenor,
            day_count,
            business_day_convention: BusinessDayConvention::ModifiedFollowing,
            spot_lag: 2,
        }
    }
}

impl fmt::Display for IborIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// An overnight index such as SOFR or ESTR.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OvernightIndex {
    /// Index name.
    pub name: String,
    /// Currency of the index.
    pub currency: Currency,
    /// Accrual day count.
    pub day_count: DayCount,
}

impl OvernightIndex {
    /// Creates an overnight index.
    pub fn new(name: impl Into<String>, currency: Currency, day_count: DayCount) -> Self {
        Self {
            name: name.into(),
            currency,
            day_count,
        }
    }
}

impl fmt::Display for OvernightIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A price index such as US CPI-U.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PriceIndex {
    /// Index name.
    pub name: String,
    /// Currency of the index.
    pub currency: Currency,
}

impl PriceIndex {
    /// Creates a price index.
    pub fn new(name: impl Into<String>, currency: Currency) -> Self {
        Self {
            name: name.into(),
            currency,
        }
    }
}

impl fmt::Display for PriceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Identifies the curve discounting an issuer's cash flows in one currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IssuerKey {
    /// Issuer name.
    pub issuer: String,
    /// Currency of the issuer's debt.
    pub currency: Currency,
}

impl IssuerKey {
    /// Creates a key.
    pub fn new(issuer: impl Into<String>, currency: Currency) -> Self {
        Self {
            issuer: issuer.into(),
            currency,
        }
    }
}

impl fmt::Display for IssuerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.issuer, self.currency)
    }
}
