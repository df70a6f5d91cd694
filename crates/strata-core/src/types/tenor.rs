//! Tenors and coupon frequencies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StrataError;

/// Unit of a [`Tenor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TenorUnit {
    /// Calendar days
    Days,
    /// Weeks of seven days
    Weeks,
    /// Calendar months
    Months,
    /// Calendar years
    Years,
}

/// A period such as `3M` or `5Y`.
///
/// ```rust
/// use strata_core::types::Tenor;
///
/// let tenor: Tenor = "6M".parse().unwrap();
/// assert_eq!(tenor, Tenor::months(6));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tenor {
    amount: i32,
    unit: TenorUnit,
}

impl Tenor {
    /// Creates a tenor.
    #[must_use]
    pub const fn new(amount: i32, unit: TenorUnit) -> Self {
        Self { amount, unit }
    }

    /// A tenor of `n` days.
    #[must_use]
    pub const fn days(n: i32) -> Self {
        Self::new(n, TenorUnit::Days)
    }

    /// A tenor of `n` weeks.
    #[must_use]
    pub const fn weeks(n: i32) -> Self {
        Self::new(n, TenorUnit::Weeks)
    }

    /// A tenor of `n` months.
    #[must_use]
    pub const fn months(n: i32) -> Self {
        Self::new(n, TenorUnit::Months)
    }

    /// A tenor of `n` years.
    #[must_use]
    pub const fn years(n: i32) -> Self {
        Self::new(n, TenorUnit::Years)
    }

    /// Signed number of units.
    #[must_use]
    pub const fn amount(&self) -> i32 {
        self.amount
    }

    /// The unit.
    #[must_use]
    pub const fn unit(&self) -> TenorUnit {
        self.unit
    }

    /// The same tenor with the opposite sign.
    #[must_use]
    pub const fn negate(&self) -> Self {
        Self::new(-self.amount, self.unit)
    }

    /// Multiplies the tenor by an integer factor.
    #[must_use]
    pub const fn times(&self, factor: i32) -> Self {
        Self::new(self.amount * factor, self.unit)
    }

    /// Returns true for a zero-length tenor.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount == 0
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.unit {
            TenorUnit::Days => 'D',
            TenorUnit::Weeks => 'W',
            TenorUnit::Months => 'M',
            TenorUnit::Years => 'Y',
        };
        write!(f, "{}{unit}", self.amount)
    }
}

impl FromStr for Tenor {
    type Err = StrataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .ok_or_else(|| StrataError::invalid_tenor("empty tenor"))?;
        let (number, unit) = s.split_at(split);
        let amount: i32 = number
            .parse()
            .map_err(|_| StrataError::invalid_tenor(format!("bad amount in '{s}'")))?;
        let unit = match unit.to_ascii_uppercase().as_str() {
            "D" => TenorUnit::Days,
            "W" => TenorUnit::Weeks,
            "M" => TenorUnit::Months,
            "Y" => TenorUnit::Years,
            other => return Err(StrataError::invalid_tenor(format!("unknown unit '{other}'"))),
        };
        Ok(Self::new(amount, unit))
    }
}

/// Payment frequency for coupon bonds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year)
    #[default]
    SemiAnnual,
    /// Quarterly payments (4 per year)
    Quarterly,
    /// Monthly payments (12 per year)
    Monthly,
}

impl Frequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Returns the coupon period as a tenor.
    #[must_use]
    pub fn period(&self) -> Tenor {
        Tenor::months(12 / self.periods_per_year() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tenor() {
        assert_eq!("3M".parse::<Tenor>().unwrap(), Tenor::months(3));
        assert_eq!("10y".parse::<Tenor>().unwrap(), Tenor::years(10));
        assert_eq!("1W".parse::<Tenor>().unwrap(), Tenor::weeks(1));
        assert!("M".parse::<Tenor>().is_err());
        assert!("5Q".parse::<Tenor>().is_err());
        assert!("".parse::<Tenor>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let tenor = Tenor::days(-2);
        assert_eq!(tenor.to_string(), "-2D");
        assert_eq!(tenor.to_string().parse::<Tenor>().unwrap(), tenor);
    }

    #[test]
    fn test_frequency_period() {
        assert_eq!(Frequency::SemiAnnual.period(), Tenor::months(6));
        assert_eq!(Frequency::Quarterly.period(), Tenor::months(3));
    }
}
