//! Day count conventions.
//!
//! Year fractions are plain `f64`: they feed curve times and accrual
//! factors, both of which are consumed by floating point analytics.
//!
//! - [`DayCount::Act360`]: money market and CDS premium accrual
//! - [`DayCount::Act365Fixed`]: curve time in the ISDA CDS model
//! - [`DayCount::ActActIsda`]: year-split actual/actual
//! - [`DayCount::Thirty360`]: 30/360 US bond basis
//!
//! ```rust
//! use strata_core::daycounts::DayCount;
//! use strata_core::types::Date;
//!
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2025, 4, 1).unwrap();
//! assert_eq!(DayCount::Act360.year_fraction(start, end), 0.25);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Date;

/// Supported day count conventions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum DayCount {
    /// Actual/360.
    Act360,
    /// Actual/365 Fixed.
    #[default]
    Act365Fixed,
    /// Actual/Actual ISDA: days in leap years over 366, others over 365.
    ActActIsda,
    /// 30/360 US (bond basis).
    Thirty360,
}

impl DayCount {
    /// Returns the market name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCount::Act360 => "ACT/360",
            DayCount::Act365Fixed => "ACT/365F",
            DayCount::ActActIsda => "ACT/ACT ISDA",
            DayCount::Thirty360 => "30/360",
        }
    }

    /// Number of days between the dates under this convention.
    #[must_use]
    pub fn day_count(&self, start: Date, end: Date) -> i64 {
        match self {
            DayCount::Thirty360 => thirty_360_days(start, end),
            _ => start.days_between(&end),
        }
    }

    /// Year fraction from `start` to `end`; negative when `end < start`.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        match self {
            DayCount::Act360 => start.days_between(&end) as f64 / 360.0,
            DayCount::Act365Fixed => start.days_between(&end) as f64 / 365.0,
            DayCount::Thirty360 => thirty_360_days(start, end) as f64 / 360.0,
            DayCount::ActActIsda => {
                if end < start {
                    return -act_act_isda(end, start);
                }
                act_act_isda(start, end)
            }
        }
    }
}

impl fmt::Display for DayCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn thirty_360_days(start: Date, end: Date) -> i64 {
    let d1 = start.day().min(30);
    let d2 = if d1 == 30 { end.day().min(30) } else { end.day() };
    let years = i64::from(end.year() - start.year());
    let months = i64::from(end.month()) - i64::from(start.month());
    360 * years + 30 * months + i64::from(d2) - i64::from(d1)
}

fn act_act_isda(start: Date, end: Date) -> f64 {
    if start.year() == end.year() {
        return start.days_between(&end) as f64 / f64::from(start.days_in_year());
    }
    let mut fraction = 0.0;
    let mut cursor = start;
    for year in start.year()..end.year() {
        let next_year = Date::from_ymd(year + 1, 1, 1).unwrap_or(end);
        fraction += cursor.days_between(&next_year) as f64 / f64::from(cursor.days_in_year());
        cursor = next_year;
    }
    fraction + cursor.days_between(&end) as f64 / f64::from(end.days_in_year())
}
