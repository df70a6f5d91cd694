//! Date type for financial calculations.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use super::{Tenor, TenorUnit};
use crate::error::{StrataError, StrataResult};

/// Day of month on which standard CDS contracts roll.
const CDS_IMM_DAY: u32 = 20;

/// A calendar date.
///
/// Newtype over `chrono::NaiveDate` carrying the month arithmetic and
/// IMM date rules used by schedules and CDS contracts.
///
/// # Example
///
/// ```rust
/// use strata_core::types::Date;
///
/// let date = Date::from_ymd(2024, 1, 31).unwrap();
/// let next = date.add_months(1).unwrap();
/// assert_eq!(next, Date::from_ymd(2024, 2, 29).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> StrataResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| StrataError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `StrataError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> StrataResult<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|_| StrataError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Checks if the year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Returns the number of days in the date's year.
    #[must_use]
    pub fn days_in_year(&self) -> u32 {
        if self.is_leap_year() {
            366
        } else {
            365
        }
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a number of months to the date.
    ///
    /// Days past the end of the target month roll back to its last day
    /// (Jan 31 + 1M is Feb 28/29).
    ///
    /// # Errors
    ///
    /// Returns `StrataError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> StrataResult<Self> {
        let total_months = self.year() * 12 + self.month() as i32 - 1 + months;
        let new_year = total_months.div_euclid(12);
        let new_month = (total_months.rem_euclid(12) + 1) as u32;
        let new_day = self.day().min(days_in_month(new_year, new_month));

        Self::from_ymd(new_year, new_month, new_day)
    }

    /// Adds a number of years to the date.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::InvalidDate` if the result is invalid.
    pub fn add_years(&self, years: i32) -> StrataResult<Self> {
        self.add_months(years * 12)
    }

    /// Adds a (possibly negative) tenor to the date.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::InvalidDate` if the result is out of range.
    pub fn add_tenor(&self, tenor: Tenor) -> StrataResult<Self> {
        match tenor.unit() {
            TenorUnit::Days => Ok(self.add_days(i64::from(tenor.amount()))),
            TenorUnit::Weeks => Ok(self.add_days(7 * i64::from(tenor.amount()))),
            TenorUnit::Months => self.add_months(tenor.amount()),
            TenorUnit::Years => self.add_years(tenor.amount()),
        }
    }

    /// Subtracts a tenor from the date.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::InvalidDate` if the result is out of range.
    pub fn sub_tenor(&self, tenor: Tenor) -> StrataResult<Self> {
        self.add_tenor(tenor.negate())
    }

    /// Calculates the number of calendar days between two dates.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Checks if the date is the end of month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.day() == self.days_in_month()
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Checks if the date is a weekend (Saturday or Sunday).
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Returns true if the date is a CDS roll date (20th of Mar, Jun, Sep or Dec).
    #[must_use]
    pub fn is_cds_imm_date(&self) -> bool {
        self.day() == CDS_IMM_DAY && self.month() % 3 == 0
    }

    /// Returns the first CDS roll date strictly after this date.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::InvalidDate` if the result is out of range.
    pub fn next_cds_imm_date(&self) -> StrataResult<Self> {
        let quarter_month = self.month().div_ceil(3) * 3;
        let candidate = Self::from_ymd(self.year(), quarter_month, CDS_IMM_DAY)?;
        if candidate > *self {
            Ok(candidate)
        } else {
            candidate.add_months(3)
        }
    }

    /// Returns the last CDS roll date on or before this date.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::InvalidDate` if the result is out of range.
    pub fn previous_cds_imm_date(&self) -> StrataResult<Self> {
        let next = self.next_cds_imm_date()?;
        let previous = next.add_months(-3)?;
        if previous <= *self {
            Ok(previous)
        } else {
            previous.add_months(-3)
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Add<i64> for Date {
    type Output = Self;

    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Self;

    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_creation() {
        let date = Date::from_ymd(2025, 6, 15).unwrap();
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 15);
        assert!(Date::from_ymd(2025, 2, 30).is_err());
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        let date = Date::from_ymd(2025, 1, 31).unwrap();
        assert_eq!(date.add_months(1).unwrap(), Date::from_ymd(2025, 2, 28).unwrap());
        assert_eq!(date.add_months(-2).unwrap(), Date::from_ymd(2024, 11, 30).unwrap());
        assert_eq!(
            Date::from_ymd(2024, 2, 29).unwrap().add_years(1).unwrap(),
            Date::from_ymd(2025, 2, 28).unwrap()
        );
    }

    #[test]
    fn test_add_tenor() {
        let date = Date::from_ymd(2024, 3, 20).unwrap();
        assert_eq!(
            date.add_tenor(Tenor::months(3)).unwrap(),
            Date::from_ymd(2024, 6, 20).unwrap()
        );
        assert_eq!(
            date.sub_tenor(Tenor::weeks(1)).unwrap(),
            Date::from_ymd(2024, 3, 13).unwrap()
        );
    }

    #[test]
    fn test_cds_imm_dates() {
        let date = Date::from_ymd(2024, 6, 14).unwrap();
        assert_eq!(date.next_cds_imm_date().unwrap(), Date::from_ymd(2024, 6, 20).unwrap());
        assert_eq!(
            date.previous_cds_imm_date().unwrap(),
            Date::from_ymd(2024, 3, 20).unwrap()
        );

        let roll = Date::from_ymd(2024, 9, 20).unwrap();
        assert!(roll.is_cds_imm_date());
        assert_eq!(roll.next_cds_imm_date().unwrap(), Date::from_ymd(2024, 12, 20).unwrap());
        assert_eq!(roll.previous_cds_imm_date().unwrap(), roll);

        let december = Date::from_ymd(2024, 12, 28).unwrap();
        assert_eq!(
            december.next_cds_imm_date().unwrap(),
            Date::from_ymd(2025, 3, 20).unwrap()
        );
    }

    #[test]
    fn test_date_arithmetic_operators() {
        let d1 = Date::from_ymd(2025, 1, 1).unwrap();
        let d2 = d1 + 10;
        assert_eq!(d2.day(), 11);
        assert_eq!((d2 - 5).day(), 6);
        assert_eq!(d2 - d1, 10);
    }

    #[test]
    fn test_display_and_serde() {
        let date = Date::from_ymd(2025, 6, 15).unwrap();
        assert_eq!(format!("{}", date), "2025-06-15");
        let json = serde_json::to_string(&date).unwrap();
        let parsed: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(date, parsed);
        assert_eq!(Date::parse("2025-06-15").unwrap(), date);
    }
}
