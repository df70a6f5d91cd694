//! Business day calendars and conventions.
//!
//! Horizon calculators move the valuation date by one business day, and
//! CDS / bond schedules adjust their nominal dates, through the
//! [`Calendar`] trait defined here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

mod conventions;

pub use conventions::BusinessDayConvention;

use crate::types::Date;

/// Trait for business day calendars.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday or weekend.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        conventions::adjust(date, convention, self)
    }

    /// Moves a date by a signed number of business days.
    ///
    /// Zero returns the date unchanged, even when it is a holiday.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let mut remaining = days.unsigned_abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }

    /// Returns the next business day on or after the given date.
    fn next_business_day(&self, date: Date) -> Date {
        conventions::adjust(date, BusinessDayConvention::Following, self)
    }

    /// Returns the previous business day on or before the given date.
    fn previous_business_day(&self, date: Date) -> Date {
        conventions::adjust(date, BusinessDayConvention::Preceding, self)
    }
}

/// A weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Weekends plus an explicit list of holidays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    name: String,
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Creates a calendar from a holiday list.
    #[must_use]
    pub fn new(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Returns the calendar with one more holiday.
    #[must_use]
    pub fn with_holiday(mut self, date: Date) -> Self {
        self.holidays.insert(date);
        self
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.holidays.contains(&date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;
        assert!(cal.is_business_day(date(2025, 1, 3)));
        assert!(!cal.is_business_day(date(2025, 1, 4)));
        assert!(cal.is_holiday(date(2025, 1, 5)));
    }

    #[test]
    fn test_add_business_days_both_directions() {
        let cal = WeekendCalendar;
        let friday = date(2025, 1, 3);
        assert_eq!(cal.add_business_days(friday, 1), date(2025, 1, 6));
        assert_eq!(cal.add_business_days(date(2025, 1, 6), -1), friday);
        assert_eq!(cal.add_business_days(friday, 0), friday);
    }

    #[test]
    fn test_holiday_calendar() {
        let cal = HolidayCalendar::new("TEST", [date(2024, 12, 25)]).with_holiday(date(2024, 12, 26));
        assert!(!cal.is_business_day(date(2024, 12, 25)));
        assert_eq!(cal.add_business_days(date(2024, 12, 24), 1), date(2024, 12, 27));
        assert_eq!(cal.next_business_day(date(2024, 12, 25)), date(2024, 12, 27));
        assert_eq!(cal.previous_business_day(date(2024, 12, 26)), date(2024, 12, 24));
        assert_eq!(cal.name(), "TEST");
    }
}
