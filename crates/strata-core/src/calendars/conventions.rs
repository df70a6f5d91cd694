//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};

use super::Calendar;
use crate::types::Date;

/// Business day adjustment conventions.
///
/// These conventions specify how to adjust a date that falls
/// on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// No adjustment.
    Unadjusted,

    /// Move to the following business day.
    #[default]
    Following,

    /// Following, unless that crosses a month boundary, then preceding.
    ModifiedFollowing,

    /// Move to the preceding business day.
    Preceding,

    /// Preceding, unless that crosses a month boundary, then following.
    ModifiedPreceding,
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
        };
        write!(f, "{name}")
    }
}

/// Adjusts a date according to the given business day convention.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> Date {
    if calendar.is_business_day(date) {
        return date;
    }

    match convention {
        BusinessDayConvention::Unadjusted => date,
        BusinessDayConvention::Following => roll(date, 1, calendar),
        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = roll(date, 1, calendar);
            if adjusted.month() == date.month() {
                adjusted
            } else {
                roll(date, -1, calendar)
            }
        }
        BusinessDayConvention::Preceding => roll(date, -1, calendar),
        BusinessDayConvention::ModifiedPreceding => {
            let adjusted = roll(date, -1, calendar);
            if adjusted.month() == date.month() {
                adjusted
            } else {
                roll(date, 1, calendar)
            }
        }
    }
}

fn roll<C: Calendar + ?Sized>(mut date: Date, step: i64, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(step);
    }
    date
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::WeekendCalendar;

    #[test]
    fn test_following_and_preceding() {
        let cal = WeekendCalendar;
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        assert_eq!(
            adjust(saturday, BusinessDayConvention::Following, &cal),
            Date::from_ymd(2025, 1, 6).unwrap()
        );
        assert_eq!(
            adjust(saturday, BusinessDayConvention::Preceding, &cal),
            Date::from_ymd(2025, 1, 3).unwrap()
        );
        assert_eq!(adjust(saturday, BusinessDayConvention::Unadjusted, &cal), saturday);
    }

    #[test]
    fn test_modified_following_stays_in_month() {
        let cal = WeekendCalendar;
        // Saturday 31 May 2025
        let month_end = Date::from_ymd(2025, 5, 31).unwrap();
        assert_eq!(
            adjust(month_end, BusinessDayConvention::ModifiedFollowing, &cal),
            Date::from_ymd(2025, 5, 30).unwrap()
        );
        // Sunday 1 June 2025
        let month_start = Date::from_ymd(2025, 6, 1).unwrap();
        assert_eq!(
            adjust(month_start, BusinessDayConvention::ModifiedPreceding, &cal),
            Date::from_ymd(2025, 6, 2).unwrap()
        );
    }
}
