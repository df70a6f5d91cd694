//! Premium leg schedules under ISDA conventions.

use std::fmt;

use serde::{Deserialize, Serialize};
use strata_core::calendars::{BusinessDayConvention, Calendar};
use strata_core::types::{Date, Tenor};

use crate::error::{CreditError, CreditResult};

/// Guard against runaway schedules.
const MAX_PERIODS: i32 = 2_000;

/// Placement and length of an irregular coupon period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StubType {
    /// Short first period; dates generated backward from the end.
    #[default]
    FrontShort,
    /// Long first period; dates generated backward from the end.
    FrontLong,
    /// Short last period; dates generated forward from the start.
    BackShort,
    /// Long last period; dates generated forward from the start.
    BackLong,
}

impl StubType {
    fn is_front(self) -> bool {
        matches!(self, StubType::FrontShort | StubType::FrontLong)
    }
}

impl fmt::Display for StubType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StubType::FrontShort => "FRONT_SHORT",
            StubType::FrontLong => "FRONT_LONG",
            StubType::BackShort => "BACK_SHORT",
            StubType::BackLong => "BACK_LONG",
        };
        f.write_str(name)
    }
}

/// Accrual and payment dates of a CDS premium leg.
///
/// For period `i`:
///
/// - the accrual start is the contract start for the first period and the
///   adjusted nominal date otherwise;
/// - the accrual end is the next period's accrual start, except for the last
///   period, which ends on the unadjusted maturity (one day later when
///   protection starts at the beginning of the day);
/// - the payment date is the adjusted nominal end date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsdaPremiumLegSchedule {
    nominal_payment_dates: Vec<Date>,
    accrual_start_dates: Vec<Date>,
    accrual_end_dates: Vec<Date>,
    payment_dates: Vec<Date>,
    protect_start: bool,
}

impl IsdaPremiumLegSchedule {
    /// Generates the schedule between `start` and `end`.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::Schedule` if `start >= end` or the interval is
    /// not a positive tenor, and `CreditError::Core` for out-of-range dates.
    pub fn new(
        start: Date,
        end: Date,
        payment_interval: Tenor,
        stub_type: StubType,
        convention: BusinessDayConvention,
        calendar: &dyn Calendar,
        protect_start: bool,
    ) -> CreditResult<Self> {
        if start >= end {
            return Err(CreditError::schedule(format!(
                "start {start} must be before end {end}"
            )));
        }
        if payment_interval.amount() <= 0 {
            return Err(CreditError::schedule(format!(
                "payment interval must be positive, got {payment_interval}"
            )));
        }

        let nominal = nominal_dates(start, end, payment_interval, stub_type)?;
        let periods = nominal.len() - 1;

        let mut accrual_start_dates = Vec::with_capacity(periods);
        let mut accrual_end_dates = Vec::with_capacity(periods);
        let mut payment_dates = Vec::with_capacity(periods);
        for i in 0..periods {
            let accrual_start = if i == 0 {
                nominal[0]
            } else {
                calendar.adjust(nominal[i], convention)
            };
            let accrual_end = if i == periods - 1 {
                if protect_start {
                    end.add_days(1)
                } else {
                    end
                }
            } else {
                calendar.adjust(nominal[i + 1], convention)
            };
            accrual_start_dates.push(accrual_start);
            accrual_end_dates.push(accrual_end);
            payment_dates.push(calendar.adjust(nominal[i + 1], convention));
        }

        Ok(Self {
            nominal_payment_dates: nominal[1..].to_vec(),
            accrual_start_dates,
            accrual_end_dates,
            payment_dates,
            protect_start,
        })
    }

    /// The schedule without the periods that end on or before `step_in`.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::Schedule` if no period ends after `step_in`.
    pub fn truncate(&self, step_in: Date) -> CreditResult<Self> {
        let first = self
            .accrual_end_dates
            .iter()
            .position(|end| *end > step_in)
            .ok_or_else(|| {
                CreditError::schedule(format!("every accrual period ends before step-in {step_in}"))
            })?;
        Ok(Self {
            nominal_payment_dates: self.nominal_payment_dates[first..].to_vec(),
            accrual_start_dates: self.accrual_start_dates[first..].to_vec(),
            accrual_end_dates: self.accrual_end_dates[first..].to_vec(),
            payment_dates: self.payment_dates[first..].to_vec(),
            protect_start: self.protect_start,
        })
    }

    /// Number of coupon periods.
    #[must_use]
    pub fn number_of_periods(&self) -> usize {
        self.payment_dates.len()
    }

    /// Unadjusted period end dates.
    #[must_use]
    pub fn nominal_payment_dates(&self) -> &[Date] {
        &self.nominal_payment_dates
    }

    /// Accrual start dates.
    #[must_use]
    pub fn accrual_start_dates(&self) -> &[Date] {
        &self.accrual_start_dates
    }

    /// Accrual end dates.
    #[must_use]
    pub fn accrual_end_dates(&self) -> &[Date] {
        &self.accrual_end_dates
    }

    /// Payment dates.
    #[must_use]
    pub fn payment_dates(&self) -> &[Date] {
        &self.payment_dates
    }

    /// Whether protection starts at the beginning of the day.
    #[must_use]
    pub fn protect_start(&self) -> bool {
        self.protect_start
    }

    /// `[accrual start, accrual end, payment]` of period `i`.
    #[must_use]
    pub fn period_dates(&self, i: usize) -> [Date; 3] {
        [
            self.accrual_start_dates[i],
            self.accrual_end_dates[i],
            self.payment_dates[i],
        ]
    }
}

/// Unadjusted period boundaries, `start` first and `end` last.
fn nominal_dates(
    start: Date,
    end: Date,
    interval: Tenor,
    stub_type: StubType,
) -> CreditResult<Vec<Date>> {
    let mut dates = Vec::new();
    let mut has_stub = true;

    if stub_type.is_front() {
        dates.push(end);
        for k in 1..=MAX_PERIODS {
            let date = end.sub_tenor(interval.times(k))?;
            if date <= start {
                has_stub = date < start;
                break;
            }
            dates.push(date);
        }
        dates.push(start);
        dates.reverse();
        if stub_type == StubType::FrontLong && has_stub && dates.len() > 2 {
            dates.remove(1);
        }
    } else {
        dates.push(start);
        for k in 1..=MAX_PERIODS {
            let date = start.add_tenor(interval.times(k))?;
            if date >= end {
                has_stub = date > end;
                break;
            }
            dates.push(date);
        }
        dates.push(end);
        if stub_type == StubType::BackLong && has_stub && dates.len() > 2 {
            dates.remove(dates.len() - 2);
        }
    }

    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::calendars::WeekendCalendar;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn schedule(start: Date, end: Date, stub: StubType) -> IsdaPremiumLegSchedule {
        IsdaPremiumLegSchedule::new(
            start,
            end,
            Tenor::months(3),
            stub,
            BusinessDayConvention::Following,
            &WeekendCalendar,
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_front_short_stub() {
        let s = schedule(date(2024, 5, 10), date(2025, 6, 20), StubType::FrontShort);
        assert_eq!(s.number_of_periods(), 5);
        assert_eq!(s.accrual_start_dates()[0], date(2024, 5, 10));
        // 2024-06-20 is a Thursday
        assert_eq!(s.payment_dates()[0], date(2024, 6, 20));
        // 2024-09-20 Friday, 2024-12-20 Friday, 2025-03-20 Thursday
        assert_eq!(s.accrual_start_dates()[1], date(2024, 6, 20));
        // last accrual period includes the maturity date
        assert_eq!(*s.accrual_end_dates().last().unwrap(), date(2025, 6, 21));
        // 2025-06-20 is a Friday
        assert_eq!(*s.payment_dates().last().unwrap(), date(2025, 6, 20));
    }

    #[test]
    fn test_front_long_stub_merges_first_period() {
        let s = schedule(date(2024, 5, 10), date(2025, 6, 20), StubType::FrontLong);
        assert_eq!(s.number_of_periods(), 4);
        assert_eq!(s.nominal_payment_dates()[0], date(2024, 9, 20));
    }

    #[test]
    fn test_back_stubs() {
        let short = schedule(date(2024, 3, 20), date(2024, 11, 5), StubType::BackShort);
        assert_eq!(
            short.nominal_payment_dates(),
            &[date(2024, 6, 20), date(2024, 9, 20), date(2024, 11, 5)]
        );
        let long = schedule(date(2024, 3, 20), date(2024, 11, 5), StubType::BackLong);
        assert_eq!(
            long.nominal_payment_dates(),
            &[date(2024, 6, 20), date(2024, 11, 5)]
        );
    }

    #[test]
    fn test_adjusted_dates_roll_off_weekends() {
        let s = schedule(date(2024, 3, 20), date(2024, 12, 22), StubType::FrontShort);
        assert_eq!(s.nominal_payment_dates()[0], date(2024, 3, 22));
        assert_eq!(s.nominal_payment_dates()[1], date(2024, 6, 22));
        // 2024-06-22 is a Saturday, 2024-09-22 a Sunday
        assert_eq!(s.payment_dates()[1], date(2024, 6, 24));
        assert_eq!(s.accrual_start_dates()[2], date(2024, 6, 24));
        assert_eq!(s.payment_dates()[2], date(2024, 9, 23));
        assert_eq!(s.accrual_end_dates()[1], date(2024, 6, 24));
    }

    #[test]
    fn test_truncate() {
        let s = schedule(date(2024, 3, 20), date(2025, 3, 20), StubType::FrontShort);
        let truncated = s.truncate(date(2024, 7, 1)).unwrap();
        assert_eq!(truncated.number_of_periods(), 3);
        assert_eq!(truncated.accrual_start_dates()[0], date(2024, 6, 20));
        assert!(s.truncate(date(2025, 4, 1)).is_err());
    }

    #[test]
    fn test_invalid_schedule() {
        let err = IsdaPremiumLegSchedule::new(
            date(2025, 1, 1),
            date(2024, 1, 1),
            Tenor::months(3),
            StubType::FrontShort,
            BusinessDayConvention::Following,
            &WeekendCalendar,
            true,
        );
        assert!(matches!(err, Err(CreditError::Schedule { .. })));
    }
}
