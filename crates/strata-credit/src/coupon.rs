//! CDS premium coupons expressed in curve time.

use serde::{Deserialize, Serialize};
use strata_core::daycounts::DayCount;
use strata_core::types::Date;

use crate::error::{CreditError, CreditResult};
use crate::schedule::IsdaPremiumLegSchedule;

/// One premium period, with all dates converted to times from the trade date.
///
/// Times use the curve day count (ACT/365F in the standard model) and can be
/// negative for a period that started before the trade date. The accrual
/// year fraction uses the accrual day count (ACT/360); `yf_ratio` converts
/// curve time into accrual time inside accrual-on-default integrals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CdsCoupon {
    effective_start: f64,
    effective_end: f64,
    payment_time: f64,
    year_frac: f64,
    yf_ratio: f64,
}

impl CdsCoupon {
    /// Builds a coupon from its accrual start, accrual end and payment dates.
    ///
    /// With `protect_start` the effective accrual dates are one day earlier,
    /// since protection (and accrual) starts at the beginning of the day.
    #[must_use]
    pub fn new(
        trade_date: Date,
        accrual_start: Date,
        accrual_end: Date,
        payment_date: Date,
        protect_start: bool,
        accrual_day_count: DayCount,
        curve_day_count: DayCount,
    ) -> Self {
        let offset = i64::from(protect_start);
        let effective_start = accrual_start.add_days(-offset);
        let effective_end = accrual_end.add_days(-offset);
        let year_frac = accrual_day_count.year_fraction(accrual_start, accrual_end);
        Self {
            effective_start: curve_day_count.year_fraction(trade_date, effective_start),
            effective_end: curve_day_count.year_fraction(trade_date, effective_end),
            payment_time: curve_day_count.year_fraction(trade_date, payment_date),
            year_frac,
            yf_ratio: year_frac / curve_day_count.year_fraction(accrual_start, accrual_end),
        }
    }

    /// Builds a coupon from `[accrual start, accrual end, payment]`.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidArgument` unless exactly three dates are
    /// given, in non-decreasing accrual order.
    pub fn from_dates(
        trade_date: Date,
        dates: &[Date],
        protect_start: bool,
        accrual_day_count: DayCount,
        curve_day_count: DayCount,
    ) -> CreditResult<Self> {
        let [accrual_start, accrual_end, payment] = dates else {
            return Err(CreditError::invalid_argument(format!(
                "a coupon needs accrual start, accrual end and payment dates, got {} dates",
                dates.len()
            )));
        };
        if accrual_end <= accrual_start {
            return Err(CreditError::invalid_argument(format!(
                "accrual end {accrual_end} is not after accrual start {accrual_start}"
            )));
        }
        Ok(Self::new(
            trade_date,
            *accrual_start,
            *accrual_end,
            *payment,
            protect_start,
            accrual_day_count,
            curve_day_count,
        ))
    }

    /// Builds a coupon directly from times.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidArgument` if `effective_end < effective_start`
    /// or the year fraction is not positive.
    pub fn from_times(
        effective_start: f64,
        effective_end: f64,
        payment_time: f64,
        year_frac: f64,
        yf_ratio: f64,
    ) -> CreditResult<Self> {
        if effective_end < effective_start {
            return Err(CreditError::invalid_argument(format!(
                "effective end {effective_end} before effective start {effective_start}"
            )));
        }
        if !(year_frac > 0.0) {
            return Err(CreditError::invalid_argument("year fraction must be positive"));
        }
        Ok(Self {
            effective_start,
            effective_end,
            payment_time,
            year_frac,
            yf_ratio,
        })
    }

    /// One coupon per period of `schedule`.
    #[must_use]
    pub fn from_schedule(
        trade_date: Date,
        schedule: &IsdaPremiumLegSchedule,
        accrual_day_count: DayCount,
        curve_day_count: DayCount,
    ) -> Vec<Self> {
        (0..schedule.number_of_periods())
            .map(|i| {
                let [start, end, payment] = schedule.period_dates(i);
                Self::new(
                    trade_date,
                    start,
                    end,
                    payment,
                    schedule.protect_start(),
                    accrual_day_count,
                    curve_day_count,
                )
            })
            .collect()
    }

    /// Start of default protection for accrual purposes.
    #[must_use]
    pub fn effective_start(&self) -> f64 {
        self.effective_start
    }

    /// End of the period in curve time.
    #[must_use]
    pub fn effective_end(&self) -> f64 {
        self.effective_end
    }

    /// Payment time.
    #[must_use]
    pub fn payment_time(&self) -> f64 {
        self.payment_time
    }

    /// Accrual year fraction.
    #[must_use]
    pub fn year_frac(&self) -> f64 {
        self.year_frac
    }

    /// Accrual year fraction over curve year fraction.
    #[must_use]
    pub fn yf_ratio(&self) -> f64 {
        self.yf_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_coupon_times() {
        let trade = date(2024, 6, 14);
        let coupon = CdsCoupon::new(
            trade,
            date(2024, 6, 20),
            date(2024, 9, 20),
            date(2024, 9, 20),
            true,
            DayCount::Act360,
            DayCount::Act365Fixed,
        );
        assert_relative_eq!(coupon.effective_start(), 5.0 / 365.0);
        assert_relative_eq!(coupon.effective_end(), 97.0 / 365.0);
        assert_relative_eq!(coupon.payment_time(), 98.0 / 365.0);
        assert_relative_eq!(coupon.year_frac(), 92.0 / 360.0);
        assert_relative_eq!(coupon.yf_ratio(), 365.0 / 360.0, epsilon = 1e-15);
    }

    #[test]
    fn test_period_started_before_trade() {
        let coupon = CdsCoupon::new(
            date(2024, 6, 14),
            date(2024, 3, 20),
            date(2024, 6, 20),
            date(2024, 6, 20),
            false,
            DayCount::Act360,
            DayCount::Act365Fixed,
        );
        assert!(coupon.effective_start() < 0.0);
    }

    #[test]
    fn test_two_dates_rejected() {
        let trade = date(2024, 6, 14);
        let result = CdsCoupon::from_dates(
            trade,
            &[date(2024, 6, 20), date(2024, 9, 20)],
            true,
            DayCount::Act360,
            DayCount::Act365Fixed,
        );
        assert!(matches!(result, Err(CreditError::InvalidArgument { .. })));

        let ok = CdsCoupon::from_dates(
            trade,
            &[date(2024, 6, 20), date(2024, 9, 20), date(2024, 9, 20)],
            true,
            DayCount::Act360,
            DayCount::Act365Fixed,
        );
        assert!(ok.is_ok());
    }
}
