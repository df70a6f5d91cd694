//! CDS trade descriptions for analytic pricing.
//!
//! A [`CdsAnalytic`] reduces a CDS to what the pricer needs: protection
//! window, premium coupons and settlement timing, all as year fractions
//! from the trade date. [`CdsAnalyticFactory`] builds standard contracts
//! from a trade date and tenor.

use std::sync::Arc;

use strata_core::calendars::{BusinessDayConvention, Calendar, WeekendCalendar};
use strata_core::daycounts::DayCount;
use strata_core::types::{Date, Tenor};

use crate::coupon::CdsCoupon;
use crate::error::{CreditError, CreditResult};
use crate::schedule::{IsdaPremiumLegSchedule, StubType};

/// Dates and conventions defining a CDS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CdsTerms {
    /// Trade date; time zero of the analytic.
    pub trade_date: Date,
    /// Date from which protection and accrual count (usually T+1).
    pub step_in_date: Date,
    /// Date the upfront amount settles.
    pub cash_settle_date: Date,
    /// Start of the first accrual period.
    pub accrual_start_date: Date,
    /// Maturity (end of protection).
    pub end_date: Date,
    /// Whether premium accrued up to default is paid.
    pub pay_accrued_on_default: bool,
    /// Coupon frequency.
    pub payment_interval: Tenor,
    /// Stub placement.
    pub stub_type: StubType,
    /// Whether protection starts at the beginning of the day.
    pub protect_start: bool,
    /// Recovery rate in `[0, 1)`.
    pub recovery_rate: f64,
    /// Business day convention of payment dates.
    pub convention: BusinessDayConvention,
    /// Premium accrual day count.
    pub accrual_day_count: DayCount,
    /// Day count converting dates to curve time.
    pub curve_day_count: DayCount,
}

/// Analytic description of a CDS.
#[derive(Debug, Clone, PartialEq)]
pub struct CdsAnalytic {
    lgd: f64,
    effective_protection_start: f64,
    protection_end: f64,
    cash_settle_time: f64,
    accrued: f64,
    accrued_days: i64,
    pay_accrued_on_default: bool,
    coupons: Vec<CdsCoupon>,
}

impl CdsAnalytic {
    /// Builds the analytic from contract terms.
    ///
    /// The premium schedule is generated between accrual start and maturity
    /// and truncated to the periods ending after step-in. Accrued premium
    /// runs from the first remaining accrual start to step-in.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidArgument` if step-in or cash settlement
    /// precede the trade date, maturity is not after step-in or accrual
    /// start, or the recovery rate is outside `[0, 1)`, and schedule errors
    /// from the premium leg.
    pub fn new(terms: &CdsTerms, calendar: &dyn Calendar) -> CreditResult<Self> {
        let CdsTerms {
            trade_date,
            step_in_date,
            cash_settle_date,
            accrual_start_date,
            end_date,
            ..
        } = *terms;

        if step_in_date < trade_date {
            return Err(CreditError::invalid_argument(format!(
                "step-in {step_in_date} is before trade date {trade_date}"
            )));
        }
        if cash_settle_date < trade_date {
            return Err(CreditError::invalid_argument(format!(
                "cash settlement {cash_settle_date} is before trade date {trade_date}"
            )));
        }
        if end_date <= step_in_date || end_date <= accrual_start_date {
            return Err(CreditError::invalid_argument(format!(
                "maturity {end_date} must be after step-in {step_in_date} and accrual start {accrual_start_date}"
            )));
        }
        if !(0.0..1.0).contains(&terms.recovery_rate) {
            return Err(CreditError::invalid_argument(format!(
                "recovery rate must be in [0, 1), got {}",
                terms.recovery_rate
            )));
        }

        let schedule = IsdaPremiumLegSchedule::new(
            accrual_start_date,
            end_date,
            terms.payment_interval,
            terms.stub_type,
            terms.convention,
            calendar,
            terms.protect_start,
        )?
        .truncate(step_in_date)?;

        let curve_dc = terms.curve_day_count;
        let first_accrual_start = schedule.accrual_start_dates()[0];
        let (accrued, accrued_days) = if first_accrual_start < step_in_date {
            (
                terms
                    .accrual_day_count
                    .year_fraction(first_accrual_start, step_in_date),
                first_accrual_start.days_between(&step_in_date),
            )
        } else {
            (0.0, 0)
        };

        let protection_start = step_in_date.max(accrual_start_date);
        let protection_start = if terms.protect_start {
            protection_start.add_days(-1)
        } else {
            protection_start
        };

        Ok(Self {
            lgd: 1.0 - terms.recovery_rate,
            effective_protection_start: curve_dc.year_fraction(trade_date, protection_start),
            protection_end: curve_dc.year_fraction(trade_date, end_date),
            cash_settle_time: curve_dc.year_fraction(trade_date, cash_settle_date),
            accrued,
            accrued_days,
            pay_accrued_on_default: terms.pay_accrued_on_default,
            coupons: CdsCoupon::from_schedule(
                trade_date,
                &schedule,
                terms.accrual_day_count,
                curve_dc,
            ),
        })
    }

    /// Builds an analytic directly from times and coupons.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidArgument` for an empty coupon list, a
    /// protection end before its start, or a recovery rate outside `[0, 1)`.
    pub fn from_parts(
        effective_protection_start: f64,
        protection_end: f64,
        cash_settle_time: f64,
        accrued: f64,
        recovery_rate: f64,
        pay_accrued_on_default: bool,
        coupons: Vec<CdsCoupon>,
    ) -> CreditResult<Self> {
        if coupons.is_empty() {
            return Err(CreditError::invalid_argument("a CDS needs at least one coupon"));
        }
        if protection_end < effective_protection_start {
            return Err(CreditError::invalid_argument(
                "protection ends before it starts",
            ));
        }
        if !(0.0..1.0).contains(&recovery_rate) {
            return Err(CreditError::invalid_argument(format!(
                "recovery rate must be in [0, 1), got {recovery_rate}"
            )));
        }
        Ok(Self {
            lgd: 1.0 - recovery_rate,
            effective_protection_start,
            protection_end,
            cash_settle_time,
            accrued,
            accrued_days: 0,
            pay_accrued_on_default,
            coupons,
        })
    }

    /// Loss given default, `1 - recovery`.
    #[must_use]
    pub fn lgd(&self) -> f64 {
        self.lgd
    }

    /// Start of protection in curve time (can be slightly negative).
    #[must_use]
    pub fn effective_protection_start(&self) -> f64 {
        self.effective_protection_start
    }

    /// End of protection in curve time.
    #[must_use]
    pub fn protection_end(&self) -> f64 {
        self.protection_end
    }

    /// Cash settlement time.
    #[must_use]
    pub fn cash_settle_time(&self) -> f64 {
        self.cash_settle_time
    }

    /// Accrued premium per unit spread, as an accrual year fraction.
    #[must_use]
    pub fn accrued_year_fraction(&self) -> f64 {
        self.accrued
    }

    /// Accrued premium for a given coupon.
    #[must_use]
    pub fn accrued_premium(&self, coupon: f64) -> f64 {
        self.accrued * coupon
    }

    /// Calendar days of accrued premium.
    #[must_use]
    pub fn accrued_days(&self) -> i64 {
        self.accrued_days
    }

    /// Whether accrued premium is paid on default.
    #[must_use]
    pub fn pay_accrued_on_default(&self) -> bool {
        self.pay_accrued_on_default
    }

    /// Premium coupons in payment order.
    #[must_use]
    pub fn coupons(&self) -> &[CdsCoupon] {
        &self.coupons
    }

    /// Number of remaining coupons.
    #[must_use]
    pub fn number_of_payments(&self) -> usize {
        self.coupons.len()
    }

    /// The same contract with another recovery rate.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidArgument` for a rate outside `[0, 1)`.
    pub fn with_recovery_rate(&self, recovery_rate: f64) -> CreditResult<Self> {
        if !(0.0..1.0).contains(&recovery_rate) {
            return Err(CreditError::invalid_argument(format!(
                "recovery rate must be in [0, 1), got {recovery_rate}"
            )));
        }
        Ok(Self {
            lgd: 1.0 - recovery_rate,
            ..self.clone()
        })
    }
}

/// Builds standard CDS analytics.
///
/// Defaults follow the standard contract: step-in at T+1, cash settlement
/// at T+3 business days, quarterly ACT/360 premium with a short front stub,
/// `Following` adjustment, accrued paid on default, protection from the
/// start of the day and ACT/365F curve time.
///
/// ```rust
/// use strata_core::types::{Date, Tenor};
/// use strata_credit::analytic::CdsAnalyticFactory;
///
/// let factory = CdsAnalyticFactory::new(0.4);
/// let trade = Date::from_ymd(2024, 6, 14).unwrap();
/// let cds = factory.make_imm_cds(trade, Tenor::years(5)).unwrap();
/// assert_eq!(cds.number_of_payments(), 21);
/// ```
#[derive(Clone)]
pub struct CdsAnalyticFactory {
    recovery_rate: f64,
    step_in_days: i64,
    cash_settle_days: i32,
    payment_interval: Tenor,
    stub_type: StubType,
    protect_start: bool,
    pay_accrued_on_default: bool,
    convention: BusinessDayConvention,
    calendar: Arc<dyn Calendar>,
    accrual_day_count: DayCount,
    curve_day_count: DayCount,
}

impl std::fmt::Debug for CdsAnalyticFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdsAnalyticFactory")
            .field("recovery_rate", &self.recovery_rate)
            .field("payment_interval", &self.payment_interval)
            .field("stub_type", &self.stub_type)
            .field("calendar", &self.calendar.name())
            .finish_non_exhaustive()
    }
}

impl CdsAnalyticFactory {
    /// A factory for standard contracts with the given recovery rate.
    #[must_use]
    pub fn new(recovery_rate: f64) -> Self {
        Self {
            recovery_rate,
            step_in_days: 1,
            cash_settle_days: 3,
            payment_interval: Tenor::months(3),
            stub_type: StubType::FrontShort,
            protect_start: true,
            pay_accrued_on_default: true,
            convention: BusinessDayConvention::Following,
            calendar: Arc::new(WeekendCalendar),
            accrual_day_count: DayCount::Act360,
            curve_day_count: DayCount::Act365Fixed,
        }
    }

    /// Sets the recovery rate.
    #[must_use]
    pub fn with_recovery_rate(mut self, recovery_rate: f64) -> Self {
        self.recovery_rate = recovery_rate;
        self
    }

    /// Sets the calendar used for adjustment and cash settlement.
    #[must_use]
    pub fn with_calendar(mut self, calendar: Arc<dyn Calendar>) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the coupon interval.
    #[must_use]
    pub fn with_payment_interval(mut self, payment_interval: Tenor) -> Self {
        self.payment_interval = payment_interval;
        self
    }

    /// Sets the stub type.
    #[must_use]
    pub fn with_stub_type(mut self, stub_type: StubType) -> Self {
        self.stub_type = stub_type;
        self
    }

    /// Sets whether accrued premium is paid on default.
    #[must_use]
    pub fn with_pay_accrued_on_default(mut self, pay: bool) -> Self {
        self.pay_accrued_on_default = pay;
        self
    }

    /// Sets whether protection starts at the beginning of the day.
    #[must_use]
    pub fn with_protect_start(mut self, protect_start: bool) -> Self {
        self.protect_start = protect_start;
        self
    }

    /// Sets the cash settlement lag in business days.
    #[must_use]
    pub fn with_cash_settle_days(mut self, days: i32) -> Self {
        self.cash_settle_days = days;
        self
    }

    /// A CDS with explicit accrual start and maturity.
    ///
    /// # Errors
    ///
    /// See [`CdsAnalytic::new`].
    pub fn make_cds(
        &self,
        trade_date: Date,
        accrual_start_date: Date,
        maturity: Date,
    ) -> CreditResult<CdsAnalytic> {
        let terms = CdsTerms {
            trade_date,
            step_in_date: trade_date.add_days(self.step_in_days),
            cash_settle_date: self
                .calendar
                .add_business_days(trade_date, self.cash_settle_days),
            accrual_start_date,
            end_date: maturity,
            pay_accrued_on_default: self.pay_accrued_on_default,
            payment_interval: self.payment_interval,
            stub_type: self.stub_type,
            protect_start: self.protect_start,
            recovery_rate: self.recovery_rate,
            convention: self.convention,
            accrual_day_count: self.accrual_day_count,
            curve_day_count: self.curve_day_count,
        };
        CdsAnalytic::new(&terms, self.calendar.as_ref())
    }

    /// A standard IMM-dated CDS.
    ///
    /// Accrual starts on the adjusted roll date on or before step-in; the
    /// maturity is the first roll date after the trade date plus `tenor`.
    ///
    /// # Errors
    ///
    /// See [`CdsAnalytic::new`].
    pub fn make_imm_cds(&self, trade_date: Date, tenor: Tenor) -> CreditResult<CdsAnalytic> {
        let step_in = trade_date.add_days(self.step_in_days);
        let accrual_start = self
            .calendar
            .adjust(step_in.previous_cds_imm_date()?, self.convention);
        let accrual_start = if accrual_start > step_in {
            self.calendar.adjust(
                step_in.previous_cds_imm_date()?.add_months(-3)?,
                self.convention,
            )
        } else {
            accrual_start
        };
        let maturity = trade_date.next_cds_imm_date()?.add_tenor(tenor)?;
        self.make_cds(trade_date, accrual_start, maturity)
    }

    /// Standard IMM-dated CDSs for several tenors.
    ///
    /// # Errors
    ///
    /// Returns the first construction error.
    pub fn make_imm_cds_series(
        &self,
        trade_date: Date,
        tenors: &[Tenor],
    ) -> CreditResult<Vec<CdsAnalytic>> {
        tenors
            .iter()
            .map(|tenor| self.make_imm_cds(trade_date, *tenor))
            .collect()
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
    fn test_standard_imm_cds() {
        // Friday 2024-06-14: step-in Saturday 15th, accrual from 2024-03-20
        let factory = CdsAnalyticFactory::new(0.4);
        let cds = factory.make_imm_cds(date(2024, 6, 14), Tenor::years(5)).unwrap();

        assert_relative_eq!(cds.lgd(), 0.6);
        assert_relative_eq!(cds.effective_protection_start(), 0.0);
        // maturity 2029-06-20
        let end = DayCount::Act365Fixed.year_fraction(date(2024, 6, 14), date(2029, 6, 20));
        assert_relative_eq!(cds.protection_end(), end);
        // T+3 business days is Wednesday 19th
        assert_relative_eq!(cds.cash_settle_time(), 5.0 / 365.0);
        // accrued from 2024-03-20 to step-in
        assert_eq!(cds.accrued_days(), 87);
        assert_relative_eq!(cds.accrued_year_fraction(), 87.0 / 360.0);
        assert_eq!(cds.number_of_payments(), 21);
        assert!(cds.coupons()[0].effective_start() < 0.0);
        assert!(cds.pay_accrued_on_default());

        let coupons = cds.coupons();
        for pair in coupons.windows(2) {
            assert_relative_eq!(pair[0].effective_end(), pair[1].effective_start());
        }
        assert_relative_eq!(coupons[20].effective_end(), end);
    }

    #[test]
    fn test_invalid_terms() {
        let factory = CdsAnalyticFactory::new(1.0);
        assert!(factory.make_imm_cds(date(2024, 6, 14), Tenor::years(5)).is_err());

        let factory = CdsAnalyticFactory::new(0.4);
        let err = factory.make_cds(date(2024, 6, 14), date(2024, 3, 20), date(2024, 6, 15));
        assert!(matches!(err, Err(CreditError::InvalidArgument { .. })));
    }

    #[test]
    fn test_from_parts_requires_coupons() {
        assert!(CdsAnalytic::from_parts(0.0, 1.0, 0.01, 0.0, 0.4, true, Vec::new()).is_err());
    }
}
