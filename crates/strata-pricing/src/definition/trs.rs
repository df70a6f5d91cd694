//! Bond total return swaps and their funding legs.

use serde::{Deserialize, Serialize};
use strata_core::calendars::{BusinessDayConvention, Calendar};
use strata_core::daycounts::DayCount;
use strata_core::types::{Currency, Date, FixingSeries, Frequency, Tenor};
use strata_curves::index::IborIndex;

use super::bond::FixedCouponBondDefinition;
use super::time_from;
use crate::derivative::{
    BondTotalReturnSwap, Coupon, CouponFixed, CouponIbor, FundingLeg, PaymentFixed,
};
use crate::error::{PricingError, PricingResult};

/// Guard against runaway schedules.
const MAX_PERIODS: i32 = 1_200;

/// A fixed funding coupon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponFixedDefinition {
    /// Payment currency.
    pub currency: Currency,
    /// Accrual start.
    pub accrual_start: Date,
    /// Accrual end.
    pub accrual_end: Date,
    /// Payment date.
    pub payment_date: Date,
    /// Accrual year fraction.
    pub year_fraction: f64,
    /// Signed notional.
    pub notional: f64,
    /// Annual rate.
    pub rate: f64,
}

/// A term rate funding coupon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponIborDefinition {
    /// Payment currency.
    pub currency: Currency,
    /// Accrual start.
    pub accrual_start: Date,
    /// Accrual end.
    pub accrual_end: Date,
    /// Payment date.
    pub payment_date: Date,
    /// Accrual year fraction.
    pub year_fraction: f64,
    /// Signed notional.
    pub notional: f64,
    /// The index.
    pub index: IborIndex,
    /// Date the index is observed.
    pub fixing_date: Date,
    /// Start of the index deposit.
    pub fixing_period_start: Date,
    /// End of the index deposit.
    pub fixing_period_end: Date,
    /// Index year fraction of the deposit.
    pub fixing_year_fraction: f64,
    /// Spread over the index.
    pub spread: f64,
}

impl CouponIborDefinition {
    /// The coupon seen from `date`.
    ///
    /// A fixing dated before `date` must be in `fixings`; one published on
    /// `date` itself is used when present, and the coupon is projected
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::MissingFixing` when a past fixing is absent.
    pub fn to_derivative(&self, date: Date, fixings: Option<&FixingSeries>) -> PricingResult<Coupon> {
        let payment_time = time_from(date, self.payment_date);
        let published = fixings.and_then(|series| series.get(self.fixing_date));
        let fixed = |fixing: f64| {
            Coupon::Fixed(CouponFixed::new(
                self.currency,
                payment_time,
                self.year_fraction,
                self.notional,
                fixing + self.spread,
            ))
        };

        if self.fixing_date < date {
            let series = fixings
                .ok_or_else(|| PricingError::missing_fixing(&self.index.name, self.fixing_date))?;
            return Ok(fixed(series.require(self.fixing_date)?));
        }
        if self.fixing_date == date {
            if let Some(fixing) = published {
                return Ok(fixed(fixing));
            }
        }
        Ok(Coupon::Ibor(CouponIbor {
            currency: self.currency,
            payment_time,
            payment_year_fraction: self.year_fraction,
            notional: self.notional,
            index: self.index.clone(),
            fixing_period_start_time: time_from(date, self.fixing_period_start),
            fixing_period_end_time: time_from(date, self.fixing_period_end),
            fixing_year_fraction: self.fixing_year_fraction,
            spread: self.spread,
        }))
    }
}

/// A funding coupon definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CouponDefinition {
    /// Fixed rate.
    Fixed(CouponFixedDefinition),
    /// Term rate plus spread.
    Ibor(CouponIborDefinition),
}

impl CouponDefinition {
    /// Payment date of the coupon.
    pub fn payment_date(&self) -> Date {
        match self {
            CouponDefinition::Fixed(c) => c.payment_date,
            CouponDefinition::Ibor(c) => c.payment_date,
        }
    }
}

/// The funding leg of a total return swap.
///
/// `notional` is signed from the total return receiver's side: negative
/// means the receiver pays the coupons. The notional itself is exchanged at
/// termination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingLegDefinition {
    /// Leg currency.
    pub currency: Currency,
    /// Notional exchanges.
    pub notional_payments: Vec<(Date, f64)>,
    /// Funding coupons in date order.
    pub coupons: Vec<CouponDefinition>,
}

impl FundingLegDefinition {
    /// A fixed rate funding leg.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidArgument` if `start >= end`.
    #[allow(clippy::too_many_arguments)]
    pub fn fixed(
        currency: Currency,
        notional: f64,
        start: Date,
        end: Date,
        frequency: Frequency,
        rate: f64,
        day_count: DayCount,
        convention: BusinessDayConvention,
        calendar: &dyn Calendar,
    ) -> PricingResult<Self> {
        let coupons = accrual_periods(start, end, frequency, convention, calendar)?
            .into_iter()
            .map(|(accrual_start, accrual_end, payment_date)| {
                CouponDefinition::Fixed(CouponFixedDefinition {
                    currency,
                    accrual_start,
                    accrual_end,
                    payment_date,
                    year_fraction: day_count.year_fraction(accrual_start, accrual_end),
                    notional,
                    rate,
                })
            })
            .collect();
        Ok(Self {
            currency,
            notional_payments: vec![(calendar.adjust(end, convention), notional)],
            coupons,
        })
    }

    /// A term rate funding leg paying `index + spread` at the index tenor.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidArgument` if `start >= end` or the
    /// index tenor is not a whole number of months.
    pub fn ibor(
        notional: f64,
        start: Date,
        end: Date,
        index: &IborIndex,
        spread: f64,
        calendar: &dyn Calendar,
    ) -> PricingResult<Self> {
        let frequency = frequency_of(index)?;
        let convention = index.business_day_convention;
        let coupons = accrual_periods(start, end, frequency, convention, calendar)?
            .into_iter()
            .map(|(accrual_start, accrual_end, payment_date)| {
                let fixing_period_end =
                    calendar.adjust(accrual_start.add_tenor(index.tenor)?, convention);
                Ok(CouponDefinition::Ibor(CouponIborDefinition {
                    currency: index.currency,
                    accrual_start,
                    accrual_end,
                    payment_date,
                    year_fraction: index.day_count.year_fraction(accrual_start, accrual_end),
                    notional,
                    index: index.clone(),
                    fixing_date: calendar.add_business_days(accrual_start, -index.spot_lag),
                    fixing_period_start: accrual_start,
                    fixing_period_end,
                    fixing_year_fraction: index
                        .day_count
                        .year_fraction(accrual_start, fixing_period_end),
                    spread,
                }))
            })
            .collect::<PricingResult<Vec<_>>>()?;
        Ok(Self {
            currency: index.currency,
            notional_payments: vec![(calendar.adjust(end, convention), notional)],
            coupons,
        })
    }

    /// The leg seen from `date`; flows paid before `date` are dropped.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::MissingFixing` when a past fixing is absent.
    pub fn to_derivative(&self, date: Date, fixings: Option<&FixingSeries>) -> PricingResult<FundingLeg> {
        let notional_payments = self
            .notional_payments
            .iter()
            .filter(|(payment, _)| *payment >= date)
            .map(|(payment, amount)| PaymentFixed::new(self.currency, time_from(date, *payment), *amount))
            .collect();
        let coupons = self
            .coupons
            .iter()
            .filter(|c| c.payment_date() >= date)
            .map(|c| match c {
                CouponDefinition::Fixed(f) => Ok(Coupon::Fixed(CouponFixed::new(
                    f.currency,
                    time_from(date, f.payment_date),
                    f.year_fraction,
                    f.notional,
                    f.rate,
                ))),
                CouponDefinition::Ibor(i) => i.to_derivative(date, fixings),
            })
            .collect::<PricingResult<Vec<_>>>()?;
        Ok(FundingLeg {
            currency: self.currency,
            notional_payments,
            coupons,
        })
    }
}

/// A total return swap on a fixed coupon bond against a funding leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondTotalReturnSwapDefinition {
    /// Start of the swap.
    pub effective_date: Date,
    /// End of the swap.
    pub termination_date: Date,
    /// The reference bond.
    pub asset: FixedCouponBondDefinition,
    /// Number of bonds; negative for the total return payer.
    pub asset_quantity: f64,
    /// Funding leg.
    pub funding: FundingLegDefinition,
}

impl BondTotalReturnSwapDefinition {
    /// Creates a swap.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidArgument` if the effective date is not
    /// before termination.
    pub fn new(
        effective_date: Date,
        termination_date: Date,
        asset: FixedCouponBondDefinition,
        asset_quantity: f64,
        funding: FundingLegDefinition,
    ) -> PricingResult<Self> {
        if effective_date >= termination_date {
            return Err(PricingError::invalid_argument(format!(
                "effective date {effective_date} must be before termination {termination_date}"
            )));
        }
        Ok(Self {
            effective_date,
            termination_date,
            asset,
            asset_quantity,
            funding,
        })
    }

    /// The swap seen from `date`.
    ///
    /// The asset leg keeps the bond flows paid after the later of `date` and
    /// the effective date.
    ///
    /// # Errors
    ///
    /// Fails when the bond has matured or a past funding fixing is missing.
    pub fn to_derivative(
        &self,
        date: Date,
        fixings: Option<&FixingSeries>,
    ) -> PricingResult<BondTotalReturnSwap> {
        let asset_start = if date > self.effective_date {
            date
        } else {
            self.effective_date
        };
        Ok(BondTotalReturnSwap {
            effective_time: time_from(date, self.effective_date),
            termination_time: time_from(date, self.termination_date),
            asset: self.asset.to_derivative(date, asset_start)?,
            asset_quantity: self.asset_quantity,
            funding: self.funding.to_derivative(date, fixings)?,
        })
    }
}

/// `(accrual start, accrual end, payment)` generated backward from `end`.
fn accrual_periods(
    start: Date,
    end: Date,
    frequency: Frequency,
    convention: BusinessDayConvention,
    calendar: &dyn Calendar,
) -> PricingResult<Vec<(Date, Date, Date)>> {
    if start >= end {
        return Err(PricingError::invalid_argument(format!(
            "leg start {start} must be before end {end}"
        )));
    }
    let mut boundaries = vec![end];
    for k in 1..=MAX_PERIODS {
        let date = end.sub_tenor(frequency.period().times(k))?;
        if date <= start {
            break;
        }
        boundaries.push(date);
    }
    boundaries.push(start);
    boundaries.reverse();
    Ok(boundaries
        .windows(2)
        .map(|w| {
            let accrual_start = calendar.adjust(w[0], convention);
            let accrual_end = calendar.adjust(w[1], convention);
            (accrual_start, accrual_end, accrual_end)
        })
        .collect())
}

fn frequency_of(index: &IborIndex) -> PricingResult<Frequency> {
    let tenor = if index.tenor == Tenor::years(1) {
        Tenor::months(12)
    } else {
        index.tenor
    };
    [
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::SemiAnnual,
        Frequency::Annual,
    ]
    .into_iter()
    .find(|f| f.period() == tenor)
    .ok_or_else(|| {
        PricingError::invalid_argument(format!(
            "no coupon frequency for index tenor {}",
            index.tenor
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use strata_core::calendars::WeekendCalendar;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn euribor() -> IborIndex {
        IborIndex::new("EURIBOR3M", Currency::EUR, Tenor::months(3), DayCount::Act360)
    }

    fn ibor_leg() -> FundingLegDefinition {
        FundingLegDefinition::ibor(
            -1_000_000.0,
            date(2024, 1, 15),
            date(2025, 1, 15),
            &euribor(),
            0.002,
            &WeekendCalendar,
        )
        .unwrap()
    }

    #[test]
    fn test_ibor_leg_schedule() {
        let leg = ibor_leg();
        assert_eq!(leg.coupons.len(), 4);
        let CouponDefinition::Ibor(first) = &leg.coupons[0] else {
            panic!("expected an ibor coupon");
        };
        // two business days before Monday 2024-01-15
        assert_eq!(first.fixing_date, date(2024, 1, 11));
        assert_eq!(first.fixing_period_end, date(2024, 4, 15));
        assert_relative_eq!(first.year_fraction, 91.0 / 360.0);
        assert_eq!(leg.notional_payments, vec![(date(2025, 1, 15), -1_000_000.0)]);
    }

    #[test]
    fn test_past_fixing_required() {
        let leg = ibor_leg();
        let today = date(2024, 2, 1);
        let missing = leg.to_derivative(today, None);
        assert!(matches!(missing, Err(PricingError::MissingFixing { .. })));

        let empty = FixingSeries::new("EURIBOR3M");
        let missing = leg.to_derivative(today, Some(&empty));
        assert!(matches!(missing, Err(PricingError::MissingFixing { .. })));

        let fixings = FixingSeries::new("EURIBOR3M").with_fixing(date(2024, 1, 11), 0.039);
        let d = leg.to_derivative(today, Some(&fixings)).unwrap();
        let Coupon::Fixed(first) = &d.coupons[0] else {
            panic!("first coupon should be fixed");
        };
        assert_relative_eq!(first.rate, 0.041);
        assert!(matches!(d.coupons[1], Coupon::Ibor(_)));
    }

    #[test]
    fn test_fixing_on_valuation_date_is_optional() {
        let leg = ibor_leg();
        let fixing_date = date(2024, 1, 11);
        let projected = leg.to_derivative(fixing_date, None).unwrap();
        assert!(matches!(projected.coupons[0], Coupon::Ibor(_)));

        let fixings = FixingSeries::new("EURIBOR3M").with_fixing(fixing_date, 0.039);
        let fixed = leg.to_derivative(fixing_date, Some(&fixings)).unwrap();
        assert!(matches!(fixed.coupons[0], Coupon::Fixed(_)));
    }

    #[test]
    fn test_fixed_leg() {
        let leg = FundingLegDefinition::fixed(
            Currency::USD,
            -100.0,
            date(2024, 1, 15),
            date(2025, 1, 15),
            Frequency::SemiAnnual,
            0.05,
            DayCount::Act360,
            BusinessDayConvention::ModifiedFollowing,
            &WeekendCalendar,
        )
        .unwrap();
        assert_eq!(leg.coupons.len(), 2);
        let d = leg.to_derivative(date(2024, 8, 1), None).unwrap();
        assert_eq!(d.coupons.len(), 1);
        assert_eq!(d.notional_payments.len(), 1);
    }
}
