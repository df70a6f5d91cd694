//! Fixed coupon bonds, bills and transactions on them.

use serde::{Deserialize, Serialize};
use strata_core::calendars::{BusinessDayConvention, Calendar};
use strata_core::daycounts::DayCount;
use strata_core::types::{Currency, Date, Frequency};
use strata_curves::index::IssuerKey;

use super::time_from;
use crate::derivative::{
    BillSecurity, BillTransaction, BondFixedSecurity, BondTransaction, CouponFixed, PaymentFixed,
};
use crate::error::{PricingError, PricingResult};

/// Guard against runaway schedules.
const MAX_PERIODS: i32 = 1_200;

/// One coupon period of a fixed bond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CouponPeriod {
    /// Unadjusted accrual start.
    pub accrual_start: Date,
    /// Unadjusted accrual end.
    pub accrual_end: Date,
    /// Adjusted payment date.
    pub payment_date: Date,
    /// Accrual year fraction.
    pub year_fraction: f64,
}

/// A bullet bond paying a fixed rate.
///
/// Periods are generated backward from maturity, leaving any short stub at
/// the front. Accrual runs between unadjusted dates; payments fall on
/// adjusted dates.
///
/// ```rust
/// use strata_core::calendars::{BusinessDayConvention, WeekendCalendar};
/// use strata_core::daycounts::DayCount;
/// use strata_core::types::{Currency, Date, Frequency};
/// use strata_curves::index::IssuerKey;
/// use strata_pricing::definition::FixedCouponBondDefinition;
///
/// let bond = FixedCouponBondDefinition::new(
///     IssuerKey::new("UST", Currency::USD),
///     Date::from_ymd(2024, 1, 15).unwrap(),
///     Date::from_ymd(2029, 1, 15).unwrap(),
///     Frequency::SemiAnnual,
///     0.04,
///     100.0,
///     DayCount::Thirty360,
///     BusinessDayConvention::Following,
///     &WeekendCalendar,
/// )
/// .unwrap();
/// assert_eq!(bond.periods().len(), 10);
/// let accrued = bond.accrued_interest(Date::from_ymd(2024, 4, 15).unwrap());
/// assert!((accrued - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedCouponBondDefinition {
    issuer: IssuerKey,
    start_date: Date,
    maturity_date: Date,
    frequency: Frequency,
    rate: f64,
    notional: f64,
    day_count: DayCount,
    periods: Vec<CouponPeriod>,
    principal_date: Date,
}

impl FixedCouponBondDefinition {
    /// Builds the bond and its coupon schedule.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidArgument` if `start_date >= maturity_date`
    /// or the notional is not positive.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        issuer: IssuerKey,
        start_date: Date,
        maturity_date: Date,
        frequency: Frequency,
        rate: f64,
        notional: f64,
        day_count: DayCount,
        convention: BusinessDayConvention,
        calendar: &dyn Calendar,
    ) -> PricingResult<Self> {
        if start_date >= maturity_date {
            return Err(PricingError::invalid_argument(format!(
                "bond start {start_date} must be before maturity {maturity_date}"
            )));
        }
        if !(notional > 0.0) {
            return Err(PricingError::invalid_argument(format!(
                "bond notional must be positive, got {notional}"
            )));
        }

        let mut boundaries = vec![maturity_date];
        for k in 1..=MAX_PERIODS {
            let date = maturity_date.sub_tenor(frequency.period().times(k))?;
            if date <= start_date {
                break;
            }
            boundaries.push(date);
        }
        boundaries.push(start_date);
        boundaries.reverse();

        let periods = boundaries
            .windows(2)
            .map(|w| CouponPeriod {
                accrual_start: w[0],
                accrual_end: w[1],
                payment_date: calendar.adjust(w[1], convention),
                year_fraction: day_count.year_fraction(w[0], w[1]),
            })
            .collect();

        Ok(Self {
            issuer,
            start_date,
            maturity_date,
            frequency,
            rate,
            notional,
            day_count,
            periods,
            principal_date: calendar.adjust(maturity_date, convention),
        })
    }

    /// Issuer curve key.
    pub fn issuer(&self) -> &IssuerKey {
        &self.issuer
    }

    /// Currency of the bond.
    pub fn currency(&self) -> Currency {
        self.issuer.currency
    }

    /// First accrual date.
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Unadjusted maturity.
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Coupon frequency.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Annual coupon rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Notional repaid at maturity.
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Coupon periods in date order.
    pub fn periods(&self) -> &[CouponPeriod] {
        &self.periods
    }

    /// Interest accrued on the whole notional at `settlement`.
    ///
    /// Zero before the first accrual date and from maturity on.
    pub fn accrued_interest(&self, settlement: Date) -> f64 {
        self.periods
            .iter()
            .find(|p| p.accrual_start <= settlement && settlement < p.accrual_end)
            .map_or(0.0, |p| {
                self.notional * self.rate * self.day_count.year_fraction(p.accrual_start, settlement)
            })
    }

    /// The flows received by a holder settling on `settlement_date`, seen
    /// from `date`.
    ///
    /// A flow is kept when it is paid after settlement and not before `date`.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidArgument` if `date` is after maturity.
    pub fn to_derivative(&self, date: Date, settlement_date: Date) -> PricingResult<BondFixedSecurity> {
        if date > self.principal_date {
            return Err(PricingError::invalid_argument(format!(
                "bond matured on {} before valuation date {date}",
                self.principal_date
            )));
        }
        let live = |payment: Date| payment > settlement_date && payment >= date;
        let currency = self.currency();

        let coupons = self
            .periods
            .iter()
            .filter(|p| live(p.payment_date))
            .map(|p| {
                CouponFixed::new(
                    currency,
                    time_from(date, p.payment_date),
                    p.year_fraction,
                    self.notional,
                    self.rate,
                )
            })
            .collect();
        let nominal = if live(self.principal_date) {
            vec![PaymentFixed::new(
                currency,
                time_from(date, self.principal_date),
                self.notional,
            )]
        } else {
            Vec::new()
        };

        Ok(BondFixedSecurity {
            issuer: self.issuer.clone(),
            nominal,
            coupons,
            settlement_time: time_from(date, settlement_date),
            accrued_interest: self.accrued_interest(settlement_date),
            notional: self.notional,
        })
    }
}

/// A purchase (or sale) of a fixed coupon bond at a clean price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondTransactionDefinition {
    /// The bond traded.
    pub underlying: FixedCouponBondDefinition,
    /// Number of bonds; negative for a sale.
    pub quantity: f64,
    /// Date the bond and cash are exchanged.
    pub settlement_date: Date,
    /// Clean price per unit notional (1.0 is par).
    pub price: f64,
}

impl BondTransactionDefinition {
    /// Creates a transaction.
    pub fn new(
        underlying: FixedCouponBondDefinition,
        quantity: f64,
        settlement_date: Date,
        price: f64,
    ) -> Self {
        Self {
            underlying,
            quantity,
            settlement_date,
            price,
        }
    }

    /// The dirty amount paid at settlement for the whole position.
    pub fn settlement_amount(&self) -> f64 {
        let bond = &self.underlying;
        self.quantity
            * (self.price * bond.notional() + bond.accrued_interest(self.settlement_date))
    }

    /// The transaction seen from `date`.
    ///
    /// # Errors
    ///
    /// Fails when the bond has matured before `date`.
    pub fn to_derivative(&self, date: Date) -> PricingResult<BondTransaction> {
        let security = self.underlying.to_derivative(date, self.settlement_date)?;
        let settlement = (self.settlement_date >= date).then(|| {
            PaymentFixed::new(
                self.underlying.currency(),
                time_from(date, self.settlement_date),
                -self.settlement_amount(),
            )
        });
        Ok(BondTransaction {
            security,
            quantity: self.quantity,
            settlement,
        })
    }
}

/// A zero-coupon bill repaying its notional at maturity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillSecurityDefinition {
    /// Issuer curve key.
    pub issuer: IssuerKey,
    /// Maturity date.
    pub end_date: Date,
    /// Amount repaid at maturity.
    pub notional: f64,
}

impl BillSecurityDefinition {
    /// Creates a bill.
    pub fn new(issuer: IssuerKey, end_date: Date, notional: f64) -> Self {
        Self {
            issuer,
            end_date,
            notional,
        }
    }

    /// The bill seen from `date`.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidArgument` if the bill matured before `date`.
    pub fn to_derivative(&self, date: Date) -> PricingResult<BillSecurity> {
        if date > self.end_date {
            return Err(PricingError::invalid_argument(format!(
                "bill matured on {} before valuation date {date}",
                self.end_date
            )));
        }
        Ok(BillSecurity {
            issuer: self.issuer.clone(),
            end_time: time_from(date, self.end_date),
            notional: self.notional,
        })
    }
}

/// A purchase (or sale) of bills for a settlement amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillTransactionDefinition {
    /// The bill traded.
    pub underlying: BillSecurityDefinition,
    /// Number of bills; negative for a sale.
    pub quantity: f64,
    /// Date the bills and cash are exchanged.
    pub settlement_date: Date,
    /// Cash exchanged at settlement, negative when paid.
    pub settlement_amount: f64,
}

impl BillTransactionDefinition {
    /// Creates a transaction.
    pub fn new(
        underlying: BillSecurityDefinition,
        quantity: f64,
        settlement_date: Date,
        settlement_amount: f64,
    ) -> Self {
        Self {
            underlying,
            quantity,
            settlement_date,
            settlement_amount,
        }
    }

    /// The transaction seen from `date`.
    ///
    /// # Errors
    ///
    /// Fails when the bill has matured before `date`.
    pub fn to_derivative(&self, date: Date) -> PricingResult<BillTransaction> {
        let security = self.underlying.to_derivative(date)?;
        let settlement = (self.settlement_date >= date).then(|| {
            PaymentFixed::new(
                self.underlying.issuer.currency,
                time_from(date, self.settlement_date),
                self.settlement_amount,
            )
        });
        Ok(BillTransaction {
            security,
            quantity: self.quantity,
            settlement,
        })
    }
}
