//! Horizon (theta) calculators.
//!
//! Theta is the change in present value when the valuation date moves by
//! one business day, forward or backward, with market data rolled to the
//! new date:
//!
//! 1. the instrument is priced at the valuation date on today's provider;
//! 2. it is rebuilt at the horizon date, dropping flows paid in between;
//! 3. the provider is rolled by the elapsed time ([`RolldownMode`]);
//! 4. the result is `pv(horizon) - pv(today)` per currency.
//!
//! With the default constant-spread rolldown each curve keeps its rates as
//! a function of residual maturity.

use strata_config::{HorizonConfig, RolldownMode};
use strata_core::calendars::Calendar;
use strata_core::types::{Date, FixingSeries, MultiCurrencyAmount};
use strata_curves::provider::IssuerProvider;
use strata_curves::rolldown::{ConstantSpreadRolldown, ForwardRolldown, RolldownFunction};

use crate::definition::{
    time_from, BillTransactionDefinition, BondFuturesTransactionDefinition,
    BondTotalReturnSwapDefinition, BondTransactionDefinition, InstrumentDefinition,
};
use crate::discounting::present_value;
use crate::error::{PricingError, PricingResult};

/// Market data that is not on curves.
#[derive(Debug, Clone, Copy, Default)]
pub struct HorizonData<'a> {
    /// Index fixings, for coupons fixed before the valuation date.
    pub fixings: Option<&'a FixingSeries>,
    /// Previous settlement price of a futures contract.
    pub last_margin_price: Option<f64>,
}

impl<'a> HorizonData<'a> {
    /// No fixings and no margin price.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Data with fixings.
    #[must_use]
    pub fn with_fixings(mut self, fixings: &'a FixingSeries) -> Self {
        self.fixings = Some(fixings);
        self
    }

    /// Data with the last margin price.
    #[must_use]
    pub fn with_last_margin_price(mut self, price: f64) -> Self {
        self.last_margin_price = Some(price);
        self
    }
}

/// Theta of one instrument type.
pub trait HorizonCalculator {
    /// The instrument definition handled.
    type Definition;

    /// Theta with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidArgument` unless `days_forward` is 1 or
    /// -1, and propagates pricing failures.
    fn theta(
        &self,
        definition: &Self::Definition,
        date: Date,
        provider: &IssuerProvider,
        days_forward: i32,
        calendar: &dyn Calendar,
        data: &HorizonData<'_>,
    ) -> PricingResult<MultiCurrencyAmount> {
        self.theta_with_config(
            definition,
            date,
            provider,
            days_forward,
            calendar,
            data,
            &HorizonConfig::default(),
        )
    }

    /// Theta with an explicit rolldown and direction convention.
    ///
    /// # Errors
    ///
    /// As [`HorizonCalculator::theta`].
    #[allow(clippy::too_many_arguments)]
    fn theta_with_config(
        &self,
        definition: &Self::Definition,
        date: Date,
        provider: &IssuerProvider,
        days_forward: i32,
        calendar: &dyn Calendar,
        data: &HorizonData<'_>,
        config: &HorizonConfig,
    ) -> PricingResult<MultiCurrencyAmount>;
}

/// Theta of a fixed coupon bond transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BondTransactionHorizon;

impl HorizonCalculator for BondTransactionHorizon {
    type Definition = BondTransactionDefinition;

    fn theta_with_config(
        &self,
        definition: &BondTransactionDefinition,
        date: Date,
        provider: &IssuerProvider,
        days_forward: i32,
        calendar: &dyn Calendar,
        _data: &HorizonData<'_>,
        config: &HorizonConfig,
    ) -> PricingResult<MultiCurrencyAmount> {
        roll_and_price(date, provider, days_forward, calendar, config, |d, p| {
            present_value(&definition.to_derivative(d)?.into(), p)
        })
    }
}

/// Theta of a bill transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BillTransactionHorizon;

impl HorizonCalculator for BillTransactionHorizon {
    type Definition = BillTransactionDefinition;

    fn theta_with_config(
        &self,
        definition: &BillTransactionDefinition,
        date: Date,
        provider: &IssuerProvider,
        days_forward: i32,
        calendar: &dyn Calendar,
        _data: &HorizonData<'_>,
        config: &HorizonConfig,
    ) -> PricingResult<MultiCurrencyAmount> {
        roll_and_price(date, provider, days_forward, calendar, config, |d, p| {
            present_value(&definition.to_derivative(d)?.into(), p)
        })
    }
}

/// Theta of a bond futures position, both days marked against the last
/// margin price.
///
/// A missing margin price is reported as `Unsupported` before `days_forward`
/// is validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BondFuturesTransactionHorizon;

impl HorizonCalculator for BondFuturesTransactionHorizon {
    type Definition = BondFuturesTransactionDefinition;

    fn theta_with_config(
        &self,
        definition: &BondFuturesTransactionDefinition,
        date: Date,
        provider: &IssuerProvider,
        days_forward: i32,
        calendar: &dyn Calendar,
        data: &HorizonData<'_>,
        config: &HorizonConfig,
    ) -> PricingResult<MultiCurrencyAmount> {
        let margin = data.last_margin_price.ok_or_else(|| {
            PricingError::unsupported("bond futures theta without a last margin price")
        })?;
        roll_and_price(date, provider, days_forward, calendar, config, |d, p| {
            present_value(&definition.to_derivative(d, Some(margin))?.into(), p)
        })
    }
}

/// Theta of a bond total return swap, reported in the bond currency.
///
/// Each leg is priced in its own currency and the funding leg converted
/// with the provider's FX rates before the two dates are differenced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BondTotalReturnSwapHorizon;

impl HorizonCalculator for BondTotalReturnSwapHorizon {
    type Definition = BondTotalReturnSwapDefinition;

    fn theta_with_config(
        &self,
        definition: &BondTotalReturnSwapDefinition,
        date: Date,
        provider: &IssuerProvider,
        days_forward: i32,
        calendar: &dyn Calendar,
        data: &HorizonData<'_>,
        config: &HorizonConfig,
    ) -> PricingResult<MultiCurrencyAmount> {
        let currency = definition.asset.currency();
        roll_and_price(date, provider, days_forward, calendar, config, |d, p| {
            let pv = present_value(&definition.to_derivative(d, data.fixings)?.into(), p)?;
            let total = p.fx_matrix().convert(&pv, currency)?;
            Ok(MultiCurrencyAmount::of(currency, total))
        })
    }
}

/// Theta of any instrument with a horizon calculator.
///
/// `fixings` is used by total return swaps with term rate funding and
/// `last_margin_price` by futures.
///
/// # Errors
///
/// Returns `PricingError::InvalidArgument` unless `days_forward` is 1 or -1,
/// `PricingError::Unsupported` for futures without a margin price, and
/// propagates pricing failures.
pub fn theta(
    definition: &InstrumentDefinition,
    date: Date,
    provider: &IssuerProvider,
    days_forward: i32,
    calendar: &dyn Calendar,
    fixings: Option<&FixingSeries>,
    last_margin_price: Option<f64>,
) -> PricingResult<MultiCurrencyAmount> {
    theta_with_config(
        definition,
        date,
        provider,
        days_forward,
        calendar,
        fixings,
        last_margin_price,
        &HorizonConfig::default(),
    )
}

/// [`theta`] with an explicit configuration.
///
/// # Errors
///
/// As [`theta`].
#[allow(clippy::too_many_arguments)]
pub fn theta_with_config(
    definition: &InstrumentDefinition,
    date: Date,
    provider: &IssuerProvider,
    days_forward: i32,
    calendar: &dyn Calendar,
    fixings: Option<&FixingSeries>,
    last_margin_price: Option<f64>,
    config: &HorizonConfig,
) -> PricingResult<MultiCurrencyAmount> {
    let data = HorizonData {
        fixings,
        last_margin_price,
    };
    match definition {
        InstrumentDefinition::BondTransaction(d) => BondTransactionHorizon
            .theta_with_config(d, date, provider, days_forward, calendar, &data, config),
        InstrumentDefinition::BillTransaction(d) => BillTransactionHorizon
            .theta_with_config(d, date, provider, days_forward, calendar, &data, config),
        InstrumentDefinition::BondFuturesTransaction(d) => BondFuturesTransactionHorizon
            .theta_with_config(d, date, provider, days_forward, calendar, &data, config),
        InstrumentDefinition::BondTotalReturnSwap(d) => BondTotalReturnSwapHorizon
            .theta_with_config(d, date, provider, days_forward, calendar, &data, config),
    }
}

fn rolldown(mode: RolldownMode) -> &'static dyn RolldownFunction {
    match mode {
        RolldownMode::ConstantSpread => &ConstantSpreadRolldown,
        RolldownMode::Forward => &ForwardRolldown,
    }
}

fn roll_and_price<F>(
    date: Date,
    provider: &IssuerProvider,
    days_forward: i32,
    calendar: &dyn Calendar,
    config: &HorizonConfig,
    price: F,
) -> PricingResult<MultiCurrencyAmount>
where
    F: Fn(Date, &IssuerProvider) -> PricingResult<MultiCurrencyAmount>,
{
    if days_forward != 1 && days_forward != -1 {
        return Err(PricingError::invalid_argument(format!(
            "days forward must be 1 or -1, got {days_forward}"
        )));
    }
    let horizon_date = calendar.add_business_days(date, days_forward);
    let shift_time = time_from(date, horizon_date);
    log::debug!(
        "horizon from {date} to {horizon_date} ({shift_time:.6}y) with {:?} rolldown",
        config.rolldown
    );

    let today = price(date, provider)?;
    let rolled = rolldown(config.rolldown).roll_issuer(provider, shift_time);
    let horizon = price(horizon_date, &rolled)?;

    let change = horizon.minus(&today);
    if config.normalise_direction && days_forward == -1 {
        Ok(-change)
    } else {
        Ok(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::Arc;
    use strata_core::calendars::{BusinessDayConvention, WeekendCalendar};
    use strata_core::daycounts::DayCount;
    use strata_core::types::{Currency, Frequency};
    use strata_curves::curves::ConstantCurve;
    use strata_curves::index::IssuerKey;
    use strata_curves::provider::MulticurveProvider;

    use crate::definition::{BillSecurityDefinition, FixedCouponBondDefinition};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn ust() -> IssuerKey {
        IssuerKey::new("UST", Currency::USD)
    }

    fn provider() -> IssuerProvider {
        let multicurve = MulticurveProvider::default()
            .with_discount_curve(Currency::USD, Arc::new(ConstantCurve::new("USD-OIS", 0.01)));
        IssuerProvider::new(multicurve)
            .with_issuer_curve(ust(), Arc::new(ConstantCurve::new("UST", 0.02)))
    }

    fn bill_trade() -> BillTransactionDefinition {
        let bill = BillSecurityDefinition::new(ust(), date(2025, 6, 2), 1_000_000.0);
        BillTransactionDefinition::new(bill, 1.0, date(2024, 6, 5), -985_000.0)
    }

    #[test]
    fn test_bill_theta_is_carry() {
        let today = date(2024, 6, 3);
        let theta = BillTransactionHorizon
            .theta(&bill_trade(), today, &provider(), 1, &WeekendCalendar, &HorizonData::empty())
            .unwrap();

        let pv = |d: Date| {
            let t_end = time_from(d, date(2025, 6, 2));
            let t_settle = time_from(d, date(2024, 6, 5));
            1_000_000.0 * (-0.02 * t_end).exp() - 985_000.0 * (-0.01 * t_settle).exp()
        };
        let expected = pv(date(2024, 6, 4)) - pv(today);
        assert_relative_eq!(theta.amount(Currency::USD), expected, epsilon = 1e-8);
        assert!(theta.amount(Currency::USD) > 0.0);
    }

    #[test]
    fn test_backward_theta_normalised() {
        let today = date(2024, 6, 4);
        let p = provider();
        let raw = BillTransactionHorizon
            .theta(&bill_trade(), today, &p, -1, &WeekendCalendar, &HorizonData::empty())
            .unwrap();
        let normalised = BillTransactionHorizon
            .theta_with_config(
                &bill_trade(),
                today,
                &p,
                -1,
                &WeekendCalendar,
                &HorizonData::empty(),
                &HorizonConfig::default().with_normalise_direction(true),
            )
            .unwrap();
        assert!(raw.amount(Currency::USD) < 0.0);
        assert_relative_eq!(normalised.amount(Currency::USD), -raw.amount(Currency::USD));
    }

    #[test]
    fn test_forward_rolldown_changes_flat_curve_carry() {
        let bond = FixedCouponBondDefinition::new(
            ust(),
            date(2024, 1, 15),
            date(2029, 1, 15),
            Frequency::SemiAnnual,
            0.02,
            100.0,
            DayCount::Thirty360,
            BusinessDayConvention::Following,
            &WeekendCalendar,
        )
        .unwrap();
        let trade = BondTransactionDefinition::new(bond, 1.0, date(2024, 6, 5), 1.0);
        let today = date(2024, 6, 3);
        let p = provider();
        let constant = BondTransactionHorizon
            .theta(&trade, today, &p, 1, &WeekendCalendar, &HorizonData::empty())
            .unwrap();
        let forward = BondTransactionHorizon
            .theta_with_config(
                &trade,
                today,
                &p,
                1,
                &WeekendCalendar,
                &HorizonData::empty(),
                &HorizonConfig::default().with_rolldown(RolldownMode::Forward),
            )
            .unwrap();
        // on a flat curve realised forwards equal residual rates
        assert_relative_eq!(
            constant.amount(Currency::USD),
            forward.amount(Currency::USD),
            epsilon = 1e-8
        );
    }

    #[test]
    fn test_days_forward_validated() {
        let err = BillTransactionHorizon.theta(
            &bill_trade(),
            date(2024, 6, 3),
            &provider(),
            2,
            &WeekendCalendar,
            &HorizonData::empty(),
        );
        assert!(matches!(err, Err(PricingError::InvalidArgument { .. })));
    }
}
