//! Credit curve bootstrapping.
//!
//! The credit curve has one knot per calibration instrument, at the
//! instrument's protection end. Knots are solved in order: each new zero
//! hazard rate is found so that its CDS reprices to the quoted upfront,
//! holding the earlier knots fixed.

use strata_config::CalibrationConfig;
use strata_core::calendars::{BusinessDayConvention, WeekendCalendar};
use strata_core::daycounts::DayCount;
use strata_core::types::{Date, Tenor};
use strata_math::solvers::{expand_upper_bracket, newton_bracketed, SolverConfig};

use crate::analytic::{CdsAnalytic, CdsTerms};
use crate::curve::{IsdaCreditCurve, IsdaYieldCurve};
use crate::error::{CreditError, CreditResult};
use crate::pricer::{AccrualOnDefault, AnalyticCdsPricer, PriceType};
use crate::schedule::StubType;

/// Default absolute tolerance on the repricing error per unit notional.
pub const DEFAULT_TOLERANCE: f64 = 1e-15;

/// Default iteration budget per knot.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Default cap on the zero hazard rate searched.
pub const DEFAULT_MAX_HAZARD_RATE: f64 = 10.0;

/// Sequential (knot by knot) credit curve bootstrapper.
///
/// ```rust
/// use strata_core::types::{Date, Tenor};
/// use strata_credit::prelude::*;
///
/// let trade = Date::from_ymd(2024, 6, 14).unwrap();
/// let factory = CdsAnalyticFactory::new(0.4);
/// let cds: Vec<_> = [1, 3, 5]
///     .iter()
///     .map(|y| factory.make_imm_cds(trade, Tenor::years(*y)).unwrap())
///     .collect();
/// let yc = IsdaYieldCurve::flat(0.03).unwrap();
///
/// let builder = SimpleCreditCurveBuilder::new();
/// let curve = builder.calibrate(&cds, &[0.008, 0.01, 0.012], &yc).unwrap();
/// assert_eq!(curve.number_of_knots(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleCreditCurveBuilder {
    pricer: AnalyticCdsPricer,
    config: SolverConfig,
    max_hazard_rate: f64,
}

impl Default for SimpleCreditCurveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleCreditCurveBuilder {
    /// A builder with the original ISDA accrual-on-default formula.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pricer: AnalyticCdsPricer::default(),
            config: SolverConfig::new(DEFAULT_TOLERANCE, DEFAULT_MAX_ITERATIONS),
            max_hazard_rate: DEFAULT_MAX_HAZARD_RATE,
        }
    }

    /// Sets the accrual-on-default formula used in repricing.
    #[must_use]
    pub fn with_accrual_on_default(mut self, formula: AccrualOnDefault) -> Self {
        self.pricer = AnalyticCdsPricer::new(formula);
        self
    }

    /// Applies solver settings and the accrual formula from configuration.
    #[must_use]
    pub fn with_config(mut self, config: &CalibrationConfig) -> Self {
        self.pricer = AnalyticCdsPricer::new(config.accrual_on_default.into());
        self.config = SolverConfig::new(config.tolerance, config.max_iterations);
        self.max_hazard_rate = config.max_hazard_rate;
        self
    }

    /// The pricer used in repricing.
    #[must_use]
    pub fn pricer(&self) -> &AnalyticCdsPricer {
        &self.pricer
    }

    /// Calibrates to par spreads: each CDS has zero clean price at its coupon.
    ///
    /// # Errors
    ///
    /// See [`SimpleCreditCurveBuilder::calibrate_with_upfront`].
    pub fn calibrate(
        &self,
        cds: &[CdsAnalytic],
        coupons: &[f64],
        yield_curve: &IsdaYieldCurve,
    ) -> CreditResult<IsdaCreditCurve> {
        let upfronts = vec![0.0; cds.len()];
        self.calibrate_with_upfront(cds, coupons, &upfronts, yield_curve)
    }

    /// Calibrates to upfront quotes: each CDS's clean price at its coupon
    /// equals its upfront (per unit notional).
    ///
    /// # Errors
    ///
    /// * `CreditError::InvalidArgument` for empty or mismatched inputs, or
    ///   maturities that are not strictly increasing and positive
    /// * `CreditError::Calibration` if an instrument cannot be repriced with
    ///   a non-negative forward hazard rate below the configured cap
    pub fn calibrate_with_upfront(
        &self,
        cds: &[CdsAnalytic],
        coupons: &[f64],
        upfronts: &[f64],
        yield_curve: &IsdaYieldCurve,
    ) -> CreditResult<IsdaCreditCurve> {
        if cds.is_empty() {
            return Err(CreditError::invalid_argument("no calibration instruments"));
        }
        if coupons.len() != cds.len() || upfronts.len() != cds.len() {
            return Err(CreditError::invalid_argument(format!(
                "{} instruments, {} coupons and {} upfronts",
                cds.len(),
                coupons.len(),
                upfronts.len()
            )));
        }
        let t: Vec<f64> = cds.iter().map(CdsAnalytic::protection_end).collect();
        if !(t[0] > 0.0) || t.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(CreditError::invalid_argument(
                "instrument maturities must be positive and strictly increasing",
            ));
        }

        let mut r: Vec<f64> = Vec::with_capacity(cds.len());
        for (i, instrument) in cds.iter().enumerate() {
            let guess = if i == 0 {
                coupons[0] / instrument.lgd()
            } else {
                r[i - 1]
            };
            let rate = self.solve_knot(
                i,
                instrument,
                coupons[i],
                upfronts[i],
                &t[..=i],
                &r,
                guess,
                yield_curve,
            )?;
            log::debug!("credit knot {i}: t = {:.6}, zero hazard rate = {rate:.10}", t[i]);
            r.push(rate);
        }

        Ok(IsdaCreditCurve::from_validated(t, r))
    }

    /// Builds standard contracts from dates and calibrates to par spreads.
    ///
    /// Weekends are the only holidays and payment dates roll Following.
    ///
    /// # Errors
    ///
    /// `CreditError::InvalidArgument` if `end_dates` and `coupons` differ in
    /// length, plus any error from building the contracts or calibrating.
    #[allow(clippy::too_many_arguments)]
    pub fn calibrate_credit_curve(
        &self,
        trade_date: Date,
        step_in_date: Date,
        value_date: Date,
        start_date: Date,
        end_dates: &[Date],
        coupons: &[f64],
        pay_accrued_on_default: bool,
        payment_interval: Tenor,
        stub_type: StubType,
        protect_start: bool,
        yield_curve: &IsdaYieldCurve,
        recovery_rate: f64,
    ) -> CreditResult<IsdaCreditCurve> {
        if end_dates.len() != coupons.len() {
            return Err(CreditError::invalid_argument(format!(
                "{} end dates but {} coupons",
                end_dates.len(),
                coupons.len()
            )));
        }
        let cds = end_dates
            .iter()
            .map(|end_date| {
                let terms = CdsTerms {
                    trade_date,
                    step_in_date,
                    cash_settle_date: value_date,
                    accrual_start_date: start_date,
                    end_date: *end_date,
                    pay_accrued_on_default,
                    payment_interval,
                    stub_type,
                    protect_start,
                    recovery_rate,
                    convention: BusinessDayConvention::Following,
                    accrual_day_count: DayCount::Act360,
                    curve_day_count: DayCount::Act365Fixed,
                };
                CdsAnalytic::new(&terms, &WeekendCalendar)
            })
            .collect::<CreditResult<Vec<_>>>()?;
        self.calibrate(&cds, coupons, yield_curve)
    }

    /// Zero hazard rate of knot `i` repricing `instrument`.
    #[allow(clippy::too_many_arguments)]
    fn solve_knot(
        &self,
        i: usize,
        instrument: &CdsAnalytic,
        coupon: f64,
        upfront: f64,
        t: &[f64],
        solved: &[f64],
        guess: f64,
        yield_curve: &IsdaYieldCurve,
    ) -> CreditResult<f64> {
        let trial = |rate: f64| {
            let mut r = solved.to_vec();
            r.push(rate);
            IsdaCreditCurve::from_validated(t.to_vec(), r)
        };
        let objective = |rate: f64| {
            self.pricer
                .pv(instrument, yield_curve, &trial(rate), coupon, PriceType::Clean)
                - upfront
        };
        let derivative = |rate: f64| {
            self.pricer
                .pv_credit_sensitivity(instrument, yield_curve, &trial(rate), coupon, i)
                .unwrap_or(f64::NAN)
        };

        // smallest zero rate keeping the forward hazard on the new segment non-negative
        let lower = if i == 0 {
            0.0
        } else {
            solved[i - 1] * t[i - 1] / t[i]
        };
        let start_upper = (2.0 * guess).max(lower + 1e-4);

        let (lower, upper) =
            expand_upper_bracket(&objective, lower, start_upper, self.max_hazard_rate).map_err(
                |e| {
                    log::warn!("no bracket for credit knot {i} at t = {:.6}: {e}", t[i]);
                    CreditError::calibration(
                        i,
                        format!("no hazard rate up to {} reprices: {e}", self.max_hazard_rate),
                    )
                },
            )?;

        let result = newton_bracketed(&objective, &derivative, guess, lower, upper, &self.config)
            .map_err(|e| {
                log::warn!("credit knot {i} at t = {:.6} failed to converge: {e}", t[i]);
                CreditError::calibration(i, e.to_string())
            })?;
        Ok(result.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic::CdsAnalyticFactory;
    use strata_config::AccrualOnDefaultKind;

    fn trade() -> Date {
        Date::from_ymd(2024, 6, 14).unwrap()
    }

    fn instruments() -> Vec<CdsAnalytic> {
        let factory = CdsAnalyticFactory::new(0.4);
        [6, 12, 36, 60, 84, 120]
            .iter()
            .map(|m| factory.make_imm_cds(trade(), Tenor::months(*m)).unwrap())
            .collect()
    }

    fn yield_curve() -> IsdaYieldCurve {
        IsdaYieldCurve::new(
            vec![0.25, 1.0, 2.0, 5.0, 10.0],
            vec![0.05, 0.048, 0.045, 0.042, 0.043],
        )
        .unwrap()
    }

    #[test]
    fn test_reprices_par_spreads() {
        let cds = instruments();
        let spreads = [0.004, 0.0045, 0.006, 0.0075, 0.0085, 0.009];
        let yc = yield_curve();
        let builder = SimpleCreditCurveBuilder::new();
        let curve = builder.calibrate(&cds, &spreads, &yc).unwrap();

        for (instrument, spread) in cds.iter().zip(spreads) {
            let pv = builder
                .pricer()
                .pv(instrument, &yc, &curve, spread, PriceType::Clean);
            assert!((pv * 1e7).abs() < 1e-8, "pv {pv}");
        }
    }

    #[test]
    fn test_reprices_upfronts_with_every_formula() {
        let cds = instruments();
        let coupons = [0.01; 6];
        let upfronts = [-0.003, -0.004, 0.0, 0.008, 0.015, 0.025];
        let yc = yield_curve();
        for kind in [
            AccrualOnDefaultKind::OriginalIsda,
            AccrualOnDefaultKind::MarkitFix,
            AccrualOnDefaultKind::Exact,
        ] {
            let config = CalibrationConfig {
                accrual_on_default: kind,
                ..CalibrationConfig::default()
            };
            let builder = SimpleCreditCurveBuilder::new().with_config(&config);
            let curve = builder
                .calibrate_with_upfront(&cds, &coupons, &upfronts, &yc)
                .unwrap();
            for (i, instrument) in cds.iter().enumerate() {
                let pv = builder
                    .pricer()
                    .pv(instrument, &yc, &curve, coupons[i], PriceType::Clean);
                assert!(((pv - upfronts[i]) * 1e7).abs() < 1e-8);
            }
        }
    }

    #[test]
    fn test_forward_hazard_non_negative() {
        let cds = instruments();
        let yc = yield_curve();
        let curve = SimpleCreditCurveBuilder::new()
            .calibrate(&cds, &[0.02, 0.015, 0.012, 0.011, 0.0105, 0.01], &yc)
            .unwrap();
        for w in curve.times().windows(2) {
            assert!(curve.hazard_rate(0.5 * (w[0] + w[1])) >= 0.0);
        }
    }

    #[test]
    fn test_mismatched_inputs() {
        let cds = instruments();
        let builder = SimpleCreditCurveBuilder::new();
        let result = builder.calibrate(&cds, &[0.01], &yield_curve());
        assert!(matches!(result, Err(CreditError::InvalidArgument { .. })));

        let result = builder.calibrate_credit_curve(
            trade(),
            trade().add_days(1),
            trade().add_days(3),
            Date::from_ymd(2024, 3, 20).unwrap(),
            &[Date::from_ymd(2029, 6, 20).unwrap()],
            &[0.01, 0.02],
            true,
            Tenor::months(3),
            StubType::FrontShort,
            true,
            &yield_curve(),
            0.4,
        );
        assert!(matches!(result, Err(CreditError::InvalidArgument { .. })));
    }

    #[test]
    fn test_unreachable_quote_reports_knot() {
        let cds = instruments();
        let yc = yield_curve();
        // the second instrument would need a negative forward hazard rate
        let result = SimpleCreditCurveBuilder::new().calibrate(&cds[..2], &[0.05, 0.001], &yc);
        assert!(matches!(result, Err(CreditError::Calibration { knot: 1, .. })));
    }
}
