//! Analytic CDS pricing under the ISDA standard model.
//!
//! Both legs are integrated in closed form between consecutive points of
//! the union of the yield and credit curve knots, where the discount and
//! survival exponents are linear in time. With `b = exp(-(h(t) + r(t)) t)`
//! and, on a sub-interval, `x = dh` and `y = dh + dr` the changes of the
//! credit and total exponents:
//!
//! ```text
//! protection  = sum (b0 - b1) x / y
//! premium     = sum_i yf_i P(pay_i) Q(end_i)  [+ accrual on default]
//! ```
//!
//! For `|y| < 1e-5` the closed forms are replaced by their Taylor
//! expansions. Sensitivities apply the chain rule to the same expressions,
//! so they are exact derivatives of the prices.

use serde::{Deserialize, Serialize};
use strata_config::AccrualOnDefaultKind;

use crate::analytic::CdsAnalytic;
use crate::coupon::CdsCoupon;
use crate::curve::{IsdaCreditCurve, IsdaCurve, IsdaYieldCurve};
use crate::error::{CreditError, CreditResult};

/// Below this exponent change the Taylor expansions are used.
const SMALL: f64 = 1e-5;

/// Half a day in ACT/365F, added to the accrual time in the original ISDA formula.
const HALF_DAY: f64 = 1.0 / 730.0;

/// Formula for premium accrued up to the default time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccrualOnDefault {
    /// ISDA standard model: accrual time carries an extra half day.
    #[default]
    OriginalIsda,
    /// Markit's variant, accruing from the start of each sub-interval.
    MarkitFix,
    /// The exact integral without the half-day offset.
    Exact,
}

impl From<AccrualOnDefaultKind> for AccrualOnDefault {
    fn from(kind: AccrualOnDefaultKind) -> Self {
        match kind {
            AccrualOnDefaultKind::OriginalIsda => AccrualOnDefault::OriginalIsda,
            AccrualOnDefaultKind::MarkitFix => AccrualOnDefault::MarkitFix,
            AccrualOnDefaultKind::Exact => AccrualOnDefault::Exact,
        }
    }
}

/// Whether accrued premium is included in a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PriceType {
    /// Excluding accrued premium.
    #[default]
    Clean,
    /// Including accrued premium.
    Dirty,
}

/// Direction of differentiation.
#[derive(Debug, Clone, Copy)]
enum Direction {
    None,
    Credit(usize),
    Yield(usize),
}

impl Direction {
    fn dh(self, credit: &IsdaCurve, t: f64) -> f64 {
        match self {
            Direction::Credit(node) => credit.rt_sensitivity(t, node),
            _ => 0.0,
        }
    }

    fn dr(self, yield_curve: &IsdaCurve, t: f64) -> f64 {
        match self {
            Direction::Yield(node) => yield_curve.rt_sensitivity(t, node),
            _ => 0.0,
        }
    }
}

/// Curve exponents at one integration point, with their derivatives.
#[derive(Debug, Clone, Copy)]
struct Point {
    ht: f64,
    rt: f64,
    b: f64,
    dht: f64,
    drt: f64,
    db: f64,
}

impl Point {
    fn new(t: f64, yc: &IsdaCurve, cc: &IsdaCurve, direction: Direction) -> Self {
        let ht = cc.rt(t);
        let rt = yc.rt(t);
        let b = (-ht - rt).exp();
        let dht = direction.dh(cc, t);
        let drt = direction.dr(yc, t);
        Self {
            ht,
            rt,
            b,
            dht,
            drt,
            db: -b * (dht + drt),
        }
    }
}

/// Analytic CDS pricer.
///
/// Values are per unit notional and, except for [`AnalyticCdsPricer::pv`],
/// discounted to the trade date.
///
/// ```rust
/// use strata_core::types::{Date, Tenor};
/// use strata_credit::prelude::*;
///
/// let trade = Date::from_ymd(2024, 6, 14).unwrap();
/// let cds = CdsAnalyticFactory::new(0.4).make_imm_cds(trade, Tenor::years(5)).unwrap();
/// let yc = IsdaYieldCurve::flat(0.03).unwrap();
/// let cc = IsdaCreditCurve::flat(0.02).unwrap();
///
/// let pricer = AnalyticCdsPricer::default();
/// let spread = pricer.par_spread(&cds, &yc, &cc).unwrap();
/// // close to hazard rate times loss given default, in ACT/360 premium terms
/// assert!((spread - 0.012 * 360.0 / 365.0).abs() < 1e-4);
/// assert!(pricer.pv(&cds, &yc, &cc, spread, PriceType::Clean).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyticCdsPricer {
    accrual_on_default: AccrualOnDefault,
}

impl AnalyticCdsPricer {
    /// A pricer using the given accrual-on-default formula.
    #[must_use]
    pub fn new(accrual_on_default: AccrualOnDefault) -> Self {
        Self { accrual_on_default }
    }

    /// The accrual-on-default formula.
    #[must_use]
    pub fn accrual_on_default(&self) -> AccrualOnDefault {
        self.accrual_on_default
    }

    /// Present value to the protection buyer at cash settlement.
    ///
    /// `(protection - coupon * annuity) / P(cash settle)`; zero once
    /// protection has ended.
    #[must_use]
    pub fn pv(
        &self,
        cds: &CdsAnalytic,
        yield_curve: &IsdaYieldCurve,
        credit_curve: &IsdaCreditCurve,
        coupon: f64,
        price_type: PriceType,
    ) -> f64 {
        if cds.protection_end() <= 0.0 {
            return 0.0;
        }
        let pv_dirty = self.pv_dirty(cds, yield_curve, credit_curve, coupon);
        match price_type {
            PriceType::Dirty => pv_dirty,
            PriceType::Clean => pv_dirty + coupon * cds.accrued_year_fraction(),
        }
    }

    /// Value of the protection leg.
    #[must_use]
    pub fn protection_leg(
        &self,
        cds: &CdsAnalytic,
        yield_curve: &IsdaYieldCurve,
        credit_curve: &IsdaCreditCurve,
    ) -> f64 {
        protection_leg(cds, yield_curve, credit_curve, Direction::None).0
    }

    /// Value of the premium leg per unit spread (risky annuity).
    #[must_use]
    pub fn annuity(
        &self,
        cds: &CdsAnalytic,
        yield_curve: &IsdaYieldCurve,
        credit_curve: &IsdaCreditCurve,
        price_type: PriceType,
    ) -> f64 {
        let dirty = self
            .dirty_annuity(cds, yield_curve, credit_curve, Direction::None)
            .0;
        match price_type {
            PriceType::Dirty => dirty,
            PriceType::Clean => {
                dirty
                    - cds.accrued_year_fraction()
                        * yield_curve.discount_factor(cds.cash_settle_time())
            }
        }
    }

    /// The coupon for which the clean price is zero.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidArgument` if protection has ended or the
    /// clean annuity is not positive.
    pub fn par_spread(
        &self,
        cds: &CdsAnalytic,
        yield_curve: &IsdaYieldCurve,
        credit_curve: &IsdaCreditCurve,
    ) -> CreditResult<f64> {
        if cds.protection_end() <= 0.0 {
            return Err(CreditError::invalid_argument("CDS protection has already ended"));
        }
        let annuity = self.annuity(cds, yield_curve, credit_curve, PriceType::Clean);
        if !(annuity > 0.0) {
            return Err(CreditError::invalid_argument(format!(
                "clean annuity must be positive, got {annuity}"
            )));
        }
        Ok(self.protection_leg(cds, yield_curve, credit_curve) / annuity)
    }

    /// Derivative of the protection leg with respect to credit knot `node`.
    pub fn protection_leg_credit_sensitivity(
        &self,
        cds: &CdsAnalytic,
        yield_curve: &IsdaYieldCurve,
        credit_curve: &IsdaCreditCurve,
        node: usize,
    ) -> CreditResult<f64> {
        check_node(credit_curve, node)?;
        Ok(protection_leg(cds, yield_curve, credit_curve, Direction::Credit(node)).1)
    }

    /// Derivative of the (dirty) annuity with respect to credit knot `node`.
    pub fn pv_premium_leg_credit_sensitivity(
        &self,
        cds: &CdsAnalytic,
        yield_curve: &IsdaYieldCurve,
        credit_curve: &IsdaCreditCurve,
        node: usize,
    ) -> CreditResult<f64> {
        check_node(credit_curve, node)?;
        Ok(self
            .dirty_annuity(cds, yield_curve, credit_curve, Direction::Credit(node))
            .1)
    }

    /// Derivative of [`AnalyticCdsPricer::pv`] with respect to credit knot `node`.
    ///
    /// Clean and dirty prices differ by a constant, so the derivative is the same.
    pub fn pv_credit_sensitivity(
        &self,
        cds: &CdsAnalytic,
        yield_curve: &IsdaYieldCurve,
        credit_curve: &IsdaCreditCurve,
        coupon: f64,
        node: usize,
    ) -> CreditResult<f64> {
        check_node(credit_curve, node)?;
        Ok(self.pv_derivative(cds, yield_curve, credit_curve, coupon, Direction::Credit(node)))
    }

    /// Derivatives of the price with respect to every credit knot.
    #[must_use]
    pub fn pv_credit_sensitivities(
        &self,
        cds: &CdsAnalytic,
        yield_curve: &IsdaYieldCurve,
        credit_curve: &IsdaCreditCurve,
        coupon: f64,
    ) -> Vec<f64> {
        (0..credit_curve.number_of_knots())
            .map(|node| {
                self.pv_derivative(cds, yield_curve, credit_curve, coupon, Direction::Credit(node))
            })
            .collect()
    }

    /// Derivative of the protection leg with respect to yield knot `node`.
    pub fn protection_leg_yield_sensitivity(
        &self,
        cds: &CdsAnalytic,
        yield_curve: &IsdaYieldCurve,
        credit_curve: &IsdaCreditCurve,
        node: usize,
    ) -> CreditResult<f64> {
        check_node(yield_curve, node)?;
        Ok(protection_leg(cds, yield_curve, credit_curve, Direction::Yield(node)).1)
    }

    /// Derivative of the (dirty) annuity with respect to yield knot `node`.
    pub fn pv_premium_leg_yield_sensitivity(
        &self,
        cds: &CdsAnalytic,
        yield_curve: &IsdaYieldCurve,
        credit_curve: &IsdaCreditCurve,
        node: usize,
    ) -> CreditResult<f64> {
        check_node(yield_curve, node)?;
        Ok(self
            .dirty_annuity(cds, yield_curve, credit_curve, Direction::Yield(node))
            .1)
    }

    /// Derivative of [`AnalyticCdsPricer::pv`] with respect to yield knot `node`.
    ///
    /// Includes the change of the discount factor to cash settlement.
    pub fn pv_yield_sensitivity(
        &self,
        cds: &CdsAnalytic,
        yield_curve: &IsdaYieldCurve,
        credit_curve: &IsdaCreditCurve,
        coupon: f64,
        node: usize,
    ) -> CreditResult<f64> {
        check_node(yield_curve, node)?;
        Ok(self.pv_derivative(cds, yield_curve, credit_curve, coupon, Direction::Yield(node)))
    }

    /// Derivatives of the price with respect to every yield knot.
    #[must_use]
    pub fn pv_yield_sensitivities(
        &self,
        cds: &CdsAnalytic,
        yield_curve: &IsdaYieldCurve,
        credit_curve: &IsdaCreditCurve,
        coupon: f64,
    ) -> Vec<f64> {
        (0..yield_curve.number_of_knots())
            .map(|node| {
                self.pv_derivative(cds, yield_curve, credit_curve, coupon, Direction::Yield(node))
            })
            .collect()
    }

    fn pv_dirty(
        &self,
        cds: &CdsAnalytic,
        yield_curve: &IsdaYieldCurve,
        credit_curve: &IsdaCreditCurve,
        coupon: f64,
    ) -> f64 {
        let protection = protection_leg(cds, yield_curve, credit_curve, Direction::None).0;
        let annuity = self
            .dirty_annuity(cds, yield_curve, credit_curve, Direction::None)
            .0;
        (protection - coupon * annuity) / yield_curve.discount_factor(cds.cash_settle_time())
    }

    fn pv_derivative(
        &self,
        cds: &CdsAnalytic,
        yield_curve: &IsdaYieldCurve,
        credit_curve: &IsdaCreditCurve,
        coupon: f64,
        direction: Direction,
    ) -> f64 {
        if cds.protection_end() <= 0.0 {
            return 0.0;
        }
        let (protection, d_protection) = protection_leg(cds, yield_curve, credit_curve, direction);
        let (annuity, d_annuity) = self.dirty_annuity(cds, yield_curve, credit_curve, direction);
        let cash_settle = cds.cash_settle_time();
        let df = yield_curve.discount_factor(cash_settle);
        let pv_dirty = (protection - coupon * annuity) / df;
        (d_protection - coupon * d_annuity) / df + pv_dirty * direction.dr(yield_curve, cash_settle)
    }

    /// Dirty annuity and its derivative along `direction`.
    fn dirty_annuity(
        &self,
        cds: &CdsAnalytic,
        yield_curve: &IsdaCurve,
        credit_curve: &IsdaCurve,
        direction: Direction,
    ) -> (f64, f64) {
        let mut pv = 0.0;
        let mut dpv = 0.0;
        for coupon in cds.coupons() {
            let p = yield_curve.exp_minus_rt(coupon.payment_time());
            let q = credit_curve.exp_minus_rt(coupon.effective_end());
            let dp = -p * direction.dr(yield_curve, coupon.payment_time());
            let dq = -q * direction.dh(credit_curve, coupon.effective_end());
            pv += coupon.year_frac() * p * q;
            dpv += coupon.year_frac() * (dp * q + p * dq);
        }
        if cds.pay_accrued_on_default() {
            for coupon in cds.coupons() {
                let (v, dv) = self.accrued_on_default_leg(
                    coupon,
                    cds.effective_protection_start(),
                    yield_curve,
                    credit_curve,
                    direction,
                );
                pv += v;
                dpv += dv;
            }
        }
        (pv, dpv)
    }

    /// Premium accrued to default within one coupon period, per unit spread.
    fn accrued_on_default_leg(
        &self,
        coupon: &CdsCoupon,
        protection_start: f64,
        yc: &IsdaCurve,
        cc: &IsdaCurve,
        direction: Direction,
    ) -> (f64, f64) {
        let start = coupon.effective_start().max(protection_start);
        if start >= coupon.effective_end() {
            return (0.0, 0.0);
        }
        let points = integration_points(start, coupon.effective_end(), yc, cc);
        let omega = match self.accrual_on_default {
            AccrualOnDefault::OriginalIsda => HALF_DAY,
            AccrualOnDefault::MarkitFix | AccrualOnDefault::Exact => 0.0,
        };

        let mut p0 = Point::new(points[0], yc, cc, direction);
        let mut t0 = points[0] - coupon.effective_start() + omega;
        let mut pv = 0.0;
        let mut dpv = 0.0;

        for window in points.windows(2) {
            let p1 = Point::new(window[1], yc, cc, direction);
            let dt = window[1] - window[0];
            let x = p1.ht - p0.ht;
            let y = x + p1.rt - p0.rt;
            let dx = p1.dht - p0.dht;
            let dy = dx + p1.drt - p0.drt;
            let (b0, b1, db0, db1) = (p0.b, p1.b, p0.db, p1.db);

            let (v, dv) = match self.accrual_on_default {
                AccrualOnDefault::MarkitFix => {
                    if y.abs() < SMALL {
                        let e = epsilon_p(-y);
                        (
                            x * dt * b0 * e,
                            dt * ((dx * b0 + x * db0) * e - x * b0 * epsilon_pp(-y) * dy),
                        )
                    } else {
                        let c = (b0 - b1) / y - b1;
                        let dc = (db0 - db1) / y - (b0 - b1) * dy / (y * y) - db1;
                        let ratio = x / y;
                        let d_ratio = (dx * y - x * dy) / (y * y);
                        (dt * ratio * c, dt * (d_ratio * c + ratio * dc))
                    }
                }
                AccrualOnDefault::OriginalIsda | AccrualOnDefault::Exact => {
                    let t1 = window[1] - coupon.effective_start() + omega;
                    let result = if y.abs() < SMALL {
                        let (e, ep, epp) = (epsilon(-y), epsilon_p(-y), epsilon_pp(-y));
                        let inner = t0 * e + dt * ep;
                        (
                            x * b0 * inner,
                            (dx * b0 + x * db0) * inner - x * b0 * (t0 * ep + dt * epp) * dy,
                        )
                    } else {
                        let a = t0 * b0 - t1 * b1 + dt / y * (b0 - b1);
                        let da = t0 * db0 - t1 * db1
                            + dt * ((db0 - db1) / y - (b0 - b1) * dy / (y * y));
                        let ratio = x / y;
                        let d_ratio = (dx * y - x * dy) / (y * y);
                        (ratio * a, d_ratio * a + ratio * da)
                    };
                    t0 = t1;
                    result
                }
            };
            pv += v;
            dpv += dv;
            p0 = p1;
        }

        (coupon.yf_ratio() * pv, coupon.yf_ratio() * dpv)
    }
}

/// Protection leg value and its derivative along `direction`.
fn protection_leg(
    cds: &CdsAnalytic,
    yc: &IsdaCurve,
    cc: &IsdaCurve,
    direction: Direction,
) -> (f64, f64) {
    if cds.protection_end() <= 0.0 {
        return (0.0, 0.0);
    }
    let start = cds.effective_protection_start().max(0.0);
    let points = integration_points(start, cds.protection_end(), yc, cc);

    let mut p0 = Point::new(points[0], yc, cc, direction);
    let mut pv = 0.0;
    let mut dpv = 0.0;
    for &t in &points[1..] {
        let p1 = Point::new(t, yc, cc, direction);
        let x = p1.ht - p0.ht;
        let y = x + p1.rt - p0.rt;
        let dx = p1.dht - p0.dht;
        let dy = dx + p1.drt - p0.drt;
        if y.abs() < SMALL {
            let e = epsilon(-y);
            pv += x * p0.b * e;
            dpv += (dx * p0.b + x * p0.db) * e - x * p0.b * epsilon_p(-y) * dy;
        } else {
            pv += (p0.b - p1.b) * x / y;
            dpv += (p0.db - p1.db) * x / y + (p0.b - p1.b) * (dx * y - x * dy) / (y * y);
        }
        p0 = p1;
    }
    (cds.lgd() * pv, cds.lgd() * dpv)
}

/// `start`, every knot of either curve strictly inside, and `end`.
fn integration_points(start: f64, end: f64, yc: &IsdaCurve, cc: &IsdaCurve) -> Vec<f64> {
    let mut points = vec![start];
    points.extend(
        yc.times()
            .iter()
            .chain(cc.times())
            .copied()
            .filter(|t| *t > start && *t < end),
    );
    points.push(end);
    points.sort_by(f64::total_cmp);
    points.dedup();
    points
}

fn check_node(curve: &IsdaCurve, node: usize) -> CreditResult<()> {
    if node >= curve.number_of_knots() {
        return Err(CreditError::invalid_argument(format!(
            "node {node} out of range for curve '{}' with {} knots",
            curve.name(),
            curve.number_of_knots()
        )));
    }
    Ok(())
}

/// `(exp(x) - 1) / x`, expanded to third order.
fn epsilon(x: f64) -> f64 {
    1.0 + x * (1.0 / 2.0 + x * (1.0 / 6.0 + x / 24.0))
}

/// Derivative of [`epsilon`].
fn epsilon_p(x: f64) -> f64 {
    1.0 / 2.0 + x * (1.0 / 3.0 + x * (1.0 / 8.0 + x / 30.0))
}

/// Second derivative of [`epsilon`].
fn epsilon_pp(x: f64) -> f64 {
    1.0 / 3.0 + x * (1.0 / 4.0 + x * (1.0 / 10.0 + x / 36.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic::CdsAnalyticFactory;
    use approx::assert_relative_eq;
    use strata_core::types::{Date, Tenor};

    fn cds(tenor: Tenor) -> CdsAnalytic {
        let trade = Date::from_ymd(2024, 6, 14).unwrap();
        CdsAnalyticFactory::new(0.4).make_imm_cds(trade, tenor).unwrap()
    }

    fn yield_curve() -> IsdaYieldCurve {
        IsdaYieldCurve::new(
            vec![0.25, 0.5, 1.0, 2.0, 5.0, 10.0],
            vec![0.045, 0.044, 0.042, 0.039, 0.037, 0.038],
        )
        .unwrap()
    }

    fn credit_curve() -> IsdaCreditCurve {
        IsdaCreditCurve::new(vec![0.5, 1.0, 3.0, 5.0, 7.0], vec![0.01, 0.012, 0.018, 0.022, 0.024])
            .unwrap()
    }

    #[test]
    fn test_epsilon_expansions() {
        let x: f64 = 1e-3;
        assert_relative_eq!(epsilon(x), x.exp_m1() / x, epsilon = 1e-13);
        assert_relative_eq!(epsilon_p(x), (x.exp() * (x - 1.0) + 1.0) / (x * x), epsilon = 1e-9);
    }

    #[test]
    fn test_flat_curves_protection_closed_form() {
        // with flat curves the protection leg is lgd * h / (h + r) * (1 - exp(-(h + r) T))
        let cds = cds(Tenor::years(5));
        let (h, r) = (0.02, 0.03);
        let yc = IsdaYieldCurve::flat(r).unwrap();
        let cc = IsdaCreditCurve::flat(h).unwrap();
        let t = cds.protection_end();
        let expected = 0.6 * h / (h + r) * (1.0 - (-(h + r) * t).exp());
        let protection = AnalyticCdsPricer::default().protection_leg(&cds, &yc, &cc);
        assert_relative_eq!(protection, expected, epsilon = 1e-14);
    }

    #[test]
    fn test_clean_and_dirty() {
        let cds = cds(Tenor::years(5));
        let pricer = AnalyticCdsPricer::default();
        let (yc, cc) = (yield_curve(), credit_curve());
        let coupon = 0.01;
        let clean = pricer.pv(&cds, &yc, &cc, coupon, PriceType::Clean);
        let dirty = pricer.pv(&cds, &yc, &cc, coupon, PriceType::Dirty);
        assert_relative_eq!(clean - dirty, coupon * cds.accrued_year_fraction(), epsilon = 1e-15);

        let df = yc.discount_factor(cds.cash_settle_time());
        let annuity_clean = pricer.annuity(&cds, &yc, &cc, PriceType::Clean);
        let protection = pricer.protection_leg(&cds, &yc, &cc);
        assert_relative_eq!(clean, (protection - coupon * annuity_clean) / df, epsilon = 1e-15);
    }

    #[test]
    fn test_par_spread_prices_to_zero() {
        let cds = cds(Tenor::years(3));
        let pricer = AnalyticCdsPricer::default();
        let (yc, cc) = (yield_curve(), credit_curve());
        let spread = pricer.par_spread(&cds, &yc, &cc).unwrap();
        assert!(pricer.pv(&cds, &yc, &cc, spread, PriceType::Clean).abs() < 1e-15);
    }

    #[test]
    fn test_accrual_formulas_are_ordered() {
        let cds = cds(Tenor::years(5));
        let (yc, cc) = (yield_curve(), credit_curve());
        let annuity = |formula| {
            AnalyticCdsPricer::new(formula).annuity(&cds, &yc, &cc, PriceType::Dirty)
        };
        let original = annuity(AccrualOnDefault::OriginalIsda);
        let exact = annuity(AccrualOnDefault::Exact);
        let markit = annuity(AccrualOnDefault::MarkitFix);
        assert!(original > exact);
        assert!(markit <= exact);
    }

    #[test]
    fn test_accrued_on_default_leg_adds_to_annuity() {
        let trade = Date::from_ymd(2024, 6, 14).unwrap();
        let factory = CdsAnalyticFactory::new(0.4);
        let with_accrual = factory.make_imm_cds(trade, Tenor::years(5)).unwrap();
        let without_accrual = factory
            .with_pay_accrued_on_default(false)
            .make_imm_cds(trade, Tenor::years(5))
            .unwrap();
        let (yc, cc) = (yield_curve(), credit_curve());

        for formula in [
            AccrualOnDefault::OriginalIsda,
            AccrualOnDefault::MarkitFix,
            AccrualOnDefault::Exact,
        ] {
            let pricer = AnalyticCdsPricer::new(formula);
            assert_eq!(pricer.accrual_on_default(), formula);
            let full = pricer.annuity(&with_accrual, &yc, &cc, PriceType::Dirty);
            let premium_only = pricer.annuity(&without_accrual, &yc, &cc, PriceType::Dirty);
            assert!(full > premium_only);
        }
    }

    #[test]
    fn test_credit_sensitivity_matches_central_difference() {
        let cds = cds(Tenor::years(5));
        let (yc, cc) = (yield_curve(), credit_curve());
        let coupon = 0.01;
        let bump = 1e-6;
        for formula in [
            AccrualOnDefault::OriginalIsda,
            AccrualOnDefault::MarkitFix,
            AccrualOnDefault::Exact,
        ] {
            let pricer = AnalyticCdsPricer::new(formula);
            for node in 0..cc.number_of_knots() {
                let up = cc.with_rate(node, cc.rate_at(node) + bump).unwrap();
                let down = cc.with_rate(node, cc.rate_at(node) - bump).unwrap();
                let fd = (pricer.pv(&cds, &yc, &up, coupon, PriceType::Clean)
                    - pricer.pv(&cds, &yc, &down, coupon, PriceType::Clean))
                    / (2.0 * bump);
                let analytic = pricer
                    .pv_credit_sensitivity(&cds, &yc, &cc, coupon, node)
                    .unwrap();
                assert_relative_eq!(analytic, fd, epsilon = 1e-10, max_relative = 1e-7);

                let fd_protection = (pricer.protection_leg(&cds, &yc, &up)
                    - pricer.protection_leg(&cds, &yc, &down))
                    / (2.0 * bump);
                assert_relative_eq!(
                    pricer
                        .protection_leg_credit_sensitivity(&cds, &yc, &cc, node)
                        .unwrap(),
                    fd_protection,
                    epsilon = 1e-10,
                    max_relative = 1e-7
                );
            }
        }
    }

    #[test]
    fn test_yield_sensitivity_matches_central_difference() {
        let cds = cds(Tenor::years(7));
        let (yc, cc) = (yield_curve(), credit_curve());
        let pricer = AnalyticCdsPricer::default();
        let coupon = 0.05;
        let bump = 1e-6;
        let sensitivities = pricer.pv_yield_sensitivities(&cds, &yc, &cc, coupon);
        for (node, analytic) in sensitivities.iter().enumerate() {
            let up = yc.with_rate(node, yc.rate_at(node) + bump).unwrap();
            let down = yc.with_rate(node, yc.rate_at(node) - bump).unwrap();
            let fd = (pricer.pv(&cds, &up, &cc, coupon, PriceType::Dirty)
                - pricer.pv(&cds, &down, &cc, coupon, PriceType::Dirty))
                / (2.0 * bump);
            assert_relative_eq!(*analytic, fd, epsilon = 1e-10, max_relative = 1e-7);

            let fd_annuity = (pricer.annuity(&cds, &up, &cc, PriceType::Dirty)
                - pricer.annuity(&cds, &down, &cc, PriceType::Dirty))
                / (2.0 * bump);
            assert_relative_eq!(
                pricer
                    .pv_premium_leg_yield_sensitivity(&cds, &yc, &cc, node)
                    .unwrap(),
                fd_annuity,
                epsilon = 1e-10,
                max_relative = 1e-7
            );
        }
    }

    #[test]
    fn test_node_out_of_range() {
        let cds = cds(Tenor::years(1));
        let pricer = AnalyticCdsPricer::default();
        let result = pricer.pv_credit_sensitivity(&cds, &yield_curve(), &credit_curve(), 0.01, 9);
        assert!(matches!(result, Err(CreditError::InvalidArgument { .. })));
    }
}
