//! Present values by discounting.
//!
//! Bond and bill flows are discounted on the issuer curve of the security;
//! settlement payments and funding legs on the discounting curve of their
//! currency. Term rate coupons are projected from the index forward curve.
//! Flows with a negative payment time are already paid and are worth zero.

use strata_core::types::MultiCurrencyAmount;
use strata_curves::provider::IssuerProvider;

use crate::derivative::{
    BillSecurity, BillTransaction, BondFixedSecurity, BondFuturesSecurity, BondFuturesTransaction,
    BondTotalReturnSwap, Coupon, FundingLeg, InstrumentDerivative, PaymentFixed,
};
use crate::error::{PricingError, PricingResult};
use crate::sensitivity::MulticurveSensitivity;

/// Present value of any supported instrument.
///
/// # Errors
///
/// Returns `PricingError::MissingCurve` when a curve the instrument needs is
/// absent, and propagates the errors of the instrument pricers.
pub fn present_value(
    derivative: &InstrumentDerivative,
    provider: &IssuerProvider,
) -> PricingResult<MultiCurrencyAmount> {
    match derivative {
        InstrumentDerivative::PaymentFixed(p) => present_value_payment(p, provider),
        InstrumentDerivative::BondFixedSecurity(b) => present_value_bond_security(b, provider),
        InstrumentDerivative::BondTransaction(b) => {
            let security = present_value_bond_security(&b.security, provider)?;
            let settlement = match &b.settlement {
                Some(p) => present_value_payment(p, provider)?,
                None => MultiCurrencyAmount::new(),
            };
            Ok(security.multiplied_by(b.quantity).plus(&settlement))
        }
        InstrumentDerivative::BillSecurity(b) => present_value_bill_security(b, provider),
        InstrumentDerivative::BillTransaction(b) => present_value_bill_transaction(b, provider),
        InstrumentDerivative::BondFuturesTransaction(f) => {
            present_value_futures_transaction(f, provider)
        }
        InstrumentDerivative::BondTotalReturnSwap(trs) => present_value_trs(trs, provider),
    }
}

/// A fixed payment discounted on its currency curve.
pub fn present_value_payment(
    payment: &PaymentFixed,
    provider: &IssuerProvider,
) -> PricingResult<MultiCurrencyAmount> {
    if payment.payment_time < 0.0 {
        return Ok(MultiCurrencyAmount::new());
    }
    let df = provider.discount_factor(payment.currency, payment.payment_time)?;
    Ok(MultiCurrencyAmount::of(payment.currency, payment.amount * df))
}

/// Value today of the flows a bond holder receives after settlement.
pub fn present_value_bond_security(
    bond: &BondFixedSecurity,
    provider: &IssuerProvider,
) -> PricingResult<MultiCurrencyAmount> {
    let curve = provider.issuer_curve(&bond.issuer)?;
    let pv: f64 = bond
        .cash_flows()
        .filter(|cf| cf.payment_time >= 0.0)
        .map(|cf| cf.amount * curve.discount_factor(cf.payment_time))
        .sum();
    Ok(MultiCurrencyAmount::of(bond.currency(), pv))
}

/// Dirty price per unit notional for settlement at the bond's settlement time.
pub fn dirty_price_from_curves(
    bond: &BondFixedSecurity,
    provider: &IssuerProvider,
) -> PricingResult<f64> {
    let pv = present_value_bond_security(bond, provider)?.amount(bond.currency());
    let df_settle = provider.issuer_discount_factor(&bond.issuer, bond.settlement_time.max(0.0))?;
    Ok(pv / df_settle / bond.notional)
}

/// Clean price per unit notional for settlement at the bond's settlement time.
pub fn clean_price_from_curves(
    bond: &BondFixedSecurity,
    provider: &IssuerProvider,
) -> PricingResult<f64> {
    Ok(dirty_price_from_curves(bond, provider)? - bond.accrued_interest / bond.notional)
}

/// Value today of a bill's repayment.
pub fn present_value_bill_security(
    bill: &BillSecurity,
    provider: &IssuerProvider,
) -> PricingResult<MultiCurrencyAmount> {
    if bill.end_time < 0.0 {
        return Ok(MultiCurrencyAmount::new());
    }
    let df = provider.issuer_discount_factor(&bill.issuer, bill.end_time)?;
    Ok(MultiCurrencyAmount::of(bill.currency(), bill.notional * df))
}

/// Bill position plus its settlement payment.
pub fn present_value_bill_transaction(
    bill: &BillTransaction,
    provider: &IssuerProvider,
) -> PricingResult<MultiCurrencyAmount> {
    let security = present_value_bill_security(&bill.security, provider)?;
    let settlement = match &bill.settlement {
        Some(p) => present_value_payment(p, provider)?,
        None => MultiCurrencyAmount::new(),
    };
    Ok(security.multiplied_by(bill.quantity).plus(&settlement))
}

/// Futures price: the cheapest deliverable's forward clean price over its
/// conversion factor.
///
/// # Errors
///
/// Returns `PricingError::InvalidArgument` for an empty basket.
pub fn futures_price(
    futures: &BondFuturesSecurity,
    provider: &IssuerProvider,
) -> PricingResult<f64> {
    let mut cheapest: Option<f64> = None;
    for (bond, cf) in futures.basket.iter().zip(&futures.conversion_factors) {
        let price = clean_price_from_curves(bond, provider)? / cf;
        cheapest = Some(cheapest.map_or(price, |c| c.min(price)));
    }
    cheapest.ok_or_else(|| PricingError::invalid_argument("delivery basket is empty"))
}

/// Margin value of a futures position: `(price - reference) * notional * quantity`.
pub fn present_value_futures_transaction(
    futures: &BondFuturesTransaction,
    provider: &IssuerProvider,
) -> PricingResult<MultiCurrencyAmount> {
    let contract = &futures.underlying;
    let price = futures_price(contract, provider)?;
    Ok(MultiCurrencyAmount::of(
        contract.currency,
        (price - futures.reference_price) * contract.notional * futures.quantity,
    ))
}

/// Asset leg of a total return swap, in the bond currency.
pub fn present_value_trs_asset_leg(
    trs: &BondTotalReturnSwap,
    provider: &IssuerProvider,
) -> PricingResult<MultiCurrencyAmount> {
    Ok(present_value_bond_security(&trs.asset, provider)?.multiplied_by(trs.asset_quantity))
}

/// Funding leg of a total return swap, in the leg currency.
pub fn present_value_funding_leg(
    leg: &FundingLeg,
    provider: &IssuerProvider,
) -> PricingResult<MultiCurrencyAmount> {
    let notional = leg
        .notional_payments
        .iter()
        .try_fold(MultiCurrencyAmount::new(), |total, p| {
            Ok::<_, PricingError>(total.plus(&present_value_payment(p, provider)?))
        })?;
    leg.coupons.iter().try_fold(notional, |total, coupon| {
        Ok(total.plus(&present_value_coupon(coupon, provider)?))
    })
}

/// Present value of a fixed or term rate coupon.
pub fn present_value_coupon(
    coupon: &Coupon,
    provider: &IssuerProvider,
) -> PricingResult<MultiCurrencyAmount> {
    match coupon {
        Coupon::Fixed(c) => present_value_payment(&c.to_payment(), provider),
        Coupon::Ibor(c) => {
            if c.payment_time < 0.0 {
                return Ok(MultiCurrencyAmount::new());
            }
            let forward = provider.multicurve().ibor_forward_rate(
                &c.index,
                c.fixing_period_start_time,
                c.fixing_period_end_time,
                c.fixing_year_fraction,
            )?;
            let df = provider.discount_factor(c.currency, c.payment_time)?;
            let amount = c.notional * (forward + c.spread) * c.payment_year_fraction;
            Ok(MultiCurrencyAmount::of(c.currency, amount * df))
        }
    }
}

/// Both legs of a total return swap, each in its own currency.
pub fn present_value_trs(
    trs: &BondTotalReturnSwap,
    provider: &IssuerProvider,
) -> PricingResult<MultiCurrencyAmount> {
    let asset = present_value_trs_asset_leg(trs, provider)?;
    let funding = present_value_funding_leg(&trs.funding, provider)?;
    Ok(asset.plus(&funding))
}

/// Sensitivity of the present value to the zero rates of the curves used.
///
/// # Errors
///
/// Returns `PricingError::Unsupported` for futures and total return swaps.
pub fn present_value_curve_sensitivity(
    derivative: &InstrumentDerivative,
    provider: &IssuerProvider,
) -> PricingResult<MulticurveSensitivity> {
    match derivative {
        InstrumentDerivative::PaymentFixed(p) => payment_sensitivity(p, provider),
        InstrumentDerivative::BondFixedSecurity(b) => bond_sensitivity(b, provider),
        InstrumentDerivative::BondTransaction(b) => {
            let security = bond_sensitivity(&b.security, provider)?.multiplied_by(b.quantity);
            match &b.settlement {
                Some(p) => Ok(security.plus(&payment_sensitivity(p, provider)?)),
                None => Ok(security),
            }
        }
        InstrumentDerivative::BillSecurity(b) => bill_sensitivity(b, provider),
        InstrumentDerivative::BillTransaction(b) => {
            let security = bill_sensitivity(&b.security, provider)?.multiplied_by(b.quantity);
            match &b.settlement {
                Some(p) => Ok(security.plus(&payment_sensitivity(p, provider)?)),
                None => Ok(security),
            }
        }
        InstrumentDerivative::BondFuturesTransaction(_) => Err(PricingError::unsupported(
            "curve sensitivity of bond futures",
        )),
        InstrumentDerivative::BondTotalReturnSwap(_) => Err(PricingError::unsupported(
            "curve sensitivity of bond total return swaps",
        )),
    }
}

fn payment_sensitivity(
    payment: &PaymentFixed,
    provider: &IssuerProvider,
) -> PricingResult<MulticurveSensitivity> {
    if payment.payment_time < 0.0 {
        return Ok(MulticurveSensitivity::new());
    }
    let curve = provider.multicurve().discount_curve(payment.currency)?;
    let t = payment.payment_time;
    Ok(MulticurveSensitivity::of(
        curve.name(),
        vec![(t, -t * payment.amount * curve.discount_factor(t))],
    ))
}

fn bond_sensitivity(
    bond: &BondFixedSecurity,
    provider: &IssuerProvider,
) -> PricingResult<MulticurveSensitivity> {
    let curve = provider.issuer_curve(&bond.issuer)?;
    let points = bond
        .cash_flows()
        .filter(|cf| cf.payment_time >= 0.0)
        .map(|cf| {
            let t = cf.payment_time;
            (t, -t * cf.amount * curve.discount_factor(t))
        })
        .collect();
    Ok(MulticurveSensitivity::of(curve.name(), points))
}

fn bill_sensitivity(
    bill: &BillSecurity,
    provider: &IssuerProvider,
) -> PricingResult<MulticurveSensitivity> {
    if bill.end_time < 0.0 {
        return Ok(MulticurveSensitivity::new());
    }
    let curve = provider.issuer_curve(&bill.issuer)?;
    let t = bill.end_time;
    Ok(MulticurveSensitivity::of(
        curve.name(),
        vec![(t, -t * bill.notional * curve.discount_factor(t))],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivative::BondTransaction;
    use approx::assert_relative_eq;
    use std::sync::Arc;
    use strata_core::types::{Currency, FxMatrix};
    use strata_curves::curves::ConstantCurve;
    use strata_curves::index::IssuerKey;
    use strata_curves::provider::MulticurveProvider;

    fn ust() -> IssuerKey {
        IssuerKey::new("UST", Currency::USD)
    }

    fn provider() -> IssuerProvider {
        let multicurve = MulticurveProvider::new(FxMatrix::new(Currency::USD))
            .with_discount_curve(Currency::USD, Arc::new(ConstantCurve::new("USD-OIS", 0.01)));
        IssuerProvider::new(multicurve)
            .with_issuer_curve(ust(), Arc::new(ConstantCurve::new("UST", 0.02)))
    }

    fn bond() -> BondFixedSecurity {
        BondFixedSecurity {
            issuer: ust(),
            nominal: vec![PaymentFixed::new(Currency::USD, 2.0, 100.0)],
            coupons: vec![
                crate::derivative::CouponFixed::new(Currency::USD, 1.0, 1.0, 100.0, 0.03),
                crate::derivative::CouponFixed::new(Currency::USD, 2.0, 1.0, 100.0, 0.03),
            ],
            settlement_time: 0.0,
            accrued_interest: 0.0,
            notional: 100.0,
        }
    }

    #[test]
    fn test_bond_discounts_on_issuer_curve() {
        let pv = present_value_bond_security(&bond(), &provider()).unwrap();
        let expected = 3.0 * (-0.02_f64).exp() + 103.0 * (-0.04_f64).exp();
        assert_relative_eq!(pv.amount(Currency::USD), expected, epsilon = 1e-12);
        assert_relative_eq!(
            clean_price_from_curves(&bond(), &provider()).unwrap(),
            expected / 100.0,
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_settlement_on_discount_curve() {
        let trade = BondTransaction {
            security: bond(),
            quantity: 2.0,
            settlement: Some(PaymentFixed::new(Currency::USD, 0.5, -200.0)),
        };
        let pv = present_value(&trade.into(), &provider()).unwrap();
        let security = 3.0 * (-0.02_f64).exp() + 103.0 * (-0.04_f64).exp();
        let expected = 2.0 * security - 200.0 * (-0.005_f64).exp();
        assert_relative_eq!(pv.amount(Currency::USD), expected, epsilon = 1e-10);
    }

    #[test]
    fn test_missing_issuer_curve() {
        let mut b = bond();
        b.issuer = IssuerKey::new("BUND", Currency::EUR);
        let err = present_value(&b.into(), &provider());
        assert!(matches!(err, Err(PricingError::MissingCurve { .. })));
    }

    #[test]
    fn test_futures_price_is_cheapest_to_deliver() {
        let mut cheap = bond();
        cheap.settlement_time = 0.25;
        let mut rich = cheap.clone();
        rich.coupons.iter_mut().for_each(|c| c.rate = 0.06);
        let futures = BondFuturesSecurity {
            currency: Currency::USD,
            last_trading_time: 0.2,
            delivery_time: 0.25,
            basket: vec![rich.clone(), cheap.clone()],
            conversion_factors: vec![1.0, 1.0],
            notional: 100.0,
        };
        let p = provider();
        let price = futures_price(&futures, &p).unwrap();
        assert_relative_eq!(price, clean_price_from_curves(&cheap, &p).unwrap(), epsilon = 1e-15);
        assert!(price < clean_price_from_curves(&rich, &p).unwrap());
    }

    #[test]
    fn test_curve_sensitivity_of_bond() {
        let sens = present_value_curve_sensitivity(&bond().into(), &provider()).unwrap();
        let points = sens.get("UST").unwrap();
        assert_eq!(points.len(), 3);
        assert_relative_eq!(points[0].1, -3.0 * (-0.02_f64).exp(), epsilon = 1e-12);

        let trs_err = present_value_curve_sensitivity(
            &BondTotalReturnSwap {
                effective_time: 0.0,
                termination_time: 1.0,
                asset: bond(),
                asset_quantity: 1.0,
                funding: FundingLeg {
                    currency: Currency::USD,
                    notional_payments: Vec::new(),
                    coupons: Vec::new(),
                },
            }
            .into(),
            &provider(),
        );
        assert!(matches!(trs_err, Err(PricingError::Unsupported { .. })));
    }
}
