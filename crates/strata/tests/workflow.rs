//! Configuration-driven workflows through the facade.

use std::sync::Arc;

use approx::assert_relative_eq;
use strata::prelude::*;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

const SETTINGS: &str = r#"
[calibration]
tolerance = 1e-14
max_iterations = 60
accrual_on_default = "markit_fix"

[sensitivity]
shift = 1e-7

[horizon]
rolldown = "forward"
normalise_direction = true
"#;

#[test]
fn credit_curve_from_configured_builder() {
    let config = StrataConfig::from_toml_str(SETTINGS).unwrap();
    let builder = SimpleCreditCurveBuilder::new().with_config(&config.calibration);

    let trade = date(2024, 6, 14);
    let factory = CdsAnalyticFactory::new(0.4);
    let tenors = [Tenor::years(1), Tenor::years(3), Tenor::years(5)];
    let cds: Vec<_> = tenors
        .iter()
        .map(|t| factory.make_imm_cds(trade, *t).unwrap())
        .collect();
    let spreads = [0.006, 0.009, 0.012];
    let yc = IsdaYieldCurve::flat(0.03).unwrap();

    let cc = builder.calibrate(&cds, &spreads, &yc).unwrap();
    for (c, s) in cds.iter().zip(spreads) {
        let pv = builder.pricer().pv(c, &yc, &cc, s, PriceType::Clean);
        assert!(pv.abs() < 1e-12);
    }
}

#[test]
fn configured_horizon_and_sensitivity() {
    let config = StrataConfig::from_toml_str(SETTINGS).unwrap();
    let ust = IssuerKey::new("UST", Currency::USD);
    let provider = IssuerProvider::new(MulticurveProvider::default().with_discount_curve(
        Currency::USD,
        Arc::new(ConstantCurve::new("USD-OIS", 0.01)),
    ))
    .with_issuer_curve(
        ust.clone(),
        Arc::new(InterpolatedCurve::new("UST", vec![1.0, 10.0], vec![0.015, 0.03]).unwrap()),
    );
    let bill = BillSecurityDefinition::new(ust, date(2026, 6, 1), 1.0);
    let trade = BillTransactionDefinition::new(bill, 1.0, date(2024, 6, 5), -0.95);
    let today = date(2024, 6, 12);

    let forward = BillTransactionHorizon
        .theta_with_config(
            &trade,
            today,
            &provider,
            1,
            &WeekendCalendar,
            &HorizonData::empty(),
            &config.horizon,
        )
        .unwrap();
    let backward = BillTransactionHorizon
        .theta_with_config(
            &trade,
            today,
            &provider,
            -1,
            &WeekendCalendar,
            &HorizonData::empty(),
            &config.horizon,
        )
        .unwrap();
    // normalised: both directions report a day of accretion
    assert!(forward.amount(Currency::USD) > 0.0);
    assert!(backward.amount(Currency::USD) > 0.0);

    let derivative: InstrumentDerivative = trade.to_derivative(today).unwrap().into();
    let fd = ParameterSensitivityFdCalculator::from_config(&config.sensitivity)
        .calculate(&provider, |p| present_value(&derivative, p))
        .unwrap();
    let block = fd.get("UST", Currency::USD).unwrap();
    assert_eq!(block.len(), 2);
    let total: f64 = block.iter().sum();
    let t: f64 = 719.0 / 365.0;
    let rate = 0.015 + 0.015 * (t - 1.0) / 9.0;
    assert_relative_eq!(total, -t * (-rate * t).exp(), epsilon = 1e-5);
}
