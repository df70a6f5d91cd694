//! Parameter sensitivities by bump and reprice.
//!
//! Every scalar parameter of every curve in the provider is shifted in
//! turn and the instrument repriced. This costs one pricing per parameter
//! and is meant for tests and low-frequency risk, not for production
//! sensitivities where an algorithmic route exists.

use std::collections::BTreeSet;
use std::sync::Arc;

use strata_config::SensitivityConfig;
use strata_core::types::{Currency, MultiCurrencyAmount};
use strata_curves::index::{IborIndex, IssuerKey, OvernightIndex, PriceIndex};
use strata_curves::provider::IssuerProvider;
use strata_curves::Curve;

use super::parameter::ParameterSensitivity;
use crate::error::{PricingError, PricingResult};

/// Where a curve sits in the provider.
#[derive(Debug, Clone)]
enum Slot {
    Discount(Currency),
    Ibor(IborIndex),
    Overnight(OvernightIndex),
    PriceIndex(PriceIndex),
    Issuer(IssuerKey),
}

#[derive(Debug, Clone)]
struct Target {
    name: String,
    parameters: usize,
    slot: Slot,
}

/// Finite-difference sensitivity of a pricer to every curve parameter.
///
/// ```rust
/// use std::sync::Arc;
/// use strata_core::types::{Currency, MultiCurrencyAmount};
/// use strata_curves::curves::InterpolatedCurve;
/// use strata_curves::provider::{IssuerProvider, MulticurveProvider};
/// use strata_pricing::sensitivity::ParameterSensitivityFdCalculator;
///
/// let curve = InterpolatedCurve::new("USD", vec![1.0, 5.0], vec![0.01, 0.02]).unwrap();
/// let provider = IssuerProvider::new(
///     MulticurveProvider::default().with_discount_curve(Currency::USD, Arc::new(curve)),
/// );
/// let calculator = ParameterSensitivityFdCalculator::new(1e-7);
/// let sensitivity = calculator
///     .calculate(&provider, |p: &IssuerProvider| {
///         Ok(MultiCurrencyAmount::of(Currency::USD, p.discount_factor(Currency::USD, 1.0)?))
///     })
///     .unwrap();
/// let values = sensitivity.get("USD", Currency::USD).unwrap();
/// assert!((values[0] + (-0.01_f64).exp()).abs() < 1e-6);
/// assert!(values[1].abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSensitivityFdCalculator {
    shift: f64,
}

impl ParameterSensitivityFdCalculator {
    /// A calculator bumping each parameter by `shift`.
    #[must_use]
    pub fn new(shift: f64) -> Self {
        Self { shift }
    }

    /// A calculator using the configured shift.
    #[must_use]
    pub fn from_config(config: &SensitivityConfig) -> Self {
        Self::new(config.shift)
    }

    /// The bump size.
    #[must_use]
    pub fn shift(&self) -> f64 {
        self.shift
    }

    /// `(pricer(bumped) - pricer(provider)) / shift` for every parameter of
    /// every discounting, forward, price-index and issuer curve.
    ///
    /// Entries are keyed by curve name and by each currency the pricer
    /// reports. Curves without parameters are skipped.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidArgument` for a non-positive shift and
    /// propagates pricer failures.
    pub fn calculate<F>(&self, provider: &IssuerProvider, pricer: F) -> PricingResult<ParameterSensitivity>
    where
        F: Fn(&IssuerProvider) -> PricingResult<MultiCurrencyAmount> + Sync,
    {
        if !(self.shift > 0.0) || !self.shift.is_finite() {
            return Err(PricingError::invalid_argument(format!(
                "sensitivity shift must be positive, got {}",
                self.shift
            )));
        }
        let base = pricer(provider)?;

        let mut result = ParameterSensitivity::new();
        for target in targets(provider) {
            if target.parameters == 0 {
                log::trace!("skipping curve {} without parameters", target.name);
                continue;
            }
            log::debug!(
                "bumping {} parameters of curve {} by {}",
                target.parameters,
                target.name,
                self.shift
            );
            let nodes = self.bump_nodes(provider, &target, &pricer, &base)?;
            let currencies: BTreeSet<Currency> =
                nodes.iter().flat_map(MultiCurrencyAmount::currencies).collect();
            for currency in currencies {
                let values = nodes.iter().map(|n| n.amount(currency)).collect();
                result = result.plus_entry(target.name.clone(), currency, values)?;
            }
        }
        Ok(result)
    }

    fn bump_nodes<F>(
        &self,
        provider: &IssuerProvider,
        target: &Target,
        pricer: &F,
        base: &MultiCurrencyAmount,
    ) -> PricingResult<Vec<MultiCurrencyAmount>>
    where
        F: Fn(&IssuerProvider) -> PricingResult<MultiCurrencyAmount> + Sync,
    {
        let node = |index: usize| -> PricingResult<MultiCurrencyAmount> {
            let bumped = bumped_provider(provider, &target.slot, index, self.shift)?;
            Ok(pricer(&bumped)?.minus(base).multiplied_by(1.0 / self.shift))
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            (0..target.parameters).into_par_iter().map(node).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            (0..target.parameters).map(node).collect()
        }
    }
}

impl Default for ParameterSensitivityFdCalculator {
    fn default() -> Self {
        Self::from_config(&SensitivityConfig::default())
    }
}

fn targets(provider: &IssuerProvider) -> Vec<Target> {
    let multicurve = provider.multicurve();
    let rate = |slot: Slot, curve: &Arc<dyn Curve>| Target {
        name: curve.name().to_string(),
        parameters: curve.number_of_parameters(),
        slot,
    };
    let mut targets: Vec<Target> = multicurve
        .discount_curves()
        .map(|(ccy, c)| rate(Slot::Discount(*ccy), c))
        .collect();
    targets.extend(multicurve.ibor_curves().map(|(i, c)| rate(Slot::Ibor(i.clone()), c)));
    targets.extend(
        multicurve
            .overnight_curves()
            .map(|(i, c)| rate(Slot::Overnight(i.clone()), c)),
    );
    targets.extend(multicurve.price_index_curves().map(|(i, c)| Target {
        name: c.name().to_string(),
        parameters: c.number_of_parameters(),
        slot: Slot::PriceIndex(i.clone()),
    }));
    targets.extend(provider.issuer_curves().map(|(k, c)| rate(Slot::Issuer(k.clone()), c)));
    targets
}

fn bumped_provider(
    provider: &IssuerProvider,
    slot: &Slot,
    index: usize,
    shift: f64,
) -> PricingResult<IssuerProvider> {
    let multicurve = provider.multicurve();
    Ok(match slot {
        Slot::Discount(ccy) => {
            let curve = multicurve.discount_curve(*ccy)?.with_parameter_shift(index, shift)?;
            provider.with_discount_curve(*ccy, curve)
        }
        Slot::Ibor(idx) => {
            let curve = multicurve.ibor_curve(idx)?.with_parameter_shift(index, shift)?;
            provider.with_multicurve(multicurve.with_ibor_curve(idx.clone(), curve))
        }
        Slot::Overnight(idx) => {
            let curve = multicurve.overnight_curve(idx)?.with_parameter_shift(index, shift)?;
            provider.with_multicurve(multicurve.with_overnight_curve(idx.clone(), curve))
        }
        Slot::PriceIndex(idx) => {
            let curve = multicurve
                .price_index_curve(idx)?
                .with_parameter_shift(index, shift)?;
            provider.with_multicurve(multicurve.with_price_index_curve(idx.clone(), curve))
        }
        Slot::Issuer(key) => {
            let curve = provider.issuer_curve(key)?.with_parameter_shift(index, shift)?;
            provider.with_issuer_curve(key.clone(), curve)
        }
    })
}
