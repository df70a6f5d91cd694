//! Market data providers.
//!
//! A provider is an immutable snapshot mapping currencies, indices and
//! issuers to curves, plus the FX rates needed to aggregate results. Every
//! `with_*` method returns a new provider with one entry replaced; the
//! original is untouched, so horizon and bump calculators can derive as
//! many scenarios from one snapshot as they need.

use std::collections::BTreeMap;
use std::sync::Arc;

use strata_core::types::{Currency, FxMatrix};

use crate::error::{CurveError, CurveResult};
use crate::index::{IborIndex, IssuerKey, OvernightIndex, PriceIndex};
use crate::traits::{Curve, PriceIndexCurve};

/// Discounting, forward and price-index curves for several currencies.
///
/// ```rust
/// use std::sync::Arc;
/// use strata_core::types::Currency;
/// use strata_curves::curves::ConstantCurve;
/// use strata_curves::provider::MulticurveProvider;
///
/// let provider = MulticurveProvider::default()
///     .with_discount_curve(Currency::USD, Arc::new(ConstantCurve::new("USD-OIS", 0.01)));
/// let df = provider.discount_factor(Currency::USD, 1.0).unwrap();
/// assert!((df - (-0.01_f64).exp()).abs() < 1e-15);
/// assert!(provider.discount_factor(Currency::EUR, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MulticurveProvider {
    discount_curves: BTreeMap<Currency, Arc<dyn Curve>>,
    ibor_curves: BTreeMap<IborIndex, Arc<dyn Curve>>,
    overnight_curves: BTreeMap<OvernightIndex, Arc<dyn Curve>>,
    price_index_curves: BTreeMap<PriceIndex, Arc<dyn PriceIndexCurve>>,
    fx_matrix: FxMatrix,
}

impl MulticurveProvider {
    /// An empty provider with the given FX rates.
    #[must_use]
    pub fn new(fx_matrix: FxMatrix) -> Self {
        Self {
            fx_matrix,
            ..Self::default()
        }
    }

    /// A provider with the discounting curve for `currency` set to `curve`.
    #[must_use]
    pub fn with_discount_curve(&self, currency: Currency, curve: Arc<dyn Curve>) -> Self {
        let mut provider = self.clone();
        provider.discount_curves.insert(currency, curve);
        provider
    }

    /// A provider with the forward curve of `index` set to `curve`.
    #[must_use]
    pub fn with_ibor_curve(&self, index: IborIndex, curve: Arc<dyn Curve>) -> Self {
        let mut provider = self.clone();
        provider.ibor_curves.insert(index, curve);
        provider
    }

    /// A provider with the forward curve of the overnight `index` set to `curve`.
    #[must_use]
    pub fn with_overnight_curve(&self, index: OvernightIndex, curve: Arc<dyn Curve>) -> Self {
        let mut provider = self.clone();
        provider.overnight_curves.insert(index, curve);
        provider
    }

    /// A provider with the curve of the price `index` set to `curve`.
    #[must_use]
    pub fn with_price_index_curve(
        &self,
        index: PriceIndex,
        curve: Arc<dyn PriceIndexCurve>,
    ) -> Self {
        let mut provider = self.clone();
        provider.price_index_curves.insert(index, curve);
        provider
    }

    /// A provider with different FX rates.
    #[must_use]
    pub fn with_fx_matrix(&self, fx_matrix: FxMatrix) -> Self {
        let mut provider = self.clone();
        provider.fx_matrix = fx_matrix;
        provider
    }

    /// The discounting curve of `currency`.
    pub fn discount_curve(&self, currency: Currency) -> CurveResult<&Arc<dyn Curve>> {
        self.discount_curves
            .get(&currency)
            .ok_or_else(|| CurveError::missing_curve(format!("{currency} discounting")))
    }

    /// The forward curve of `index`.
    pub fn ibor_curve(&self, index: &IborIndex) -> CurveResult<&Arc<dyn Curve>> {
        self.ibor_curves
            .get(index)
            .ok_or_else(|| CurveError::missing_curve(format!("{index} forward")))
    }

    /// The forward curve of the overnight `index`.
    pub fn overnight_curve(&self, index: &OvernightIndex) -> CurveResult<&Arc<dyn Curve>> {
        self.overnight_curves
            .get(index)
            .ok_or_else(|| CurveError::missing_curve(format!("{index} overnight")))
    }

    /// The curve of the price `index`.
    pub fn price_index_curve(&self, index: &PriceIndex) -> CurveResult<&Arc<dyn PriceIndexCurve>> {
        self.price_index_curves
            .get(index)
            .ok_or_else(|| CurveError::missing_curve(format!("{index} price index")))
    }

    /// The FX rates.
    #[must_use]
    pub fn fx_matrix(&self) -> &FxMatrix {
        &self.fx_matrix
    }

    /// Discount factor to `t` in `currency`.
    pub fn discount_factor(&self, currency: Currency, t: f64) -> CurveResult<f64> {
        Ok(self.discount_curve(currency)?.discount_factor(t))
    }

    /// Simply compounded forward of `index` between `start` and `end`.
    ///
    /// `accrual` is the index year fraction of the period.
    pub fn ibor_forward_rate(
        &self,
        index: &IborIndex,
        start: f64,
        end: f64,
        accrual: f64,
    ) -> CurveResult<f64> {
        simple_forward(self.ibor_curve(index)?.as_ref(), start, end, accrual)
    }

    /// Simply compounded overnight forward between `start` and `end`.
    pub fn overnight_forward_rate(
        &self,
        index: &OvernightIndex,
        start: f64,
        end: f64,
        accrual: f64,
    ) -> CurveResult<f64> {
        simple_forward(self.overnight_curve(index)?.as_ref(), start, end, accrual)
    }

    /// Projected level of the price `index` at `t`.
    pub fn price_index(&self, index: &PriceIndex, t: f64) -> CurveResult<f64> {
        Ok(self.price_index_curve(index)?.price_index(t))
    }

    /// Discounting curves by currency.
    pub fn discount_curves(&self) -> impl Iterator<Item = (&Currency, &Arc<dyn Curve>)> {
        self.discount_curves.iter()
    }

    /// Forward curves by ibor index.
    pub fn ibor_curves(&self) -> impl Iterator<Item = (&IborIndex, &Arc<dyn Curve>)> {
        self.ibor_curves.iter()
    }

    /// Forward curves by overnight index.
    pub fn overnight_curves(&self) -> impl Iterator<Item = (&OvernightIndex, &Arc<dyn Curve>)> {
        self.overnight_curves.iter()
    }

    /// Price-index curves by index.
    pub fn price_index_curves(
        &self,
    ) -> impl Iterator<Item = (&PriceIndex, &Arc<dyn PriceIndexCurve>)> {
        self.price_index_curves.iter()
    }

    /// Looks up a rate curve (discounting or forward) by its name.
    #[must_use]
    pub fn curve_by_name(&self, name: &str) -> Option<&Arc<dyn Curve>> {
        self.discount_curves
            .values()
            .chain(self.ibor_curves.values())
            .chain(self.overnight_curves.values())
            .find(|c| c.name() == name)
    }

    /// Names of every curve in the provider, without duplicates.
    #[must_use]
    pub fn curve_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .discount_curves
            .values()
            .chain(self.ibor_curves.values())
            .chain(self.overnight_curves.values())
            .map(|c| c.name().to_string())
            .chain(self.price_index_curves.values().map(|c| c.name().to_string()))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// A provider whose rate curves are replaced by `f(curve)`.
    ///
    /// Price-index curves and FX rates are kept.
    #[must_use]
    pub fn map_curves(&self, f: impl Fn(&Arc<dyn Curve>) -> Arc<dyn Curve>) -> Self {
        Self {
            discount_curves: self.discount_curves.iter().map(|(k, c)| (*k, f(c))).collect(),
            ibor_curves: self.ibor_curves.iter().map(|(k, c)| (k.clone(), f(c))).collect(),
            overnight_curves: self
                .overnight_curves
                .iter()
                .map(|(k, c)| (k.clone(), f(c)))
                .collect(),
            price_index_curves: self.price_index_curves.clone(),
            fx_matrix: self.fx_matrix.clone(),
        }
    }
}

fn simple_forward(curve: &dyn Curve, start: f64, end: f64, accrual: f64) -> CurveResult<f64> {
    if !(accrual > 0.0) {
        return Err(CurveError::invalid_argument(format!(
            "forward accrual factor must be positive, got {accrual}"
        )));
    }
    Ok((curve.discount_factor(start) / curve.discount_factor(end) - 1.0) / accrual)
}

/// A multicurve provider plus issuer-specific discounting curves.
#[derive(Debug, Clone, Default)]
pub struct IssuerProvider {
    multicurve: MulticurveProvider,
    issuer_curves: BTreeMap<IssuerKey, Arc<dyn Curve>>,
}

impl IssuerProvider {
    /// Wraps a multicurve provider with no issuer curves.
    #[must_use]
    pub fn new(multicurve: MulticurveProvider) -> Self {
        Self {
            multicurve,
            issuer_curves: BTreeMap::new(),
        }
    }

    /// The underlying multicurve provider.
    #[must_use]
    pub fn multicurve(&self) -> &MulticurveProvider {
        &self.multicurve
    }

    /// A provider with the multicurve part replaced.
    #[must_use]
    pub fn with_multicurve(&self, multicurve: MulticurveProvider) -> Self {
        Self {
            multicurve,
            issuer_curves: self.issuer_curves.clone(),
        }
    }

    /// A provider with the curve of `key` set to `curve`.
    #[must_use]
    pub fn with_issuer_curve(&self, key: IssuerKey, curve: Arc<dyn Curve>) -> Self {
        let mut provider = self.clone();
        provider.issuer_curves.insert(key, curve);
        provider
    }

    /// A provider with the discounting curve of `currency` replaced.
    #[must_use]
    pub fn with_discount_curve(&self, currency: Currency, curve: Arc<dyn Curve>) -> Self {
        self.with_multicurve(self.multicurve.with_discount_curve(currency, curve))
    }

    /// The issuer curve for `key`.
    pub fn issuer_curve(&self, key: &IssuerKey) -> CurveResult<&Arc<dyn Curve>> {
        self.issuer_curves
            .get(key)
            .ok_or_else(|| CurveError::missing_curve(format!("{key} issuer")))
    }

    /// Discount factor to `t` on the issuer curve of `key`.
    pub fn issuer_discount_factor(&self, key: &IssuerKey, t: f64) -> CurveResult<f64> {
        Ok(self.issuer_curve(key)?.discount_factor(t))
    }

    /// Discount factor to `t` on the discounting curve of `currency`.
    pub fn discount_factor(&self, currency: Currency, t: f64) -> CurveResult<f64> {
        self.multicurve.discount_factor(currency, t)
    }

    /// Issuer curves by key.
    pub fn issuer_curves(&self) -> impl Iterator<Item = (&IssuerKey, &Arc<dyn Curve>)> {
        self.issuer_curves.iter()
    }

    /// The FX rates.
    #[must_use]
    pub fn fx_matrix(&self) -> &FxMatrix {
        self.multicurve.fx_matrix()
    }

    /// Looks up any rate curve, issuer curves included, by name.
    #[must_use]
    pub fn curve_by_name(&self, name: &str) -> Option<&Arc<dyn Curve>> {
        self.multicurve
            .curve_by_name(name)
            .or_else(|| self.issuer_curves.values().find(|c| c.name() == name))
    }

    /// A provider with every rate curve, issuer curves included, replaced by `f(curve)`.
    #[must_use]
    pub fn map_curves(&self, f: impl Fn(&Arc<dyn Curve>) -> Arc<dyn Curve>) -> Self {
        Self {
            multicurve: self.multicurve.map_curves(&f),
            issuer_curves: self.issuer_curves.iter().map(|(k, c)| (k.clone(), f(c))).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::ConstantCurve;
    use approx::assert_relative_eq;
    use strata_core::daycounts::DayCount;
    use strata_core::types::Tenor;

    fn euribor() -> IborIndex {
        IborIndex::new("EURIBOR6M", Currency::EUR, Tenor::months(6), DayCount::Act360)
    }

    #[test]
    fn test_with_is_pure() {
        let base = MulticurveProvider::default()
            .with_discount_curve(Currency::EUR, Arc::new(ConstantCurve::new("EUR-OIS", 0.01)));
        let bumped =
            base.with_discount_curve(Currency::EUR, Arc::new(ConstantCurve::new("EUR-OIS", 0.02)));

        assert_relative_eq!(base.discount_factor(Currency::EUR, 1.0).unwrap(), (-0.01_f64).exp());
        assert_relative_eq!(bumped.discount_factor(Currency::EUR, 1.0).unwrap(), (-0.02_f64).exp());
    }

    #[test]
    fn test_forward_rate() {
        let provider = MulticurveProvider::default()
            .with_ibor_curve(euribor(), Arc::new(ConstantCurve::new("EUR-6M", 0.03)));
        let rate = provider.ibor_forward_rate(&euribor(), 1.0, 1.5, 0.5).unwrap();
        assert_relative_eq!(rate, ((0.015_f64).exp() - 1.0) / 0.5, epsilon = 1e-14);
        assert!(provider.ibor_forward_rate(&euribor(), 1.0, 1.5, 0.0).is_err());
    }

    #[test]
    fn test_missing_curve() {
        let provider = IssuerProvider::default();
        let key = IssuerKey::new("UST", Currency::USD);
        assert!(matches!(
            provider.issuer_discount_factor(&key, 1.0),
            Err(CurveError::MissingCurve { .. })
        ));
    }

    #[test]
    fn test_issuer_provider_lookup_and_map() {
        let key = IssuerKey::new("UST", Currency::USD);
        let provider = IssuerProvider::new(
            MulticurveProvider::default()
                .with_discount_curve(Currency::USD, Arc::new(ConstantCurve::new("USD-OIS", 0.01))),
        )
        .with_issuer_curve(key.clone(), Arc::new(ConstantCurve::new("UST", 0.02)));

        assert!(provider.curve_by_name("UST").is_some());
        assert!(provider.curve_by_name("USD-OIS").is_some());
        assert_eq!(provider.multicurve().curve_names(), vec!["USD-OIS"]);

        let shifted = provider.map_curves(|c| {
            Arc::new(ConstantCurve::new(c.name(), c.interest_rate(1.0) + 0.01)) as Arc<dyn Curve>
        });
        assert_relative_eq!(shifted.issuer_curve(&key).unwrap().interest_rate(1.0), 0.03);
        assert_relative_eq!(
            shifted.discount_factor(Currency::USD, 1.0).unwrap(),
            (-0.02_f64).exp(),
            epsilon = 1e-15
        );
    }
}
