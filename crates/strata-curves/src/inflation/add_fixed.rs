//! Market price-index curve with a deterministic adjustment.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::CurveResult;
use crate::traits::{PriceIndexCurve, ScalarCurve};

/// A market price-index curve plus a fixed adjustment curve.
///
/// The adjustment (typically seasonality) is not calibrated, so it adds
/// no parameters: the count and the sensitivities are the market curve's.
#[derive(Debug, Clone)]
pub struct PriceIndexAddFixedCurve {
    name: String,
    market: Arc<dyn PriceIndexCurve>,
    fixed: Arc<dyn ScalarCurve>,
}

impl PriceIndexAddFixedCurve {
    /// Combines `market` with the additive `fixed` curve.
    pub fn new(
        name: impl Into<String>,
        market: Arc<dyn PriceIndexCurve>,
        fixed: Arc<dyn ScalarCurve>,
    ) -> Self {
        Self {
            name: name.into(),
            market,
            fixed,
        }
    }

    /// The calibrated market curve.
    #[must_use]
    pub fn market_curve(&self) -> &Arc<dyn PriceIndexCurve> {
        &self.market
    }
}

impl PriceIndexCurve for PriceIndexAddFixedCurve {
    fn name(&self) -> &str {
        &self.name
    }

    fn price_index(&self, t: f64) -> f64 {
        self.market.price_index(t) + self.fixed.value(t)
    }

    fn number_of_parameters(&self) -> usize {
        self.market.number_of_parameters()
    }

    fn price_index_parameter_sensitivity(&self, t: f64) -> Vec<f64> {
        self.market.price_index_parameter_sensitivity(t)
    }

    fn underlying_curve_names(&self) -> Vec<String> {
        let mut names = vec![self.market.name().to_string()];
        names.extend(self.market.underlying_curve_names());
        names
    }

    fn number_of_intrinsic_parameters(&self, excluded: &BTreeSet<String>) -> usize {
        if excluded.contains(self.market.name()) {
            0
        } else {
            self.market.number_of_intrinsic_parameters(excluded)
        }
    }

    fn with_parameter_shift(
        &self,
        index: usize,
        shift: f64,
    ) -> CurveResult<Arc<dyn PriceIndexCurve>> {
        Ok(Arc::new(Self {
            name: self.name.clone(),
            market: self.market.with_parameter_shift(index, shift)?,
            fixed: self.fixed.clone(),
        }))
    }
}
