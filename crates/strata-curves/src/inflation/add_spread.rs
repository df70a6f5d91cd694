//! Sum or difference of price-index curves.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::{CurveError, CurveResult};
use crate::traits::{locate_parameter, PriceIndexCurve};

/// Index level of the first curve plus (or minus) the levels of the others.
///
/// Parameters are concatenated in curve order; blocks after the first carry
/// the sign.
#[derive(Debug, Clone)]
pub struct PriceIndexAddSpreadCurve {
    name: String,
    subtract: bool,
    curves: Vec<Arc<dyn PriceIndexCurve>>,
}

impl PriceIndexAddSpreadCurve {
    /// Creates the combinator.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidArgument` if `curves` is empty.
    pub fn new(
        name: impl Into<String>,
        subtract: bool,
        curves: Vec<Arc<dyn PriceIndexCurve>>,
    ) -> CurveResult<Self> {
        let name = name.into();
        if curves.is_empty() {
            return Err(CurveError::invalid_argument(format!(
                "price index spread curve '{name}' needs at least one underlying curve"
            )));
        }
        Ok(Self {
            name,
            subtract,
            curves,
        })
    }

    fn sign(&self) -> f64 {
        if self.subtract {
            -1.0
        } else {
            1.0
        }
    }
}

impl PriceIndexCurve for PriceIndexAddSpreadCurve {
    fn name(&self) -> &str {
        &self.name
    }

    fn price_index(&self, t: f64) -> f64 {
        let spread: f64 = self.curves[1..].iter().map(|c| c.price_index(t)).sum();
        self.curves[0].price_index(t) + self.sign() * spread
    }

    fn number_of_parameters(&self) -> usize {
        self.curves.iter().map(|c| c.number_of_parameters()).sum()
    }

    fn price_index_parameter_sensitivity(&self, t: f64) -> Vec<f64> {
        let sign = self.sign();
        let mut sensitivity = self.curves[0].price_index_parameter_sensitivity(t);
        for curve in &self.curves[1..] {
            sensitivity.extend(
                curve
                    .price_index_parameter_sensitivity(t)
                    .into_iter()
                    .map(|s| sign * s),
            );
        }
        sensitivity
    }

    fn underlying_curve_names(&self) -> Vec<String> {
        self.curves
            .iter()
            .flat_map(|c| std::iter::once(c.name().to_string()).chain(c.underlying_curve_names()))
            .collect()
    }

    fn number_of_intrinsic_parameters(&self, excluded: &BTreeSet<String>) -> usize {
        self.curves
            .iter()
            .filter(|c| !excluded.contains(c.name()))
            .map(|c| c.number_of_intrinsic_parameters(excluded))
            .sum()
    }

    fn with_parameter_shift(
        &self,
        index: usize,
        shift: f64,
    ) -> CurveResult<Arc<dyn PriceIndexCurve>> {
        let counts: Vec<usize> = self.curves.iter().map(|c| c.number_of_parameters()).collect();
        let (position, local) = locate_parameter(&counts, index).ok_or_else(|| {
            CurveError::invalid_parameter_index(&self.name, index, self.number_of_parameters())
        })?;
        let mut curves = self.curves.clone();
        curves[position] = curves[position].with_parameter_shift(local, shift)?;
        Ok(Arc::new(Self {
            name: self.name.clone(),
            subtract: self.subtract,
            curves,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inflation::InterpolatedPriceIndexCurve;
    use approx::assert_relative_eq;

    fn curve(name: &str, levels: Vec<f64>) -> Arc<dyn PriceIndexCurve> {
        Arc::new(InterpolatedPriceIndexCurve::new(name, vec![0.0, 1.0], levels).unwrap())
    }

    #[test]
    fn test_sum_and_difference() {
        let a = curve("A", vec![100.0, 102.0]);
        let b = curve("B", vec![1.0, 3.0]);
        let sum = PriceIndexAddSpreadCurve::new("SUM", false, vec![a.clone(), b.clone()]).unwrap();
        let diff = PriceIndexAddSpreadCurve::new("DIFF", true, vec![a.clone(), b]).unwrap();

        assert_relative_eq!(sum.price_index(0.5), 103.0);
        assert_relative_eq!(diff.price_index(0.5), 99.0);
        assert_eq!(sum.number_of_parameters(), 4);

        let sens = diff.price_index_parameter_sensitivity(0.5);
        assert_eq!(&sens[..2], a.price_index_parameter_sensitivity(0.5).as_slice());
        assert_eq!(&sens[2..], &[-0.5, -0.5]);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(PriceIndexAddSpreadCurve::new("EMPTY", false, Vec::new()).is_err());
    }
}
