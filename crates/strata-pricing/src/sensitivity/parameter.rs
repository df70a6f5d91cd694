//! Sensitivities to curve parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strata_core::types::Currency;
use strata_curves::provider::IssuerProvider;

use super::point::MulticurveSensitivity;
use crate::error::{PricingError, PricingResult};

/// Sensitivity of a value to every parameter of some curves.
///
/// Keyed by `(curve name, currency of the value)`; each vector has one
/// entry per curve parameter, in the curve's parameter order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSensitivity {
    sensitivities: BTreeMap<(String, Currency), Vec<f64>>,
}

impl ParameterSensitivity {
    /// An empty sensitivity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `values` to the entry for `(curve, currency)`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidArgument` if an existing entry has a
    /// different length.
    pub fn plus_entry(
        mut self,
        curve: impl Into<String>,
        currency: Currency,
        values: Vec<f64>,
    ) -> PricingResult<Self> {
        let key = (curve.into(), currency);
        match self.sensitivities.get_mut(&key) {
            Some(existing) if existing.len() != values.len() => {
                return Err(PricingError::invalid_argument(format!(
                    "sensitivity to {} has {} entries, cannot add {}",
                    key.0,
                    existing.len(),
                    values.len()
                )));
            }
            Some(existing) => {
                for (e, v) in existing.iter_mut().zip(values) {
                    *e += v;
                }
            }
            None => {
                self.sensitivities.insert(key, values);
            }
        }
        Ok(self)
    }

    /// The vector for `(curve, currency)`, if present.
    pub fn get(&self, curve: &str, currency: Currency) -> Option<&[f64]> {
        self.sensitivities
            .get(&(curve.to_string(), currency))
            .map(Vec::as_slice)
    }

    /// Every entry in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Currency, &[f64])> {
        self.sensitivities
            .iter()
            .map(|((curve, ccy), values)| (curve.as_str(), *ccy, values.as_slice()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.sensitivities.len()
    }

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.sensitivities.is_empty()
    }

    /// Largest absolute difference between matching entries.
    ///
    /// Entries missing on one side compare against zeros.
    pub fn max_abs_difference(&self, other: &Self) -> f64 {
        let mut keys: Vec<_> = self.sensitivities.keys().collect();
        keys.extend(other.sensitivities.keys());
        keys.into_iter()
            .map(|key| {
                let a = self.sensitivities.get(key).map_or(&[][..], Vec::as_slice);
                let b = other.sensitivities.get(key).map_or(&[][..], Vec::as_slice);
                (0..a.len().max(b.len()))
                    .map(|i| {
                        let x = a.get(i).copied().unwrap_or(0.0);
                        let y = b.get(i).copied().unwrap_or(0.0);
                        (x - y).abs()
                    })
                    .fold(0.0, f64::max)
            })
            .fold(0.0, f64::max)
    }
}

/// Projects point sensitivities onto curve parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParameterSensitivityCalculator;

impl ParameterSensitivityCalculator {
    /// Chains each `(t, dPV/dr)` point with the curve's
    /// `interest_rate_parameter_sensitivity(t)`.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::MissingCurve` if a curve named in `sensitivity`
    /// is not in `provider`.
    pub fn from_point_sensitivity(
        sensitivity: &MulticurveSensitivity,
        currency: Currency,
        provider: &IssuerProvider,
    ) -> PricingResult<ParameterSensitivity> {
        sensitivity
            .iter()
            .try_fold(ParameterSensitivity::new(), |result, (name, points)| {
                let curve = provider
                    .curve_by_name(name)
                    .ok_or_else(|| PricingError::missing_curve(name))?;
                let mut values = vec![0.0; curve.number_of_parameters()];
                for (t, dpv_dr) in points {
                    let dr_dp = curve.interest_rate_parameter_sensitivity(*t);
                    for (value, d) in values.iter_mut().zip(dr_dp) {
                        *value += dpv_dr * d;
                    }
                }
                result.plus_entry(name, currency, values)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::Arc;
    use strata_curves::curves::InterpolatedCurve;
    use strata_curves::provider::MulticurveProvider;

    #[test]
    fn test_point_to_parameter() {
        let curve = InterpolatedCurve::new("USD", vec![1.0, 3.0], vec![0.01, 0.02]).unwrap();
        let provider = IssuerProvider::new(
            MulticurveProvider::default().with_discount_curve(Currency::USD, Arc::new(curve)),
        );
        let points = MulticurveSensitivity::of("USD", vec![(2.0, -10.0)]);
        let result =
            ParameterSensitivityCalculator::from_point_sensitivity(&points, Currency::USD, &provider)
                .unwrap();
        let values = result.get("USD", Currency::USD).unwrap();
        assert_relative_eq!(values[0], -5.0, epsilon = 1e-12);
        assert_relative_eq!(values[1], -5.0, epsilon = 1e-12);

        let unknown = MulticurveSensitivity::of("EUR", vec![(2.0, -10.0)]);
        let err =
            ParameterSensitivityCalculator::from_point_sensitivity(&unknown, Currency::USD, &provider);
        assert!(matches!(err, Err(PricingError::MissingCurve { .. })));
    }

    #[test]
    fn test_entries_accumulate() {
        let s = ParameterSensitivity::new()
            .plus_entry("A", Currency::USD, vec![1.0, 2.0])
            .unwrap()
            .plus_entry("A", Currency::USD, vec![0.5, 0.5])
            .unwrap();
        assert_eq!(s.get("A", Currency::USD).unwrap(), &[1.5, 2.5]);
        assert!(s.clone().plus_entry("A", Currency::USD, vec![1.0]).is_err());
        assert_relative_eq!(s.max_abs_difference(&ParameterSensitivity::new()), 2.5);
    }
}
