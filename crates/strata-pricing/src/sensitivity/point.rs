//! Point sensitivities: dPV/dr at individual curve times.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sensitivity of a present value to the zero rate of a curve at given times.
///
/// Keyed by curve name; each entry lists `(t, dPV/dr(t))`. For a flow `cf`
/// discounted at `t` the entry is `-t * cf * df(t)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MulticurveSensitivity {
    sensitivities: BTreeMap<String, Vec<(f64, f64)>>,
}

impl MulticurveSensitivity {
    /// An empty sensitivity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sensitivity with a single curve.
    #[must_use]
    pub fn of(curve: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        let mut sensitivities = BTreeMap::new();
        sensitivities.insert(curve.into(), points);
        Self { sensitivities }
    }

    /// Adds one point for `curve`.
    #[must_use]
    pub fn with_point(mut self, curve: &str, t: f64, value: f64) -> Self {
        self.sensitivities
            .entry(curve.to_string())
            .or_default()
            .push((t, value));
        self
    }

    /// Both sensitivities' points, concatenated per curve.
    #[must_use]
    pub fn plus(mut self, other: &Self) -> Self {
        for (curve, points) in &other.sensitivities {
            self.sensitivities
                .entry(curve.clone())
                .or_default()
                .extend_from_slice(points);
        }
        self
    }

    /// Every value scaled by `factor`.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        Self {
            sensitivities: self
                .sensitivities
                .iter()
                .map(|(curve, points)| {
                    (curve.clone(), points.iter().map(|(t, v)| (*t, v * factor)).collect())
                })
                .collect(),
        }
    }

    /// Points sorted by time, with equal times merged.
    #[must_use]
    pub fn cleaned(&self) -> Self {
        let sensitivities = self
            .sensitivities
            .iter()
            .map(|(curve, points)| {
                let mut sorted = points.clone();
                sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
                let mut merged: Vec<(f64, f64)> = Vec::with_capacity(sorted.len());
                for (t, v) in sorted {
                    match merged.last_mut() {
                        Some(last) if last.0 == t => last.1 += v,
                        _ => merged.push((t, v)),
                    }
                }
                (curve.clone(), merged)
            })
            .collect();
        Self { sensitivities }
    }

    /// Points for `curve`, if any.
    pub fn get(&self, curve: &str) -> Option<&[(f64, f64)]> {
        self.sensitivities.get(curve).map(Vec::as_slice)
    }

    /// Curves and their points in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[(f64, f64)])> {
        self.sensitivities
            .iter()
            .map(|(curve, points)| (curve.as_str(), points.as_slice()))
    }

    /// True when no curve has points.
    pub fn is_empty(&self) -> bool {
        self.sensitivities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plus_and_clean() {
        let a = MulticurveSensitivity::of("USD", vec![(1.0, -2.0), (0.5, -1.0)]);
        let b = MulticurveSensitivity::new()
            .with_point("USD", 1.0, -3.0)
            .with_point("UST", 2.0, -4.0);
        let total = a.plus(&b).cleaned();
        assert_eq!(total.get("USD").unwrap(), &[(0.5, -1.0), (1.0, -5.0)]);
        assert_eq!(total.get("UST").unwrap(), &[(2.0, -4.0)]);
        assert_eq!(total.multiplied_by(2.0).get("UST").unwrap(), &[(2.0, -8.0)]);
    }
}
