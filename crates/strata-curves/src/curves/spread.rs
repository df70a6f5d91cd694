//! Zero-rate spread combinator.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::{CurveError, CurveResult};
use crate::traits::{locate_parameter, Curve};

/// A curve whose zero rate is the first underlying curve's rate plus (or
/// minus) the rates of all the others.
///
/// ```text
/// r(t) = c0(t) + sign * (c1(t) + ... + cn(t))
/// ```
///
/// The parameters are the underlying curves' parameters concatenated in
/// curve order. Sensitivity blocks of curves after the first are multiplied
/// by the sign, so the vector is the exact derivative of `r(t)`.
///
/// Underlying names are not checked for uniqueness: building a spread of a
/// curve over itself double counts its parameters.
#[derive(Debug, Clone)]
pub struct AddZeroSpreadCurve {
    name: String,
    subtract: bool,
    curves: Vec<Arc<dyn Curve>>,
}

impl AddZeroSpreadCurve {
    /// Creates the combinator.
    ///
    /// With `subtract` the spread curves are subtracted from the first one.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidArgument` if `curves` is empty.
    pub fn new(
        name: impl Into<String>,
        subtract: bool,
        curves: Vec<Arc<dyn Curve>>,
    ) -> CurveResult<Self> {
        let name = name.into();
        if curves.is_empty() {
            return Err(CurveError::invalid_argument(format!(
                "spread curve '{name}' needs at least one underlying curve"
            )));
        }
        Ok(Self {
            name,
            subtract,
            curves,
        })
    }

    /// The underlying curves in order.
    #[must_use]
    pub fn curves(&self) -> &[Arc<dyn Curve>] {
        &self.curves
    }

    /// Whether the spread curves are subtracted.
    #[must_use]
    pub fn is_subtracting(&self) -> bool {
        self.subtract
    }

    fn sign(&self) -> f64 {
        if self.subtract {
            -1.0
        } else {
            1.0
        }
    }

    fn combine(&self, value: impl Fn(&dyn Curve) -> f64) -> f64 {
        let (first, rest) = self.curves.split_at(1);
        let spread: f64 = rest.iter().map(|c| value(c.as_ref())).sum();
        value(first[0].as_ref()) + self.sign() * spread
    }
}

impl Curve for AddZeroSpreadCurve {
    fn name(&self) -> &str {
        &self.name
    }

    fn interest_rate(&self, t: f64) -> f64 {
        self.combine(|c| c.interest_rate(t))
    }

    fn forward_rate(&self, t: f64) -> f64 {
        self.combine(|c| c.forward_rate(t))
    }

    fn number_of_parameters(&self) -> usize {
        self.curves.iter().map(|c| c.number_of_parameters()).sum()
    }

    fn interest_rate_parameter_sensitivity(&self, t: f64) -> Vec<f64> {
        let sign = self.sign();
        let mut sensitivity = Vec::with_capacity(self.number_of_parameters());
        for (position, curve) in self.curves.iter().enumerate() {
            let block = curve.interest_rate_parameter_sensitivity(t);
            if position == 0 {
                sensitivity.extend(block);
            } else {
                sensitivity.extend(block.into_iter().map(|s| sign * s));
            }
        }
        sensitivity
    }

    fn underlying_curve_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for curve in &self.curves {
            names.push(curve.name().to_string());
            names.extend(curve.underlying_curve_names());
        }
        names
    }

    fn number_of_intrinsic_parameters(&self, excluded: &BTreeSet<String>) -> usize {
        self.curves
            .iter()
            .filter(|c| !excluded.contains(c.name()))
            .map(|c| c.number_of_intrinsic_parameters(excluded))
            .sum()
    }

    fn with_parameter_shift(&self, index: usize, shift: f64) -> CurveResult<Arc<dyn Curve>> {
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
    use crate::curves::{ConstantCurve, InterpolatedCurve};
    use approx::assert_relative_eq;

    fn base() -> Arc<dyn Curve> {
        Arc::new(
            InterpolatedCurve::new("USD-OIS", vec![1.0, 2.0, 5.0], vec![0.01, 0.015, 0.02])
                .unwrap(),
        )
    }

    fn spread() -> Arc<dyn Curve> {
        Arc::new(ConstantCurve::new("ISSUER-SPREAD", 0.005))
    }

    #[test]
    fn test_empty_curve_list_rejected() {
        assert!(matches!(
            AddZeroSpreadCurve::new("EMPTY", false, Vec::new()),
            Err(CurveError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_rate_and_parameter_count() {
        let add = AddZeroSpreadCurve::new("ISSUER", false, vec![base(), spread()]).unwrap();
        let sub = AddZeroSpreadCurve::new("BASIS", true, vec![base(), spread()]).unwrap();

        assert_relative_eq!(add.interest_rate(1.5), 0.0125 + 0.005, epsilon = 1e-15);
        assert_relative_eq!(sub.interest_rate(1.5), 0.0125 - 0.005, epsilon = 1e-15);
        assert_relative_eq!(add.forward_rate(7.0), 0.025, epsilon = 1e-15);
        assert_eq!(add.number_of_parameters(), 4);
    }

    #[test]
    fn test_sensitivity_is_concatenated() {
        let base = base();
        let add = AddZeroSpreadCurve::new("ISSUER", false, vec![base.clone(), spread()]).unwrap();
        let sub = AddZeroSpreadCurve::new("BASIS", true, vec![base.clone(), spread()]).unwrap();

        let t = 3.5;
        let expected = base.interest_rate_parameter_sensitivity(t);
        let add_sens = add.interest_rate_parameter_sensitivity(t);
        let sub_sens = sub.interest_rate_parameter_sensitivity(t);
        assert_eq!(&add_sens[..3], expected.as_slice());
        assert_eq!(&sub_sens[..3], expected.as_slice());
        assert_eq!(add_sens[3], 1.0);
        assert_eq!(sub_sens[3], -1.0);
    }

    #[test]
    fn test_parameter_shift_routes_to_owner() {
        let add = AddZeroSpreadCurve::new("ISSUER", false, vec![base(), spread()]).unwrap();
        let bumped = add.with_parameter_shift(3, 0.001).unwrap();
        assert_relative_eq!(bumped.interest_rate(1.5) - add.interest_rate(1.5), 0.001, epsilon = 1e-15);
        assert_eq!(bumped.name(), "ISSUER");
        assert!(add.with_parameter_shift(4, 0.001).is_err());
    }

    #[test]
    fn test_names_and_intrinsic_parameters() {
        let inner = Arc::new(AddZeroSpreadCurve::new("INNER", false, vec![base(), spread()]).unwrap());
        let outer = AddZeroSpreadCurve::new(
            "OUTER",
            false,
            vec![inner, Arc::new(ConstantCurve::new("EXTRA", 0.001))],
        )
        .unwrap();

        assert_eq!(
            outer.underlying_curve_names(),
            vec!["INNER", "USD-OIS", "ISSUER-SPREAD", "EXTRA"]
        );
        assert_eq!(outer.number_of_intrinsic_parameters(&BTreeSet::new()), 5);

        let excluded: BTreeSet<String> = ["USD-OIS".to_string()].into_iter().collect();
        assert_eq!(outer.number_of_intrinsic_parameters(&excluded), 2);
    }
}
