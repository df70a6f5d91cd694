//! Property tests for the root finders.

use proptest::prelude::*;
use strata_math::prelude::*;

proptest! {
    #[test]
    fn newton_and_brent_agree_on_monotone_functions(
        target in -5.0f64..5.0,
        scale in 0.1f64..10.0,
        guess in -10.0f64..10.0,
    ) {
        let f = |x: f64| scale * (x - target) + (x - target).powi(3);
        let df = |x: f64| scale + 3.0 * (x - target).powi(2);
        let config = SolverConfig::default().with_tolerance(1e-12);

        let newton = newton_bracketed(f, df, guess, -10.0, 10.0, &config).unwrap();
        let brent_root = brent(f, -10.0, 10.0, &config).unwrap();

        prop_assert!((newton.root - target).abs() < 1e-9);
        prop_assert!((brent_root.root - target).abs() < 1e-9);
    }

    #[test]
    fn expanded_bracket_contains_a_sign_change(root in 0.01f64..50.0) {
        let f = |x: f64| (x - root).tanh();
        let (lo, hi) = expand_upper_bracket(f, 0.0, 0.01, 100.0).unwrap();
        prop_assert!(f(lo) * f(hi) <= 0.0);
    }
}
