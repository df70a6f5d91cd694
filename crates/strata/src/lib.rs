//! # Strata
//!
//! Facade over the Strata crates:
//!
//! - [`core`]: dates, calendars, day counts, currencies and amounts
//! - [`math`]: root finders, integration and interpolation
//! - [`curves`]: curve combinators, forward curves, providers and rolldown
//! - [`credit`]: ISDA standard model CDS pricing and calibration
//! - [`pricing`]: bond-like instruments, horizon and sensitivity calculators
//! - [`config`]: calibration, sensitivity and horizon settings
//!
//! ## Example
//!
//! ```rust
//! use strata::prelude::*;
//!
//! let config = StrataConfig::from_toml_str("[calibration]\nmax_iterations = 50\n").unwrap();
//! let builder = SimpleCreditCurveBuilder::new().with_config(&config.calibration);
//!
//! let trade = Date::from_ymd(2024, 6, 14).unwrap();
//! let cds = CdsAnalyticFactory::new(0.4).make_imm_cds(trade, Tenor::years(5)).unwrap();
//! let yc = IsdaYieldCurve::flat(0.03).unwrap();
//! let cc = builder.calibrate(&[cds.clone()], &[0.01], &yc).unwrap();
//! assert!(builder.pricer().pv(&cds, &yc, &cc, 0.01, PriceType::Clean).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use strata_config as config;
pub use strata_core as core;
pub use strata_credit as credit;
pub use strata_curves as curves;
pub use strata_math as math;
pub use strata_pricing as pricing;

/// Everything most callers need in one import.
pub mod prelude {
    pub use strata_config::prelude::*;
    pub use strata_core::prelude::*;
    pub use strata_credit::prelude::*;
    pub use strata_curves::prelude::*;
    pub use strata_pricing::prelude::*;
}
