//! Price-index curves and their combinators.

mod add_fixed;
mod add_spread;
mod interpolated;

pub use add_fixed::PriceIndexAddFixedCurve;
pub use add_spread::PriceIndexAddSpreadCurve;
pub use interpolated::InterpolatedPriceIndexCurve;
