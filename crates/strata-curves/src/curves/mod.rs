//! Yield curve implementations and combinators.
//!
//! - [`ConstantCurve`]: one flat rate
//! - [`InterpolatedCurve`]: zero rates on nodes
//! - [`AddZeroSpreadCurve`]: base curve plus or minus spread curves
//! - [`TimeShiftedCurve`]: a curve rolled along its forwards

mod constant;
mod interpolated;
mod shifted;
mod spread;

pub use constant::ConstantCurve;
pub use interpolated::InterpolatedCurve;
pub use shifted::TimeShiftedCurve;
pub use spread::AddZeroSpreadCurve;
