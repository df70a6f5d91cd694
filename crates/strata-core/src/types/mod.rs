//! Domain value types.

mod amount;
mod currency;
mod date;
mod fixing;
mod tenor;

pub use amount::{FxMatrix, MultiCurrencyAmount};
pub use currency::Currency;
pub use date::Date;
pub use fixing::FixingSeries;
pub use tenor::{Frequency, Tenor, TenorUnit};
