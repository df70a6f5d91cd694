//! # Strata Core
//!
//! Core types shared by every Strata crate.
//!
//! - **Types**: `Date`, `Tenor`, `Frequency`, `Currency`, `MultiCurrencyAmount`,
//!   `FxMatrix` and `FixingSeries`
//! - **Day Count Conventions**: year fractions used for accrual and curve time
//! - **Business Day Calendars**: weekend and holiday calendars with adjustment rules
//!
//! ## Example
//!
//! ```rust
//! use strata_core::prelude::*;
//!
//! let trade = Date::from_ymd(2024, 6, 14).unwrap();
//! let maturity = trade.add_tenor(Tenor::years(5)).unwrap();
//! let t = DayCount::Act365Fixed.year_fraction(trade, maturity);
//! assert!(t > 4.9 && t < 5.1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_possible_truncation)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        BusinessDayConvention, Calendar, HolidayCalendar, WeekendCalendar,
    };
    pub use crate::daycounts::DayCount;
    pub use crate::error::{StrataError, StrataResult};
    pub use crate::types::{
        Currency, Date, FixingSeries, Frequency, FxMatrix, MultiCurrencyAmount, Tenor,
        TenorUnit,
    };
}

// Re-export commonly used types at crate root
pub use error::{StrataError, StrataResult};
pub use types::{Currency, Date, MultiCurrencyAmount, Tenor};
