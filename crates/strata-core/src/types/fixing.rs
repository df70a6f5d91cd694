//! Historical fixings keyed by date.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Date;
use crate::error::{StrataError, StrataResult};

/// A named series of fixings (index resets).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixingSeries {
    name: String,
    values: BTreeMap<Date, f64>,
}

impl FixingSeries {
    /// An empty series.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    /// Builds a series from `(date, value)` pairs; later duplicates win.
    #[must_use]
    pub fn from_pairs(name: impl Into<String>, pairs: impl IntoIterator<Item = (Date, f64)>) -> Self {
        Self {
            name: name.into(),
            values: pairs.into_iter().collect(),
        }
    }

    /// Returns the series with one fixing added.
    #[must_use]
    pub fn with_fixing(mut self, date: Date, value: f64) -> Self {
        self.values.insert(date, value);
        self
    }

    /// The series name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fixing on `date`, if published.
    #[must_use]
    pub fn get(&self, date: Date) -> Option<f64> {
        self.values.get(&date).copied()
    }

    /// The fixing on `date`.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::MissingFixing` when absent.
    pub fn require(&self, date: Date) -> StrataResult<f64> {
        self.get(date)
            .ok_or_else(|| StrataError::missing_fixing(&self.name, date))
    }

    /// The most recent fixing on or before `date`.
    #[must_use]
    pub fn latest_on_or_before(&self, date: Date) -> Option<(Date, f64)> {
        self.values.range(..=date).next_back().map(|(d, v)| (*d, *v))
    }

    /// Number of fixings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the series holds no fixing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
