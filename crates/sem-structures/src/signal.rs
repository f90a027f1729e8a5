// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Named, append-only multi-series store: the bus layers exchange data over.

use std::collections::BTreeMap;

use ndarray::Array2;

use crate::error::{Result, SemError};
use crate::value::TypedValue;

/// Holds single and multiple samples of features under string keys.
///
/// Each key maps to an insertion-ordered sequence; appending never removes
/// earlier entries and the most recent entry is always the last one.
/// A `Signal` is not meant to be mutated by more than one layer at a time;
/// pipelines run their layers one after another.
#[derive(Debug, Clone, Default)]
pub struct Signal {
    signals: BTreeMap<String, Vec<TypedValue>>,
}

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every series
    pub fn clear(&mut self) {
        self.signals.clear();
    }

    /// Append a feature to `name`, creating the series if it does not exist yet.
    pub fn append(&mut self, name: &str, value: impl Into<TypedValue>) {
        self.signals
            .entry(name.to_string())
            .or_default()
            .push(value.into());
    }

    pub fn exists(&self, name: &str) -> bool {
        self.signals.contains_key(name)
    }

    /// All series names, sorted
    pub fn feature_names(&self) -> Vec<String> {
        self.signals.keys().cloned().collect()
    }

    /// Full ordered series stored under `name`
    ///
    /// # Errors
    /// `SemError::Key` if no series exists under `name`.
    pub fn series(&self, name: &str) -> Result<&[TypedValue]> {
        self.signals
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| SemError::key(format!("No signal found under '{}'", name)))
    }

    /// Last feature appended under `name`
    ///
    /// # Errors
    /// `SemError::Key` if no series exists under `name`.
    pub fn most_recent(&self, name: &str) -> Result<&TypedValue> {
        self.series(name)?
            .last()
            .ok_or_else(|| SemError::key(format!("Signal '{}' is empty", name)))
    }

    /// Last feature appended under `name`, as a dense matrix
    pub fn most_recent_mat(&self, name: &str) -> Result<Array2<f32>> {
        self.most_recent(name)?.mat()
    }

    /// Every feature under `name`, as dense matrices
    pub fn series_mat(&self, name: &str) -> Result<Vec<Array2<f32>>> {
        self.series(name)?.iter().map(TypedValue::mat).collect()
    }
}
