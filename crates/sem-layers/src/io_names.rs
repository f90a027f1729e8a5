// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Wiring of a layer's logical input/output keys to signal names.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sem_structures::{Result, SemError};

/// Two independent maps from layer-local keys (e.g. `"input-spikes"`) to
/// the signal names chosen by whoever assembles the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerIONames {
    #[serde(default)]
    inputs: BTreeMap<String, String>,
    #[serde(default)]
    outputs: BTreeMap<String, String>,
}

impl LayerIONames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&mut self, key: impl Into<String>, name: impl Into<String>) -> &mut Self {
        self.inputs.insert(key.into(), name.into());
        self
    }

    pub fn set_output(&mut self, key: impl Into<String>, name: impl Into<String>) -> &mut Self {
        self.outputs.insert(key.into(), name.into());
        self
    }

    /// Builder form of [`set_input`](Self::set_input)
    pub fn with_input(mut self, key: impl Into<String>, name: impl Into<String>) -> Self {
        self.set_input(key, name);
        self
    }

    /// Builder form of [`set_output`](Self::set_output)
    pub fn with_output(mut self, key: impl Into<String>, name: impl Into<String>) -> Self {
        self.set_output(key, name);
        self
    }

    /// Signal name wired to a required input key
    ///
    /// # Errors
    /// `SemError::Key` if `key` is not wired.
    pub fn input(&self, key: &str) -> Result<&str> {
        self.input_opt(key)
            .ok_or_else(|| SemError::key(format!("No input name configured for key '{}'", key)))
    }

    /// Signal name wired to a required output key
    ///
    /// # Errors
    /// `SemError::Key` if `key` is not wired.
    pub fn output(&self, key: &str) -> Result<&str> {
        self.output_opt(key)
            .ok_or_else(|| SemError::key(format!("No output name configured for key '{}'", key)))
    }

    pub fn input_opt(&self, key: &str) -> Option<&str> {
        self.inputs.get(key).map(String::as_str)
    }

    pub fn output_opt(&self, key: &str) -> Option<&str> {
        self.outputs.get(key).map(String::as_str)
    }

    pub fn inputs(&self) -> &BTreeMap<String, String> {
        &self.inputs
    }

    pub fn outputs(&self) -> &BTreeMap<String, String> {
        &self.outputs
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty()
    }
}
