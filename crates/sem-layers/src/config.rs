// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::io_names::LayerIONames;
use crate::params::LayerParams;

/// Parameters plus (optionally) wiring for one layer.
///
/// A plain value: a clone never shares state with its source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    #[serde(default)]
    io: LayerIONames,
    #[serde(default)]
    params: LayerParams,
}

impl LayerConfig {
    pub fn new(params: LayerParams) -> Self {
        Self {
            io: LayerIONames::default(),
            params,
        }
    }

    pub fn with_io(mut self, io: LayerIONames) -> Self {
        self.io = io;
        self
    }

    pub fn params(&self) -> &LayerParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut LayerParams {
        &mut self.params
    }

    pub fn io(&self) -> &LayerIONames {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut LayerIONames {
        &mut self.io
    }
}
