// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Layer construction by type name.
//!
//! To add a layer type:
//! 1. implement [`Layer`] in `src/layers/`
//! 2. register it in [`LayerRegistry::with_builtin_layers`]

use std::sync::OnceLock;

use ahash::AHashMap;
use tracing::{debug, info};

use sem_structures::{Result, SemError};

use crate::config::LayerConfig;
use crate::io_names::LayerIONames;
use crate::layer::Layer;
use crate::layers::{LayerY, LayerZ, WeightedSum};

/// Exclusively owned layer instance
pub type LayerShared = Box<dyn Layer>;

pub type LayerConstructor = fn() -> LayerShared;

/// Map of type name to constructor
#[derive(Debug, Clone, Default)]
pub struct LayerRegistry {
    constructors: AHashMap<String, LayerConstructor>,
}

impl LayerRegistry {
    /// Create empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every layer type this crate provides
    pub fn with_builtin_layers() -> Self {
        let mut registry = Self::new();
        registry.register(LayerY::TYPE_NAME, || -> LayerShared { Box::new(LayerY::new()) });
        registry.register(LayerZ::TYPE_NAME, || -> LayerShared { Box::new(LayerZ::new()) });
        registry.register(WeightedSum::TYPE_NAME, || -> LayerShared { Box::new(WeightedSum::new()) });
        registry
    }

    /// Add or replace a constructor
    pub fn register(&mut self, type_name: impl Into<String>, constructor: LayerConstructor) {
        let type_name = type_name.into();
        debug!("[LAYER-REGISTRY] registered '{}'", type_name);
        self.constructors.insert(type_name, constructor);
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    /// Registered type names, sorted
    pub fn registered_types(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constructors.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Fresh, unconfigured instance of `type_name`
    ///
    /// # Errors
    /// `SemError::Type` if `type_name` is not registered.
    pub fn create_shared(&self, type_name: &str) -> Result<LayerShared> {
        let constructor = self
            .constructors
            .get(type_name)
            .ok_or_else(|| SemError::type_error(format!("Unregistered layer type '{}'", type_name)))?;
        Ok(constructor())
    }

    /// Fresh instance of `type_name`, reset with `config` then wired with `io`
    pub fn create_shared_with(
        &self,
        type_name: &str,
        config: &LayerConfig,
        io: &LayerIONames,
    ) -> Result<LayerShared> {
        let mut layer = self.create_shared(type_name)?;
        layer.reset(config)?;
        layer.set_io_names(io)?;
        info!("[LAYER-REGISTRY] created '{}'", type_name);
        Ok(layer)
    }
}

/// Process-wide registry of the built-in layers, initialised on first use.
pub fn default_registry() -> &'static LayerRegistry {
    static REGISTRY: OnceLock<LayerRegistry> = OnceLock::new();
    REGISTRY.get_or_init(LayerRegistry::with_builtin_layers)
}
