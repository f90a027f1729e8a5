// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Ordered layer pipeline driven one tick at a time.

use tracing::debug;

use sem_layers::LayerShared;
use sem_structures::{Result, Signal};

/// Layers executed strictly in insertion order on a shared [`Signal`].
#[derive(Debug, Default)]
pub struct Pipeline {
    layers: Vec<LayerShared>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer to the end of the pipeline
    pub fn push(&mut self, layer: LayerShared) {
        self.layers.push(layer);
    }

    pub fn with_layer(mut self, layer: LayerShared) -> Self {
        self.push(layer);
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[LayerShared] {
        &self.layers
    }

    /// Clear every layer's learned and per-tick state
    pub fn clear(&mut self) {
        for layer in &mut self.layers {
            layer.clear();
        }
    }

    /// Run one tick: for each layer in order, `activate` then `response`,
    /// then `learn` when `learn` is set.
    ///
    /// # Errors
    /// The first layer error aborts the tick and is returned unchanged;
    /// later layers do not run.
    pub fn tick(&mut self, signal: &mut Signal, learn: bool) -> Result<()> {
        for (index, layer) in self.layers.iter_mut().enumerate() {
            if let Err(e) = step(layer, signal, learn) {
                debug!("[PIPELINE] tick aborted at layer {} ({}): {}", index, layer.type_name(), e);
                return Err(e);
            }
        }
        Ok(())
    }
}

fn step(layer: &mut LayerShared, signal: &mut Signal, learn: bool) -> Result<()> {
    layer.activate(signal)?;
    layer.response(signal)?;
    if learn {
        layer.learn()?;
    }
    Ok(())
}
