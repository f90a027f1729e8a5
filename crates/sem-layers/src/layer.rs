// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Layer contract
//!
//! ```text
//! Unconfigured --reset(config)--> Configured --set_io_names(io)--> Ready
//!
//! per tick (Ready):
//!     activate(signal) -> response(signal) [-> learn()]
//! ```
//!
//! `reset` validates and stores parameters, drops learned state and wiring,
//! then applies any wiring the config itself carries. `reconfigure` is
//! `reset` with the current wiring preserved.

use std::fmt::Debug;

use sem_structures::{Result, Signal};

use crate::config::LayerConfig;
use crate::io_names::LayerIONames;

/// A pipeline stage exchanging data through a [`Signal`].
pub trait Layer: Debug + Send {
    /// Name this layer is registered under
    fn type_name(&self) -> &'static str;

    /// Drop learned and per-tick state, keeping parameters and wiring.
    fn clear(&mut self);

    /// Validate and store `config`, starting a fresh run.
    fn reset(&mut self, config: &LayerConfig) -> Result<()>;

    /// Resolve and store the wiring.
    ///
    /// # Errors
    /// `SemError::Key` if a required key is not wired.
    fn set_io_names(&mut self, io: &LayerIONames) -> Result<()>;

    /// Current wiring, `None` until wired
    fn io_names(&self) -> Option<&LayerIONames>;

    /// Apply new parameters while keeping the current wiring.
    fn reconfigure(&mut self, config: &LayerConfig) -> Result<()> {
        let wiring = self.io_names().cloned();
        self.reset(config)?;
        match wiring {
            Some(io) => self.set_io_names(&io),
            None => Ok(()),
        }
    }

    /// Read this tick's inputs and compute internal state.
    fn activate(&mut self, signal: &Signal) -> Result<()>;

    /// Append this tick's outputs.
    fn response(&self, signal: &mut Signal) -> Result<()>;

    /// Apply the learning rule to the state from the last `activate`.
    fn learn(&mut self) -> Result<()> {
        Ok(())
    }
}
