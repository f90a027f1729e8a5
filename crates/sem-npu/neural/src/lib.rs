// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # SEM Neural Computation
//!
//! Learning units and the competition between them:
//! - **SpikingHistory**: bounded per-line record of recent input spikes
//! - **Models**: learner trait and the `ZNeuron` STDP unit
//! - **STDP**: weight and bias update rules
//! - **Competition**: Poisson winner-take-all over a learner population

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod competition;
pub mod models;
pub mod spiking_history;
pub mod stdp;

pub use competition::{Competition, WtaPoisson};
pub use models::{Learner, ZNeuron};
pub use spiking_history::SpikingHistory;
pub use stdp::StdpParameters;
