// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # SEM - Spiking Expectation-Maximization
//!
//! A population of spiking learners competes through a stochastic
//! winner-take-all circuit; the winner of each tick adapts its weights with
//! STDP, so over time each learner specialises on one cluster of its input.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: sem-structures                             │
//! │  (TypedValue, Signal, SemError)                         │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Learning units: sem-npu-neural                         │
//! │  (SpikingHistory, ZNeuron, STDP, WtaPoisson)            │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Layers: sem-layers                                     │
//! │  (Layer, LayerRegistry, LayerY, LayerZ, WeightedSum)    │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  This crate: Pipeline, Simulation, BarStimulus          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sem::prelude::*;
//!
//! let config = SemConfig::default();
//! let mut simulation = Simulation::new(&config)?;
//! simulation.learn()?;
//! let stats = simulation.eval()?;
//! println!("purity: {:.2}", stats.purity());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use sem_structures as structures;

// Re-export learning units and layers
pub use sem_layers as layers;
pub use sem_npu_neural as neural;

// Re-export infrastructure
pub use sem_config as config;
pub use sem_observability as observability;

pub mod pipeline;
pub mod response_stats;
pub mod simulation;
pub mod stimulus;

pub use pipeline::Pipeline;
pub use response_stats::ResponseStats;
pub use simulation::Simulation;
pub use stimulus::{BarStimulus, Stimulus};

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::config::SemConfig;
    pub use crate::layers::{
        default_registry, Layer, LayerConfig, LayerIONames, LayerParams, LayerRegistry, LayerShared,
    };
    pub use crate::structures::{Mat, SemError, Signal, TypedValue};
    pub use crate::{BarStimulus, Pipeline, ResponseStats, Simulation, Stimulus};
}
