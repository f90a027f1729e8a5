// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Each struct maps to a section of `sem_configuration.toml`. Every field has
//! a default, so a partial file (or none at all) is a complete configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SemConfig {
    pub system: SystemConfig,
    pub logging: LoggingConfig,
    pub simulation: SimulationConfig,
    pub layer_y: LayerYConfig,
    pub layer_z: LayerZConfig,
}

/// System-level configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Fixed seed for reproducible runs; drawn from entropy when absent
    pub seed: Option<u64>,
    pub log_level: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_level: "info".to_string(),
        }
    }
}

/// Log output configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write a rolling log file in addition to the console
    pub file_logging: bool,
    pub log_dir: PathBuf,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file_logging: false,
            log_dir: PathBuf::from("logs"),
            ansi: true,
        }
    }
}

/// Learn/evaluate run configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of learners in the WTA circuit
    pub nb_learners: usize,
    pub nb_train_stimuli: usize,
    pub nb_test_stimuli: usize,
    /// Ticks each stimulus is presented for
    pub ticks_per_stimulus: usize,
    /// Side of the square stimulus grid
    pub grid_size: usize,
    /// Tick duration shared by every layer [milliseconds]
    pub delta_t: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            nb_learners: 8,
            nb_train_stimuli: 400,
            nb_test_stimuli: 100,
            ticks_per_stimulus: 20,
            grid_size: 4,
            delta_t: 10.0,
        }
    }
}

/// Poisson spike encoder configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayerYConfig {
    /// Firing rate of a fully active input [Hz]
    pub frequency: f32,
}

impl Default for LayerYConfig {
    fn default() -> Self {
        Self { frequency: 40.0 }
    }
}

/// Learning layer configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayerZConfig {
    pub len_history: usize,
    /// WTA circuit firing rate [Hz]
    pub wta_frequency: f32,
    pub stdp: StdpConfig,
}

impl Default for LayerZConfig {
    fn default() -> Self {
        Self {
            len_history: 5,
            wta_frequency: 20.0,
            stdp: StdpConfig::default(),
        }
    }
}

/// STDP learning rates
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StdpConfig {
    pub a_plus: f32,
    pub a_minus: f32,
    /// Potentiation decay [ticks]
    pub tau: f32,
    pub eta_bias: f32,
}

impl Default for StdpConfig {
    fn default() -> Self {
        Self {
            a_plus: 0.05,
            a_minus: 0.01,
            tau: 2.0,
            eta_bias: 0.01,
        }
    }
}
