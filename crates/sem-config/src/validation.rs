// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Ensures configuration values are within valid ranges before a simulation
//! is assembled from them.

use crate::{ConfigError, ConfigResult, SemConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    MustBePositive { field: String, value: f64 },
    OutOfRange { field: String, value: f64, min: f64 },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MustBePositive { field, value } => {
                write!(f, "{} = {} must be a positive, finite number", field, value)
            }
            Self::OutOfRange { field, value, min } => {
                write!(f, "{} = {} is below the minimum of {}", field, value, min)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every violation found
pub fn validate_config(config: &SemConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_system(config, &mut errors);
    validate_simulation(config, &mut errors);
    validate_layers(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn require_positive(field: &str, value: f32, errors: &mut Vec<ConfigValidationError>) {
    if !(value.is_finite() && value > 0.0) {
        errors.push(ConfigValidationError::MustBePositive {
            field: field.to_string(),
            value: value as f64,
        });
    }
}

fn require_non_negative(field: &str, value: f32, errors: &mut Vec<ConfigValidationError>) {
    if !(value.is_finite() && value >= 0.0) {
        errors.push(ConfigValidationError::OutOfRange {
            field: field.to_string(),
            value: value as f64,
            min: 0.0,
        });
    }
}

fn require_at_least(field: &str, value: usize, min: usize, errors: &mut Vec<ConfigValidationError>) {
    if value < min {
        errors.push(ConfigValidationError::OutOfRange {
            field: field.to_string(),
            value: value as f64,
            min: min as f64,
        });
    }
}

fn validate_system(config: &SemConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.system.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "system.log_level".to_string(),
            reason: format!(
                "'{}' is not one of {}",
                config.system.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }
}

fn validate_simulation(config: &SemConfig, errors: &mut Vec<ConfigValidationError>) {
    let sim = &config.simulation;
    require_at_least("simulation.nb_learners", sim.nb_learners, 1, errors);
    require_at_least("simulation.ticks_per_stimulus", sim.ticks_per_stimulus, 1, errors);
    require_at_least("simulation.grid_size", sim.grid_size, 2, errors);
    require_positive("simulation.delta_t", sim.delta_t, errors);
}

fn validate_layers(config: &SemConfig, errors: &mut Vec<ConfigValidationError>) {
    require_non_negative("layer_y.frequency", config.layer_y.frequency, errors);

    let z = &config.layer_z;
    require_at_least("layer_z.len_history", z.len_history, 1, errors);
    require_positive("layer_z.wta_frequency", z.wta_frequency, errors);
    require_positive("layer_z.stdp.tau", z.stdp.tau, errors);
    require_non_negative("layer_z.stdp.a_plus", z.stdp.a_plus, errors);
    require_non_negative("layer_z.stdp.a_minus", z.stdp.a_minus, errors);
    require_non_negative("layer_z.stdp.eta_bias", z.stdp.eta_bias, errors);
}
