// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # SEM Configuration System
//!
//! Type-safe configuration loader for SEM simulations with support for:
//! - TOML file parsing
//! - Environment variable overrides
//! - CLI argument overrides
//! - Validation of value ranges
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sem_config::{load_config, SemConfig};
//!
//! // Load configuration with automatic file discovery and overrides
//! let config = load_config(None, None).expect("Failed to load config");
//!
//! println!("Learners: {}", config.simulation.nb_learners);
//! println!("WTA frequency: {} Hz", config.layer_z.wta_frequency);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name searched for by [`find_config_file`]
pub const CONFIG_FILE_NAME: &str = "sem_configuration.toml";

/// Environment variable pointing at an explicit config file
pub const CONFIG_PATH_ENV: &str = "SEM_CONFIG_PATH";

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{
    apply_cli_overrides, apply_environment_overrides, check_cli_overrides, find_config_file,
    load_config, CLI_OVERRIDE_KEYS,
};
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SemConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = SemConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: SemConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
