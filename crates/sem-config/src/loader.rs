// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)
//!
//! The merged result is validated before it is returned.

use crate::{validate_config, ConfigError, ConfigResult, SemConfig, CONFIG_FILE_NAME, CONFIG_PATH_ENV};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Find the SEM configuration file
///
/// Search order:
/// 1. `SEM_CONFIG_PATH` environment variable
/// 2. Current working directory: `./sem_configuration.toml`
/// 3. Parent directories, up to 5 levels
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by {} not found: {}",
            CONFIG_PATH_ENV,
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join(CONFIG_FILE_NAME));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "SEM configuration file '{}' not found in any of these locations:\n{}\n\nSet {} environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list, CONFIG_PATH_ENV
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found, contains invalid TOML, or fails validation
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<SemConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: SemConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    validate_config(&config)?;
    Ok(config)
}

fn parse_into<T: FromStr>(value: &str, target: &mut T) {
    if let Ok(parsed) = value.parse::<T>() {
        *target = parsed;
    }
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `SEM_LOG_LEVEL` -> `system.log_level`
/// - `SEM_SEED` -> `system.seed`
/// - `SEM_NB_LEARNERS` -> `simulation.nb_learners`
/// - `SEM_NB_TRAIN_STIMULI` -> `simulation.nb_train_stimuli`
/// - `SEM_NB_TEST_STIMULI` -> `simulation.nb_test_stimuli`
/// - `SEM_WTA_FREQUENCY` -> `layer_z.wta_frequency`
///
/// Values that fail to parse are ignored.
pub fn apply_environment_overrides(config: &mut SemConfig) {
    if let Ok(value) = env::var("SEM_LOG_LEVEL") {
        config.system.log_level = value;
    }
    if let Ok(value) = env::var("SEM_SEED") {
        if let Ok(seed) = value.parse::<u64>() {
            config.system.seed = Some(seed);
        }
    }
    if let Ok(value) = env::var("SEM_NB_LEARNERS") {
        parse_into(&value, &mut config.simulation.nb_learners);
    }
    if let Ok(value) = env::var("SEM_NB_TRAIN_STIMULI") {
        parse_into(&value, &mut config.simulation.nb_train_stimuli);
    }
    if let Ok(value) = env::var("SEM_NB_TEST_STIMULI") {
        parse_into(&value, &mut config.simulation.nb_test_stimuli);
    }
    if let Ok(value) = env::var("SEM_WTA_FREQUENCY") {
        parse_into(&value, &mut config.layer_z.wta_frequency);
    }
}

/// Keys accepted by [`apply_cli_overrides`]
pub const CLI_OVERRIDE_KEYS: &[&str] = &[
    "log_level",
    "seed",
    "nb_learners",
    "nb_train_stimuli",
    "nb_test_stimuli",
    "ticks_per_stimulus",
    "grid_size",
    "delta_t",
    "frequency",
    "wta_frequency",
    "len_history",
];

/// Reject CLI overrides with an unknown key or a value of the wrong type.
///
/// [`apply_cli_overrides`] skips such entries, so callers taking overrides
/// from a user should check them first.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` naming the first offending override
pub fn check_cli_overrides(cli_args: &HashMap<String, String>) -> ConfigResult<()> {
    let mut keys: Vec<&String> = cli_args.keys().collect();
    keys.sort_unstable();

    for key in keys {
        let value = &cli_args[key];
        let parses = match key.as_str() {
            "log_level" => true,
            "seed" => value.parse::<u64>().is_ok(),
            "nb_learners" | "nb_train_stimuli" | "nb_test_stimuli" | "ticks_per_stimulus"
            | "grid_size" | "len_history" => value.parse::<usize>().is_ok(),
            "delta_t" | "frequency" | "wta_frequency" => value.parse::<f32>().is_ok(),
            _ => {
                return Err(ConfigError::InvalidValue(format!(
                    "Unknown override '{}'. Known keys: {}",
                    key,
                    CLI_OVERRIDE_KEYS.join(", ")
                )))
            }
        };
        if !parses {
            return Err(ConfigError::InvalidValue(format!(
                "Cannot parse override {}={}",
                key, value
            )));
        }
    }
    Ok(())
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"nb_learners": "12", "seed": "7"}`)
pub fn apply_cli_overrides(config: &mut SemConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("log_level") {
        config.system.log_level = value.clone();
    }
    if let Some(value) = cli_args.get("seed") {
        if let Ok(seed) = value.parse::<u64>() {
            config.system.seed = Some(seed);
        }
    }

    if let Some(value) = cli_args.get("nb_learners") {
        parse_into(value, &mut config.simulation.nb_learners);
    }
    if let Some(value) = cli_args.get("nb_train_stimuli") {
        parse_into(value, &mut config.simulation.nb_train_stimuli);
    }
    if let Some(value) = cli_args.get("nb_test_stimuli") {
        parse_into(value, &mut config.simulation.nb_test_stimuli);
    }
    if let Some(value) = cli_args.get("ticks_per_stimulus") {
        parse_into(value, &mut config.simulation.ticks_per_stimulus);
    }
    if let Some(value) = cli_args.get("grid_size") {
        parse_into(value, &mut config.simulation.grid_size);
    }
    if let Some(value) = cli_args.get("delta_t") {
        parse_into(value, &mut config.simulation.delta_t);
    }

    if let Some(value) = cli_args.get("frequency") {
        parse_into(value, &mut config.layer_y.frequency);
    }
    if let Some(value) = cli_args.get("wta_frequency") {
        parse_into(value, &mut config.layer_z.wta_frequency);
    }
    if let Some(value) = cli_args.get("len_history") {
        parse_into(value, &mut config.layer_z.len_history);
    }
}
