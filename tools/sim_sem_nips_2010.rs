// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
SEM NIPS-2010 simulation

Trains a winner-take-all population of spiking learners on synthetic bar
stimuli, then reports how well each learner specialised on one class.

Usage:
  cargo run --release --bin sim_sem_nips_2010 -- [--config <file.toml>] [key=value ...] [--debug-<crate> ...]

Example:
  cargo run --release --bin sim_sem_nips_2010 -- seed=7 nb_learners=8 --debug-sem-layers

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use sem::config::{
    apply_cli_overrides, apply_environment_overrides, check_cli_overrides, load_config,
    validate_config, ConfigError, SemConfig, CLI_OVERRIDE_KEYS,
};
use sem::observability::{debug_flags_help, init_logging, parse_debug_flags, LoggingOptions};
use sem::Simulation;

#[derive(Debug, Default, PartialEq)]
struct Args {
    config_path: Option<PathBuf>,
    overrides: HashMap<String, String>,
}

/// Parse everything after the program name. `--debug-*` flags are left to
/// `parse_debug_flags`; any other argument must be `--config <file>` or a
/// known `key=value` override.
fn parse_args<I>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args::default();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--config" {
            let path = args.next().context("--config requires a file path")?;
            parsed.config_path = Some(PathBuf::from(path));
        } else if arg.starts_with("--debug-") {
            continue;
        } else if let Some((key, value)) = arg.split_once('=') {
            parsed.overrides.insert(key.to_string(), value.to_string());
        } else {
            bail!("Unrecognised argument '{}' (see --help)", arg);
        }
    }

    check_cli_overrides(&parsed.overrides)?;
    Ok(parsed)
}

/// Load the config file, or defaults when none can be found.
/// Returns whether the defaults were used.
fn resolve_config(args: &Args) -> Result<(SemConfig, bool)> {
    match load_config(args.config_path.as_deref(), Some(&args.overrides)) {
        Ok(config) => Ok((config, false)),
        Err(ConfigError::FileNotFound(_)) if args.config_path.is_none() => {
            let mut config = SemConfig::default();
            apply_environment_overrides(&mut config);
            apply_cli_overrides(&mut config, &args.overrides);
            validate_config(&config)?;
            Ok((config, true))
        }
        Err(e) => Err(e).context("Failed to load SEM configuration"),
    }
}

fn main() -> Result<()> {
    if env::args().any(|a| a == "--help" || a == "-h") {
        println!("Overrides (key=value): {}\n", CLI_OVERRIDE_KEYS.join(", "));
        println!("{}", debug_flags_help());
        return Ok(());
    }

    let args = parse_args(env::args().skip(1))?;
    let (config, used_defaults) = resolve_config(&args)?;

    let debug_flags = parse_debug_flags();
    let _log_guard = init_logging(
        &debug_flags,
        &LoggingOptions {
            level: config.system.log_level.clone(),
            ansi: config.logging.ansi,
            log_dir: config
                .logging
                .file_logging
                .then(|| config.logging.log_dir.clone()),
        },
    )?;

    if used_defaults {
        warn!("No configuration file found, using defaults");
    }
    info!("SEM NIPS-2010 simulation v{}", env!("CARGO_PKG_VERSION"));

    let mut simulation = Simulation::new(&config).context("Failed to build simulation")?;
    simulation.learn().context("Learning phase failed")?;
    let stats = simulation.eval().context("Evaluation phase failed")?;

    for learner in 0..stats.nb_learners() {
        match stats.preferred_class(learner) {
            Some(class) => info!(
                "learner {}: class {} ({} of {} spikes)",
                learner,
                class,
                stats.count(learner, class),
                stats.learner_total(learner)
            ),
            None => info!("learner {}: silent", learner),
        }
    }
    info!(
        "purity={:.3} classes covered={}/{}",
        stats.purity(),
        stats.classes_covered(),
        stats.nb_classes()
    );
    info!("summary: {}", serde_json::to_string(&stats)?);

    Ok(())
}
