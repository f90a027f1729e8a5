// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-sem-layers`, `--debug-sem-npu-neural`, etc.
//! to raise the log level of individual crates.

use std::collections::HashMap;
use std::env;

use crate::KNOWN_CRATES;

/// Environment variable listing crates to debug
pub const DEBUG_ENV: &str = "SEM_DEBUG";

/// Parse debug flags from command-line arguments
///
/// # Example
/// ```rust
/// use sem_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(vec!["--debug-sem-layers".to_string()]);
/// assert!(flags.is_enabled("sem-layers"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrateDebugFlags {
    pub enabled_crates: HashMap<String, bool>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}` pattern.
    /// Also supports `--debug-all` to enable all crates.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();

        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
                continue;
            }

            if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enable(crate_name);
            }
        }

        flags
    }

    pub fn enable(&mut self, crate_name: &str) {
        self.enabled_crates.insert(crate_name.to_string(), true);
    }

    pub fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enable(crate_name);
        }
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains_key(crate_name)
    }

    /// Get all enabled crates
    pub fn enabled_crates(&self) -> Vec<&String> {
        self.enabled_crates.keys().collect()
    }

    /// Check if debug is enabled for any crate
    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Returns `tracing::Level::DEBUG` if enabled, `tracing::Level::INFO` otherwise.
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Create an `EnvFilter` directive string from the debug flags
    ///
    /// Crate names are turned into module targets (`sem-layers` → `sem_layers`).
    /// Format: `"sem_layers=debug,info"`, or just `default_level` if none enabled.
    pub fn to_filter_string(&self, default_level: &str) -> String {
        let mut targets: Vec<String> = self
            .enabled_crates
            .keys()
            .map(|name| format!("{}=debug", name.replace('-', "_")))
            .collect();
        targets.sort_unstable();
        targets.push(default_level.to_lowercase());
        targets.join(",")
    }
}

/// Parse debug flags from command-line arguments and the `SEM_DEBUG` environment variable.
///
/// Environment variable format: comma-separated crate names, e.g. `"sem-layers,sem-npu-neural"`,
/// or `"all"`.
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());

    if let Ok(env_var) = env::var(DEBUG_ENV) {
        if env_var == "all" {
            flags.enable_all();
        } else {
            for crate_name in env_var.split(',') {
                let crate_name = crate_name.trim();
                if !crate_name.is_empty() {
                    flags.enable(crate_name);
                }
            }
        }
    }

    flags
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  {}={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  {}=all                             Enable debug for all crates

Examples:
  --debug-sem-layers
  --debug-sem-layers --debug-sem-npu-neural
  {}=sem-layers,sem-npu-neural
"#,
        KNOWN_CRATES.join(", "),
        DEBUG_ENV,
        DEBUG_ENV,
        DEBUG_ENV
    )
}
