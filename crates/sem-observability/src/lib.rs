// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # sem-observability
//!
//! Logging infrastructure shared by SEM binaries, with per-crate debug flag
//! support.
//!
//! ## Features
//! - `file-logging`: additionally write logs to a per-run folder

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known SEM crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "sem",
    "sem-structures",
    "sem-npu-neural",
    "sem-layers",
    "sem-config",
    "sem-observability",
];
