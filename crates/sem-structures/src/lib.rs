// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! The core crate for SEM. Defines the data structures exchanged between layers:
//!
//! - **TypedValue**: one feature in one representation, with a lazily filled
//!   conversion cache
//! - **Signal**: named, append-only series of typed values (the inter-layer bus)
//! - **PointCloud**: the geometric representation a feature may take
//! - **SemError**: the shared `Key` / `Shape` / `Type` / `Value` error taxonomy

mod conversions;
mod error;
mod point_cloud;
mod signal;
mod value;

pub use conversions::{cloud_to_mat, mat_to_cloud};
pub use error::{Result, SemError};
pub use point_cloud::{Point3, PointCloud};
pub use signal::Signal;
pub use value::{FeatureVariant, ReprKind, Representation, TypedValue};

/// Dense row-major matrix of floats, the default feature representation
pub type Mat = ndarray::Array2<f32>;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
