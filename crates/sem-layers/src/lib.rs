// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # SEM Layers
//!
//! Layers are pipeline stages that read named series from a
//! [`Signal`](sem_structures::Signal), compute, and append their outputs.
//! They are assembled by type name through a [`LayerRegistry`], configured with
//! a [`LayerConfig`] and wired with [`LayerIONames`].
//!
//! ```
//! use sem_layers::{default_registry, LayerConfig, LayerIONames, LayerParams};
//! use sem_structures::Signal;
//! use ndarray::array;
//!
//! let params = LayerParams::new().with("a", 0.2).unwrap().with("b", 0.3).unwrap();
//! let io = LayerIONames::new()
//!     .with_input("input-stimulus", "in")
//!     .with_output("output-response", "out");
//!
//! let mut layer = default_registry()
//!     .create_shared_with("WeightedSum", &LayerConfig::new(params), &io)
//!     .unwrap();
//!
//! let mut signal = Signal::new();
//! signal.append("in", array![[1.0f32, 1.0]]);
//! layer.activate(&signal).unwrap();
//! layer.response(&mut signal).unwrap();
//!
//! assert!((signal.most_recent_mat("out").unwrap()[[0, 0]] - 0.5).abs() < 1e-6);
//! ```

pub mod config;
pub mod io_names;
pub mod layer;
pub mod layers;
pub mod params;
pub mod registry;

pub use config::LayerConfig;
pub use io_names::LayerIONames;
pub use layer::Layer;
pub use layers::{LayerY, LayerZ, WeightedSum};
pub use params::LayerParams;
pub use registry::{default_registry, LayerConstructor, LayerRegistry, LayerShared};
