// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Learner Model Architecture
//!
//! Learning units implement the [`Learner`] trait so that a learning layer can
//! hold a heterogeneous population and a competitor can inspect their states.
//!
//! ## Adding a New Learner Model
//!
//! 1. Create `src/models/your_model.rs`
//! 2. Implement `Learner` trait
//! 3. Add tests
//! 4. Export in `mod.rs`

pub mod traits;
pub mod zneuron;

pub use traits::Learner;
pub use zneuron::ZNeuron;
