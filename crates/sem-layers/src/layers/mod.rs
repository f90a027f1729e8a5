// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Built-in layer types

pub mod layer_y;
pub mod layer_z;
pub mod weighted_sum;

pub use layer_y::LayerY;
pub use layer_z::LayerZ;
pub use weighted_sum::WeightedSum;
