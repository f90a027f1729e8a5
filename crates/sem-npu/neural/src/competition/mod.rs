// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Competition between learners: decides which learner, if any, fires this tick.

pub mod sampler;
pub mod wta_poisson;

pub use sampler::{mean_centered_softmax, sample_index};
pub use wta_poisson::WtaPoisson;

use std::fmt::Debug;

use sem_structures::Result;

use crate::models::Learner;

/// Winner selection over a borrowed learner population.
///
/// Implementations must not retain `learners` past the call and must mark
/// fired learners through [`Learner::let_fire`].
pub trait Competition: Debug + Send {
    /// Returns one flag per learner; at most one is set.
    fn compete(&mut self, learners: &mut [Box<dyn Learner>]) -> Result<Vec<bool>>;
}
