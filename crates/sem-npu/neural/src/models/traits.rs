// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Debug;

use rand::RngCore;
use sem_structures::Result;

/// A learning unit: scalar readiness state, prediction and a spike-gated
/// weight update.
///
/// Per tick the owning layer calls, in order:
/// 1. [`predict`](Learner::predict) on every learner (clears `has_fired`)
/// 2. the competitor, which calls [`let_fire`](Learner::let_fire) on at most one
/// 3. [`learn`](Learner::learn) on every learner; only the fired one updates
pub trait Learner: Debug + Send {
    /// Human-readable model name
    fn model_name(&self) -> &'static str;

    /// Allocate weights for `nb_features` afferents and a spiking history of
    /// `len_history` ticks, drawing initial values from `rng`.
    fn init(&mut self, nb_features: usize, len_history: usize, rng: &mut dyn RngCore) -> Result<()>;

    /// Membrane potential for `evidence`. Records the evidence as this tick's
    /// spike frame and clears the fired flag.
    fn predict(&mut self, evidence: &[f32]) -> Result<f32>;

    /// Membrane potential computed by the last `predict`
    fn state(&self) -> f32;

    fn let_fire(&mut self, fire: bool);

    fn has_fired(&self) -> bool;

    /// Apply the learning rule if the learner fired this tick; otherwise a no-op.
    fn learn(&mut self) -> Result<()>;

    /// Drop everything learned since `init`: restore the initial weights and
    /// bias and empty the spiking history.
    fn clear(&mut self);

    fn weights(&self) -> &[f32];

    fn bias(&self) -> f32;
}
