// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Z Neuron (integrate-and-fire STDP learner)
//!
//! ```text
//! Init:
//!     w_i = 0.01 × |n_i|,  n_i ~ N(0, 1)
//!     b   = 0.01 × |n|
//!
//! Predict:
//!     u = Σ w_i × x_i + b
//!     history ← (x_i > 0)
//!
//! Learn (only if fired this tick):
//!     w_i += stdp(ticks since line i fired)
//!     b   += eta_bias × (exp(−b) − 1)
//! ```

use rand::RngCore;
use rand_distr::{Distribution, StandardNormal};
use tracing::trace;

use sem_structures::{Result, SemError};

use super::traits::Learner;
use crate::spiking_history::SpikingHistory;
use crate::stdp::{compute_bias_change, compute_weight_change, StdpParameters};

/// Scale applied to half-normal draws at initialization
pub const INIT_SCALE: f32 = 0.01;

#[derive(Debug, Clone)]
pub struct ZNeuron {
    params: StdpParameters,
    has_fired: bool,
    state: f32,
    bias: f32,
    weights: Vec<f32>,
    /// Values drawn by `init`, restored by `clear`
    initial_weights: Vec<f32>,
    initial_bias: f32,
    history: Option<SpikingHistory>,
}

impl ZNeuron {
    pub fn new(params: StdpParameters) -> Self {
        Self {
            params,
            has_fired: false,
            state: 0.0,
            bias: 0.0,
            weights: Vec::new(),
            initial_weights: Vec::new(),
            initial_bias: 0.0,
            history: None,
        }
    }

    pub fn params(&self) -> &StdpParameters {
        &self.params
    }

    fn history_mut(&mut self) -> Result<&mut SpikingHistory> {
        self.history
            .as_mut()
            .ok_or_else(|| SemError::value("ZNeuron used before init"))
    }
}

impl Default for ZNeuron {
    fn default() -> Self {
        Self::new(StdpParameters::default())
    }
}

fn half_normal(rng: &mut dyn RngCore) -> f32 {
    let n: f32 = StandardNormal.sample(rng);
    n.abs() * INIT_SCALE
}

impl Learner for ZNeuron {
    fn model_name(&self) -> &'static str {
        "ZNeuron (STDP)"
    }

    fn init(&mut self, nb_features: usize, len_history: usize, rng: &mut dyn RngCore) -> Result<()> {
        self.history = Some(SpikingHistory::new(nb_features, len_history)?);
        self.weights = (0..nb_features).map(|_| half_normal(rng)).collect();
        self.bias = half_normal(rng);
        self.initial_weights = self.weights.clone();
        self.initial_bias = self.bias;
        self.state = 0.0;
        self.has_fired = false;
        Ok(())
    }

    fn predict(&mut self, evidence: &[f32]) -> Result<f32> {
        if evidence.len() != self.weights.len() {
            return Err(SemError::shape(format!(
                "evidence has {} elements, learner expects {}",
                evidence.len(),
                self.weights.len()
            )));
        }

        let fired: Vec<bool> = evidence.iter().map(|&x| x > 0.0).collect();
        self.history_mut()?.push(&fired)?;

        self.state = self
            .weights
            .iter()
            .zip(evidence)
            .map(|(w, x)| w * x)
            .sum::<f32>()
            + self.bias;
        self.has_fired = false;
        Ok(self.state)
    }

    fn state(&self) -> f32 {
        self.state
    }

    fn let_fire(&mut self, fire: bool) {
        self.has_fired = fire;
    }

    fn has_fired(&self) -> bool {
        self.has_fired
    }

    fn learn(&mut self) -> Result<()> {
        if !self.has_fired {
            return Ok(());
        }

        let params = self.params;
        let history = self
            .history
            .as_ref()
            .ok_or_else(|| SemError::value("ZNeuron used before init"))?;

        for (line, w) in self.weights.iter_mut().enumerate() {
            *w += compute_weight_change(history.time_since_last_fire(line), &params);
        }
        self.bias += compute_bias_change(self.bias, &params);

        trace!("[ZNEURON] learned: bias={:.6}", self.bias);
        Ok(())
    }

    fn clear(&mut self) {
        self.weights.clone_from(&self.initial_weights);
        self.bias = self.initial_bias;
        self.state = 0.0;
        self.has_fired = false;
        if let Some(history) = self.history.as_mut() {
            history.clear();
        }
    }

    fn weights(&self) -> &[f32] {
        &self.weights
    }

    fn bias(&self) -> f32 {
        self.bias
    }
}
