// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! LayerY - Poisson spike encoder.
//!
//! Each input element is a rate in `[0, 1]` and fires this tick with
//! probability `min(1, rate × frequency × Δt)`.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use sem_structures::{Result, SemError, Signal};

use crate::config::LayerConfig;
use crate::io_names::LayerIONames;
use crate::layer::Layer;

pub const KEY_INPUT_STIMULUS: &str = "input-stimulus";
pub const KEY_OUTPUT_SPIKES: &str = "output-spikes";

pub const PARAM_FREQ: &str = "frequency";
pub const PARAM_DELTA_T: &str = "delta_t";
pub const PARAM_SEED: &str = "seed";

/// Hz
pub const DEFAULT_FREQ: f32 = 40.0;
/// Milliseconds
pub const DEFAULT_DELTA_T: f32 = 1.0;

#[derive(Debug)]
pub struct LayerY {
    frequency: f32,
    delta_t_msec: f32,
    rng: StdRng,
    io: Option<(LayerIONames, String, String)>,
    spikes: Array2<f32>,
}

impl Default for LayerY {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_FREQ,
            delta_t_msec: DEFAULT_DELTA_T,
            rng: StdRng::from_entropy(),
            io: None,
            spikes: Array2::zeros((0, 0)),
        }
    }
}

impl LayerY {
    pub const TYPE_NAME: &'static str = "LayerY";

    pub fn new() -> Self {
        Self::default()
    }

    /// Firing probability for an element with the given rate
    pub fn spike_probability(&self, rate: f32) -> f32 {
        (rate * self.frequency * self.delta_t_msec * 1e-3).clamp(0.0, 1.0)
    }
}

impl Layer for LayerY {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn clear(&mut self) {
        self.spikes = Array2::zeros((0, 0));
    }

    fn reset(&mut self, config: &LayerConfig) -> Result<()> {
        let params = config.params();
        let frequency = params.get_or(PARAM_FREQ, DEFAULT_FREQ)?;
        let delta_t_msec = params.get_or(PARAM_DELTA_T, DEFAULT_DELTA_T)?;
        if !(frequency >= 0.0 && frequency.is_finite()) {
            return Err(SemError::value(format!("frequency must be >= 0, got {}", frequency)));
        }
        if !(delta_t_msec > 0.0 && delta_t_msec.is_finite()) {
            return Err(SemError::value(format!("delta_t must be > 0, got {}", delta_t_msec)));
        }

        self.frequency = frequency;
        self.delta_t_msec = delta_t_msec;
        self.rng = match params.get_opt::<u64>(PARAM_SEED)? {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.io = None;
        self.clear();

        info!("[LAYER-Y] reset: frequency={}Hz, delta_t={}ms", frequency, delta_t_msec);

        if !config.io().is_empty() {
            self.set_io_names(config.io())?;
        }
        Ok(())
    }

    fn set_io_names(&mut self, io: &LayerIONames) -> Result<()> {
        let input = io.input(KEY_INPUT_STIMULUS)?.to_string();
        let output = io.output(KEY_OUTPUT_SPIKES)?.to_string();
        self.io = Some((io.clone(), input, output));
        Ok(())
    }

    fn io_names(&self) -> Option<&LayerIONames> {
        self.io.as_ref().map(|(names, _, _)| names)
    }

    fn activate(&mut self, signal: &Signal) -> Result<()> {
        let (_, input, _) = self
            .io
            .as_ref()
            .ok_or_else(|| SemError::key(format!("{} has no input/output names", Self::TYPE_NAME)))?;
        let rates = signal.most_recent_mat(input)?;

        let mut spikes = Array2::zeros(rates.dim());
        for (spike, &rate) in spikes.iter_mut().zip(rates.iter()) {
            let p = self.spike_probability(rate);
            *spike = if self.rng.gen::<f32>() < p { 1.0 } else { 0.0 };
        }
        self.spikes = spikes;
        Ok(())
    }

    fn response(&self, signal: &mut Signal) -> Result<()> {
        let (_, _, output) = self
            .io
            .as_ref()
            .ok_or_else(|| SemError::key(format!("{} has no input/output names", Self::TYPE_NAME)))?;
        signal.append(output, self.spikes.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::LayerParams;

    fn layer(frequency: f32, delta_t: f32) -> LayerY {
        let params = LayerParams::new()
            .with(PARAM_FREQ, frequency)
            .and_then(|p| p.with(PARAM_DELTA_T, delta_t))
            .and_then(|p| p.with(PARAM_SEED, 1u64))
            .unwrap();
        let io = LayerIONames::new()
            .with_input(KEY_INPUT_STIMULUS, "x")
            .with_output(KEY_OUTPUT_SPIKES, "y");
        let mut layer = LayerY::new();
        layer.reset(&LayerConfig::new(params).with_io(io)).unwrap();
        layer
    }

    #[test]
    fn test_probability_is_clamped() {
        let layer = layer(40.0, 1.0);
        assert!((layer.spike_probability(0.5) - 0.02).abs() < 1e-6);
        assert_eq!(layer.spike_probability(-1.0), 0.0);

        let saturated = self::layer(1000.0, 10.0);
        assert_eq!(saturated.spike_probability(0.5), 1.0);
    }

    #[test]
    fn test_saturated_rates_always_fire() {
        let mut layer = layer(1000.0, 1000.0);
        let mut signal = Signal::new();
        signal.append("x", ndarray::array![[1.0f32, 0.0, 1.0]]);

        layer.activate(&signal).unwrap();
        layer.response(&mut signal).unwrap();

        let spikes = signal.most_recent_mat("y").unwrap();
        assert_eq!(spikes, ndarray::array![[1.0f32, 0.0, 1.0]]);
    }

    #[test]
    fn test_wired_from_config() {
        let layer = layer(40.0, 1.0);
        assert_eq!(layer.io_names().unwrap().input("input-stimulus").unwrap(), "x");
    }
}
