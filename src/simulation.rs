// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # SEM NIPS-2010 simulation
//!
//! Assembles a two-stage pipeline from [`SemConfig`]:
//!
//! ```text
//! "stimulus" -> LayerY (Poisson encoder) -> "spikes-y" -> LayerZ (WTA + STDP) -> "spikes-z"
//! ```
//!
//! Each stimulus is shown for `ticks_per_stimulus` ticks, followed by
//! `len_history` silent ticks so spikes from one stimulus never reach the
//! STDP window of the next.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info};

use sem_config::{SemConfig, SimulationConfig};
use sem_layers::layers::{layer_y, layer_z};
use sem_layers::{
    default_registry, LayerConfig, LayerIONames, LayerParams, LayerRegistry, LayerY, LayerZ,
};
use sem_structures::{Result, SemError, Signal};

use crate::pipeline::Pipeline;
use crate::response_stats::ResponseStats;
use crate::stimulus::BarStimulus;

/// Signal name carrying the stimulus rates
pub const STIMULUS_NAME: &str = "stimulus";
/// Signal name carrying encoder spikes
pub const SPIKES_Y_NAME: &str = "spikes-y";
/// Signal name carrying the WTA winner
pub const SPIKES_Z_NAME: &str = "spikes-z";

#[derive(Debug)]
pub struct Simulation {
    settings: SimulationConfig,
    len_history: usize,
    pipeline: Pipeline,
    stimuli: BarStimulus,
    signal: Signal,
}

fn layer_y_config(config: &SemConfig, seed: Option<u64>) -> Result<LayerConfig> {
    let mut params = LayerParams::new()
        .with(layer_y::PARAM_FREQ, config.layer_y.frequency)?
        .with(layer_y::PARAM_DELTA_T, config.simulation.delta_t)?;
    if let Some(seed) = seed {
        params.put(layer_y::PARAM_SEED, seed)?;
    }
    let io = LayerIONames::new()
        .with_input(layer_y::KEY_INPUT_STIMULUS, STIMULUS_NAME)
        .with_output(layer_y::KEY_OUTPUT_SPIKES, SPIKES_Y_NAME);
    Ok(LayerConfig::new(params).with_io(io))
}

fn layer_z_config(config: &SemConfig, nb_afferents: usize, seed: Option<u64>) -> Result<LayerConfig> {
    let stdp = &config.layer_z.stdp;
    let mut params = LayerParams::new()
        .with(layer_z::PARAM_NB_AFFERENTS, nb_afferents)?
        .with(layer_z::PARAM_NB_OUTPUT_NODES, config.simulation.nb_learners)?
        .with(layer_z::PARAM_LEN_HISTORY, config.layer_z.len_history)?
        .with(layer_z::PARAM_DELTA_T, config.simulation.delta_t)?
        .with(layer_z::PARAM_WTA_FREQ, config.layer_z.wta_frequency)?
        .with("stdp.a_plus", stdp.a_plus)?
        .with("stdp.a_minus", stdp.a_minus)?
        .with("stdp.tau", stdp.tau)?
        .with("stdp.eta_bias", stdp.eta_bias)?;
    if let Some(seed) = seed {
        params.put(layer_z::PARAM_SEED, seed)?;
    }
    let io = LayerIONames::new()
        .with_input(layer_z::KEY_INPUT_SPIKES, SPIKES_Y_NAME)
        .with_output(layer_z::KEY_OUTPUT_SPIKES, SPIKES_Z_NAME);
    Ok(LayerConfig::new(params).with_io(io))
}

impl Simulation {
    /// Build the pipeline described by `config` from the built-in layers.
    ///
    /// With `system.seed` set, the stimulus sequence and both layers are
    /// reproducible.
    pub fn new(config: &SemConfig) -> Result<Self> {
        Self::with_registry(config, default_registry())
    }

    /// Build the pipeline, resolving layer types through `registry`.
    ///
    /// # Errors
    /// `SemError::Type` if `registry` lacks `LayerY` or `LayerZ`.
    pub fn with_registry(config: &SemConfig, registry: &LayerRegistry) -> Result<Self> {
        let settings = config.simulation.clone();
        if settings.ticks_per_stimulus == 0 {
            return Err(SemError::value("ticks_per_stimulus must be > 0"));
        }

        let mut seeder = config.system.seed.map(StdRng::seed_from_u64);
        let mut next_seed = || seeder.as_mut().map(|rng| rng.next_u64());

        let stimuli = BarStimulus::new(settings.grid_size, next_seed())?;

        let y_config = layer_y_config(config, next_seed())?;
        let z_config = layer_z_config(config, stimuli.nb_elements(), next_seed())?;
        let pipeline = Pipeline::new()
            .with_layer(registry.create_shared_with(LayerY::TYPE_NAME, &y_config, y_config.io())?)
            .with_layer(registry.create_shared_with(LayerZ::TYPE_NAME, &z_config, z_config.io())?);

        info!(
            "[SIMULATION] {} learners, {}x{} grid, {} classes, delta_t={}ms",
            settings.nb_learners,
            settings.grid_size,
            settings.grid_size,
            stimuli.nb_classes(),
            settings.delta_t
        );

        Ok(Self {
            settings,
            len_history: config.layer_z.len_history,
            pipeline,
            stimuli,
            signal: Signal::new(),
        })
    }

    pub fn settings(&self) -> &SimulationConfig {
        &self.settings
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn nb_classes(&self) -> usize {
        self.stimuli.nb_classes()
    }

    /// Present `rates` for `ticks` ticks, returning the spike count per learner.
    pub fn present(&mut self, rates: &Array2<f32>, ticks: usize, learn: bool) -> Result<Vec<usize>> {
        let mut counts = vec![0usize; self.settings.nb_learners];
        for _ in 0..ticks {
            // one tick's worth of series; history lives inside the learners
            self.signal.clear();
            self.signal.append(STIMULUS_NAME, rates.clone());
            self.pipeline.tick(&mut self.signal, learn)?;

            let spikes = self.signal.most_recent_mat(SPIKES_Z_NAME)?;
            for (count, &spike) in counts.iter_mut().zip(spikes.iter()) {
                if spike > 0.5 {
                    *count += 1;
                }
            }
        }
        Ok(counts)
    }

    fn gap(&mut self) -> Result<()> {
        let silence = self.stimuli.silence();
        let len_history = self.len_history;
        self.present(&silence, len_history, false)?;
        Ok(())
    }

    /// Training phase: `nb_train_stimuli` presentations with learning enabled.
    pub fn learn(&mut self) -> Result<()> {
        info!("[SIMULATION] learning on {} stimuli", self.settings.nb_train_stimuli);
        for index in 0..self.settings.nb_train_stimuli {
            let stimulus = self.stimuli.next_stimulus()?;
            let counts = self.present(&stimulus.rates, self.settings.ticks_per_stimulus, true)?;
            self.gap()?;
            debug!(
                "[SIMULATION] train #{} class={} spikes={:?}",
                index, stimulus.label, counts
            );
        }
        Ok(())
    }

    /// Test phase: `nb_test_stimuli` presentations without learning.
    pub fn eval(&mut self) -> Result<ResponseStats> {
        info!("[SIMULATION] evaluating on {} stimuli", self.settings.nb_test_stimuli);
        let mut stats = ResponseStats::new(self.settings.nb_learners, self.stimuli.nb_classes());
        for _ in 0..self.settings.nb_test_stimuli {
            let stimulus = self.stimuli.next_stimulus()?;
            let counts = self.present(&stimulus.rates, self.settings.ticks_per_stimulus, false)?;
            self.gap()?;
            stats.record(stimulus.label, &counts)?;
        }

        info!(
            "[SIMULATION] eval done: {} spikes, purity={:.3}, classes covered={}/{}",
            stats.total_spikes(),
            stats.purity(),
            stats.classes_covered(),
            stats.nb_classes()
        );
        Ok(stats)
    }
}
