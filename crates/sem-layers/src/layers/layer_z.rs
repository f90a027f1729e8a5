// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # LayerZ - spiking learners in one WTA circuit, learning via STDP
//!
//! Per tick:
//! 1. `activate`: every learner predicts from the most recent input spikes,
//!    then the WTA competitor picks at most one winner
//! 2. `response`: spikes (and optionally membrane potentials, weights, bias)
//!    are appended to the signal
//! 3. `learn`: every learner learns; only the winner actually updates

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info, trace};

use sem_npu_neural::{Competition, Learner, StdpParameters, WtaPoisson, ZNeuron};
use sem_structures::{Result, SemError, Signal};

use crate::config::LayerConfig;
use crate::io_names::LayerIONames;
use crate::layer::Layer;

pub const KEY_INPUT_SPIKES: &str = "input-spikes";
pub const KEY_OUTPUT_SPIKES: &str = "output-spikes";
pub const KEY_OUTPUT_MEMBRANE_POT: &str = "output-membrane-potential";
pub const KEY_OUTPUT_WEIGHTS: &str = "output-weights";
pub const KEY_OUTPUT_BIAS: &str = "output-bias";

pub const PARAM_NB_AFFERENTS: &str = "nb_afferents";
pub const PARAM_NB_OUTPUT_NODES: &str = "nb_output_nodes";
pub const PARAM_LEN_HISTORY: &str = "len_history";
pub const PARAM_DELTA_T: &str = "delta_t";
pub const PARAM_WTA_FREQ: &str = "wta_frequency";
pub const PARAM_SEED: &str = "seed";

pub const DEFAULT_LEN_HISTORY: usize = 5;
/// Milliseconds
pub const DEFAULT_DELTA_T: f32 = 1000.0;
/// Hz
pub const DEFAULT_WTA_FREQ: f32 = 1.0;

#[derive(Debug, Clone)]
struct Wiring {
    names: LayerIONames,
    input_spikes: String,
    output_spikes: String,
    output_mem_pot: Option<String>,
    output_weights: Option<String>,
    output_bias: Option<String>,
}

#[derive(Debug, Default)]
pub struct LayerZ {
    nb_afferents: usize,
    stdp: StdpParameters,
    wiring: Option<Wiring>,
    u: Vec<f32>,
    spikes: Vec<bool>,
    learners: Vec<Box<dyn Learner>>,
    wta: Option<WtaPoisson>,
}

fn stdp_from_config(config: &LayerConfig) -> Result<StdpParameters> {
    let defaults = StdpParameters::default();
    let params = config.params();
    Ok(StdpParameters {
        a_plus: params.get_or("stdp.a_plus", defaults.a_plus)?,
        a_minus: params.get_or("stdp.a_minus", defaults.a_minus)?,
        tau: params.get_or("stdp.tau", defaults.tau)?,
        eta_bias: params.get_or("stdp.eta_bias", defaults.eta_bias)?,
    })
}

impl LayerZ {
    pub const TYPE_NAME: &'static str = "LayerZ";

    pub fn new() -> Self {
        Self::default()
    }

    /// Construct, reset with `config` and apply the wiring it carries
    pub fn with_config(config: &LayerConfig) -> Result<Self> {
        let mut layer = Self::new();
        layer.reset(config)?;
        Ok(layer)
    }

    pub fn nb_afferents(&self) -> usize {
        self.nb_afferents
    }

    pub fn learners(&self) -> &[Box<dyn Learner>] {
        &self.learners
    }

    pub fn stdp(&self) -> &StdpParameters {
        &self.stdp
    }

    /// Membrane potentials from the last `activate`
    pub fn membrane_potentials(&self) -> &[f32] {
        &self.u
    }

    /// Winner flags from the last `activate`
    pub fn spikes(&self) -> &[bool] {
        &self.spikes
    }

    fn wiring(&self) -> Result<&Wiring> {
        self.wiring
            .as_ref()
            .ok_or_else(|| SemError::key(format!("{} has no input/output names", Self::TYPE_NAME)))
    }

    fn weights_mat(&self) -> Result<Array2<f32>> {
        let flat: Vec<f32> = self
            .learners
            .iter()
            .flat_map(|l| l.weights().iter().copied())
            .collect();
        Array2::from_shape_vec((self.learners.len(), self.nb_afferents), flat)
            .map_err(|e| SemError::shape(format!("weights: {}", e)))
    }
}

fn build_learners(
    stdp: StdpParameters,
    nb_afferents: usize,
    nb_output_nodes: usize,
    len_history: usize,
    rng: &mut dyn RngCore,
) -> Result<Vec<Box<dyn Learner>>> {
    let mut learners: Vec<Box<dyn Learner>> = Vec::with_capacity(nb_output_nodes);
    for _ in 0..nb_output_nodes {
        let mut learner: Box<dyn Learner> = Box::new(ZNeuron::new(stdp));
        learner.init(nb_afferents, len_history, rng)?;
        learners.push(learner);
    }
    Ok(learners)
}

fn wiring_from(io: &LayerIONames) -> Result<Wiring> {
    Ok(Wiring {
        names: io.clone(),
        input_spikes: io.input(KEY_INPUT_SPIKES)?.to_string(),
        output_spikes: io.output(KEY_OUTPUT_SPIKES)?.to_string(),
        output_mem_pot: io.output_opt(KEY_OUTPUT_MEMBRANE_POT).map(str::to_string),
        output_weights: io.output_opt(KEY_OUTPUT_WEIGHTS).map(str::to_string),
        output_bias: io.output_opt(KEY_OUTPUT_BIAS).map(str::to_string),
    })
}

fn row(values: impl Iterator<Item = f32>) -> Array2<f32> {
    Array1::from_iter(values).insert_axis(Axis(0))
}

impl Layer for LayerZ {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn clear(&mut self) {
        self.u.iter_mut().for_each(|u| *u = 0.0);
        self.spikes.iter_mut().for_each(|s| *s = false);
        for learner in self.learners.iter_mut() {
            learner.clear();
        }
    }

    fn reset(&mut self, config: &LayerConfig) -> Result<()> {
        let params = config.params();
        let nb_afferents: usize = params.get(PARAM_NB_AFFERENTS)?;
        let nb_output_nodes: usize = params.get(PARAM_NB_OUTPUT_NODES)?;
        let len_history = params.get_or(PARAM_LEN_HISTORY, DEFAULT_LEN_HISTORY)?;
        let delta_t = params.get_or(PARAM_DELTA_T, DEFAULT_DELTA_T)?;
        let wta_frequency = params.get_or(PARAM_WTA_FREQ, DEFAULT_WTA_FREQ)?;
        let seed: Option<u64> = params.get_opt(PARAM_SEED)?;

        if nb_afferents == 0 {
            return Err(SemError::value("nb_afferents must be > 0"));
        }
        if nb_output_nodes == 0 {
            return Err(SemError::value("nb_output_nodes must be > 0"));
        }
        let stdp = stdp_from_config(config)?;
        stdp.validate()?;

        // self stays untouched until every part is built
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let learners = build_learners(stdp, nb_afferents, nb_output_nodes, len_history, &mut rng)?;
        // one seed drives both learner init and competition
        let wta_seed = seed.map(|_| rng.next_u64());
        let wta = WtaPoisson::new(wta_frequency, delta_t, wta_seed)?;
        let wiring = if config.io().is_empty() {
            None
        } else {
            Some(wiring_from(config.io())?)
        };

        self.nb_afferents = nb_afferents;
        self.stdp = stdp;
        self.learners = learners;
        self.wta = Some(wta);
        self.u = vec![0.0; nb_output_nodes];
        self.spikes = vec![false; nb_output_nodes];
        self.wiring = wiring;

        info!(
            "[LAYER-Z] reset: {} learners x {} afferents, history={}, delta_t={}ms, wta={}Hz",
            nb_output_nodes, nb_afferents, len_history, delta_t, wta_frequency
        );
        Ok(())
    }

    fn set_io_names(&mut self, io: &LayerIONames) -> Result<()> {
        self.wiring = Some(wiring_from(io)?);
        Ok(())
    }

    fn io_names(&self) -> Option<&LayerIONames> {
        self.wiring.as_ref().map(|w| &w.names)
    }

    fn activate(&mut self, signal: &Signal) -> Result<()> {
        let input = signal.most_recent_mat(&self.wiring()?.input_spikes)?;
        if input.len() != self.nb_afferents {
            return Err(SemError::shape(format!(
                "{} expects {} afferents, input has {} elements",
                Self::TYPE_NAME,
                self.nb_afferents,
                input.len()
            )));
        }
        let evidence: Vec<f32> = input.iter().copied().collect();

        for (u, learner) in self.u.iter_mut().zip(self.learners.iter_mut()) {
            *u = learner.predict(&evidence)?;
        }
        trace!("[LAYER-Z] membrane potentials: {:?}", self.u);

        let wta = self
            .wta
            .as_mut()
            .ok_or_else(|| SemError::value(format!("{} used before reset", Self::TYPE_NAME)))?;
        self.spikes = wta.compete(&mut self.learners)?;

        if let Some(winner) = self.spikes.iter().position(|&s| s) {
            debug!("[LAYER-Z] learner {} fired", winner);
        }
        Ok(())
    }

    fn response(&self, signal: &mut Signal) -> Result<()> {
        let wiring = self.wiring()?;

        signal.append(
            &wiring.output_spikes,
            row(self.spikes.iter().map(|&s| if s { 1.0 } else { 0.0 })),
        );

        if let Some(name) = &wiring.output_mem_pot {
            signal.append(name, row(self.u.iter().copied()));
        }
        if let Some(name) = &wiring.output_weights {
            signal.append(name, self.weights_mat()?);
        }
        if let Some(name) = &wiring.output_bias {
            let bias: Vec<f32> = self.learners.iter().map(|l| l.bias()).collect();
            let n = bias.len();
            let bias = Array2::from_shape_vec((n, 1), bias)
                .map_err(|e| SemError::shape(format!("bias: {}", e)))?;
            signal.append(name, bias);
        }
        Ok(())
    }

    fn learn(&mut self) -> Result<()> {
        for learner in self.learners.iter_mut() {
            learner.learn()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::LayerParams;

    fn config(nb_afferents: usize, nb_output_nodes: usize) -> LayerConfig {
        let params = LayerParams::new()
            .with(PARAM_NB_AFFERENTS, nb_afferents)
            .and_then(|p| p.with(PARAM_NB_OUTPUT_NODES, nb_output_nodes))
            .and_then(|p| p.with(PARAM_SEED, 42u64))
            .unwrap();
        LayerConfig::new(params)
    }

    fn io() -> LayerIONames {
        LayerIONames::new()
            .with_input(KEY_INPUT_SPIKES, "y")
            .with_output(KEY_OUTPUT_SPIKES, "z")
    }

    #[test]
    fn test_missing_required_param() {
        let mut layer = LayerZ::new();
        let err = layer.reset(&LayerConfig::default()).unwrap_err();
        assert!(matches!(err, SemError::Key(_)));
    }

    #[test]
    fn test_zero_output_nodes_rejected() {
        let mut layer = LayerZ::new();
        assert!(matches!(layer.reset(&config(3, 0)), Err(SemError::Value(_))));
    }

    #[test]
    fn test_wiring_requires_spike_keys() {
        let mut layer = LayerZ::with_config(&config(3, 2)).unwrap();
        let io = LayerIONames::new().with_input(KEY_INPUT_SPIKES, "y");
        assert!(matches!(layer.set_io_names(&io), Err(SemError::Key(_))));
    }

    #[test]
    fn test_unwired_activate_is_key_error() {
        let mut layer = LayerZ::with_config(&config(3, 2)).unwrap();
        assert!(matches!(layer.activate(&Signal::new()), Err(SemError::Key(_))));
    }

    #[test]
    fn test_seeded_layers_are_reproducible() {
        let a = LayerZ::with_config(&config(4, 3)).unwrap();
        let b = LayerZ::with_config(&config(4, 3)).unwrap();
        for (la, lb) in a.learners().iter().zip(b.learners()) {
            assert_eq!(la.weights(), lb.weights());
            assert_eq!(la.bias(), lb.bias());
        }
    }

    #[test]
    fn test_response_shapes() {
        let mut layer = LayerZ::with_config(&config(3, 2)).unwrap();
        let io = io()
            .with_output(KEY_OUTPUT_MEMBRANE_POT, "u")
            .with_output(KEY_OUTPUT_WEIGHTS, "w")
            .with_output(KEY_OUTPUT_BIAS, "b");
        layer.set_io_names(&io).unwrap();

        let mut signal = Signal::new();
        signal.append("y", Array2::from_elem((1, 3), 1.0f32));
        layer.activate(&signal).unwrap();
        layer.response(&mut signal).unwrap();

        assert_eq!(signal.most_recent_mat("z").unwrap().dim(), (1, 2));
        assert_eq!(signal.most_recent_mat("u").unwrap().dim(), (1, 2));
        assert_eq!(signal.most_recent_mat("w").unwrap().dim(), (2, 3));
        assert_eq!(signal.most_recent_mat("b").unwrap().dim(), (2, 1));
    }

    fn weights(layer: &LayerZ) -> Vec<Vec<f32>> {
        layer.learners().iter().map(|l| l.weights().to_vec()).collect()
    }

    #[test]
    fn test_failed_reconfigure_keeps_previous_layer() {
        let mut layer = LayerZ::with_config(&config(3, 2).with_io(io())).unwrap();
        let before = weights(&layer);

        let params = config(3, 5).params().clone().with(PARAM_WTA_FREQ, 0.0f32).unwrap();
        let err = layer.reconfigure(&LayerConfig::new(params)).unwrap_err();
        assert!(matches!(err, SemError::Value(_)));

        assert_eq!(layer.learners().len(), 2);
        assert_eq!(weights(&layer), before);

        let mut signal = Signal::new();
        signal.append("y", Array2::from_elem((1, 3), 1.0f32));
        layer.activate(&signal).unwrap();
        layer.response(&mut signal).unwrap();
        assert_eq!(signal.most_recent_mat("z").unwrap().dim(), (1, 2));
        assert_eq!(layer.membrane_potentials().len(), 2);
    }

    #[test]
    fn test_invalid_stdp_rejected_without_side_effects() {
        let mut layer = LayerZ::with_config(&config(3, 2)).unwrap();
        let params = config(3, 4).params().clone().with("stdp.tau", 0.0f32).unwrap();

        assert!(matches!(layer.reset(&LayerConfig::new(params)), Err(SemError::Value(_))));
        assert_eq!(layer.learners().len(), 2);
    }

    #[test]
    fn test_clear_drops_learned_weights() {
        let params = config(3, 2).params().clone().with(PARAM_WTA_FREQ, 1.0e6f32).unwrap();
        let mut layer = LayerZ::with_config(&LayerConfig::new(params).with_io(io())).unwrap();
        let initial = weights(&layer);

        let mut signal = Signal::new();
        signal.append("y", ndarray::array![[1.0f32, 1.0, 0.0]]);
        for _ in 0..10 {
            layer.activate(&signal).unwrap();
            layer.learn().unwrap();
        }
        assert_ne!(weights(&layer), initial);

        layer.clear();
        assert_eq!(weights(&layer), initial);
        assert!(layer.spikes().iter().all(|&s| !s));
        assert!(layer.membrane_potentials().iter().all(|&u| u == 0.0));
    }
}
