// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! WeightedSum - per-row `a × x₀ + b × x₁` over a two-column stimulus.

use ndarray::{s, Array2, Axis};

use sem_structures::{Result, SemError, Signal};

use crate::config::LayerConfig;
use crate::io_names::LayerIONames;
use crate::layer::Layer;

pub const KEY_INPUT_STIMULUS: &str = "input-stimulus";
pub const KEY_OUTPUT_RESPONSE: &str = "output-response";

pub const PARAM_A: &str = "a";
pub const PARAM_B: &str = "b";

#[derive(Debug, Default)]
pub struct WeightedSum {
    a: f32,
    b: f32,
    io: Option<(LayerIONames, String, String)>,
    response: Option<Array2<f32>>,
}

impl WeightedSum {
    pub const TYPE_NAME: &'static str = "WeightedSum";

    pub fn new() -> Self {
        Self::default()
    }
}

impl Layer for WeightedSum {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn clear(&mut self) {
        self.response = None;
    }

    fn reset(&mut self, config: &LayerConfig) -> Result<()> {
        self.a = config.params().get(PARAM_A)?;
        self.b = config.params().get(PARAM_B)?;
        self.io = None;
        self.clear();

        if !config.io().is_empty() {
            self.set_io_names(config.io())?;
        }
        Ok(())
    }

    fn set_io_names(&mut self, io: &LayerIONames) -> Result<()> {
        let input = io.input(KEY_INPUT_STIMULUS)?.to_string();
        let output = io.output(KEY_OUTPUT_RESPONSE)?.to_string();
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
        let stimulus = signal.most_recent_mat(input)?;

        if stimulus.ncols() != 2 {
            return Err(SemError::shape(format!(
                "{} expects 2 columns, got {}",
                Self::TYPE_NAME,
                stimulus.ncols()
            )));
        }

        let response = &stimulus.slice(s![.., 0]) * self.a + &stimulus.slice(s![.., 1]) * self.b;
        self.response = Some(response.insert_axis(Axis(1)));
        Ok(())
    }

    fn response(&self, signal: &mut Signal) -> Result<()> {
        let (_, _, output) = self
            .io
            .as_ref()
            .ok_or_else(|| SemError::key(format!("{} has no input/output names", Self::TYPE_NAME)))?;
        let response = self
            .response
            .as_ref()
            .ok_or_else(|| SemError::value(format!("{} responded before activation", Self::TYPE_NAME)))?;
        signal.append(output, response.clone());
        Ok(())
    }
}
