// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Synthetic labelled bar stimuli.
//!
//! Class `k < grid_size` is a horizontal bar on row `k`; class
//! `grid_size + k` is a vertical bar on column `k`. Each stimulus is a
//! `1 x grid_size²` row of rates: 1.0 on the bar, 0.0 elsewhere.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sem_structures::{Result, SemError};

/// One labelled stimulus
#[derive(Debug, Clone, PartialEq)]
pub struct Stimulus {
    pub label: usize,
    pub rates: Array2<f32>,
}

/// Seedable source of bar stimuli with uniformly drawn classes
#[derive(Debug, Clone)]
pub struct BarStimulus {
    grid_size: usize,
    rng: StdRng,
}

impl BarStimulus {
    /// # Errors
    /// `SemError::Value` if `grid_size` is 0.
    pub fn new(grid_size: usize, seed: Option<u64>) -> Result<Self> {
        if grid_size == 0 {
            return Err(SemError::value("grid_size must be > 0"));
        }
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { grid_size, rng })
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Number of elements in one stimulus
    pub fn nb_elements(&self) -> usize {
        self.grid_size * self.grid_size
    }

    pub fn nb_classes(&self) -> usize {
        2 * self.grid_size
    }

    /// Rates for class `label`
    ///
    /// # Errors
    /// `SemError::Value` if `label` is not a valid class.
    pub fn render(&self, label: usize) -> Result<Array2<f32>> {
        if label >= self.nb_classes() {
            return Err(SemError::value(format!(
                "label {} out of range for {} classes",
                label,
                self.nb_classes()
            )));
        }

        let n = self.grid_size;
        let mut grid = Array2::<f32>::zeros((n, n));
        if label < n {
            grid.row_mut(label).fill(1.0);
        } else {
            grid.column_mut(label - n).fill(1.0);
        }

        grid.into_shape_with_order((1, n * n))
            .map_err(|e| SemError::shape(format!("stimulus: {}", e)))
    }

    /// All-zero input of stimulus size
    pub fn silence(&self) -> Array2<f32> {
        Array2::zeros((1, self.nb_elements()))
    }

    /// Draw the next stimulus
    pub fn next_stimulus(&mut self) -> Result<Stimulus> {
        let label = self.rng.gen_range(0..self.nb_classes());
        Ok(Stimulus {
            label,
            rates: self.render(label)?,
        })
    }
}
