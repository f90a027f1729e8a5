// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use rand::distributions::WeightedIndex;
use rand::Rng;
use rand_distr::Distribution;

use sem_structures::{Result, SemError};

/// `softmax(u − mean(u))`
///
/// # Errors
/// - `SemError::Shape` if `states` is empty
/// - `SemError::Value` if the distribution is not finite (extreme state skew)
pub fn mean_centered_softmax(states: &[f32]) -> Result<Vec<f64>> {
    if states.is_empty() {
        return Err(SemError::shape("Learner vector is empty."));
    }

    let mean = states.iter().map(|&u| u as f64).sum::<f64>() / states.len() as f64;
    let exp: Vec<f64> = states.iter().map(|&u| (u as f64 - mean).exp()).collect();
    let total: f64 = exp.iter().sum();

    if !total.is_finite() || total <= 0.0 {
        return Err(SemError::value(format!(
            "learner state distribution is degenerate (sum of weights = {})",
            total
        )));
    }

    Ok(exp.into_iter().map(|p| p / total).collect())
}

/// Draw one index from a discrete probability distribution.
pub fn sample_index<R: Rng + ?Sized>(pdf: &[f64], rng: &mut R) -> Result<usize> {
    let dist = WeightedIndex::new(pdf)
        .map_err(|e| SemError::value(format!("cannot sample from distribution: {}", e)))?;
    Ok(dist.sample(rng))
}
