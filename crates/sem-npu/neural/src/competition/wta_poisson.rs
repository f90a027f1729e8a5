// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Poisson winner-take-all
//!
//! One WTA circuit firing as a Poisson process of rate `λ` (the maximum
//! firing frequency). Per tick of duration `Δt`:
//!
//! ```text
//! if next_spike_time < Δt:
//!     winner ~ softmax(u − mean(u))
//!     next_spike_time ~ Exp(λ)
//! else:
//!     next_spike_time −= Δt
//! ```
//!
//! The long-run fraction of ticks with a winner is `1 − exp(−λΔt)`.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Exp};
use tracing::debug;

use sem_structures::{Result, SemError};

use super::sampler::{mean_centered_softmax, sample_index};
use super::Competition;
use crate::models::Learner;

#[derive(Debug, Clone)]
pub struct WtaPoisson {
    lambda: f64,
    delta_t_sec: f64,
    next_spike_time_sec: f64,
    spike_interval: Exp<f64>,
    rng: StdRng,
}

impl WtaPoisson {
    /// # Arguments
    /// * `max_frequency` - firing rate of the circuit, in Hz
    /// * `delta_t_msec` - tick duration, in milliseconds
    /// * `seed` - fixed seed for reproducible runs, entropy otherwise
    ///
    /// # Errors
    /// `SemError::Value` unless both rates are finite and positive.
    pub fn new(max_frequency: f32, delta_t_msec: f32, seed: Option<u64>) -> Result<Self> {
        if !(max_frequency.is_finite() && max_frequency > 0.0) {
            return Err(SemError::value(format!(
                "WTA frequency must be positive, got {}",
                max_frequency
            )));
        }
        if !(delta_t_msec.is_finite() && delta_t_msec > 0.0) {
            return Err(SemError::value(format!(
                "tick duration must be positive, got {} ms",
                delta_t_msec
            )));
        }

        let lambda = max_frequency as f64;
        let spike_interval =
            Exp::new(lambda).map_err(|e| SemError::value(format!("invalid WTA frequency: {}", e)))?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut wta = Self {
            lambda,
            delta_t_sec: delta_t_msec as f64 * 1e-3,
            next_spike_time_sec: 0.0,
            spike_interval,
            rng,
        };
        wta.next_spike_time();
        Ok(wta)
    }

    fn next_spike_time(&mut self) {
        self.next_spike_time_sec = self.spike_interval.sample(&mut self.rng);
    }

    pub fn max_frequency(&self) -> f64 {
        self.lambda
    }

    pub fn delta_t_sec(&self) -> f64 {
        self.delta_t_sec
    }

    /// Simulated time left until the next candidate spike
    pub fn time_to_next_spike(&self) -> f64 {
        self.next_spike_time_sec
    }

    /// Probability of each learner winning, given their current states
    pub fn learner_state_distr(learners: &[Box<dyn Learner>]) -> Result<Vec<f64>> {
        let states: Vec<f32> = learners.iter().map(|l| l.state()).collect();
        mean_centered_softmax(&states)
    }
}

impl Competition for WtaPoisson {
    fn compete(&mut self, learners: &mut [Box<dyn Learner>]) -> Result<Vec<bool>> {
        if learners.is_empty() {
            return Err(SemError::shape("Learner vector is empty."));
        }

        let mut winners = vec![false; learners.len()];

        if self.next_spike_time_sec < self.delta_t_sec {
            let pdf = Self::learner_state_distr(learners)?;
            let winner = sample_index(&pdf, &mut self.rng)?;

            learners[winner].let_fire(true);
            winners[winner] = true;
            self.next_spike_time();

            debug!(
                "[WTA] learner {} fired (p={:.4}), next spike in {:.4}s",
                winner, pdf[winner], self.next_spike_time_sec
            );
        } else {
            self.next_spike_time_sec -= self.delta_t_sec;
        }

        Ok(winners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ZNeuron;
    use rand::rngs::StdRng;

    fn population(n: usize, nb_features: usize) -> Vec<Box<dyn Learner>> {
        let mut rng = StdRng::seed_from_u64(3);
        (0..n)
            .map(|_| {
                let mut l: Box<dyn Learner> = Box::new(ZNeuron::default());
                l.init(nb_features, 3, &mut rng).unwrap();
                l
            })
            .collect()
    }

    #[test]
    fn test_rejects_non_positive_rates() {
        assert!(WtaPoisson::new(0.0, 1.0, Some(1)).is_err());
        assert!(WtaPoisson::new(1.0, -1.0, Some(1)).is_err());
        assert!(WtaPoisson::new(f32::NAN, 1.0, Some(1)).is_err());
    }

    #[test]
    fn test_delta_t_converted_to_seconds() {
        let wta = WtaPoisson::new(10.0, 250.0, Some(1)).unwrap();
        assert!((wta.delta_t_sec() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_empty_population_is_shape_error() {
        let mut wta = WtaPoisson::new(1.0, 1.0, Some(1)).unwrap();
        let mut learners: Vec<Box<dyn Learner>> = Vec::new();
        assert!(matches!(wta.compete(&mut learners), Err(SemError::Shape(_))));
    }

    #[test]
    fn test_high_frequency_fires_every_tick() {
        let mut wta = WtaPoisson::new(1.0e6, 1000.0, Some(5)).unwrap();
        let mut learners = population(4, 2);

        for _ in 0..50 {
            for l in learners.iter_mut() {
                l.predict(&[1.0, 0.0]).unwrap();
            }
            let fired = wta.compete(&mut learners).unwrap();
            assert_eq!(fired.iter().filter(|&&f| f).count(), 1);

            let idx = fired.iter().position(|&f| f).unwrap();
            assert!(learners[idx].has_fired());
        }
    }

    #[test]
    fn test_silent_tick_decrements_time() {
        let mut wta = WtaPoisson::new(1.0e-6, 1.0, Some(5)).unwrap();
        let mut learners = population(2, 1);
        let before = wta.time_to_next_spike();

        let fired = wta.compete(&mut learners).unwrap();

        assert!(fired.iter().all(|&f| !f));
        assert!((before - wta.time_to_next_spike() - 1e-3).abs() < 1e-6);
    }
}
