// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! STDP computation for winner-gated learners
//!
//! For the learner that fired this tick, per afferent line:
//!
//! ```text
//! line fired Δ ticks ago (within window):  Δw = a_plus · exp(−Δ / tau)
//! line silent for the whole window:        Δw = −a_minus
//! bias:                                    Δb = eta_bias · (exp(−b) − 1)
//! ```

use serde::{Deserialize, Serialize};

use sem_structures::{Result, SemError};

/// STDP configuration parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StdpParameters {
    /// Potentiation learning rate (A+)
    pub a_plus: f32,
    /// Depression learning rate (A-)
    pub a_minus: f32,
    /// Potentiation decay constant, in ticks
    pub tau: f32,
    /// Bias learning rate
    pub eta_bias: f32,
}

impl Default for StdpParameters {
    fn default() -> Self {
        Self {
            a_plus: 0.05,
            a_minus: 0.01,
            tau: 2.0,
            eta_bias: 0.01,
        }
    }
}

impl StdpParameters {
    /// Reject a non-positive `tau` and negative or non-finite rates.
    ///
    /// # Errors
    /// `SemError::Value` naming the offending parameter.
    pub fn validate(&self) -> Result<()> {
        if !(self.tau > 0.0 && self.tau.is_finite()) {
            return Err(SemError::value(format!("stdp.tau must be > 0, got {}", self.tau)));
        }
        for (name, rate) in [
            ("stdp.a_plus", self.a_plus),
            ("stdp.a_minus", self.a_minus),
            ("stdp.eta_bias", self.eta_bias),
        ] {
            if !(rate >= 0.0 && rate.is_finite()) {
                return Err(SemError::value(format!("{} must be >= 0, got {}", name, rate)));
            }
        }
        Ok(())
    }
}

/// Weight change for one afferent line given ticks since it last fired.
///
/// `params` must satisfy [`StdpParameters::validate`].
///
/// # Example
/// ```
/// use sem_npu_neural::stdp::{compute_weight_change, StdpParameters};
///
/// let params = StdpParameters::default();
///
/// // coincident input → strongest potentiation
/// assert_eq!(compute_weight_change(Some(0), &params), params.a_plus);
///
/// // silent input → depression
/// assert!(compute_weight_change(None, &params) < 0.0);
/// ```
#[inline]
pub fn compute_weight_change(ticks_since_fire: Option<usize>, params: &StdpParameters) -> f32 {
    match ticks_since_fire {
        Some(dt) => params.a_plus * (-(dt as f32) / params.tau).exp(),
        None => -params.a_minus,
    }
}

/// Bias change pulling the bias toward zero from below and above
#[inline]
pub fn compute_bias_change(bias: f32, params: &StdpParameters) -> f32 {
    params.eta_bias * ((-bias).exp() - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_potentiation_decays_with_offset() {
        let params = StdpParameters::default();
        let near = compute_weight_change(Some(0), &params);
        let far = compute_weight_change(Some(3), &params);

        assert!(near > far);
        assert!(far > 0.0);
    }

    #[test]
    fn test_validate_rejects_degenerate_parameters() {
        assert!(StdpParameters::default().validate().is_ok());

        for tau in [0.0, -1.0, f32::NAN] {
            let params = StdpParameters { tau, ..StdpParameters::default() };
            assert!(matches!(params.validate(), Err(SemError::Value(_))));
        }
        let params = StdpParameters { a_minus: -0.1, ..StdpParameters::default() };
        assert!(matches!(params.validate(), Err(SemError::Value(_))));
    }

    #[test]
    fn test_silent_line_depressed() {
        let params = StdpParameters::default();
        assert_eq!(compute_weight_change(None, &params), -params.a_minus);
    }

    #[test]
    fn test_bias_change_sign() {
        let params = StdpParameters::default();
        assert_eq!(compute_bias_change(0.0, &params), 0.0);
        assert!(compute_bias_change(-1.0, &params) > 0.0);
        assert!(compute_bias_change(1.0, &params) < 0.0);
    }
}
