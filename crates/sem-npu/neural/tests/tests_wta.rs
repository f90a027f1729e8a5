// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Statistical and property tests for Poisson winner-take-all

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sem_npu_neural::{Competition, Learner, WtaPoisson, ZNeuron};

fn population(n: usize, nb_features: usize, seed: u64) -> Vec<Box<dyn Learner>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let mut l: Box<dyn Learner> = Box::new(ZNeuron::default());
            l.init(nb_features, 5, &mut rng).unwrap();
            l
        })
        .collect()
}

#[test]
fn test_long_run_firing_fraction_matches_poisson() {
    // λΔt = 0.5 → expected fraction 1 − e^−0.5 ≈ 0.3935
    let mut wta = WtaPoisson::new(50.0, 10.0, Some(2024)).unwrap();
    let mut learners = population(3, 2, 11);
    let nb_ticks = 20_000;

    let mut ticks_with_winner = 0usize;
    for _ in 0..nb_ticks {
        let fired = wta.compete(&mut learners).unwrap();
        if fired.iter().any(|&f| f) {
            ticks_with_winner += 1;
        }
    }

    let expected = 1.0 - (-0.5f64).exp();
    let observed = ticks_with_winner as f64 / nb_ticks as f64;
    // ~6 standard deviations of a binomial proportion at this N
    assert!(
        (observed - expected).abs() < 0.025,
        "observed {} expected {}",
        observed,
        expected
    );
}

#[test]
fn test_winner_tracks_membrane_potential() {
    let mut wta = WtaPoisson::new(1.0e6, 1.0, Some(9)).unwrap();
    let mut learners = population(2, 1, 4);
    let mut wins = [0usize; 2];

    for _ in 0..500 {
        // learner 1 sees a strong input, learner 0 silence
        learners[0].predict(&[0.0]).unwrap();
        learners[1].predict(&[3000.0]).unwrap();
        let fired = wta.compete(&mut learners).unwrap();
        for (i, f) in fired.iter().enumerate() {
            if *f {
                wins[i] += 1;
            }
        }
    }

    assert!(wins[1] > wins[0]);
}

proptest! {
    #[test]
    fn at_most_one_winner(
        nb_learners in 1usize..12,
        frequency in 0.1f32..2000.0,
        delta_t in 0.1f32..50.0,
        seed in any::<u64>(),
        evidence in proptest::collection::vec(0.0f32..1.0, 3),
    ) {
        let mut wta = WtaPoisson::new(frequency, delta_t, Some(seed)).unwrap();
        let mut learners = population(nb_learners, 3, seed);

        for _ in 0..20 {
            for l in learners.iter_mut() {
                l.predict(&evidence).unwrap();
            }
            let fired = wta.compete(&mut learners).unwrap();
            prop_assert_eq!(fired.len(), nb_learners);
            prop_assert!(fired.iter().filter(|&&f| f).count() <= 1);
            prop_assert!(learners.iter().filter(|l| l.has_fired()).count() <= 1);
        }
    }
}
