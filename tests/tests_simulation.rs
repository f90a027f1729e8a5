// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end runs of the bar-stimulus simulation on small configurations

use sem::prelude::*;

fn small_config(seed: u64) -> SemConfig {
    let mut config = SemConfig::default();
    config.system.seed = Some(seed);
    config.simulation.nb_learners = 4;
    config.simulation.nb_train_stimuli = 20;
    config.simulation.nb_test_stimuli = 10;
    config.simulation.ticks_per_stimulus = 5;
    config.simulation.grid_size = 2;
    config
}

#[test]
fn test_learn_then_eval_produces_stats() {
    let mut simulation = Simulation::new(&small_config(3)).unwrap();
    assert_eq!(simulation.pipeline().len(), 2);
    assert_eq!(simulation.nb_classes(), 4);

    simulation.learn().unwrap();
    let stats = simulation.eval().unwrap();

    assert_eq!(stats.nb_learners(), 4);
    assert_eq!(stats.nb_classes(), 4);
    // at most one winner per tick
    assert!(stats.total_spikes() <= 10 * 5);
    assert!((0.0..=1.0).contains(&stats.purity()));
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let run = |seed| {
        let mut simulation = Simulation::new(&small_config(seed)).unwrap();
        simulation.learn().unwrap();
        simulation.eval().unwrap()
    };
    assert_eq!(run(11), run(11));
}

#[test]
fn test_single_winner_per_tick() {
    let mut config = small_config(5);
    config.layer_z.wta_frequency = 1.0e6;
    let mut simulation = Simulation::new(&config).unwrap();

    let rates = ndarray::Array2::from_elem((1, 4), 1.0f32);
    let counts = simulation.present(&rates, 8, true).unwrap();

    // with a saturated WTA rate every tick has exactly one winner
    assert_eq!(counts.iter().sum::<usize>(), 8);
}

#[test]
fn test_invalid_settings_rejected() {
    let mut config = small_config(1);
    config.simulation.ticks_per_stimulus = 0;
    assert!(matches!(Simulation::new(&config), Err(SemError::Value(_))));

    let mut config = small_config(1);
    config.simulation.nb_learners = 0;
    assert!(matches!(Simulation::new(&config), Err(SemError::Value(_))));
}

#[test]
fn test_registry_without_layers_is_a_type_error() {
    let registry = LayerRegistry::new();
    let err = Simulation::with_registry(&small_config(1), &registry).unwrap_err();
    assert!(matches!(err, SemError::Type(_)));
}
