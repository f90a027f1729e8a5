// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Layer assembly through the registry and the learning layer end to end

use ndarray::{array, Array2};
use proptest::prelude::*;
use sem_layers::layers::layer_z::{
    KEY_INPUT_SPIKES, KEY_OUTPUT_BIAS, KEY_OUTPUT_SPIKES, KEY_OUTPUT_WEIGHTS,
};
use sem_layers::{default_registry, LayerConfig, LayerIONames, LayerParams, LayerShared};
use sem_structures::{SemError, Signal};

fn layer_z_config(nb_afferents: usize, nb_output_nodes: usize, wta_frequency: f32) -> LayerConfig {
    let params = LayerParams::new()
        .with("nb_afferents", nb_afferents)
        .and_then(|p| p.with("nb_output_nodes", nb_output_nodes))
        .and_then(|p| p.with("wta_frequency", wta_frequency))
        .and_then(|p| p.with("delta_t", 1000.0f32))
        .and_then(|p| p.with("seed", 1234u64))
        .unwrap();
    LayerConfig::new(params)
}

fn layer_z_io() -> LayerIONames {
    LayerIONames::new()
        .with_input(KEY_INPUT_SPIKES, "y")
        .with_output(KEY_OUTPUT_SPIKES, "z")
        .with_output(KEY_OUTPUT_WEIGHTS, "w")
        .with_output(KEY_OUTPUT_BIAS, "b")
}

fn weights_of(layer: &LayerShared) -> Array2<f32> {
    let mut signal = Signal::new();
    layer.response(&mut signal).unwrap();
    signal.most_recent_mat("w").unwrap()
}

#[test]
fn test_factory_weighted_sum() {
    let params = LayerParams::new()
        .with("a", 0.2f32)
        .and_then(|p| p.with("b", 0.3f32))
        .unwrap();
    let io = LayerIONames::new()
        .with_input("input-stimulus", "in")
        .with_output("output-response", "out");

    let mut layer = default_registry()
        .create_shared_with("WeightedSum", &LayerConfig::new(params), &io)
        .unwrap();

    let mut signal = Signal::new();
    signal.append("in", Array2::<f32>::ones((1, 2)));
    layer.activate(&signal).unwrap();
    layer.response(&mut signal).unwrap();

    let out = signal.most_recent_mat("out").unwrap();
    assert!((out[[0, 0]] - 0.5).abs() < 1e-6);
}

#[test]
fn test_unregistered_type_is_type_error() {
    let err = default_registry().create_shared("Blahbla").unwrap_err();
    assert!(matches!(err, SemError::Type(_)));

    let err = default_registry()
        .create_shared_with("Blahbla", &LayerConfig::default(), &LayerIONames::new())
        .unwrap_err();
    assert!(matches!(err, SemError::Type(_)));
}

#[test]
fn test_instances_do_not_share_state() {
    let config = layer_z_config(3, 2, 1.0e6);
    let mut first = default_registry()
        .create_shared_with("LayerZ", &config, &layer_z_io())
        .unwrap();
    let second = default_registry()
        .create_shared_with("LayerZ", &config, &layer_z_io())
        .unwrap();

    let before = weights_of(&second);
    assert_eq!(weights_of(&first), before);

    let mut signal = Signal::new();
    signal.append("y", array![[1.0f32, 1.0, 0.0]]);
    first.activate(&signal).unwrap();
    first.learn().unwrap();

    assert_ne!(weights_of(&first), before);
    assert_eq!(weights_of(&second), before);
}

#[test]
fn test_end_to_end_single_tick() {
    let mut layer = default_registry()
        .create_shared_with("LayerZ", &layer_z_config(3, 2, 1.0e6), &layer_z_io())
        .unwrap();
    let before = weights_of(&layer);

    let input = array![[1.0f32, 0.0, 1.0]];
    let mut signal = Signal::new();
    signal.append("y", input.clone());

    layer.activate(&signal).unwrap();
    layer.response(&mut signal).unwrap();
    layer.learn().unwrap();

    let spikes = signal.most_recent_mat("z").unwrap();
    assert_eq!(spikes.dim(), (1, 2));
    assert_eq!(spikes.iter().filter(|&&s| s > 0.0).count(), 1);

    let winner = spikes.iter().position(|&s| s > 0.0).unwrap();
    let loser = 1 - winner;
    let after = weights_of(&layer);

    let shift = &after.row(winner) - &before.row(winner);
    let alignment: f32 = shift.iter().zip(input.iter()).map(|(d, x)| d * x).sum();
    assert!(alignment > 0.0);
    assert!(shift[0] > 0.0 && shift[2] > 0.0 && shift[1] < 0.0);

    for (a, b) in after.row(loser).iter().zip(before.row(loser).iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn test_learning_skipped_without_learn_call() {
    let mut layer = default_registry()
        .create_shared_with("LayerZ", &layer_z_config(3, 2, 1.0e6), &layer_z_io())
        .unwrap();
    let before = weights_of(&layer);

    let mut signal = Signal::new();
    signal.append("y", array![[1.0f32, 0.0, 1.0]]);
    layer.activate(&signal).unwrap();

    assert_eq!(weights_of(&layer), before);
}

#[test]
fn test_optional_outputs_only_when_wired() {
    let io = LayerIONames::new()
        .with_input(KEY_INPUT_SPIKES, "y")
        .with_output(KEY_OUTPUT_SPIKES, "z");
    let mut layer = default_registry()
        .create_shared_with("LayerZ", &layer_z_config(3, 2, 1.0), &io)
        .unwrap();

    let mut signal = Signal::new();
    signal.append("y", array![[0.0f32, 0.0, 1.0]]);
    layer.activate(&signal).unwrap();
    layer.response(&mut signal).unwrap();

    assert_eq!(signal.feature_names(), vec!["y".to_string(), "z".to_string()]);
}

#[test]
fn test_input_size_mismatch_is_shape_error() {
    let mut layer = default_registry()
        .create_shared_with("LayerZ", &layer_z_config(3, 2, 1.0), &layer_z_io())
        .unwrap();

    let mut signal = Signal::new();
    signal.append("y", array![[1.0f32, 0.0]]);
    assert!(matches!(layer.activate(&signal), Err(SemError::Shape(_))));
}

#[test]
fn test_missing_input_series_is_key_error() {
    let mut layer = default_registry()
        .create_shared_with("LayerZ", &layer_z_config(3, 2, 1.0), &layer_z_io())
        .unwrap();
    assert!(matches!(layer.activate(&Signal::new()), Err(SemError::Key(_))));
}

#[test]
fn test_reconfigure_keeps_wiring() {
    let mut layer = default_registry()
        .create_shared_with("LayerZ", &layer_z_config(3, 2, 1.0e6), &layer_z_io())
        .unwrap();

    layer.reconfigure(&layer_z_config(3, 4, 1.0e6)).unwrap();
    assert_eq!(layer.io_names(), Some(&layer_z_io()));

    let mut signal = Signal::new();
    signal.append("y", array![[1.0f32, 1.0, 1.0]]);
    layer.activate(&signal).unwrap();
    layer.response(&mut signal).unwrap();

    assert_eq!(signal.most_recent_mat("z").unwrap().dim(), (1, 4));
    assert_eq!(signal.most_recent_mat("w").unwrap().dim(), (4, 3));
}

#[test]
fn test_reset_drops_wiring() {
    let mut layer = default_registry()
        .create_shared_with("LayerZ", &layer_z_config(3, 2, 1.0), &layer_z_io())
        .unwrap();

    layer.reset(&layer_z_config(3, 2, 1.0)).unwrap();
    assert!(layer.io_names().is_none());
}

proptest! {
    #[test]
    fn layer_z_emits_at_most_one_spike_per_tick(
        nb_output_nodes in 1usize..10,
        wta_frequency in 0.1f32..5000.0,
        seed in any::<u64>(),
        input in proptest::collection::vec(prop::bool::ANY, 1..8),
    ) {
        let params = LayerParams::new()
            .with("nb_afferents", input.len())
            .and_then(|p| p.with("nb_output_nodes", nb_output_nodes))
            .and_then(|p| p.with("wta_frequency", wta_frequency))
            .and_then(|p| p.with("delta_t", 10.0f32))
            .and_then(|p| p.with("seed", seed))
            .unwrap();
        let io = LayerIONames::new()
            .with_input(KEY_INPUT_SPIKES, "y")
            .with_output(KEY_OUTPUT_SPIKES, "z");
        let mut layer = default_registry()
            .create_shared_with("LayerZ", &LayerConfig::new(params), &io)
            .unwrap();

        let rates = Array2::from_shape_vec(
            (1, input.len()),
            input.iter().map(|&x| if x { 1.0f32 } else { 0.0 }).collect(),
        )
        .unwrap();

        let mut signal = Signal::new();
        for _ in 0..10 {
            signal.append("y", rates.clone());
            layer.activate(&signal).unwrap();
            layer.response(&mut signal).unwrap();
            layer.learn().unwrap();

            let spikes = signal.most_recent_mat("z").unwrap();
            prop_assert_eq!(spikes.dim(), (1, nb_output_nodes));
            let winners = spikes.iter().filter(|&&s| s > 0.5).count();
            prop_assert!(winners <= 1);
        }
    }
}
