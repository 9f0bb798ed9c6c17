//! Integration tests for waveform recovery from binary observations.
//!
//! Purpose
//! -------
//! - Validate the end-to-end pipeline: synthetic data on a regular time
//!   grid, optional bit-flip noise, then coordinate-descent, grid and joint
//!   estimation.
//! - Exercise realistic regimes (1800 samples over 30 time units, modest
//!   amplitudes) rather than toy inputs only.
//!
//! Coverage
//! --------
//! - `waveform`: `time_grid`, `simulate_observations`, `BitFlipChannel`,
//!   `RecoveryStudy`.
//! - `search`: `coordinate_mle`, `grid_search_3d`, `joint_mle`.
//! - `optimization::loglik_optimizer`: Nelder–Mead through `JointSolver`.
//!
//! Exclusions
//! ----------
//! - Building blocks (loss terms, gradients, selectors, option validation)
//!   are covered by unit tests.
//! - Python bindings are exercised from Python.
use bitwave_mle::{
    likelihood::negative_log_likelihood,
    search::{
        coordinate_mle, grid_search_3d, joint_mle, CoordinateOptions, CoordinateRanges,
        FixedParams, JointSolver,
    },
    waveform::{
        simulate::phase_distance, simulate_observations, time_grid, BitFlipChannel, Observations,
        RecoveryStudy, SimOpts, WaveParams, WaveformFamily,
    },
};
use ndarray::Array1;
use rand::{rngs::StdRng, SeedableRng};
use std::f64::consts::PI;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn truth() -> WaveParams {
    WaveParams::new(1.21, 0.19, PI / 2.0)
}

/// Frequency, amplitude and phase candidates with `n` points each over
/// `[0.1, 2] × [0, 0.3] × [0, π]`.
fn ranges(n: usize) -> CoordinateRanges {
    CoordinateRanges::new(
        Array1::linspace(0.1, 2.0, n),
        Array1::linspace(0.0, 0.3, n),
        Array1::linspace(0.0, PI, n),
    )
}

/// 1800 noiseless observations of `family` at 60 samples per time unit.
fn observations(family: WaveformFamily, seed: u64) -> Observations {
    let times = time_grid(0.0, 30.0, 1.0 / 60.0).expect("valid grid");
    simulate_observations(times.view(), &truth(), family, &mut StdRng::seed_from_u64(seed))
        .expect("probabilities in [0, 1]")
}

#[test]
// Purpose
// -------
// Coordinate descent recovers a noiseless sinusoid.
//
// Given
// -----
// - 1800 draws of (1.21, 0.19, π/2); nominal at the truth.
// - 200 candidates per coordinate.
//
// Expect
// ------
// - |f̂ − 1.21| < 0.05, |â − 0.19| < 0.05, phase within 0.2 rad.
fn coordinate_descent_recovers_noiseless_sinusoid() {
    init_logging();
    // Arrange
    let obs = observations(WaveformFamily::Sinusoid, 42);

    // Act
    let fit = coordinate_mle(
        &obs,
        WaveformFamily::Sinusoid,
        &truth(),
        &ranges(200),
        &FixedParams::default(),
        &CoordinateOptions::default(),
    )
    .expect("coordinate descent should succeed");

    // Assert
    assert!((fit.params.frequency - 1.21).abs() < 0.05, "{:?}", fit.params);
    assert!((fit.params.amplitude - 0.19).abs() < 0.05, "{:?}", fit.params);
    assert!(phase_distance(fit.params.phase, PI / 2.0) < 0.2, "{:?}", fit.params);
    assert_eq!(fit.reconstruction.len(), 1800);
    assert!(fit.loss.is_finite());
}

#[test]
// Purpose
// -------
// Recovery survives 5 % bit flips across many seeds.
//
// Given
// -----
// - 50 replications, seeds 100..150, flip probability 0.05.
//
// Expect
// ------
// - Median |f̂ − 1.21| < 0.1.
// - One run per seed, in seed order.
fn recovery_is_robust_to_bit_flips() {
    init_logging();
    // Arrange
    let times = time_grid(0.0, 30.0, 1.0 / 60.0).expect("valid grid");
    let study = RecoveryStudy::new(truth(), WaveformFamily::Sinusoid, times, ranges(200))
        .with_channel(BitFlipChannel::new(0.05).expect("valid q"))
        .with_replications(50, SimOpts::new(100));

    // Act
    let summary = study.run().expect("every replication should fit");

    // Assert
    assert_eq!(summary.runs.len(), 50);
    assert_eq!(summary.runs[0].seed, 100);
    assert_eq!(summary.runs[49].seed, 149);
    assert!(summary.median_frequency_error < 0.1, "median {}", summary.median_frequency_error);
}

#[test]
// Purpose
// -------
// On shared candidate sets the dense grid is never worse than coordinate
// descent, and both agree on an easy instance.
//
// Given
// -----
// - 1800 noiseless draws; 40 candidates per axis over [0.9, 1.5] ×
//   [0, 0.3] × [0, π].
// - Coordinate descent started from a poor nominal (1.0, 0.1, 0.0).
//
// Expect
// ------
// - grid loss <= coordinate loss (the coordinate estimate is a grid cell).
// - The grid estimate lies within one step of the truth in frequency.
fn grid_is_never_worse_than_coordinate_descent() {
    init_logging();
    // Arrange
    let obs = observations(WaveformFamily::Sinusoid, 7);
    let shared = CoordinateRanges::new(
        Array1::linspace(0.9, 1.5, 40),
        Array1::linspace(0.0, 0.3, 40),
        Array1::linspace(0.0, PI, 40),
    );

    // Act
    let grid = grid_search_3d(
        &obs,
        WaveformFamily::Sinusoid,
        shared.frequencies.view(),
        shared.amplitudes.view(),
        shared.phases.view(),
        None,
    )
    .expect("grid search should succeed");
    let coordinate = coordinate_mle(
        &obs,
        WaveformFamily::Sinusoid,
        &WaveParams::new(1.0, 0.1, 0.0),
        &shared,
        &FixedParams::default(),
        &CoordinateOptions::default(),
    )
    .expect("coordinate descent should succeed");

    // Assert
    assert!(grid.loss <= coordinate.loss, "grid {} vs coordinate {}", grid.loss, coordinate.loss);
    let step = 0.6 / 39.0;
    assert!((grid.params.frequency - 1.21).abs() <= step, "{:?}", grid.params);
    assert_eq!(grid.losses.dim(), (40, 40, 40));
}

#[test]
// Purpose
// -------
// The simplex improves on its starting guess from a sparse sample.
//
// Given
// -----
// - 200 draws over [0, 30] of (1.21, 0.19, π/2).
// - Guess (1.0, 0.2, 0.0), default Nelder–Mead options.
//
// Expect
// ------
// - A converged fit whose loss does not exceed the loss at the guess.
fn nelder_mead_improves_on_guess() {
    init_logging();
    // Arrange
    let times = Array1::linspace(0.0, 30.0, 200);
    let obs = simulate_observations(
        times.view(),
        &truth(),
        WaveformFamily::Sinusoid,
        &mut StdRng::seed_from_u64(11),
    )
    .expect("probabilities in [0, 1]");
    let guess = WaveParams::new(1.0, 0.2, 0.0);

    // Act
    let fit = joint_mle(&obs, WaveformFamily::Sinusoid, &guess, &JointSolver::default())
        .expect("simplex should converge within its budget");

    // Assert
    assert!(fit.outcome.converged);
    let at_guess = negative_log_likelihood(&obs, &guess, WaveformFamily::Sinusoid);
    assert!(-fit.outcome.value <= at_guess, "{} vs {at_guess}", -fit.outcome.value);
    assert!(fit.params.amplitude.abs() <= 0.5);
}

#[test]
// Purpose
// -------
// Frequency is recovered for the non-sinusoidal families too.
//
// Given
// -----
// - 1800 noiseless draws of the rectangular (default duty 1/3) and
//   sawtooth waves at (1.21, 0.19, π/2); nominal at the truth.
//
// Expect
// ------
// - |f̂ − 1.21| < 0.05 for both; the rectangular fit carries a pulse width
//   in [0, 1/f̂).
fn other_families_recover_frequency() {
    init_logging();
    for family in [WaveformFamily::Rectangular, WaveformFamily::Sawtooth] {
        // Arrange
        let obs = observations(family, 5);

        // Act
        let fit = coordinate_mle(
            &obs,
            family,
            &truth(),
            &ranges(200),
            &FixedParams::default(),
            &CoordinateOptions::default(),
        )
        .expect("coordinate descent should succeed");

        // Assert
        assert!((fit.params.frequency - 1.21).abs() < 0.05, "{family}: {:?}", fit.params);
        match family {
            WaveformFamily::Rectangular => {
                let width = fit.params.pulse_width.expect("estimated pulse width");
                assert!((0.0..1.0 / fit.params.frequency).contains(&width), "width {width}");
            }
            _ => assert_eq!(fit.params.pulse_width, None),
        }
    }
}
