//! Synthetic observation generation and seeded recovery studies.
//!
//! Purpose
//! -------
//! Produce bit sequences from a known waveform so estimators can be checked
//! against ground truth, and repeat the full pipeline (simulate → bit-flip
//! noise → coordinate-descent MLE) over many seeds to summarize how well the
//! parameters are recovered.
//!
//! Key behaviors
//! -------------
//! - [`time_grid`] is half-open like `arange`: `start, start + step, …` while
//!   `< stop`.
//! - [`simulate_observations`] draws one Bernoulli bit per time from `p1`.
//! - [`RecoveryStudy::run`] uses seeds `seed, seed + 1, …` and reports
//!   per-run absolute errors plus their medians.
//!
//! Conventions
//! -----------
//! - Phase errors are circular distances on `[0, π]`.
use crate::search::{
    coordinate::{coordinate_mle, CoordinateOptions, CoordinateRanges, FixedParams},
    errors::SearchResult,
};
use crate::waveform::{
    data::Observations,
    errors::{WaveError, WaveResult},
    family::WaveformFamily,
    noise::BitFlipChannel,
    params::WaveParams,
};
use log::debug;
use ndarray::{Array1, ArrayView1};
use rand::{
    distributions::{Bernoulli, Distribution},
    rngs::StdRng,
    Rng, SeedableRng,
};
use statrs::statistics::{Data, Median};
use std::f64::consts::TAU;

/// Half-open, evenly spaced time grid `[start, stop)`.
///
/// Errors
/// ------
/// - `WaveError::InvalidTimeGrid` unless all inputs are finite, `step > 0`
///   and `start < stop`.
pub fn time_grid(start: f64, stop: f64, step: f64) -> WaveResult<Array1<f64>> {
    let finite = start.is_finite() && stop.is_finite() && step.is_finite();
    if !finite || step <= 0.0 || start >= stop {
        return Err(WaveError::InvalidTimeGrid { start, stop, step });
    }
    let n = ((stop - start) / step).ceil() as usize;
    Ok(Array1::from_iter((0..n).map(|i| start + i as f64 * step)))
}

/// Draw one bit per time from the family's success probability.
///
/// Errors
/// ------
/// - `WaveError::InvalidProbability` for the first time whose `p1` is NaN or
///   outside `[0, 1]` (e.g. amplitude above 0.5).
/// - Any error from [`Observations::new`] (empty or non-finite times).
pub fn simulate_observations<R: Rng + ?Sized>(
    times: ArrayView1<'_, f64>, params: &WaveParams, family: WaveformFamily, rng: &mut R,
) -> WaveResult<Observations> {
    let model = family.model();
    let mut bits = Array1::<u8>::zeros(times.len());
    for (index, (&t, bit)) in times.iter().zip(bits.iter_mut()).enumerate() {
        let p = model.p1(t, params);
        let dist = Bernoulli::new(p).map_err(|_| WaveError::InvalidProbability { index, value: p })?;
        *bit = u8::from(dist.sample(rng));
    }
    Observations::new(times.to_owned(), bits)
}

/// Seed configuration for synthetic runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimOpts {
    pub seed: u64,
}

impl SimOpts {
    pub fn new(seed: u64) -> Self {
        SimOpts { seed }
    }

    /// Deterministic generator for replication `offset`.
    pub fn rng(&self, offset: u64) -> StdRng {
        StdRng::seed_from_u64(self.seed.wrapping_add(offset))
    }
}

/// Circular distance between two phases, in `[0, π]`.
pub fn phase_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}

/// Repeated simulate → noise → coordinate MLE with known ground truth.
///
/// Fields
/// ------
/// - `truth`: parameters used to generate every replication.
/// - `family`: waveform family for both generation and estimation.
/// - `times`: sampling instants shared by all replications.
/// - `channel`: bit-flip noise applied after sampling.
/// - `ranges`: coordinate-descent search ranges.
/// - `replications`: number of seeded runs.
/// - `sim`: base seed.
#[derive(Debug, Clone)]
pub struct RecoveryStudy {
    pub truth: WaveParams,
    pub family: WaveformFamily,
    pub times: Array1<f64>,
    pub channel: BitFlipChannel,
    pub ranges: CoordinateRanges,
    pub replications: usize,
    pub sim: SimOpts,
    pub options: CoordinateOptions,
}

/// Estimate and absolute errors of one replication.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryRun {
    pub seed: u64,
    pub estimate: WaveParams,
    pub frequency_error: f64,
    pub amplitude_error: f64,
    pub phase_error: f64,
}

/// All runs of a [`RecoveryStudy`] plus median absolute errors.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoverySummary {
    pub runs: Vec<RecoveryRun>,
    pub median_frequency_error: f64,
    pub median_amplitude_error: f64,
    pub median_phase_error: f64,
}

impl RecoveryStudy {
    /// Study with the noiseless channel, one replication, seed 0 and default
    /// coordinate options.
    pub fn new(
        truth: WaveParams, family: WaveformFamily, times: Array1<f64>, ranges: CoordinateRanges,
    ) -> Self {
        RecoveryStudy {
            truth,
            family,
            times,
            channel: BitFlipChannel::noiseless(),
            ranges,
            replications: 1,
            sim: SimOpts::default(),
            options: CoordinateOptions::default(),
        }
    }

    pub fn with_channel(self, channel: BitFlipChannel) -> Self {
        RecoveryStudy { channel, ..self }
    }

    pub fn with_replications(self, replications: usize, sim: SimOpts) -> Self {
        RecoveryStudy { replications, sim, ..self }
    }

    /// Execute every replication in seed order.
    ///
    /// Errors
    /// ------
    /// - `SearchError::Wave` if simulation or noise fails.
    /// - `SearchError::EmptySearchSpace` if a coordinate stage has no finite
    ///   candidate.
    ///
    /// Notes
    /// -----
    /// - With zero replications the medians are NaN.
    pub fn run(&self) -> SearchResult<RecoverySummary> {
        let fixed = FixedParams::default();
        let mut runs = Vec::with_capacity(self.replications);
        for k in 0..self.replications {
            let mut rng = self.sim.rng(k as u64);
            let clean = simulate_observations(self.times.view(), &self.truth, self.family, &mut rng)?;
            let noisy = self.channel.apply(&clean, &mut rng)?;
            let fit = coordinate_mle(&noisy, self.family, &self.truth, &self.ranges, &fixed, &self.options)?;
            let estimate = fit.params;
            runs.push(RecoveryRun {
                seed: self.sim.seed.wrapping_add(k as u64),
                estimate,
                frequency_error: (estimate.frequency - self.truth.frequency).abs(),
                amplitude_error: (estimate.amplitude - self.truth.amplitude).abs(),
                phase_error: phase_distance(estimate.phase, self.truth.phase),
            });
        }
        debug!("recovery study finished {} replications", runs.len());

        let median = |select: fn(&RecoveryRun) -> f64| {
            Data::new(runs.iter().map(select).collect::<Vec<f64>>()).median()
        };
        Ok(RecoverySummary {
            median_frequency_error: median(|r| r.frequency_error),
            median_amplitude_error: median(|r| r.amplitude_error),
            median_phase_error: median(|r| r.phase_error),
            runs,
        })
    }
}
