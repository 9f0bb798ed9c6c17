//! Coordinate-descent maximum-likelihood estimation.
//!
//! Purpose
//! -------
//! Estimate `(frequency, amplitude, phase)` one coordinate at a time with
//! [`scan_parameter`], in that order, then the pulse width for the
//! rectangular family. The three `(f, a, p)` stages all scan around the
//! same context: the caller's nominal point with every fixed value laid
//! over it. The pulse-width stage scans around the estimated triple.
//!
//! Key behaviors
//! -------------
//! - A value set in [`FixedParams`] skips its stage, is used verbatim, and
//!   is part of the context of every other stage.
//! - The pulse-width stage scans `k / (n·f̂)` for `k = 0..n`, i.e. `n`
//!   evenly spaced widths in `[0, 1/f̂)`.
//! - One greedy pass, no iteration to a fixed point. The result depends on
//!   the stage order and on the nominal point, and may differ from a dense
//!   grid or joint optimum on hard instances.
use crate::likelihood::loss::{negative_log_likelihood, reconstruct};
use crate::search::{
    errors::{SearchError, SearchResult},
    line::{scan_parameter, LineScan},
};
use crate::waveform::{
    data::Observations,
    family::WaveformFamily,
    params::{Parameter, WaveParams},
};
use log::{debug, info};
use ndarray::Array1;

/// Candidate values for the three scanned coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateRanges {
    pub frequencies: Array1<f64>,
    pub amplitudes: Array1<f64>,
    pub phases: Array1<f64>,
}

impl CoordinateRanges {
    pub fn new(frequencies: Array1<f64>, amplitudes: Array1<f64>, phases: Array1<f64>) -> Self {
        CoordinateRanges { frequencies, amplitudes, phases }
    }
}

/// Coordinates known in advance; `None` means "estimate it".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedParams {
    pub frequency: Option<f64>,
    pub amplitude: Option<f64>,
    pub phase: Option<f64>,
    pub pulse_width: Option<f64>,
}

impl FixedParams {
    /// `params` with every fixed coordinate substituted.
    pub fn overlay(&self, params: WaveParams) -> WaveParams {
        [Parameter::Frequency, Parameter::Amplitude, Parameter::Phase, Parameter::PulseWidth]
            .into_iter()
            .fold(params, |acc, parameter| match self.value(parameter) {
                Some(value) => acc.with(parameter, value),
                None => acc,
            })
    }

    fn value(&self, parameter: Parameter) -> Option<f64> {
        match parameter {
            Parameter::Frequency => self.frequency,
            Parameter::Amplitude => self.amplitude,
            Parameter::Phase => self.phase,
            Parameter::PulseWidth => self.pulse_width,
        }
    }
}

/// Options for [`coordinate_mle`].
///
/// - `pulse_width_points`: number of pulse widths tried by the rectangular
///   stage; must be > 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateOptions {
    pub pulse_width_points: usize,
}

impl CoordinateOptions {
    /// Errors
    /// ------
    /// - `SearchError::InvalidResolution` when `pulse_width_points == 0`.
    pub fn new(pulse_width_points: usize) -> SearchResult<Self> {
        if pulse_width_points == 0 {
            return Err(SearchError::InvalidResolution { points: pulse_width_points });
        }
        Ok(CoordinateOptions { pulse_width_points })
    }
}

impl Default for CoordinateOptions {
    fn default() -> Self {
        CoordinateOptions { pulse_width_points: 50 }
    }
}

/// Result of [`coordinate_mle`].
///
/// `scans` holds one [`LineScan`] per stage that actually ran, in stage
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct MleFit {
    pub params: WaveParams,
    pub reconstruction: Array1<f64>,
    pub loss: f64,
    pub scans: Vec<LineScan>,
}

/// Estimate waveform parameters by sequential line searches.
///
/// Parameters
/// ----------
/// - `obs`: observations.
/// - `family`: waveform family.
/// - `nominal`: context for the frequency, amplitude and phase stages,
///   after the fixed values are laid over it.
/// - `ranges`: candidates for frequency, amplitude and phase.
/// - `fixed`: coordinates to take verbatim instead of estimating.
/// - `opts`: pulse-width resolution.
///
/// Errors
/// ------
/// - `SearchError::EmptySearchSpace` from the first stage whose candidates
///   are all degenerate (or empty).
pub fn coordinate_mle(
    obs: &Observations, family: WaveformFamily, nominal: &WaveParams, ranges: &CoordinateRanges,
    fixed: &FixedParams, opts: &CoordinateOptions,
) -> SearchResult<MleFit> {
    let context = fixed.overlay(*nominal);
    let mut current = context;
    let mut scans = Vec::with_capacity(4);

    let stages = [
        (Parameter::Frequency, ranges.frequencies.view()),
        (Parameter::Amplitude, ranges.amplitudes.view()),
        (Parameter::Phase, ranges.phases.view()),
    ];
    for (parameter, candidates) in stages {
        let value = match fixed.value(parameter) {
            Some(value) => value,
            None => {
                let scan = scan_parameter(obs, family, parameter, candidates, &context)?;
                let value = scan.best();
                scans.push(scan);
                value
            }
        };
        debug!("{parameter} stage: {value}");
        current = current.with(parameter, value);
    }

    if family.has_pulse_width() {
        let value = match fixed.pulse_width {
            Some(value) => value,
            None => {
                let candidates = pulse_width_candidates(current.frequency, opts.pulse_width_points);
                let scan = scan_parameter(obs, family, Parameter::PulseWidth, candidates.view(), &current)?;
                let value = scan.best();
                scans.push(scan);
                value
            }
        };
        debug!("tpp stage: {value}");
        current = current.with(Parameter::PulseWidth, value);
    }

    let loss = negative_log_likelihood(obs, &current, family);
    info!(
        "{family} coordinate MLE: f = {:.6}, a = {:.6}, p = {:.6}, loss = {loss:.6}",
        current.frequency, current.amplitude, current.phase
    );
    Ok(MleFit { reconstruction: reconstruct(obs.times(), &current, family), params: current, loss, scans })
}

/// `n` pulse widths `k / (n·f)`, `k = 0..n`.
fn pulse_width_candidates(frequency: f64, n: usize) -> Array1<f64> {
    let scale = n as f64 * frequency;
    Array1::from_iter((0..n).map(|k| k as f64 / scale))
}
