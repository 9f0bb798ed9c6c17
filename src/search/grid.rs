//! Dense 2-D and 3-D grid searches.
//!
//! Purpose
//! -------
//! Evaluate the loss on every cell of a Cartesian grid of parameter values
//! and return the whole loss surface together with its minimizer. The 2-D
//! search fixes the frequency and varies `(amplitude, phase)`; the 3-D
//! search varies `(frequency, amplitude, phase)`.
//!
//! Key behaviors
//! -------------
//! - Cells are evaluated on rayon's pool. Results are collected in row-major
//!   order before any reduction, so the outcome does not depend on
//!   scheduling.
//! - [`first_minimum`] skips non-finite cells and returns the first index,
//!   in row-major order, that reaches the smallest loss.
//!
//! Invariants & assumptions
//! ------------------------
//! - Cost is `O(∏ range sizes × N)` loss terms; intended for exploratory
//!   use at modest resolutions (tens of points per axis).
//! - The pulse width, when given, is held fixed for every cell.
use crate::likelihood::loss::{is_admissible, loss_with_model, reconstruct};
use crate::search::errors::{SearchError, SearchResult};
use crate::waveform::{data::Observations, family::WaveformFamily, params::WaveParams};
use log::debug;
use ndarray::{Array, Array1, ArrayView, ArrayView1, Dimension, Ix2, Ix3};
use rayon::prelude::*;

/// Loss surface of a grid search and its minimizer.
///
/// `losses` keeps every cell, degenerate ones included (NaN / `+∞`).
#[derive(Debug, Clone, PartialEq)]
pub struct GridOutcome<D: Dimension> {
    pub losses: Array<f64, D>,
    pub reconstruction: Array1<f64>,
    pub params: WaveParams,
    pub loss: f64,
}

/// Lexicographically first index of the smallest finite value.
///
/// Returns `None` when the array is empty or has no finite entry.
pub fn first_minimum<D: Dimension>(values: ArrayView<'_, f64, D>) -> Option<(D::Pattern, f64)> {
    let mut best: Option<(D::Pattern, f64)> = None;
    for (index, &value) in values.indexed_iter() {
        if !is_admissible(value) {
            continue;
        }
        match best {
            Some((_, current)) if value >= current => {}
            _ => best = Some((index, value)),
        }
    }
    best
}

/// Search `(amplitude, phase)` at a fixed frequency.
///
/// `losses[[i, j]]` is the loss at `(amplitudes[i], phases[j])`.
///
/// Errors
/// ------
/// - `SearchError::EmptySearchSpace` if a range is empty or every cell is
///   degenerate.
pub fn grid_search_2d(
    obs: &Observations, family: WaveformFamily, frequency: f64, amplitudes: ArrayView1<'_, f64>,
    phases: ArrayView1<'_, f64>, pulse_width: Option<f64>,
) -> SearchResult<GridOutcome<Ix2>> {
    let model = family.model();
    let (na, np) = (amplitudes.len(), phases.len());
    debug!("2-D grid search over {na}×{np} cells at f = {frequency}");
    let cells: Vec<f64> = (0..na * np)
        .into_par_iter()
        .map(|k| {
            let params = cell_params(frequency, amplitudes[k / np], phases[k % np], pulse_width);
            loss_with_model(obs, &params, model)
        })
        .collect();
    let losses = Array::from_shape_vec((na, np), cells)?;

    let ((i, j), loss) = first_minimum(losses.view()).ok_or_else(|| {
        SearchError::EmptySearchSpace { parameter: "amplitude/phase".to_string(), candidates: na * np }
    })?;
    let params = cell_params(frequency, amplitudes[i], phases[j], pulse_width);
    Ok(GridOutcome { reconstruction: reconstruct(obs.times(), &params, family), losses, params, loss })
}

/// Search `(frequency, amplitude, phase)` jointly.
///
/// `losses[[i, j, k]]` is the loss at
/// `(frequencies[i], amplitudes[j], phases[k])`.
///
/// Errors
/// ------
/// - `SearchError::EmptySearchSpace` if a range is empty or every cell is
///   degenerate.
pub fn grid_search_3d(
    obs: &Observations, family: WaveformFamily, frequencies: ArrayView1<'_, f64>,
    amplitudes: ArrayView1<'_, f64>, phases: ArrayView1<'_, f64>, pulse_width: Option<f64>,
) -> SearchResult<GridOutcome<Ix3>> {
    let model = family.model();
    let (nf, na, np) = (frequencies.len(), amplitudes.len(), phases.len());
    debug!("3-D grid search over {nf}×{na}×{np} cells");
    let cells: Vec<f64> = (0..nf * na * np)
        .into_par_iter()
        .map(|k| {
            let (i, rest) = (k / (na * np), k % (na * np));
            let params =
                cell_params(frequencies[i], amplitudes[rest / np], phases[rest % np], pulse_width);
            loss_with_model(obs, &params, model)
        })
        .collect();
    let losses = Array::from_shape_vec((nf, na, np), cells)?;

    let ((i, j, k), loss) = first_minimum(losses.view()).ok_or_else(|| {
        SearchError::EmptySearchSpace {
            parameter: "frequency/amplitude/phase".to_string(),
            candidates: nf * na * np,
        }
    })?;
    let params = cell_params(frequencies[i], amplitudes[j], phases[k], pulse_width);
    Ok(GridOutcome { reconstruction: reconstruct(obs.times(), &params, family), losses, params, loss })
}

fn cell_params(frequency: f64, amplitude: f64, phase: f64, pulse_width: Option<f64>) -> WaveParams {
    WaveParams { frequency, amplitude, phase, pulse_width }
}
