//! Single-parameter line search.
//!
//! Vary one coordinate of [`WaveParams`] over caller-supplied candidates,
//! holding the rest at a nominal point, and pick the candidate with the
//! smallest loss. Candidates whose loss is NaN or `+∞` are dropped together
//! with their loss before the minimum is taken, so the returned scan only
//! contains admissible pairs.
use crate::likelihood::loss::{is_admissible, loss_with_model};
use crate::search::{
    errors::{SearchError, SearchResult},
    grid::first_minimum,
};
use crate::waveform::{
    data::Observations,
    family::WaveformFamily,
    params::{Parameter, WaveParams},
};
use log::{debug, warn};
use ndarray::{Array1, ArrayView1};

/// Outcome of [`scan_parameter`].
///
/// `candidates` and `losses` are the surviving (admissible) pairs in input
/// order; `discarded` counts the dropped ones.
#[derive(Debug, Clone, PartialEq)]
pub struct LineScan {
    pub parameter: Parameter,
    pub candidates: Array1<f64>,
    pub losses: Array1<f64>,
    pub min_index: usize,
    pub discarded: usize,
}

impl LineScan {
    /// Candidate with the smallest loss.
    pub fn best(&self) -> f64 {
        self.candidates[self.min_index]
    }

    /// Smallest loss.
    pub fn best_loss(&self) -> f64 {
        self.losses[self.min_index]
    }
}

/// Evaluate the loss at each candidate value of `parameter`.
///
/// Parameters
/// ----------
/// - `obs`: observations.
/// - `family`: waveform family.
/// - `parameter`: coordinate to vary.
/// - `candidates`: values to try, in order.
/// - `nominal`: values of every other coordinate.
///
/// Returns
/// -------
/// A [`LineScan`] whose `min_index` is the first occurrence of the smallest
/// admissible loss.
///
/// Errors
/// ------
/// - `SearchError::EmptySearchSpace` when `candidates` is empty or every
///   loss is degenerate.
pub fn scan_parameter(
    obs: &Observations, family: WaveformFamily, parameter: Parameter,
    candidates: ArrayView1<'_, f64>, nominal: &WaveParams,
) -> SearchResult<LineScan> {
    let model = family.model();
    let (kept, losses): (Vec<f64>, Vec<f64>) = candidates
        .iter()
        .map(|&v| (v, loss_with_model(obs, &nominal.with(parameter, v), model)))
        .filter(|&(_, loss)| is_admissible(loss))
        .unzip();
    let discarded = candidates.len() - kept.len();
    if discarded > 0 {
        warn!("{parameter} scan: dropped {discarded} of {} degenerate candidates", candidates.len());
    }

    let losses = Array1::from(losses);
    let (min_index, best_loss) = first_minimum(losses.view()).ok_or_else(|| {
        SearchError::EmptySearchSpace {
            parameter: parameter.name().to_string(),
            candidates: candidates.len(),
        }
    })?;
    debug!("{parameter} scan over {} candidates: loss {best_loss:.6} at index {min_index}", kept.len());
    Ok(LineScan { parameter, candidates: Array1::from(kept), losses, min_index, discarded })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Minimum selection over admissible losses.
    // - Filtering of degenerate candidates.
    // - The empty-search-space error.
    // -------------------------------------------------------------------------

    fn obs() -> Observations {
        let times = Array1::linspace(0.0, 4.0, 200);
        let bits = times.mapv(|t: f64| u8::from((std::f64::consts::TAU * t).sin() > 0.0));
        Observations::new(times, bits).unwrap()
    }

    /// Bits unrelated to any sinusoid, so large amplitudes contradict some
    /// observation with a negative probability.
    fn mixed_obs() -> Observations {
        let times = Array1::linspace(0.0, 4.0, 200);
        let bits = Array1::from_iter((0..200).map(|i| u8::from(i % 3 == 0)));
        Observations::new(times, bits).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // The selected index is the minimum of the surviving losses, and the
    // scan reports losses that match direct evaluation.
    fn selects_minimum_of_admissible_losses() {
        // Arrange
        let data = obs();
        let nominal = WaveParams::new(1.0, 0.3, 0.0);
        let candidates = Array1::linspace(0.0, 0.45, 10);

        // Act
        let scan = scan_parameter(&data, WaveformFamily::Sinusoid, Parameter::Amplitude, candidates.view(), &nominal)
            .expect("admissible candidates exist");

        // Assert
        assert_eq!(scan.discarded, 0);
        let min = scan.losses.iter().cloned().fold(f64::INFINITY, f64::min);
        assert_eq!(scan.best_loss(), min);
        assert!(scan.best() > 0.3, "square-ish data favors large amplitude");
    }

    #[test]
    // Purpose
    // -------
    // Amplitudes that push probabilities outside [0, 1] are discarded along
    // with their losses.
    //
    // Given
    // -----
    // - Candidates [0.1, 0.2, 0.7, 0.9]; the last two are degenerate.
    //
    // Expect
    // ------
    // - Two survivors, `discarded == 2`, minimum among the survivors.
    fn degenerate_candidates_are_dropped() {
        let data = mixed_obs();
        let nominal = WaveParams::new(1.0, 0.2, 0.0);
        let scan = scan_parameter(
            &data,
            WaveformFamily::Sinusoid,
            Parameter::Amplitude,
            array![0.1, 0.2, 0.7, 0.9].view(),
            &nominal,
        )
        .unwrap();
        assert_eq!(scan.candidates, array![0.1, 0.2]);
        assert_eq!(scan.losses.len(), 2);
        assert_eq!(scan.discarded, 2);
        assert!(scan.min_index < 2);
    }

    #[test]
    // Purpose
    // -------
    // No admissible candidate (or no candidate at all) is an explicit error.
    fn all_degenerate_is_empty_search_space() {
        let data = mixed_obs();
        let nominal = WaveParams::new(1.0, 0.2, 0.0);
        let err = scan_parameter(
            &data,
            WaveformFamily::Sinusoid,
            Parameter::Amplitude,
            array![0.8, 1.0].view(),
            &nominal,
        )
        .unwrap_err();
        assert_eq!(err, SearchError::EmptySearchSpace { parameter: "amplitude".to_string(), candidates: 2 });

        let empty = Array1::<f64>::zeros(0);
        assert!(scan_parameter(&data, WaveformFamily::Sinusoid, Parameter::Phase, empty.view(), &nominal).is_err());
    }
}
