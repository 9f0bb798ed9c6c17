//! Negative log-likelihood of binary observations under a waveform model.
//!
//! Purpose
//! -------
//! Score a parameter set against observed bits:
//! `L = -Σᵢ ln((1 - yᵢ)·p0(tᵢ) + yᵢ·p1(tᵢ))`. Lower is better.
//!
//! Invariants & assumptions
//! ------------------------
//! - Pure and deterministic; no validation of the parameters.
//! - A negative probability term makes the loss NaN and a term of exactly
//!   zero makes it `+∞`. Both mark a degenerate parameter set. The evaluator
//!   does not recover; the search selectors filter such values.
use crate::waveform::{
    data::Observations, family::WaveformFamily, family::WaveformModel, params::WaveParams,
};
use ndarray::{Array1, ArrayView1};

/// Negative log-likelihood of `obs` under `params` for `family`.
///
/// Returns
/// -------
/// - A non-negative finite value for valid probabilities.
/// - NaN or `+∞` when some observed outcome has probability `<= 0`.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use bitwave_mle::waveform::{Observations, WaveParams, WaveformFamily};
/// # use bitwave_mle::likelihood::negative_log_likelihood;
/// let obs = Observations::new(array![0.0, 0.25], array![1, 0]).unwrap();
/// let flat = WaveParams::new(1.0, 0.0, 0.0);
/// let loss = negative_log_likelihood(&obs, &flat, WaveformFamily::Sinusoid);
/// assert!((loss - 2.0 * std::f64::consts::LN_2).abs() < 1e-12);
/// ```
pub fn negative_log_likelihood(obs: &Observations, params: &WaveParams, family: WaveformFamily) -> f64 {
    loss_with_model(obs, params, family.model())
}

/// Same as [`negative_log_likelihood`] for an already resolved model.
pub fn loss_with_model(obs: &Observations, params: &WaveParams, model: &dyn WaveformModel) -> f64 {
    -obs.iter()
        .map(|(t, y)| {
            let p1 = model.p1(t, params);
            let p = if y == 1 { p1 } else { 1.0 - p1 };
            p.ln()
        })
        .sum::<f64>()
}

/// Success-probability curve `p1(t)` for the given parameters.
pub fn reconstruct(times: ArrayView1<'_, f64>, params: &WaveParams, family: WaveformFamily) -> Array1<f64> {
    family.model().p1_curve(times, params)
}

/// `true` if a loss value can take part in a minimum search.
#[inline]
pub fn is_admissible(loss: f64) -> bool {
    loss.is_finite()
}
