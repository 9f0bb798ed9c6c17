//! Closed-form derivatives of the sinusoidal loss.
//!
//! With `sᵢ = 2yᵢ − 1`, `φᵢ = 2πf·tᵢ + p` and `Dᵢ = 0.5 + sᵢ·a·sin φᵢ`
//! (the probability of the observed outcome):
//!
//! - `∂L/∂f = −Σ sᵢ·a·2π·tᵢ·cos φᵢ / Dᵢ`
//! - `∂L/∂a = −Σ sᵢ·sin φᵢ / Dᵢ`
//! - `∂L/∂p = −Σ sᵢ·a·cos φᵢ / Dᵢ`
//!
//! Only the sinusoid has these forms; the other families go through finite
//! differences in the optimizer layer. A zero or negative `Dᵢ` propagates as
//! non-finite output, the same way the loss does.
use crate::waveform::{data::Observations, family::phase_angle, params::WaveParams};
use ndarray::{Array1, ArrayView1};
use std::f64::consts::TAU;

/// Per-observation quantities shared by all three partials.
#[inline]
fn terms(t: f64, y: u8, params: &WaveParams) -> (f64, f64, f64) {
    let s = if y == 1 { 1.0 } else { -1.0 };
    let (sin, cos) = phase_angle(t, params).sin_cos();
    let denom = 0.5 + s * params.amplitude * sin;
    (s / denom, sin, cos)
}

/// `∂L/∂f` for the sinusoidal family.
pub fn d_loss_d_frequency(obs: &Observations, params: &WaveParams) -> f64 {
    let a = params.amplitude;
    -obs.iter()
        .map(|(t, y)| {
            let (w, _, cos) = terms(t, y, params);
            w * a * TAU * t * cos
        })
        .sum::<f64>()
}

/// `∂L/∂a` for the sinusoidal family.
pub fn d_loss_d_amplitude(obs: &Observations, params: &WaveParams) -> f64 {
    -obs.iter()
        .map(|(t, y)| {
            let (w, sin, _) = terms(t, y, params);
            w * sin
        })
        .sum::<f64>()
}

/// `∂L/∂p` for the sinusoidal family.
pub fn d_loss_d_phase(obs: &Observations, params: &WaveParams) -> f64 {
    let a = params.amplitude;
    -obs.iter()
        .map(|(t, y)| {
            let (w, _, cos) = terms(t, y, params);
            w * a * cos
        })
        .sum::<f64>()
}

/// Loss gradient `[∂L/∂f, ∂L/∂a, ∂L/∂p]` in one pass over the data.
pub fn loss_gradient(obs: &Observations, params: &WaveParams) -> Array1<f64> {
    let a = params.amplitude;
    let mut grad = Array1::<f64>::zeros(3);
    for (t, y) in obs.iter() {
        let (w, sin, cos) = terms(t, y, params);
        grad[0] -= w * a * TAU * t * cos;
        grad[1] -= w * sin;
        grad[2] -= w * a * cos;
    }
    grad
}

/// Each partial derivative swept over one parameter with the others held at
/// the nominal values.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivativeSweeps {
    pub frequencies: Array1<f64>,
    pub d_frequency: Array1<f64>,
    pub amplitudes: Array1<f64>,
    pub d_amplitude: Array1<f64>,
    pub phases: Array1<f64>,
    pub d_phase: Array1<f64>,
}

/// Evaluate `∂L/∂f` over `f_range`, `∂L/∂a` over `a_range` and `∂L/∂p` over
/// `p_range`, each with the remaining parameters fixed at `nominal`.
///
/// Sign changes in these curves bracket the stationary points the line
/// searches look for.
pub fn derivative_sweeps(
    obs: &Observations, nominal: &WaveParams, f_range: ArrayView1<'_, f64>,
    a_range: ArrayView1<'_, f64>, p_range: ArrayView1<'_, f64>,
) -> DerivativeSweeps {
    DerivativeSweeps {
        frequencies: f_range.to_owned(),
        d_frequency: f_range
            .mapv(|f| d_loss_d_frequency(obs, &WaveParams { frequency: f, ..*nominal })),
        amplitudes: a_range.to_owned(),
        d_amplitude: a_range
            .mapv(|a| d_loss_d_amplitude(obs, &WaveParams { amplitude: a, ..*nominal })),
        phases: p_range.to_owned(),
        d_phase: p_range.mapv(|p| d_loss_d_phase(obs, &WaveParams { phase: p, ..*nominal })),
    }
}
