//! Waveform families and their success-probability models.
//!
//! Purpose
//! -------
//! Map `(time, parameters)` to the probability of observing a `1` for each
//! of the three supported shapes. The family is a closed enum,
//! [`WaveformFamily`], resolved once per call into a `&'static dyn`
//! [`WaveformModel`] so the inner loops never re-branch on the family.
//!
//! Key behaviors
//! -------------
//! - Sinusoid: `p1 = 0.5 + a·sin(2πf·t + p)`.
//! - Rectangular: `p1 = 0.5 + a·square(2πf·t + p, duty)` with
//!   `duty = tpp·f` and a default pulse width `tpp = 1/(3f)` (duty 1/3).
//! - Sawtooth: `p1 = 0.5 + a·sawtooth(2πf·t + p)`, ramp width 0, i.e. a
//!   linear fall from +1 to −1 across each period.
//! - `p0 = 1 − p1` for every family.
//!
//! Invariants & assumptions
//! ------------------------
//! - No clamping and no validation: amplitudes above 0.5 produce
//!   probabilities outside `[0, 1]`, which the likelihood layer reports as
//!   degenerate (NaN) losses.
//! - A duty cycle outside `[0, 1]` makes the square wave NaN.
use crate::waveform::{errors::WaveError, params::WaveParams};
use ndarray::{Array1, ArrayView1};
use std::f64::consts::{PI, TAU};
use std::str::FromStr;

/// Capability shared by all waveform families.
pub trait WaveformModel: Sync {
    /// Probability of observing `1` at time `t`.
    fn p1(&self, t: f64, params: &WaveParams) -> f64;

    /// Probability of observing `0` at time `t`.
    fn p0(&self, t: f64, params: &WaveParams) -> f64 {
        1.0 - self.p1(t, params)
    }

    /// Pulse width used when `params.pulse_width` is `None`.
    ///
    /// Only meaningful for the rectangular family.
    fn default_pulse_width(&self, _frequency: f64) -> Option<f64> {
        None
    }

    /// Vectorized [`WaveformModel::p1`].
    fn p1_curve(&self, times: ArrayView1<'_, f64>, params: &WaveParams) -> Array1<f64> {
        times.mapv(|t| self.p1(t, params))
    }

    /// Vectorized [`WaveformModel::p0`].
    fn p0_curve(&self, times: ArrayView1<'_, f64>, params: &WaveParams) -> Array1<f64> {
        times.mapv(|t| self.p0(t, params))
    }
}

/// Instantaneous phase `2πf·t + p`.
#[inline]
pub fn phase_angle(t: f64, params: &WaveParams) -> f64 {
    TAU * params.frequency * t + params.phase
}

/// Periodic square wave with period `2π`.
///
/// Returns `+1` while `x mod 2π < 2π·duty`, `−1` otherwise, and NaN when
/// `duty` is outside `[0, 1]`.
pub fn square_wave(x: f64, duty: f64) -> f64 {
    if !(0.0..=1.0).contains(&duty) {
        return f64::NAN;
    }
    if x.rem_euclid(TAU) < TAU * duty { 1.0 } else { -1.0 }
}

/// Falling sawtooth with period `2π`: `+1` at `x = 0`, linear down to `−1`
/// just before `x = 2π`.
pub fn sawtooth_wave(x: f64) -> f64 {
    (PI - x.rem_euclid(TAU)) / PI
}

/// `p1 = 0.5 + a·sin(2πf·t + p)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SineWave;

impl WaveformModel for SineWave {
    #[inline]
    fn p1(&self, t: f64, params: &WaveParams) -> f64 {
        0.5 + params.amplitude * phase_angle(t, params).sin()
    }
}

/// `p1 = 0.5 + a·square(2πf·t + p, tpp·f)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquareWave;

impl SquareWave {
    /// Duty cycle implied by the pulse width (or its default).
    pub fn duty_cycle(&self, params: &WaveParams) -> f64 {
        let tpp = params
            .pulse_width
            .unwrap_or_else(|| 1.0 / (3.0 * params.frequency));
        tpp * params.frequency
    }
}

impl WaveformModel for SquareWave {
    #[inline]
    fn p1(&self, t: f64, params: &WaveParams) -> f64 {
        0.5 + params.amplitude * square_wave(phase_angle(t, params), self.duty_cycle(params))
    }

    fn default_pulse_width(&self, frequency: f64) -> Option<f64> {
        Some(1.0 / (3.0 * frequency))
    }
}

/// `p1 = 0.5 + a·sawtooth(2πf·t + p)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SawtoothWave;

impl WaveformModel for SawtoothWave {
    #[inline]
    fn p1(&self, t: f64, params: &WaveParams) -> f64 {
        0.5 + params.amplitude * sawtooth_wave(phase_angle(t, params))
    }
}

/// Closed set of supported waveform shapes.
///
/// Parsing accepts case-insensitive `"sine"`/`"sinusoid"`,
/// `"square"`/`"rectangular"` and `"saw"`/`"sawtooth"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WaveformFamily {
    #[default]
    Sinusoid,
    Rectangular,
    Sawtooth,
}

impl WaveformFamily {
    /// Resolve the family into its probability model.
    pub fn model(self) -> &'static dyn WaveformModel {
        match self {
            WaveformFamily::Sinusoid => &SineWave,
            WaveformFamily::Rectangular => &SquareWave,
            WaveformFamily::Sawtooth => &SawtoothWave,
        }
    }

    /// Whether closed-form derivatives of the loss exist for this family.
    pub fn has_analytic_gradient(self) -> bool {
        matches!(self, WaveformFamily::Sinusoid)
    }

    /// Whether the family carries a pulse-width parameter.
    pub fn has_pulse_width(self) -> bool {
        matches!(self, WaveformFamily::Rectangular)
    }

    /// Short tag (`"sine"`, `"square"`, `"saw"`).
    pub fn tag(self) -> &'static str {
        match self {
            WaveformFamily::Sinusoid => "sine",
            WaveformFamily::Rectangular => "square",
            WaveformFamily::Sawtooth => "saw",
        }
    }
}

impl std::fmt::Display for WaveformFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for WaveformFamily {
    type Err = WaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sine" | "sinusoid" | "sinusoidal" => Ok(WaveformFamily::Sinusoid),
            "square" | "rectangular" | "pulse" => Ok(WaveformFamily::Rectangular),
            "saw" | "sawtooth" => Ok(WaveformFamily::Sawtooth),
            _ => Err(WaveError::UnknownFamily { name: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Complementarity p1 + p0 = 1 for every family.
    // - Reduction to p1 = 0.5 at zero amplitude.
    // - Shape of the square and sawtooth primitives.
    // - Family parsing.
    // -------------------------------------------------------------------------

    const FAMILIES: [WaveformFamily; 3] =
        [WaveformFamily::Sinusoid, WaveformFamily::Rectangular, WaveformFamily::Sawtooth];

    #[test]
    // Purpose
    // -------
    // p1 and p0 are complementary for every family over a spread of times
    // and phases.
    //
    // Given
    // -----
    // - 400 times in [0, 10), several phases, amplitude 0.37.
    //
    // Expect
    // ------
    // - |p1 + p0 − 1| <= f64::EPSILON at every point.
    fn probabilities_are_complementary() {
        let times = Array1::linspace(0.0, 10.0, 400);
        for family in FAMILIES {
            let model = family.model();
            for phase in [0.0, 1.0, -2.5, 7.0] {
                let params = WaveParams::new(1.3, 0.37, phase);
                let p1 = model.p1_curve(times.view(), &params);
                let p0 = model.p0_curve(times.view(), &params);
                for (a, b) in p1.iter().zip(p0.iter()) {
                    assert!((a + b - 1.0).abs() <= f64::EPSILON, "{family}: {a} + {b}");
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Zero amplitude collapses every family to a fair coin.
    fn zero_amplitude_is_constant_half() {
        let times = Array1::linspace(-3.0, 12.0, 257);
        for family in FAMILIES {
            for phase in [0.0, 0.9, 4.0] {
                let params = WaveParams::new(0.7, 0.0, phase);
                let p1 = family.model().p1_curve(times.view(), &params);
                assert!(p1.iter().all(|&p| p == 0.5), "{family} at phase {phase}");
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // The square primitive respects its duty cycle and rejects invalid duty.
    fn square_wave_follows_duty_cycle() {
        assert_eq!(square_wave(0.1, 0.5), 1.0);
        assert_eq!(square_wave(PI + 0.1, 0.5), -1.0);
        assert_eq!(square_wave(-0.1, 0.5), -1.0);
        assert_eq!(square_wave(TAU + 0.1, 0.5), 1.0);
        assert_eq!(square_wave(0.1, 0.0), -1.0);
        assert!(square_wave(0.1, 1.5).is_nan());
        assert!(square_wave(0.1, -0.1).is_nan());
    }

    #[test]
    // Purpose
    // -------
    // Default pulse width of the rectangular family gives a one-third duty
    // cycle: the wave is high for a third of each period.
    fn rectangular_default_duty_is_one_third() {
        let f = 2.0;
        let params = WaveParams::new(f, 0.2, 0.0);
        assert!((SquareWave.duty_cycle(&params) - 1.0 / 3.0).abs() < 1e-12);
        let times = Array1::linspace(0.0, 1.0 / f, 3001);
        let high = SquareWave
            .p1_curve(times.view(), &params)
            .iter()
            .filter(|&&p| p > 0.5)
            .count();
        let frac = high as f64 / times.len() as f64;
        assert!((frac - 1.0 / 3.0).abs() < 0.01, "high fraction {frac}");
        assert_eq!(SquareWave.default_pulse_width(f), Some(1.0 / 6.0));
    }

    #[test]
    // Purpose
    // -------
    // The sawtooth falls linearly from +1 to −1 across one period.
    fn sawtooth_falls_across_period() {
        assert!((sawtooth_wave(0.0) - 1.0).abs() < 1e-12);
        assert!(sawtooth_wave(PI).abs() < 1e-12);
        assert!((sawtooth_wave(TAU - 1e-9) + 1.0).abs() < 1e-8);
        assert!(sawtooth_wave(1.0) > sawtooth_wave(2.0));
    }

    #[test]
    // Purpose
    // -------
    // Family tags parse case-insensitively and round-trip through `tag`.
    fn family_parsing() {
        for family in FAMILIES {
            assert_eq!(family.tag().parse::<WaveformFamily>().unwrap(), family);
        }
        assert_eq!("SINUSOID".parse::<WaveformFamily>().unwrap(), WaveformFamily::Sinusoid);
        assert!("triangle".parse::<WaveformFamily>().is_err());
        assert!(WaveformFamily::Sinusoid.has_analytic_gradient());
        assert!(!WaveformFamily::Sawtooth.has_analytic_gradient());
    }
}
