//! Waveform parameters and the single-parameter selector used by scans.
//!
//! [`WaveParams`] holds the `(frequency, amplitude, phase)` triple plus the
//! optional rectangular pulse width. Nothing here validates: an amplitude
//! above 0.5 or a non-positive frequency is the caller's responsibility and
//! shows up later as a degenerate loss.
//!
//! [`Parameter`] names exactly one of the four coordinates so line searches
//! and the coordinate-descent orchestrator can vary it while holding the
//! rest fixed.
use crate::waveform::errors::WaveError;
use ndarray::{Array1, ArrayView1};
use std::str::FromStr;

/// Parameters of a periodic success probability.
///
/// - `frequency`: cycles per unit time; expected `> 0`.
/// - `amplitude`: deviation from 0.5; a valid probability needs `|a| <= 0.5`.
/// - `phase`: radians, any real (conventionally `[0, 2π)`).
/// - `pulse_width`: time at the high level per period (rectangular only);
///   `None` selects the family default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
    pub frequency: f64,
    pub amplitude: f64,
    pub phase: f64,
    pub pulse_width: Option<f64>,
}

impl WaveParams {
    /// Build a parameter triple with no explicit pulse width.
    pub fn new(frequency: f64, amplitude: f64, phase: f64) -> Self {
        WaveParams { frequency, amplitude, phase, pulse_width: None }
    }

    /// Same parameters with an explicit pulse width.
    pub fn with_pulse_width(self, pulse_width: f64) -> Self {
        WaveParams { pulse_width: Some(pulse_width), ..self }
    }

    /// Copy of `self` with one coordinate replaced.
    pub fn with(self, parameter: Parameter, value: f64) -> Self {
        match parameter {
            Parameter::Frequency => WaveParams { frequency: value, ..self },
            Parameter::Amplitude => WaveParams { amplitude: value, ..self },
            Parameter::Phase => WaveParams { phase: value, ..self },
            Parameter::PulseWidth => WaveParams { pulse_width: Some(value), ..self },
        }
    }

    /// Read one coordinate. `PulseWidth` yields `None` when unset.
    pub fn get(&self, parameter: Parameter) -> Option<f64> {
        match parameter {
            Parameter::Frequency => Some(self.frequency),
            Parameter::Amplitude => Some(self.amplitude),
            Parameter::Phase => Some(self.phase),
            Parameter::PulseWidth => self.pulse_width,
        }
    }

    /// Pack into an optimizer vector: `[f, a, p]` or `[f, a, p, tpp]`.
    pub fn to_theta(&self) -> Array1<f64> {
        match self.pulse_width {
            Some(tpp) => Array1::from(vec![self.frequency, self.amplitude, self.phase, tpp]),
            None => Array1::from(vec![self.frequency, self.amplitude, self.phase]),
        }
    }

    /// Unpack an optimizer vector `[f, a, p]` or `[f, a, p, tpp]`.
    ///
    /// Returns `None` for any other length.
    pub fn from_theta(theta: ArrayView1<'_, f64>) -> Option<Self> {
        match theta.len() {
            3 => Some(WaveParams::new(theta[0], theta[1], theta[2])),
            4 => Some(WaveParams::new(theta[0], theta[1], theta[2]).with_pulse_width(theta[3])),
            _ => None,
        }
    }
}

/// One scannable coordinate of [`WaveParams`].
///
/// Parsing accepts case-insensitive `"frequency"`, `"amplitude"`, `"phase"`
/// and `"tpp"` / `"pulse_width"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Frequency,
    Amplitude,
    Phase,
    PulseWidth,
}

impl Parameter {
    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Parameter::Frequency => "frequency",
            Parameter::Amplitude => "amplitude",
            Parameter::Phase => "phase",
            Parameter::PulseWidth => "tpp",
        }
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = WaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "frequency" | "f" => Ok(Parameter::Frequency),
            "amplitude" | "a" => Ok(Parameter::Amplitude),
            "phase" | "p" => Ok(Parameter::Phase),
            "tpp" | "pulse_width" => Ok(Parameter::PulseWidth),
            _ => Err(WaveError::UnknownParameter { name: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // `with` replaces exactly one coordinate and leaves the rest untouched.
    fn with_replaces_single_coordinate() {
        let base = WaveParams::new(1.0, 0.2, 0.3);
        let moved = base.with(Parameter::Amplitude, 0.4);
        assert_eq!(moved, WaveParams::new(1.0, 0.4, 0.3));
        assert_eq!(base.with(Parameter::PulseWidth, 0.25).pulse_width, Some(0.25));
        assert_eq!(base.get(Parameter::PulseWidth), None);
    }

    #[test]
    // Purpose
    // -------
    // Optimizer vectors carry the pulse width only when it is set.
    fn theta_layout_tracks_pulse_width() {
        let p = WaveParams::new(1.5, 0.1, 2.0);
        assert_eq!(p.to_theta().len(), 3);
        let q = p.with_pulse_width(0.2);
        let theta = q.to_theta();
        assert_eq!(theta.len(), 4);
        assert_eq!(WaveParams::from_theta(theta.view()), Some(q));
        assert_eq!(WaveParams::from_theta(p.to_theta().view()), Some(p));
        assert_eq!(WaveParams::from_theta(Array1::from(vec![1.0, 0.1]).view()), None);
    }

    #[test]
    // Purpose
    // -------
    // Parameter names parse case-insensitively; unknown names are errors.
    fn parameter_parsing() {
        assert_eq!("Frequency".parse::<Parameter>().unwrap(), Parameter::Frequency);
        assert_eq!("TPP".parse::<Parameter>().unwrap(), Parameter::PulseWidth);
        assert!(matches!(
            "width".parse::<Parameter>(),
            Err(WaveError::UnknownParameter { .. })
        ));
    }
}
