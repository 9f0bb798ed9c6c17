//! Errors for observation data, waveform configuration, and noise channels.
//!
//! [`WaveError`] covers everything that can be rejected before a likelihood
//! is ever evaluated: malformed observation series, probability curves that
//! leave `[0, 1]` during simulation, and invalid bit-flip probabilities.
//! Degenerate likelihood terms are *not* reported here; they travel as NaN
//! through a single loss evaluation and are turned into
//! [`SearchError`](crate::search::errors::SearchError) values by the search
//! selectors.
//!
//! ## Conventions
//! - **Indices are 0-based** and point at the first offending element.
//! - Bits are stored as `u8` and must be exactly `0` or `1`.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};

/// Result alias for waveform and data-layer operations.
pub type WaveResult<T> = Result<T, WaveError>;

/// Validation errors for observations, families, and noise settings.
#[derive(Debug, Clone, PartialEq)]
pub enum WaveError {
    // ---- Observation data ----
    /// Observation series is empty.
    EmptySeries,

    /// Time and bit sequences have different lengths.
    LengthMismatch { times: usize, bits: usize },

    /// An observation time is NaN/±inf.
    NonFiniteTime { index: usize, value: f64 },

    /// An observation bit is neither 0 nor 1.
    InvalidBit { index: usize, value: u8 },

    // ---- Simulation ----
    /// A success probability fell outside `[0, 1]` while sampling bits.
    InvalidProbability { index: usize, value: f64 },

    /// Time grid requires a finite, strictly positive step and `start < stop`.
    InvalidTimeGrid { start: f64, stop: f64, step: f64 },

    // ---- Noise ----
    /// Flip probability must lie in `[0, 1]`.
    InvalidFlipProbability { value: f64 },

    // ---- Parsing ----
    /// Unknown waveform family tag.
    UnknownFamily { name: String },

    /// Unknown parameter name.
    UnknownParameter { name: String },
}

impl std::error::Error for WaveError {}

impl std::fmt::Display for WaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Observation data ----
            WaveError::EmptySeries => {
                write!(f, "Observation series is empty.")
            }
            WaveError::LengthMismatch { times, bits } => {
                write!(f, "Times and bits must have equal length: {times} times, {bits} bits")
            }
            WaveError::NonFiniteTime { index, value } => {
                write!(f, "Observation time at index {index} is non-finite: {value}")
            }
            WaveError::InvalidBit { index, value } => {
                write!(f, "Observation bit at index {index} must be 0 or 1; got: {value}")
            }
            // ---- Simulation ----
            WaveError::InvalidProbability { index, value } => {
                write!(f, "Success probability at index {index} must lie in [0, 1]; got: {value}")
            }
            WaveError::InvalidTimeGrid { start, stop, step } => {
                write!(
                    f,
                    "Time grid needs start < stop and a finite step > 0; got start={start}, stop={stop}, step={step}"
                )
            }
            // ---- Noise ----
            WaveError::InvalidFlipProbability { value } => {
                write!(f, "Flip probability must lie in [0, 1]; got: {value}")
            }
            // ---- Parsing ----
            WaveError::UnknownFamily { name } => {
                write!(
                    f,
                    "Unknown waveform family '{name}'. Valid options are 'sine', 'square' or 'saw'."
                )
            }
            WaveError::UnknownParameter { name } => {
                write!(
                    f,
                    "Unknown parameter '{name}'. Valid options are 'frequency', 'amplitude', 'phase' or 'tpp'."
                )
            }
        }
    }
}

/// Convert a [`WaveError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl std::convert::From<WaveError> for PyErr {
    fn from(err: WaveError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Display output names the offending index and value so callers can
    // locate bad input without re-scanning the series.
    fn display_reports_index_and_value() {
        let err = WaveError::InvalidBit { index: 7, value: 3 };
        let msg = err.to_string();
        assert!(msg.contains("index 7"));
        assert!(msg.contains('3'));

        let err = WaveError::LengthMismatch { times: 4, bits: 5 };
        assert!(err.to_string().contains("4 times, 5 bits"));
    }
}
