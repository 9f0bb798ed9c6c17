//! Observation containers for time-stamped binary measurements.
//!
//! Purpose
//! -------
//! Provide a single validated container, [`Observations`], pairing each
//! sampling instant with the bit measured at that instant. Every likelihood,
//! search, and optimizer entry point takes `&Observations`, so the pairing
//! invariant is checked once at the boundary instead of implicitly by
//! index-aligned iteration.
//!
//! Invariants & assumptions
//! ------------------------
//! - `times.len() == bits.len() > 0`.
//! - Every time is finite; ordering is not required (chronological order is
//!   conventional but no algorithm depends on it).
//! - Every bit is exactly `0` or `1`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path and each rejection branch of
//!   [`Observations::new`].
use crate::waveform::errors::{WaveError, WaveResult};
use ndarray::{Array1, ArrayView1};

/// `Observations` — validated `(time, bit)` pairs.
///
/// Fields
/// ------
/// - `times`: `Array1<f64>`
///   Sampling instants; finite.
/// - `bits`: `Array1<u8>`
///   Measured outcomes; each `0` or `1`.
///
/// Notes
/// -----
/// - Fields are private so the invariants cannot be broken after
///   construction; use [`Observations::times`] / [`Observations::bits`] for
///   read access.
#[derive(Debug, Clone, PartialEq)]
pub struct Observations {
    times: Array1<f64>,
    bits: Array1<u8>,
}

impl Observations {
    /// Construct validated observations.
    ///
    /// Errors
    /// ------
    /// - `WaveError::LengthMismatch` when the sequences differ in length.
    /// - `WaveError::EmptySeries` when both are empty.
    /// - `WaveError::NonFiniteTime { index, value }` for the first NaN/±inf time.
    /// - `WaveError::InvalidBit { index, value }` for the first bit not in {0, 1}.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use bitwave_mle::waveform::data::Observations;
    /// let obs = Observations::new(array![0.0, 0.5, 1.0], array![1, 0, 1]).unwrap();
    /// assert_eq!(obs.len(), 3);
    /// ```
    pub fn new(times: Array1<f64>, bits: Array1<u8>) -> WaveResult<Self> {
        if times.len() != bits.len() {
            return Err(WaveError::LengthMismatch { times: times.len(), bits: bits.len() });
        }
        if times.is_empty() {
            return Err(WaveError::EmptySeries);
        }
        for (index, &value) in times.iter().enumerate() {
            if !value.is_finite() {
                return Err(WaveError::NonFiniteTime { index, value });
            }
        }
        for (index, &value) in bits.iter().enumerate() {
            if value > 1 {
                return Err(WaveError::InvalidBit { index, value });
            }
        }
        Ok(Observations { times, bits })
    }

    /// Build observations from a boolean sequence.
    pub fn from_bools(times: Array1<f64>, bits: &[bool]) -> WaveResult<Self> {
        let bits = bits.iter().map(|&b| u8::from(b)).collect::<Array1<u8>>();
        Self::new(times, bits)
    }

    /// Sampling instants.
    pub fn times(&self) -> ArrayView1<'_, f64> {
        self.times.view()
    }

    /// Measured bits.
    pub fn bits(&self) -> ArrayView1<'_, u8> {
        self.bits.view()
    }

    /// Number of observations (always > 0).
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`; kept for API symmetry with collection types.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Iterate over `(time, bit)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, u8)> + '_ {
        self.times.iter().copied().zip(self.bits.iter().copied())
    }

    /// Replace the bit sequence, keeping the same times.
    ///
    /// Used by noise channels; the replacement goes through the same
    /// validation as [`Observations::new`].
    pub fn with_bits(&self, bits: Array1<u8>) -> WaveResult<Self> {
        Self::new(self.times.clone(), bits)
    }

    /// Fraction of observations equal to `1`.
    pub fn ones_fraction(&self) -> f64 {
        let ones = self.bits.iter().filter(|&&b| b == 1).count();
        ones as f64 / self.len() as f64
    }
}
