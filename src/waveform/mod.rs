//! waveform — probability models, observation data, and noise for binary
//! periodic signals.
//!
//! Purpose
//! -------
//! Bundle everything needed to describe and generate time-stamped bit
//! sequences whose success probability varies periodically: the waveform
//! families, their parameters, the validated observation container, the
//! bit-flip noise channel, and synthetic data generation.
//!
//! Key behaviors
//! -------------
//! - [`family`]: closed [`WaveformFamily`] enum dispatched through the
//!   [`WaveformModel`] trait (sinusoid, rectangular, sawtooth).
//! - [`params`]: [`WaveParams`] and the [`Parameter`] selector.
//! - [`data`]: [`Observations`], checked once at construction.
//! - [`noise`]: [`flip_bit`] and the validated [`BitFlipChannel`].
//! - [`simulate`]: [`time_grid`], [`simulate_observations`] and the seeded
//!   [`RecoveryStudy`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Probability models never clamp; out-of-range probabilities are left for
//!   the likelihood layer to expose as degenerate losses.
//! - Every random consumer takes an explicit `&mut impl Rng`.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based. Bits are `u8` in `{0, 1}`.
//! - Errors surface as [`WaveError`] / [`WaveResult`].

pub mod data;
pub mod errors;
pub mod family;
pub mod noise;
pub mod params;
pub mod simulate;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::Observations;
pub use self::errors::{WaveError, WaveResult};
pub use self::family::{WaveformFamily, WaveformModel};
pub use self::noise::{flip_bit, BitFlipChannel};
pub use self::params::{Parameter, WaveParams};
pub use self::simulate::{simulate_observations, time_grid, RecoveryStudy, RecoverySummary, SimOpts};

pub mod prelude {
    pub use super::data::Observations;
    pub use super::errors::{WaveError, WaveResult};
    pub use super::family::{WaveformFamily, WaveformModel};
    pub use super::noise::{flip_bit, BitFlipChannel};
    pub use super::params::{Parameter, WaveParams};
    pub use super::simulate::{simulate_observations, time_grid, RecoveryStudy, SimOpts};
}
