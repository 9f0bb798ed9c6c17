//! likelihood — loss, derivatives, and the optimizer-facing model for
//! binary waveform observations.
//!
//! - [`loss`]: negative log-likelihood and probability-curve reconstruction.
//! - [`gradient`]: closed-form partial derivatives for the sinusoid and the
//!   derivative sweeps built on them.
//! - [`model`]: [`WaveLogLik`], the `LogLikelihood` consumed by the joint
//!   optimizer.
//!
//! All evaluators are pure. NaN and `+∞` losses are values here, not
//! errors; the search layer decides what to do with them.

pub mod gradient;
pub mod loss;
pub mod model;

pub use self::gradient::{
    d_loss_d_amplitude, d_loss_d_frequency, d_loss_d_phase, derivative_sweeps, loss_gradient,
    DerivativeSweeps,
};
pub use self::loss::{negative_log_likelihood, reconstruct};
pub use self::model::WaveLogLik;
