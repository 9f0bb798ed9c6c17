//! optimization — MLE stack over `argmin` with a unified error surface.
//!
//! Purpose
//! -------
//! Provide the numerical optimization layer for joint parameter fits.
//! Callers implement a log-likelihood, choose a solver configuration, and
//! obtain fitted parameters and diagnostics without touching backend
//! solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **maximizing log-likelihoods** `ℓ(θ)`
//!   (`loglik_optimizer`): L-BFGS with a choice of line search, and the
//!   derivative-free Nelder–Mead simplex.
//! - Normalize configuration issues, numerical failures, non-convergence and
//!   backend solver errors into a single enum (`errors::OptError`) with a
//!   common result alias (`OptResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Optimizers assume inputs are finite once validation has passed;
//!   invalid states are reported as `OptError`, not panics.
//! - A run that exhausts its iteration budget is an error
//!   (`OptError::NotConverged`), never a silent partial result.
//!
//! Conventions
//! -----------
//! - All solvers conceptually maximize a log-likelihood `ℓ(θ)` by minimizing
//!   an internal cost `c(θ) = -ℓ(θ)`; user-facing APIs and outcomes are
//!   expressed in terms of `ℓ`.
//! - Public optimization entrypoints that can fail return `OptResult<T>`;
//!   callers never see raw Argmin errors.
//! - No I/O here. Progress output is limited to the optional `obs_slog`
//!   observer and `log` records.
//!
//! Downstream usage
//! ----------------
//! - `likelihood::model::WaveLogLik` implements `LogLikelihood`;
//!   `search::joint::joint_mle` calls `maximize` / `maximize_simplex`.
//! - Front-ends import the curated surface via `optimization::prelude::*`.

pub mod errors;
pub mod loglik_optimizer;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use bitwave_mle::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
}
