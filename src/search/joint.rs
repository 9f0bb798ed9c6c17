//! Joint numerical optimization of all waveform parameters.
//!
//! [`joint_mle`] hands [`WaveLogLik`] to the generic optimizer, either
//! Nelder–Mead (default, derivative-free) or L-BFGS. The optimizer vector
//! is `[f, a, p]`, or `[f, a, p, tpp]` for a rectangular guess that carries
//! a pulse width. Unlike the line and grid searches, this path does not
//! filter degenerate losses: the simplex ranks them last and L-BFGS fails
//! on them.
use crate::likelihood::{loss::reconstruct, model::WaveLogLik};
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{maximize, maximize_simplex, MLEOptions, OptimOutcome, SimplexOptions},
};
use crate::waveform::{data::Observations, family::WaveformFamily, params::WaveParams};
use log::info;
use ndarray::Array1;

/// Solver used by [`joint_mle`].
#[derive(Debug, Clone, PartialEq)]
pub enum JointSolver {
    NelderMead(SimplexOptions),
    Lbfgs(MLEOptions),
}

impl Default for JointSolver {
    fn default() -> Self {
        JointSolver::NelderMead(SimplexOptions::default())
    }
}

/// Result of [`joint_mle`]; `outcome.value` is the maximized
/// log-likelihood, i.e. minus the loss at `params`.
#[derive(Debug, Clone, PartialEq)]
pub struct JointFit {
    pub params: WaveParams,
    pub reconstruction: Array1<f64>,
    pub outcome: OptimOutcome,
}

/// Maximize the likelihood jointly over every parameter, starting at `guess`.
///
/// Errors
/// ------
/// - `OptError::IllPosedParameter` if `guess` is not an admissible start
///   (non-finite entry, `f <= 0`, `|a| > 0.5`, or invalid pulse width).
/// - `OptError::NotConverged` when the iteration budget runs out.
/// - Any backend error raised by the solver (for L-BFGS this includes a
///   line search stepping into a degenerate region).
pub fn joint_mle(
    obs: &Observations, family: WaveformFamily, guess: &WaveParams, solver: &JointSolver,
) -> OptResult<JointFit> {
    let model = WaveLogLik::new(family);
    let theta0 = guess.to_theta();
    let outcome = match solver {
        JointSolver::NelderMead(opts) => maximize_simplex(&model, theta0, obs, opts)?,
        JointSolver::Lbfgs(opts) => maximize(&model, theta0, obs, opts)?,
    };
    let params = WaveLogLik::params(&outcome.theta_hat)?;
    info!(
        "{family} joint MLE: f = {:.6}, a = {:.6}, p = {:.6} after {} iterations ({})",
        params.frequency, params.amplitude, params.phase, outcome.iterations, outcome.status
    );
    Ok(JointFit { reconstruction: reconstruct(obs.times(), &params, family), params, outcome })
}
