//! High-level entry points for maximizing a user-provided `LogLikelihood`.
//!
//! [`maximize`] selects an L-BFGS solver with either Hager–Zhang or
//! More–Thuente line search, wraps the model in an `ArgMinAdapter` (which
//! *minimizes* `-ℓ(θ)`), and delegates the run to `run_lbfgs`.
//! [`maximize_simplex`] does the same with Nelder–Mead over a
//! `SimplexAdapter`. Both fail with `OptError::NotConverged` when the solver
//! stops without meeting a convergence criterion.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::{ArgMinAdapter, SimplexAdapter},
        builders::{build_nelder_mead, build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::{run_lbfgs, run_simplex},
        traits::{LineSearcher, LogLikelihood, MLEOptions, SimplexOptions},
    },
};

/// Maximize a log-likelihood `ℓ(θ)` using L-BFGS with the chosen line search.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Wraps `(f, data)` in an `ArgMinAdapter` that exposes a *minimization*
///   problem `c(θ) = -ℓ(θ)` to `argmin`.
/// - Builds an L-BFGS solver with either **Hager–Zhang** or **More–Thuente**
///   line search based on `opts.line_searcher`.
/// - Calls `run_lbfgs` and rejects non-converged outcomes.
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates builder errors from `build_optimizer_*`.
/// - Propagates runtime errors from `run_lbfgs` (e.g., line search failures).
/// - `OptError::NotConverged` if the solver stopped without reporting convergence.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use bitwave_mle::optimization::errors::OptResult;
/// use bitwave_mle::optimization::loglik_optimizer::{
///     maximize, MLEOptions, LogLikelihood, Theta,
/// };
///
/// struct MyLL;
/// impl LogLikelihood for MyLL {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         // Simple concave log-likelihood: -(θ·θ)
///         Ok(-theta.dot(theta))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&MyLL, array![0.1, -0.2, 0.3], &(), &MLEOptions::default())?;
/// println!("θ̂ = {:?}", out.theta_hat);
/// # Ok::<(), bitwave_mle::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    let outcome = match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)?
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)?
        }
    };
    require_convergence(outcome)
}

/// Maximize a log-likelihood `ℓ(θ)` with the Nelder–Mead simplex.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Builds the initial simplex around `theta0` (see
///   [`initial_simplex`](super::builders::initial_simplex)).
/// - Non-finite log-likelihoods are treated as `+∞` cost, so degenerate
///   points are never accepted as the optimum.
///
/// # Errors
/// - Propagates any error from `f.check` or the builder.
/// - `OptError::NotConverged` if `opts.max_iter` iterations ran out first.
pub fn maximize_simplex<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &SimplexOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let solver = build_nelder_mead(&theta0, opts)?;
    let outcome = run_simplex(theta0, opts, SimplexAdapter::new(f, data), solver)?;
    require_convergence(outcome)
}

fn require_convergence(outcome: OptimOutcome) -> OptResult<OptimOutcome> {
    if !outcome.converged {
        return Err(OptError::NotConverged {
            status: outcome.status,
            iterations: outcome.iterations,
            value: outcome.value,
        });
    }
    Ok(outcome)
}
