//! Execution helpers that run an `argmin` solver on a log-likelihood problem
//! and return a crate-friendly [`OptimOutcome`].
//!
//! [`run_lbfgs`] drives the gradient-based solvers over an [`ArgMinAdapter`];
//! [`run_simplex`] drives Nelder–Mead over a [`SimplexAdapter`]. Both apply
//! the initial parameters and the iteration budget to the executor, attach
//! the terminal slog observer when `verbose` is set (feature `obs_slog`),
//! and convert the final state without judging convergence; that is left to
//! the callers in `api`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, LogLikelihood, MLEOptions, OptimOutcome, Theta,
        adapter::{ArgMinAdapter, SimplexAdapter},
        traits::SimplexOptions,
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{Executor, IterState, Solver, State};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

/// Run an `argmin` gradient-based optimization for a log-likelihood problem.
///
/// This is the shared runner used by both line-search variants. It wires up:
/// - the user model via [`ArgMinAdapter`],
/// - the chosen `Solver` (e.g. L-BFGS with Hager–Zhang/More–Thuente),
/// - initial parameter `theta0`,
/// - optional observers (behind the `obs_slog` feature),
/// - optional `max_iters`,
///   then executes the solver and converts the result into [`OptimOutcome`].
///
/// # Type Parameters
/// - `F`: Your log-likelihood type implementing [`LogLikelihood`].
/// - `S`: Any `argmin` solver whose `Problem` is `ArgMinAdapter<'a, F>` and whose
///   `IterState` matches the aliases `Theta` (parameters), `Grad` (gradient),
///   and `f64` as the float type.
///
/// # Feature flags
/// If the `obs_slog` feature is enabled and `opts.verbose == true`, a terminal
/// slog observer is attached with `ObserverMode::Always` and a one-time pre-iteration
/// line logs ℓ(θ₀) and, if available, ||grad|| before the first iteration.
///
/// # Errors
/// - Propagates any `argmin` runtime error (solver errors, line-search
///   failures, cost errors) via `From<argmin::core::Error>`.
/// - Propagates any validation errors encountered when constructing
///   [`OptimOutcome`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, IterState<Theta, Grad, (), (), (), f64>> + Send + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    OptimOutcome::new(
        result.take_best_param(),
        -result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )
}

/// Run a derivative-free optimization (Nelder–Mead) for a log-likelihood
/// problem.
///
/// Same wiring as [`run_lbfgs`], with the iteration budget taken from
/// `opts.max_iter`. The outcome carries no gradient norm.
///
/// # Errors
/// - Propagates `argmin` runtime errors and cost errors other than
///   non-finite values (which [`SimplexAdapter`] maps to `+∞`).
/// - Propagates outcome validation errors, e.g. a best cost of `+∞`
///   when every vertex was degenerate.
pub fn run_simplex<'a, F, S>(
    theta0: Theta, opts: &SimplexOptions, problem: SimplexAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: Solver<SimplexAdapter<'a, F>, IterState<Theta, (), (), (), (), f64>> + Send + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let ll0 = -problem.cost(&theta0)?;
        log::info!("init: ell(theta0) = {ll0:.6}");
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0).max_iters(opts.max_iter as u64));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    OptimOutcome::new(
        result.take_best_param(),
        -result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        None,
    )
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: LogLikelihood,
{
    let ll0 = -problem.cost(theta0)?;
    let g0n = problem.gradient(theta0).ok().map(|g| g.l2_norm());

    log::info!(
        "init: ell(theta0) = {:.6}{}",
        ll0,
        g0n.map(|n| format!(", ||grad|| = {:.6}", n)).unwrap_or_default()
    );
    Ok(())
}
