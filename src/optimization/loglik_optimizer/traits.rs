//! Public API surface for log-likelihood maximization.
//!
//! - [`LogLikelihood`]: trait users implement for their model.
//! - [`MLEOptions`] and [`Tolerances`]: configuration for the optimizer.
//! - [`LineSearcher`]: choice of line search used by L-BFGS.
//! - [`SimplexOptions`]: configuration for the derivative-free Nelder–Mead path.
//! - [`OptimOutcome`]: normalized result returned by `maximize` / `maximize_simplex`.
//!
//! Convention: we *maximize* a user log-likelihood `ℓ(θ)` by minimizing the cost
//! `c(θ) = -ℓ(θ)`. If an analytic gradient is provided, it should be the gradient
//! of the log-likelihood (`∇ℓ(θ)`); the adapter flips the sign as needed.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Grad, Theta,
        validation::{
            validate_theta_hat, validate_value, verify_relative_step, verify_sd_tolerance,
            verify_tol_cost, verify_tol_grad,
        },
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// User-implemented log-likelihood interface.
///
/// You maximize `ℓ(θ)`; internally we minimize the cost `c(θ) = -ℓ(θ)`.
/// If you provide an analytic gradient, return the gradient of the
/// log-likelihood `∇ℓ(θ)` (the adapter flips the sign to match the cost).
///
/// - `type Data`: per-model data carried into `value`/`grad`/`check`.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `ℓ(θ)`.
///   - Errors: return a descriptive `OptError` for invalid inputs or model failures.
/// - `check(&Theta, &Data) -> OptResult<()>`: validation hook to reject
///   obviously invalid `θ`/`data` pairs. Called once before optimization.
///
/// Optional:
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: analytic gradient `∇ℓ(θ)`.
///   If not implemented, robust finite differences are used automatically.
pub trait LogLikelihood {
    type Data: 'static;

    // Required methods
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Choice of line search used inside the L-BFGS solver.
///
/// Variants:
/// - `MoreThuente`: More–Thuente line search.
/// - `HagerZhang`: Hager–Zhang line search.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"MoreThuente"`, `"HagerZhang"`). Unknown names return
/// `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    /// Parse a line-search choice from a string (case-insensitive).
    ///
    /// Accepts:
    /// - `"MoreThuente"`
    /// - `"HagerZhang"`
    /// - Any case variant (e.g., `"morethuente"`, `"HAGERZHANG"`).
    ///
    /// Any other value returns `OptError::InvalidLineSearch` with a helpful message.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols: Tolerances` — numerical tolerances and iteration limits.
/// - `line_searcher: LineSearcher` — line-search algorithm used by L-BFGS.
/// - `verbose: bool` — if `true`, attaches an observer (behind the `obs_slog`
///   feature) and prints progress.
/// - `lbfgs_mem: Option<usize>` — L-BFGS history size; `None` uses the default.
///
/// Constructor:
/// - `new(tols, line_searcher, verbose, lbfgs_mem) -> OptResult<Self>` — rejects
///   a zero memory; validation of numeric tolerances is handled in
///   `Tolerances::new`.
///
/// Default:
/// - `tols`: `tol_grad = 1e-6`, `tol_cost = None`, `max_iter = 300`
/// - `line_searcher`: `MoreThuente`
/// - `verbose`: `false`
/// - `lbfgs_mem`: `None` (uses default of 7)
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl MLEOptions {
    /// Create a new set of optimizer options.
    ///
    /// This constructor does not mutate values; validation of numeric fields is
    /// performed inside [`Tolerances::new`].
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-6), tol_cost: None, max_iter: Some(300) },
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Configuration of the Nelder–Mead simplex path.
///
/// - `max_iter`: iteration budget; exhausting it is reported as
///   non-convergence.
/// - `sd_tolerance`: stop once the standard deviation of the simplex costs
///   falls below this value.
/// - `relative_step`: size of the initial simplex relative to each starting
///   coordinate.
/// - `verbose`: attach the terminal observer (feature `obs_slog`).
///
/// Default: `max_iter = 1000`, `sd_tolerance = 1e-8`, `relative_step = 0.05`,
/// `verbose = false`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplexOptions {
    pub max_iter: usize,
    pub sd_tolerance: f64,
    pub relative_step: f64,
    pub verbose: bool,
}

impl SimplexOptions {
    /// Construct validated simplex options.
    ///
    /// # Errors
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    /// - [`OptError::InvalidSdTolerance`] for a non-finite or non-positive tolerance.
    /// - [`OptError::InvalidSimplexStep`] for a non-finite or non-positive step.
    pub fn new(
        max_iter: usize, sd_tolerance: f64, relative_step: f64, verbose: bool,
    ) -> OptResult<Self> {
        if max_iter == 0 {
            return Err(OptError::InvalidMaxIter {
                max_iter,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        verify_sd_tolerance(sd_tolerance)?;
        verify_relative_step(relative_step)?;
        Ok(Self { max_iter, sd_tolerance, relative_step, verbose })
    }
}

impl Default for SimplexOptions {
    fn default() -> Self {
        Self { max_iter: 1000, sd_tolerance: 1e-8, relative_step: 0.05, verbose: false }
    }
}

/// Numerical tolerances and iteration limits used by the optimizer.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None` but **at least one** of the three must be provided
/// (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - At least one of `tol_grad`, `tol_cost`, or `max_iter` must be `Some`.
    /// - If provided, tolerances must be **finite and strictly positive**.
    /// - If provided, `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for non-finite or non-positive tolerances.
    /// - `OptError::InvalidMaxIter` if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Canonical result returned by `maximize` and `maximize_simplex`.
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: best **log-likelihood** value `ℓ(θ)` (not the cost).
/// - `converged`: `true` only if the solver reported convergence or reached
///   its target cost.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
/// - Keys follow argmin’s counters, e.g., cost_count, gradient_count, etc.
/// - `grad_norm`: norm of the last available gradient, if present.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Build a validated [`OptimOutcome`] from raw solver state.
    ///
    /// Performs:
    /// - `theta_hat` check via `validate_theta_hat` (present and all finite).
    /// - `value` check via `validate_value` (finite).
    /// - Maps `TerminationStatus` into `(converged, status)`; only
    ///   `SolverConverged` and `TargetCostReached` count as converged.
    /// - Computes `grad_norm` if a gradient was provided.
    ///
    /// # Errors
    /// - Propagates any validation errors for `theta_hat` or `value`.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let status = match &termination {
            TerminationStatus::NotTerminated => "Not terminated".to_string(),
            other => format!("{other:?}"),
        };
        let converged = matches!(
            termination,
            TerminationStatus::Terminated(
                TerminationReason::SolverConverged | TerminationReason::TargetCostReached
            )
        );
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { theta_hat, value, converged, status, iterations, fn_evals, grad_norm })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Validation rules of `Tolerances`, `MLEOptions` and `SimplexOptions`.
    // - Line-search parsing.
    // - Mapping of termination status into `OptimOutcome::converged`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `Tolerances::new` requires at least one criterion and positive values.
    fn tolerances_validation() {
        assert_eq!(Tolerances::new(None, None, None), Err(OptError::NoTolerancesProvided));
        assert!(matches!(
            Tolerances::new(Some(-1.0), None, None),
            Err(OptError::InvalidTolGrad { .. })
        ));
        assert!(matches!(
            Tolerances::new(None, Some(f64::NAN), None),
            Err(OptError::InvalidTolCost { .. })
        ));
        assert!(matches!(Tolerances::new(None, None, Some(0)), Err(OptError::InvalidMaxIter { .. })));
        assert_eq!(MLEOptions::default().tols, Tolerances::new(Some(1e-6), None, Some(300)).unwrap());
    }

    #[test]
    // Purpose
    // -------
    // Simplex options reject zero iterations and non-positive tolerances or
    // steps; the default matches the documented values.
    fn simplex_options_validation() {
        assert!(matches!(SimplexOptions::new(0, 1e-8, 0.05, false), Err(OptError::InvalidMaxIter { .. })));
        assert!(matches!(
            SimplexOptions::new(10, 0.0, 0.05, false),
            Err(OptError::InvalidSdTolerance { .. })
        ));
        assert!(matches!(
            SimplexOptions::new(10, 1e-8, f64::INFINITY, false),
            Err(OptError::InvalidSimplexStep { .. })
        ));
        assert_eq!(SimplexOptions::new(1000, 1e-8, 0.05, false).unwrap(), SimplexOptions::default());
    }

    #[test]
    // Purpose
    // -------
    // Line-search names parse case-insensitively; unknown names error.
    fn line_searcher_parsing() {
        assert_eq!("hagerzhang".parse::<LineSearcher>().unwrap(), LineSearcher::HagerZhang);
        assert_eq!("MoreThuente".parse::<LineSearcher>().unwrap(), LineSearcher::MoreThuente);
        assert!(matches!("bfgs".parse::<LineSearcher>(), Err(OptError::InvalidLineSearch { .. })));
        assert!(matches!(
            MLEOptions::new(MLEOptions::default().tols, LineSearcher::HagerZhang, false, Some(0)),
            Err(OptError::InvalidLBFGSMem { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Only a solver-reported convergence or a reached target cost counts as
    // converged; budget exhaustion, interrupts and solver exits do not.
    fn outcome_maps_termination_status() {
        let theta = Some(array![1.0, 0.2, 0.0]);
        let stopped = [
            TerminationReason::MaxItersReached,
            TerminationReason::Interrupt,
            TerminationReason::SolverExit("line search failed".to_string()),
        ];
        for reason in stopped {
            let status = TerminationStatus::Terminated(reason);
            let out = OptimOutcome::new(theta.clone(), -5.0, status, 10, FnEvalMap::new(), None).unwrap();
            assert!(!out.converged, "{}", out.status);
        }

        let target = TerminationStatus::Terminated(TerminationReason::TargetCostReached);
        let out = OptimOutcome::new(theta.clone(), -5.0, target, 3, FnEvalMap::new(), None).unwrap();
        assert!(out.converged);

        let done = TerminationStatus::Terminated(TerminationReason::SolverConverged);
        let out = OptimOutcome::new(theta, -5.0, done, 4, FnEvalMap::new(), None).unwrap();
        assert!(out.converged);
        assert_eq!(out.iterations, 4);

        assert_eq!(
            OptimOutcome::new(None, -5.0, TerminationStatus::NotTerminated, 0, FnEvalMap::new(), None),
            Err(OptError::MissingThetaHat)
        );
    }
}
