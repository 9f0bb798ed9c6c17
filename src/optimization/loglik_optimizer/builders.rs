//! loglik_optimizer::builders — L-BFGS and Nelder–Mead construction helpers.
//!
//! Purpose
//! -------
//! Provide small, focused builders for the L-BFGS and Nelder–Mead solvers
//! used by the log-likelihood optimizer. These helpers hide Argmin’s generic wiring
//! and apply crate-level options (e.g., tolerances, memory size) so that
//! higher-level code can request a configured solver without touching
//! Argmin-specific types.
//!
//! Key behaviors
//! -------------
//! - Construct L-BFGS solvers with either Hager–Zhang or More–Thuente
//!   line search based on crate-level aliases.
//! - Apply optional gradient and cost-change tolerances from
//!   [`MLEOptions`] via a shared configuration helper.
//! - Build a Nelder–Mead solver around an initial simplex obtained by
//!   perturbing each coordinate of the starting point in turn
//!   ([`initial_simplex`]).
//! - Leave the initial parameter vector and maximum iterations to the
//!   runner/executor layer, keeping these builders side-effect free.
//!
//! Invariants & assumptions
//! ------------------------
//! - All solvers operate on the canonical optimizer numeric types
//!   [`Theta`], [`Grad`], and [`Cost`] as defined in
//!   [`loglik_optimizer::types`].
//! - The L-BFGS memory (`m`) is either provided via `opts.lbfgs_mem` or
//!   defaults to [`DEFAULT_LBFGS_MEM`].
//! - Any invalid tolerance passed into Argmin’s
//!   `with_tolerance_grad` / `with_tolerance_cost` is surfaced as an
//!   [`OptError`] via the crate’s `From<Error>` implementations; callers
//!   are expected to handle these with `OptResult`.
//!
//! Conventions
//! -----------
//! - [`HagerZhangLS`] and [`MoreThuenteLS`] are the crate’s canonical
//!   line-search aliases; [`LbfgsHagerZhang`] and
//!   [`LbfgsMoreThuente`] pair these with the standard `(Theta, Grad,
//!   Cost)` triple.
//! - The builders do **not** set an initial parameter vector (`theta0`)
//!   or `max_iters`; these are treated as runtime concerns and are
//!   applied by the runner (e.g., `run_lbfgs`).
//! - Errors are always reported via [`OptResult`]; the underlying
//!   `argmin::core::Error` values never leak directly across module
//!   boundaries.
//!
//! Downstream usage
//! ----------------
//! - High-level optimization entry points call
//!   [`build_optimizer_hager_zhang`] or
//!   [`build_optimizer_more_thuente`] based on a configured
//!   `LineSearcher` enum in [`MLEOptions`].
//! - The returned solver is passed to a runner (e.g., `run_lbfgs`) along
//!   with an adapted problem and initial parameters.
//! - [`configure_lbfgs`] is the shared wiring function that applies
//!   tolerances; it is generic over the line-search type and can be
//!   reused by future L-BFGS variants if needed.
//!
//! Testing notes
//! -------------
//! - Unit tests for this module verify:
//!   - Correct propagation of `lbfgs_mem` and `DEFAULT_LBFGS_MEM` into
//!     the solver configuration.
//! - Integration tests in the optimizer layer exercise these builders
//!   indirectly by running full L-BFGS solves with different line-search
//!   and tolerance configurations.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::{MLEOptions, SimplexOptions},
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Simplex, Theta,
        },
    },
};

/// Step used for a starting coordinate that is exactly zero.
pub const ZERO_COORDINATE_STEP: f64 = 0.00025;

/// build_optimizer_hager_zhang — construct L-BFGS with Hager–Zhang line search.
///
/// Purpose
/// -------
/// Build an [`LbfgsHagerZhang`] solver configured with the crate’s
/// standard numeric types and optional tolerances from [`MLEOptions`],
/// leaving initial parameters and iteration limits to the caller.
///
/// Parameters
/// ----------
/// - `opts`: `&MLEOptions`  
///   Optimizer options. This builder consults:
///   - `opts.lbfgs_mem`: optional L-BFGS history size (`m`); when
///     `None`, [`DEFAULT_LBFGS_MEM`] is used.
///   - `opts.tols.tol_grad` and `opts.tols.tol_cost`: optional
///     gradient-norm and cost-change tolerances wired into the solver
///     via Argmin’s `with_tolerance_grad` / `with_tolerance_cost`.
///
/// Returns
/// -------
/// `OptResult<LbfgsHagerZhang>`  
///   - `Ok(solver)` containing an L-BFGS instance with Hager–Zhang line
///     search and any configured tolerances.
///   - `Err(e)` if Argmin rejects any of the tolerance settings.
///
/// Errors
/// ------
/// - `OptError` (via `From<argmin::core::Error>`)  
///   Returned when `with_tolerance_grad` or `with_tolerance_cost`
///   encounters an invalid tolerance (e.g., non-finite or non-positive
///   value) or other internal configuration error.
///
/// Panics
/// ------
/// - Never panics.
///
/// Safety
/// ------
/// - No `unsafe` code is used.
///
/// Notes
/// -----
/// - This function does not set `theta0` or `max_iters`; these must be
///   configured by the caller when running the solver.
/// - The underlying line-search object is `HagerZhangLS`, as defined in
///   [`loglik_optimizer::types`].
///
/// Examples
/// --------
/// ```ignore
/// let solver = build_optimizer_hager_zhang(&opts)?;
/// let outcome = run_lbfgs(theta0, &opts, problem, solver)?;
/// ```
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// build_optimizer_more_thuente — construct L-BFGS with More–Thuente line search.
///
/// Purpose
/// -------
/// Build an [`LbfgsMoreThuente`] solver configured with the crate’s
/// standard numeric types and optional tolerances from [`MLEOptions`],
/// using the More–Thuente line-search strategy.
///
/// Parameters
/// ----------
/// - `opts`: `&MLEOptions`  
///   Optimizer options. This builder consults:
///   - `opts.lbfgs_mem`: optional L-BFGS history size (`m`); when
///     `None`, [`DEFAULT_LBFGS_MEM`] is used.
///   - `opts.tols.tol_grad` and `opts.tols.tol_cost`: optional
///     gradient-norm and cost-change tolerances wired into the solver
///     via Argmin’s `with_tolerance_grad` / `with_tolerance_cost`.
///
/// Returns
/// -------
/// `OptResult<LbfgsMoreThuente>`  
///   - `Ok(solver)` containing an L-BFGS instance with More–Thuente line
///     search and any configured tolerances.
///   - `Err(e)` if Argmin rejects any of the tolerance settings.
///
/// Errors
/// ------
/// - `OptError` (via `From<argmin::core::Error>`)  
///   Returned when `with_tolerance_grad` or `with_tolerance_cost`
///   fails due to invalid or non-finite tolerances or other internal
///   configuration issues.
///
/// Panics
/// ------
/// - Never panics.
///
/// Safety
/// ------
/// - No `unsafe` code is used.
///
/// Notes
/// -----
/// - As with [`build_optimizer_hager_zhang`], this builder only configures
///   the solver; initial parameters and iteration limits are applied by
///   the runner.
/// - The underlying line-search object is [`MoreThuenteLS`].
///
/// Examples
/// --------
/// ```ignore
/// let solver = build_optimizer_more_thuente(&opts)?;
/// let outcome = run_lbfgs(theta0, &opts, problem, solver)?;
/// ```
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// configure_lbfgs — apply optional tolerances to an L-BFGS solver.
///
/// Purpose
/// -------
/// Generic helper that wires crate-level tolerance options from
/// [`MLEOptions`] into an existing L-BFGS solver, regardless of the
/// line-search type. This centralizes tolerance handling so builder
/// functions remain thin.
///
/// Parameters
/// ----------
/// - `solver`: `LBFGS<L, Theta, Grad, Cost>`  
///   Pre-constructed L-BFGS solver using some line-search type `L`.
///   Typically created via `LbfgsHagerZhang::new` or
///   `LbfgsMoreThuente::new`.
/// - `opts`: `&MLEOptions`  
///   Source of optional tolerances. This helper consults:
///   - `opts.tols.tol_grad`: optional gradient-norm tolerance.
///   - `opts.tols.tol_cost`: optional cost-change tolerance.
///
/// Returns
/// -------
/// `OptResult<LBFGS<L, Theta, Grad, Cost>>`  
///   - `Ok(solver)` with any present tolerances applied.
///   - `Err(e)` if any tolerance configuration fails inside Argmin.
///
/// Errors
/// ------
/// - `OptError` (via `From<argmin::core::Error>`)  
///   Returned when `with_tolerance_grad` or `with_tolerance_cost`
///   rejects a tolerance (e.g., non-finite or non-positive value) or
///   hits an internal configuration error.
///
/// Panics
/// ------
/// - Never panics.
///
/// Safety
/// ------
/// - No `unsafe` code is used.
///
/// Notes
/// -----
/// - When a tolerance is `None`, the corresponding `with_tolerance_*`
///   method is not called; Argmin’s defaults remain in effect.
/// - This helper does not touch the solver’s initial parameter vector,
///   maximum iteration count, or line-search settings; it only applies
///   tolerances.
/// - The generics are kept minimal (`L` only) so new line-search types
///   can reuse this function without additional constraints.
///
/// Examples
/// --------
/// ```ignore
/// use argmin::solver::quasinewton::LBFGS;
/// use crate::optimization::loglik_optimizer::types::HagerZhangLS;
///
/// let raw = LBFGS::<HagerZhangLS, Theta, Grad, Cost>::new(
///     HagerZhangLS::new(),
///     DEFAULT_LBFGS_MEM,
/// );
/// let solver = configure_lbfgs(raw, &opts)?;
/// ```
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

/// initial_simplex — `n + 1` vertices around `theta0`.
///
/// Vertex 0 is `theta0`; vertex `k + 1` scales coordinate `k` by
/// `1 + relative_step`, or sets it to [`ZERO_COORDINATE_STEP`] when the
/// coordinate is zero.
pub fn initial_simplex(theta0: &Theta, relative_step: f64) -> Vec<Theta> {
    let mut vertices = Vec::with_capacity(theta0.len() + 1);
    vertices.push(theta0.clone());
    for k in 0..theta0.len() {
        let mut v = theta0.clone();
        v[k] = if v[k] != 0.0 { (1.0 + relative_step) * v[k] } else { ZERO_COORDINATE_STEP };
        vertices.push(v);
    }
    vertices
}

/// build_nelder_mead — Nelder–Mead over the initial simplex of `theta0`.
///
/// Errors
/// ------
/// - `OptError` (via `From<argmin::core::Error>`) if Argmin rejects the
///   standard-deviation tolerance.
///
/// Notes
/// -----
/// - The iteration budget is applied by the runner, as for L-BFGS.
pub fn build_nelder_mead(theta0: &Theta, opts: &SimplexOptions) -> OptResult<Simplex> {
    let simplex = Simplex::new(initial_simplex(theta0, opts.relative_step));
    Ok(simplex.with_sd_tolerance(opts.sd_tolerance)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::traits::{LineSearcher, MLEOptions, Tolerances};
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction of the Hager–Zhang L-BFGS solver with default memory.
    // - Vertex layout of `initial_simplex` and Nelder–Mead construction.
    //
    // They intentionally DO NOT cover:
    // - Line-search selection, memory and tolerance handling, which run
    //   end to end through `maximize` in the api tests.
    // - Any specific `LogLikelihood` implementation or real data models.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure that `build_optimizer_hager_zhang` succeeds and uses the
    // crate default L-BFGS memory when `opts.lbfgs_mem` is `None`.
    //
    // Given
    // -----
    // - Valid `Tolerances`.
    // - `MLEOptions` with `line_searcher = HagerZhang` and `lbfgs_mem = None`.
    //
    // Expect
    // ------
    // - `build_optimizer_hager_zhang` returns `Ok(_)` and does not panic.
    fn build_optimizer_hager_zhang_uses_default_memory_when_none() {
        // Arrange
        let tols =
            Tolerances::new(Some(1e-6), Some(1e-8), Some(50)).expect("Tolerances should be valid");
        let opts = MLEOptions::new(tols, LineSearcher::HagerZhang, false, None)
            .expect("MLEOptions should be valid");

        // Act
        let solver = build_optimizer_hager_zhang(&opts);

        // Assert
        assert!(
            solver.is_ok(),
            "Builder should succeed when lbfgs_mem is None and tolerances are valid"
        );
    }

    #[test]
    // Purpose
    // -------
    // The initial simplex perturbs one coordinate per vertex, with the
    // fixed step for zero coordinates.
    //
    // Given
    // -----
    // - `theta0 = [1.0, 0.2, 0.0]` and `relative_step = 0.05`.
    //
    // Expect
    // ------
    // - Four vertices: theta0, then [1.05, 0.2, 0], [1, 0.21, 0],
    //   [1, 0.2, 0.00025].
    fn initial_simplex_perturbs_each_coordinate() {
        // Arrange
        let theta0 = array![1.0, 0.2, 0.0];

        // Act
        let vertices = initial_simplex(&theta0, 0.05);

        // Assert
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[0], theta0);
        assert!((vertices[1][0] - 1.05).abs() < 1e-12);
        assert!((vertices[2][1] - 0.21).abs() < 1e-12);
        assert_eq!(vertices[3][2], ZERO_COORDINATE_STEP);
        assert_eq!(vertices[3][0], 1.0);
    }

    #[test]
    // Purpose
    // -------
    // `build_nelder_mead` accepts the default simplex options.
    fn build_nelder_mead_accepts_defaults() {
        let solver = build_nelder_mead(&array![1.0, 0.2, 0.0], &SimplexOptions::default());
        assert!(solver.is_ok());
    }
}
