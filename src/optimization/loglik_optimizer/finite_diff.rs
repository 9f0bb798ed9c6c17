//! loglik_optimizer::finite_diff — finite-difference gradients with error capture.
//!
//! Purpose
//! -------
//! Approximate the cost gradient when a [`LogLikelihood`] has no closed
//! form (rectangular and sawtooth waveforms), without exposing the
//! `finitediff` API to the rest of the optimizer.
//!
//! Key behaviors
//! -------------
//! - [`fd_gradient`] tries a central difference first and falls back to a
//!   forward difference when the central pass captured an error or produced
//!   a non-finite entry.
//! - [`run_fd_diff`] is the forward-difference pass on its own.
//!
//! Invariants & assumptions
//! ------------------------
//! - The objective closure cannot return `Result`; it writes the first
//!   evaluation error into a shared `RefCell<Option<Error>>` and returns
//!   `NaN`. These helpers turn a captured error back into an `OptError`.
//! - Every gradient returned here has passed [`validate_grad`].
//!
//! Downstream usage
//! ----------------
//! - [`ArgMinAdapter`](super::adapter::ArgMinAdapter) calls
//!   [`fd_gradient`] whenever `LogLikelihood::grad` returns
//!   `OptError::GradientNotImplemented`.
//!
//! [`LogLikelihood`]: super::traits::LogLikelihood
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{Grad, Theta, validation::validate_grad},
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// fd_gradient — central difference with a forward-difference fallback.
///
/// Parameters
/// ----------
/// - `theta`: point at which the gradient is approximated.
/// - `func`: scalar objective routing its errors into `closure_err`.
/// - `closure_err`: error slot shared with `func`; cleared on entry.
///
/// Errors
/// ------
/// - Any error captured during the forward pass (mapped via
///   `From<Error> for OptError`).
/// - `OptError::InvalidGradient` / `GradientDimMismatch` if the forward
///   gradient fails validation.
///
/// Notes
/// -----
/// - Errors from the central pass are discarded; only the fallback result
///   is reported.
pub fn fd_gradient<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let central = theta.central_diff(func);
    if closure_err.borrow().is_none() && validate_grad(&central, theta.len()).is_ok() {
        return Ok(central);
    }
    run_fd_diff(theta, func, closure_err)
}

/// run_fd_diff — forward-difference gradient with error capture and validation.
///
/// Clears `closure_err`, runs `forward_diff`, returns a captured error if
/// there is one, and otherwise validates the gradient.
///
/// Examples
/// --------
/// ```rust
/// # use std::cell::RefCell;
/// # use argmin::core::Error;
/// # use ndarray::Array1;
/// # use bitwave_mle::optimization::loglik_optimizer::Theta;
/// # use bitwave_mle::optimization::loglik_optimizer::finite_diff::run_fd_diff;
/// let theta: Theta = Array1::from(vec![0.0_f64, 1.0]);
/// let closure_err: RefCell<Option<Error>> = RefCell::new(None);
/// let f = |x: &Theta| x.dot(x);
///
/// let grad = run_fd_diff(&theta, &f, &closure_err).unwrap();
/// assert_eq!(grad.len(), theta.len());
/// ```
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    let dim = theta.len();
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, dim)?;
    Ok(fd_grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use argmin::core::ArgminError;
    use ndarray::Array1;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Forward-difference gradient computation with and without closure errors.
    // - Validation failures for non-finite gradients.
    // - The central → forward fallback of `fd_gradient`.
    //
    // They intentionally DO NOT cover:
    // - End-to-end optimizer behavior (handled in higher-level integration tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `run_fd_diff` returns a valid gradient for a simple quadratic
    // objective with no internal error path.
    //
    // Given
    // -----
    // - A parameter vector `theta` in ℝ².
    // - An objective `f(theta) = thetaᵀ theta`.
    //
    // Expect
    // ------
    // - `Ok(grad)` with `grad.len() == theta.len()` and finite entries.
    fn run_fd_diff_quadratic_returns_valid_gradient() {
        // Arrange
        let theta: Theta = Array1::from(vec![0.0_f64, 1.0]);
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |x: &Theta| x.dot(x);

        // Act
        let result = run_fd_diff(&theta, &f, &closure_err);

        // Assert
        let grad = result.expect("Gradient for quadratic should be computed successfully");
        assert_eq!(grad.len(), theta.len());
        assert!(grad.iter().all(|v| v.is_finite()));
    }

    #[test]
    // Purpose
    // -------
    // An error captured in `closure_err` is surfaced as the matching
    // `OptError` variant.
    //
    // Given
    // -----
    // - An objective that stores `ArgminError::NotImplemented` and returns NaN.
    //
    // Expect
    // ------
    // - `Err(OptError::NotImplemented { .. })`.
    fn run_fd_diff_closure_error_is_propagated() {
        // Arrange
        let theta: Theta = Array1::from(vec![1.0_f64]);
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_: &Theta| {
            let argmin_err = ArgminError::NotImplemented { text: "fd test".to_string() };
            closure_err.replace(Some(argmin_err.into()));
            f64::NAN
        };

        // Act
        let result = run_fd_diff(&theta, &f, &closure_err);

        // Assert
        match result {
            Err(OptError::NotImplemented { .. }) => {}
            other => panic!("Expected NotImplemented, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // A gradient full of NaN fails validation.
    fn run_fd_diff_non_finite_gradient_yields_invalidgradient_error() {
        let theta: Theta = Array1::from(vec![0.0_f64, 1.0]);
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_x: &Theta| f64::NAN;

        match run_fd_diff(&theta, &f, &closure_err) {
            Err(OptError::InvalidGradient { .. }) => {}
            other => panic!("Expected InvalidGradient, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // `fd_gradient` falls back to a forward difference when the central pass
    // steps into a region where the objective fails.
    //
    // Given
    // -----
    // - f(x) = x² defined only for x <= 1, evaluated at x = 1.
    //
    // Expect
    // ------
    // - The central pass (x + h) captures an error; the forward pass also
    //   steps to x + h, so the call fails with the captured error.
    // - At x = 0.5 both passes are valid and the central result ≈ 1.0.
    fn fd_gradient_uses_central_when_valid_and_reports_captured_errors() {
        // Arrange
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |x: &Theta| {
            if x[0] > 1.0 {
                closure_err.replace(Some(OptError::NonFiniteCost { value: f64::NAN }.into()));
                return f64::NAN;
            }
            x[0] * x[0]
        };

        // Act
        let inside = fd_gradient(&Array1::from(vec![0.5]), &f, &closure_err);
        let edge = fd_gradient(&Array1::from(vec![1.0]), &f, &closure_err);

        // Assert
        let g = inside.expect("interior point is differentiable");
        assert!((g[0] - 1.0).abs() < 1e-5);
        assert!(matches!(edge, Err(OptError::NonFiniteCost { .. })));
    }
}
