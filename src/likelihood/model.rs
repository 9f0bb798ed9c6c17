//! `LogLikelihood` implementation for waveform families.
//!
//! Purpose
//! -------
//! Expose the binary-observation likelihood to the generic optimizer. The
//! optimizer vector is `θ = [f, a, p]`, extended to `[f, a, p, tpp]` for a
//! rectangular fit with a free pulse width.
//!
//! Key behaviors
//! -------------
//! - `value` returns `ℓ(θ) = -L(θ)`; degenerate probabilities come back as
//!   NaN/−∞ and are handled by the adapters (error for L-BFGS, `+∞` cost for
//!   Nelder–Mead).
//! - `grad` is closed-form for the sinusoid and `GradientNotImplemented`
//!   otherwise, which switches the adapter to finite differences.
//! - `check` rejects starting points that are ill-posed before any solver
//!   runs.
use crate::likelihood::{gradient::loss_gradient, loss::loss_with_model};
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Cost, Grad, LogLikelihood, Theta},
};
use crate::waveform::{data::Observations, family::WaveformFamily, params::WaveParams};

/// Waveform log-likelihood over `[f, a, p]` or `[f, a, p, tpp]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveLogLik {
    pub family: WaveformFamily,
}

impl WaveLogLik {
    pub fn new(family: WaveformFamily) -> Self {
        WaveLogLik { family }
    }

    /// Interpret an optimizer vector as waveform parameters; a fourth entry
    /// is read as the pulse width.
    ///
    /// Errors
    /// ------
    /// - `ThetaLengthMismatch` unless `θ` has 3 or 4 entries.
    pub fn params(theta: &Theta) -> OptResult<WaveParams> {
        WaveParams::from_theta(theta.view())
            .ok_or(OptError::ThetaLengthMismatch { expected: 3, actual: theta.len() })
    }

    fn admissible_lengths(&self) -> &'static [usize] {
        if self.family.has_pulse_width() { &[3, 4] } else { &[3] }
    }
}

impl LogLikelihood for WaveLogLik {
    type Data = Observations;

    fn value(&self, theta: &Theta, data: &Observations) -> OptResult<Cost> {
        let params = Self::params(theta)?;
        Ok(-loss_with_model(data, &params, self.family.model()))
    }

    /// Errors
    /// ------
    /// - `ThetaLengthMismatch` unless `θ` has 3 entries (4 allowed for the
    ///   rectangular family).
    /// - `IllPosedParameter` for a non-finite entry, `f <= 0`, `|a| > 0.5`,
    ///   or a pulse width outside `[0, 1/f]`.
    fn check(&self, theta: &Theta, _data: &Observations) -> OptResult<()> {
        if !self.admissible_lengths().contains(&theta.len()) {
            return Err(OptError::ThetaLengthMismatch { expected: 3, actual: theta.len() });
        }
        const NAMES: [&str; 4] = ["frequency", "amplitude", "phase", "tpp"];
        for (name, &value) in NAMES.into_iter().zip(theta.iter()) {
            if !value.is_finite() {
                return Err(OptError::IllPosedParameter { name, value, reason: "must be finite" });
            }
        }
        let params = Self::params(theta)?;
        if params.frequency <= 0.0 {
            return Err(OptError::IllPosedParameter {
                name: "frequency",
                value: params.frequency,
                reason: "must be strictly positive",
            });
        }
        if params.amplitude.abs() > 0.5 {
            return Err(OptError::IllPosedParameter {
                name: "amplitude",
                value: params.amplitude,
                reason: "must satisfy |a| <= 0.5 for a valid probability",
            });
        }
        if let Some(tpp) = params.pulse_width {
            let duty = tpp * params.frequency;
            if !(0.0..=1.0).contains(&duty) {
                return Err(OptError::IllPosedParameter {
                    name: "tpp",
                    value: tpp,
                    reason: "must lie in [0, 1/f]",
                });
            }
        }
        Ok(())
    }

    fn grad(&self, theta: &Theta, data: &Observations) -> OptResult<Grad> {
        if !self.family.has_analytic_gradient() {
            return Err(OptError::GradientNotImplemented);
        }
        Ok(-loss_gradient(data, &Self::params(theta)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::likelihood::loss::negative_log_likelihood;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Sign convention `value = -loss`.
    // - Starting-point checks in `check`.
    // - Analytic gradient availability per family.
    // -------------------------------------------------------------------------

    fn obs() -> Observations {
        Observations::new(array![0.0, 0.2, 0.4, 0.6, 0.8], array![1_u8, 1, 0, 0, 1]).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // `value` is the negated loss at the same parameters.
    fn value_is_negated_loss() {
        let model = WaveLogLik::new(WaveformFamily::Sawtooth);
        let theta = array![1.0, 0.2, 0.3];
        let loss = negative_log_likelihood(&obs(), &WaveLogLik::params(&theta).unwrap(), WaveformFamily::Sawtooth);
        assert_eq!(model.value(&theta, &obs()).unwrap(), -loss);
    }

    #[test]
    // Purpose
    // -------
    // Ill-posed starting points are rejected with named errors.
    //
    // Given
    // -----
    // - Wrong length, f = 0, a = 0.6, NaN phase, and tpp beyond one period.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch` and `IllPosedParameter` naming the parameter.
    fn check_rejects_ill_posed_guesses() {
        let data = obs();
        let sine = WaveLogLik::new(WaveformFamily::Sinusoid);
        let square = WaveLogLik::new(WaveformFamily::Rectangular);

        assert!(matches!(
            sine.check(&array![1.0, 0.2, 0.0, 0.1], &data),
            Err(OptError::ThetaLengthMismatch { actual: 4, .. })
        ));
        assert!(matches!(
            sine.check(&array![0.0, 0.2, 0.0], &data),
            Err(OptError::IllPosedParameter { name: "frequency", .. })
        ));
        assert!(matches!(
            sine.check(&array![1.0, 0.6, 0.0], &data),
            Err(OptError::IllPosedParameter { name: "amplitude", .. })
        ));
        assert!(matches!(
            sine.check(&array![1.0, 0.2, f64::NAN], &data),
            Err(OptError::IllPosedParameter { name: "phase", .. })
        ));
        assert!(matches!(
            square.check(&array![2.0, 0.2, 0.0, 0.6], &data),
            Err(OptError::IllPosedParameter { name: "tpp", .. })
        ));
        assert!(square.check(&array![2.0, 0.2, 0.0, 0.25], &data).is_ok());
        assert!(sine.check(&array![1.0, 0.2, 0.0], &data).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Only the sinusoid has a closed-form gradient, returned as ∇ℓ = -∇L.
    fn gradient_availability() {
        let data = obs();
        let theta = array![1.0, 0.2, 0.3];
        let g = WaveLogLik::new(WaveformFamily::Sinusoid).grad(&theta, &data).unwrap();
        let expected = -loss_gradient(&data, &WaveLogLik::params(&theta).unwrap());
        assert_eq!(g, expected);
        assert_eq!(
            WaveLogLik::new(WaveformFamily::Rectangular).grad(&theta, &data),
            Err(OptError::GradientNotImplemented)
        );
    }

    #[test]
    // Purpose
    // -------
    // `params` unpacks 3- and 4-entry vectors and names any other length.
    fn params_unpacks_theta_or_reports_length() {
        let triple = WaveLogLik::params(&array![1.5, 0.2, 0.3]).unwrap();
        assert_eq!((triple.frequency, triple.amplitude, triple.phase), (1.5, 0.2, 0.3));
        assert_eq!(triple.pulse_width, None);

        let quad = WaveLogLik::params(&array![1.5, 0.2, 0.3, 0.1]).unwrap();
        assert_eq!(quad.pulse_width, Some(0.1));

        assert_eq!(
            WaveLogLik::params(&array![1.5, 0.2]),
            Err(OptError::ThetaLengthMismatch { expected: 3, actual: 2 })
        );
    }
}
