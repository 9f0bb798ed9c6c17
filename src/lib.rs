//! bitwave_mle — maximum-likelihood recovery of periodic waveforms from
//! binary observations, with optional Python bindings.
//!
//! Purpose
//! -------
//! Estimate the frequency, amplitude and phase (and, for rectangular
//! pulses, the pulse width) of a waveform that modulates the probability of
//! observing a `1`, given time-stamped bits. The crate root also hosts the
//! PyO3 bridge exposing the estimators as the `_bitwave_mle` extension
//! module.
//!
//! Key behaviors
//! -------------
//! - [`waveform`]: families, parameters, validated observations, bit-flip
//!   noise, and synthetic data.
//! - [`likelihood`]: negative log-likelihood, closed-form sinusoid
//!   derivatives, and the optimizer-facing model.
//! - [`search`]: line, grid, coordinate-descent and joint estimators.
//! - [`optimization`]: the generic argmin-backed log-likelihood maximizer.
//! - With `python-bindings`, `#[pyfunction]` wrappers and the
//!   `#[pymodule]` initializer for `_bitwave_mle`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; the PyO3 items perform
//!   only conversion, validation and error mapping.
//! - Errors from the core travel as typed enums and become `ValueError`s at
//!   the Python boundary.
//!
//! Downstream usage
//! ----------------
//! - Rust callers use the inner modules or [`prelude`] and can ignore the
//!   items behind `python-bindings`.
//! - The library installs no logger; diagnostics go through the `log`
//!   facade.
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules and by
//!   the end-to-end pipelines under `tests/`.

pub mod likelihood;
pub mod optimization;
pub mod search;
pub mod utils;
pub mod waveform;

pub mod prelude {
    pub use crate::likelihood::{negative_log_likelihood, reconstruct, WaveLogLik};
    pub use crate::optimization::loglik_optimizer::{MLEOptions, OptimOutcome, SimplexOptions};
    pub use crate::search::prelude::*;
    pub use crate::waveform::prelude::*;
}

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray3};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use rand::{rngs::StdRng, SeedableRng};

#[cfg(feature = "python-bindings")]
use crate::{
    likelihood::loss::negative_log_likelihood,
    search::{
        coordinate::{coordinate_mle, CoordinateOptions, CoordinateRanges, FixedParams},
        grid::grid_search_3d,
        joint::joint_mle,
    },
    utils::{extract_bits, extract_f64_vec, extract_joint_solver, extract_observations},
    waveform::{family::WaveformFamily, noise::BitFlipChannel, params::WaveParams},
};

/// WaveFit — Python-facing estimate returned by every estimator.
///
/// Fields
/// ------
/// - `frequency`, `amplitude`, `phase`: estimated parameters.
/// - `tpp`: pulse width, `None` unless set or estimated.
/// - `loss`: negative log-likelihood at the estimate.
/// - `reconstruction`: `p1` at each observation time.
/// - `iterations`: optimizer iterations, `None` for exhaustive searches.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "bitwave_mle")]
pub struct WaveFit {
    params: WaveParams,
    loss: f64,
    reconstruction: Vec<f64>,
    iterations: Option<usize>,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl WaveFit {
    #[getter]
    pub fn frequency(&self) -> f64 {
        self.params.frequency
    }

    #[getter]
    pub fn amplitude(&self) -> f64 {
        self.params.amplitude
    }

    #[getter]
    pub fn phase(&self) -> f64 {
        self.params.phase
    }

    #[getter]
    pub fn tpp(&self) -> Option<f64> {
        self.params.pulse_width
    }

    #[getter]
    pub fn loss(&self) -> f64 {
        self.loss
    }

    #[getter]
    pub fn reconstruction(&self) -> Vec<f64> {
        self.reconstruction.clone()
    }

    #[getter]
    pub fn iterations(&self) -> Option<usize> {
        self.iterations
    }

    fn __repr__(&self) -> String {
        format!(
            "WaveFit(frequency={}, amplitude={}, phase={}, tpp={:?}, loss={})",
            self.params.frequency, self.params.amplitude, self.params.phase, self.params.pulse_width, self.loss
        )
    }
}

#[cfg(feature = "python-bindings")]
fn parse_family(family: Option<&str>) -> PyResult<WaveformFamily> {
    Ok(family.map(str::parse::<WaveformFamily>).transpose()?.unwrap_or_default())
}

#[cfg(feature = "python-bindings")]
fn with_tpp(params: WaveParams, tpp: Option<f64>) -> WaveParams {
    WaveParams { pulse_width: tpp, ..params }
}

/// Negative log-likelihood of `bits` observed at `times`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "loss",
    signature = (times, bits, frequency, amplitude, phase, family = None, tpp = None)
)]
#[allow(clippy::too_many_arguments)]
fn py_loss<'py>(
    py: Python<'py>, times: &Bound<'py, PyAny>, bits: &Bound<'py, PyAny>, frequency: f64,
    amplitude: f64, phase: f64, family: Option<&str>, tpp: Option<f64>,
) -> PyResult<f64> {
    let obs = extract_observations(py, times, bits)?;
    let params = with_tpp(WaveParams::new(frequency, amplitude, phase), tpp);
    Ok(negative_log_likelihood(&obs, &params, parse_family(family)?))
}

/// Coordinate-descent estimate over the given candidate ranges.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "coordinate_mle",
    signature = (
        times, bits, nominal, frequencies, amplitudes, phases, family = None,
        fixed_frequency = None, fixed_amplitude = None, fixed_phase = None, fixed_tpp = None,
        pulse_width_points = 50
    )
)]
#[allow(clippy::too_many_arguments)]
fn py_coordinate_mle<'py>(
    py: Python<'py>, times: &Bound<'py, PyAny>, bits: &Bound<'py, PyAny>, nominal: (f64, f64, f64),
    frequencies: &Bound<'py, PyAny>, amplitudes: &Bound<'py, PyAny>, phases: &Bound<'py, PyAny>,
    family: Option<&str>, fixed_frequency: Option<f64>, fixed_amplitude: Option<f64>,
    fixed_phase: Option<f64>, fixed_tpp: Option<f64>, pulse_width_points: usize,
) -> PyResult<WaveFit> {
    let obs = extract_observations(py, times, bits)?;
    let ranges = CoordinateRanges::new(
        extract_f64_vec(py, frequencies, "frequencies")?,
        extract_f64_vec(py, amplitudes, "amplitudes")?,
        extract_f64_vec(py, phases, "phases")?,
    );
    let fixed = FixedParams {
        frequency: fixed_frequency,
        amplitude: fixed_amplitude,
        phase: fixed_phase,
        pulse_width: fixed_tpp,
    };
    let opts = CoordinateOptions::new(pulse_width_points)?;
    let nominal = WaveParams::new(nominal.0, nominal.1, nominal.2);
    let fit = coordinate_mle(&obs, parse_family(family)?, &nominal, &ranges, &fixed, &opts)?;
    Ok(WaveFit { params: fit.params, loss: fit.loss, reconstruction: fit.reconstruction.to_vec(), iterations: None })
}

/// Dense 3-D grid search; returns the best fit and the full loss cube.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "grid_search_3d",
    signature = (times, bits, frequencies, amplitudes, phases, family = None, tpp = None)
)]
#[allow(clippy::too_many_arguments)]
fn py_grid_search_3d<'py>(
    py: Python<'py>, times: &Bound<'py, PyAny>, bits: &Bound<'py, PyAny>,
    frequencies: &Bound<'py, PyAny>, amplitudes: &Bound<'py, PyAny>, phases: &Bound<'py, PyAny>,
    family: Option<&str>, tpp: Option<f64>,
) -> PyResult<(WaveFit, Bound<'py, PyArray3<f64>>)> {
    let obs = extract_observations(py, times, bits)?;
    let frequencies = extract_f64_vec(py, frequencies, "frequencies")?;
    let amplitudes = extract_f64_vec(py, amplitudes, "amplitudes")?;
    let phases = extract_f64_vec(py, phases, "phases")?;
    let grid = grid_search_3d(
        &obs,
        parse_family(family)?,
        frequencies.view(),
        amplitudes.view(),
        phases.view(),
        tpp,
    )?;
    let fit = WaveFit {
        params: grid.params,
        loss: grid.loss,
        reconstruction: grid.reconstruction.to_vec(),
        iterations: None,
    };
    Ok((fit, grid.losses.into_pyarray(py)))
}

/// Joint Nelder–Mead (default) or L-BFGS estimate from a starting guess.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "joint_mle",
    signature = (
        times, bits, guess, family = None, tpp = None, method = None, max_iter = None,
        sd_tolerance = None, tol_grad = None, tol_cost = None, line_searcher = None,
        lbfgs_mem = None
    )
)]
#[allow(clippy::too_many_arguments)]
fn py_joint_mle<'py>(
    py: Python<'py>, times: &Bound<'py, PyAny>, bits: &Bound<'py, PyAny>, guess: (f64, f64, f64),
    family: Option<&str>, tpp: Option<f64>, method: Option<&str>, max_iter: Option<usize>,
    sd_tolerance: Option<f64>, tol_grad: Option<f64>, tol_cost: Option<f64>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
) -> PyResult<WaveFit> {
    let obs = extract_observations(py, times, bits)?;
    let solver =
        extract_joint_solver(method, max_iter, sd_tolerance, tol_grad, tol_cost, line_searcher, lbfgs_mem)?;
    let guess = with_tpp(WaveParams::new(guess.0, guess.1, guess.2), tpp);
    let fit = joint_mle(&obs, parse_family(family)?, &guess, &solver)?;
    Ok(WaveFit {
        params: fit.params,
        loss: -fit.outcome.value,
        reconstruction: fit.reconstruction.to_vec(),
        iterations: Some(fit.outcome.iterations),
    })
}

/// Flip each bit independently with probability `q`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "bit_flip", signature = (bits, q, seed = None))]
fn py_bit_flip(bits: &Bound<'_, PyAny>, q: f64, seed: Option<u64>) -> PyResult<Vec<u8>> {
    let channel = BitFlipChannel::new(q)?;
    let bits = extract_bits(bits)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(bits.iter().map(|&b| channel.transmit(b, &mut rng)).collect())
}

/// _bitwave_mle — PyO3 module initializer for the Python extension.
///
/// Registers the [`WaveFit`] class and the `loss`, `coordinate_mle`,
/// `grid_search_3d`, `joint_mle` and `bit_flip` functions. Invoked by
/// Python on import; never called directly.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _bitwave_mle<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<WaveFit>()?;
    m.add_function(wrap_pyfunction!(py_loss, m)?)?;
    m.add_function(wrap_pyfunction!(py_coordinate_mle, m)?)?;
    m.add_function(wrap_pyfunction!(py_grid_search_3d, m)?)?;
    m.add_function(wrap_pyfunction!(py_joint_mle, m)?)?;
    m.add_function(wrap_pyfunction!(py_bit_flip, m)?)?;
    Ok(())
}
