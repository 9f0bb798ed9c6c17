//! Python-boundary helpers: array extraction and option assembly.
//!
//! Everything here is compiled only with the `python-bindings` feature and
//! is called from the `#[pyfunction]`s in the crate root.
#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    optimization::loglik_optimizer::traits::{LineSearcher, MLEOptions, SimplexOptions, Tolerances},
    search::joint::JointSolver,
    waveform::data::Observations,
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy an array-like of floats into an owned `Array1`.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vec<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Array1<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!("{name} must be a 1-D contiguous float64 array or sequence"))
    })?;
    Ok(Array1::from(slice.to_vec()))
}

/// Extract bits from a numpy `uint8`/`bool` array or any sequence of
/// integers or booleans. Values other than 0 and 1 are rejected.
#[cfg(feature = "python-bindings")]
pub fn extract_bits(raw_bits: &Bound<'_, PyAny>) -> PyResult<Array1<u8>> {
    if let Ok(arr) = raw_bits.extract::<PyReadonlyArray1<u8>>() {
        return Ok(arr.as_array().to_owned());
    }
    if let Ok(arr) = raw_bits.extract::<PyReadonlyArray1<bool>>() {
        return Ok(arr.as_array().mapv(u8::from));
    }
    let values: Vec<i64> = raw_bits.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "bits must be a 1-D numpy array or sequence of 0/1 integers or booleans",
        )
    })?;
    values
        .iter()
        .enumerate()
        .map(|(index, &bit)| match bit {
            0 | 1 => Ok(bit as u8),
            other => Err(PyValueError::new_err(format!(
                "bit at index {index} must be 0 or 1; got: {other}"
            ))),
        })
        .collect()
}

/// Build validated [`Observations`] from Python times and bits.
#[cfg(feature = "python-bindings")]
pub fn extract_observations<'py>(
    py: Python<'py>, times: &Bound<'py, PyAny>, bits: &Bound<'py, PyAny>,
) -> PyResult<Observations> {
    let times = extract_f64_vec(py, times, "times")?;
    let bits = extract_bits(bits)?;
    Ok(Observations::new(times, bits)?)
}

/// Map the Python `method` keyword and its options to a [`JointSolver`].
///
/// `"nelder-mead"` (default) reads `max_iter` and `sd_tolerance`;
/// `"lbfgs"` reads the gradient-based tolerances.
#[cfg(feature = "python-bindings")]
pub fn extract_joint_solver(
    method: Option<&str>, max_iter: Option<usize>, sd_tolerance: Option<f64>,
    tol_grad: Option<f64>, tol_cost: Option<f64>, line_searcher: Option<&str>,
    lbfgs_mem: Option<usize>,
) -> PyResult<JointSolver> {
    let method = method.unwrap_or("nelder-mead").to_lowercase();
    match method.as_str() {
        "nelder-mead" | "neldermead" | "simplex" => {
            let defaults = SimplexOptions::default();
            let opts = SimplexOptions::new(
                max_iter.unwrap_or(defaults.max_iter),
                sd_tolerance.unwrap_or(defaults.sd_tolerance),
                defaults.relative_step,
                false,
            )?;
            Ok(JointSolver::NelderMead(opts))
        }
        "lbfgs" | "l-bfgs" => {
            Ok(JointSolver::Lbfgs(extract_mle_opts(tol_grad, tol_cost, max_iter, line_searcher, lbfgs_mem)?))
        }
        other => Err(PyValueError::new_err(format!(
            "invalid method {other:?} (expected 'nelder-mead' or 'lbfgs')"
        ))),
    }
}

#[cfg(feature = "python-bindings")]
fn extract_mle_opts(
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
) -> PyResult<MLEOptions> {
    use std::str::FromStr;

    let defaults = MLEOptions::default();
    let tols = if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
        defaults.tols
    } else {
        Tolerances::new(tol_grad, tol_cost, max_iter)?
    };

    let ls = match line_searcher {
        Some(name) => LineSearcher::from_str(name)?,
        None => defaults.line_searcher,
    };

    Ok(MLEOptions::new(tols, ls, false, lbfgs_mem)?)
}
