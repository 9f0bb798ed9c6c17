//! Errors for line, grid, and coordinate-descent searches.
//!
//! Degenerate (non-finite) losses are never errors on their own: selectors
//! drop them. A search fails only when nothing admissible is left, when a
//! grid cannot be assembled, or when its configuration or input data is
//! invalid.
use crate::waveform::errors::WaveError;
use ndarray::ShapeError;
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};

/// Result alias for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    // ---- Selection ----
    /// Every candidate was degenerate, or there were no candidates.
    EmptySearchSpace { parameter: String, candidates: usize },

    // ---- Grid ----
    /// Loss values could not be arranged into the grid shape.
    GridShape { text: String },

    // ---- Options ----
    /// Pulse-width scan needs at least one point.
    InvalidResolution { points: usize },

    // ---- Data ----
    /// Observation or simulation error.
    Wave(WaveError),
}

impl std::error::Error for SearchError {}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::EmptySearchSpace { parameter, candidates } => {
                write!(
                    f,
                    "No admissible candidate for {parameter}: all {candidates} candidates produced a degenerate loss"
                )
            }
            SearchError::GridShape { text } => write!(f, "Grid shape error: {text}"),
            SearchError::InvalidResolution { points } => {
                write!(f, "Pulse-width scan resolution must be greater than zero; got: {points}")
            }
            SearchError::Wave(err) => write!(f, "{err}"),
        }
    }
}

impl From<WaveError> for SearchError {
    fn from(err: WaveError) -> Self {
        SearchError::Wave(err)
    }
}

impl From<ShapeError> for SearchError {
    fn from(err: ShapeError) -> Self {
        SearchError::GridShape { text: err.to_string() }
    }
}

/// Convert a [`SearchError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<SearchError> for PyErr {
    fn from(err: SearchError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
