//! search — estimators built on the waveform loss.
//!
//! Purpose
//! -------
//! Turn the loss of [`crate::likelihood`] into parameter estimates by
//! exhaustive or numerical search.
//!
//! Key behaviors
//! -------------
//! - [`line`]: one coordinate over a candidate list ([`scan_parameter`]).
//! - [`grid`]: dense 2-D / 3-D surfaces evaluated in parallel
//!   ([`grid_search_2d`], [`grid_search_3d`]).
//! - [`coordinate`]: greedy frequency → amplitude → phase (→ pulse width)
//!   descent ([`coordinate_mle`]).
//! - [`joint`]: Nelder–Mead or L-BFGS over the full vector ([`joint_mle`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Line and grid selectors drop NaN / `+∞` losses and break ties by the
//!   first index in row-major order.
//! - A search either returns a finite estimate or an explicit error.
//!
//! Conventions
//! -----------
//! - Exhaustive searches report [`SearchError`]; the joint optimizer reports
//!   [`OptError`](crate::optimization::errors::OptError).

pub mod coordinate;
pub mod errors;
pub mod grid;
pub mod joint;
pub mod line;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::coordinate::{coordinate_mle, CoordinateOptions, CoordinateRanges, FixedParams, MleFit};
pub use self::errors::{SearchError, SearchResult};
pub use self::grid::{first_minimum, grid_search_2d, grid_search_3d, GridOutcome};
pub use self::joint::{joint_mle, JointFit, JointSolver};
pub use self::line::{scan_parameter, LineScan};

pub mod prelude {
    pub use super::coordinate::{
        coordinate_mle, CoordinateOptions, CoordinateRanges, FixedParams, MleFit,
    };
    pub use super::errors::{SearchError, SearchResult};
    pub use super::grid::{grid_search_2d, grid_search_3d, GridOutcome};
    pub use super::joint::{joint_mle, JointFit, JointSolver};
    pub use super::line::{scan_parameter, LineScan};
}
