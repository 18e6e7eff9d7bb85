//! optimization::errors — unified error surface for the Dirichlet fixed-point layer.
//!
//! Purpose
//! -------
//! Normalize configuration mistakes and degenerate inputs of the
//! hyperparameter optimizer into a single enum, [`OptError`], with the
//! common alias [`OptResult`]. Model layers convert these into their own
//! error types (see `lda::errors::LDAError::Optimization`).
//!
//! Conventions
//! -----------
//! - Parameter *outputs* outside `[floor, ceiling]` are never errors here:
//!   they are clamped and reported as `ClampEvent`s by the fixed-point run.
//! - Only inputs that make the update undefined (no observations, mismatched
//!   dimensions, invalid tolerances) are reported as errors.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

/// OptError — failures of the Dirichlet fixed-point optimizer.
///
/// Variants
/// --------
/// - `InvalidTolerance { tol, reason }`
///   Relative-change tolerance is not finite and strictly positive.
/// - `InvalidMaxIter { max_iter, reason }`
///   Iteration cap is zero.
/// - `InvalidFloor { floor, reason }`
///   Clamp floor is not finite and strictly positive.
/// - `InvalidCeiling { ceiling, floor, reason }`
///   Clamp ceiling is not finite or does not exceed the floor.
/// - `InvalidHyperprior { shape, rate, reason }`
///   Gamma hyperprior has `shape < 1`, `rate < 0`, or a non-finite value.
/// - `EmptyStatistics`
///   No group contributed any observation, so the update ratio has a zero
///   denominator.
/// - `DimMismatch { expected, found }`
///   Parameter vector and sufficient statistics disagree on the number of
///   components.
/// - `InvalidParameter { index, value }`
///   A starting parameter is non-finite or non-positive.
#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- FixedPointOptions ----
    InvalidTolerance { tol: f64, reason: &'static str },
    InvalidMaxIter { max_iter: usize, reason: &'static str },
    InvalidFloor { floor: f64, reason: &'static str },
    InvalidCeiling { ceiling: f64, floor: f64, reason: &'static str },
    InvalidHyperprior { shape: f64, rate: f64, reason: &'static str },

    // ---- Inputs ----
    EmptyStatistics,
    DimMismatch { expected: usize, found: usize },
    InvalidParameter { index: usize, value: f64 },
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptError::InvalidTolerance { tol, reason } => {
                write!(f, "Invalid fixed-point tolerance: {tol}. {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid fixed-point iteration cap: {max_iter}. {reason}")
            }
            OptError::InvalidFloor { floor, reason } => {
                write!(f, "Invalid parameter floor: {floor}. {reason}")
            }
            OptError::InvalidCeiling { ceiling, floor, reason } => {
                write!(f, "Invalid parameter ceiling: {ceiling} (floor {floor}). {reason}")
            }
            OptError::InvalidHyperprior { shape, rate, reason } => {
                write!(f, "Invalid gamma hyperprior: shape {shape}, rate {rate}. {reason}")
            }
            OptError::EmptyStatistics => {
                write!(f, "Sufficient statistics contain no observations; cannot re-estimate.")
            }
            OptError::DimMismatch { expected, found } => {
                write!(
                    f,
                    "Parameter dimension mismatch: expected {expected} components, found {found}."
                )
            }
            OptError::InvalidParameter { index, value } => {
                write!(
                    f,
                    "Starting parameter at index {index} must be finite and > 0; got {value}."
                )
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<OptError> for PyErr {
    fn from(err: OptError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
