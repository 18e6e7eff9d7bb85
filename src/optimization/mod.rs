//! optimization — Dirichlet hyperparameter re-estimation, numerical helpers,
//! and unified error surface.
//!
//! Purpose
//! -------
//! Provide the numerical layer beneath the topic model: a fixed-point
//! estimator for Dirichlet parameters from grouped counts, a small set of
//! guarded scalar helpers, and a single error/result surface. Model code
//! extracts count statistics, chooses options, and receives updated
//! parameters plus diagnostics without touching digamma arithmetic.
//!
//! Key behaviors
//! -------------
//! - Expose Minka's fixed-point update for asymmetric and symmetric
//!   Dirichlet parameters (`hyper_optimizer`), with bounded iterations and
//!   clamping of degenerate components.
//! - Supply shared numerical primitives (`numerical_stability`): floors,
//!   accurate digamma increments, and relative-change measures.
//! - Normalize configuration issues and degenerate inputs into
//!   `errors::OptError` with the alias `OptResult<T>`.
//!
//! Conventions
//! -----------
//! - Parameters are `ndarray::Array1<f64>` (asymmetric) or a plain `f64`
//!   (symmetric); counts are `usize`.
//! - This module and its submodules avoid I/O and logging; the model layer
//!   reports progress and clamp events.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule: fixed-point stationarity,
//!   clamping, validation branches, and agreement of digamma increments
//!   with `statrs`.

pub mod errors;
pub mod hyper_optimizer;
pub mod numerical_stability;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::hyper_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
