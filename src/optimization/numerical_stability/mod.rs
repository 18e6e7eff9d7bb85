//! numerical_stability — guarded scalar helpers shared by the sampler and
//! the hyperparameter optimizer.
//!
//! Purpose
//! -------
//! Centralize the small floors and the digamma/relative-change helpers used
//! when sampling categorical weights and iterating Minka's fixed point, so
//! that every layer shares consistent numeric guards.
//!
//! Key behaviors
//! -------------
//! - Provide floors (`WEIGHT_FLOOR`, `DEFAULT_PARAM_FLOOR`) used to keep
//!   sampling weights and Dirichlet parameters strictly positive, and the
//!   `DEFAULT_PARAM_CEILING` that bounds re-estimated parameters from above.
//! - Provide `digamma_increment`, an accurate `ψ(x + n) − ψ(x)` for the
//!   non-negative integer increments that appear in count statistics.
//! - Provide `relative_change` / `max_relative_change` for convergence checks.
//!
//! Invariants & assumptions
//! ------------------------
//! - Helpers assume finite, strictly positive `x` where documented; callers
//!   validate parameters before entering the fixed-point loop.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    DEFAULT_PARAM_CEILING, DEFAULT_PARAM_FLOOR, DIRECT_SUM_CUTOFF, WEIGHT_FLOOR, digamma_increment,
    max_relative_change, relative_change,
};

pub mod prelude {
    pub use super::transformations::{
        DEFAULT_PARAM_CEILING, DEFAULT_PARAM_FLOOR, WEIGHT_FLOOR, digamma_increment,
        max_relative_change, relative_change,
    };
}
