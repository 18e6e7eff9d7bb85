//! hyper_optimizer — Minka's fixed-point re-estimation of Dirichlet parameters.
//!
//! Purpose
//! -------
//! Estimate the parameters of a Dirichlet prior from grouped multinomial
//! counts (documents × topics for α, topics × words for β) by iterating
//! Minka's fixed point under a Gamma(s, r) hyperprior
//!
//! ```text
//! a_k ← (a_k · Σ_g [ψ(n_gk + a_k) − ψ(a_k)] + s − 1) / (Σ_g [ψ(n_g + A) − ψ(A)] + r)
//! ```
//!
//! with `A = Σ_k a_k`, until every component's relative change falls below a
//! tolerance or an iteration cap is hit. `s = 1, r = 0` is Minka's plain
//! maximum-likelihood update.
//!
//! Key behaviors
//! -------------
//! - [`DirichletStats`] compresses a count matrix once into run-length
//!   encoded histograms so each iteration costs O(distinct counts).
//! - [`fixed_point_asymmetric`] updates one parameter per component;
//!   [`fixed_point_symmetric`] updates a single shared scalar.
//! - Components driven non-positive or non-finite are clamped to the
//!   configured floor; components overshooting the ceiling are clamped to
//!   it. Both are reported in [`FixedPointOutcome::clamps`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are validated before iterating: starting parameters are finite
//!   and strictly positive, dimensions match, and at least one group has a
//!   non-zero total.
//! - After a successful call every parameter lies in `[floor, ceiling]`.
//!
//! Conventions
//! -----------
//! - "Groups" are the rows of the count matrix, "components" its columns.
//! - This module performs no logging; the model layer reports outcomes.

pub mod options;
pub mod run;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::options::FixedPointOptions;
pub use self::run::{ClampRecord, FixedPointOutcome, fixed_point_asymmetric, fixed_point_symmetric};
pub use self::types::{CountHistogram, DirichletStats};

pub mod prelude {
    pub use super::options::FixedPointOptions;
    pub use super::run::{FixedPointOutcome, fixed_point_asymmetric, fixed_point_symmetric};
    pub use super::types::DirichletStats;
}
