//! core — corpus, priors, state, and the numerical steps of collapsed Gibbs LDA.
//!
//! Purpose
//! -------
//! Collect the building blocks the inference loop composes: the validated
//! integer corpus and its providers, Dirichlet priors, run options, the
//! mutable count state, the one-sweep sampler, the hyperparameter
//! re-estimation bridge, and read-only diagnostics (log evidence, theta,
//! phi, top words).
//!
//! Key behaviors
//! -------------
//! - [`Corpus`] / [`CorpusProvider`] normalize input once at the boundary.
//! - [`ModelState`] owns assignments and counts and exposes only checked
//!   `decrement` / `increment` primitives for mutation.
//! - [`Sampler`] advances a state by exactly one sweep using a caller-owned
//!   random stream.
//! - [`HyperparameterOptimizer`] re-estimates `alpha` and `beta` from the
//!   current counts and reports clamping as [`ClampEvent`]s.
//!
//! Invariants & assumptions
//! ------------------------
//! - Word indices are `< V`, topics `< T`; both checked before use.
//! - Row sums of the document-topic table equal document lengths and row
//!   sums of the topic-word table equal topic totals at every sweep
//!   boundary.
//! - Prior components are finite and strictly positive at all times.
//!
//! Conventions
//! -----------
//! - Count tables are `ndarray::Array2<usize>`; priors and derived
//!   distributions are `f64`.
//! - Only [`HyperparameterOptimizer`] logs; everything else is pure.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its own contract; end-to-end
//!   runs are covered by the integration tests under `tests/`.

pub mod corpus;
pub mod distributions;
pub mod evidence;
pub mod hyper;
pub mod options;
pub mod priors;
pub mod sampler;
pub mod state;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::corpus::{Corpus, CorpusProvider, LineCorpusProvider};
pub use self::distributions::{phi, theta, top_words};
pub use self::evidence::log_evidence;
pub use self::hyper::{ClampEvent, HyperUpdate, HyperparameterOptimizer};
pub use self::options::{LDAOptions, OptimizeSchedule, PriorInit};
pub use self::priors::{ALPHA, BETA, DirichletPrior};
pub use self::sampler::Sampler;
pub use self::state::ModelState;
