//! lda — Latent Dirichlet Allocation by collapsed Gibbs sampling.
//!
//! Purpose
//! -------
//! Decompose an integer-encoded corpus into a fixed number of latent topics.
//! The model keeps one topic per token plus three count tables and resamples
//! every token from its exact conditional given all others, optionally
//! re-estimating the Dirichlet priors with Minka's fixed point on a
//! burn-in + interval schedule.
//!
//! Key behaviors
//! -------------
//! - [`core`]: corpus and providers, priors, options, model state, the
//!   sweep sampler, hyperparameter re-estimation, and diagnostics.
//! - [`models`]: [`LDAModel`], the validated, phase-tracked inference loop.
//! - [`report`]: the [`Reporter`] seam with in-memory and text-file sinks.
//! - [`errors`]: [`LDAError`], [`LoadError`], [`ReportError`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Configuration errors are raised before any count table is built.
//! - Count invariants hold at every sweep boundary; violations abort the
//!   run as bugs.
//! - A run is fully determined by its corpus and options (including the
//!   seed): sweep order and the single ChaCha stream are fixed.
//! - Sampling is strictly sequential within a sweep.
//!
//! Conventions
//! -----------
//! - Indices are 0-based; sweep numbers 1-based.
//! - Progress is logged through `tracing`; the library installs no
//!   subscriber.
//!
//! Downstream usage
//! ----------------
//! - Build a [`Corpus`] (or load one with [`LineCorpusProvider`]), pick
//!   [`LDAOptions`], then `LDAModel::new(corpus, options)?.run()?`.
//! - Read `theta`, `phi`, `top_words`, and the [`LDAOutcome`], or pass a
//!   [`Reporter`] to `LDAModel::report`.
//!
//! Testing notes
//! -------------
//! - Unit tests sit next to each submodule; end-to-end scenarios live in
//!   `tests/integration_lda_pipeline.rs`.

pub mod core;
pub mod errors;
pub mod models;
pub mod report;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    ClampEvent, Corpus, CorpusProvider, DirichletPrior, HyperUpdate, LDAOptions,
    LineCorpusProvider, ModelState, OptimizeSchedule, PriorInit,
};
pub use self::errors::{LDAError, LDAResult, LoadError, LoadResult, ReportError, ReportResult};
pub use self::models::{LDAModel, LDAOutcome, RunPhase};
pub use self::report::{MemoryReporter, ReportView, Reporter, TextFileReporter};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_topics::lda::prelude::*;
//
// to import the main LDA surface in a single line.

pub mod prelude {
    pub use super::core::{
        Corpus, CorpusProvider, LDAOptions, LineCorpusProvider, OptimizeSchedule, PriorInit,
    };
    pub use super::errors::{LDAError, LDAResult};
    pub use super::models::prelude::*;
    pub use super::report::{MemoryReporter, Reporter, TextFileReporter};
}
