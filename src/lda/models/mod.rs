//! models — the user-facing LDA inference loop.
//!
//! [`LDAModel`] validates a configuration against a corpus, owns the
//! sampler state and the single random stream, and advances sweep by sweep
//! through the phases `NotStarted → Running → Complete` (or `Failed`).
//! Results are read through accessors or pushed to a `Reporter`.

pub mod lda;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::lda::{LDAModel, LDAOutcome, RunPhase};

pub mod prelude {
    pub use super::lda::{LDAModel, LDAOutcome, RunPhase};
}
