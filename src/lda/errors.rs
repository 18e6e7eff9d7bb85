//! Errors for LDA topic models (configuration, corpus loading, sampling
//! invariants, hyperparameter optimization, run lifecycle, and reporting).
//!
//! This module defines the model error type, [`LDAError`], the corpus
//! provider error type, [`LoadError`], and the reporter error type,
//! [`ReportError`]. All implement `Display`/`Error` and, with the
//! `python-bindings` feature, convert to `PyErr`.
//!
//! ## Conventions
//! - **Indices are 0-based**; sweep numbers are **1-based** (sweep 1 is the
//!   first full pass over the corpus).
//! - Configuration errors are detected before any count table is built.
//! - Invariant violations (`CountUnderflow`, `DocCountMismatch`, ...) signal
//!   programming bugs; they abort the run and are never retried.
//! - Hyperparameter clamping is *not* an error: it is reported as a
//!   `ClampEvent` in the run outcome.
#[cfg(feature = "python-bindings")]
use pyo3::{
    PyErr,
    exceptions::{PyFileNotFoundError, PyOSError, PyRuntimeError, PyValueError},
};

use crate::optimization::errors::OptError;

/// Result alias for topic-model operations that may produce [`LDAError`].
pub type LDAResult<T> = Result<T, LDAError>;

/// Result alias for corpus providers.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result alias for reporters.
pub type ReportResult<T> = Result<T, ReportError>;

/// Unified error type for LDA inference.
#[derive(Debug, Clone, PartialEq)]
pub enum LDAError {
    // ---- Configuration ----
    /// Number of topics must be >= 1.
    InvalidNumTopics { value: usize },

    /// Number of sweeps must be >= 1.
    InvalidNumIterations { value: usize },

    /// Corpus has no documents.
    EmptyCorpus,

    /// Optimization requested on a corpus without a single token.
    NoTokensToOptimize,

    /// Prior component must be finite and > 0.
    InvalidPrior { name: &'static str, index: usize, value: f64 },

    /// Asymmetric prior length does not match its dimension (T for alpha, V for beta).
    PriorDimMismatch { name: &'static str, expected: usize, actual: usize },

    /// Optimization interval must be >= 1.
    InvalidSchedule { interval: usize },

    /// Evidence interval must be >= 1 when given.
    InvalidEvidenceInterval { interval: usize },

    // ---- Corpus provider ----
    /// Corpus provider failure, propagated unchanged.
    Load(LoadError),

    // ---- Sampling ----
    /// Categorical weights summed to a non-positive or non-finite value, or
    /// a single weight was negative or non-finite.
    NumericalInstability { doc: usize, pos: usize, total: f64 },

    // ---- Model/state invariants ----
    /// Decrement would drive a count below zero.
    CountUnderflow { doc: usize, pos: usize, topic: usize },

    /// Topic id outside `[0, T)`.
    TopicOutOfRange { topic: usize, num_topics: usize },

    /// Document-topic row does not sum to the document length.
    DocCountMismatch { doc: usize, expected: usize, actual: usize },

    /// Topic total disagrees with the row sum of topic-word counts.
    TopicTotalMismatch { topic: usize, total: usize, row_sum: usize },

    /// Assignments and corpus disagree on shape.
    AssignmentShapeMismatch { doc: usize, expected: usize, actual: usize },

    // ---- Estimation ----
    /// Hyperparameter optimizer rejected its inputs.
    Optimization(OptError),

    // ---- Lifecycle ----
    /// All sweeps already ran; a fresh model is required.
    RunAlreadyComplete,

    /// A previous sweep failed; the model cannot continue.
    RunFailed,

    /// Results requested before the run completed.
    RunNotComplete { completed: usize, requested: usize },

    /// Failure raised while running the given 1-based sweep.
    AtSweep { sweep: usize, source: Box<LDAError> },

    // ---- Reporting ----
    Report(ReportError),
}

impl LDAError {
    /// Attach the 1-based sweep index at which the error occurred.
    pub fn at_sweep(self, sweep: usize) -> LDAError {
        LDAError::AtSweep { sweep, source: Box::new(self) }
    }

    /// Innermost error, unwrapping any [`LDAError::AtSweep`] layers.
    pub fn root(&self) -> &LDAError {
        match self {
            LDAError::AtSweep { source, .. } => source.root(),
            other => other,
        }
    }

    /// Sweep index attached to this error, if any.
    pub fn sweep(&self) -> Option<usize> {
        match self {
            LDAError::AtSweep { sweep, .. } => Some(*sweep),
            _ => None,
        }
    }

    /// `true` for the configuration family: detected before sampling starts,
    /// fatal, never retried.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self.root(),
            LDAError::InvalidNumTopics { .. }
                | LDAError::InvalidNumIterations { .. }
                | LDAError::EmptyCorpus
                | LDAError::NoTokensToOptimize
                | LDAError::InvalidPrior { .. }
                | LDAError::PriorDimMismatch { .. }
                | LDAError::InvalidSchedule { .. }
                | LDAError::InvalidEvidenceInterval { .. }
                | LDAError::Optimization(
                    OptError::InvalidTolerance { .. }
                        | OptError::InvalidMaxIter { .. }
                        | OptError::InvalidFloor { .. }
                        | OptError::InvalidCeiling { .. }
                        | OptError::InvalidHyperprior { .. }
                )
        )
    }
}

impl std::error::Error for LDAError {}

impl std::fmt::Display for LDAError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            LDAError::InvalidNumTopics { value } => {
                write!(f, "Number of topics must be >= 1; got {value}.")
            }
            LDAError::InvalidNumIterations { value } => {
                write!(f, "Number of iterations must be >= 1; got {value}.")
            }
            LDAError::EmptyCorpus => write!(f, "Corpus contains no documents."),
            LDAError::NoTokensToOptimize => {
                write!(f, "Hyperparameter optimization requires at least one token in the corpus.")
            }
            LDAError::InvalidPrior { name, index, value } => {
                write!(f, "Prior {name} component {index} must be finite and > 0; got {value}.")
            }
            LDAError::PriorDimMismatch { name, expected, actual } => {
                write!(f, "Prior {name} length mismatch: expected {expected}, got {actual}.")
            }
            LDAError::InvalidSchedule { interval } => {
                write!(f, "Optimization interval must be >= 1; got {interval}.")
            }
            LDAError::InvalidEvidenceInterval { interval } => {
                write!(f, "Evidence interval must be >= 1; got {interval}.")
            }
            // ---- Corpus provider ----
            LDAError::Load(err) => write!(f, "Corpus load failed: {err}"),
            // ---- Sampling ----
            LDAError::NumericalInstability { doc, pos, total } => {
                write!(
                    f,
                    "Numerical instability sampling token {pos} of document {doc}: weight total {total}."
                )
            }
            // ---- Model/state invariants ----
            LDAError::CountUnderflow { doc, pos, topic } => {
                write!(
                    f,
                    "Count underflow removing token {pos} of document {doc} from topic {topic}."
                )
            }
            LDAError::TopicOutOfRange { topic, num_topics } => {
                write!(f, "Topic {topic} is outside [0, {num_topics}).")
            }
            LDAError::DocCountMismatch { doc, expected, actual } => {
                write!(
                    f,
                    "Document {doc} topic counts sum to {actual}, expected length {expected}."
                )
            }
            LDAError::TopicTotalMismatch { topic, total, row_sum } => {
                write!(f, "Topic {topic} total is {total} but its word counts sum to {row_sum}.")
            }
            LDAError::AssignmentShapeMismatch { doc, expected, actual } => {
                write!(
                    f,
                    "Document {doc} has {actual} topic assignments, expected {expected}."
                )
            }
            // ---- Estimation ----
            LDAError::Optimization(err) => write!(f, "Hyperparameter optimization failed: {err}"),
            // ---- Lifecycle ----
            LDAError::RunAlreadyComplete => {
                write!(f, "Inference already complete; build a new model to run again.")
            }
            LDAError::RunFailed => write!(f, "Inference failed earlier and cannot continue."),
            LDAError::RunNotComplete { completed, requested } => {
                write!(f, "Inference not complete: {completed} of {requested} sweeps run.")
            }
            LDAError::AtSweep { sweep, source } => write!(f, "Sweep {sweep}: {source}"),
            // ---- Reporting ----
            LDAError::Report(err) => write!(f, "Reporting failed: {err}"),
        }
    }
}

impl From<LoadError> for LDAError {
    fn from(err: LoadError) -> LDAError {
        LDAError::Load(err)
    }
}

impl From<OptError> for LDAError {
    fn from(err: OptError) -> LDAError {
        LDAError::Optimization(err)
    }
}

impl From<ReportError> for LDAError {
    fn from(err: ReportError) -> LDAError {
        LDAError::Report(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<LDAError> for PyErr {
    fn from(err: LDAError) -> PyErr {
        match err.root() {
            LDAError::Load(load) => load.clone().into(),
            LDAError::Report(report) => report.clone().into(),
            root if root.is_configuration_error() => PyValueError::new_err(err.to_string()),
            _ => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

/// Errors surfaced by corpus providers.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// Identifier does not resolve to a readable source.
    NotFound { path: String },

    /// Underlying read failed.
    Io { path: String, reason: String },

    /// Token is not an integer.
    MalformedToken { line: usize, token: String },

    /// Token is a negative integer.
    NegativeIndex { line: usize, value: i64 },

    /// Word index is not below the vocabulary size.
    IndexOutOfRange { doc: usize, pos: usize, index: usize, vocab_size: usize },

    /// Vocabulary size is zero while the corpus has tokens, or was given as zero.
    EmptyVocabulary,
}

impl std::error::Error for LoadError {}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::NotFound { path } => write!(f, "Corpus source not found: {path}"),
            LoadError::Io { path, reason } => write!(f, "Failed to read {path}: {reason}"),
            LoadError::MalformedToken { line, token } => {
                write!(f, "Line {line}: token {token:?} is not a word index.")
            }
            LoadError::NegativeIndex { line, value } => {
                write!(f, "Line {line}: word index {value} is negative.")
            }
            LoadError::IndexOutOfRange { doc, pos, index, vocab_size } => {
                write!(
                    f,
                    "Document {doc}, position {pos}: word index {index} is outside [0, {vocab_size})."
                )
            }
            LoadError::EmptyVocabulary => write!(f, "Vocabulary size must be >= 1."),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<LoadError> for PyErr {
    fn from(err: LoadError) -> PyErr {
        match err {
            LoadError::NotFound { .. } => PyFileNotFoundError::new_err(err.to_string()),
            LoadError::Io { .. } => PyOSError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Errors surfaced by reporters.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportError {
    /// Writing an artifact failed.
    Io { path: String, reason: String },

    /// Derived tables disagree with the model dimensions.
    ShapeMismatch { what: &'static str, expected: (usize, usize), actual: (usize, usize) },
}

impl std::error::Error for ReportError {}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io { path, reason } => write!(f, "Failed to write {path}: {reason}"),
            ReportError::ShapeMismatch { what, expected, actual } => {
                write!(f, "{what} has shape {actual:?}, expected {expected:?}.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<ReportError> for PyErr {
    fn from(err: ReportError) -> PyErr {
        match err {
            ReportError::Io { .. } => PyOSError::new_err(err.to_string()),
            ReportError::ShapeMismatch { .. } => PyValueError::new_err(err.to_string()),
        }
    }
}
