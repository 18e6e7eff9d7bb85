//! rust_topics — collapsed Gibbs sampling for Latent Dirichlet Allocation,
//! with Minka hyperparameter re-estimation and optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the topic model to Python via the `_rust_topics` extension
//! module. When the `python-bindings` feature is enabled, this module
//! defines the Python-facing classes and functions.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`lda` and `optimization`) as the
//!   public crate surface.
//! - Define `#[pyclass]` wrappers (`LDA`, `LDACorpus`, `HyperUpdateRecord`)
//!   and the `#[pymodule]` initializer for `_rust_topics`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, argument conversion, and error mapping.
//! - The Python `LDA` class mirrors the command-line driver of the original
//!   tool: `LDA(corpus, num_topics, num_iterations, optimize, output_dir)`
//!   followed by `inference()`.
//!
//! Conventions
//! -----------
//! - Errors from core Rust code are carried as rich error types internally
//!   and converted to `PyErr` at the PyO3 boundary: configuration errors
//!   become `ValueError`, missing files `FileNotFoundError`, other I/O
//!   `OSError`, and runtime failures `RuntimeError`.
//! - Matrices cross the boundary as numpy arrays (`float64` for
//!   distributions, `uint` for counts).
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on `lda::prelude` and ignore the items
//!   guarded by `python-bindings`.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_lda_pipeline.rs`.

pub mod lda;
pub mod optimization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    lda::{
        core::{corpus::Corpus, hyper::HyperUpdate},
        models::lda::{LDAModel, RunPhase},
        report::TextFileReporter,
    },
    utils::{build_lda_options, extract_corpus},
};

/// LDACorpus — validated integer corpus exposed to Python.
///
/// Built by `load_corpus(path, vocab_size=None)`; can be passed wherever an
/// `LDA` constructor expects a corpus.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_topics")]
pub struct LDACorpus {
    pub inner: Corpus,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl LDACorpus {
    #[getter]
    pub fn num_documents(&self) -> usize {
        self.inner.num_documents()
    }

    #[getter]
    pub fn vocab_size(&self) -> usize {
        self.inner.vocab_size()
    }

    #[getter]
    pub fn num_tokens(&self) -> usize {
        self.inner.num_tokens()
    }

    #[getter]
    pub fn documents(&self) -> Vec<Vec<usize>> {
        self.inner.documents().to_vec()
    }

    fn __len__(&self) -> usize {
        self.inner.num_documents()
    }
}

/// HyperUpdateRecord — one hyperparameter re-estimation, read-only.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_topics")]
pub struct HyperUpdateRecord {
    inner: HyperUpdate,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl HyperUpdateRecord {
    #[getter]
    pub fn sweep(&self) -> usize {
        self.inner.sweep
    }

    #[getter]
    pub fn alpha(&self) -> Vec<f64> {
        self.inner.alpha.to_vec()
    }

    #[getter]
    pub fn beta(&self) -> Vec<f64> {
        self.inner.beta.to_vec()
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.iterations
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.converged
    }

    #[getter]
    pub fn relative_change(&self) -> f64 {
        self.inner.relative_change
    }
}

/// LDA — Python-facing wrapper for collapsed Gibbs LDA.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `LDA(corpus, num_topics=100, num_iterations=1000, optimize=False,
/// output_dir=None, seed=None, alpha=None, beta=None, burn_in=None,
/// interval=None, vocab_size=None)`:
/// - `corpus`: an `LDACorpus`, a path to a line-per-document file, or a
///   sequence of documents of int word indices.
/// - `optimize`: enable Minka re-estimation after `burn_in` sweeps, every
///   `interval` sweeps (defaults 50 and 10).
/// - `alpha`, `beta`: float for a symmetric prior, array-like for an
///   asymmetric one (defaults 0.1 and 0.01).
/// - `output_dir`: when set, `inference()` writes text artifacts there.
///
/// Notes
/// -----
/// - Configuration is validated at construction; invalid values raise
///   `ValueError` before any sampling.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_topics")]
pub struct LDA {
    inner: LDAModel,
    output_dir: Option<std::path::PathBuf>,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl LDA {
    #[new]
    #[pyo3(
        signature = (
            corpus,
            num_topics = 100,
            num_iterations = 1000,
            optimize = false,
            output_dir = None,
            seed = None,
            alpha = None,
            beta = None,
            burn_in = None,
            interval = None,
            vocab_size = None,
        ),
        text_signature = "(corpus, /, num_topics=100, num_iterations=1000, optimize=False, \
                          output_dir=None, seed=None, alpha=None, beta=None, burn_in=None, \
                          interval=None, vocab_size=None)"
    )]
    pub fn new<'py>(
        py: Python<'py>, corpus: &Bound<'py, PyAny>, num_topics: usize, num_iterations: usize,
        optimize: bool, output_dir: Option<std::path::PathBuf>, seed: Option<u64>,
        alpha: Option<&Bound<'py, PyAny>>, beta: Option<&Bound<'py, PyAny>>,
        burn_in: Option<usize>, interval: Option<usize>, vocab_size: Option<usize>,
    ) -> PyResult<LDA> {
        let corpus = extract_corpus(corpus, vocab_size)?;
        let opts = build_lda_options(
            py,
            num_topics,
            num_iterations,
            optimize,
            seed,
            alpha,
            beta,
            burn_in,
            interval,
        )?;
        let inner = LDAModel::new(corpus, opts)?;
        Ok(LDA { inner, output_dir })
    }

    /// Run every remaining sweep, then write artifacts if `output_dir` is set.
    pub fn inference(&mut self, py: Python<'_>) -> PyResult<()> {
        py.allow_threads(|| self.inner.run().map(|_| ()))?;
        if let Some(dir) = &self.output_dir {
            self.inner.report(&mut TextFileReporter::new(dir))?;
        }
        Ok(())
    }

    /// Run a single sweep; returns the phase afterwards.
    pub fn step(&mut self) -> PyResult<&'static str> {
        let phase = self.inner.step()?;
        Ok(phase_name(phase))
    }

    #[getter]
    pub fn phase(&self) -> &'static str {
        phase_name(self.inner.phase())
    }

    #[getter]
    pub fn completed_sweeps(&self) -> usize {
        self.inner.completed_sweeps()
    }

    #[getter]
    pub fn theta<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.theta().into_pyarray(py)
    }

    #[getter]
    pub fn phi<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.phi().into_pyarray(py)
    }

    #[getter]
    pub fn alpha<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.state().alpha().to_array().into_pyarray(py)
    }

    #[getter]
    pub fn beta<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.state().beta().to_array().into_pyarray(py)
    }

    #[getter]
    pub fn doc_topic_counts<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<usize>> {
        self.inner.state().doc_topic().clone().into_pyarray(py)
    }

    #[getter]
    pub fn topic_word_counts<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<usize>> {
        self.inner.state().topic_word().clone().into_pyarray(py)
    }

    #[getter]
    pub fn assignments(&self) -> Vec<Vec<usize>> {
        self.inner.state().assignments().to_vec()
    }

    /// `(sweep, log evidence)` pairs recorded so far.
    #[getter]
    pub fn log_evidence(&self) -> Vec<(usize, f64)> {
        self.inner.outcome().evidence.clone()
    }

    #[getter]
    pub fn hyper_updates(&self) -> Vec<HyperUpdateRecord> {
        self.inner
            .outcome()
            .hyper_updates
            .iter()
            .map(|u| HyperUpdateRecord { inner: u.clone() })
            .collect()
    }

    /// `(sweep, prior, component, attempted, clamped_to)` per clamp.
    #[getter]
    pub fn clamp_events(&self) -> Vec<(usize, &'static str, usize, f64, f64)> {
        self.inner
            .outcome()
            .clamps
            .iter()
            .map(|c| (c.sweep, c.prior, c.component, c.attempted, c.clamped_to))
            .collect()
    }

    #[pyo3(signature = (n = 10), text_signature = "(self, /, n=10)")]
    pub fn top_words(&self, n: usize) -> Vec<Vec<usize>> {
        self.inner.top_words(n)
    }
}

#[cfg(feature = "python-bindings")]
fn phase_name(phase: RunPhase) -> &'static str {
    match phase {
        RunPhase::NotStarted => "not_started",
        RunPhase::Running => "running",
        RunPhase::Complete => "complete",
        RunPhase::Failed => "failed",
    }
}

/// Read a line-per-document corpus file.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (path, vocab_size = None), text_signature = "(path, /, vocab_size=None)")]
fn load_corpus(path: &str, vocab_size: Option<usize>) -> PyResult<LDACorpus> {
    use crate::lda::core::corpus::{CorpusProvider, LineCorpusProvider};

    let inner = LineCorpusProvider::new(vocab_size).load(path)?;
    Ok(LDACorpus { inner })
}

/// _rust_topics — PyO3 module initializer for the Python extension.
///
/// Invoked automatically by Python when importing the compiled extension;
/// registers the `LDA`, `LDACorpus` and `HyperUpdateRecord` classes and the
/// `load_corpus` function.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_topics<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<LDA>()?;
    m.add_class::<LDACorpus>()?;
    m.add_class::<HyperUpdateRecord>()?;
    m.add_function(wrap_pyfunction!(load_corpus, m)?)?;
    Ok(())
}
