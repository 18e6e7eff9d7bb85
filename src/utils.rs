//! Python → Rust extraction helpers for the `_rust_topics` extension.
//!
//! Everything here is FFI glue: turn loosely typed Python arguments into the
//! validated Rust values the `lda` module expects, and map failures into
//! `PyErr` at the boundary.
#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::lda::core::{
    corpus::{Corpus, CorpusProvider, LineCorpusProvider},
    options::{LDAOptions, OptimizeSchedule, PriorInit},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Load or convert a corpus.
///
/// Accepts an `LDACorpus`, a path (`str`, read with [`LineCorpusProvider`]),
/// or a sequence of
/// documents, each a sequence of non-negative word indices. Without
/// `vocab_size` the vocabulary is inferred as `max index + 1`.
#[cfg(feature = "python-bindings")]
pub fn extract_corpus(raw: &Bound<'_, PyAny>, vocab_size: Option<usize>) -> PyResult<Corpus> {
    if let Ok(corpus) = raw.downcast::<crate::LDACorpus>() {
        return Ok(corpus.borrow().inner.clone());
    }
    if let Ok(path) = raw.extract::<String>() {
        return Ok(LineCorpusProvider::new(vocab_size).load(&path)?);
    }

    let documents: Vec<Vec<usize>> = raw.extract().map_err(|_| {
        PyTypeError::new_err(
            "corpus must be a path or a sequence of sequences of non-negative int word indices",
        )
    })?;
    let corpus = match vocab_size {
        Some(v) => Corpus::new(documents, v)?,
        None => Corpus::with_inferred_vocab(documents)?,
    };
    Ok(corpus)
}

/// A float becomes a symmetric prior, an array-like an asymmetric one.
#[cfg(feature = "python-bindings")]
pub fn extract_prior<'py>(
    py: Python<'py>, raw: Option<&Bound<'py, PyAny>>, default: f64,
) -> PyResult<PriorInit> {
    let Some(raw) = raw else {
        return Ok(PriorInit::Symmetric(default));
    };
    if let Ok(value) = raw.extract::<f64>() {
        return Ok(PriorInit::Symmetric(value));
    }
    let arr = extract_f64_array(py, raw)?;
    let values = arr.as_slice().map_err(|_| {
        PyTypeError::new_err("prior must be a float or a 1-D contiguous float64 array")
    })?;
    Ok(PriorInit::Asymmetric(Array1::from(values.to_vec())))
}

/// Assemble [`LDAOptions`] from the Python keyword arguments.
///
/// Validation is left to the model constructor so that every configuration
/// error surfaces with the same message as in Rust.
#[cfg(feature = "python-bindings")]
pub fn build_lda_options<'py>(
    py: Python<'py>, num_topics: usize, num_iterations: usize, optimize: bool, seed: Option<u64>,
    alpha: Option<&Bound<'py, PyAny>>, beta: Option<&Bound<'py, PyAny>>, burn_in: Option<usize>,
    interval: Option<usize>,
) -> PyResult<LDAOptions> {
    let mut opts = LDAOptions::new(num_topics, num_iterations)
        .with_alpha(extract_prior(py, alpha, LDAOptions::DEFAULT_ALPHA)?)
        .with_beta(extract_prior(py, beta, LDAOptions::DEFAULT_BETA)?);
    if let Some(seed) = seed {
        opts = opts.with_seed(seed);
    }
    if optimize {
        let schedule = OptimizeSchedule::new(
            burn_in.unwrap_or(OptimizeSchedule::DEFAULT_BURN_IN),
            interval.unwrap_or(OptimizeSchedule::DEFAULT_INTERVAL),
        );
        opts = opts.with_optimization(schedule);
    }
    Ok(opts)
}
