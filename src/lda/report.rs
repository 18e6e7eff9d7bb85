//! Reporters — consumers of a finished LDA run.
//!
//! Purpose
//! -------
//! Decouple "what a run produced" from "where it goes". The model builds a
//! borrowed [`ReportView`] of its terminal state and hands it to any
//! [`Reporter`]; the reporter decides what to keep or write.
//!
//! Key behaviors
//! -------------
//! - [`MemoryReporter`] copies the derived tables, priors, and outcome into
//!   owned fields for programmatic use.
//! - [`TextFileReporter`] writes plain-text artifacts under an output
//!   directory, creating it if missing:
//!   - `theta.txt`: D lines of T space-separated probabilities,
//!   - `phi.txt`: T lines of V space-separated probabilities,
//!   - `hyperparameters.txt`: an `alpha` line and a `beta` line,
//!   - `topics.txt`: `topic <k>: <w> <w> ...` with the top words of each topic,
//!   - `evidence.txt`: `<sweep> <log evidence>` per recorded sweep.
//!
//! Invariants & assumptions
//! ------------------------
//! - Views are only built from complete runs (enforced by the model).
//! - `theta` is D × T and `phi` is T × V; reporters check this before
//!   writing anything.
use crate::lda::{
    core::{distributions::top_words, state::ModelState},
    errors::{ReportError, ReportResult},
    models::lda::LDAOutcome,
};
use ndarray::{Array1, Array2};
use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

/// Borrowed snapshot of a complete run.
#[derive(Debug, Clone, Copy)]
pub struct ReportView<'a> {
    pub state: &'a ModelState,
    /// D × T.
    pub theta: &'a Array2<f64>,
    /// T × V.
    pub phi: &'a Array2<f64>,
    pub outcome: &'a LDAOutcome,
}

impl ReportView<'_> {
    /// Check `theta` and `phi` against the state dimensions.
    pub fn check_shapes(&self) -> ReportResult<()> {
        let (d, t, v) =
            (self.state.num_documents(), self.state.num_topics(), self.state.vocab_size());
        if self.theta.dim() != (d, t) {
            return Err(ReportError::ShapeMismatch {
                what: "theta",
                expected: (d, t),
                actual: self.theta.dim(),
            });
        }
        if self.phi.dim() != (t, v) {
            return Err(ReportError::ShapeMismatch {
                what: "phi",
                expected: (t, v),
                actual: self.phi.dim(),
            });
        }
        Ok(())
    }
}

/// Consumer of a complete run.
pub trait Reporter {
    fn report(&mut self, view: &ReportView<'_>) -> ReportResult<()>;
}

/// Keeps owned copies of everything a run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryReporter {
    pub theta: Option<Array2<f64>>,
    pub phi: Option<Array2<f64>>,
    pub alpha: Option<Array1<f64>>,
    pub beta: Option<Array1<f64>>,
    pub doc_topic: Option<Array2<usize>>,
    pub topic_word: Option<Array2<usize>>,
    pub outcome: Option<LDAOutcome>,
}

impl Reporter for MemoryReporter {
    fn report(&mut self, view: &ReportView<'_>) -> ReportResult<()> {
        view.check_shapes()?;
        self.theta = Some(view.theta.clone());
        self.phi = Some(view.phi.clone());
        self.alpha = Some(view.state.alpha().to_array());
        self.beta = Some(view.state.beta().to_array());
        self.doc_topic = Some(view.state.doc_topic().clone());
        self.topic_word = Some(view.state.topic_word().clone());
        self.outcome = Some(view.outcome.clone());
        Ok(())
    }
}

/// Writes plain-text artifacts under `dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFileReporter {
    dir: PathBuf,
    top_n: usize,
}

impl TextFileReporter {
    pub const DEFAULT_TOP_N: usize = 10;

    pub fn new(dir: impl Into<PathBuf>) -> TextFileReporter {
        TextFileReporter { dir: dir.into(), top_n: Self::DEFAULT_TOP_N }
    }

    /// Number of words listed per topic in `topics.txt`.
    pub fn with_top_n(mut self, top_n: usize) -> TextFileReporter {
        self.top_n = top_n;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write(&self, name: &str, contents: &str) -> ReportResult<()> {
        let path = self.dir.join(name);
        fs::write(&path, contents).map_err(|e| io_error(&path, e))
    }
}

impl Reporter for TextFileReporter {
    fn report(&mut self, view: &ReportView<'_>) -> ReportResult<()> {
        view.check_shapes()?;
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        self.write("theta.txt", &format_matrix(view.theta))?;
        self.write("phi.txt", &format_matrix(view.phi))?;

        let mut hyper = String::new();
        let _ = writeln!(hyper, "alpha {}", join(view.state.alpha().to_array().iter()));
        let _ = writeln!(hyper, "beta {}", join(view.state.beta().to_array().iter()));
        self.write("hyperparameters.txt", &hyper)?;

        let mut topics = String::new();
        for (k, words) in top_words(view.phi, self.top_n).iter().enumerate() {
            let listed: Vec<String> = words.iter().map(usize::to_string).collect();
            let _ = writeln!(topics, "topic {k}: {}", listed.join(" "));
        }
        self.write("topics.txt", &topics)?;

        let mut evidence = String::new();
        for (sweep, value) in &view.outcome.evidence {
            let _ = writeln!(evidence, "{sweep} {value}");
        }
        self.write("evidence.txt", &evidence)
    }
}

fn format_matrix(matrix: &Array2<f64>) -> String {
    let mut out = String::new();
    for row in matrix.rows() {
        let _ = writeln!(out, "{}", join(row.iter()));
    }
    out
}

fn join<'a>(values: impl Iterator<Item = &'a f64>) -> String {
    values.map(|v| v.to_string()).collect::<Vec<_>>().join(" ")
}

fn io_error(path: &Path, err: std::io::Error) -> ReportError {
    ReportError::Io { path: path.display().to_string(), reason: err.to_string() }
}
