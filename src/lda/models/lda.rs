//! LDA model: validated configuration, sweep loop, and hyperparameter schedule.
//!
//! [`LDAModel`] is the inference loop. Construction performs every
//! configuration check before a single count is built, seeds the run's only
//! random stream, and draws the initial assignments. Each [`LDAModel::step`]
//! then runs one full sweep, checks invariants when enabled, re-estimates
//! hyperparameters when the schedule says so, and records log evidence.
//!
//! Key ideas:
//! - Phases move `NotStarted → Running → Complete`; any error moves the
//!   model to `Failed`. Neither terminal phase accepts further sweeps, and a
//!   fresh model is needed to run again.
//! - Errors raised inside a sweep are wrapped in `LDAError::AtSweep` so the
//!   caller sees both the failure and the 1-based sweep index.
//! - Stopping between `step` calls is the only cancellation point.
use crate::lda::{
    core::{
        corpus::{Corpus, CorpusProvider},
        distributions,
        evidence::log_evidence,
        hyper::{ClampEvent, HyperUpdate, HyperparameterOptimizer},
        options::LDAOptions,
        priors::{ALPHA, BETA},
        sampler::Sampler,
        state::ModelState,
    },
    errors::{LDAError, LDAResult},
    report::{ReportView, Reporter},
};
use ndarray::Array2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Lifecycle of an [`LDAModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    NotStarted,
    Running,
    Complete,
    Failed,
}

/// Everything a run produced besides the final state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LDAOutcome {
    /// Completed sweeps.
    pub sweeps: usize,
    /// `(sweep, log P(w, z | alpha, beta))` pairs in sweep order.
    pub evidence: Vec<(usize, f64)>,
    /// One record per hyperparameter re-estimation.
    pub hyper_updates: Vec<HyperUpdate>,
    /// Every prior component clamped during the run.
    pub clamps: Vec<ClampEvent>,
}

/// Collapsed Gibbs LDA over one corpus.
#[derive(Debug, Clone)]
pub struct LDAModel {
    corpus: Corpus,
    options: LDAOptions,
    state: ModelState,
    sampler: Sampler,
    optimizer: Option<HyperparameterOptimizer>,
    rng: ChaCha8Rng,
    phase: RunPhase,
    outcome: LDAOutcome,
}

impl LDAModel {
    /// Validate `options` against `corpus` and draw the initial state.
    ///
    /// Errors
    /// ------
    /// - Any error of [`LDAOptions::validate`].
    /// - `LDAError::EmptyCorpus` when the corpus has no documents.
    /// - `LDAError::NoTokensToOptimize` when optimization is enabled and
    ///   the corpus has no tokens.
    /// - `LDAError::PriorDimMismatch` / `LDAError::InvalidPrior` when a
    ///   prior does not fit T or V.
    pub fn new(corpus: Corpus, options: LDAOptions) -> LDAResult<LDAModel> {
        options.validate()?;
        if corpus.num_documents() == 0 {
            return Err(LDAError::EmptyCorpus);
        }
        if options.optimization_enabled() && corpus.num_tokens() == 0 {
            return Err(LDAError::NoTokensToOptimize);
        }

        let alpha = options.alpha.resolve(ALPHA, options.num_topics)?;
        let beta = options.beta.resolve(BETA, corpus.vocab_size())?;
        let optimizer = match options.optimize {
            Some(_) => Some(HyperparameterOptimizer::new(options.fixed_point)?),
            None => None,
        };

        let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
        let state = ModelState::new(&corpus, options.num_topics, alpha, beta, &mut rng)?;
        let sampler = Sampler::new(options.num_topics);

        Ok(LDAModel {
            corpus,
            options,
            state,
            sampler,
            optimizer,
            rng,
            phase: RunPhase::NotStarted,
            outcome: LDAOutcome::default(),
        })
    }

    /// Load a corpus through `provider` and build a model over it.
    pub fn from_provider(
        provider: &dyn CorpusProvider, identifier: &str, options: LDAOptions,
    ) -> LDAResult<LDAModel> {
        let corpus = provider.load(identifier)?;
        LDAModel::new(corpus, options)
    }

    /// Run one sweep plus any scheduled re-estimation; return the new phase.
    ///
    /// Errors
    /// ------
    /// - `LDAError::RunAlreadyComplete` / `LDAError::RunFailed` in a
    ///   terminal phase.
    /// - `LDAError::AtSweep` wrapping any sampling, invariant, or
    ///   optimization failure; the model becomes `Failed`.
    pub fn step(&mut self) -> LDAResult<RunPhase> {
        match self.phase {
            RunPhase::Complete => return Err(LDAError::RunAlreadyComplete),
            RunPhase::Failed => return Err(LDAError::RunFailed),
            RunPhase::NotStarted => {
                tracing::info!(
                    documents = self.corpus.num_documents(),
                    tokens = self.corpus.num_tokens(),
                    vocab_size = self.corpus.vocab_size(),
                    num_topics = self.options.num_topics,
                    num_iterations = self.options.num_iterations,
                    optimize = self.options.optimization_enabled(),
                    seed = self.options.seed,
                    "Starting LDA inference"
                );
                self.phase = RunPhase::Running;
            }
            RunPhase::Running => {}
        }

        let sweep = self.outcome.sweeps + 1;
        if let Err(err) = self.advance(sweep) {
            self.phase = RunPhase::Failed;
            tracing::warn!(sweep, error = %err, "LDA inference failed");
            return Err(err.at_sweep(sweep));
        }
        self.outcome.sweeps = sweep;

        if sweep == self.options.num_iterations {
            self.phase = RunPhase::Complete;
            tracing::info!(
                sweeps = sweep,
                re_estimations = self.outcome.hyper_updates.len(),
                clamps = self.outcome.clamps.len(),
                "LDA inference complete"
            );
        }
        Ok(self.phase)
    }

    /// Run every remaining sweep.
    ///
    /// Errors as in [`LDAModel::step`].
    pub fn run(&mut self) -> LDAResult<&LDAOutcome> {
        loop {
            if self.step()? == RunPhase::Complete {
                return Ok(&self.outcome);
            }
        }
    }

    fn advance(&mut self, sweep: usize) -> LDAResult<()> {
        self.sampler.sweep(&mut self.state, &self.corpus, &mut self.rng)?;
        if self.options.check_invariants {
            self.state.check_invariants(&self.corpus)?;
        }

        if let (Some(optimizer), Some(schedule)) = (&self.optimizer, &self.options.optimize) {
            if schedule.is_due(sweep) {
                let (update, clamps) = optimizer.update(&mut self.state, sweep)?;
                self.outcome.hyper_updates.push(update);
                self.outcome.clamps.extend(clamps);
            }
        }

        let evidence_due = match self.options.evidence_interval {
            Some(interval) => sweep % interval == 0 || sweep == self.options.num_iterations,
            None => false,
        };
        if evidence_due {
            let value = log_evidence(&self.state, &self.corpus);
            self.outcome.evidence.push((sweep, value));
            tracing::debug!(sweep, log_evidence = value, "Sweep complete");
        } else {
            tracing::debug!(sweep, "Sweep complete");
        }
        Ok(())
    }

    /// Hand the finished run to `reporter`.
    ///
    /// Errors
    /// ------
    /// - `LDAError::RunNotComplete` unless the phase is `Complete`.
    /// - `LDAError::Report` for reporter failures.
    pub fn report(&self, reporter: &mut dyn Reporter) -> LDAResult<()> {
        if self.phase != RunPhase::Complete {
            return Err(LDAError::RunNotComplete {
                completed: self.outcome.sweeps,
                requested: self.options.num_iterations,
            });
        }
        let theta = self.theta();
        let phi = self.phi();
        let view = ReportView {
            state: &self.state,
            theta: &theta,
            phi: &phi,
            outcome: &self.outcome,
        };
        reporter.report(&view)?;
        Ok(())
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn completed_sweeps(&self) -> usize {
        self.outcome.sweeps
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn options(&self) -> &LDAOptions {
        &self.options
    }

    /// Current sampler state; terminal once the phase is `Complete`.
    ///
    /// After a failed sweep the counts still match the assignments, but the
    /// sweep that failed is only partly applied.
    pub fn state(&self) -> &ModelState {
        &self.state
    }

    pub fn outcome(&self) -> &LDAOutcome {
        &self.outcome
    }

    /// Document-topic distribution of the current state, D × T.
    pub fn theta(&self) -> Array2<f64> {
        distributions::theta(&self.state)
    }

    /// Topic-word distribution of the current state, T × V.
    pub fn phi(&self) -> Array2<f64> {
        distributions::phi(&self.state)
    }

    /// The `n` most probable words of every topic.
    pub fn top_words(&self, n: usize) -> Vec<Vec<usize>> {
        distributions::top_words(&self.phi(), n)
    }

    /// Log evidence of the current state.
    pub fn log_evidence(&self) -> f64 {
        log_evidence(&self.state, &self.corpus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lda::{
        core::options::{OptimizeSchedule, PriorInit},
        report::MemoryReporter,
    };

    // Scope
    // -----
    // - Configuration errors surface from `new` before any sampling.
    // - Phase transitions and terminal-phase rejections.
    // - Schedule wiring: re-estimations and evidence land on the right sweeps.
    // - Failures are wrapped with their sweep and poison the model.

    fn toy_corpus() -> Corpus {
        Corpus::new(vec![vec![0, 1, 2, 0], vec![3, 4, 3], vec![0, 2, 4, 1, 3]], 5).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Zero documents and zero-token optimization are configuration errors.
    fn new_rejects_empty_corpus_and_tokenless_optimization() {
        let empty = Corpus::new(vec![], 3).unwrap();
        let err = LDAModel::new(empty, LDAOptions::new(2, 5)).unwrap_err();
        assert_eq!(err, LDAError::EmptyCorpus);
        assert!(err.is_configuration_error());

        let blank = Corpus::new(vec![vec![], vec![]], 3).unwrap();
        assert!(LDAModel::new(blank.clone(), LDAOptions::new(2, 5)).is_ok());
        let opts = LDAOptions::new(2, 5).with_optimization(OptimizeSchedule::default());
        assert_eq!(LDAModel::new(blank, opts).unwrap_err(), LDAError::NoTokensToOptimize);
    }

    #[test]
    // Purpose
    // -------
    // Phases advance and terminal phases refuse more work.
    //
    // Given
    // -----
    // - Toy corpus, T = 2, S = 3.
    //
    // Expect
    // ------
    // - Running after sweeps 1 and 2, Complete after 3, then
    //   `RunAlreadyComplete` from both `step` and `run`.
    fn phases_advance_and_complete_model_rejects_more_sweeps() {
        let mut model = LDAModel::new(toy_corpus(), LDAOptions::new(2, 3)).unwrap();
        assert_eq!(model.phase(), RunPhase::NotStarted);

        assert_eq!(model.step().unwrap(), RunPhase::Running);
        assert_eq!(model.step().unwrap(), RunPhase::Running);
        assert_eq!(model.step().unwrap(), RunPhase::Complete);
        assert_eq!(model.completed_sweeps(), 3);

        assert_eq!(model.step(), Err(LDAError::RunAlreadyComplete));
        assert!(matches!(model.run(), Err(LDAError::RunAlreadyComplete)));
    }

    #[test]
    // Purpose
    // -------
    // Re-estimation and evidence follow their schedules.
    //
    // Given
    // -----
    // - S = 25, burn-in 10, interval 5, evidence every 10 sweeps.
    //
    // Expect
    // ------
    // - Re-estimations after sweeps 10, 15, 20, 25.
    // - Evidence after sweeps 10, 20 and the final sweep 25.
    fn schedules_drive_reestimation_and_evidence() {
        let opts = LDAOptions::new(2, 25).with_optimization(OptimizeSchedule::new(10, 5));
        let mut model = LDAModel::new(toy_corpus(), opts).unwrap();

        let outcome = model.run().unwrap().clone();

        let update_sweeps: Vec<usize> = outcome.hyper_updates.iter().map(|u| u.sweep).collect();
        assert_eq!(update_sweeps, vec![10, 15, 20, 25]);
        let evidence_sweeps: Vec<usize> = outcome.evidence.iter().map(|&(s, _)| s).collect();
        assert_eq!(evidence_sweeps, vec![10, 20, 25]);
        assert!(outcome.evidence.iter().all(|&(_, v)| v.is_finite()));
    }

    #[test]
    // Purpose
    // -------
    // A sampling failure is wrapped with its sweep and poisons the model.
    //
    // Given
    // -----
    // - Priors so large that the weights overflow on the first token.
    //
    // Expect
    // ------
    // - `AtSweep { sweep: 1, .. }` whose root is `NumericalInstability`;
    //   phase `Failed`; further steps return `RunFailed`.
    // - The failed state still satisfies every count invariant.
    fn sampling_failure_is_wrapped_and_model_fails() {
        let huge = f64::MAX / 2.0;
        let opts = LDAOptions::new(2, 5)
            .with_alpha(PriorInit::Symmetric(huge))
            .with_beta(PriorInit::Symmetric(huge));
        let mut model = LDAModel::new(toy_corpus(), opts).unwrap();

        let err = model.step().unwrap_err();

        assert_eq!(err.sweep(), Some(1));
        assert!(matches!(err.root(), LDAError::NumericalInstability { .. }));
        assert_eq!(model.phase(), RunPhase::Failed);
        assert_eq!(model.step(), Err(LDAError::RunFailed));
        assert!(model.state().check_invariants(model.corpus()).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Reporting requires a complete run.
    fn report_requires_complete_run() {
        let mut model = LDAModel::new(toy_corpus(), LDAOptions::new(2, 2)).unwrap();
        let mut reporter = MemoryReporter::default();

        model.step().unwrap();
        assert_eq!(
            model.report(&mut reporter),
            Err(LDAError::RunNotComplete { completed: 1, requested: 2 })
        );

        model.step().unwrap();
        model.report(&mut reporter).unwrap();
        assert_eq!(reporter.theta.as_ref().map(|t| t.dim()), Some((3, 2)));
        assert_eq!(reporter.phi.as_ref().map(|p| p.dim()), Some((2, 5)));
    }
}
