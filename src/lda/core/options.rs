//! LDA options — configuration for a collapsed Gibbs inference run.
//!
//! Purpose
//! -------
//! Collect every knob of an inference run in one place so that a run is
//! fully determined by `(corpus, LDAOptions)`: topic count, sweep count,
//! RNG seed, initial priors, the optional hyperparameter re-estimation
//! schedule and its fixed-point settings, and diagnostics cadence.
//!
//! Key behaviors
//! -------------
//! - Represent the run configuration via [`LDAOptions`], built with
//!   [`LDAOptions::new`] plus `with_*` builders.
//! - Represent initial priors via [`PriorInit`] (symmetric scalar or explicit
//!   per-component vector), resolved against the corpus dimensions.
//! - Represent the re-estimation cadence via [`OptimizeSchedule`]
//!   (burn-in + fixed interval).
//!
//! Invariants & assumptions
//! ------------------------
//! - Builders never validate; [`LDAOptions::validate`] performs every
//!   corpus-independent check and is run by the inference loop before any
//!   count table is built. Corpus-dependent checks (prior lengths) happen
//!   when priors are resolved.
//! - Optimization is enabled iff `optimize.is_some()`.
//!
//! Conventions
//! -----------
//! - Sweeps are counted 1-based: "after sweep s" means s full passes done.
//! - Defaults: seed 42, `alpha = Symmetric(0.1)`, `beta = Symmetric(0.01)`,
//!   optimization off, log evidence every 10 sweeps, invariant checks on.
//!
//! Downstream usage
//! ----------------
//! - Build an `LDAOptions`, then hand it with a corpus to
//!   `LDAModel::new`; the Python layer maps its keyword arguments here.
//!
//! Testing notes
//! -------------
//! - Unit tests verify builder defaults, schedule arithmetic, prior
//!   resolution, and each validation branch.
use crate::{
    lda::{
        core::priors::{ALPHA, BETA, DirichletPrior},
        errors::{LDAError, LDAResult},
    },
    optimization::hyper_optimizer::FixedPointOptions,
};
use ndarray::Array1;

/// PriorInit — how to initialize a Dirichlet prior.
#[derive(Debug, Clone, PartialEq)]
pub enum PriorInit {
    /// One value shared across all components (stays symmetric when optimized).
    Symmetric(f64),
    /// One value per component (length T for alpha, V for beta).
    Asymmetric(Array1<f64>),
}

impl PriorInit {
    /// Resolve into a validated [`DirichletPrior`] of dimension `dim`.
    pub fn resolve(&self, name: &'static str, dim: usize) -> LDAResult<DirichletPrior> {
        match self {
            PriorInit::Symmetric(value) => DirichletPrior::symmetric(name, *value, dim),
            PriorInit::Asymmetric(values) => DirichletPrior::asymmetric(name, values.clone(), dim),
        }
    }
}

/// OptimizeSchedule — when hyperparameters are re-estimated.
///
/// Re-estimation runs after completed sweep `s` iff `s >= burn_in` and
/// `s % interval == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizeSchedule {
    /// Sweeps to complete before the first re-estimation may run.
    pub burn_in: usize,
    /// Sweeps between re-estimations (>= 1).
    pub interval: usize,
}

impl OptimizeSchedule {
    pub const DEFAULT_BURN_IN: usize = 50;
    pub const DEFAULT_INTERVAL: usize = 10;

    pub fn new(burn_in: usize, interval: usize) -> OptimizeSchedule {
        OptimizeSchedule { burn_in, interval }
    }

    /// Whether re-estimation is due after completed sweep `sweep` (1-based).
    pub fn is_due(&self, sweep: usize) -> bool {
        self.interval > 0 && sweep >= self.burn_in && sweep % self.interval == 0
    }

    pub fn validate(&self) -> LDAResult<()> {
        if self.interval == 0 {
            return Err(LDAError::InvalidSchedule { interval: self.interval });
        }
        Ok(())
    }
}

impl Default for OptimizeSchedule {
    fn default() -> Self {
        OptimizeSchedule { burn_in: Self::DEFAULT_BURN_IN, interval: Self::DEFAULT_INTERVAL }
    }
}

/// LDAOptions — full configuration of one inference run.
///
/// Fields
/// ------
/// - `num_topics`: `usize`
///   T, must be >= 1.
/// - `num_iterations`: `usize`
///   S sweeps, must be >= 1.
/// - `seed`: `u64`
///   Seed of the single RNG stream.
/// - `alpha`, `beta`: [`PriorInit`]
///   Initial document-topic / topic-word priors.
/// - `optimize`: `Option<OptimizeSchedule>`
///   `None` disables re-estimation.
/// - `fixed_point`: [`FixedPointOptions`]
///   Inner loop settings.
/// - `evidence_interval`: `Option<usize>`
///   Record log evidence every N sweeps and after the last one; `None`
///   disables it.
/// - `check_invariants`: `bool`
///   Verify count invariants after every sweep.
///
/// Notes
/// -----
/// - Struct is plain data, `Clone`/`PartialEq`; pass it by value into the
///   model constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct LDAOptions {
    pub num_topics: usize,
    pub num_iterations: usize,
    pub seed: u64,
    pub alpha: PriorInit,
    pub beta: PriorInit,
    pub optimize: Option<OptimizeSchedule>,
    pub fixed_point: FixedPointOptions,
    pub evidence_interval: Option<usize>,
    pub check_invariants: bool,
}

impl LDAOptions {
    pub const DEFAULT_SEED: u64 = 42;
    pub const DEFAULT_ALPHA: f64 = 0.1;
    pub const DEFAULT_BETA: f64 = 0.01;
    pub const DEFAULT_EVIDENCE_INTERVAL: usize = 10;

    /// Options with the given T and S and every other field at its default.
    ///
    /// Does not validate; see [`LDAOptions::validate`].
    pub fn new(num_topics: usize, num_iterations: usize) -> LDAOptions {
        LDAOptions {
            num_topics,
            num_iterations,
            seed: Self::DEFAULT_SEED,
            alpha: PriorInit::Symmetric(Self::DEFAULT_ALPHA),
            beta: PriorInit::Symmetric(Self::DEFAULT_BETA),
            optimize: None,
            fixed_point: FixedPointOptions::default(),
            evidence_interval: Some(Self::DEFAULT_EVIDENCE_INTERVAL),
            check_invariants: true,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> LDAOptions {
        self.seed = seed;
        self
    }

    pub fn with_alpha(mut self, alpha: PriorInit) -> LDAOptions {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: PriorInit) -> LDAOptions {
        self.beta = beta;
        self
    }

    /// Enable re-estimation on `schedule`.
    pub fn with_optimization(mut self, schedule: OptimizeSchedule) -> LDAOptions {
        self.optimize = Some(schedule);
        self
    }

    pub fn with_fixed_point(mut self, fixed_point: FixedPointOptions) -> LDAOptions {
        self.fixed_point = fixed_point;
        self
    }

    pub fn with_evidence_interval(mut self, interval: Option<usize>) -> LDAOptions {
        self.evidence_interval = interval;
        self
    }

    pub fn with_invariant_checks(mut self, enabled: bool) -> LDAOptions {
        self.check_invariants = enabled;
        self
    }

    pub fn optimization_enabled(&self) -> bool {
        self.optimize.is_some()
    }

    /// Corpus-independent validation.
    ///
    /// Errors
    /// ------
    /// - `LDAError::InvalidNumTopics` when `num_topics == 0`.
    /// - `LDAError::InvalidNumIterations` when `num_iterations == 0`.
    /// - `LDAError::InvalidSchedule` when the optimize interval is 0.
    /// - `LDAError::InvalidEvidenceInterval` when the evidence interval is 0.
    /// - `LDAError::Optimization` for invalid fixed-point options.
    /// - `LDAError::InvalidPrior` for a non-positive symmetric prior value.
    pub fn validate(&self) -> LDAResult<()> {
        if self.num_topics == 0 {
            return Err(LDAError::InvalidNumTopics { value: self.num_topics });
        }
        if self.num_iterations == 0 {
            return Err(LDAError::InvalidNumIterations { value: self.num_iterations });
        }
        if let Some(schedule) = &self.optimize {
            schedule.validate()?;
        }
        if self.evidence_interval == Some(0) {
            return Err(LDAError::InvalidEvidenceInterval { interval: 0 });
        }
        self.fixed_point.validate()?;
        // Symmetric priors can be checked without knowing V.
        self.alpha.resolve(ALPHA, self.num_topics)?;
        if let PriorInit::Symmetric(value) = self.beta {
            DirichletPrior::symmetric(BETA, value, 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Verify defaults set by `LDAOptions::new` and builder overrides.
    fn new_sets_documented_defaults_and_builders_override() {
        let opts = LDAOptions::new(2, 50);
        assert_eq!(opts.seed, 42);
        assert_eq!(opts.alpha, PriorInit::Symmetric(0.1));
        assert_eq!(opts.beta, PriorInit::Symmetric(0.01));
        assert!(!opts.optimization_enabled());
        assert_eq!(opts.evidence_interval, Some(10));
        assert!(opts.check_invariants);
        assert!(opts.validate().is_ok());

        let tuned = opts
            .with_seed(7)
            .with_optimization(OptimizeSchedule::new(0, 5))
            .with_evidence_interval(None)
            .with_invariant_checks(false);
        assert_eq!(tuned.seed, 7);
        assert_eq!(tuned.optimize, Some(OptimizeSchedule { burn_in: 0, interval: 5 }));
        assert_eq!(tuned.evidence_interval, None);
        assert!(!tuned.check_invariants);
    }

    #[test]
    // Purpose
    // -------
    // Zero topics or sweeps are configuration errors.
    //
    // Given
    // -----
    // - T = 0 with S = 50; T = 2 with S = 0.
    //
    // Expect
    // ------
    // - `InvalidNumTopics` and `InvalidNumIterations` respectively.
    fn validate_rejects_zero_topics_and_iterations() {
        assert_eq!(
            LDAOptions::new(0, 50).validate(),
            Err(LDAError::InvalidNumTopics { value: 0 })
        );
        assert_eq!(
            LDAOptions::new(2, 0).validate(),
            Err(LDAError::InvalidNumIterations { value: 0 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Remaining validation branches: schedule, evidence interval, priors.
    fn validate_rejects_bad_schedule_interval_and_priors() {
        let base = LDAOptions::new(2, 10);
        assert_eq!(
            base.clone().with_optimization(OptimizeSchedule::new(0, 0)).validate(),
            Err(LDAError::InvalidSchedule { interval: 0 })
        );
        assert_eq!(
            base.clone().with_evidence_interval(Some(0)).validate(),
            Err(LDAError::InvalidEvidenceInterval { interval: 0 })
        );
        assert!(matches!(
            base.clone().with_beta(PriorInit::Symmetric(-1.0)).validate(),
            Err(LDAError::InvalidPrior { name: BETA, .. })
        ));
        assert!(matches!(
            base.with_alpha(PriorInit::Asymmetric(array![0.1, 0.1, 0.1])).validate(),
            Err(LDAError::PriorDimMismatch { name: ALPHA, expected: 2, actual: 3 })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Schedule arithmetic: burn-in gate and interval multiples.
    fn schedule_is_due_respects_burn_in_and_interval() {
        let schedule = OptimizeSchedule::new(50, 10);
        assert!(!schedule.is_due(10));
        assert!(!schedule.is_due(49));
        assert!(schedule.is_due(50));
        assert!(!schedule.is_due(55));
        assert!(schedule.is_due(60));

        let every = OptimizeSchedule::new(0, 1);
        assert!((1..5).all(|s| every.is_due(s)));
    }
}
