//! Hyperparameter re-estimation — Minka's fixed point applied to LDA counts.
//!
//! Purpose
//! -------
//! Bridge the model state and the generic Dirichlet optimizer: compress the
//! document-topic table into statistics for `alpha` (documents are groups,
//! topics are components) and the topic-word table into statistics for
//! `beta` (topics are groups, words are components), re-estimate both, and
//! report what happened.
//!
//! Key behaviors
//! -------------
//! - Both priors are re-estimated on scratch copies and committed together,
//!   so a failure leaves the state's priors untouched.
//! - Components clamped to the floor or the ceiling become [`ClampEvent`]s,
//!   logged at `warn` level and returned to the caller; clamping is never an
//!   error.
//! - A run that hits its iteration cap is logged at `warn` level.
//!
//! Invariants & assumptions
//! ------------------------
//! - Never called on a state without tokens; that is reported as
//!   `LDAError::NoTokensToOptimize`.
//! - Priors keep their symmetry and dimension across updates.
use crate::{
    lda::{
        core::{
            priors::{ALPHA, BETA, DirichletPrior},
            state::ModelState,
        },
        errors::{LDAError, LDAResult},
    },
    optimization::{
        hyper_optimizer::{DirichletStats, FixedPointOptions, FixedPointOutcome},
        numerical_stability::max_relative_change,
    },
};
use ndarray::{Array1, ArrayView2};

/// A prior component that was clamped to a bound during re-estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampEvent {
    /// Completed sweep after which the re-estimation ran (1-based).
    pub sweep: usize,
    /// `"alpha"` or `"beta"`.
    pub prior: &'static str,
    pub component: usize,
    pub attempted: f64,
    pub clamped_to: f64,
}

/// Record of one re-estimation.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperUpdate {
    pub sweep: usize,
    /// Alpha after the update (length T).
    pub alpha: Array1<f64>,
    /// Beta after the update (length V).
    pub beta: Array1<f64>,
    /// Larger of the two fixed-point iteration counts.
    pub iterations: usize,
    /// Both fixed-point runs converged within their cap.
    pub converged: bool,
    /// Largest relative change of any alpha or beta component.
    pub relative_change: f64,
}

/// HyperparameterOptimizer — re-estimates `alpha` and `beta` in place.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperparameterOptimizer {
    opts: FixedPointOptions,
}

impl HyperparameterOptimizer {
    /// Wrap validated fixed-point options.
    pub fn new(opts: FixedPointOptions) -> LDAResult<HyperparameterOptimizer> {
        opts.validate()?;
        Ok(HyperparameterOptimizer { opts })
    }

    /// Re-estimate both priors of `state` after completed sweep `sweep`.
    ///
    /// Returns the update record and any clamp events.
    ///
    /// Errors
    /// ------
    /// - `LDAError::NoTokensToOptimize` when the state holds no tokens.
    /// - `LDAError::Optimization` for failures of the fixed-point layer.
    pub fn update(
        &self, state: &mut ModelState, sweep: usize,
    ) -> LDAResult<(HyperUpdate, Vec<ClampEvent>)> {
        if state.num_tokens() == 0 {
            return Err(LDAError::NoTokensToOptimize);
        }

        let old_alpha = state.alpha().to_array();
        let old_beta = state.beta().to_array();

        let mut alpha = state.alpha().clone();
        let alpha_run = self.reestimate(&mut alpha, state.doc_topic().view())?;
        let mut beta = state.beta().clone();
        let beta_run = self.reestimate(&mut beta, state.topic_word().view())?;

        state.alpha = alpha;
        state.beta = beta;

        let new_alpha = state.alpha().to_array();
        let new_beta = state.beta().to_array();
        let relative_change = max_relative_change(
            old_alpha.as_slice().unwrap_or(&[]),
            new_alpha.as_slice().unwrap_or(&[]),
        )
        .max(max_relative_change(
            old_beta.as_slice().unwrap_or(&[]),
            new_beta.as_slice().unwrap_or(&[]),
        ));

        let mut clamps = Vec::new();
        for (prior, run) in [(ALPHA, &alpha_run), (BETA, &beta_run)] {
            if !run.converged {
                tracing::warn!(
                    sweep,
                    prior,
                    iterations = run.iterations,
                    final_change = run.final_change,
                    "Fixed-point iteration cap reached"
                );
            }
            for record in &run.clamps {
                tracing::warn!(
                    sweep,
                    prior,
                    component = record.component,
                    attempted = record.attempted,
                    clamped_to = record.clamped_to,
                    "Hyperparameter clamped to bound"
                );
                clamps.push(ClampEvent {
                    sweep,
                    prior,
                    component: record.component,
                    attempted: record.attempted,
                    clamped_to: record.clamped_to,
                });
            }
        }

        let update = HyperUpdate {
            sweep,
            iterations: alpha_run.iterations.max(beta_run.iterations),
            converged: alpha_run.converged && beta_run.converged,
            relative_change,
            alpha: new_alpha,
            beta: new_beta,
        };
        tracing::info!(
            sweep,
            iterations = update.iterations,
            converged = update.converged,
            alpha_sum = state.alpha().sum(),
            beta_sum = state.beta().sum(),
            relative_change,
            "Re-estimated hyperparameters"
        );
        Ok((update, clamps))
    }

    fn reestimate(
        &self, prior: &mut DirichletPrior, counts: ArrayView2<'_, usize>,
    ) -> LDAResult<FixedPointOutcome> {
        let stats = DirichletStats::from_rows(counts);
        Ok(prior.reestimate(&stats, &self.opts)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lda::core::corpus::Corpus;

    // Scope
    // -----
    // - Updates keep priors positive, finite, and symmetric.
    // - Empty states are rejected before touching the priors.
    // - Unused vocabulary under an asymmetric beta is clamped and reported
    //   when the hyperprior is off.
    // - An ever-growing beta stops at the ceiling and is reported.

    fn state_from(
        docs: Vec<Vec<usize>>, vocab: usize, z: Vec<Vec<usize>>, num_topics: usize,
        alpha: DirichletPrior, beta: DirichletPrior,
    ) -> (Corpus, ModelState) {
        let corpus = Corpus::new(docs, vocab).unwrap();
        let state = ModelState::from_assignments(&corpus, num_topics, z, alpha, beta).unwrap();
        (corpus, state)
    }

    #[test]
    // Purpose
    // -------
    // A symmetric update yields a positive finite symmetric prior.
    //
    // Given
    // -----
    // - Two topics cleanly separated over a 4-word vocabulary.
    //
    // Expect
    // ------
    // - Both priors stay symmetric, positive, finite; no clamps; record
    //   carries the post-update values.
    fn symmetric_update_keeps_priors_positive_and_symmetric() {
        // Arrange
        let docs = vec![vec![0, 1, 0, 1], vec![2, 3, 3, 2], vec![0, 0, 3, 2]];
        let z = vec![vec![0, 0, 0, 0], vec![1, 1, 1, 1], vec![0, 0, 1, 1]];
        let (_, mut state) = state_from(
            docs,
            4,
            z,
            2,
            DirichletPrior::symmetric(ALPHA, 0.1, 2).unwrap(),
            DirichletPrior::symmetric(BETA, 0.01, 4).unwrap(),
        );
        let opt = HyperparameterOptimizer::new(FixedPointOptions::default()).unwrap();

        // Act
        let (update, clamps) = opt.update(&mut state, 10).unwrap();

        // Assert
        assert!(state.alpha().is_symmetric() && state.beta().is_symmetric());
        assert!(state.alpha().get(0) > 0.0 && state.alpha().get(0).is_finite());
        assert!(state.beta().get(0) > 0.0 && state.beta().get(0).is_finite());
        assert!(clamps.is_empty());
        assert_eq!(update.sweep, 10);
        assert_eq!(update.alpha, state.alpha().to_array());
        assert_eq!(update.beta, state.beta().to_array());
        assert!(update.iterations >= 1);
    }

    #[test]
    // Purpose
    // -------
    // States without tokens are rejected and priors stay put.
    fn update_rejects_state_without_tokens() {
        let (_, mut state) = state_from(
            vec![vec![], vec![]],
            3,
            vec![vec![], vec![]],
            2,
            DirichletPrior::symmetric(ALPHA, 0.5, 2).unwrap(),
            DirichletPrior::symmetric(BETA, 0.5, 3).unwrap(),
        );
        let before = state.clone();
        let opt = HyperparameterOptimizer::new(FixedPointOptions::default()).unwrap();

        assert_eq!(opt.update(&mut state, 1), Err(LDAError::NoTokensToOptimize));
        assert_eq!(state, before);
    }

    #[test]
    // Purpose
    // -------
    // A word never observed drives its asymmetric beta component to zero,
    // which is clamped and reported.
    //
    // Given
    // -----
    // - Vocabulary of 3 where word 2 never occurs; asymmetric beta;
    //   plain maximum-likelihood updates (hyperprior off).
    //
    // Expect
    // ------
    // - One `beta` clamp event for component 2; beta[2] equals the floor.
    fn unobserved_word_is_clamped_under_asymmetric_beta() {
        let docs = vec![vec![0, 1, 0], vec![1, 1, 0]];
        let z = vec![vec![0, 0, 0], vec![0, 0, 0]];
        let (_, mut state) = state_from(
            docs,
            3,
            z,
            1,
            DirichletPrior::symmetric(ALPHA, 1.0, 1).unwrap(),
            DirichletPrior::asymmetric(BETA, Array1::from_elem(3, 0.5), 3).unwrap(),
        );
        let opts = FixedPointOptions::default().with_hyperprior(1.0, 0.0).unwrap();
        let opt = HyperparameterOptimizer::new(opts).unwrap();

        let (_, clamps) = opt.update(&mut state, 5).unwrap();

        let beta_clamps: Vec<_> = clamps.iter().filter(|c| c.prior == BETA).collect();
        assert_eq!(beta_clamps.len(), 1);
        assert_eq!(beta_clamps[0].component, 2);
        assert_eq!(beta_clamps[0].sweep, 5);
        assert_eq!(state.beta().get(2), opts.floor);
        assert!(state.beta().get(0) > opts.floor);
    }

    #[test]
    // Purpose
    // -------
    // Beta components whose likelihood keeps rising stop at the ceiling and
    // are reported next to the floor clamp.
    //
    // Given
    // -----
    // - Same single-topic state as above; ceiling 50, hyperprior off.
    //
    // Expect
    // ------
    // - Beta becomes (50, 50, floor); clamp events for components 0 and 1 at
    //   the ceiling and component 2 at the floor; the update converged.
    fn growing_beta_is_clamped_to_ceiling() {
        let docs = vec![vec![0, 1, 0], vec![1, 1, 0]];
        let z = vec![vec![0, 0, 0], vec![0, 0, 0]];
        let (_, mut state) = state_from(
            docs,
            3,
            z,
            1,
            DirichletPrior::symmetric(ALPHA, 1.0, 1).unwrap(),
            DirichletPrior::asymmetric(BETA, Array1::from_elem(3, 0.5), 3).unwrap(),
        );
        let opts = FixedPointOptions::default()
            .with_ceiling(50.0)
            .and_then(|o| o.with_hyperprior(1.0, 0.0))
            .unwrap();
        let opt = HyperparameterOptimizer::new(opts).unwrap();

        let (update, clamps) = opt.update(&mut state, 7).unwrap();

        assert_eq!(state.beta().to_array(), ndarray::array![50.0, 50.0, opts.floor]);
        let beta_clamps: Vec<(usize, f64)> = clamps
            .iter()
            .filter(|c| c.prior == BETA)
            .map(|c| (c.component, c.clamped_to))
            .collect();
        assert_eq!(beta_clamps, vec![(0, 50.0), (1, 50.0), (2, opts.floor)]);
        assert!(clamps.iter().all(|c| c.sweep == 7));
        assert!(update.converged);
    }
}
