//! Sampler — one collapsed-Gibbs sweep over every token of a corpus.
//!
//! For document `d` (ascending) and position `i` (ascending) with word `w`:
//! remove the token from the counts, weight every topic `k` by
//!
//! ```text
//! (ndk[d,k] + alpha[k]) * (nkw[k,w] + beta[w]) / (nk[k] + Σ beta)
//! ```
//!
//! draw the new topic by cumulative-sum inversion against one uniform
//! `[0, 1)` draw, and add the token back under that topic.
//!
//! Numerical guards
//! ----------------
//! - A weight that underflows to exactly `0.0` is raised to
//!   [`WEIGHT_FLOOR`] so a distribution never collapses to all zeros.
//! - A negative or non-finite weight, or a total that is non-positive or
//!   non-finite, aborts with `LDAError::NumericalInstability`. Topic 0 is
//!   never returned as a silent fallback.
//! - Before that error is returned the token is put back under its previous
//!   topic, so the counts stay consistent with the assignments.
use crate::{
    lda::{
        core::{corpus::Corpus, state::ModelState},
        errors::{LDAError, LDAResult},
    },
    optimization::numerical_stability::transformations::WEIGHT_FLOOR,
};
use rand::Rng;

/// Sampler — owns the reusable per-topic weight buffer.
#[derive(Debug, Clone, Default)]
pub struct Sampler {
    weights: Vec<f64>,
}

impl Sampler {
    pub fn new(num_topics: usize) -> Sampler {
        Sampler { weights: vec![0.0; num_topics] }
    }

    /// Advance `state` by exactly one sweep.
    ///
    /// Consumes one `f64` draw from `rng` per token, in corpus order.
    ///
    /// Errors
    /// ------
    /// - `LDAError::NumericalInstability` as described in the module docs.
    /// - `LDAError::CountUnderflow` / `LDAError::TopicOutOfRange` if the
    ///   state was corrupted; these indicate bugs.
    pub fn sweep<R: Rng + ?Sized>(
        &mut self, state: &mut ModelState, corpus: &Corpus, rng: &mut R,
    ) -> LDAResult<()> {
        let num_topics = state.num_topics();
        self.weights.resize(num_topics, 0.0);
        let beta_sum = state.beta().sum();

        for (d, doc) in corpus.documents().iter().enumerate() {
            for (i, &w) in doc.iter().enumerate() {
                let previous = state.decrement(corpus, d, i)?;
                let total = self.fill_weights(state, d, w, beta_sum);
                let Some(topic) = self.draw(total, rng.gen::<f64>()) else {
                    state.increment(corpus, d, i, previous)?;
                    return Err(LDAError::NumericalInstability { doc: d, pos: i, total });
                };
                state.increment(corpus, d, i, topic)?;
            }
        }
        Ok(())
    }

    /// Fill the weight buffer for word `w` in document `d` and return the
    /// total, or NaN if any single weight is negative or non-finite.
    fn fill_weights(&mut self, state: &ModelState, d: usize, w: usize, beta_sum: f64) -> f64 {
        let doc_topic = state.doc_topic().row(d);
        let word_col = state.topic_word().column(w);
        let totals = state.topic_totals();
        let alpha = state.alpha();
        let beta_w = state.beta().get(w);

        let mut total = 0.0;
        for (k, weight) in self.weights.iter_mut().enumerate() {
            let mut value = (doc_topic[k] as f64 + alpha.get(k)) * (word_col[k] as f64 + beta_w)
                / (totals[k] as f64 + beta_sum);
            if value == 0.0 {
                value = WEIGHT_FLOOR;
            }
            if !value.is_finite() || value < 0.0 {
                return f64::NAN;
            }
            *weight = value;
            total += value;
        }
        total
    }

    /// Invert the cumulative sum at `u * total`.
    ///
    /// Returns `None` when `total` is not a finite positive number.
    fn draw(&self, total: f64, u: f64) -> Option<usize> {
        if !total.is_finite() || total <= 0.0 {
            return None;
        }
        let target = u * total;
        let mut cumulative = 0.0;
        for (k, &weight) in self.weights.iter().enumerate() {
            cumulative += weight;
            if target < cumulative {
                return Some(k);
            }
        }
        // Rounding can leave target == cumulative; take the last topic with mass.
        self.weights.iter().rposition(|&weight| weight > 0.0)
    }
}
