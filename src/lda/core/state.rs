//! Model state — topic assignments and the three count tables of collapsed
//! Gibbs LDA.
//!
//! Purpose
//! -------
//! Own the mutable sampler state: one topic per token, the document-topic
//! table `ndk` (D × T), the topic-word table `nkw` (T × V), the per-topic
//! totals `nk` (T), and the current `alpha` / `beta` priors. The sampler
//! mutates this state only through [`ModelState::decrement`] and
//! [`ModelState::increment`], so every count stays consistent with the
//! assignment vector.
//!
//! Key behaviors
//! -------------
//! - Uniform random initialization: each token draws its topic with
//!   `gen_range(0..T)` in document-major, position-minor order, which makes
//!   the initial state a pure function of the seed.
//! - Checked bookkeeping: a decrement that would underflow a count returns
//!   `LDAError::CountUnderflow` instead of wrapping.
//! - Full invariant check ([`ModelState::check_invariants`]) that recomputes
//!   row sums and column sums from the tables and compares them against
//!   document lengths and topic totals.
//!
//! Invariants & assumptions
//! ------------------------
//! - `Σ_k ndk[d,k] == |doc d|` for every document.
//! - `Σ_w nkw[k,w] == nk[k]` for every topic.
//! - `Σ_k nk[k] == N`, the corpus token count.
//! - Every assignment lies in `[0, T)`.
//! - The state is always paired with the corpus it was built from; methods
//!   take that corpus by reference and assume matching shapes.
//!
//! Conventions
//! -----------
//! - Counts are `usize`; tables are `ndarray` arrays indexed `[row, col]`.
//! - No I/O or logging happens here.
use crate::lda::{
    core::{
        corpus::Corpus,
        priors::{ALPHA, BETA, DirichletPrior},
    },
    errors::{LDAError, LDAResult},
};
use ndarray::{Array1, Array2};
use rand::Rng;

/// ModelState — assignments, counts, and priors of a running sampler.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelState {
    assignments: Vec<Vec<usize>>,
    doc_topic: Array2<usize>,
    topic_word: Array2<usize>,
    topic_totals: Array1<usize>,
    pub(crate) alpha: DirichletPrior,
    pub(crate) beta: DirichletPrior,
}

impl ModelState {
    /// Build a randomly initialized state for `corpus`.
    ///
    /// Parameters
    /// ----------
    /// - `corpus`: token ids, all `< corpus.vocab_size()`.
    /// - `num_topics`: T, `>= 1`.
    /// - `alpha`, `beta`: priors of dimension T and V.
    /// - `rng`: the run's single random stream; consumes exactly one draw
    ///   per token.
    ///
    /// Errors
    /// ------
    /// - `LDAError::InvalidNumTopics` when `num_topics == 0`.
    /// - `LDAError::PriorDimMismatch` when a prior has the wrong dimension.
    pub fn new<R: Rng + ?Sized>(
        corpus: &Corpus, num_topics: usize, alpha: DirichletPrior, beta: DirichletPrior,
        rng: &mut R,
    ) -> LDAResult<ModelState> {
        if num_topics == 0 {
            return Err(LDAError::InvalidNumTopics { value: num_topics });
        }
        if alpha.dim() != num_topics {
            return Err(LDAError::PriorDimMismatch {
                name: ALPHA,
                expected: num_topics,
                actual: alpha.dim(),
            });
        }
        if beta.dim() != corpus.vocab_size() {
            return Err(LDAError::PriorDimMismatch {
                name: BETA,
                expected: corpus.vocab_size(),
                actual: beta.dim(),
            });
        }

        let mut doc_topic = Array2::<usize>::zeros((corpus.num_documents(), num_topics));
        let mut topic_word = Array2::<usize>::zeros((num_topics, corpus.vocab_size()));
        let mut topic_totals = Array1::<usize>::zeros(num_topics);
        let mut assignments = Vec::with_capacity(corpus.num_documents());

        for (d, doc) in corpus.documents().iter().enumerate() {
            let mut z_doc = Vec::with_capacity(doc.len());
            for &w in doc {
                let k = rng.gen_range(0..num_topics);
                doc_topic[[d, k]] += 1;
                topic_word[[k, w]] += 1;
                topic_totals[k] += 1;
                z_doc.push(k);
            }
            assignments.push(z_doc);
        }

        Ok(ModelState { assignments, doc_topic, topic_word, topic_totals, alpha, beta })
    }

    /// Rebuild a state from explicit assignments, recomputing every count.
    ///
    /// Errors
    /// ------
    /// - `LDAError::AssignmentShapeMismatch` when the per-document lengths
    ///   differ from the corpus.
    /// - `LDAError::TopicOutOfRange` for any assignment `>= num_topics`.
    /// - `LDAError::PriorDimMismatch` as in [`ModelState::new`].
    pub fn from_assignments(
        corpus: &Corpus, num_topics: usize, assignments: Vec<Vec<usize>>, alpha: DirichletPrior,
        beta: DirichletPrior,
    ) -> LDAResult<ModelState> {
        if num_topics == 0 {
            return Err(LDAError::InvalidNumTopics { value: num_topics });
        }
        if alpha.dim() != num_topics || beta.dim() != corpus.vocab_size() {
            let (name, expected, actual) = if alpha.dim() != num_topics {
                (ALPHA, num_topics, alpha.dim())
            } else {
                (BETA, corpus.vocab_size(), beta.dim())
            };
            return Err(LDAError::PriorDimMismatch { name, expected, actual });
        }
        if assignments.len() != corpus.num_documents() {
            return Err(LDAError::AssignmentShapeMismatch {
                doc: assignments.len().min(corpus.num_documents()),
                expected: corpus.num_documents(),
                actual: assignments.len(),
            });
        }

        let mut doc_topic = Array2::<usize>::zeros((corpus.num_documents(), num_topics));
        let mut topic_word = Array2::<usize>::zeros((num_topics, corpus.vocab_size()));
        let mut topic_totals = Array1::<usize>::zeros(num_topics);
        for (d, (doc, z_doc)) in corpus.documents().iter().zip(&assignments).enumerate() {
            if doc.len() != z_doc.len() {
                return Err(LDAError::AssignmentShapeMismatch {
                    doc: d,
                    expected: doc.len(),
                    actual: z_doc.len(),
                });
            }
            for (&w, &k) in doc.iter().zip(z_doc) {
                if k >= num_topics {
                    return Err(LDAError::TopicOutOfRange { topic: k, num_topics });
                }
                doc_topic[[d, k]] += 1;
                topic_word[[k, w]] += 1;
                topic_totals[k] += 1;
            }
        }

        Ok(ModelState { assignments, doc_topic, topic_word, topic_totals, alpha, beta })
    }

    /// Remove token `(d, i)` from the counts and return its topic.
    ///
    /// The assignment itself is left in place until [`ModelState::increment`]
    /// overwrites it.
    ///
    /// Errors
    /// ------
    /// - `LDAError::CountUnderflow` when any of the three counts is already 0.
    pub fn decrement(&mut self, corpus: &Corpus, d: usize, i: usize) -> LDAResult<usize> {
        let k = self.assignments[d][i];
        let w = corpus.document(d)[i];
        let underflow = || LDAError::CountUnderflow { doc: d, pos: i, topic: k };

        let ndk = self.doc_topic[[d, k]].checked_sub(1).ok_or_else(underflow)?;
        let nkw = self.topic_word[[k, w]].checked_sub(1).ok_or_else(underflow)?;
        let nk = self.topic_totals[k].checked_sub(1).ok_or_else(underflow)?;

        self.doc_topic[[d, k]] = ndk;
        self.topic_word[[k, w]] = nkw;
        self.topic_totals[k] = nk;
        Ok(k)
    }

    /// Assign token `(d, i)` to `topic` and add it to the counts.
    ///
    /// Errors
    /// ------
    /// - `LDAError::TopicOutOfRange` when `topic >= T`.
    pub fn increment(
        &mut self, corpus: &Corpus, d: usize, i: usize, topic: usize,
    ) -> LDAResult<()> {
        if topic >= self.num_topics() {
            return Err(LDAError::TopicOutOfRange { topic, num_topics: self.num_topics() });
        }
        let w = corpus.document(d)[i];
        self.assignments[d][i] = topic;
        self.doc_topic[[d, topic]] += 1;
        self.topic_word[[topic, w]] += 1;
        self.topic_totals[topic] += 1;
        Ok(())
    }

    /// Recompute and compare every count invariant.
    ///
    /// Errors
    /// ------
    /// - `LDAError::AssignmentShapeMismatch` for a document whose assignment
    ///   vector length differs from the document length.
    /// - `LDAError::TopicOutOfRange` for any assignment `>= T`.
    /// - `LDAError::DocCountMismatch` when a `ndk` row does not sum to the
    ///   document length.
    /// - `LDAError::TopicTotalMismatch` when a `nkw` row does not sum to `nk`.
    pub fn check_invariants(&self, corpus: &Corpus) -> LDAResult<()> {
        let num_topics = self.num_topics();
        for (d, (doc, z_doc)) in corpus.documents().iter().zip(&self.assignments).enumerate() {
            if doc.len() != z_doc.len() {
                return Err(LDAError::AssignmentShapeMismatch {
                    doc: d,
                    expected: doc.len(),
                    actual: z_doc.len(),
                });
            }
            if let Some(&topic) = z_doc.iter().find(|&&k| k >= num_topics) {
                return Err(LDAError::TopicOutOfRange { topic, num_topics });
            }
            let actual = self.doc_topic.row(d).sum();
            if actual != doc.len() {
                return Err(LDAError::DocCountMismatch { doc: d, expected: doc.len(), actual });
            }
        }
        for (k, row) in self.topic_word.rows().into_iter().enumerate() {
            let row_sum = row.sum();
            if row_sum != self.topic_totals[k] {
                return Err(LDAError::TopicTotalMismatch {
                    topic: k,
                    total: self.topic_totals[k],
                    row_sum,
                });
            }
        }
        Ok(())
    }

    pub fn num_topics(&self) -> usize {
        self.topic_totals.len()
    }

    pub fn num_documents(&self) -> usize {
        self.doc_topic.nrows()
    }

    pub fn vocab_size(&self) -> usize {
        self.topic_word.ncols()
    }

    /// Total number of assigned tokens, `Σ_k nk[k]`.
    pub fn num_tokens(&self) -> usize {
        self.topic_totals.sum()
    }

    pub fn assignments(&self) -> &[Vec<usize>] {
        &self.assignments
    }

    /// Document-topic counts, D × T.
    pub fn doc_topic(&self) -> &Array2<usize> {
        &self.doc_topic
    }

    /// Topic-word counts, T × V.
    pub fn topic_word(&self) -> &Array2<usize> {
        &self.topic_word
    }

    pub fn topic_totals(&self) -> &Array1<usize> {
        &self.topic_totals
    }

    pub fn alpha(&self) -> &DirichletPrior {
        &self.alpha
    }

    pub fn beta(&self) -> &DirichletPrior {
        &self.beta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    // Scope
    // -----
    // - Random initialization respects every count invariant.
    // - decrement/increment round-trip restores the tables.
    // - Underflow and out-of-range topics are reported, not wrapped.
    // - check_invariants detects hand-corrupted tables.

    fn toy_corpus() -> Corpus {
        Corpus::new(vec![vec![0, 1, 2, 0], vec![3, 4, 3], vec![0, 2, 4, 1, 3]], 5).unwrap()
    }

    fn priors(num_topics: usize, vocab: usize) -> (DirichletPrior, DirichletPrior) {
        (
            DirichletPrior::symmetric(ALPHA, 0.1, num_topics).unwrap(),
            DirichletPrior::symmetric(BETA, 0.01, vocab).unwrap(),
        )
    }

    #[test]
    // Purpose
    // -------
    // Random initialization yields consistent tables.
    //
    // Given
    // -----
    // - Toy corpus with lengths 4, 3, 5 and T = 2.
    //
    // Expect
    // ------
    // - Row sums of ndk equal 4, 3, 5; total assigned tokens equal 12;
    //   `check_invariants` passes.
    fn new_builds_consistent_counts() {
        // Arrange
        let corpus = toy_corpus();
        let (alpha, beta) = priors(2, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        // Act
        let state = ModelState::new(&corpus, 2, alpha, beta, &mut rng).unwrap();

        // Assert
        let sums: Vec<usize> = state.doc_topic().rows().into_iter().map(|r| r.sum()).collect();
        assert_eq!(sums, vec![4, 3, 5]);
        assert_eq!(state.num_tokens(), 12);
        assert_eq!(state.topic_word().sum(), 12);
        assert!(state.check_invariants(&corpus).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Decrement followed by increment with the same topic is the identity.
    fn decrement_then_increment_restores_state() {
        let corpus = toy_corpus();
        let (alpha, beta) = priors(3, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut state = ModelState::new(&corpus, 3, alpha, beta, &mut rng).unwrap();
        let before = state.clone();

        let k = state.decrement(&corpus, 2, 3).unwrap();
        assert_eq!(state.num_tokens(), 11);
        state.increment(&corpus, 2, 3, k).unwrap();

        assert_eq!(state, before);
    }

    #[test]
    // Purpose
    // -------
    // Moving a token to another topic keeps invariants and relocates counts.
    fn reassignment_moves_counts_between_topics() {
        let corpus = toy_corpus();
        let (alpha, beta) = priors(2, 5);
        let assignments = vec![vec![0, 0, 0, 0], vec![1, 1, 1], vec![0, 1, 0, 1, 0]];
        let mut state =
            ModelState::from_assignments(&corpus, 2, assignments, alpha, beta).unwrap();

        let k = state.decrement(&corpus, 0, 1).unwrap();
        assert_eq!(k, 0);
        state.increment(&corpus, 0, 1, 1).unwrap();

        assert_eq!(state.doc_topic()[[0, 0]], 3);
        assert_eq!(state.doc_topic()[[0, 1]], 1);
        assert_eq!(state.topic_word()[[1, 1]], 2);
        assert_eq!(state.assignments()[0][1], 1);
        assert!(state.check_invariants(&corpus).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // A double decrement of the same token underflows and is reported.
    fn double_decrement_reports_underflow() {
        let corpus = Corpus::new(vec![vec![0]], 1).unwrap();
        let (alpha, beta) = priors(1, 1);
        let mut state =
            ModelState::from_assignments(&corpus, 1, vec![vec![0]], alpha, beta).unwrap();

        state.decrement(&corpus, 0, 0).unwrap();
        let err = state.decrement(&corpus, 0, 0).unwrap_err();

        assert_eq!(err, LDAError::CountUnderflow { doc: 0, pos: 0, topic: 0 });
    }

    #[test]
    // Purpose
    // -------
    // Out-of-range topics are rejected on increment and on rebuild.
    fn out_of_range_topic_is_rejected() {
        let corpus = toy_corpus();
        let (alpha, beta) = priors(2, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut state =
            ModelState::new(&corpus, 2, alpha.clone(), beta.clone(), &mut rng).unwrap();
        state.decrement(&corpus, 0, 0).unwrap();

        assert_eq!(
            state.increment(&corpus, 0, 0, 2),
            Err(LDAError::TopicOutOfRange { topic: 2, num_topics: 2 })
        );

        let bad = vec![vec![0, 0, 0, 5], vec![1, 1, 1], vec![0, 0, 0, 0, 0]];
        assert_eq!(
            ModelState::from_assignments(&corpus, 2, bad, alpha, beta),
            Err(LDAError::TopicOutOfRange { topic: 5, num_topics: 2 })
        );
    }

    #[test]
    // Purpose
    // -------
    // `check_invariants` notices a dangling decrement.
    //
    // Given
    // -----
    // - A valid state where one token was decremented but not re-added.
    //
    // Expect
    // ------
    // - `DocCountMismatch` for the affected document.
    fn check_invariants_detects_missing_token() {
        let corpus = toy_corpus();
        let (alpha, beta) = priors(2, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut state = ModelState::new(&corpus, 2, alpha, beta, &mut rng).unwrap();

        state.decrement(&corpus, 1, 0).unwrap();

        assert_eq!(
            state.check_invariants(&corpus),
            Err(LDAError::DocCountMismatch { doc: 1, expected: 3, actual: 2 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Prior dimensions must match T and V.
    fn new_rejects_prior_dimension_mismatch() {
        let corpus = toy_corpus();
        let (alpha, _) = priors(3, 5);
        let (_, beta) = priors(2, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let err = ModelState::new(&corpus, 2, alpha, beta, &mut rng).unwrap_err();

        assert_eq!(err, LDAError::PriorDimMismatch { name: ALPHA, expected: 2, actual: 3 });
    }
}
