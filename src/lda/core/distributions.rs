//! Point estimates derived from the count tables.
//!
//! - `theta[d,k] = (ndk[d,k] + alpha[k]) / (N_d + Σ alpha)` (D × T)
//! - `phi[k,w]   = (nkw[k,w] + beta[w]) / (nk[k] + Σ beta)` (T × V)
//!
//! Every row of either matrix sums to 1 up to rounding, including rows of
//! empty documents and unused topics, which fall back to the normalized
//! prior.
use crate::lda::core::state::ModelState;
use ndarray::{Array2, ArrayView1};
use std::cmp::Ordering;

/// Document-topic distribution, D × T.
pub fn theta(state: &ModelState) -> Array2<f64> {
    let alpha = state.alpha();
    let alpha_sum = alpha.sum();
    let counts = state.doc_topic();
    let mut out = Array2::<f64>::zeros(counts.raw_dim());
    for (mut out_row, row) in out.rows_mut().into_iter().zip(counts.rows()) {
        let denom = row.sum() as f64 + alpha_sum;
        for (k, (o, &c)) in out_row.iter_mut().zip(row.iter()).enumerate() {
            *o = (c as f64 + alpha.get(k)) / denom;
        }
    }
    out
}

/// Topic-word distribution, T × V.
pub fn phi(state: &ModelState) -> Array2<f64> {
    let beta = state.beta();
    let beta_sum = beta.sum();
    let counts = state.topic_word();
    let totals = state.topic_totals();
    let mut out = Array2::<f64>::zeros(counts.raw_dim());
    for (k, (mut out_row, row)) in out.rows_mut().into_iter().zip(counts.rows()).enumerate() {
        let denom = totals[k] as f64 + beta_sum;
        for (w, (o, &c)) in out_row.iter_mut().zip(row.iter()).enumerate() {
            *o = (c as f64 + beta.get(w)) / denom;
        }
    }
    out
}

/// The `n` most probable words of every topic.
///
/// Words are ordered by descending probability, ties by ascending index;
/// `n` larger than V returns all V words.
pub fn top_words(phi: &Array2<f64>, n: usize) -> Vec<Vec<usize>> {
    phi.rows().into_iter().map(|row| top_indices(row, n)).collect()
}

fn top_indices(row: ArrayView1<'_, f64>, n: usize) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..row.len()).collect();
    idx.sort_by(|&a, &b| row[b].partial_cmp(&row[a]).unwrap_or(Ordering::Equal).then(a.cmp(&b)));
    idx.truncate(n);
    idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lda::core::{
        corpus::Corpus,
        priors::{ALPHA, BETA, DirichletPrior},
    };
    use approx::assert_relative_eq;
    use ndarray::array;

    // Scope
    // -----
    // - Row normalization of theta and phi, including empty rows.
    // - Exact values on a hand-computed state.
    // - Ordering and truncation of top_words.

    fn state() -> ModelState {
        let corpus = Corpus::new(vec![vec![0, 0, 1], vec![]], 3).unwrap();
        ModelState::from_assignments(
            &corpus,
            2,
            vec![vec![0, 0, 1], vec![]],
            DirichletPrior::symmetric(ALPHA, 0.5, 2).unwrap(),
            DirichletPrior::symmetric(BETA, 1.0, 3).unwrap(),
        )
        .unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Hand-computed theta and phi.
    //
    // Given
    // -----
    // - Document 0 = [0, 0, 1] with z = [0, 0, 1]; document 1 empty;
    //   alpha = 0.5, beta = 1.0, V = 3.
    //
    // Expect
    // ------
    // - theta[0] = (2.5, 1.5) / 4, theta[1] = (0.5, 0.5).
    // - phi[0] = (3, 1, 1) / 5, phi[1] = (1, 2, 1) / 4.
    fn theta_and_phi_match_hand_computation() {
        let state = state();

        let theta = theta(&state);
        let phi = phi(&state);

        let expected_theta = array![[0.625, 0.375], [0.5, 0.5]];
        let expected_phi = array![[0.6, 0.2, 0.2], [0.25, 0.5, 0.25]];
        for (got, want) in theta.iter().zip(expected_theta.iter()) {
            assert_relative_eq!(*got, *want, epsilon = 1e-12);
        }
        for (got, want) in phi.iter().zip(expected_phi.iter()) {
            assert_relative_eq!(*got, *want, epsilon = 1e-12);
        }
        for row in theta.rows().into_iter().chain(phi.rows()) {
            assert_relative_eq!(row.sum(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ordering by descending probability with ascending-index tie break.
    fn top_words_orders_and_breaks_ties_by_index() {
        let phi = array![[0.2, 0.5, 0.1, 0.2], [0.25, 0.25, 0.25, 0.25]];

        assert_eq!(top_words(&phi, 3), vec![vec![1, 0, 3], vec![0, 1, 2]]);
        assert_eq!(top_words(&phi, 10)[0], vec![1, 0, 3, 2]);
        assert_eq!(top_words(&phi, 0), vec![Vec::<usize>::new(), Vec::new()]);
    }
}
