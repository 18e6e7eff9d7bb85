//! Log evidence `log P(w, z | alpha, beta)` of the current sampler state.
//!
//! With `A = Σ_k alpha_k` and `B = Σ_w beta_w`:
//!
//! ```text
//! Σ_d [ lnΓ(A) − lnΓ(A + N_d) + Σ_k (lnΓ(alpha_k + ndk) − lnΓ(alpha_k)) ]
//! + Σ_k [ lnΓ(B) − lnΓ(B + nk) + Σ_w (lnΓ(beta_w + nkw) − lnΓ(beta_w)) ]
//! ```
//!
//! Cells with a zero count contribute nothing and are skipped. The value is
//! a convergence diagnostic only; it never feeds back into sampling.
use crate::lda::core::{corpus::Corpus, state::ModelState};
use statrs::function::gamma::ln_gamma;

/// Joint log probability of words and assignments under the current priors.
pub fn log_evidence(state: &ModelState, corpus: &Corpus) -> f64 {
    let alpha = state.alpha();
    let beta = state.beta();
    let alpha_sum = alpha.sum();
    let beta_sum = beta.sum();
    let ln_gamma_alpha_sum = ln_gamma(alpha_sum);
    let ln_gamma_beta_sum = ln_gamma(beta_sum);

    let mut total = 0.0;
    for (d, row) in state.doc_topic().rows().into_iter().enumerate() {
        let len = corpus.document(d).len() as f64;
        total += ln_gamma_alpha_sum - ln_gamma(alpha_sum + len);
        for (k, &count) in row.iter().enumerate() {
            if count > 0 {
                let a = alpha.get(k);
                total += ln_gamma(a + count as f64) - ln_gamma(a);
            }
        }
    }

    for (k, row) in state.topic_word().rows().into_iter().enumerate() {
        total += ln_gamma_beta_sum - ln_gamma(beta_sum + state.topic_totals()[k] as f64);
        for (w, &count) in row.iter().enumerate() {
            if count > 0 {
                let b = beta.get(w);
                total += ln_gamma(b + count as f64) - ln_gamma(b);
            }
        }
    }
    total
}
