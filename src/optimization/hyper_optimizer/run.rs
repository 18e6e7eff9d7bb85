//! hyper_optimizer::run — the fixed-point iterations themselves.
//!
//! Both entry points share the same loop shape: compute the shared
//! denominator from group totals, propose a new value per component, clamp
//! it into `[floor, ceiling]`, and stop once the largest relative change
//! drops below `tol` or `max_iter` is reached.
use crate::optimization::{
    errors::OptResult,
    hyper_optimizer::{
        options::FixedPointOptions,
        types::{CountHistogram, DirichletStats},
        validation::{validate_params, validate_stats},
    },
    numerical_stability::{digamma_increment, relative_change},
};
use ndarray::Array1;

/// A component whose proposed value was replaced by the floor or the ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampRecord {
    /// Component index (always `0` for a symmetric parameter).
    pub component: usize,
    /// Value the update would have produced.
    pub attempted: f64,
    /// Value actually stored.
    pub clamped_to: f64,
}

/// Summary of one fixed-point run.
///
/// `clamps` lists the components clamped in the *final* iteration, so a
/// component that stays pinned at the floor is reported once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedPointOutcome {
    pub iterations: usize,
    pub converged: bool,
    /// Largest component-wise relative change of the last iteration.
    pub final_change: f64,
    pub clamps: Vec<ClampRecord>,
}

/// Re-estimate an asymmetric Dirichlet parameter vector in place.
///
/// Parameters
/// ----------
/// - `params`: `&mut Array1<f64>`
///   Current estimate, one entry per component; overwritten with the result.
/// - `stats`: `&DirichletStats`
///   Sufficient statistics with `params.len()` components.
/// - `opts`: `&FixedPointOptions`
///   Iteration cap, tolerance, clamp bounds, and gamma hyperprior.
///
/// Returns
/// -------
/// `OptResult<FixedPointOutcome>`
///   Iteration count, convergence flag, last relative change, and clamps.
///
/// Errors
/// ------
/// - `OptError::InvalidParameter` for a non-finite or non-positive start.
/// - `OptError::DimMismatch` when `stats` has a different component count.
/// - `OptError::EmptyStatistics` when no group has a positive total.
/// - Option validation errors for a hand-built `opts`.
///
/// Notes
/// -----
/// - Update, with `Δψ(x, n) = ψ(x + n) − ψ(x)` and hyperprior `(s, r)`:
///   `a_k ← (a_k · Σ_n C_k(n) Δψ(a_k, n) + s − 1) / (Σ_n L(n) Δψ(A, n) + r)`.
/// - On error `params` is left untouched.
pub fn fixed_point_asymmetric(
    params: &mut Array1<f64>, stats: &DirichletStats, opts: &FixedPointOptions,
) -> OptResult<FixedPointOutcome> {
    opts.validate()?;
    validate_params(params.iter())?;
    validate_stats(stats, params.len())?;

    let shift = opts.shape - 1.0;
    let mut next = Array1::<f64>::zeros(params.len());
    let mut clamps = Vec::new();
    let mut iterations = 0;
    let mut final_change = f64::INFINITY;
    let mut converged = false;

    while iterations < opts.max_iter {
        iterations += 1;
        clamps.clear();

        let total = params.sum();
        let denom = histogram_increment(&stats.total_hist, total) + opts.rate;
        for (k, hist) in stats.component_hists.iter().enumerate() {
            let current = params[k];
            let proposed = (current * histogram_increment(hist, current) + shift) / denom;
            next[k] = clamp_to_bounds(k, proposed, opts, &mut clamps);
        }

        final_change = params
            .iter()
            .zip(next.iter())
            .map(|(&old, &new)| relative_change(old, new))
            .fold(0.0, f64::max);
        params.assign(&next);

        if final_change < opts.tol {
            converged = true;
            break;
        }
    }

    Ok(FixedPointOutcome { iterations, converged, final_change, clamps })
}

/// Re-estimate a symmetric Dirichlet parameter (one value shared by all
/// `stats.num_components()` components) in place.
///
/// Update:
/// `a ← (a · Σ_k Σ_n C_k(n) Δψ(a, n) + s − 1) / (K · Σ_n L(n) Δψ(K·a, n) + r)`.
/// The hyperprior applies once, to the shared value.
///
/// Errors follow [`fixed_point_asymmetric`].
pub fn fixed_point_symmetric(
    value: &mut f64, stats: &DirichletStats, opts: &FixedPointOptions,
) -> OptResult<FixedPointOutcome> {
    opts.validate()?;
    validate_params(std::iter::once(&*value))?;
    validate_stats(stats, stats.num_components())?;

    let pooled = stats.pooled();
    let dim = stats.num_components() as f64;
    let shift = opts.shape - 1.0;
    let mut clamps = Vec::new();
    let mut iterations = 0;
    let mut final_change = f64::INFINITY;
    let mut converged = false;

    while iterations < opts.max_iter {
        iterations += 1;
        clamps.clear();

        let current = *value;
        let denom = dim * histogram_increment(&stats.total_hist, dim * current) + opts.rate;
        let proposed = (current * histogram_increment(&pooled, current) + shift) / denom;
        let next = clamp_to_bounds(0, proposed, opts, &mut clamps);

        final_change = relative_change(current, next);
        *value = next;

        if final_change < opts.tol {
            converged = true;
            break;
        }
    }

    Ok(FixedPointOutcome { iterations, converged, final_change, clamps })
}

/// `Σ_n mult(n) · [ψ(x + n) − ψ(x)]` over a count histogram.
fn histogram_increment(hist: &CountHistogram, x: f64) -> f64 {
    hist.iter().map(|&(count, mult)| mult as f64 * digamma_increment(x, count)).sum()
}

/// Pull `proposed` into `[floor, ceiling]`.
///
/// Overshooting the ceiling (including `+∞`) and non-positive or NaN
/// proposals are recorded; a positive value below the floor is not.
fn clamp_to_bounds(
    component: usize, proposed: f64, opts: &FixedPointOptions, clamps: &mut Vec<ClampRecord>,
) -> f64 {
    if proposed > opts.ceiling {
        clamps.push(ClampRecord { component, attempted: proposed, clamped_to: opts.ceiling });
        opts.ceiling
    } else if proposed >= opts.floor {
        proposed
    } else if proposed > 0.0 {
        opts.floor
    } else {
        clamps.push(ClampRecord { component, attempted: proposed, clamped_to: opts.floor });
        opts.floor
    }
}
