//! Numerical stability utilities.
//!
//! Provides guarded implementations of the scalar quantities needed by
//! collapsed Gibbs sampling and Dirichlet hyperparameter re-estimation.
//!
//! # Provided items
//! - [`WEIGHT_FLOOR`]: smallest value an underflowed sampling weight is
//!   raised to before normalization.
//! - [`DEFAULT_PARAM_FLOOR`], [`DEFAULT_PARAM_CEILING`]: default clamp bounds
//!   for Dirichlet parameters.
//! - [`digamma_increment(x, n)`]: `ψ(x + n) − ψ(x)` for integer `n ≥ 0`.
//! - [`relative_change`], [`max_relative_change`]: convergence measures.
//!
//! # Rationale
//! For small `x` the digamma function behaves like `−1/x`, so evaluating
//! `ψ(x + n)` and `ψ(x)` separately and subtracting loses digits when `n` is
//! small. The recurrence `ψ(x + 1) = ψ(x) + 1/x` gives an exact finite sum
//! for short increments; long increments fall back to `statrs`.
use statrs::function::gamma::digamma;

/// Lower bound applied to a sampling weight that underflowed to exactly zero.
pub const WEIGHT_FLOOR: f64 = f64::MIN_POSITIVE;

/// Default lower clamp for Dirichlet parameters after a fixed-point update.
pub const DEFAULT_PARAM_FLOOR: f64 = 1e-10;

/// Default upper clamp for Dirichlet parameters after a fixed-point update.
pub const DEFAULT_PARAM_CEILING: f64 = 1e4;

/// Increments up to this length are summed directly in [`digamma_increment`].
pub const DIRECT_SUM_CUTOFF: usize = 32;

/// Compute `ψ(x + n) − ψ(x)` for `x > 0` and integer `n ≥ 0`.
///
/// # Parameters
/// - `x`: strictly positive, finite real.
/// - `n`: non-negative integer increment (a count).
///
/// # Returns
/// - `0.0` when `n == 0`.
/// - `Σ_{i=0}^{n-1} 1/(x + i)` when `n ≤ DIRECT_SUM_CUTOFF`.
/// - `ψ(x + n) − ψ(x)` via `statrs` otherwise.
pub fn digamma_increment(x: f64, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    if n <= DIRECT_SUM_CUTOFF {
        (0..n).map(|i| 1.0 / (x + i as f64)).sum()
    } else {
        digamma(x + n as f64) - digamma(x)
    }
}

/// Relative change `|new − old| / |old|`.
///
/// Returns `f64::INFINITY` when `old == 0.0` and `new != old`, and `0.0`
/// when both are equal.
pub fn relative_change(old: f64, new: f64) -> f64 {
    if old == new {
        return 0.0;
    }
    if old == 0.0 {
        return f64::INFINITY;
    }
    ((new - old) / old).abs()
}

/// Largest component-wise [`relative_change`] between two equally long slices.
///
/// Slices of different lengths compare only their common prefix; callers
/// check dimensions beforehand.
pub fn max_relative_change(old: &[f64], new: &[f64]) -> f64 {
    old.iter().zip(new.iter()).map(|(&o, &n)| relative_change(o, n)).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // Check that the direct-sum branch agrees with statrs on a safe grid.
    //
    // Given
    // -----
    // - x in {0.05, 0.5, 3.0}, n in {1, 5, 32}.
    //
    // Expect
    // ------
    // - `digamma_increment(x, n)` ≈ `digamma(x + n) − digamma(x)`.
    fn digamma_increment_matches_statrs_on_grid() {
        for &x in &[0.05_f64, 0.5, 3.0] {
            for &n in &[1_usize, 5, 32] {
                let expected = digamma(x + n as f64) - digamma(x);
                assert_relative_eq!(digamma_increment(x, n), expected, max_relative = 1e-9);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Check the statrs branch and the zero-increment shortcut.
    fn digamma_increment_long_and_zero_increments() {
        let x = 0.7;
        let n = 500;
        let direct: f64 = (0..n).map(|i| 1.0 / (x + i as f64)).sum();
        assert_relative_eq!(digamma_increment(x, n), direct, max_relative = 1e-9);
        assert_eq!(digamma_increment(x, 0), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify relative-change edge cases: equality, zero baseline, max over slices.
    fn relative_change_edge_cases() {
        assert_eq!(relative_change(2.0, 2.0), 0.0);
        assert!(relative_change(0.0, 1.0).is_infinite());
        assert_relative_eq!(relative_change(2.0, 3.0), 0.5);
        assert_relative_eq!(max_relative_change(&[1.0, 4.0], &[1.1, 2.0]), 0.5);
    }
}
