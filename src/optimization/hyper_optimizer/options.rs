//! hyper_optimizer::options — stopping rules, clamp bounds and the gamma
//! hyperprior for the fixed point.
use crate::optimization::{
    errors::OptResult,
    hyper_optimizer::validation::{
        verify_ceiling, verify_floor, verify_hyperprior, verify_max_iter, verify_tol,
    },
    numerical_stability::{DEFAULT_PARAM_CEILING, DEFAULT_PARAM_FLOOR},
};

/// FixedPointOptions — configuration of one Minka fixed-point run.
///
/// Fields
/// ------
/// - `max_iter`: `usize`
///   Hard cap on iterations; guarantees termination.
/// - `tol`: `f64`
///   Convergence threshold on the largest component-wise relative change.
/// - `floor`: `f64`
///   Value a non-positive or non-finite component is clamped to.
/// - `ceiling`: `f64`
///   Value a component that overshoots is clamped to.
/// - `shape`, `rate`: `f64`
///   Gamma(shape, rate) hyperprior on every component. The update becomes
///   the MAP fixed point
///   `a ← (a · num(a) + shape − 1) / (den(a) + rate)`; `shape = 1`,
///   `rate = 0` recovers the plain maximum-likelihood iteration.
///
/// Invariants
/// ----------
/// - `max_iter >= 1`; `tol` and `floor` are finite and `> 0`.
/// - `floor < ceiling < ∞`.
/// - `shape >= 1` and `rate >= 0`, both finite.
///
/// Notes
/// -----
/// - On sparse or under-dispersed counts the likelihood alone has its
///   optimum at 0 or at infinity. The default hyperprior (`shape` 1.001,
///   `rate` 1) keeps the MAP estimate interior and finite there while
///   leaving well-identified estimates nearly unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPointOptions {
    pub max_iter: usize,
    pub tol: f64,
    pub floor: f64,
    pub ceiling: f64,
    pub shape: f64,
    pub rate: f64,
}

impl FixedPointOptions {
    pub const DEFAULT_MAX_ITER: usize = 1_000;
    pub const DEFAULT_TOL: f64 = 1e-5;
    pub const DEFAULT_SHAPE: f64 = 1.001;
    pub const DEFAULT_RATE: f64 = 1.0;

    /// Construct validated options with the default ceiling and hyperprior.
    ///
    /// Errors
    /// ------
    /// - `OptError::InvalidMaxIter` when `max_iter == 0`.
    /// - `OptError::InvalidTolerance` when `tol` is non-finite or `<= 0`.
    /// - `OptError::InvalidFloor` when `floor` is non-finite or `<= 0`.
    /// - `OptError::InvalidCeiling` when `floor >= DEFAULT_PARAM_CEILING`.
    pub fn new(max_iter: usize, tol: f64, floor: f64) -> OptResult<FixedPointOptions> {
        let opts = FixedPointOptions {
            max_iter,
            tol,
            floor,
            ceiling: DEFAULT_PARAM_CEILING,
            shape: Self::DEFAULT_SHAPE,
            rate: Self::DEFAULT_RATE,
        };
        opts.validate()?;
        Ok(opts)
    }

    /// Replace the clamp ceiling.
    pub fn with_ceiling(mut self, ceiling: f64) -> OptResult<FixedPointOptions> {
        verify_ceiling(ceiling, self.floor)?;
        self.ceiling = ceiling;
        Ok(self)
    }

    /// Replace the gamma hyperprior; `(1.0, 0.0)` turns it off.
    pub fn with_hyperprior(mut self, shape: f64, rate: f64) -> OptResult<FixedPointOptions> {
        verify_hyperprior(shape, rate)?;
        self.shape = shape;
        self.rate = rate;
        Ok(self)
    }

    /// Re-run the constructor checks on a possibly hand-built value.
    pub fn validate(&self) -> OptResult<()> {
        verify_max_iter(self.max_iter)?;
        verify_tol(self.tol)?;
        verify_floor(self.floor)?;
        verify_ceiling(self.ceiling, self.floor)?;
        verify_hyperprior(self.shape, self.rate)
    }
}

impl Default for FixedPointOptions {
    fn default() -> Self {
        FixedPointOptions {
            max_iter: Self::DEFAULT_MAX_ITER,
            tol: Self::DEFAULT_TOL,
            floor: DEFAULT_PARAM_FLOOR,
            ceiling: DEFAULT_PARAM_CEILING,
            shape: Self::DEFAULT_SHAPE,
            rate: Self::DEFAULT_RATE,
        }
    }
}
