//! hyper_optimizer::validation — input guards for the fixed-point layer.
//!
//! All checks return [`OptError`] values instead of panicking so the model
//! layer can surface configuration mistakes before any iteration runs.
use crate::optimization::{
    errors::{OptError, OptResult},
    hyper_optimizer::types::DirichletStats,
};

/// Iteration cap must be at least one.
pub fn verify_max_iter(max_iter: usize) -> OptResult<()> {
    if max_iter == 0 {
        return Err(OptError::InvalidMaxIter {
            max_iter,
            reason: "At least one iteration is required.",
        });
    }
    Ok(())
}

/// Tolerance must be finite and strictly positive.
pub fn verify_tol(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidTolerance { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidTolerance { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

/// Clamp floor must be finite and strictly positive.
pub fn verify_floor(floor: f64) -> OptResult<()> {
    if !floor.is_finite() {
        return Err(OptError::InvalidFloor { floor, reason: "Floor must be finite." });
    }
    if floor <= 0.0 {
        return Err(OptError::InvalidFloor { floor, reason: "Floor must be positive." });
    }
    Ok(())
}

/// Clamp ceiling must be finite and strictly above the floor.
pub fn verify_ceiling(ceiling: f64, floor: f64) -> OptResult<()> {
    if !ceiling.is_finite() {
        return Err(OptError::InvalidCeiling {
            ceiling,
            floor,
            reason: "Ceiling must be finite.",
        });
    }
    if ceiling <= floor {
        return Err(OptError::InvalidCeiling {
            ceiling,
            floor,
            reason: "Ceiling must exceed the floor.",
        });
    }
    Ok(())
}

/// Gamma hyperprior needs finite `shape >= 1` and finite `rate >= 0`.
///
/// `shape < 1` would let the update numerator go negative for components
/// without observations.
pub fn verify_hyperprior(shape: f64, rate: f64) -> OptResult<()> {
    if !shape.is_finite() || !rate.is_finite() {
        return Err(OptError::InvalidHyperprior {
            shape,
            rate,
            reason: "Shape and rate must be finite.",
        });
    }
    if shape < 1.0 {
        return Err(OptError::InvalidHyperprior { shape, rate, reason: "Shape must be >= 1." });
    }
    if rate < 0.0 {
        return Err(OptError::InvalidHyperprior { shape, rate, reason: "Rate must be >= 0." });
    }
    Ok(())
}

/// Starting parameters must be finite and strictly positive.
pub fn validate_params<'a>(params: impl IntoIterator<Item = &'a f64>) -> OptResult<()> {
    for (index, &value) in params.into_iter().enumerate() {
        if !value.is_finite() || value <= 0.0 {
            return Err(OptError::InvalidParameter { index, value });
        }
    }
    Ok(())
}

/// Statistics must be non-empty and have exactly `dim` components.
pub fn validate_stats(stats: &DirichletStats, dim: usize) -> OptResult<()> {
    if stats.num_components() != dim {
        return Err(OptError::DimMismatch { expected: dim, found: stats.num_components() });
    }
    if stats.is_empty() {
        return Err(OptError::EmptyStatistics);
    }
    Ok(())
}
