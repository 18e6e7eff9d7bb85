//! Dirichlet priors for LDA — document-topic `alpha` and topic-word `beta`.
//!
//! Purpose
//! -------
//! Provide a small validated container for a Dirichlet prior that is either
//! symmetric (one concentration value shared by every component) or
//! asymmetric (one value per component), together with the in-place
//! re-estimation entry point used by the hyperparameter optimizer.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every component is finite and strictly positive at all times: at
//!   construction by validation, after re-estimation by clamping.
//! - `dim()` never changes after construction (T for alpha, V for beta).
//! - A symmetric prior stays symmetric under re-estimation.
use crate::{
    lda::errors::{LDAError, LDAResult},
    optimization::{
        errors::{OptError, OptResult},
        hyper_optimizer::{
            DirichletStats, FixedPointOptions, FixedPointOutcome, fixed_point_asymmetric,
            fixed_point_symmetric,
        },
    },
};
use ndarray::Array1;

/// Name used for the document-topic prior in errors and logs.
pub const ALPHA: &str = "alpha";
/// Name used for the topic-word prior in errors and logs.
pub const BETA: &str = "beta";

/// DirichletPrior — symmetric or asymmetric Dirichlet concentration.
#[derive(Debug, Clone, PartialEq)]
pub enum DirichletPrior {
    /// One value shared by `dim` components.
    Symmetric { value: f64, dim: usize },
    /// One value per component.
    Asymmetric { values: Array1<f64> },
}

impl DirichletPrior {
    /// Construct a validated symmetric prior.
    ///
    /// Errors
    /// ------
    /// - `LDAError::InvalidPrior` when `value` is non-finite or `<= 0`.
    /// - `LDAError::PriorDimMismatch` when `dim == 0`.
    pub fn symmetric(name: &'static str, value: f64, dim: usize) -> LDAResult<DirichletPrior> {
        if dim == 0 {
            return Err(LDAError::PriorDimMismatch { name, expected: 1, actual: 0 });
        }
        check_component(name, 0, value)?;
        Ok(DirichletPrior::Symmetric { value, dim })
    }

    /// Construct a validated asymmetric prior of length `dim`.
    ///
    /// Errors
    /// ------
    /// - `LDAError::PriorDimMismatch` when `values.len() != dim`.
    /// - `LDAError::InvalidPrior` for the first non-finite or non-positive entry.
    pub fn asymmetric(
        name: &'static str, values: Array1<f64>, dim: usize,
    ) -> LDAResult<DirichletPrior> {
        if values.len() != dim || dim == 0 {
            return Err(LDAError::PriorDimMismatch { name, expected: dim, actual: values.len() });
        }
        for (index, &value) in values.iter().enumerate() {
            check_component(name, index, value)?;
        }
        Ok(DirichletPrior::Asymmetric { values })
    }

    /// Value of component `k`.
    #[inline]
    pub fn get(&self, k: usize) -> f64 {
        match self {
            DirichletPrior::Symmetric { value, .. } => *value,
            DirichletPrior::Asymmetric { values } => values[k],
        }
    }

    pub fn dim(&self) -> usize {
        match self {
            DirichletPrior::Symmetric { dim, .. } => *dim,
            DirichletPrior::Asymmetric { values } => values.len(),
        }
    }

    /// Total concentration `Σ_k a_k`.
    pub fn sum(&self) -> f64 {
        match self {
            DirichletPrior::Symmetric { value, dim } => value * *dim as f64,
            DirichletPrior::Asymmetric { values } => values.sum(),
        }
    }

    pub fn is_symmetric(&self) -> bool {
        matches!(self, DirichletPrior::Symmetric { .. })
    }

    /// Dense copy of all components.
    pub fn to_array(&self) -> Array1<f64> {
        match self {
            DirichletPrior::Symmetric { value, dim } => Array1::from_elem(*dim, *value),
            DirichletPrior::Asymmetric { values } => values.clone(),
        }
    }

    /// Re-estimate in place from count statistics (Minka's fixed point).
    ///
    /// `stats` must have `self.dim()` components. On error the prior is left
    /// unchanged.
    pub fn reestimate(
        &mut self, stats: &DirichletStats, opts: &FixedPointOptions,
    ) -> OptResult<FixedPointOutcome> {
        match self {
            DirichletPrior::Symmetric { value, dim } => {
                if stats.num_components() != *dim {
                    return Err(OptError::DimMismatch {
                        expected: *dim,
                        found: stats.num_components(),
                    });
                }
                fixed_point_symmetric(value, stats, opts)
            }
            DirichletPrior::Asymmetric { values } => fixed_point_asymmetric(values, stats, opts),
        }
    }
}

fn check_component(name: &'static str, index: usize, value: f64) -> LDAResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(LDAError::InvalidPrior { name, index, value });
    }
    Ok(())
}
