//! Eigen backends for the leading eigenpair of a symmetric dense matrix
//! (C2, §4.2).

pub mod jacobi;
pub mod power_iteration;

use crate::errors::EigenError;
use crate::matrix::PackedSymmetricMatrix;

/// Selects which eigen backend [`leading_eigenpair`] dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EigenMethod {
    /// Power iteration with positive-shift fallback (§4.2); the default,
    /// production backend.
    #[default]
    Power,
    /// Full cyclic-Jacobi diagonalization; validation-only, used on small
    /// N to cross-check [`EigenMethod::Power`].
    FullEvd,
}

/// Computes the most-positive eigenpair of `a` using the given backend.
///
/// # Errors
///
/// Returns [`EigenError::EmptySystem`] if `a` has order zero.
pub fn leading_eigenpair(
    a: &PackedSymmetricMatrix,
    method: EigenMethod,
) -> Result<(f64, Vec<f64>), EigenError> {
    match method {
        EigenMethod::Power => power_iteration::leading_eigenpair(a),
        EigenMethod::FullEvd => jacobi::leading_eigenpair(a),
    }
}
