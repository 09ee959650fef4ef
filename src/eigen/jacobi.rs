//! Cyclic Jacobi eigenvalue algorithm (FULL_EVD backend, §4.2).
//!
//! Validation-only: O(N^3) per sweep, used by the engine's own tests to
//! cross-check power iteration on small N, never on the hot path.

use crate::errors::EigenError;
use crate::matrix::PackedSymmetricMatrix;

/// Off-diagonal Frobenius norm convergence tolerance.
const TOLERANCE: f64 = 1e-10;
/// Maximum number of full sweeps over the off-diagonal before giving up.
const MAX_SWEEPS: usize = 100;

/// A dense, row-major `n x n` matrix used internally while accumulating
/// the rotation matrix (eigenvectors are not symmetric in general, so this
/// cannot reuse [`PackedSymmetricMatrix`]).
struct DenseMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    fn identity(n: usize) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self { n, data }
    }

    fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.n + j] = value;
    }

    fn column(&self, j: usize) -> Vec<f64> {
        (0..self.n).map(|i| self.get(i, j)).collect()
    }
}

/// Computes the full eigendecomposition of `a` via cyclic Jacobi
/// rotations, returning all eigenvalues paired with their eigenvectors, in
/// no particular order.
///
/// # Errors
///
/// Returns [`EigenError::EmptySystem`] if `a` has order zero.
pub fn full_eigendecomposition(
    a: &PackedSymmetricMatrix,
) -> Result<Vec<(f64, Vec<f64>)>, EigenError> {
    let n = a.order();
    if n == 0 {
        return Err(EigenError::EmptySystem);
    }

    let mut work = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            work[i * n + j] = a.get(i, j);
        }
    }
    let at = |buf: &[f64], i: usize, j: usize| buf[i * n + j];

    let mut v = DenseMatrix::identity(n);

    for _ in 0..MAX_SWEEPS {
        let off = off_diagonal_norm(&work, n);
        if off < TOLERANCE {
            break;
        }
        for p in 0..n {
            for q in (p + 1)..n {
                let apq = at(&work, p, q);
                if apq.abs() < f64::EPSILON {
                    continue;
                }
                let app = at(&work, p, p);
                let aqq = at(&work, q, q);
                let theta = (aqq - app) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let akp = at(&work, k, p);
                    let akq = at(&work, k, q);
                    work[k * n + p] = c * akp - s * akq;
                    work[k * n + q] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = work[p * n + k];
                    let aqk = work[q * n + k];
                    work[p * n + k] = c * apk - s * aqk;
                    work[q * n + k] = s * apk + c * aqk;
                }
                for k in 0..n {
                    let vkp = v.get(k, p);
                    let vkq = v.get(k, q);
                    v.set(k, p, c * vkp - s * vkq);
                    v.set(k, q, s * vkp + c * vkq);
                }
            }
        }
    }

    Ok((0..n).map(|i| (work[i * n + i], v.column(i))).collect())
}

fn off_diagonal_norm(work: &[f64], n: usize) -> f64 {
    let mut sum = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let v = work[i * n + j];
            sum += 2.0 * v * v;
        }
    }
    sum.sqrt()
}

/// Computes the eigenpair with the algebraically largest eigenvalue,
/// matching the contract of [`crate::eigen::power_iteration::leading_eigenpair`]
/// but via full diagonalization (used to cross-check power iteration).
///
/// # Errors
///
/// Returns [`EigenError::EmptySystem`] if `a` has order zero.
pub fn leading_eigenpair(a: &PackedSymmetricMatrix) -> Result<(f64, Vec<f64>), EigenError> {
    let pairs = full_eigendecomposition(a)?;
    Ok(pairs
        .into_iter()
        .max_by(|(lhs, _), (rhs, _)| lhs.partial_cmp(rhs).expect("eigenvalues are never NaN"))
        .expect("n > 0 guarantees at least one eigenpair"))
}

#[cfg(test)]
mod tests {
    use super::{full_eigendecomposition, leading_eigenpair};
    use crate::matrix::PackedSymmetricMatrix;

    #[test]
    fn diagonal_matrix_eigenvalues_are_its_entries() {
        let mut a = PackedSymmetricMatrix::zeros(3);
        a.set(0, 0, 2.0);
        a.set(1, 1, -1.0);
        a.set(2, 2, 7.0);
        let mut eigenvalues: Vec<f64> = full_eigendecomposition(&a).unwrap().into_iter().map(|(l, _)| l).collect();
        eigenvalues.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((eigenvalues[0] - -1.0).abs() < 1e-8);
        assert!((eigenvalues[1] - 2.0).abs() < 1e-8);
        assert!((eigenvalues[2] - 7.0).abs() < 1e-8);
    }

    #[test]
    fn leading_eigenpair_picks_the_algebraically_largest() {
        let mut a = PackedSymmetricMatrix::zeros(2);
        a.set(0, 0, -3.0);
        a.set(0, 1, 4.0);
        a.set(1, 1, 3.0);
        let (lambda, v) = leading_eigenpair(&a).unwrap();
        assert!(lambda > 0.0, "lambda = {lambda}");
        let norm = (v[0] * v[0] + v[1] * v[1]).sqrt();
        assert!((norm - 1.0).abs() < 1e-8);
    }
}
