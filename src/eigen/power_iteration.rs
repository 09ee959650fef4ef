//! Power iteration with positive-shift fallback (§4.2).

use crate::errors::EigenError;
use crate::matrix::PackedSymmetricMatrix;

/// Maximum number of power-iteration passes before giving up.
pub const MAX_ITERATIONS: usize = 50_000;
/// Below this residual norm, the candidate eigenvalue is treated as zero
/// and the system as indivisible.
pub const EPS: f64 = 1e-5;
/// Convergence tolerance on the largest per-component change between
/// successive iterates.
pub const DTA: f64 = 1e-5;

/// The deterministic seed vector `u⁽⁰⁾_i = 1 / sqrt(i + 1)`, unnormalized
/// (normalization happens after the first multiply).
fn seed(order: usize) -> Vec<f64> {
    (0..order).map(|i| 1.0 / ((i + 1) as f64).sqrt()).collect()
}

fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// The signed element of `y` with the largest absolute value (§4.2 step
/// 2): unlike the L2 norm, this preserves the sign of the dominant
/// component, which is what lets the per-iteration pivot double as the
/// eigenvalue estimate.
fn pivot(y: &[f64]) -> f64 {
    y.iter().copied().fold(0.0, |acc, x| if x.abs() > acc.abs() { x } else { acc })
}

/// Runs raw power iteration on `a`, without the positive-shift fallback.
///
/// Per §4.2 step 2: each pass multiplies by `a`, pivots on the
/// largest-magnitude signed component (not the L2 norm — that would
/// destroy the sign information the positive-shift decision in
/// [`leading_eigenpair`] depends on), and divides by that pivot so it
/// becomes exactly `±1`. If the pivot collapses below [`EPS`], returns
/// `(0.0, u)` for the caller to treat as indivisible. On convergence
/// (max per-component change below [`DTA`]) the eigenvector is rescaled
/// to unit length before being returned. If the iteration fails to
/// converge within [`MAX_ITERATIONS`] passes and the final step size
/// still exceeds `1.0`, the returned eigenvalue's sign is flipped as a
/// non-convergence signal to the caller (§4.2 step 3).
fn power_iterate(a: &PackedSymmetricMatrix) -> (f64, Vec<f64>) {
    let order = a.order();
    let mut u = seed(order);
    let initial_norm = norm(&u);
    for x in &mut u {
        *x /= initial_norm;
    }

    let mut beta = 0.0;
    let mut phi = f64::INFINITY;
    for _ in 0..MAX_ITERATIONS {
        let y_raw = a.mul_vec(&u);
        beta = pivot(&y_raw);
        if beta.abs() < EPS {
            return (0.0, u);
        }
        let y: Vec<f64> = y_raw.iter().map(|yi| yi / beta).collect();
        phi = y.iter().zip(&u).map(|(yi, ui)| (yi - ui).abs()).fold(0.0, f64::max);
        if phi < DTA {
            let n = norm(&y);
            return (beta, y.iter().map(|yi| yi / n).collect());
        }
        u = y;
    }
    if phi > 1.0 {
        (-beta, u)
    } else {
        (beta, u)
    }
}

/// Computes the most-positive eigenpair of the symmetric matrix `a`,
/// applying the positive-shift fallback when raw power iteration yields a
/// negative eigenvalue (§4.2).
///
/// # Errors
///
/// Returns [`EigenError::EmptySystem`] if `a` has order zero.
pub fn leading_eigenpair(a: &PackedSymmetricMatrix) -> Result<(f64, Vec<f64>), EigenError> {
    if a.order() == 0 {
        return Err(EigenError::EmptySystem);
    }
    let (beta, v) = power_iterate(a);
    if beta >= 0.0 {
        return Ok((beta, v));
    }

    let shift = beta.abs();
    let mut shifted = a.clone();
    for i in 0..shifted.order() {
        shifted.add_assign(i, i, shift);
    }
    let (beta_prime, v_prime) = power_iterate(&shifted);
    Ok((beta_prime - shift, v_prime))
}

#[cfg(test)]
mod tests {
    use super::leading_eigenpair;
    use crate::matrix::PackedSymmetricMatrix;

    #[test]
    fn finds_the_leading_eigenpair_of_a_diagonal_matrix() {
        let mut a = PackedSymmetricMatrix::zeros(3);
        a.set(0, 0, 5.0);
        a.set(1, 1, 1.0);
        a.set(2, 2, -2.0);
        let (lambda, v) = leading_eigenpair(&a).unwrap();
        assert!((lambda - 5.0).abs() < 1e-4, "lambda = {lambda}");
        assert!(v[0].abs() > 0.99, "v = {v:?}");
    }

    #[test]
    fn applies_the_positive_shift_fallback_for_all_negative_spectra() {
        let mut a = PackedSymmetricMatrix::zeros(2);
        a.set(0, 0, -1.0);
        a.set(1, 1, -5.0);
        let (lambda, _v) = leading_eigenpair(&a).unwrap();
        assert!((lambda - -1.0).abs() < 1e-3, "lambda = {lambda}");
    }

    #[test]
    fn empty_matrix_is_rejected() {
        let a = PackedSymmetricMatrix::zeros(0);
        assert!(leading_eigenpair(&a).is_err());
    }
}
