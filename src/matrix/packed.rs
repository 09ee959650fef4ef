//! Dense symmetric matrix of `f64`, stored as an upper-triangular packed
//! buffer (§9 Design Notes).

/// A symmetric `N x N` matrix of `f64` stored as a packed buffer of length
/// `N(N+1)/2`.
///
/// Only the upper triangle (including the diagonal) is materialized; `get`
/// and `set` transparently mirror across the diagonal, so the matrix can
/// never become asymmetric through its own API.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedSymmetricMatrix {
    order: usize,
    buf: Vec<f64>,
}

impl PackedSymmetricMatrix {
    /// Creates a new matrix of the given order, with every entry set to
    /// zero.
    #[must_use]
    pub fn zeros(order: usize) -> Self {
        Self { order, buf: vec![0.0; packed_len(order)] }
    }

    /// Returns the order (number of rows, equivalently columns) of the
    /// matrix.
    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.order && j < self.order, "index out of bounds");
        let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
        lo + hi * (hi + 1) / 2
    }

    /// Returns the entry at `(i, j)`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.buf[self.index(i, j)]
    }

    /// Sets the entry at `(i, j)` (and, implicitly, at `(j, i)`).
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let idx = self.index(i, j);
        self.buf[idx] = value;
    }

    /// Adds `value` to the entry at `(i, j)` (and, implicitly, at `(j,
    /// i)`).
    pub fn add_assign(&mut self, i: usize, j: usize, value: f64) {
        let idx = self.index(i, j);
        self.buf[idx] += value;
    }

    /// Returns the sum of row `i`, i.e. `sum_j self.get(i, j)`.
    #[must_use]
    pub fn row_sum(&self, i: usize) -> f64 {
        (0..self.order).map(|j| self.get(i, j)).sum()
    }

    /// Computes `y = self * x` for a dense vector `x` of length
    /// [`Self::order`].
    #[must_use]
    pub fn mul_vec(&self, x: &[f64]) -> Vec<f64> {
        debug_assert_eq!(x.len(), self.order);
        (0..self.order).map(|i| (0..self.order).map(|j| self.get(i, j) * x[j]).sum()).collect()
    }

    /// Computes `x^T self x` for a dense vector `x` of length
    /// [`Self::order`].
    #[must_use]
    pub fn quadratic_form(&self, x: &[f64]) -> f64 {
        self.mul_vec(x).iter().zip(x).map(|(yi, xi)| yi * xi).sum()
    }
}

#[must_use]
const fn packed_len(order: usize) -> usize {
    order * (order + 1) / 2
}

#[cfg(feature = "arbitrary")]
impl arbitrary::Arbitrary<'_> for PackedSymmetricMatrix {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let order = u.int_in_range(0..=16usize)?;
        let len = packed_len(order);
        let mut buf = Vec::with_capacity(len);
        for _ in 0..len {
            buf.push(u.arbitrary::<f64>()?);
        }
        Ok(Self { order, buf })
    }
}

#[cfg(test)]
mod tests {
    use super::PackedSymmetricMatrix;

    #[test]
    fn set_mirrors_across_the_diagonal() {
        let mut m = PackedSymmetricMatrix::zeros(3);
        m.set(0, 2, 4.5);
        assert_eq!(m.get(0, 2), 4.5);
        assert_eq!(m.get(2, 0), 4.5);
    }

    #[test]
    fn mul_vec_matches_hand_computation() {
        let mut m = PackedSymmetricMatrix::zeros(2);
        m.set(0, 0, 1.0);
        m.set(0, 1, 2.0);
        m.set(1, 1, 3.0);
        assert_eq!(m.mul_vec(&[1.0, 1.0]), vec![3.0, 5.0]);
    }

    #[test]
    fn quadratic_form_matches_hand_computation() {
        let mut m = PackedSymmetricMatrix::zeros(2);
        m.set(0, 0, 1.0);
        m.set(0, 1, 2.0);
        m.set(1, 1, 3.0);
        // x^T M x for x = [1, 1] is 1 + 2*2 + 3 = 8.
        assert_eq!(m.quadratic_form(&[1.0, 1.0]), 8.0);
    }
}
