//! The modularity matrix `B` and its per-community restriction `B^(g)`
//! (§3, §4.3).

use crate::graph::Graph;
use crate::matrix::packed::PackedSymmetricMatrix;

/// The modularity matrix `B` of a fixed [`Graph`], `B_ij = A_ij -
/// k_i k_j / (2m)`.
///
/// `B` is built once per top-level run (§3 Lifecycle) and is then
/// [`ModularityMatrix::restrict`]ed to each community visited by the
/// divider, yielding the generalized modularity matrix `B^(g)` of §3.
#[derive(Debug, Clone)]
pub struct ModularityMatrix {
    b: PackedSymmetricMatrix,
    total_weight: f64,
}

impl ModularityMatrix {
    /// Builds `B` from a graph's adjacency and degree sequence.
    #[must_use]
    pub fn build(graph: &Graph) -> Self {
        let n = graph.size();
        let total_weight = graph.total_weight();
        let mut b = PackedSymmetricMatrix::zeros(n);
        if total_weight > 0.0 {
            for i in 0..n {
                let ki = graph.degree(i);
                for j in i..n {
                    let kj = graph.degree(j);
                    let expected = ki * kj / (2.0 * total_weight);
                    b.set(i, j, graph.adjacency(i, j) - expected);
                }
            }
        }
        Self { b, total_weight }
    }

    /// Returns the order of `B`, i.e. the number of nodes in the graph it
    /// was built from.
    #[must_use]
    pub fn order(&self) -> usize {
        self.b.order()
    }

    /// Returns the cached total edge weight `m`.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Returns `B_ij` using the original graph's node indices.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.b.get(i, j)
    }

    /// Builds the generalized modularity matrix `B^(g)` for a community
    /// whose members are the given global node indices, in the order
    /// induced by the global node order (§3).
    ///
    /// `membership` is read, not consumed, so the same slice can be reused
    /// to build the full hierarchy of restrictions.
    #[must_use]
    pub fn restrict(&self, membership: &[usize]) -> PackedSymmetricMatrix {
        let n = membership.len();
        let mut bg = PackedSymmetricMatrix::zeros(n);
        for (local_i, &global_i) in membership.iter().enumerate() {
            let diagonal_correction: f64 =
                membership.iter().map(|&global_k| self.b.get(global_i, global_k)).sum();
            for (local_j, &global_j) in membership.iter().enumerate() {
                let mut value = self.b.get(global_i, global_j);
                if local_i == local_j {
                    value -= diagonal_correction;
                }
                bg.set(local_i, local_j, value);
            }
        }
        bg
    }

    /// `ΔQ` of the bisection vector `s` against the generalized modularity
    /// matrix of the community it bisects: `s^T B^(g) s / (4m)` (§3, §4.3).
    #[must_use]
    pub fn delta_q(&self, bg: &PackedSymmetricMatrix, s: &[i8]) -> f64 {
        if self.total_weight <= 0.0 {
            return 0.0;
        }
        let x: Vec<f64> = s.iter().map(|&si| f64::from(si)).collect();
        bg.quadratic_form(&x) / (4.0 * self.total_weight)
    }
}
