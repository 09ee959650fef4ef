//! The undirected, optionally weighted graph (C1, §3, §4.1).

pub mod builder;
pub mod formats;

pub use builder::GraphBuilder;

use crate::matrix::PackedSymmetricMatrix;

/// An undirected graph with stable integer node indices assigned in
/// insertion order (§3 Graph).
///
/// `Graph` is immutable once built (§3 Lifecycle): every mutation happens
/// through [`GraphBuilder`], and the resulting adjacency/degree data never
/// changes afterwards. Parallel edges are summed at construction time
/// (§4.1), so `adjacency(i, j)` always reflects the total weight between
/// `i` and `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    names: Vec<String>,
    adjacency: PackedSymmetricMatrix,
    degree: Vec<f64>,
    total_weight: f64,
    num_edges: usize,
}

impl Graph {
    /// Starts building a graph with [`GraphBuilder`].
    #[must_use]
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// The number of nodes `N`.
    #[must_use]
    pub fn size(&self) -> usize {
        self.names.len()
    }

    /// The number of distinct (deduplicated) edges, including self-loops.
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// The weight of the edge between `i` and `j` (0.0 if absent).
    #[must_use]
    pub fn adjacency(&self, i: usize, j: usize) -> f64 {
        self.adjacency.get(i, j)
    }

    /// The degree (weighted, if the graph is weighted) of node `i`:
    /// `k_i = sum_j a_ij`.
    #[must_use]
    pub fn degree(&self, i: usize) -> f64 {
        self.degree[i]
    }

    /// The total edge weight `m = (1/2) sum_i k_i`, cached at construction
    /// time.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// The display name assigned to node `i` at load time.
    #[must_use]
    pub fn name(&self, i: usize) -> &str {
        &self.names[i]
    }

    /// Returns the node index for a given name, if it was declared.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Iterates over the upper-triangular edges `(i, j, weight)` with `i
    /// <= j`, in row-major order. Zero-weight pairs are skipped.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.size()).flat_map(move |i| {
            (i..self.size()).filter_map(move |j| {
                let w = self.adjacency(i, j);
                (w != 0.0).then_some((i, j, w))
            })
        })
    }

    /// Builds the induced subgraph over the given (global) node indices,
    /// re-indexed in the order given by `indices` (§4.1 subgraph-by-index-set).
    #[must_use]
    pub fn subgraph(&self, indices: &[usize]) -> Graph {
        let n = indices.len();
        let mut adjacency = PackedSymmetricMatrix::zeros(n);
        for (local_i, &global_i) in indices.iter().enumerate() {
            for (local_j, &global_j) in indices.iter().enumerate().skip(local_i) {
                adjacency.set(local_i, local_j, self.adjacency(global_i, global_j));
            }
        }
        let names: Vec<String> = indices.iter().map(|&i| self.names[i].clone()).collect();
        let degree: Vec<f64> = (0..n).map(|i| adjacency.row_sum(i)).collect();
        let total_weight = degree.iter().sum::<f64>() / 2.0;
        let num_edges = (0..n)
            .flat_map(|i| (i..n).map(move |j| (i, j)))
            .filter(|&(i, j)| adjacency.get(i, j) != 0.0)
            .count();
        Graph { names, adjacency, degree, total_weight, num_edges }
    }
}

#[cfg(test)]
mod tests {
    use super::Graph;

    #[test]
    fn triangle_has_expected_degree_and_weight() {
        let mut builder = Graph::builder();
        builder.add_edge("a", "b", 1.0).unwrap();
        builder.add_edge("b", "c", 1.0).unwrap();
        builder.add_edge("a", "c", 1.0).unwrap();
        let g = builder.build();

        assert_eq!(g.size(), 3);
        assert_eq!(g.num_edges(), 3);
        for i in 0..3 {
            assert_eq!(g.degree(i), 2.0);
        }
        assert_eq!(g.total_weight(), 3.0);
    }

    #[test]
    fn parallel_edges_are_summed() {
        let mut builder = Graph::builder();
        builder.add_edge("a", "b", 1.0).unwrap();
        builder.add_edge("a", "b", 2.0).unwrap();
        let g = builder.build();

        assert_eq!(g.adjacency(0, 1), 3.0);
        assert_eq!(g.num_edges(), 1);
    }

    #[test]
    fn subgraph_reindexes_and_preserves_weights() {
        let mut builder = Graph::builder();
        builder.add_edge("a", "b", 1.0).unwrap();
        builder.add_edge("b", "c", 5.0).unwrap();
        let g = builder.build();
        let a = g.index_of("a").unwrap();
        let b = g.index_of("b").unwrap();

        let sub = g.subgraph(&[a, b]);
        assert_eq!(sub.size(), 2);
        assert_eq!(sub.adjacency(0, 1), 1.0);
        assert_eq!(sub.name(0), "a");
    }
}
