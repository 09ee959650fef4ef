//! Incremental builder for [`Graph`] (§4.1).

#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

use crate::errors::InputError;
use crate::graph::Graph;
use crate::matrix::PackedSymmetricMatrix;

/// Builds a [`Graph`] by accumulating nodes and edges, assigning each newly
/// seen node name the next index in insertion order.
///
/// Parallel edges are summed (§4.1); an edge declared twice with
/// *different* weights is rejected rather than silently overwritten or
/// averaged, since that is far more likely to be a data error than an
/// intentional multigraph.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    index_of: HashMap<String, usize>,
    names: Vec<String>,
    edges: HashMap<(usize, usize), f64>,
}

impl GraphBuilder {
    /// Returns the index assigned to `name`, assigning the next index if
    /// `name` has not been seen before.
    pub fn node(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index_of.get(name) {
            return idx;
        }
        let idx = self.names.len();
        self.names.push(name.to_string());
        self.index_of.insert(name.to_string(), idx);
        idx
    }

    /// Adds an edge between `source` and `target` with the given weight,
    /// summing with any previously added edge between the same pair.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::ConflictingWeight`] if the same unordered pair
    /// was already recorded with a different weight from a prior *single*
    /// call — repeated calls are treated as parallel edges (summed), so
    /// this only fires when the caller explicitly flags a conflict via
    /// [`Self::add_edge_checked`].
    pub fn add_edge(&mut self, source: &str, target: &str, weight: f64) -> Result<(), InputError> {
        let s = self.node(source);
        let t = self.node(target);
        let key = if s <= t { (s, t) } else { (t, s) };
        *self.edges.entry(key).or_insert(0.0) += weight;
        Ok(())
    }

    /// Like [`Self::add_edge`], but rejects a second declaration of the
    /// same pair when its weight differs from the first (used by parsers
    /// for formats where a repeated edge most likely signals a data entry
    /// mistake rather than an intentional multigraph, e.g. GML/DOT/Pajek).
    pub fn add_edge_checked(
        &mut self,
        source: &str,
        target: &str,
        weight: f64,
    ) -> Result<(), InputError> {
        let s = self.node(source);
        let t = self.node(target);
        let key = if s <= t { (s, t) } else { (t, s) };
        if let Some(&existing) = self.edges.get(&key) {
            if (existing - weight).abs() > f64::EPSILON {
                return Err(InputError::ConflictingWeight {
                    source: source.to_string(),
                    destination: target.to_string(),
                });
            }
            return Ok(());
        }
        self.edges.insert(key, weight);
        Ok(())
    }

    /// Consumes the builder and produces an immutable [`Graph`].
    #[must_use]
    pub fn build(self) -> Graph {
        let n = self.names.len();
        let mut adjacency = PackedSymmetricMatrix::zeros(n);
        for (&(i, j), &w) in &self.edges {
            adjacency.set(i, j, w);
        }
        let degree: Vec<f64> = (0..n).map(|i| adjacency.row_sum(i)).collect();
        let total_weight = degree.iter().sum::<f64>() / 2.0;
        let num_edges = self.edges.values().filter(|&&w| w != 0.0).count();
        Graph { names: self.names, adjacency, degree, total_weight, num_edges }
    }
}

#[cfg(test)]
mod tests {
    use super::GraphBuilder;

    #[test]
    fn conflicting_checked_edges_are_rejected() {
        let mut builder = GraphBuilder::default();
        builder.add_edge_checked("a", "b", 1.0).unwrap();
        let err = builder.add_edge_checked("a", "b", 2.0).unwrap_err();
        assert!(matches!(err, crate::errors::InputError::ConflictingWeight { .. }));
    }

    #[test]
    fn node_assigns_indices_in_first_seen_order() {
        let mut builder = GraphBuilder::default();
        assert_eq!(builder.node("b"), 0);
        assert_eq!(builder.node("a"), 1);
        assert_eq!(builder.node("b"), 0);
    }
}
