//! The top-down recursive divider and the gMVM post-pass (C5, §4.5).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, instrument};

use crate::community::bisector::Bisector;
use crate::community::tree::{CommunityId, CommunityTree};
use crate::eigen::EigenMethod;
use crate::errors::EngineError;
use crate::graph::Graph;
use crate::matrix::ModularityMatrix;

/// The subset of [`crate::engine::EngineSettings`] that the divider itself
/// consumes.
#[derive(Debug, Clone, Copy)]
pub struct DividerSettings {
    /// Enables local MVM refinement within each bisection (§4.4 step 6).
    pub use_moving_vertex: bool,
    /// Enables the whole-tree gMVM post-pass (§4.5).
    pub use_global_moving_vertex: bool,
    /// Which eigen backend [`crate::community::Bisector`] uses.
    pub eigen_method: EigenMethod,
}

impl Default for DividerSettings {
    fn default() -> Self {
        Self {
            use_moving_vertex: false,
            use_global_moving_vertex: false,
            eigen_method: EigenMethod::Power,
        }
    }
}

/// Drives the recursive bisection of a graph into a [`CommunityTree`]
/// (C5).
#[derive(Debug, Default)]
pub struct RecursiveDivider {
    settings: DividerSettings,
}

impl RecursiveDivider {
    /// Builds a divider with the given settings.
    #[must_use]
    pub fn new(settings: DividerSettings) -> Self {
        Self { settings }
    }

    /// Runs the full pipeline: recursive bisection down to indivisible
    /// communities, then the optional gMVM post-pass (§4.5).
    ///
    /// `cancel`, if set at any point the divider checks it, causes the
    /// recursion to stop early: communities already pushed to the work
    /// stack are discarded rather than split further, so their current
    /// (unsplit) state becomes a leaf (§5 Cancellation).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvariantViolation`] if the tree invariants
    /// are violated (implementation bug), or propagates an eigensolver
    /// error.
    #[instrument(level = "info", skip(self, graph, cancel), fields(n = graph.size()))]
    pub fn divide(
        &self,
        graph: &Graph,
        cancel: &Arc<AtomicBool>,
    ) -> Result<CommunityTree, EngineError> {
        let modularity = ModularityMatrix::build(graph);
        let bisector = Bisector::new(self.settings.eigen_method, self.settings.use_moving_vertex);
        let mut tree = CommunityTree::new((0..graph.size()).collect());

        let mut stack = vec![tree.root_id()];
        while let Some(id) = stack.pop() {
            if cancel.load(Ordering::Relaxed) {
                break;
            }
            self.visit(&mut tree, id, &modularity, &bisector, &mut stack)?;
        }

        if self.settings.use_global_moving_vertex {
            run_global_moving_vertex(&mut tree, &modularity, cancel);
        }

        tree.check_invariants()?;
        info!(q = tree.modularity_from_splits(), "divide finished");
        Ok(tree)
    }

    fn visit(
        &self,
        tree: &mut CommunityTree,
        id: CommunityId,
        modularity: &ModularityMatrix,
        bisector: &Bisector,
        stack: &mut Vec<CommunityId>,
    ) -> Result<(), EngineError> {
        let (name, depth, membership) = {
            let community = tree.get(id);
            (community.name.clone(), community.depth, community.membership.clone())
        };

        let bg = modularity.restrict(&membership);
        let Some((s, delta_q)) = bisector.bisect(&name, depth, modularity, &bg) else {
            return Ok(());
        };

        let mut membership_a = Vec::new();
        let mut membership_b = Vec::new();
        for (local_i, &global_i) in membership.iter().enumerate() {
            if s[local_i] > 0 {
                membership_a.push(global_i);
            } else {
                membership_b.push(global_i);
            }
        }

        let (child_a, child_b) = tree.split(id, membership_a, membership_b, delta_q)?;
        stack.push(child_a);
        stack.push(child_b);
        Ok(())
    }
}

/// Runs the gMVM post-pass of §4.5: repeatedly finds the single vertex
/// move, across any pair of current leaves, with the largest positive
/// `delta_q` against the *global* modularity matrix `B` (not `B^(g)`), and
/// applies it. Stops when no positive move exists or `cancel` is set.
fn run_global_moving_vertex(
    tree: &mut CommunityTree,
    modularity: &ModularityMatrix,
    cancel: &Arc<AtomicBool>,
) {
    let m = modularity.total_weight();
    if m <= 0.0 {
        return;
    }

    loop {
        if cancel.load(Ordering::Relaxed) {
            break;
        }
        let leaves = tree.leaves();
        if leaves.len() < 2 {
            break;
        }

        // delta_q of moving vertex `v` from leaf `source` to leaf `target`:
        // B_vv/m moves out of the picture, what remains is the difference
        // of v's coupling to its new community versus its old one, scaled
        // by 1/(2m) per side (Newman's single-vertex move formula).
        let coupling = |community: &[usize], v: usize| -> f64 {
            community.iter().filter(|&&u| u != v).map(|&u| modularity.get(v, u)).sum()
        };

        let mut best: Option<(f64, usize, usize, usize)> = None; // (gain, source, v, target)
        for (source_rank, &source_id) in leaves.iter().enumerate() {
            let source_members = tree.get(source_id).membership.clone();
            for &v in &source_members {
                let self_coupling = coupling(&source_members, v);
                for (target_rank, &target_id) in leaves.iter().enumerate() {
                    if target_id == source_id {
                        continue;
                    }
                    let target_members = &tree.get(target_id).membership;
                    let other_coupling = coupling(target_members, v);
                    let gain = (other_coupling - self_coupling) / (2.0 * m);
                    let candidate = (gain, source_rank, v, target_rank);
                    let better = match best {
                        None => true,
                        Some((best_gain, best_source, best_v, best_target)) => {
                            gain > best_gain
                                || (gain == best_gain
                                    && (source_rank, v, target_rank) < (best_source, best_v, best_target))
                        }
                    };
                    if better {
                        best = Some(candidate);
                    }
                }
            }
        }

        let Some((gain, source_rank, v, target_rank)) = best else { break };
        if gain <= 0.0 {
            break;
        }

        let source_id = leaves[source_rank];
        let target_id = leaves[target_rank];
        {
            let source = tree.get_mut(source_id);
            source.membership.retain(|&u| u != v);
            if source.membership.is_empty() {
                source.emptied = true;
            }
        }
        tree.get_mut(target_id).membership.push(v);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    use super::{DividerSettings, RecursiveDivider};
    use crate::graph::Graph;

    fn two_triangles_joined() -> Graph {
        let mut builder = Graph::builder();
        for (a, b) in [("a1", "a2"), ("a2", "a3"), ("a1", "a3"), ("b1", "b2"), ("b2", "b3"), ("b1", "b3")] {
            builder.add_edge(a, b, 1.0).unwrap();
        }
        builder.add_edge("a1", "b1", 1.0).unwrap();
        builder.build()
    }

    #[test]
    fn divides_two_triangles_into_two_leaves() {
        let graph = two_triangles_joined();
        let divider = RecursiveDivider::new(DividerSettings::default());
        let cancel = Arc::new(AtomicBool::new(false));
        let tree = divider.divide(&graph, &cancel).unwrap();
        assert_eq!(tree.leaves().len(), 2);
        assert!(tree.modularity_from_splits() > 0.0);
    }

    #[test]
    fn complete_graph_produces_a_single_leaf() {
        let mut builder = Graph::builder();
        let names: Vec<String> = (0..6).map(|i| i.to_string()).collect();
        for i in 0..names.len() {
            for j in (i + 1)..names.len() {
                builder.add_edge(&names[i], &names[j], 1.0).unwrap();
            }
        }
        let graph = builder.build();
        let divider = RecursiveDivider::new(DividerSettings::default());
        let cancel = Arc::new(AtomicBool::new(false));
        let tree = divider.divide(&graph, &cancel).unwrap();
        assert_eq!(tree.leaves().len(), 1);
        assert_eq!(tree.modularity_from_splits(), 0.0);
    }

    #[test]
    fn cancellation_before_any_work_yields_a_single_leaf() {
        let graph = two_triangles_joined();
        let divider = RecursiveDivider::new(DividerSettings::default());
        let cancel = Arc::new(AtomicBool::new(true));
        let tree = divider.divide(&graph, &cancel).unwrap();
        assert_eq!(tree.leaves().len(), 1);
    }

    #[test]
    fn gmvm_never_decreases_modularity_relative_to_mvm_alone() {
        let graph = two_triangles_joined();
        let cancel = Arc::new(AtomicBool::new(false));

        let mvm_only = RecursiveDivider::new(DividerSettings {
            use_moving_vertex: true,
            use_global_moving_vertex: false,
            ..DividerSettings::default()
        })
        .divide(&graph, &cancel)
        .unwrap();

        let mvm_and_gmvm = RecursiveDivider::new(DividerSettings {
            use_moving_vertex: true,
            use_global_moving_vertex: true,
            ..DividerSettings::default()
        })
        .divide(&graph, &cancel)
        .unwrap();

        let modularity = crate::matrix::ModularityMatrix::build(&graph);
        let q_before = mvm_only.modularity_from_splits();
        let q_after = final_modularity(&mvm_and_gmvm, &modularity);
        assert!(q_after >= q_before - 1e-9, "q_after={q_after} q_before={q_before}");
    }

    fn final_modularity(tree: &crate::community::CommunityTree, modularity: &crate::matrix::ModularityMatrix) -> f64 {
        let m = modularity.total_weight();
        if m <= 0.0 {
            return 0.0;
        }
        let mut total = 0.0;
        for leaf in tree.leaves() {
            let members = &tree.get(leaf).membership;
            for &i in members {
                for &j in members {
                    total += modularity.get(i, j);
                }
            }
        }
        total / (4.0 * m)
    }
}
