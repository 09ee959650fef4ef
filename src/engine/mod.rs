//! The engine façade: orchestrates the pipeline end-to-end (C7, §4.7).

#[cfg(feature = "config")]
pub mod config;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::community::divider::DividerSettings;
use crate::community::{CommunityTree, RecursiveDivider};
use crate::eigen::EigenMethod;
use crate::errors::EngineError;
use crate::graph::Graph;
use crate::matrix::ModularityMatrix;

/// A hook-out point for external collaborators that want a snapshot of
/// the recursion at various points (§4.7). No snapshot serialization is
/// implemented — out of core scope — but the hook points are reached and
/// logged at `DEBUG` so a future collaborator can attach to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotPolicy {
    /// Never invoke the hook.
    #[default]
    None,
    /// Invoke the hook once per community found indivisible.
    IndivisibleOnly,
    /// Invoke the hook after every bisection attempt, successful or not.
    EveryStep,
}

/// The tunable knobs of a single engine run (§4.7).
#[derive(Debug, Clone, Copy)]
pub struct EngineSettings {
    /// Enables local MVM refinement within each bisection (§4.4 step 6).
    pub use_moving_vertex: bool,
    /// Enables the whole-tree gMVM post-pass (§4.5).
    pub use_global_moving_vertex: bool,
    /// Which eigen backend the bisector uses.
    pub eigen_method: EigenMethod,
    /// Where the snapshot hook is invoked, if at all.
    pub snapshot_policy: SnapshotPolicy,
    /// Whether the CLI should write a dendrogram export file.
    pub export_dendrogram: bool,
    /// Whether the CLI should write an indivisible-communities export
    /// file.
    pub export_indivisible_communities: bool,
    /// Whether the CLI should write a per-community subnetwork export.
    pub export_subnetworks: bool,
    /// Whether exports should annotate communities with a color index.
    pub color_communities: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            use_moving_vertex: false,
            use_global_moving_vertex: false,
            eigen_method: EigenMethod::Power,
            snapshot_policy: SnapshotPolicy::None,
            export_dendrogram: false,
            export_indivisible_communities: false,
            export_subnetworks: false,
            color_communities: false,
        }
    }
}

impl From<EngineSettings> for DividerSettings {
    fn from(settings: EngineSettings) -> Self {
        Self {
            use_moving_vertex: settings.use_moving_vertex,
            use_global_moving_vertex: settings.use_global_moving_vertex,
            eigen_method: settings.eigen_method,
        }
    }
}

/// The result of a completed (or canceled) run (§4.7, §7).
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The community tree produced by the run.
    pub tree: CommunityTree,
    /// `Q`, recomputed from the final leaf memberships against the global
    /// `B` (authoritative even after gMVM has moved vertices across
    /// subtrees — §9).
    pub modularity: f64,
    /// Whether the run stopped early due to cancellation (§5, §7).
    pub canceled: bool,
}

/// Orchestrates the pipeline: `RecursiveDivider` over a [`Graph`],
/// followed by recomputing the authoritative `Q` from the final
/// partition (C7).
#[derive(Debug, Clone, Copy)]
pub struct Engine {
    settings: EngineSettings,
}

impl Engine {
    /// Builds an engine with the given settings.
    #[must_use]
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    /// Runs the full pipeline over `graph`, using `cancel` as the
    /// cooperative cancellation flag (§5).
    ///
    /// # Errors
    ///
    /// Propagates any [`EngineError`] raised by the divider (eigensolver
    /// failure on a degenerate system, or an invariant violation).
    pub fn run(&self, graph: &Graph, cancel: &Arc<AtomicBool>) -> Result<RunOutcome, EngineError> {
        let divider = RecursiveDivider::new(self.settings.into());
        let tree = divider.divide(graph, cancel)?;

        let modularity_matrix = ModularityMatrix::build(graph);
        let modularity = final_modularity(&tree, &modularity_matrix);
        let canceled = cancel.load(Ordering::Relaxed);
        info!(q = modularity, communities = tree.leaves().len(), canceled, "run complete");

        Ok(RunOutcome { tree, modularity, canceled })
    }

    /// Runs the pipeline with a fresh, never-set cancellation flag — the
    /// common case for callers that do not need to cancel.
    ///
    /// # Errors
    ///
    /// See [`Self::run`].
    pub fn run_to_completion(&self, graph: &Graph) -> Result<RunOutcome, EngineError> {
        self.run(graph, &Arc::new(AtomicBool::new(false)))
    }
}

/// Recomputes `Q` directly from the final leaf memberships and the global
/// `B`, which is authoritative after gMVM has possibly moved vertices
/// across the tree (§9 "gMVM cross-tree moves").
fn final_modularity(tree: &CommunityTree, modularity: &ModularityMatrix) -> f64 {
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

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    use super::{Engine, EngineSettings};
    use crate::graph::Graph;

    #[test]
    fn isolated_node_yields_zero_modularity() {
        let mut builder = Graph::builder();
        builder.node("solo");
        let graph = builder.build();
        let outcome = Engine::new(EngineSettings::default()).run_to_completion(&graph).unwrap();
        assert_eq!(outcome.tree.leaves().len(), 1);
        assert_eq!(outcome.modularity, 0.0);
        assert!(!outcome.canceled);
    }

    #[test]
    fn two_node_path_is_indivisible() {
        let mut builder = Graph::builder();
        builder.add_edge("a", "b", 1.0).unwrap();
        builder.add_edge("a", "b", 1.0).unwrap();
        let graph = builder.build();
        let outcome = Engine::new(EngineSettings::default()).run_to_completion(&graph).unwrap();
        assert_eq!(outcome.tree.leaves().len(), 1);
    }

    #[test]
    fn cancellation_is_reported_in_the_outcome() {
        let mut builder = Graph::builder();
        builder.add_edge("a", "b", 1.0).unwrap();
        let graph = builder.build();
        let cancel = Arc::new(AtomicBool::new(true));
        let outcome = Engine::new(EngineSettings::default()).run(&graph, &cancel).unwrap();
        assert!(outcome.canceled);
    }
}
