//! Submodule for fuzzing the recursive-divide pipeline, checking that
//! [`CommunityTree::check_invariants`] always holds for the result.
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use arbitrary::Arbitrary;
use honggfuzz::fuzz;
use spectral_modularity::community::divider::DividerSettings;
use spectral_modularity::community::RecursiveDivider;
use spectral_modularity::graph::Graph;

#[derive(Debug, Arbitrary)]
struct FuzzEdge {
    source: u8,
    destination: u8,
    weight: u8,
}

#[derive(Debug, Arbitrary)]
struct FuzzEdgeList {
    edges: Vec<FuzzEdge>,
}

fn build_graph(edge_list: &FuzzEdgeList) -> Option<Graph> {
    let mut builder = Graph::builder();
    for edge in &edge_list.edges {
        if edge.source == edge.destination || edge.weight == 0 {
            continue;
        }
        let source = edge.source.to_string();
        let destination = edge.destination.to_string();
        builder.add_edge(&source, &destination, f64::from(edge.weight)).ok()?;
    }
    Some(builder.build())
}

fn main() {
    loop {
        fuzz!(|edge_list: FuzzEdgeList| {
            let Some(graph) = build_graph(&edge_list) else { return };
            if graph.size() == 0 {
                return;
            }
            let settings = DividerSettings { use_moving_vertex: true, use_global_moving_vertex: true, ..DividerSettings::default() };
            let divider = RecursiveDivider::new(settings);
            let cancel = Arc::new(AtomicBool::new(false));
            if let Ok(tree) = divider.divide(&graph, &cancel) {
                assert!(tree.check_invariants().is_ok());
            }
        });
    }
}
