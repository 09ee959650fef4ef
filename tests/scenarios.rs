//! End-to-end scenarios from the testable-properties table (clique-ring,
//! K10, K5+K5, isolated node, two-node path).

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use spectral_modularity::engine::{Engine, EngineSettings};
use spectral_modularity::graph::Graph;

fn run(graph: &Graph, settings: EngineSettings) -> spectral_modularity::engine::RunOutcome {
    let cancel = Arc::new(AtomicBool::new(false));
    Engine::new(settings).run(graph, &cancel).unwrap()
}

/// 15 triangles joined in a ring by single edges between consecutive
/// triangles.
fn clique_ring(k: usize, clique_size: usize) -> Graph {
    let mut builder = Graph::builder();
    let node = |clique: usize, slot: usize| format!("{clique}-{slot}");
    for clique in 0..k {
        for i in 0..clique_size {
            for j in (i + 1)..clique_size {
                builder.add_edge(&node(clique, i), &node(clique, j), 1.0).unwrap();
            }
        }
        let next = (clique + 1) % k;
        builder.add_edge(&node(clique, 0), &node(next, 0), 1.0).unwrap();
    }
    builder.build()
}

fn complete_graph(n: usize) -> Graph {
    let mut builder = Graph::builder();
    let names: Vec<String> = (0..n).map(|i| i.to_string()).collect();
    for i in 0..n {
        for j in (i + 1)..n {
            builder.add_edge(&names[i], &names[j], 1.0).unwrap();
        }
    }
    builder.build()
}

#[test]
fn clique_ring_produces_few_communities_with_high_modularity() {
    let graph = clique_ring(15, 3);
    let settings =
        EngineSettings { use_moving_vertex: true, use_global_moving_vertex: true, ..EngineSettings::default() };
    let outcome = run(&graph, settings);

    assert!(outcome.modularity >= 0.86, "Q = {}", outcome.modularity);
    assert!(outcome.modularity <= 0.90, "Q = {}", outcome.modularity);
    assert!(outcome.tree.leaves().len() <= 8, "leaves = {}", outcome.tree.leaves().len());
}

#[test]
fn complete_graph_k10_is_indivisible() {
    let graph = complete_graph(10);
    let outcome = run(&graph, EngineSettings::default());

    assert_eq!(outcome.tree.leaves().len(), 1);
    assert_eq!(outcome.modularity, 0.0);
}

#[test]
fn two_cliques_joined_by_one_edge_split_into_two_communities() {
    let mut builder = Graph::builder();
    let left: Vec<String> = (0..5).map(|i| format!("l{i}")).collect();
    let right: Vec<String> = (0..5).map(|i| format!("r{i}")).collect();
    for group in [&left, &right] {
        for i in 0..group.len() {
            for j in (i + 1)..group.len() {
                builder.add_edge(&group[i], &group[j], 1.0).unwrap();
            }
        }
    }
    builder.add_edge(&left[0], &right[0], 1.0).unwrap();
    let graph = builder.build();

    let outcome = run(&graph, EngineSettings::default());
    assert_eq!(outcome.tree.leaves().len(), 2);
    for leaf in outcome.tree.leaves() {
        assert_eq!(outcome.tree.get(leaf).size(), 5);
    }
    assert!(outcome.modularity > 0.4, "Q = {}", outcome.modularity);
}

#[test]
fn single_isolated_node_is_a_single_zero_modularity_leaf() {
    let mut builder = Graph::builder();
    builder.node("solo");
    let graph = builder.build();

    let outcome = run(&graph, EngineSettings::default());
    assert_eq!(outcome.tree.leaves().len(), 1);
    assert_eq!(outcome.modularity, 0.0);
}

#[test]
fn two_node_two_edge_path_is_indivisible() {
    let mut builder = Graph::builder();
    builder.add_edge("a", "b", 1.0).unwrap();
    builder.add_edge("a", "b", 1.0).unwrap();
    let graph = builder.build();

    let outcome = run(&graph, EngineSettings::default());
    assert_eq!(outcome.tree.leaves().len(), 1);
}
