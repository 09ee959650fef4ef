//! Benchmarks the full recursive-divide pipeline, with and without MVM,
//! on graphs of increasing size.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use spectral_modularity::community::divider::DividerSettings;
use spectral_modularity::community::RecursiveDivider;
use spectral_modularity::graph::Graph;

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

fn bench_divide(c: &mut Criterion) {
    let mut group = c.benchmark_group("divide");
    for k in [4, 10, 20] {
        let graph = clique_ring(k, 3);
        let cancel = Arc::new(AtomicBool::new(false));
        group.bench_with_input(BenchmarkId::new("newman", k), &graph, |b, graph| {
            let divider = RecursiveDivider::new(DividerSettings::default());
            b.iter(|| divider.divide(graph, &cancel).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("newman_mvm", k), &graph, |b, graph| {
            let divider = RecursiveDivider::new(DividerSettings { use_moving_vertex: true, ..DividerSettings::default() });
            b.iter(|| divider.divide(graph, &cancel).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_divide);
criterion_main!(benches);
