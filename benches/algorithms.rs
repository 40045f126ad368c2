//! Criterion benchmarks for the three route algorithms.
//!
//! Benchmarks:
//!   - corbett:  MST, max-flow and shortest paths on the built-in network
//!   - grid:     the same algorithms on square grid networks of growing size
//!
//! Run with: cargo bench --bench algorithms

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use patrolgraph::algorithm::{max_flow, minimum_spanning_tree, shortest_paths};
use patrolgraph::graph::{Edge, Graph, Node};
use patrolgraph::import::PatrolNetwork;

/// side x side grid, weights vary deterministically so MST has work to do
fn grid_graph(side: usize) -> Graph {
    let id = |x: usize, y: usize| format!("s{}_{}", x, y);
    let mut graph = Graph::default();

    for y in 0..side {
        for x in 0..side {
            graph.add_node(Node::new(id(x, y), id(x, y), y as f64, x as f64));
        }
    }
    for y in 0..side {
        for x in 0..side {
            let weight = 1.0 + ((x * 7 + y * 13) % 10) as f64;
            if x + 1 < side {
                graph.add_edge(Edge::new(id(x, y), id(x + 1, y), weight));
            }
            if y + 1 < side {
                graph.add_edge(Edge::new(id(x, y), id(x, y + 1), weight + 0.5));
            }
        }
    }
    graph
}

// ---------------------------------------------------------------------------
// Benchmark: built-in Corbett network
// ---------------------------------------------------------------------------

fn bench_corbett(c: &mut Criterion) {
    let graph = PatrolNetwork::builtin()
        .and_then(|network| network.to_graph())
        .expect("built-in network");

    let mut group = c.benchmark_group("corbett");
    group.bench_function("mst", |b| {
        b.iter(|| black_box(minimum_spanning_tree(black_box(&graph))))
    });
    group.bench_function("max_flow", |b| {
        b.iter(|| black_box(max_flow(black_box(&graph), "dhikala", "sonanadi")))
    });
    group.bench_function("shortest_paths", |b| {
        b.iter(|| black_box(shortest_paths(black_box(&graph), "dhikala")))
    });
    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: grid networks
// ---------------------------------------------------------------------------

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid");
    group.sample_size(20);

    for side in [5usize, 10, 20] {
        let graph = grid_graph(side);
        let sink = format!("s{}_{}", side - 1, side - 1);

        group.bench_with_input(BenchmarkId::new("mst", side), &graph, |b, g| {
            b.iter(|| black_box(minimum_spanning_tree(g)))
        });
        group.bench_with_input(BenchmarkId::new("max_flow", side), &graph, |b, g| {
            b.iter(|| black_box(max_flow(g, "s0_0", &sink)))
        });
        group.bench_with_input(BenchmarkId::new("shortest_paths", side), &graph, |b, g| {
            b.iter(|| black_box(shortest_paths(g, "s0_0")))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_corbett, bench_grid);
criterion_main!(benches);
