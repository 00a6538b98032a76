//! Benchmarks for dominator tree construction.
//!
//! Measures the fixpoint on graph shapes with different convergence behavior:
//! - Straight-line chains (one productive pass)
//! - Diamond ladders (many merge points)
//! - Nested loops (back edges, reducible)
//! - Irreducible meshes (multiple passes)
//! - Batches of independent graphs through `build_all`

extern crate cfgdom;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use cfgdom::{Address, ControlFlowGraph, DomTreeBuilder};
use std::hint::black_box;

fn addr(index: usize) -> Address {
    Address::new(0x40_0000 + 0x10 * index as u64)
}

fn numbered(count: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> ControlFlowGraph {
    let mut cfg = ControlFlowGraph::new(addr(0));
    for index in 1..count {
        cfg.add_block(addr(index));
    }
    for (from, to) in edges {
        cfg.add_edge(addr(from), addr(to)).unwrap();
    }
    cfg.number_postorder();
    cfg
}

/// 0 -> 1 -> ... -> n-1
fn chain(count: usize) -> ControlFlowGraph {
    numbered(count, (1..count).map(|i| (i - 1, i)))
}

/// Stacked if/else diamonds: each rung has a head, two arms and a join that heads the next.
fn diamond_ladder(rungs: usize) -> ControlFlowGraph {
    let count = rungs * 3 + 1;
    let edges = (0..rungs).flat_map(|r| {
        let head = r * 3;
        [
            (head, head + 1),
            (head, head + 2),
            (head + 1, head + 3),
            (head + 2, head + 3),
        ]
    });
    numbered(count, edges)
}

/// `depth` nested loops, each header with a back edge from its latch.
fn nested_loops(depth: usize) -> ControlFlowGraph {
    // headers 1..=depth, latches depth+1..=2*depth, exit 2*depth+1
    let count = depth * 2 + 2;
    let mut edges = vec![(0, 1)];
    for level in 1..depth {
        edges.push((level, level + 1));
    }
    edges.push((depth, depth + 1));
    for level in 1..=depth {
        let latch = depth + level;
        let header = depth + 1 - level;
        edges.push((latch, header));
        if level < depth {
            edges.push((latch, latch + 1));
        }
    }
    edges.push((1, count - 1));
    numbered(count, edges)
}

/// Every block after the entry links to its neighbors in both directions.
fn irreducible_mesh(count: usize) -> ControlFlowGraph {
    let mut edges = vec![(0, 1), (0, count - 1)];
    for i in 1..count - 1 {
        edges.push((i, i + 1));
        edges.push((i + 1, i));
    }
    numbered(count, edges)
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("domtree_chain");
    for size in [64, 1024, 16384] {
        let cfg = chain(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &cfg, |b, cfg| {
            let builder = DomTreeBuilder::new();
            b.iter(|| black_box(builder.build(black_box(cfg)).unwrap()));
        });
    }
    group.finish();
}

fn bench_diamond_ladder(c: &mut Criterion) {
    let cfg = diamond_ladder(1000);
    let builder = DomTreeBuilder::new();

    c.bench_function("domtree_diamond_ladder_1000", |b| {
        b.iter(|| black_box(builder.build(black_box(&cfg)).unwrap()));
    });
}

fn bench_nested_loops(c: &mut Criterion) {
    let cfg = nested_loops(200);
    let builder = DomTreeBuilder::new();

    c.bench_function("domtree_nested_loops_200", |b| {
        b.iter(|| black_box(builder.build(black_box(&cfg)).unwrap()));
    });
}

fn bench_irreducible(c: &mut Criterion) {
    let cfg = irreducible_mesh(256);
    let builder = DomTreeBuilder::new();

    c.bench_function("domtree_irreducible_mesh_256", |b| {
        b.iter(|| black_box(builder.build(black_box(&cfg)).unwrap()));
    });
}

fn bench_build_all(c: &mut Criterion) {
    let graphs: Vec<ControlFlowGraph> = (0..256).map(|i| diamond_ladder(16 + i % 32)).collect();
    let builder = DomTreeBuilder::new();

    c.bench_function("domtree_build_all_256", |b| {
        b.iter(|| black_box(builder.build_all(black_box(&graphs))));
    });
}

criterion_group!(
    benches,
    bench_chain,
    bench_diamond_ladder,
    bench_nested_loops,
    bench_irreducible,
    bench_build_all
);
criterion_main!(benches);
