//! Benchmarks for graph compilation and path generation.
//!
//! These benchmarks measure:
//! - Catalog compilation (validation + adjacency construction)
//! - Path generation over linear, fan-in, and layered prerequisite graphs

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use learnpath::concept::Concept;
use learnpath::graph::{ConceptGraph, ConceptGraphBuilder};
use learnpath::path::PathGenerator;

/// Linear chain: n00 -> n01 -> ... -> n{count-1}.
fn build_linear(count: usize) -> ConceptGraphBuilder {
    let mut builder = ConceptGraphBuilder::new();
    for i in 0..count {
        let mut concept = Concept::new(
            format!("n{i:03}"),
            format!("Concept {i:03}"),
            (i % 5 + 1) as u8,
            1.0 + (i % 7) as f32,
        );
        if i > 0 {
            concept = concept.with_prerequisites([format!("n{:03}", i - 1)]);
        }
        builder = builder.add_concept(concept);
    }
    builder
}

/// Fan-in: `width` independent concepts all feeding one goal.
fn build_fan_in(width: usize) -> ConceptGraphBuilder {
    let mut builder = ConceptGraphBuilder::new();
    let mut prereqs = Vec::with_capacity(width);
    for i in 0..width {
        builder = builder.add_concept(Concept::new(
            format!("w{i:03}"),
            format!("Worker {i:03}"),
            (i % 5 + 1) as u8,
            0.5 + (i % 4) as f32,
        ));
        prereqs.push(format!("w{i:03}"));
    }
    builder.add_concept(Concept::new("goal", "Goal", 5, 8.0).with_prerequisites(prereqs))
}

/// Layered DAG: `depth` layers of `width` concepts, each depending on one
/// concept in the previous layer.
fn build_layered(depth: usize, width: usize) -> ConceptGraphBuilder {
    let mut builder = ConceptGraphBuilder::new();
    for layer in 0..depth {
        for node in 0..width {
            let mut concept = Concept::new(
                format!("l{layer:02}n{node:02}"),
                format!("Layer {layer:02} Node {node:02}"),
                (node % 5 + 1) as u8,
                1.0 + (layer % 3) as f32,
            );
            if layer > 0 {
                concept =
                    concept.with_prerequisites([format!("l{:02}n{node:02}", layer - 1)]);
            }
            builder = builder.add_concept(concept);
        }
    }
    builder
}

fn last_linear_goal(count: usize) -> Vec<learnpath::types::ConceptId> {
    vec![format!("n{:03}", count - 1).into()]
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_compile");

    for size in [10, 50, 100, 200] {
        group.bench_with_input(BenchmarkId::new("linear", size), &size, |b, &size| {
            b.iter(|| build_linear(size).compile().expect("valid catalog"));
        });
    }

    for width in [10, 50, 100] {
        group.bench_with_input(BenchmarkId::new("fan_in", width), &width, |b, &width| {
            b.iter(|| build_fan_in(width).compile().expect("valid catalog"));
        });
    }

    group.finish();
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_generation");

    for size in [10, 50, 100, 200] {
        let graph = build_linear(size).compile().expect("valid catalog");
        let goals = last_linear_goal(size);
        group.bench_with_input(BenchmarkId::new("linear", size), &graph, |b, graph| {
            b.iter(|| PathGenerator::new(graph).generate(&goals).expect("DAG"));
        });
    }

    for width in [10, 50, 100] {
        let graph = build_fan_in(width).compile().expect("valid catalog");
        let goals = vec!["goal".into()];
        group.bench_with_input(BenchmarkId::new("fan_in", width), &graph, |b, graph| {
            b.iter(|| PathGenerator::new(graph).generate(&goals).expect("DAG"));
        });
    }

    for (depth, width) in [(5, 10), (10, 10), (5, 20)] {
        let graph = build_layered(depth, width).compile().expect("valid catalog");
        let goals: Vec<learnpath::types::ConceptId> = (0..width)
            .map(|node| format!("l{:02}n{node:02}", depth - 1).into())
            .collect();
        group.bench_with_input(
            BenchmarkId::new("layered", format!("{depth}x{width}")),
            &graph,
            |b, graph| {
                b.iter(|| PathGenerator::new(graph).generate(&goals).expect("DAG"));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compile, bench_generation);
criterion_main!(benches);
