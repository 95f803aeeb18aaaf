//! Benchmarks for shape discovery and unification
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use typeshape_core::{Discoverer, GeneralityGraph, ScalarKind, TypeShape, unify};

/// Generate a JSON array of record samples for benchmarking
fn generate_records(count: usize) -> String {
    let rows: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"id": {}, "name": "user-{}", "balance": {}, "active": {}, "joined": "2024-01-{:02}"}}"#,
                i,
                i,
                1000.0 + (i as f64 * 10.5),
                i % 2 == 0,
                (i % 28) + 1
            )
        })
        .collect();
    format!("[{}]", rows.join(","))
}

/// Benchmark the string-coercion chain across value classes
fn bench_string_discovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("string_discovery");
    let discoverer = Discoverer::new();

    let test_cases = vec![
        ("integer", "42"),
        ("float", "3.14159"),
        ("boolean", "true"),
        ("date", "2024-01-15"),
        ("datetime", "2024-01-15T10:30:00Z"),
        ("plain_string", "hello world"),
    ];

    for (name, value) in test_cases {
        let json = format!(r#""{}""#, value);
        group.bench_with_input(BenchmarkId::new("discover", name), &json, |b, json| {
            b.iter(|| black_box(discoverer.discover_json(json)));
        });
    }

    group.finish();
}

/// Benchmark record-column discovery with varying sample counts
fn bench_record_discovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_discovery");

    for count in [10, 100, 500].iter() {
        let json = generate_records(*count);
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(BenchmarkId::new("discover", count), &json, |b, json| {
            let discoverer = Discoverer::new();
            b.iter(|| black_box(discoverer.discover_json(json)));
        });
    }

    group.finish();
}

/// Benchmark the unification strategies in isolation
fn bench_unification(c: &mut Criterion) {
    let mut group = c.benchmark_group("unification");
    let graph = GeneralityGraph::default();

    let identical = vec![TypeShape::Scalar(ScalarKind::Int64); 100];
    group.bench_function("identical", |b| {
        b.iter(|| black_box(unify(&identical, &graph)));
    });

    let widening: Vec<TypeShape> = (0..100)
        .map(|i| {
            TypeShape::Scalar(match i % 3 {
                0 => ScalarKind::Int32,
                1 => ScalarKind::Int64,
                _ => ScalarKind::Real,
            })
        })
        .collect();
    group.bench_function("widening", |b| {
        b.iter(|| black_box(unify(&widening, &graph)));
    });

    let ragged: Vec<TypeShape> = (0..100)
        .map(|i| TypeShape::fixed(10 + (i % 7), TypeShape::Scalar(ScalarKind::String)))
        .collect();
    group.bench_function("ragged_dimensions", |b| {
        b.iter(|| black_box(unify(&ragged, &graph)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_string_discovery,
    bench_record_discovery,
    bench_unification
);
criterion_main!(benches);
