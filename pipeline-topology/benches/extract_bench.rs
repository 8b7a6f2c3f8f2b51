//! Benchmarks for topology extraction.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pipeline_topology::testing::{layered_dag, wide_steps};
use pipeline_topology::topology::TopologyExtractor;

fn extract_benchmark(c: &mut Criterion) {
    let extractor = TopologyExtractor::new();

    let dag = layered_dag(20, 10);
    c.bench_function("extract_layered_dag_20x10", |b| {
        b.iter(|| extractor.extract(black_box(&dag)))
    });

    let steps = wide_steps(50, 8);
    c.bench_function("extract_wide_steps_50x8", |b| {
        b.iter(|| extractor.extract(black_box(&steps)))
    });
}

criterion_group!(benches, extract_benchmark);
criterion_main!(benches);
