//! Benchmarks for chatlens parsing and aggregation.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- aggregation`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatlens::config::AnalysisConfig;
use chatlens::core::Analysis;
use chatlens::core::output::{to_csv, to_text};
use chatlens::parser::ingest_str;
use chatlens::parsing::logical_lines;

// =============================================================================
// Test Data Generators
// =============================================================================

const BODIES: &[&str] = &[
    "Are we still on for dinner tonight?",
    "Running late, traffic is terrible",
    "Did anyone see the match yesterday",
    "<Media omitted>",
    "ok",
    "Sounds good to me\nsee you there",
];

fn generate_export(count: usize) -> String {
    let mut lines = Vec::with_capacity(count);
    for i in 0..count {
        let sender = ["Alice", "Bob", "Charlie"][i % 3];
        let day = i % 28 + 1;
        let month = (i / 28) % 12 + 1;
        let hour = i % 24;
        let minute = i % 60;
        lines.push(format!(
            "[{:02}/{:02}/2024, {:02}:{:02}:00] {}: {}",
            day,
            month,
            hour,
            minute,
            sender,
            BODIES[i % BODIES.len()]
        ));
    }
    lines.join("\n")
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for size in [1_000_usize, 10_000, 50_000] {
        let txt = generate_export(size);
        group.throughput(Throughput::Bytes(txt.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                let lines = logical_lines(black_box(txt)).unwrap();
                black_box(lines)
            });
        });
    }
    group.finish();
}

fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest");
    let config = AnalysisConfig::new();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let txt = generate_export(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                let ingest = ingest_str(black_box(txt), &config).unwrap();
                black_box(ingest)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Aggregation Benchmarks
// =============================================================================

fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");
    let config = AnalysisConfig::new();

    for size in [1_000_usize, 10_000, 50_000] {
        let store = ingest_str(&generate_export(size), &config).unwrap().store;
        group.throughput(Throughput::Elements(store.len() as u64));

        group.bench_with_input(BenchmarkId::new("sequential", size), &store, |b, store| {
            b.iter(|| black_box(Analysis::compute(black_box(store), &config).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &store, |b, store| {
            b.iter(|| black_box(Analysis::compute_parallel(black_box(store), &config).unwrap()));
        });
    }
    group.finish();
}

// =============================================================================
// Output Benchmarks
// =============================================================================

fn bench_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("output");
    let config = AnalysisConfig::new();
    let ingest = ingest_str(&generate_export(10_000), &config).unwrap();
    let analysis = Analysis::compute(&ingest.store, &config).unwrap();

    group.throughput(Throughput::Elements(ingest.store.len() as u64));
    group.bench_function("records_csv", |b| {
        b.iter(|| black_box(to_csv(black_box(&ingest.store)).unwrap()));
    });
    group.bench_function("text_report", |b| {
        b.iter(|| black_box(to_text(black_box(&analysis), &ingest.report)));
    });
    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let config = AnalysisConfig::new();

    for size in [1_000_usize, 10_000, 50_000] {
        let txt = generate_export(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                // Full pipeline: ingest -> aggregate -> render
                let ingest = ingest_str(black_box(txt), &config).unwrap();
                let analysis = Analysis::compute_parallel(&ingest.store, &config).unwrap();
                black_box(to_text(&analysis, &ingest.report))
            });
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_normalize,
    bench_ingest,
    bench_aggregation,
    bench_output,
    bench_full_pipeline,
);

criterion_main!(benches);
