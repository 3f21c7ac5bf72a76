//! Benchmarks for the per-sample pipeline after sampling.
//!
//! Measures hermitianization, the eigenvalue solve and classification, then
//! a whole driver run writing to a sink.

use std::io;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nalgebra::DMatrix;
use sig::eigen::ascending_eigenvalues;
use sig::hermitian::hermitianize;
use sig::input::InputDocument;
use sig::{
    Complex64, Driver, EvaluationStrategy, IndexSweep, LookupTables, MatrixSampler,
    SignatureAnalyzer, SweepConfig,
};

fn test_matrix(d: usize) -> DMatrix<Complex64> {
    DMatrix::from_fn(d, d, |r, c| {
        Complex64::new(((r * 7 + c * 3) % 11) as f64 - 5.0, ((r + 2 * c) % 5) as f64 - 2.0)
    })
}

// ============================================================================
// Benchmark: hermitianize + eigenvalues
// ============================================================================

fn bench_eigenvalues(c: &mut Criterion) {
    let mut group = c.benchmark_group("eigenvalues");

    for d in [2usize, 4, 8, 16] {
        let m = test_matrix(d);
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(d), &m, |b, m| {
            b.iter(|| black_box(ascending_eigenvalues(hermitianize(black_box(m))).unwrap()));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: classification
// ============================================================================

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    group.throughput(Throughput::Elements(1));

    let analyzer = SignatureAnalyzer::new(1e-12).unwrap();
    let values: Vec<f64> = (0..16).map(|k| f64::from(k) - 7.5).collect();

    group.bench_function("sixteen", |b| {
        b.iter(|| black_box(analyzer.analyze(black_box(&values))));
    });

    group.finish();
}

// ============================================================================
// Benchmark: full driver run
// ============================================================================

fn bench_driver(c: &mut Criterion) {
    let mut group = c.benchmark_group("driver");

    let matrix = InputDocument::from_json_str(
        r#"{"indeterminates": ["x", "y"],
            "matrix": [["1", "x", "y"], ["x", "-1", "x*y"], ["y", "x*y", "2"]]}"#,
    )
    .and_then(InputDocument::into_problem)
    .unwrap();
    let config = SweepConfig::new(32);
    let tables = LookupTables::new(config.steps).unwrap();
    let sampler = MatrixSampler::new(&matrix, &tables, EvaluationStrategy::ExponentTable).unwrap();
    let sweep = IndexSweep::from_tables(2, &tables, None).unwrap();
    let driver = Driver::new(&sampler, &sweep, &config).unwrap();

    group.throughput(Throughput::Elements(sweep.len() as u64));
    group.sample_size(10);
    group.bench_function("pairs_32", |b| {
        b.iter(|| black_box(driver.run(&mut io::sink()).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_eigenvalues, bench_analyze, bench_driver);
criterion_main!(benches);
