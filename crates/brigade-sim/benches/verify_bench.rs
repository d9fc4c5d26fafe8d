//! Benchmarks for QRAM expansion and verification
//!
//! Run with: cargo bench -p brigade-sim

use brigade_sim::{StressInjector, Verifier, VerifierConfig};
use brigade_synth::{BuildOptions, DecompositionId, MirrorStrategy, QramBuilder};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn options(n: usize, parallel: bool) -> BuildOptions {
    BuildOptions {
        address_qubits: n,
        query: DecompositionId::RelativePhaseTDepth4Cx3,
        mirror: DecompositionId::RelativePhaseTDepth4Cx4,
        strategy: MirrorStrategy::OutToIn,
        parallel,
        ..BuildOptions::default()
    }
}

/// Benchmark building and expanding a QRAM
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let builder = QramBuilder::default();

    for n in &[1, 2, 3, 4, 5] {
        for parallel in [false, true] {
            let label = if parallel { "parallel" } else { "serial" };
            group.bench_with_input(BenchmarkId::new(label, n), n, |b, &n| {
                b.iter(|| builder.build(black_box(&options(n, parallel))).unwrap());
            });
        }
    }

    group.finish();
}

/// Benchmark exhaustive and sampled verification
fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify");
    group.sample_size(10);
    let builder = QramBuilder::default();
    let verifier = Verifier::new(VerifierConfig {
        superposition: false,
        ..VerifierConfig::default()
    });

    for n in &[1, 2, 3, 4] {
        let built = builder.build(&options(*n, true)).unwrap();
        group.bench_with_input(BenchmarkId::new("basis", n), &built.circuit, |b, circuit| {
            b.iter(|| black_box(verifier.verify(circuit).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark T-gate injection
fn bench_inject(c: &mut Criterion) {
    let mut group = c.benchmark_group("inject");
    let built = QramBuilder::default().build(&options(4, true)).unwrap();
    let total = built.resources.t_count;

    for k in [1, total / 2, total] {
        group.bench_with_input(BenchmarkId::new("cancel", k), &k, |b, &k| {
            b.iter(|| StressInjector::inject(black_box(&built.circuit), k, 42).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_verify, bench_inject);

criterion_main!(benches);
