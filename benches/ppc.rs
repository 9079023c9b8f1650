//! Benchmarks for the PPC estimator.
//!
//! Run:
//! - cargo bench

use std::f32::consts::PI;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dendrophase::core::ppc::ppc;

const PHASE_LENS: [usize; 4] = [16, 256, 4096, 65_536];

fn build_phases(n: usize) -> Vec<f32> {
    // deterministic pseudo-spread over the circle
    (0..n)
        .map(|i| -PI + (i as f32 * 0.61803398875).fract() * 2.0 * PI)
        .collect()
}

fn bench_resultant(c: &mut Criterion) {
    let mut group = c.benchmark_group("ppc_resultant");
    group.sample_size(50);

    for &n in &PHASE_LENS {
        let phases = build_phases(n);
        let id = BenchmarkId::new("case", format!("n{n}"));
        group.bench_with_input(id, &phases, |b, phases| {
            b.iter(|| black_box(ppc(black_box(phases))));
        });
    }

    group.finish();
}

criterion_group!(ppc_bench, bench_resultant);
criterion_main!(ppc_bench);
