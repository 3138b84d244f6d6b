//! Criterion benchmarks for whole simulation steps.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use zeno_bench::{build, classical_profile, reference_profile, stress_profile, volume_profile};
use zeno_engine::{SimConfig, Sinks};

fn bench_step(c: &mut Criterion, name: &str, config: SimConfig) {
    let mut sim = build(config).unwrap();

    // Warm up: one step so the rayon pool and table are initialized.
    sim.step().unwrap();

    c.bench_function(name, |b| {
        b.iter(|| {
            let report = sim.step().unwrap();
            black_box(&report);
        });
    });
}

fn bench_step_pgns_16k(c: &mut Criterion) {
    bench_step(c, "step_pgns_16k", reference_profile(42));
}

fn bench_step_pgns_262k(c: &mut Criterion) {
    bench_step(c, "step_pgns_262k", stress_profile(42));
}

fn bench_step_rehte_32k(c: &mut Criterion) {
    bench_step(c, "step_rehte_32k", volume_profile(42));
}

fn bench_step_classical_16k(c: &mut Criterion) {
    bench_step(c, "step_classical_16k", classical_profile(42));
}

fn bench_100_steps_16k(c: &mut Criterion) {
    c.bench_function("100_steps_pgns_16k", |b| {
        b.iter(|| {
            let config = SimConfig {
                total_steps: 100,
                ..reference_profile(42)
            };
            let mut sim = build(config).unwrap();
            let summary = sim.run(&mut Sinks::new()).unwrap();
            black_box(&summary);
        });
    });
}

criterion_group!(
    benches,
    bench_step_pgns_16k,
    bench_step_pgns_262k,
    bench_step_rehte_32k,
    bench_step_classical_16k,
    bench_100_steps_16k
);
criterion_main!(benches);
