//! Scheduler hot-path benchmarks: pass throughput and pairwise
//! planning cost.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use orrery_bench::bump_sandbox;
use orrery_pairwise::PairSchedule;

fn pass_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("pass_throughput");
    for entities in [64usize, 1024, 16384] {
        group.bench_with_input(
            BenchmarkId::from_parameter(entities),
            &entities,
            |b, &entities| {
                let (mut sandbox, _column) = bump_sandbox(entities, 4);
                // Each iteration spins the pool up and down around 10
                // passes, the lockstep path.
                b.iter(|| sandbox.run_passes(black_box(10)).unwrap());
            },
        );
    }
    group.finish();
}

fn pairwise_planning(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairwise_planning");
    for (entities, workers) in [(100usize, 4usize), (1000, 8), (10000, 16)] {
        group.bench_with_input(
            BenchmarkId::new("plan", format!("n{entities}_w{workers}")),
            &(entities, workers),
            |b, &(entities, workers)| {
                b.iter(|| black_box(PairSchedule::plan(entities, workers)));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, pass_throughput, pairwise_planning);
criterion_main!(benches);
