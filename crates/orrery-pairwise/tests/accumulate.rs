//! End-to-end concurrency check for the pairwise schedule.
//!
//! A symmetric accumulate kernel (`acc[i] += 1; acc[j] += 1` per pair)
//! run over the real worker pool must leave `acc[k] == N - 1` for every
//! entity: each entity interacts with every other exactly once, and no
//! concurrent accumulation is lost — which is exactly what the
//! group-disjointness invariant guarantees.

use std::sync::Arc;

use orrery_core::UIntColumn;
use orrery_engine::{Sandbox, SandboxConfig};
use orrery_pairwise::{register_pairwise, PairKernel};

struct CountKernel {
    acc: Arc<UIntColumn>,
}

impl PairKernel for CountKernel {
    fn interact(&self, i: usize, j: usize) {
        self.acc.add(i, 1);
        self.acc.add(j, 1);
    }
}

fn run_accumulate(entities: usize, workers: usize, passes: u64) {
    let mut sandbox = Sandbox::new(SandboxConfig {
        entity_count: entities,
        seed: 7,
        workers: Some(workers),
    })
    .unwrap();

    let acc = sandbox.store_mut().column_uint("interactions", 0).unwrap();
    let kernel = Arc::new(CountKernel { acc: Arc::clone(&acc) });
    register_pairwise(&mut sandbox, "count", &kernel).unwrap();

    sandbox.run_passes(passes).unwrap();

    let expected = (entities as u64 - 1) * passes;
    for (k, count) in acc.snapshot().into_iter().enumerate() {
        assert_eq!(
            count, expected,
            "entity {k}: expected {expected} interactions, got {count} \
             (N={entities}, W={workers})"
        );
    }
}

#[test]
fn nine_entities_four_workers_one_pass() {
    run_accumulate(9, 4, 1);
}

#[test]
fn accumulation_is_stable_over_many_passes() {
    run_accumulate(9, 4, 50);
}

#[test]
fn larger_world_than_pool() {
    run_accumulate(100, 4, 3);
}

#[test]
fn single_worker_degenerates_to_serial() {
    run_accumulate(17, 1, 2);
}

#[test]
fn pool_larger_than_world() {
    run_accumulate(5, 8, 2);
}

#[test]
fn empty_and_singleton_worlds_are_noops() {
    for entities in [0, 1] {
        let mut sandbox = Sandbox::new(SandboxConfig {
            entity_count: entities,
            seed: 7,
            workers: Some(2),
        })
        .unwrap();
        let acc = sandbox.store_mut().column_uint("interactions", 0).unwrap();
        let kernel = Arc::new(CountKernel { acc: Arc::clone(&acc) });
        let ids = register_pairwise(&mut sandbox, "count", &kernel).unwrap();
        assert!(ids.is_empty());
        sandbox.run_passes(2).unwrap();
        assert!(acc.snapshot().iter().all(|&v| v == 0));
    }
}
