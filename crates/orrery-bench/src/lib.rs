//! Shared fixtures for the Orrery benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]

use std::sync::Arc;

use orrery_core::{Engine, UIntColumn};
use orrery_engine::{Sandbox, SandboxConfig};

/// A sandbox with one per-entity bump engine registered, the
/// throughput workload of the scheduler benchmarks.
pub fn bump_sandbox(entities: usize, workers: usize) -> (Sandbox, Arc<UIntColumn>) {
    let mut sandbox = Sandbox::new(SandboxConfig {
        entity_count: entities,
        seed: 1,
        workers: Some(workers),
    })
    .expect("valid bench config");
    let column = sandbox
        .store_mut()
        .column_uint("counter", 0)
        .expect("fresh column");

    let mut engine = Engine::new("bump");
    for i in 0..entities {
        let column = Arc::clone(&column);
        engine.push(Box::new(move || column.add(i, 1)));
    }
    sandbox.register(engine).expect("stopped sandbox");
    (sandbox, column)
}
