//! Orrery: a tick-driven parallel simulation scheduler.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Orrery sub-crates. For most users, adding `orrery` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use orrery::prelude::*;
//! use std::sync::Arc;
//!
//! // A world of 8 entities on a 2-worker pool.
//! let mut sandbox = Sandbox::new(SandboxConfig {
//!     entity_count: 8,
//!     seed: 42,
//!     workers: Some(2),
//! })
//! .unwrap();
//!
//! // Declare per-entity state and capture the column handle.
//! let heat = sandbox
//!     .store_mut()
//!     .column_float("heat", ColumnInit::Fill(1.0))
//!     .unwrap();
//!
//! // One calculation per entity; each touches only its own cell, so
//! // the engine is safe to spread across the pool.
//! let mut cool = Engine::new("cool");
//! for i in 0..8 {
//!     let heat = Arc::clone(&heat);
//!     cool.push(Box::new(move || heat.set(i, heat.get(i) * 0.5)));
//! }
//! sandbox.register(cool).unwrap();
//!
//! sandbox.run_passes(2).unwrap();
//! assert_eq!(heat.get(0), 0.25);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `orrery-core` | Values, cells, columns, the store, `Calculation`/`Engine` |
//! | [`engine`] | `orrery-engine` | `Sandbox` driver, partitioning, pass metrics |
//! | [`pairwise`] | `orrery-pairwise` | Conflict-free all-pairs scheduling |
//! | [`kernels`] | `orrery-kernels` | Reference calculators (clocks, motion, gravity, charges, bounds) |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Values, cells, columns, the store, and the calculation/engine types
/// (`orrery-core`).
pub use orrery_core as types;

/// The sandbox driver, listing partitioner, and pass metrics
/// (`orrery-engine`).
pub use orrery_engine as engine;

/// Conflict-free all-pairs interaction scheduling (`orrery-pairwise`).
///
/// [`pairwise::PairKernel`] is the extension point for symmetric
/// per-pair physics; [`pairwise::PairSchedule`] is the planner.
pub use orrery_pairwise as pairwise;

/// Reference calculators (`orrery-kernels`).
///
/// Clock, motion-integration, bounds, gravity, and electrostatics
/// engines built on the public API.
pub use orrery_kernels as kernels;

/// Common imports for typical Orrery usage.
///
/// ```rust
/// use orrery::prelude::*;
/// ```
pub mod prelude {
    pub use orrery_core::{
        Calculation, ColumnInit, Complex, Engine, EngineId, FloatCell, FloatColumn, Store,
        StoreError, UIntCell, UIntColumn, Value, ValueKind,
    };
    pub use orrery_engine::{PassMetrics, Sandbox, SandboxConfig, SandboxError};
    pub use orrery_pairwise::{register_pairwise, PairKernel, PairSchedule};
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use std::sync::Arc;

    struct Tally {
        acc: Arc<UIntColumn>,
    }

    impl PairKernel for Tally {
        fn interact(&self, i: usize, j: usize) {
            self.acc.add(i, 1);
            self.acc.add(j, 1);
        }
    }

    #[test]
    fn facade_exposes_the_full_pipeline() {
        let mut sandbox = Sandbox::new(SandboxConfig {
            entity_count: 6,
            seed: 1,
            workers: Some(2),
        })
        .unwrap();

        let acc = sandbox.store_mut().column_uint("tally", 0).unwrap();
        let kernel = Arc::new(Tally { acc: Arc::clone(&acc) });
        register_pairwise(&mut sandbox, "tally", &kernel).unwrap();

        sandbox.run_passes(1).unwrap();
        assert!(acc.snapshot().into_iter().all(|v| v == 5));
    }
}
