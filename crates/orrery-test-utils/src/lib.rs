//! Test utilities and mock calculations for Orrery development.
//!
//! Provides small, observable [`Calculation`] implementations (counters,
//! column bumps, uniformity checks, sleepers) and fixture builders for
//! the engine shapes the scheduler tests need.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use orrery_core::{Calculation, UIntCell, UIntColumn};

pub mod fixtures;

/// Increments a shared cell by one each run.
pub struct CounterCalculation {
    cell: Arc<UIntCell>,
}

impl CounterCalculation {
    pub fn new(cell: Arc<UIntCell>) -> Self {
        Self { cell }
    }
}

impl Calculation for CounterCalculation {
    fn run(&mut self) {
        self.cell.add(1);
    }
}

/// Increments one entry of a shared column by one each run.
///
/// A batch of these, one per entity, is the canonical "engine A" of the
/// barrier-ordering tests.
pub struct ColumnBump {
    column: Arc<UIntColumn>,
    index: usize,
}

impl ColumnBump {
    pub fn new(column: Arc<UIntColumn>, index: usize) -> Self {
        Self { column, index }
    }
}

impl Calculation for ColumnBump {
    fn run(&mut self) {
        self.column.add(self.index, 1);
    }
}

/// Checks that every entry of a column holds the same value, counting
/// violations in a shared cell.
///
/// Run as the engine *after* a [`ColumnBump`] batch, a violation means
/// the barrier let a read overlap the previous engine's writes.
pub struct UniformCheck {
    column: Arc<UIntColumn>,
    violations: Arc<UIntCell>,
}

impl UniformCheck {
    pub fn new(column: Arc<UIntColumn>, violations: Arc<UIntCell>) -> Self {
        Self { column, violations }
    }
}

impl Calculation for UniformCheck {
    fn run(&mut self) {
        if self.column.is_empty() {
            return;
        }
        let first = self.column.get(0);
        for i in 1..self.column.len() {
            if self.column.get(i) != first {
                self.violations.add(1);
                return;
            }
        }
    }
}

/// Sleeps for a fixed duration each run, to skew worker finish times.
pub struct Sleeper {
    duration: Duration,
}

impl Sleeper {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl Calculation for Sleeper {
    fn run(&mut self) {
        thread::sleep(self.duration);
    }
}

/// Does nothing. Useful padding for partition-shape tests.
pub struct Noop;

impl Calculation for Noop {
    fn run(&mut self) {}
}

pub use fixtures::{bump_engine, check_engine};
