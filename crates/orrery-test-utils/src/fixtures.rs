//! Fixture builders for common test engine shapes.

use std::sync::Arc;

use orrery_core::{Engine, UIntCell, UIntColumn};

use crate::{ColumnBump, UniformCheck};

/// An engine of one [`ColumnBump`] per entity of `column`.
///
/// Each calculation touches a distinct index, so the batch satisfies the
/// engine independence contract by construction.
pub fn bump_engine(name: &str, column: &Arc<UIntColumn>) -> Engine {
    let mut engine = Engine::new(name);
    for i in 0..column.len() {
        engine.push(Box::new(ColumnBump::new(Arc::clone(column), i)));
    }
    engine
}

/// A single-calculation engine checking `column` for uniformity,
/// counting failures into `violations`.
pub fn check_engine(name: &str, column: &Arc<UIntColumn>, violations: &Arc<UIntCell>) -> Engine {
    let mut engine = Engine::new(name);
    engine.push(Box::new(UniformCheck::new(
        Arc::clone(column),
        Arc::clone(violations),
    )));
    engine
}
