//! Shared column-declaration helpers for the reference kernels.

use std::sync::Arc;

use orrery_core::{ColumnInit, FloatColumn, Store, StoreError};

/// Declare-or-get the x/y/z columns for one vector quantity, named
/// `"x {what}"`, `"y {what}"`, `"z {what}"`.
pub(crate) fn axis_columns(
    store: &mut Store,
    what: &str,
    init: ColumnInit,
) -> Result<[Arc<FloatColumn>; 3], StoreError> {
    Ok([
        store.column_float(&format!("x {what}"), init)?,
        store.column_float(&format!("y {what}"), init)?,
        store.column_float(&format!("z {what}"), init)?,
    ])
}
