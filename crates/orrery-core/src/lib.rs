//! Core types for the Orrery simulation scheduler.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the typed store (scalar slots and per-entity columns), the
//! [`Calculation`] unit of work, the [`Engine`] batch type, and the
//! error types shared across the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod calc;
pub mod cell;
pub mod column;
pub mod error;
pub mod id;
pub mod store;
pub mod value;

pub use calc::{Calculation, Engine};
pub use cell::{BlobCell, BoolCell, ComplexCell, FloatCell, IntCell, UIntCell};
pub use column::{
    BlobColumn, BoolColumn, Column, ComplexColumn, FloatColumn, IntColumn, UIntColumn,
};
pub use error::StoreError;
pub use id::EngineId;
pub use store::{ColumnInit, Slot, Store};
pub use value::{Complex, Value, ValueKind};
