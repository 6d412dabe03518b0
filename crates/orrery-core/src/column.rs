//! Fixed-length homogeneous columns: per-entity state planes.
//!
//! A column is a contiguous plane of [cells](crate::cell), one per
//! entity, built once at declaration and never resized. Calculations
//! hold an `Arc` to the column plus the index range they own; because no
//! resize API exists, the captured-reference lifetime contract is
//! structural rather than a runtime obligation.

use std::sync::Arc;

use crate::cell::{BlobCell, BoolCell, ComplexCell, FloatCell, IntCell, UIntCell};
use crate::value::{Complex, Value, ValueKind};

/// A fixed-length plane of [`FloatCell`]s.
#[derive(Debug)]
pub struct FloatColumn {
    cells: Box<[FloatCell]>,
}

impl FloatColumn {
    /// Build a column of `len` cells all holding `v`.
    pub fn filled(len: usize, v: f64) -> Self {
        Self {
            cells: (0..len).map(|_| FloatCell::new(v)).collect(),
        }
    }

    /// Build a column from explicit per-entity values.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self {
            cells: values.into_iter().map(FloatCell::new).collect(),
        }
    }

    /// Number of entities in the column.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` if the column has no entities.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read entity `i`. Panics if `i` is out of bounds.
    pub fn get(&self, i: usize) -> f64 {
        self.cells[i].get()
    }

    /// Overwrite entity `i`. Panics if `i` is out of bounds.
    pub fn set(&self, i: usize, v: f64) {
        self.cells[i].set(v);
    }

    /// Accumulate onto entity `i`. Single-writer contract.
    pub fn add(&self, i: usize, dv: f64) {
        self.cells[i].add(dv);
    }

    /// Copy the whole plane out, for observers between passes.
    pub fn snapshot(&self) -> Vec<f64> {
        self.cells.iter().map(FloatCell::get).collect()
    }
}

/// A fixed-length plane of [`UIntCell`]s.
#[derive(Debug)]
pub struct UIntColumn {
    cells: Box<[UIntCell]>,
}

impl UIntColumn {
    /// Build a column of `len` cells all holding `v`.
    pub fn filled(len: usize, v: u64) -> Self {
        Self {
            cells: (0..len).map(|_| UIntCell::new(v)).collect(),
        }
    }

    /// Number of entities in the column.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` if the column has no entities.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read entity `i`. Panics if `i` is out of bounds.
    pub fn get(&self, i: usize) -> u64 {
        self.cells[i].get()
    }

    /// Overwrite entity `i`. Panics if `i` is out of bounds.
    pub fn set(&self, i: usize, v: u64) {
        self.cells[i].set(v);
    }

    /// Accumulate onto entity `i`. Single-writer contract.
    pub fn add(&self, i: usize, dv: u64) {
        self.cells[i].add(dv);
    }

    /// Copy the whole plane out, for observers between passes.
    pub fn snapshot(&self) -> Vec<u64> {
        self.cells.iter().map(UIntCell::get).collect()
    }
}

/// A fixed-length plane of [`IntCell`]s.
#[derive(Debug)]
pub struct IntColumn {
    cells: Box<[IntCell]>,
}

impl IntColumn {
    /// Build a column of `len` cells all holding `v`.
    pub fn filled(len: usize, v: i64) -> Self {
        Self {
            cells: (0..len).map(|_| IntCell::new(v)).collect(),
        }
    }

    /// Number of entities in the column.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` if the column has no entities.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read entity `i`. Panics if `i` is out of bounds.
    pub fn get(&self, i: usize) -> i64 {
        self.cells[i].get()
    }

    /// Overwrite entity `i`. Panics if `i` is out of bounds.
    pub fn set(&self, i: usize, v: i64) {
        self.cells[i].set(v);
    }

    /// Accumulate onto entity `i`. Single-writer contract.
    pub fn add(&self, i: usize, dv: i64) {
        self.cells[i].add(dv);
    }

    /// Copy the whole plane out, for observers between passes.
    pub fn snapshot(&self) -> Vec<i64> {
        self.cells.iter().map(IntCell::get).collect()
    }
}

/// A fixed-length plane of [`BoolCell`]s.
#[derive(Debug)]
pub struct BoolColumn {
    cells: Box<[BoolCell]>,
}

impl BoolColumn {
    /// Build a column of `len` cells all holding `v`.
    pub fn filled(len: usize, v: bool) -> Self {
        Self {
            cells: (0..len).map(|_| BoolCell::new(v)).collect(),
        }
    }

    /// Number of entities in the column.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` if the column has no entities.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read entity `i`. Panics if `i` is out of bounds.
    pub fn get(&self, i: usize) -> bool {
        self.cells[i].get()
    }

    /// Overwrite entity `i`. Panics if `i` is out of bounds.
    pub fn set(&self, i: usize, v: bool) {
        self.cells[i].set(v);
    }

    /// Copy the whole plane out, for observers between passes.
    pub fn snapshot(&self) -> Vec<bool> {
        self.cells.iter().map(BoolCell::get).collect()
    }
}

/// A fixed-length plane of [`ComplexCell`]s.
#[derive(Debug)]
pub struct ComplexColumn {
    cells: Box<[ComplexCell]>,
}

impl ComplexColumn {
    /// Build a column of `len` cells all holding `v`.
    pub fn filled(len: usize, v: Complex) -> Self {
        Self {
            cells: (0..len).map(|_| ComplexCell::new(v)).collect(),
        }
    }

    /// Number of entities in the column.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` if the column has no entities.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read entity `i`. Panics if `i` is out of bounds.
    pub fn get(&self, i: usize) -> Complex {
        self.cells[i].get()
    }

    /// Overwrite entity `i`. Panics if `i` is out of bounds.
    pub fn set(&self, i: usize, v: Complex) {
        self.cells[i].set(v);
    }

    /// Accumulate onto entity `i`. Single-writer contract.
    pub fn add(&self, i: usize, dv: Complex) {
        self.cells[i].add(dv);
    }

    /// Copy the whole plane out, for observers between passes.
    pub fn snapshot(&self) -> Vec<Complex> {
        self.cells.iter().map(ComplexCell::get).collect()
    }
}

/// A fixed-length plane of [`BlobCell`]s.
#[derive(Debug)]
pub struct BlobColumn {
    cells: Box<[BlobCell]>,
}

impl BlobColumn {
    /// Build a column of `len` cells all holding `bytes`.
    pub fn filled(len: usize, bytes: Arc<[u8]>) -> Self {
        Self {
            cells: (0..len).map(|_| BlobCell::new(Arc::clone(&bytes))).collect(),
        }
    }

    /// Number of entities in the column.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` if the column has no entities.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read entity `i`. Panics if `i` is out of bounds.
    pub fn get(&self, i: usize) -> Arc<[u8]> {
        self.cells[i].get()
    }

    /// Replace entity `i`. Panics if `i` is out of bounds.
    pub fn set(&self, i: usize, bytes: Arc<[u8]>) {
        self.cells[i].set(bytes);
    }
}

/// A database entry: one column of a single [`ValueKind`].
///
/// The store keeps columns behind this enum so observers can walk the
/// database generically; calculations hold the typed `Arc` directly.
#[derive(Clone, Debug)]
pub enum Column {
    /// A float column.
    Float(Arc<FloatColumn>),
    /// An unsigned-integer column.
    UInt(Arc<UIntColumn>),
    /// A signed-integer column.
    Int(Arc<IntColumn>),
    /// A boolean column.
    Bool(Arc<BoolColumn>),
    /// A complex column.
    Complex(Arc<ComplexColumn>),
    /// A blob column.
    Blob(Arc<BlobColumn>),
}

impl Column {
    /// The kind of this column's cells.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Float(_) => ValueKind::Float,
            Self::UInt(_) => ValueKind::UInt,
            Self::Int(_) => ValueKind::Int,
            Self::Bool(_) => ValueKind::Bool,
            Self::Complex(_) => ValueKind::Complex,
            Self::Blob(_) => ValueKind::Blob,
        }
    }

    /// Number of entities in the column.
    pub fn len(&self) -> usize {
        match self {
            Self::Float(c) => c.len(),
            Self::UInt(c) => c.len(),
            Self::Int(c) => c.len(),
            Self::Bool(c) => c.len(),
            Self::Complex(c) => c.len(),
            Self::Blob(c) => c.len(),
        }
    }

    /// `true` if the column has no entities.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read entity `i` as a [`Value`]. Panics if `i` is out of bounds.
    pub fn value_at(&self, i: usize) -> Value {
        match self {
            Self::Float(c) => Value::Float(c.get(i)),
            Self::UInt(c) => Value::UInt(c.get(i)),
            Self::Int(c) => Value::Int(c.get(i)),
            Self::Bool(c) => Value::Bool(c.get(i)),
            Self::Complex(c) => Value::Complex(c.get(i)),
            Self::Blob(c) => Value::Blob(c.get(i)),
        }
    }

    /// The typed float plane, if this is a float column.
    pub fn as_float(&self) -> Option<&Arc<FloatColumn>> {
        match self {
            Self::Float(c) => Some(c),
            _ => None,
        }
    }

    /// The typed unsigned-integer plane, if this is a uint column.
    pub fn as_uint(&self) -> Option<&Arc<UIntColumn>> {
        match self {
            Self::UInt(c) => Some(c),
            _ => None,
        }
    }
}
