//! The [`Store`]: a global config map and a per-entity column database.
//!
//! Keys are created lazily from declared defaults the first time an
//! engine generator requests them; later requests return the existing
//! entry untouched. The entity count is fixed at construction, so every
//! column is sized once and never reallocated.
//!
//! Range defaults randomise a fresh float column with a `ChaCha8Rng`
//! seeded from the store seed and the column name, so identical setups
//! produce identical worlds.

use std::sync::Arc;

use indexmap::IndexMap;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::cell::{BlobCell, BoolCell, ComplexCell, FloatCell, IntCell, UIntCell};
use crate::column::{
    BlobColumn, BoolColumn, Column, ComplexColumn, FloatColumn, IntColumn, UIntColumn,
};
use crate::error::StoreError;
use crate::value::{Complex, Value, ValueKind};

/// A config entry: one shared scalar cell of a single kind.
#[derive(Clone, Debug)]
pub enum Slot {
    /// A float slot.
    Float(Arc<FloatCell>),
    /// An unsigned-integer slot.
    UInt(Arc<UIntCell>),
    /// A signed-integer slot.
    Int(Arc<IntCell>),
    /// A boolean slot.
    Bool(Arc<BoolCell>),
    /// A complex slot.
    Complex(Arc<ComplexCell>),
    /// A blob slot.
    Blob(Arc<BlobCell>),
}

impl Slot {
    /// The kind of this slot.
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

    /// Read the current value as a [`Value`].
    pub fn value(&self) -> Value {
        match self {
            Self::Float(c) => Value::Float(c.get()),
            Self::UInt(c) => Value::UInt(c.get()),
            Self::Int(c) => Value::Int(c.get()),
            Self::Bool(c) => Value::Bool(c.get()),
            Self::Complex(c) => Value::Complex(c.get()),
            Self::Blob(c) => Value::Blob(c.get()),
        }
    }
}

/// Initialisation rule for a freshly created float column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColumnInit {
    /// Every cell starts at the given value.
    Fill(f64),
    /// Every cell is drawn uniformly from `[min, max)`, once, at
    /// creation. Redeclaration never re-randomises.
    Range {
        /// Inclusive lower bound.
        min: f64,
        /// Exclusive upper bound.
        max: f64,
    },
}

/// FNV-1a over the key name, folded into the column RNG seed.
fn fnv1a(name: &str) -> u64 {
    let mut hash = 0xcbf2_9ce4_8422_2325u64;
    for byte in name.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// Global scalar config and per-entity column database.
///
/// The store is built and populated during setup, before the driver
/// starts; engine generators declare the keys they need and capture the
/// returned `Arc`s. The store itself is never consulted from inside a
/// running round.
#[derive(Debug)]
pub struct Store {
    entity_count: usize,
    seed: u64,
    config: IndexMap<String, Slot>,
    database: IndexMap<String, Column>,
}

impl Store {
    /// Create an empty store for `entity_count` entities.
    ///
    /// `seed` drives range-default randomisation; identical
    /// `(entity_count, seed)` pairs produce identical worlds.
    pub fn new(entity_count: usize, seed: u64) -> Self {
        Self {
            entity_count,
            seed,
            config: IndexMap::new(),
            database: IndexMap::new(),
        }
    }

    /// The fixed number of entities every column is sized to.
    pub fn entity_count(&self) -> usize {
        self.entity_count
    }

    /// The randomisation seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    // ── Config slots ────────────────────────────────────────────

    /// Declare-or-get a float config slot.
    ///
    /// The first call materialises the slot holding `default`;
    /// subsequent calls return the existing cell and ignore `default`.
    pub fn config_float(&mut self, name: &str, default: f64) -> Result<Arc<FloatCell>, StoreError> {
        let slot = self.declare_config(name, || Slot::Float(Arc::new(FloatCell::new(default))));
        match slot {
            Slot::Float(cell) => Ok(cell),
            other => Err(kind_mismatch(name, ValueKind::Float, other.kind())),
        }
    }

    /// Declare-or-get an unsigned-integer config slot.
    pub fn config_uint(&mut self, name: &str, default: u64) -> Result<Arc<UIntCell>, StoreError> {
        let slot = self.declare_config(name, || Slot::UInt(Arc::new(UIntCell::new(default))));
        match slot {
            Slot::UInt(cell) => Ok(cell),
            other => Err(kind_mismatch(name, ValueKind::UInt, other.kind())),
        }
    }

    /// Declare-or-get a signed-integer config slot.
    pub fn config_int(&mut self, name: &str, default: i64) -> Result<Arc<IntCell>, StoreError> {
        let slot = self.declare_config(name, || Slot::Int(Arc::new(IntCell::new(default))));
        match slot {
            Slot::Int(cell) => Ok(cell),
            other => Err(kind_mismatch(name, ValueKind::Int, other.kind())),
        }
    }

    /// Declare-or-get a boolean config slot.
    pub fn config_bool(&mut self, name: &str, default: bool) -> Result<Arc<BoolCell>, StoreError> {
        let slot = self.declare_config(name, || Slot::Bool(Arc::new(BoolCell::new(default))));
        match slot {
            Slot::Bool(cell) => Ok(cell),
            other => Err(kind_mismatch(name, ValueKind::Bool, other.kind())),
        }
    }

    /// Declare-or-get a complex config slot.
    pub fn config_complex(
        &mut self,
        name: &str,
        default: Complex,
    ) -> Result<Arc<ComplexCell>, StoreError> {
        let slot =
            self.declare_config(name, || Slot::Complex(Arc::new(ComplexCell::new(default))));
        match slot {
            Slot::Complex(cell) => Ok(cell),
            other => Err(kind_mismatch(name, ValueKind::Complex, other.kind())),
        }
    }

    /// Declare-or-get a blob config slot.
    pub fn config_blob(
        &mut self,
        name: &str,
        default: Arc<[u8]>,
    ) -> Result<Arc<BlobCell>, StoreError> {
        let slot = self.declare_config(name, || Slot::Blob(Arc::new(BlobCell::new(default))));
        match slot {
            Slot::Blob(cell) => Ok(cell),
            other => Err(kind_mismatch(name, ValueKind::Blob, other.kind())),
        }
    }

    /// Declare-or-get a config slot from a generic [`Value`] default.
    pub fn config(&mut self, name: &str, default: Value) -> Result<Slot, StoreError> {
        let slot = match default {
            Value::Float(v) => Slot::Float(self.config_float(name, v)?),
            Value::UInt(v) => Slot::UInt(self.config_uint(name, v)?),
            Value::Int(v) => Slot::Int(self.config_int(name, v)?),
            Value::Bool(v) => Slot::Bool(self.config_bool(name, v)?),
            Value::Complex(v) => Slot::Complex(self.config_complex(name, v)?),
            Value::Blob(v) => Slot::Blob(self.config_blob(name, v)?),
        };
        Ok(slot)
    }

    fn declare_config(&mut self, name: &str, build: impl FnOnce() -> Slot) -> Slot {
        if let Some(existing) = self.config.get(name) {
            return existing.clone();
        }
        let slot = build();
        self.config.insert(name.to_string(), slot.clone());
        slot
    }

    /// Look up an existing config slot without declaring a default.
    ///
    /// This is the fatal-at-call-site path: a missing entry means the
    /// caller's setup order is wrong.
    pub fn lookup_config(&self, name: &str) -> Result<&Slot, StoreError> {
        self.config.get(name).ok_or_else(|| StoreError::MissingConfig {
            name: name.to_string(),
        })
    }

    /// Iterate config keys in declaration order.
    pub fn config_keys(&self) -> impl Iterator<Item = &str> {
        self.config.keys().map(String::as_str)
    }

    // ── Columns ─────────────────────────────────────────────────

    /// Declare-or-get a float column.
    ///
    /// The first call materialises a column of `entity_count` cells per
    /// `init`; subsequent calls return the existing column untouched —
    /// a `Range` init never re-randomises.
    pub fn column_float(
        &mut self,
        name: &str,
        init: ColumnInit,
    ) -> Result<Arc<FloatColumn>, StoreError> {
        if let Some(existing) = self.database.get(name) {
            return match existing {
                Column::Float(col) => Ok(Arc::clone(col)),
                other => Err(kind_mismatch(name, ValueKind::Float, other.kind())),
            };
        }
        let column = Arc::new(self.build_float_column(name, init)?);
        self.database
            .insert(name.to_string(), Column::Float(Arc::clone(&column)));
        Ok(column)
    }

    fn build_float_column(&self, name: &str, init: ColumnInit) -> Result<FloatColumn, StoreError> {
        match init {
            ColumnInit::Fill(v) => Ok(FloatColumn::filled(self.entity_count, v)),
            ColumnInit::Range { min, max } => {
                if !(min < max) || !min.is_finite() || !max.is_finite() {
                    return Err(StoreError::InvalidRange {
                        name: name.to_string(),
                        min,
                        max,
                    });
                }
                let mut rng = ChaCha8Rng::seed_from_u64(self.seed ^ fnv1a(name));
                let values = (0..self.entity_count)
                    .map(|_| rng.gen_range(min..max))
                    .collect();
                Ok(FloatColumn::from_values(values))
            }
        }
    }

    /// Declare-or-get an unsigned-integer column filled with `default`.
    pub fn column_uint(&mut self, name: &str, default: u64) -> Result<Arc<UIntColumn>, StoreError> {
        if let Some(existing) = self.database.get(name) {
            return match existing {
                Column::UInt(col) => Ok(Arc::clone(col)),
                other => Err(kind_mismatch(name, ValueKind::UInt, other.kind())),
            };
        }
        let column = Arc::new(UIntColumn::filled(self.entity_count, default));
        self.database
            .insert(name.to_string(), Column::UInt(Arc::clone(&column)));
        Ok(column)
    }

    /// Declare-or-get a signed-integer column filled with `default`.
    pub fn column_int(&mut self, name: &str, default: i64) -> Result<Arc<IntColumn>, StoreError> {
        if let Some(existing) = self.database.get(name) {
            return match existing {
                Column::Int(col) => Ok(Arc::clone(col)),
                other => Err(kind_mismatch(name, ValueKind::Int, other.kind())),
            };
        }
        let column = Arc::new(IntColumn::filled(self.entity_count, default));
        self.database
            .insert(name.to_string(), Column::Int(Arc::clone(&column)));
        Ok(column)
    }

    /// Declare-or-get a boolean column filled with `default`.
    pub fn column_bool(&mut self, name: &str, default: bool) -> Result<Arc<BoolColumn>, StoreError> {
        if let Some(existing) = self.database.get(name) {
            return match existing {
                Column::Bool(col) => Ok(Arc::clone(col)),
                other => Err(kind_mismatch(name, ValueKind::Bool, other.kind())),
            };
        }
        let column = Arc::new(BoolColumn::filled(self.entity_count, default));
        self.database
            .insert(name.to_string(), Column::Bool(Arc::clone(&column)));
        Ok(column)
    }

    /// Declare-or-get a complex column filled with `default`.
    pub fn column_complex(
        &mut self,
        name: &str,
        default: Complex,
    ) -> Result<Arc<ComplexColumn>, StoreError> {
        if let Some(existing) = self.database.get(name) {
            return match existing {
                Column::Complex(col) => Ok(Arc::clone(col)),
                other => Err(kind_mismatch(name, ValueKind::Complex, other.kind())),
            };
        }
        let column = Arc::new(ComplexColumn::filled(self.entity_count, default));
        self.database
            .insert(name.to_string(), Column::Complex(Arc::clone(&column)));
        Ok(column)
    }

    /// Declare-or-get a blob column filled with `default`.
    pub fn column_blob(
        &mut self,
        name: &str,
        default: Arc<[u8]>,
    ) -> Result<Arc<BlobColumn>, StoreError> {
        if let Some(existing) = self.database.get(name) {
            return match existing {
                Column::Blob(col) => Ok(Arc::clone(col)),
                other => Err(kind_mismatch(name, ValueKind::Blob, other.kind())),
            };
        }
        let column = Arc::new(BlobColumn::filled(self.entity_count, default));
        self.database
            .insert(name.to_string(), Column::Blob(Arc::clone(&column)));
        Ok(column)
    }

    /// Look up an existing column without declaring a default.
    pub fn lookup_column(&self, name: &str) -> Result<&Column, StoreError> {
        self.database
            .get(name)
            .ok_or_else(|| StoreError::MissingColumn {
                name: name.to_string(),
            })
    }

    /// Iterate column keys in declaration order.
    pub fn column_keys(&self) -> impl Iterator<Item = &str> {
        self.database.keys().map(String::as_str)
    }
}

fn kind_mismatch(name: &str, requested: ValueKind, existing: ValueKind) -> StoreError {
    StoreError::KindMismatch {
        name: name.to_string(),
        requested,
        existing,
    }
}
