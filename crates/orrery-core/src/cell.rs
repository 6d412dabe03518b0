//! Shared scalar cells: the unit of mutable state handed to calculations.
//!
//! A cell is an `Arc`-shareable slot holding one [`Value`](crate::Value)
//! variant. Numeric cells are backed by atomics and accessed with
//! `Relaxed` ordering: the driver's channel rendezvous establishes a
//! happens-before edge between rounds, and *within* a round the
//! scheduler's disjointness invariant guarantees a single writer per
//! cell. A violated invariant therefore corrupts a number, never memory.
//!
//! [`add`](FloatCell::add)-style accumulators are plain load-then-store,
//! not atomic RMW — they rely on the single-writer contract.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::value::Complex;

/// A shared double-precision float cell (f64 bits in an `AtomicU64`).
#[derive(Debug)]
pub struct FloatCell(AtomicU64);

impl FloatCell {
    /// Create a cell holding `v`.
    pub fn new(v: f64) -> Self {
        Self(AtomicU64::new(v.to_bits()))
    }

    /// Read the current value.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    /// Overwrite the current value.
    pub fn set(&self, v: f64) {
        self.0.store(v.to_bits(), Ordering::Relaxed);
    }

    /// Accumulate `dv` onto the current value. Single-writer contract.
    pub fn add(&self, dv: f64) {
        self.set(self.get() + dv);
    }
}

/// A shared unsigned integer cell.
#[derive(Debug)]
pub struct UIntCell(AtomicU64);

impl UIntCell {
    /// Create a cell holding `v`.
    pub fn new(v: u64) -> Self {
        Self(AtomicU64::new(v))
    }

    /// Read the current value.
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    /// Overwrite the current value.
    pub fn set(&self, v: u64) {
        self.0.store(v, Ordering::Relaxed);
    }

    /// Accumulate `dv` onto the current value. Single-writer contract.
    pub fn add(&self, dv: u64) {
        self.set(self.get().wrapping_add(dv));
    }
}

/// A shared signed integer cell.
#[derive(Debug)]
pub struct IntCell(AtomicI64);

impl IntCell {
    /// Create a cell holding `v`.
    pub fn new(v: i64) -> Self {
        Self(AtomicI64::new(v))
    }

    /// Read the current value.
    pub fn get(&self) -> i64 {
        self.0.load(Ordering::Relaxed)
    }

    /// Overwrite the current value.
    pub fn set(&self, v: i64) {
        self.0.store(v, Ordering::Relaxed);
    }

    /// Accumulate `dv` onto the current value. Single-writer contract.
    pub fn add(&self, dv: i64) {
        self.set(self.get().wrapping_add(dv));
    }
}

/// A shared boolean cell.
#[derive(Debug)]
pub struct BoolCell(AtomicBool);

impl BoolCell {
    /// Create a cell holding `v`.
    pub fn new(v: bool) -> Self {
        Self(AtomicBool::new(v))
    }

    /// Read the current value.
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Overwrite the current value.
    pub fn set(&self, v: bool) {
        self.0.store(v, Ordering::Relaxed);
    }
}

/// A shared complex float cell: a re/im pair of [`FloatCell`]s.
///
/// The two halves are separate atomics; the single-writer contract makes
/// the pair consistent within a round.
#[derive(Debug)]
pub struct ComplexCell {
    re: FloatCell,
    im: FloatCell,
}

impl ComplexCell {
    /// Create a cell holding `v`.
    pub fn new(v: Complex) -> Self {
        Self {
            re: FloatCell::new(v.re),
            im: FloatCell::new(v.im),
        }
    }

    /// Read the current value.
    pub fn get(&self) -> Complex {
        Complex {
            re: self.re.get(),
            im: self.im.get(),
        }
    }

    /// Overwrite the current value.
    pub fn set(&self, v: Complex) {
        self.re.set(v.re);
        self.im.set(v.im);
    }

    /// Accumulate `dv` onto the current value. Single-writer contract.
    pub fn add(&self, dv: Complex) {
        self.set(self.get() + dv);
    }
}

/// A shared opaque blob cell.
///
/// Blobs are relocatable only as a unit, so the cell swaps whole
/// refcounted buffers behind a mutex rather than exposing bytes for
/// in-place mutation. Contention never occurs under the disjointness
/// invariant; the lock is the cheapest correct representation.
#[derive(Debug)]
pub struct BlobCell(Mutex<Arc<[u8]>>);

impl BlobCell {
    /// Create a cell holding `bytes`.
    pub fn new(bytes: Arc<[u8]>) -> Self {
        Self(Mutex::new(bytes))
    }

    /// Read the current blob (cheap refcount clone).
    pub fn get(&self) -> Arc<[u8]> {
        Arc::clone(&self.0.lock().unwrap_or_else(|p| p.into_inner()))
    }

    /// Replace the current blob.
    pub fn set(&self, bytes: Arc<[u8]>) {
        *self.0.lock().unwrap_or_else(|p| p.into_inner()) = bytes;
    }
}
