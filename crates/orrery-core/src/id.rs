//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a registered engine within a sandbox.
///
/// Engines are registered append-only; `EngineId(n)` is the n-th engine
/// in registration order, which is also its execution position in every
/// pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EngineId(pub u32);

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EngineId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
