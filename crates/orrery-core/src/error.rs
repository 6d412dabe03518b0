//! Error types for store access and declaration.

use std::error::Error;
use std::fmt;

use crate::value::ValueKind;

/// Errors from [`Store`](crate::store::Store) declaration and lookup.
///
/// All store errors are configuration errors in the sense of the setup
/// phase: they surface synchronously to the caller building an engine,
/// before the driver starts. Nothing inside a running round produces a
/// `StoreError`.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreError {
    /// A config slot was looked up with no declared default and no
    /// existing entry.
    MissingConfig {
        /// The requested key.
        name: String,
    },
    /// A column was looked up with no declared default and no existing
    /// entry.
    MissingColumn {
        /// The requested key.
        name: String,
    },
    /// An existing entry was redeclared with a different kind.
    KindMismatch {
        /// The requested key.
        name: String,
        /// The kind requested by the caller.
        requested: ValueKind,
        /// The kind of the existing entry.
        existing: ValueKind,
    },
    /// A range default was declared with `min >= max` or a non-finite
    /// bound, so no distribution can be drawn from it.
    InvalidRange {
        /// The requested key.
        name: String,
        /// Lower bound as declared.
        min: f64,
        /// Upper bound as declared.
        max: f64,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingConfig { name } => {
                write!(f, "config slot '{name}' does not exist and no default was declared")
            }
            Self::MissingColumn { name } => {
                write!(f, "column '{name}' does not exist and no default was declared")
            }
            Self::KindMismatch {
                name,
                requested,
                existing,
            } => {
                write!(f, "'{name}' is a {existing} entry, requested as {requested}")
            }
            Self::InvalidRange { name, min, max } => {
                write!(f, "range default for '{name}' is invalid: [{min}, {max})")
            }
        }
    }
}

impl Error for StoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_key() {
        let e = StoreError::KindMismatch {
            name: "mass".into(),
            requested: ValueKind::UInt,
            existing: ValueKind::Float,
        };
        let msg = e.to_string();
        assert!(msg.contains("mass"));
        assert!(msg.contains("float"));
        assert!(msg.contains("uint"));
    }
}
