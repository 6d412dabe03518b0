//! Worker pool, round barrier, and tick driver for the Orrery
//! simulation scheduler.
//!
//! The driver ([`Sandbox`]) runs every registered engine, in
//! registration order, once per pass, across a fixed pool of persistent
//! worker threads. Work is handed to workers by moving each listing
//! through a channel and collecting it back when the worker finishes —
//! the send/receive pair is both the go/done signalling and the memory
//! barrier between rounds.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod metrics;
pub mod partition;
mod round;
pub mod sandbox;
mod worker;

pub use metrics::PassMetrics;
pub use partition::{partition, span_sizes, Listing};
pub use sandbox::{Sandbox, SandboxConfig, SandboxError};
