//! Reference physics calculators for the Orrery simulation scheduler.
//!
//! Engine producers built strictly on the public store and scheduling
//! API, one module per physical concern:
//!
//! 1. [`clock`] — advances `"time"` and `"simulation tick"`, fixed or
//!    wall-clock timestep
//! 2. [`gravity`] / [`charges`] — all-pairs force accumulation through
//!    the pairwise scheduler
//! 3. [`motion`] — per-entity Euler integration, consuming and
//!    resetting the force accumulators
//! 4. [`bounds`] — reflecting box walls
//!
//! Registered in that order they form the accumulate-then-resolve tick
//! the driver's barriers make race-free.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bounds;
pub mod charges;
pub mod clock;
mod error;
pub mod gravity;
pub mod motion;
mod util;
pub mod vec3;

pub use error::KernelError;
pub use vec3::Vec3;
