//! Conflict-free all-pairs interaction scheduling.
//!
//! An all-pairs interaction over N entities touches two entities'
//! mutable state per pair, which makes naive parallel execution racy.
//! This crate partitions the entities into contiguous [`Group`]s and
//! emits a sequence of engines such that, within any one engine, no two
//! calculations share a group — so each engine is safe to run across
//! the whole pool — while every unordered pair of entities is computed
//! exactly once across the sequence.
//!
//! The cross-group rounds come from a round-robin tournament (circle
//! method) over the groups: the complete graph's edge set, emitted in
//! near-perfect matchings.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod group;
pub mod schedule;

pub use group::{group_entities, Group};
pub use schedule::{register_pairwise, PairKernel, PairRound, PairSchedule, PairTask};
