//! One round: the live execution of one engine across the pool.

use orrery_core::Calculation;

use crate::partition::{listings, Listing};
use crate::worker::WorkerPool;

/// The per-slot listing assignment for one registered engine.
///
/// Built once at registration against the pool size current at that
/// time. `run` executes the engine exactly once across the whole pool
/// and acts as a full barrier: when it returns, every calculation of
/// this engine has completed and its effects are visible to the caller.
pub(crate) struct Round {
    name: String,
    /// Listings for the slots this engine actually uses (`<=` pool
    /// size). `None` only transiently, while a listing is out with its
    /// worker.
    listings: Vec<Option<Listing>>,
}

impl Round {
    /// Partition `calcs` across `pool_size` slots.
    ///
    /// Trailing empty listings are not kept: an engine smaller than the
    /// pool simply leaves the higher slots idle for its round.
    pub fn new(name: String, calcs: Vec<Box<dyn Calculation>>, pool_size: usize) -> Self {
        let listings = listings(calcs, pool_size)
            .into_iter()
            .take_while(|l| !l.is_empty())
            .map(Some)
            .collect();
        Self { name, listings }
    }

    /// The engine's diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of pool slots this round occupies.
    #[cfg(test)]
    pub fn slots_used(&self) -> usize {
        self.listings.len()
    }

    /// Run the round: dispatch every listing, then collect every
    /// listing back in slot order.
    ///
    /// The dispatch phase may start all workers essentially
    /// simultaneously; the collect phase blocks on each slot in order
    /// and re-installs its listing for the next pass. Only after the
    /// last collect may the next engine's round begin.
    pub fn run(&mut self, pool: &WorkerPool) {
        debug_assert!(self.listings.len() <= pool.len());

        for (slot, entry) in self.listings.iter_mut().enumerate() {
            let listing = entry.take().expect("listing missing: round re-entered");
            pool.dispatch(slot, listing);
        }
        for (slot, entry) in self.listings.iter_mut().enumerate() {
            *entry = Some(pool.collect(slot));
        }
    }
}

impl std::fmt::Debug for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Round")
            .field("name", &self.name)
            .field("slots_used", &self.listings.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::UIntCell;
    use std::sync::Arc;

    struct Bump(Arc<UIntCell>);

    impl Calculation for Bump {
        fn run(&mut self) {
            self.0.add(1);
        }
    }

    fn bump_calcs(cells: &[Arc<UIntCell>]) -> Vec<Box<dyn Calculation>> {
        cells
            .iter()
            .map(|c| Box::new(Bump(Arc::clone(c))) as Box<dyn Calculation>)
            .collect()
    }

    #[test]
    fn round_runs_every_calculation_once() {
        let pool = WorkerPool::spawn(3).unwrap();
        let cells: Vec<_> = (0..10).map(|_| Arc::new(UIntCell::new(0))).collect();
        let mut round = Round::new("bump".into(), bump_calcs(&cells), pool.len());

        round.run(&pool);
        for cell in &cells {
            assert_eq!(cell.get(), 1);
        }

        // Listings were re-installed; the round is immediately reusable.
        round.run(&pool);
        for cell in &cells {
            assert_eq!(cell.get(), 2);
        }
        pool.shutdown();
    }

    #[test]
    fn small_engine_uses_fewer_slots() {
        let pool = WorkerPool::spawn(8).unwrap();
        let cells: Vec<_> = (0..3).map(|_| Arc::new(UIntCell::new(0))).collect();
        let mut round = Round::new("small".into(), bump_calcs(&cells), pool.len());

        assert_eq!(round.slots_used(), 3);
        round.run(&pool);
        for cell in &cells {
            assert_eq!(cell.get(), 1);
        }
        pool.shutdown();
    }

    #[test]
    fn empty_engine_round_is_a_noop() {
        let pool = WorkerPool::spawn(2).unwrap();
        let mut round = Round::new("empty".into(), Vec::new(), pool.len());
        assert_eq!(round.slots_used(), 0);
        round.run(&pool);
        pool.shutdown();
    }

    #[test]
    fn name_is_preserved() {
        let round = Round::new("gravity: round 3".into(), Vec::new(), 1);
        assert_eq!(round.name(), "gravity: round 3");
    }
}
