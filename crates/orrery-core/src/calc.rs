//! The [`Calculation`] unit of work and the [`Engine`] batch type.

/// One opaque unit of work executed by a worker each round.
///
/// A calculation owns its captured state — typically `Arc`s to the cells
/// and columns it touches plus the entity indices it covers. Dropping
/// the calculation is its cleanup: there is no separate destructor to
/// register or forget.
///
/// # Contract
///
/// - `run()` must confine its side effects to the state captured at
///   build time.
/// - A calculation that panics or never returns is a programming defect;
///   the scheduler has no mid-round recovery (a hung calculation hangs
///   the driver).
/// - `&mut self` — per-calculation state (e.g. a wall-clock anchor) is
///   private and mutable; shared simulation state goes through cells.
///
/// # Object safety
///
/// The trait is object-safe; engines store calculations as
/// `Vec<Box<dyn Calculation>>`.
pub trait Calculation: Send + 'static {
    /// Execute the calculation once.
    fn run(&mut self);
}

impl<F> Calculation for F
where
    F: FnMut() + Send + 'static,
{
    fn run(&mut self) {
        self()
    }
}

/// A named, ordered batch of mutually independent calculations.
///
/// # Independence contract
///
/// No two calculations in the same engine may touch overlapping mutable
/// state: within a round they execute concurrently on different workers
/// with no ordering between them. The engine *author* carries this
/// proof; for all-pairs interactions the pairwise scheduler constructs
/// engines that carry it by construction.
///
/// Ownership passes to the sandbox at registration. Dropping an engine
/// drops every calculation exactly once, which releases their captured
/// state.
pub struct Engine {
    name: String,
    calcs: Vec<Box<dyn Calculation>>,
}

impl Engine {
    /// Create an empty engine with a diagnostic name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            calcs: Vec::new(),
        }
    }

    /// Append a calculation. Order is execution order within one worker's
    /// listing.
    pub fn push(&mut self, calc: Box<dyn Calculation>) {
        self.calcs.push(calc);
    }

    /// The engine's diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of calculations in the batch.
    pub fn len(&self) -> usize {
        self.calcs.len()
    }

    /// `true` if the engine has no calculations.
    pub fn is_empty(&self) -> bool {
        self.calcs.is_empty()
    }

    /// Decompose into name and calculation list, for partitioning.
    pub fn into_parts(self) -> (String, Vec<Box<dyn Calculation>>) {
        (self.name, self.calcs)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("name", &self.name)
            .field("calcs", &self.calcs.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn closures_are_calculations() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let mut calc: Box<dyn Calculation> = Box::new(move || {
            h.fetch_add(1, Ordering::Relaxed);
        });
        calc.run();
        calc.run();
        assert_eq!(hits.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn engine_preserves_push_order() {
        let mut engine = Engine::new("test");
        assert!(engine.is_empty());
        for _ in 0..3 {
            engine.push(Box::new(|| {}));
        }
        assert_eq!(engine.len(), 3);
        let (name, calcs) = engine.into_parts();
        assert_eq!(name, "test");
        assert_eq!(calcs.len(), 3);
    }

    #[test]
    fn dropping_engine_drops_captured_state() {
        struct Probe(Arc<AtomicUsize>);
        impl Drop for Probe {
            fn drop(&mut self) {
                self.0.fetch_add(1, Ordering::Relaxed);
            }
        }
        impl Calculation for Probe {
            fn run(&mut self) {}
        }

        let drops = Arc::new(AtomicUsize::new(0));
        let mut engine = Engine::new("probes");
        for _ in 0..4 {
            engine.push(Box::new(Probe(Arc::clone(&drops))));
        }
        drop(engine);
        assert_eq!(drops.load(Ordering::Relaxed), 4);
    }
}
