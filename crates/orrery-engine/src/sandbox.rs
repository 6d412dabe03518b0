//! The [`Sandbox`]: driver lifecycle, engine registration, and the
//! driving loop.
//!
//! A sandbox owns the store and the registered engines. While running,
//! the engines (as rounds) live exclusively inside the driving thread —
//! moved in at [`start`](Sandbox::start) and recovered through the
//! `JoinHandle` at [`stop`](Sandbox::stop) — so no lock guards the hot
//! path. The driving thread never executes calculations itself; it
//! sequences rounds and blocks on their barriers.

use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::bounded;

use orrery_core::{Engine, EngineId, Store};

use crate::metrics::PassMetrics;
use crate::round::Round;
use crate::worker::WorkerPool;

// ── SandboxConfig ───────────────────────────────────────────────

/// Configuration for constructing a [`Sandbox`].
#[derive(Clone, Debug)]
pub struct SandboxConfig {
    /// Number of simulated entities. Fixed for the sandbox's lifetime;
    /// every column is sized to it. Zero is legal (a config-only
    /// simulation).
    pub entity_count: usize,
    /// Seed for range-default column randomisation.
    pub seed: u64,
    /// Worker pool size. `None` auto-detects from
    /// `available_parallelism`, clamped to `[1, 32]`.
    pub workers: Option<usize>,
}

impl SandboxConfig {
    /// Config for `entity_count` entities with seed 0 and an
    /// auto-detected pool.
    pub fn new(entity_count: usize) -> Self {
        Self {
            entity_count,
            seed: 0,
            workers: None,
        }
    }

    /// Resolve the actual pool size, applying auto-detection if `None`.
    ///
    /// An explicit zero is rejected: a sandbox with no workers could
    /// never run a round.
    pub fn resolved_workers(&self) -> Result<usize, SandboxError> {
        match self.workers {
            Some(0) => Err(SandboxError::ZeroWorkers),
            Some(n) => Ok(n),
            None => {
                let cpus = thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(4);
                Ok(cpus.clamp(1, 32))
            }
        }
    }
}

// ── SandboxError ────────────────────────────────────────────────

/// Errors from sandbox construction and lifecycle transitions.
#[derive(Debug, PartialEq, Eq)]
pub enum SandboxError {
    /// `workers` was explicitly zero.
    ZeroWorkers,
    /// The operation requires a stopped sandbox (register, start,
    /// synchronous passes) but the driver is running.
    Running,
    /// A worker or driver thread could not be spawned.
    ThreadSpawnFailed {
        /// OS-level failure description.
        reason: String,
    },
    /// The driving thread panicked, which means a calculation panicked.
    /// The registered engines are lost; the store survives.
    DriverPanicked,
}

impl fmt::Display for SandboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroWorkers => write!(f, "worker pool size must be at least 1"),
            Self::Running => write!(f, "operation requires a stopped sandbox"),
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "thread spawn failed: {reason}")
            }
            Self::DriverPanicked => {
                write!(f, "driving thread panicked (a calculation is defective)")
            }
        }
    }
}

impl Error for SandboxError {}

// ── Sandbox ─────────────────────────────────────────────────────

/// Handle to the running driving thread.
struct Driver {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<(Vec<Round>, WorkerPool)>,
}

/// The driver: owns the store, the worker pool, and the ordered list of
/// rounds, one per registered engine.
///
/// States: *stopped* (initial; engines may be registered) and *running*
/// (a driving thread repeats every round in registration order until
/// [`stop`](Sandbox::stop)). Engines are append-only; registering while
/// running is a checked [`SandboxError::Running`] rather than a caller
/// obligation.
///
/// # Example
///
/// ```
/// use orrery_engine::{Sandbox, SandboxConfig};
/// use orrery_core::Engine;
///
/// let mut sandbox = Sandbox::new(SandboxConfig::new(0)).unwrap();
/// let tick = sandbox.store_mut().config_uint("simulation tick", 0).unwrap();
///
/// let mut engine = Engine::new("tick");
/// let cell = std::sync::Arc::clone(&tick);
/// engine.push(Box::new(move || cell.add(1)));
/// sandbox.register(engine).unwrap();
///
/// sandbox.run_passes(5).unwrap();
/// assert_eq!(tick.get(), 5);
/// ```
pub struct Sandbox {
    store: Store,
    workers: usize,
    names: Vec<String>,
    /// `Some` exactly while stopped; moved into the driving thread while
    /// running.
    rounds: Option<Vec<Round>>,
    driver: Option<Driver>,
    passes: Arc<AtomicU64>,
    metrics: Arc<Mutex<PassMetrics>>,
}

impl Sandbox {
    /// Create a stopped sandbox from `config`.
    pub fn new(config: SandboxConfig) -> Result<Self, SandboxError> {
        let workers = config.resolved_workers()?;
        Ok(Self {
            store: Store::new(config.entity_count, config.seed),
            workers,
            names: Vec::new(),
            rounds: Some(Vec::new()),
            driver: None,
            passes: Arc::new(AtomicU64::new(0)),
            metrics: Arc::new(Mutex::new(PassMetrics::default())),
        })
    }

    /// Shared access to the store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Mutable access to the store, for engine generators declaring
    /// their keys during setup.
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// The resolved worker pool size.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// The fixed entity count.
    pub fn entity_count(&self) -> usize {
        self.store.entity_count()
    }

    /// Names of the registered engines, in registration order.
    pub fn engine_names(&self) -> &[String] {
        &self.names
    }

    /// Register an engine, appending its round.
    ///
    /// The round is partitioned against the current pool size. Returns
    /// [`SandboxError::Running`] while the driver is running.
    pub fn register(&mut self, engine: Engine) -> Result<EngineId, SandboxError> {
        let rounds = self.rounds.as_mut().ok_or(SandboxError::Running)?;
        let (name, calcs) = engine.into_parts();
        self.names.push(name.clone());
        rounds.push(Round::new(name, calcs, self.workers));
        Ok(EngineId((rounds.len() - 1) as u32))
    }

    /// `true` while the driving thread is alive.
    pub fn is_running(&self) -> bool {
        self.driver.is_some()
    }

    /// Number of complete passes executed since construction.
    ///
    /// One pass runs every registered engine once — one simulation tick.
    pub fn pass_count(&self) -> u64 {
        self.passes.load(Ordering::Relaxed)
    }

    /// Timing of the most recent pass.
    pub fn last_metrics(&self) -> PassMetrics {
        self.metrics
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    /// Spin up the worker pool and the driving thread.
    ///
    /// The driving thread repeats every round in registration order
    /// until [`stop`](Sandbox::stop); the stop flag is checked between
    /// passes, never mid-pass.
    pub fn start(&mut self) -> Result<(), SandboxError> {
        if self.driver.is_some() {
            return Err(SandboxError::Running);
        }
        let rounds = self.rounds.take().ok_or(SandboxError::Running)?;

        let pool = match WorkerPool::spawn(self.workers) {
            Ok(pool) => pool,
            Err(e) => {
                self.rounds = Some(rounds);
                return Err(e);
            }
        };

        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let passes = Arc::clone(&self.passes);
        let metrics = Arc::clone(&self.metrics);

        // The rounds and pool are handed over only after the spawn
        // succeeds, so a spawn failure cannot lose the engines.
        let (init_tx, init_rx) = bounded::<(Vec<Round>, WorkerPool)>(1);
        let spawned = thread::Builder::new()
            .name("orrery-driver".into())
            .spawn(move || {
                let (mut rounds, pool) = init_rx
                    .recv()
                    .expect("driver initialisation channel disconnected");
                while !stop_flag.load(Ordering::Acquire) {
                    run_pass(&mut rounds, &pool, &passes, &metrics);
                }
                (rounds, pool)
            });

        match spawned {
            Ok(handle) => {
                init_tx
                    .send((rounds, pool))
                    .expect("driver thread exited before initialisation");
                self.driver = Some(Driver { stop, handle });
                Ok(())
            }
            Err(e) => {
                self.rounds = Some(rounds);
                pool.shutdown();
                Err(SandboxError::ThreadSpawnFailed {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Cooperatively stop the driving thread.
    ///
    /// Waits for the in-flight pass to finish, joins the driving
    /// thread, recovers the rounds, and tears the worker pool down. A
    /// no-op on a stopped sandbox.
    pub fn stop(&mut self) -> Result<(), SandboxError> {
        let Some(driver) = self.driver.take() else {
            return Ok(());
        };
        driver.stop.store(true, Ordering::Release);
        match driver.handle.join() {
            Ok((rounds, pool)) => {
                pool.shutdown();
                self.rounds = Some(rounds);
                Ok(())
            }
            Err(_) => {
                // The panic unwound the driving thread, dropping the
                // rounds and the pool's senders; workers have exited.
                self.rounds = Some(Vec::new());
                self.names.clear();
                Err(SandboxError::DriverPanicked)
            }
        }
    }

    /// Run `n` complete passes synchronously on the caller's thread.
    ///
    /// Spins the pool up, drives it with the same round protocol as the
    /// background loop, and tears it down again. Useful for batch runs
    /// and tests that need a deterministic number of ticks.
    pub fn run_passes(&mut self, n: u64) -> Result<(), SandboxError> {
        if self.driver.is_some() {
            return Err(SandboxError::Running);
        }
        let rounds = self
            .rounds
            .as_mut()
            .expect("stopped sandbox must own its rounds");
        let pool = WorkerPool::spawn(self.workers)?;
        for _ in 0..n {
            run_pass(rounds, &pool, &self.passes, &self.metrics);
        }
        pool.shutdown();
        Ok(())
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        // Best-effort cooperative stop; registered engines then drop,
        // releasing every calculation's captured state exactly once.
        let _ = self.stop();
    }
}

impl fmt::Debug for Sandbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sandbox")
            .field("entity_count", &self.store.entity_count())
            .field("workers", &self.workers)
            .field("engines", &self.names.len())
            .field("running", &self.driver.is_some())
            .field("passes", &self.pass_count())
            .finish()
    }
}

/// Run every round once, in registration order, and publish metrics.
fn run_pass(
    rounds: &mut [Round],
    pool: &WorkerPool,
    passes: &AtomicU64,
    metrics: &Mutex<PassMetrics>,
) {
    let pass_start = Instant::now();
    let mut engine_us = Vec::with_capacity(rounds.len());
    for round in rounds.iter_mut() {
        let round_start = Instant::now();
        round.run(pool);
        engine_us.push((
            round.name().to_string(),
            round_start.elapsed().as_micros() as u64,
        ));
    }
    let total = passes.fetch_add(1, Ordering::Relaxed) + 1;
    let mut m = metrics.lock().unwrap_or_else(|p| p.into_inner());
    m.passes = total;
    m.total_us = pass_start.elapsed().as_micros() as u64;
    m.engine_us = engine_us;
}
