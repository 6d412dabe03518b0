//! Clock engines: advance `"time"` and `"simulation tick"` each pass.
//!
//! Three flavours. [`constant`] adds a fixed `"time change"` each pass
//! and is fully deterministic. [`realtime`] measures the wall-clock
//! interval since its previous pass and publishes it as the timestep —
//! the first pass only anchors the clock. [`constrained`] is realtime
//! with the measured interval clamped, so a paused or stalled process
//! cannot inject a huge step into the integrators.
//!
//! Each clock is a single-calculation engine; register it first so
//! every other engine in the pass sees the fresh timestep.

use std::sync::Arc;
use std::time::Instant;

use orrery_core::{Calculation, Engine, FloatCell, Store, StoreError, UIntCell};

/// Default fixed timestep, in seconds.
pub const DEFAULT_TIME_CHANGE: f64 = 1e-6;

struct ConstantClock {
    time: Arc<FloatCell>,
    time_change: Arc<FloatCell>,
    tick: Arc<UIntCell>,
}

impl Calculation for ConstantClock {
    fn run(&mut self) {
        self.time.add(self.time_change.get());
        self.tick.add(1);
    }
}

/// A fixed-timestep clock engine.
///
/// Declares `"time"` (0.0), `"time change"`
/// ([`DEFAULT_TIME_CHANGE`]), and `"simulation tick"` (0). Each pass:
/// `time += time change`, `tick += 1`. Adjust the step by writing the
/// `"time change"` cell between passes.
pub fn constant(store: &mut Store) -> Result<Engine, StoreError> {
    let time = store.config_float("time", 0.0)?;
    let time_change = store.config_float("time change", DEFAULT_TIME_CHANGE)?;
    let tick = store.config_uint("simulation tick", 0)?;

    let mut engine = Engine::new("clock: constant");
    engine.push(Box::new(ConstantClock {
        time,
        time_change,
        tick,
    }));
    Ok(engine)
}

struct RealtimeClock {
    last: Option<Instant>,
    clamp: Option<(f64, f64)>,
    time: Arc<FloatCell>,
    time_change: Arc<FloatCell>,
    tick: Arc<UIntCell>,
}

impl Calculation for RealtimeClock {
    fn run(&mut self) {
        let now = Instant::now();
        let Some(last) = self.last.replace(now) else {
            // First pass anchors the clock; no time has passed yet.
            return;
        };
        let mut dt = now.duration_since(last).as_secs_f64();
        if let Some((min, max)) = self.clamp {
            dt = dt.clamp(min, max);
        }
        self.time_change.set(dt);
        self.time.add(dt);
        self.tick.add(1);
    }
}

/// A wall-clock engine: the timestep is the measured interval between
/// passes.
///
/// Declares the same keys as [`constant`].
pub fn realtime(store: &mut Store) -> Result<Engine, StoreError> {
    realtime_engine(store, None)
}

/// A wall-clock engine with the measured interval clamped to
/// `[min, max]` seconds.
pub fn constrained(store: &mut Store, min: f64, max: f64) -> Result<Engine, StoreError> {
    realtime_engine(store, Some((min, max)))
}

fn realtime_engine(store: &mut Store, clamp: Option<(f64, f64)>) -> Result<Engine, StoreError> {
    let time = store.config_float("time", 0.0)?;
    let time_change = store.config_float("time change", DEFAULT_TIME_CHANGE)?;
    let tick = store.config_uint("simulation tick", 0)?;

    let mut engine = Engine::new(if clamp.is_some() {
        "clock: constrained realtime"
    } else {
        "clock: realtime"
    });
    engine.push(Box::new(RealtimeClock {
        last: None,
        clamp,
        time,
        time_change,
        tick,
    }));
    Ok(engine)
}
