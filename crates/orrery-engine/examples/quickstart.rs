//! Orrery quickstart — a complete, minimal simulation from scratch.
//!
//! Demonstrates:
//!   1. Creating a sandbox and declaring store state
//!   2. Implementing a calculation with captured cells
//!   3. Registering engines and the ordering guarantee between them
//!   4. Running synchronous passes and the background driver
//!
//! Run with:
//!   cargo run --example quickstart

use std::sync::Arc;
use std::time::Duration;

use orrery_core::{Calculation, Engine, FloatColumn};
use orrery_engine::{Sandbox, SandboxConfig};

const ENTITIES: usize = 16;
const DECAY: f64 = 0.9;

// ─── A calculation: exponential decay of one entity's energy ────

struct Decay {
    energy: Arc<FloatColumn>,
    index: usize,
}

impl Calculation for Decay {
    fn run(&mut self) {
        let e = self.energy.get(self.index);
        self.energy.set(self.index, e * DECAY);
    }
}

fn main() {
    // 1. Sandbox with a fixed entity count and pool size.
    let mut sandbox = Sandbox::new(SandboxConfig {
        entity_count: ENTITIES,
        seed: 7,
        workers: Some(4),
    })
    .expect("sandbox config is valid");

    // 2. Declare store state and capture the handles.
    let energy = sandbox
        .store_mut()
        .column_float("energy", orrery_core::ColumnInit::Fill(100.0))
        .expect("fresh column");
    let ticks = sandbox
        .store_mut()
        .config_uint("simulation tick", 0)
        .expect("fresh slot");

    // 3. One decay calculation per entity — mutually independent, so
    //    the engine may spread them across the whole pool.
    let mut decay = Engine::new("decay");
    for index in 0..ENTITIES {
        decay.push(Box::new(Decay {
            energy: Arc::clone(&energy),
            index,
        }));
    }
    sandbox.register(decay).expect("sandbox is stopped");

    // A second engine: runs strictly after the decay engine each pass.
    let mut count = Engine::new("count");
    let cell = Arc::clone(&ticks);
    count.push(Box::new(move || cell.add(1)));
    sandbox.register(count).expect("sandbox is stopped");

    // 4a. Synchronous passes.
    sandbox.run_passes(10).expect("sandbox is stopped");
    println!(
        "after {} passes: energy[0] = {:.3}",
        ticks.get(),
        energy.get(0)
    );

    // 4b. The free-running background driver.
    sandbox.start().expect("sandbox was stopped");
    std::thread::sleep(Duration::from_millis(50));
    sandbox.stop().expect("driver joins cleanly");

    let m = sandbox.last_metrics();
    println!(
        "driver ran {} passes total, last pass {} us across {} engines",
        m.passes,
        m.total_us,
        m.engine_us.len()
    );
}
