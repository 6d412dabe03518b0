//! A two-body orbit driven by the reference kernels.
//!
//! A light satellite circles a heavy primary: gravity accumulates the
//! pair force through the conflict-free schedule, then the integrator
//! resolves it — the accumulate-then-resolve split the round barriers
//! guarantee.
//!
//! Run with:
//!   cargo run --example orbit

use orrery_core::ColumnInit;
use orrery_engine::{Sandbox, SandboxConfig};
use orrery_kernels::{clock, gravity, motion};

const PRIMARY_MASS: f64 = 1.0e6;
const RADIUS: f64 = 10.0;
const STEPS: u64 = 20_000;

fn main() {
    let mut sandbox = Sandbox::new(SandboxConfig {
        entity_count: 2,
        seed: 0,
        workers: None,
    })
    .expect("sandbox config is valid");

    let engine = clock::constant(sandbox.store_mut()).expect("clock setup");
    sandbox.register(engine).expect("sandbox is stopped");
    gravity::newtonian(&mut sandbox).expect("gravity setup");
    let engine = motion::classical(sandbox.store_mut()).expect("motion setup");
    sandbox.register(engine).expect("sandbox is stopped");

    let store = sandbox.store_mut();
    store
        .config_float("gravitational constant", 0.0)
        .expect("declared by gravity")
        .set(1.0);
    store
        .config_float("time change", 0.0)
        .expect("declared by clock")
        .set(1e-3);

    let px = store
        .column_float("x position", ColumnInit::Fill(0.0))
        .expect("declared by gravity");
    let py = store
        .column_float("y position", ColumnInit::Fill(0.0))
        .expect("declared by gravity");
    let vy = store
        .column_float("y velocity", ColumnInit::Fill(0.0))
        .expect("declared by motion");
    let mass = store
        .column_float("mass", ColumnInit::Fill(1.0))
        .expect("declared by gravity");

    // Entity 0: the primary. Entity 1: a satellite on a circular orbit,
    // v = sqrt(G·M / r).
    mass.set(0, PRIMARY_MASS);
    px.set(1, RADIUS);
    vy.set(1, (PRIMARY_MASS / RADIUS).sqrt());

    for checkpoint in 0..4 {
        sandbox.run_passes(STEPS / 4).expect("sandbox is stopped");
        let r = (px.get(1).powi(2) + py.get(1).powi(2)).sqrt();
        println!(
            "t = {:>6.3}s  satellite at ({:>7.3}, {:>7.3})  r = {:.3}",
            (checkpoint + 1) as f64 * STEPS as f64 / 4.0 * 1e-3,
            px.get(1),
            py.get(1),
            r
        );
    }
    println!("orbit radius should stay near {RADIUS}");
}
