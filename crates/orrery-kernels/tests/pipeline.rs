//! Full-pipeline integration: clock, pairwise forces, integration, and
//! walls composed the way a real simulation registers them.

use orrery_core::ColumnInit;
use orrery_engine::{Sandbox, SandboxConfig};
use orrery_kernels::{bounds, clock, gravity, motion, Vec3};

fn sandbox(entities: usize, seed: u64) -> Sandbox {
    Sandbox::new(SandboxConfig {
        entity_count: entities,
        seed,
        workers: Some(4),
    })
    .unwrap()
}

#[test]
fn two_body_infall_preserves_the_centre_of_mass() {
    let mut sandbox = sandbox(2, 0);

    let engine = clock::constant(sandbox.store_mut()).unwrap();
    sandbox.register(engine).unwrap();
    gravity::newtonian(&mut sandbox).unwrap();
    let engine = motion::classical(sandbox.store_mut()).unwrap();
    sandbox.register(engine).unwrap();

    let store = sandbox.store_mut();
    store.config_float("gravitational constant", 0.0).unwrap().set(1.0);
    store.config_float("time change", 0.0).unwrap().set(1e-3);
    let px = store.column_float("x position", ColumnInit::Fill(0.0)).unwrap();
    px.set(0, -1.0);
    px.set(1, 1.0);

    sandbox.run_passes(200).unwrap();

    let x0 = px.get(0);
    let x1 = px.get(1);
    assert!(x0 > -1.0 && x1 < 1.0, "equal masses fall towards each other");
    assert!(x0 < x1, "bodies must not cross in 200 small steps");
    assert!(
        (x0 + x1).abs() < 1e-9,
        "centre of mass drifted to {}",
        x0 + x1
    );
}

#[test]
fn closed_system_conserves_momentum() {
    let entities = 12;
    let mut sandbox = sandbox(entities, 99);

    gravity::newtonian(&mut sandbox).unwrap();
    let engine = motion::classical(sandbox.store_mut()).unwrap();
    sandbox.register(engine).unwrap();

    let store = sandbox.store_mut();
    store.config_float("gravitational constant", 0.0).unwrap().set(1.0);
    store.config_float("time change", 0.0).unwrap().set(1e-4);
    // Spread the bodies out; the store's seeded RNG keeps this
    // reproducible.
    for axis in ["x position", "y position", "z position"] {
        let col = store.lookup_column(axis).unwrap().as_float().cloned().unwrap();
        let spread = store
            .column_float(&format!("spread {axis}"), ColumnInit::Range { min: 0.0, max: 10.0 })
            .unwrap();
        for i in 0..entities {
            col.set(i, spread.get(i));
        }
    }

    sandbox.run_passes(50).unwrap();

    // Started at rest, pair forces cancel exactly; only float rounding
    // remains.
    let mut momentum = [0.0f64; 3];
    let mass = sandbox
        .store()
        .lookup_column("mass")
        .unwrap()
        .as_float()
        .cloned()
        .unwrap();
    for (axis, total) in momentum.iter_mut().enumerate() {
        let name = ["x velocity", "y velocity", "z velocity"][axis];
        let v = sandbox
            .store()
            .lookup_column(name)
            .unwrap()
            .as_float()
            .cloned()
            .unwrap();
        for i in 0..entities {
            *total += mass.get(i) * v.get(i);
        }
    }
    for (axis, total) in momentum.iter().enumerate() {
        assert!(
            total.abs() < 1e-9,
            "momentum along axis {axis} drifted to {total}"
        );
    }
}

#[test]
fn walls_keep_a_drifting_population_inside_the_box() {
    let entities = 32;
    let mut sandbox = sandbox(entities, 3);

    let engine = motion::classical(sandbox.store_mut()).unwrap();
    sandbox.register(engine).unwrap();
    let engine = bounds::reflect_box(
        sandbox.store_mut(),
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, 1.0, 1.0),
    )
    .unwrap();
    sandbox.register(engine).unwrap();

    let store = sandbox.store_mut();
    store.config_float("time change", 0.0).unwrap().set(0.05);
    for axis in ["x velocity", "y velocity", "z velocity"] {
        let col = store.lookup_column(axis).unwrap().as_float().cloned().unwrap();
        let kick = store
            .column_float(&format!("kick {axis}"), ColumnInit::Range { min: -2.0, max: 2.0 })
            .unwrap();
        for i in 0..entities {
            col.set(i, kick.get(i));
        }
    }

    sandbox.run_passes(100).unwrap();

    for axis in ["x position", "y position", "z position"] {
        let col = sandbox
            .store()
            .lookup_column(axis)
            .unwrap()
            .as_float()
            .cloned()
            .unwrap();
        for (i, p) in col.snapshot().into_iter().enumerate() {
            assert!(
                (-1.0..=1.0).contains(&p),
                "entity {i} escaped on {axis}: {p}"
            );
        }
    }
}

#[test]
fn clock_drives_every_pass_of_the_pipeline() {
    let mut sandbox = sandbox(4, 0);

    let engine = clock::constant(sandbox.store_mut()).unwrap();
    sandbox.register(engine).unwrap();
    gravity::newtonian(&mut sandbox).unwrap();
    let engine = motion::classical(sandbox.store_mut()).unwrap();
    sandbox.register(engine).unwrap();

    let tick = sandbox.store_mut().config_uint("simulation tick", 0).unwrap();
    let time = sandbox.store_mut().config_float("time", 0.0).unwrap();

    sandbox.run_passes(25).unwrap();

    assert_eq!(tick.get(), 25);
    assert!(time.get() > 0.0);
    assert_eq!(sandbox.pass_count(), 25);
}
