//! Classical motion integration: one calculation per entity.
//!
//! Consumes the force accumulators the interaction kernels filled
//! earlier in the pass and resets them for the next pass, which is what
//! makes force accumulation and integration composable as separate
//! engines (accumulate, then resolve).

use std::sync::Arc;

use orrery_core::{Calculation, ColumnInit, Engine, FloatCell, FloatColumn, Store, StoreError};

use crate::clock::DEFAULT_TIME_CHANGE;
use crate::util::axis_columns;

/// The column set shared by every per-entity motion calculation.
struct MotionFields {
    time_change: Arc<FloatCell>,
    position: [Arc<FloatColumn>; 3],
    velocity: [Arc<FloatColumn>; 3],
    acceleration: [Arc<FloatColumn>; 3],
    force: [Arc<FloatColumn>; 3],
    mass: Arc<FloatColumn>,
}

struct MotionCalc {
    fields: Arc<MotionFields>,
    index: usize,
}

impl Calculation for MotionCalc {
    fn run(&mut self) {
        let f = &self.fields;
        let i = self.index;
        let dt = f.time_change.get();

        for axis in 0..3 {
            let a = f.force[axis].get(i) / f.mass.get(i);
            f.acceleration[axis].set(i, a);

            let v = f.velocity[axis].get(i) + a * dt;
            f.velocity[axis].set(i, v);

            f.position[axis].add(i, v * dt);
            f.force[axis].set(i, 0.0);
        }
    }
}

/// A semi-implicit Euler integrator over the whole entity population.
///
/// Declares `"time change"`, the x/y/z `position`, `velocity`,
/// `acceleration`, and `force` columns (zeroed), and `"mass"` (1.0).
/// Each pass, for every entity: `a = F/m`, `v += a·dt`, `x += v·dt`,
/// then `F = 0`.
///
/// One calculation per entity; the partitioner spreads them across the
/// pool and each touches only its own entity's cells.
pub fn classical(store: &mut Store) -> Result<Engine, StoreError> {
    let fields = Arc::new(MotionFields {
        time_change: store.config_float("time change", DEFAULT_TIME_CHANGE)?,
        position: axis_columns(store, "position", ColumnInit::Fill(0.0))?,
        velocity: axis_columns(store, "velocity", ColumnInit::Fill(0.0))?,
        acceleration: axis_columns(store, "acceleration", ColumnInit::Fill(0.0))?,
        force: axis_columns(store, "force", ColumnInit::Fill(0.0))?,
        mass: store.column_float("mass", ColumnInit::Fill(1.0))?,
    });

    let mut engine = Engine::new("motion: classical");
    for index in 0..store.entity_count() {
        engine.push(Box::new(MotionCalc {
            fields: Arc::clone(&fields),
            index,
        }));
    }
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::{Sandbox, SandboxConfig};

    fn sandbox(entities: usize) -> Sandbox {
        Sandbox::new(SandboxConfig {
            entity_count: entities,
            seed: 0,
            workers: Some(2),
        })
        .unwrap()
    }

    #[test]
    fn one_step_integrates_force_into_position() {
        let mut sandbox = sandbox(1);
        let engine = classical(sandbox.store_mut()).unwrap();
        sandbox.register(engine).unwrap();

        let store = sandbox.store_mut();
        store.config_float("time change", 0.0).unwrap().set(0.5);
        let fx = store.column_float("x force", ColumnInit::Fill(0.0)).unwrap();
        let ax = store
            .column_float("x acceleration", ColumnInit::Fill(0.0))
            .unwrap();
        let vx = store.column_float("x velocity", ColumnInit::Fill(0.0)).unwrap();
        let px = store.column_float("x position", ColumnInit::Fill(0.0)).unwrap();
        fx.set(0, 2.0);

        sandbox.run_passes(1).unwrap();

        assert_eq!(ax.get(0), 2.0); // a = F/m = 2/1
        assert_eq!(vx.get(0), 1.0); // v = a·dt
        assert_eq!(px.get(0), 0.5); // x = v·dt
        assert_eq!(fx.get(0), 0.0); // accumulator reset
    }

    #[test]
    fn mass_scales_the_acceleration() {
        let mut sandbox = sandbox(2);
        let engine = classical(sandbox.store_mut()).unwrap();
        sandbox.register(engine).unwrap();

        let store = sandbox.store_mut();
        store.config_float("time change", 0.0).unwrap().set(1.0);
        let mass = store.column_float("mass", ColumnInit::Fill(0.0)).unwrap();
        let fy = store.column_float("y force", ColumnInit::Fill(0.0)).unwrap();
        let ay = store
            .column_float("y acceleration", ColumnInit::Fill(0.0))
            .unwrap();
        mass.set(1, 4.0);
        fy.set(0, 8.0);
        fy.set(1, 8.0);

        sandbox.run_passes(1).unwrap();

        assert_eq!(ay.get(0), 8.0);
        assert_eq!(ay.get(1), 2.0);
    }

    #[test]
    fn velocity_persists_without_force() {
        let mut sandbox = sandbox(1);
        let engine = classical(sandbox.store_mut()).unwrap();
        sandbox.register(engine).unwrap();

        let store = sandbox.store_mut();
        store.config_float("time change", 0.0).unwrap().set(0.25);
        let vz = store.column_float("z velocity", ColumnInit::Fill(0.0)).unwrap();
        let pz = store.column_float("z position", ColumnInit::Fill(0.0)).unwrap();
        vz.set(0, 2.0);

        sandbox.run_passes(4).unwrap();

        assert_eq!(vz.get(0), 2.0);
        assert!((pz.get(0) - 2.0).abs() < 1e-12);
    }
}
