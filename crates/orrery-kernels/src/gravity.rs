//! Newtonian gravity: an all-pairs force kernel.

use std::sync::Arc;

use orrery_core::{ColumnInit, EngineId, FloatCell, FloatColumn, Store, StoreError};
use orrery_engine::Sandbox;
use orrery_pairwise::{register_pairwise, PairKernel};

use crate::error::KernelError;
use crate::util::axis_columns;
use crate::vec3::Vec3;

/// Default gravitational constant, in m³·kg⁻¹·s⁻².
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674_30e-11;

/// The symmetric Newtonian pair force.
///
/// Per pair: `F = G·m₁·m₂·r / |r|³` accumulated onto entity `i`'s force
/// and subtracted from entity `j`'s. Coincident entities produce a
/// non-finite force; keeping bodies separated is the caller's model
/// concern, not the kernel's.
pub struct NewtonianGravity {
    gravitational_constant: Arc<FloatCell>,
    position: [Arc<FloatColumn>; 3],
    force: [Arc<FloatColumn>; 3],
    mass: Arc<FloatColumn>,
}

impl NewtonianGravity {
    /// Declare the columns this kernel reads and writes: x/y/z
    /// `position` and `force` (zeroed), `"mass"` (1.0), and the
    /// `"gravitational constant"` config slot.
    pub fn new(store: &mut Store) -> Result<Self, StoreError> {
        Ok(Self {
            gravitational_constant: store
                .config_float("gravitational constant", GRAVITATIONAL_CONSTANT)?,
            position: axis_columns(store, "position", ColumnInit::Fill(0.0))?,
            force: axis_columns(store, "force", ColumnInit::Fill(0.0))?,
            mass: store.column_float("mass", ColumnInit::Fill(1.0))?,
        })
    }

    fn position_of(&self, i: usize) -> Vec3 {
        Vec3::new(
            self.position[0].get(i),
            self.position[1].get(i),
            self.position[2].get(i),
        )
    }
}

impl PairKernel for NewtonianGravity {
    fn interact(&self, i: usize, j: usize) {
        let r = self.position_of(j) - self.position_of(i);
        let g = self.gravitational_constant.get();
        let f = r * (g * self.mass.get(i) * self.mass.get(j)) / r.length().powi(3);

        self.force[0].add(i, f.x);
        self.force[1].add(i, f.y);
        self.force[2].add(i, f.z);

        self.force[0].add(j, -f.x);
        self.force[1].add(j, -f.y);
        self.force[2].add(j, -f.z);
    }
}

/// Build the gravity kernel against the sandbox's store and register
/// its full pairwise schedule. Returns the registered engines in
/// execution order.
pub fn newtonian(sandbox: &mut Sandbox) -> Result<Vec<EngineId>, KernelError> {
    let kernel = Arc::new(NewtonianGravity::new(sandbox.store_mut())?);
    Ok(register_pairwise(sandbox, "gravity", &kernel)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::SandboxConfig;

    fn sandbox(entities: usize) -> Sandbox {
        Sandbox::new(SandboxConfig {
            entity_count: entities,
            seed: 0,
            workers: Some(4),
        })
        .unwrap()
    }

    #[test]
    fn two_bodies_attract_symmetrically() {
        let mut sandbox = sandbox(2);
        newtonian(&mut sandbox).unwrap();

        let store = sandbox.store_mut();
        store
            .config_float("gravitational constant", 0.0)
            .unwrap()
            .set(1.0);
        let px = store.column_float("x position", ColumnInit::Fill(0.0)).unwrap();
        let mass = store.column_float("mass", ColumnInit::Fill(0.0)).unwrap();
        let fx = store.column_float("x force", ColumnInit::Fill(0.0)).unwrap();
        let fy = store.column_float("y force", ColumnInit::Fill(0.0)).unwrap();
        px.set(1, 2.0);
        mass.set(0, 3.0);
        mass.set(1, 5.0);

        sandbox.run_passes(1).unwrap();

        // F = G·m₁·m₂ / r² = 1·3·5 / 4, attractive along +x for body 0.
        let expected = 15.0 / 4.0;
        assert!((fx.get(0) - expected).abs() < 1e-12);
        assert!((fx.get(1) + expected).abs() < 1e-12);
        assert_eq!(fy.get(0), 0.0);
        assert_eq!(fy.get(1), 0.0);
    }

    #[test]
    fn net_force_on_a_closed_system_is_zero() {
        let entities = 9;
        let mut sandbox = sandbox(entities);
        newtonian(&mut sandbox).unwrap();

        let store = sandbox.store_mut();
        store
            .config_float("gravitational constant", 0.0)
            .unwrap()
            .set(1.0);
        // Distinct positions on a line, uneven masses.
        let px = store.column_float("x position", ColumnInit::Fill(0.0)).unwrap();
        let mass = store.column_float("mass", ColumnInit::Fill(0.0)).unwrap();
        for i in 0..entities {
            px.set(i, i as f64 * 1.5);
            mass.set(i, 1.0 + i as f64);
        }

        sandbox.run_passes(1).unwrap();

        let fx = sandbox
            .store()
            .lookup_column("x force")
            .unwrap()
            .as_float()
            .cloned()
            .unwrap();
        let net: f64 = fx.snapshot().iter().sum();
        assert!(net.abs() < 1e-9, "net momentum change {net} should cancel");
    }

    #[test]
    fn default_constant_is_declared() {
        let mut sandbox = sandbox(2);
        newtonian(&mut sandbox).unwrap();
        let g = sandbox
            .store_mut()
            .config_float("gravitational constant", 0.0)
            .unwrap();
        assert!((g.get() - GRAVITATIONAL_CONSTANT).abs() < 1e-20);
    }
}
