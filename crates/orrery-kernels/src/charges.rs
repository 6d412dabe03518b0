//! Coulomb electrostatics: an all-pairs force kernel.

use std::f64::consts::PI;
use std::sync::Arc;

use orrery_core::{ColumnInit, EngineId, FloatCell, FloatColumn, Store, StoreError};
use orrery_engine::Sandbox;
use orrery_pairwise::{register_pairwise, PairKernel};

use crate::error::KernelError;
use crate::util::axis_columns;
use crate::vec3::Vec3;

/// Default vacuum permittivity, in F·m⁻¹.
pub const VACUUM_PERMITTIVITY: f64 = 8.854_187_8128e-12;

/// The symmetric Coulomb pair force.
///
/// Per pair: `F = q₁·q₂·r / (4π·ε·|r|³)`, pushing like charges apart
/// and pulling opposite charges together. As with gravity, coincident
/// entities produce a non-finite force.
pub struct CoulombElectricity {
    permittivity: Arc<FloatCell>,
    position: [Arc<FloatColumn>; 3],
    force: [Arc<FloatColumn>; 3],
    charge: Arc<FloatColumn>,
}

impl CoulombElectricity {
    /// Declare the columns this kernel reads and writes: x/y/z
    /// `position` and `force` (zeroed), `"charge"` (0.0), and the
    /// `"vacuum permittivity"` config slot.
    pub fn new(store: &mut Store) -> Result<Self, StoreError> {
        Ok(Self {
            permittivity: store.config_float("vacuum permittivity", VACUUM_PERMITTIVITY)?,
            position: axis_columns(store, "position", ColumnInit::Fill(0.0))?,
            force: axis_columns(store, "force", ColumnInit::Fill(0.0))?,
            charge: store.column_float("charge", ColumnInit::Fill(0.0))?,
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

impl PairKernel for CoulombElectricity {
    fn interact(&self, i: usize, j: usize) {
        let r = self.position_of(j) - self.position_of(i);
        let epsilon = self.permittivity.get();
        let f = r * (self.charge.get(i) * self.charge.get(j))
            / (4.0 * PI * epsilon * r.length().powi(3));

        // For like charges f points from i towards j; i is pushed the
        // other way.
        self.force[0].add(i, -f.x);
        self.force[1].add(i, -f.y);
        self.force[2].add(i, -f.z);

        self.force[0].add(j, f.x);
        self.force[1].add(j, f.y);
        self.force[2].add(j, f.z);
    }
}

/// Build the electrostatics kernel against the sandbox's store and
/// register its full pairwise schedule.
pub fn electricity(sandbox: &mut Sandbox) -> Result<Vec<EngineId>, KernelError> {
    let kernel = Arc::new(CoulombElectricity::new(sandbox.store_mut())?);
    Ok(register_pairwise(sandbox, "charges", &kernel)?)
}
