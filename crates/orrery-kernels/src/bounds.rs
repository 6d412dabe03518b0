//! Reflecting box walls: one calculation per entity.

use std::sync::Arc;

use orrery_core::{Calculation, ColumnInit, Engine, FloatColumn, Store, StoreError};

use crate::util::axis_columns;
use crate::vec3::Vec3;

struct BoundsFields {
    position: [Arc<FloatColumn>; 3],
    velocity: [Arc<FloatColumn>; 3],
    min: [f64; 3],
    max: [f64; 3],
}

struct BoundsCalc {
    fields: Arc<BoundsFields>,
    index: usize,
}

impl Calculation for BoundsCalc {
    fn run(&mut self) {
        let f = &self.fields;
        let i = self.index;
        for axis in 0..3 {
            let p = f.position[axis].get(i);
            if p > f.max[axis] {
                f.position[axis].set(i, f.max[axis]);
                f.velocity[axis].set(i, -f.velocity[axis].get(i));
            } else if p < f.min[axis] {
                f.position[axis].set(i, f.min[axis]);
                f.velocity[axis].set(i, -f.velocity[axis].get(i));
            }
        }
    }
}

/// Clamp every entity into the axis-aligned box `[min, max]`,
/// reversing the velocity component of any axis that hit a wall.
///
/// Declares the x/y/z `position` and `velocity` columns (zeroed).
/// Register after the integrator so a wall contact is resolved in the
/// same pass that produced it.
pub fn reflect_box(store: &mut Store, min: Vec3, max: Vec3) -> Result<Engine, StoreError> {
    let fields = Arc::new(BoundsFields {
        position: axis_columns(store, "position", ColumnInit::Fill(0.0))?,
        velocity: axis_columns(store, "velocity", ColumnInit::Fill(0.0))?,
        min: [min.x, min.y, min.z],
        max: [max.x, max.y, max.z],
    });

    let mut engine = Engine::new("bounds: reflect box");
    for index in 0..store.entity_count() {
        engine.push(Box::new(BoundsCalc {
            fields: Arc::clone(&fields),
            index,
        }));
    }
    Ok(engine)
}
