//! Transit system: moves every unit along its road.

use hecs::World;

use nodewar_core::components::Unit;

/// Advance one unit. Progress never decreases and stops at 1.
pub fn advance_unit(unit: &mut Unit, dt: f64, speed: f64) {
    unit.progress = (unit.progress + dt.max(0.0) * speed).min(1.0);
}

/// Advance all units in transit.
pub fn run(world: &mut World, dt: f64, speed: f64) {
    for (_entity, unit) in world.query_mut::<&mut Unit>() {
        advance_unit(unit, dt, speed);
    }
}
