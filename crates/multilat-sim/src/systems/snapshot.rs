//! Snapshot system: builds a `SimSnapshot` from the world.
//!
//! Read-only; never modifies the world.

use hecs::{Entity, World};

use multilat_core::components::{Detector, Position, Velocity};
use multilat_core::state::{SensorView, SimSnapshot, TargetView};
use multilat_core::{Bounds, LastFix, ObjectId, SimTime};

/// Build a complete snapshot. Sensors and targets appear in `sensors` /
/// `targets` order.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    bounds: &Bounds,
    sensors: &[Entity],
    targets: &[Entity],
) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        dimension: bounds.dimension(),
        bounds: bounds.clone(),
        sensors: sensors.iter().filter_map(|&e| build_sensor(world, e)).collect(),
        targets: targets.iter().filter_map(|&e| build_target(world, e)).collect(),
    }
}

fn build_sensor(world: &World, entity: Entity) -> Option<SensorView> {
    let mut query = world
        .query_one::<(&ObjectId, &Position, &Detector)>(entity)
        .ok()?;
    let (id, pos, detector) = query.get()?;
    Some(SensorView {
        id: id.clone(),
        position: pos.0.clone(),
        detection_radius: detector.detection_radius,
        noise: detector.noise,
    })
}

fn build_target(world: &World, entity: Entity) -> Option<TargetView> {
    let mut query = world
        .query_one::<(&ObjectId, &Position, &Velocity, &LastFix)>(entity)
        .ok()?;
    let (id, pos, vel, fix) = query.get()?;
    Some(TargetView {
        id: id.clone(),
        position: pos.0.clone(),
        velocity: vel.0.clone(),
        fix: fix.clone(),
    })
}
