//! Entity spawn factories.
//!
//! Sensors and targets are stored as component bundles; these helpers keep
//! the bundle layout in one place.

use hecs::{Entity, World};

use multilat_core::components::{Detector, Position, SensorTag, TargetTag, Velocity};
use multilat_core::{LastFix, ObjectId};

use crate::objects::{Sensor, Target};

/// Spawn a sensor: `(ObjectId, SensorTag, Position, Detector)`.
pub fn spawn_sensor(world: &mut World, sensor: Sensor) -> Entity {
    world.spawn((
        sensor.id().clone(),
        SensorTag,
        Position(sensor.position().clone()),
        sensor.detector(),
    ))
}

/// Spawn a target with no estimate yet:
/// `(ObjectId, TargetTag, Position, Velocity, LastFix)`.
pub fn spawn_target(world: &mut World, target: Target) -> Entity {
    world.spawn((
        target.id().clone(),
        TargetTag,
        Position(target.position().clone()),
        Velocity(target.velocity().clone()),
        LastFix::default(),
    ))
}

/// Rebuild a `Sensor` value from its entity.
pub fn read_sensor(world: &World, entity: Entity) -> Option<Sensor> {
    let mut query = world
        .query_one::<(&ObjectId, &SensorTag, &Position, &Detector)>(entity)
        .ok()?;
    let (id, _, position, detector) = query.get()?;
    Some(Sensor::from_parts(id.clone(), position.0.clone(), *detector))
}

/// Rebuild a `Target` value from its entity.
pub fn read_target(world: &World, entity: Entity) -> Option<Target> {
    let mut query = world
        .query_one::<(&ObjectId, &TargetTag, &Position, &Velocity)>(entity)
        .ok()?;
    let (id, _, position, velocity) = query.get()?;
    Some(Target::new(id.clone(), position.0.clone()).with_velocity(velocity.0.clone()))
}
