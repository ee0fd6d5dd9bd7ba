//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Simulation logic lives in systems, not components.
//! `ObjectId` and `LastFix` are also attached directly as components.

use serde::{Deserialize, Serialize};

use crate::noise::NoiseModel;
use crate::vector::Vector;

/// Marker: entity is a fixed sensor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SensorTag;

/// Marker: entity is a mobile target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetTag;

/// Current position in simulation space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vector);

/// Current velocity (units/s).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vector);

/// Ranging capability of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detector {
    /// Maximum range at which a target registers. `<= 0` means unlimited.
    pub detection_radius: f64,
    pub noise: NoiseModel,
}
