//! Value types for the objects living in the simulation.
//!
//! These are detached copies: the engine stores objects as ECS component
//! bundles and hands out `Sensor`/`Target` values built from them, so
//! mutating a returned object never touches engine state.

use rand::Rng;
use serde::{Deserialize, Serialize};

use multilat_core::components::Detector;
use multilat_core::{Bounds, MlatResult, NoiseModel, ObjectId, Vector};

use crate::motion::RandomWalk;
use crate::sensing;

/// A fixed ranging sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    id: ObjectId,
    position: Vector,
    detector: Detector,
}

impl Sensor {
    pub fn new(
        id: impl Into<ObjectId>,
        position: Vector,
        detection_radius: f64,
        noise: NoiseModel,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            detector: Detector {
                detection_radius,
                noise,
            },
        }
    }

    pub(crate) fn from_parts(id: ObjectId, position: Vector, detector: Detector) -> Self {
        Self {
            id,
            position,
            detector,
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn position(&self) -> &Vector {
        &self.position
    }

    /// Detection radius; `<= 0` means unlimited.
    pub fn detection_radius(&self) -> f64 {
        self.detector.detection_radius
    }

    pub fn noise(&self) -> NoiseModel {
        self.detector.noise
    }

    pub fn detector(&self) -> Detector {
        self.detector
    }

    /// Noisy distance to `target_position`, or `None` if out of range.
    pub fn measure_distance<R: Rng + ?Sized>(
        &self,
        target_position: &Vector,
        rng: &mut R,
    ) -> MlatResult<Option<f64>> {
        sensing::measure_distance(&self.position, &self.detector, target_position, rng)
    }
}

/// A mobile target following a bounded random walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    id: ObjectId,
    position: Vector,
    velocity: Vector,
}

impl Target {
    /// New target at rest.
    pub fn new(id: impl Into<ObjectId>, position: Vector) -> Self {
        let velocity = Vector::zeros(position.dimension());
        Self {
            id: id.into(),
            position,
            velocity,
        }
    }

    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn position(&self) -> &Vector {
        &self.position
    }

    pub fn velocity(&self) -> &Vector {
        &self.velocity
    }

    /// Advance by `dt` seconds inside `bounds`.
    ///
    /// Fails with a configuration error, leaving the target untouched, if
    /// `bounds` does not hold one `[min, max]` pair per axis.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f64,
        bounds: &Bounds,
        motion: &RandomWalk,
        rng: &mut R,
    ) -> MlatResult<()> {
        motion.advance(&mut self.position, &mut self.velocity, dt, bounds, rng)
    }
}

/// Any object the engine can own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SimObject {
    Sensor(Sensor),
    Target(Target),
}

impl SimObject {
    pub fn id(&self) -> &ObjectId {
        match self {
            SimObject::Sensor(s) => s.id(),
            SimObject::Target(t) => t.id(),
        }
    }

    pub fn position(&self) -> &Vector {
        match self {
            SimObject::Sensor(s) => s.position(),
            SimObject::Target(t) => t.position(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.position().dimension()
    }

    /// Move the object. Sensors are stationary, so this is a no-op for them.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f64,
        bounds: &Bounds,
        motion: &RandomWalk,
        rng: &mut R,
    ) -> MlatResult<()> {
        match self {
            SimObject::Sensor(_) => Ok(()),
            SimObject::Target(t) => t.update(dt, bounds, motion, rng),
        }
    }

    pub fn as_sensor(&self) -> Option<&Sensor> {
        match self {
            SimObject::Sensor(s) => Some(s),
            SimObject::Target(_) => None,
        }
    }

    pub fn as_target(&self) -> Option<&Target> {
        match self {
            SimObject::Target(t) => Some(t),
            SimObject::Sensor(_) => None,
        }
    }
}

impl From<Sensor> for SimObject {
    fn from(sensor: Sensor) -> Self {
        SimObject::Sensor(sensor)
    }
}

impl From<Target> for SimObject {
    fn from(target: Target) -> Self {
        SimObject::Target(target)
    }
}
