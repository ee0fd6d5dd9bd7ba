//! Simulation engine.
//!
//! `SimulationEngine` owns the hecs world, the seeded RNG and the object
//! indices. Each step moves every target, then measures and localises each
//! one against all sensors. Completely headless; the runner thread in the app
//! crate drives it and publishes snapshots.

use std::collections::HashMap;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use multilat_core::constants::{DEFAULT_DIMENSION, DEFAULT_SEED, DEFAULT_WORLD_EXTENT, DT};
use multilat_core::state::SimSnapshot;
use multilat_core::{
    Bounds, LastFix, MlatError, MlatResult, NoiseModel, ObjectId, SimTime, Solution, Vector,
};

use crate::motion::RandomWalk;
use crate::objects::{Sensor, SimObject, Target};
use crate::systems;
use crate::systems::localization::LocalizationStats;
use crate::world_setup;

/// Configuration for a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of spatial dimensions.
    pub dimension: usize,
    /// Flat `[min0, max0, min1, max1, ...]` limits, one pair per axis.
    pub bounds: Vec<f64>,
    /// Seconds advanced by each `tick()`.
    pub tick_duration_secs: f64,
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub motion: RandomWalk,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            bounds: (0..DEFAULT_DIMENSION)
                .flat_map(|_| [-DEFAULT_WORLD_EXTENT, DEFAULT_WORLD_EXTENT])
                .collect(),
            tick_duration_secs: DT,
            seed: DEFAULT_SEED,
            motion: RandomWalk::default(),
        }
    }
}

impl SimConfig {
    pub fn new(dimension: usize, bounds: Vec<f64>, tick_duration_secs: f64) -> Self {
        Self {
            dimension,
            bounds,
            tick_duration_secs,
            ..Default::default()
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    bounds: Bounds,
    tick_duration: f64,
    motion: RandomWalk,
    time: SimTime,
    rng: ChaCha8Rng,
    objects: HashMap<ObjectId, Entity>,
    /// Every entity in insertion order.
    order: Vec<Entity>,
    sensors: Vec<Entity>,
    targets: Vec<Entity>,
    next_object_number: u32,
}

impl SimulationEngine {
    /// Create an engine, validating the configuration.
    pub fn new(config: SimConfig) -> MlatResult<Self> {
        let bounds = Bounds::new(config.dimension, config.bounds)?;
        if !config.tick_duration_secs.is_finite() || config.tick_duration_secs <= 0.0 {
            return Err(MlatError::Configuration(format!(
                "tick duration must be finite and positive, got {}",
                config.tick_duration_secs
            )));
        }
        config.motion.validate()?;

        tracing::info!(
            dimension = config.dimension,
            tick_duration = config.tick_duration_secs,
            seed = config.seed,
            "simulation engine created"
        );

        Ok(Self {
            world: World::new(),
            bounds,
            tick_duration: config.tick_duration_secs,
            motion: config.motion,
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            objects: HashMap::new(),
            order: Vec::new(),
            sensors: Vec::new(),
            targets: Vec::new(),
            next_object_number: 0,
        })
    }

    /// Shorthand for `new(SimConfig::new(dimension, bounds, tick_duration_secs))`.
    pub fn with_bounds(
        dimension: usize,
        bounds: Vec<f64>,
        tick_duration_secs: f64,
    ) -> MlatResult<Self> {
        Self::new(SimConfig::new(dimension, bounds, tick_duration_secs))
    }

    // ---- Mutators ----

    /// Register a sensor or target.
    ///
    /// Fails with `DimensionMismatch` if its position (or a target's velocity)
    /// does not match the engine dimension, `Configuration` if any of those
    /// coordinates is NaN or infinite, or `DuplicateIdentifier` if the id is
    /// taken.
    pub fn add_object(&mut self, object: impl Into<SimObject>) -> MlatResult<()> {
        let object = object.into();
        let dimension = self.dimension();
        if object.dimension() != dimension {
            return Err(MlatError::mismatch(dimension, object.dimension()));
        }
        if !object.position().is_finite() {
            return Err(MlatError::Configuration(format!(
                "object {} has a non-finite position {}",
                object.id(),
                object.position()
            )));
        }
        if let SimObject::Target(target) = &object {
            if target.velocity().dimension() != dimension {
                return Err(MlatError::mismatch(dimension, target.velocity().dimension()));
            }
            if !target.velocity().is_finite() {
                return Err(MlatError::Configuration(format!(
                    "target {} has a non-finite velocity {}",
                    target.id(),
                    target.velocity()
                )));
            }
        }
        if self.objects.contains_key(object.id()) {
            return Err(MlatError::DuplicateIdentifier(object.id().clone()));
        }

        let id = object.id().clone();
        let entity = match object {
            SimObject::Sensor(sensor) => {
                tracing::info!(
                    sensor_id = %id,
                    position = %sensor.position(),
                    radius = sensor.detection_radius(),
                    noise = sensor.noise().label(),
                    "sensor added"
                );
                let entity = world_setup::spawn_sensor(&mut self.world, sensor);
                self.sensors.push(entity);
                entity
            }
            SimObject::Target(target) => {
                tracing::info!(target_id = %id, position = %target.position(), "target added");
                let entity = world_setup::spawn_target(&mut self.world, target);
                self.targets.push(entity);
                entity
            }
        };
        self.objects.insert(id, entity);
        self.order.push(entity);
        Ok(())
    }

    /// Place a sensor uniformly at random inside the bounds.
    pub fn add_random_sensor(
        &mut self,
        detection_radius: f64,
        noise: NoiseModel,
    ) -> MlatResult<ObjectId> {
        let id = self.mint_id("sensor");
        let position = Vector::random_within(&self.bounds, &mut self.rng);
        self.add_object(Sensor::new(id.clone(), position, detection_radius, noise))?;
        Ok(id)
    }

    /// Place a target at rest uniformly at random inside the bounds.
    pub fn add_random_target(&mut self) -> MlatResult<ObjectId> {
        let id = self.mint_id("target");
        let position = Vector::random_within(&self.bounds, &mut self.rng);
        self.add_object(Target::new(id.clone(), position))?;
        Ok(id)
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Only a negative or non-finite `dt` is rejected. Per-target
    /// localisation failures never abort the step; they become sentinels.
    pub fn step(&mut self, dt: f64) -> MlatResult<LocalizationStats> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(MlatError::Configuration(format!(
                "step duration must be finite and non-negative, got {dt}"
            )));
        }
        Ok(self.run_systems(dt))
    }

    /// Advance by the configured tick duration and return the resulting snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        self.run_systems(self.tick_duration);
        self.snapshot()
    }

    // ---- Accessors ----

    pub fn snapshot(&self) -> SimSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.bounds,
            &self.sensors,
            &self.targets,
        )
    }

    pub fn list_sensors(&self) -> Vec<Sensor> {
        self.sensors
            .iter()
            .filter_map(|&e| world_setup::read_sensor(&self.world, e))
            .collect()
    }

    pub fn list_targets(&self) -> Vec<Target> {
        self.targets
            .iter()
            .filter_map(|&e| world_setup::read_target(&self.world, e))
            .collect()
    }

    pub fn get_object(&self, id: &ObjectId) -> Option<SimObject> {
        let entity = *self.objects.get(id)?;
        self.read_object(entity)
    }

    /// Every object in insertion order.
    pub fn all_objects(&self) -> Vec<SimObject> {
        self.order
            .iter()
            .filter_map(|&e| self.read_object(e))
            .collect()
    }

    /// The target's last estimate and localisation error, written together.
    pub fn last_fix(&self, id: &ObjectId) -> MlatResult<LastFix> {
        self.objects
            .get(id)
            .and_then(|&e| self.world.get::<&LastFix>(e).ok())
            .map(|fix| (*fix).clone())
            .ok_or_else(|| MlatError::UnknownObject(id.clone()))
    }

    /// `None` if `id` is not a target. A target without an estimate yields
    /// the sentinel solution.
    pub fn last_estimate(&self, id: &ObjectId) -> Option<Solution> {
        self.last_fix(id).ok().map(|fix| fix.estimate)
    }

    /// `None` if `id` is not a target; `-1.0` if no estimate is available.
    pub fn last_localization_error(&self, id: &ObjectId) -> Option<f64> {
        self.last_fix(id).ok().map(|fix| fix.localization_error)
    }

    /// Elapsed simulated seconds.
    pub fn current_time(&self) -> f64 {
        self.time.elapsed_secs
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn dimension(&self) -> usize {
        self.bounds.dimension()
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn tick_duration(&self) -> f64 {
        self.tick_duration
    }

    pub fn motion(&self) -> &RandomWalk {
        &self.motion
    }

    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    // ---- Internals ----

    fn run_systems(&mut self, dt: f64) -> LocalizationStats {
        self.time.advance(dt);
        // 1. Movement
        systems::movement::run(
            &mut self.world,
            &self.targets,
            dt,
            &self.bounds,
            &self.motion,
            &mut self.rng,
        );
        // 2. Measurement + localisation at post-move positions
        let stats = systems::localization::run(
            &mut self.world,
            &self.sensors,
            &self.targets,
            self.bounds.dimension(),
            &mut self.rng,
        );
        tracing::debug!(
            tick = self.time.tick,
            localized = stats.localized,
            low_confidence = stats.low_confidence,
            insufficient = stats.insufficient,
            failed = stats.failed,
            "step complete"
        );
        stats
    }

    fn read_object(&self, entity: Entity) -> Option<SimObject> {
        world_setup::read_sensor(&self.world, entity)
            .map(SimObject::Sensor)
            .or_else(|| world_setup::read_target(&self.world, entity).map(SimObject::Target))
    }

    /// Next `<prefix>-NNNN` id not already in use.
    fn mint_id(&mut self, prefix: &str) -> ObjectId {
        loop {
            self.next_object_number += 1;
            let id = ObjectId::new(format!("{prefix}-{:04}", self.next_object_number));
            if !self.objects.contains_key(&id) {
                return id;
            }
        }
    }
}
