//! Multilateration simulation engine.
//!
//! Owns the hecs ECS world with sensors and moving targets, steps it at a
//! fixed tick duration, localises every target each step and produces
//! `SimSnapshot`s for readers.

pub mod engine;
pub mod motion;
pub mod objects;
pub mod sensing;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use motion::RandomWalk;
pub use multilat_core as core;
pub use objects::{Sensor, SimObject, Target};
pub use systems::localization::LocalizationStats;
