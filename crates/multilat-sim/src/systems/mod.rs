//! Per-tick systems over the simulation world.
//!
//! Systems are plain functions taking the `World` plus the entity indices they
//! walk. They hold no state of their own; everything lives in components.

pub mod localization;
pub mod movement;
pub mod snapshot;
