//! Core types and definitions for the multilateration simulator.
//!
//! This crate defines the vocabulary shared across all other crates:
//! vectors, bounds, noise models, measurements, solutions, ECS components,
//! state snapshots, errors, and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod components;
pub mod constants;
pub mod error;
pub mod noise;
pub mod solution;
pub mod state;
pub mod types;
pub mod vector;

pub use error::{MlatError, MlatResult};
pub use noise::NoiseModel;
pub use solution::{LastFix, Measurement, Solution, SolveQuality};
pub use types::{Bounds, ObjectId, SimTime};
pub use vector::Vector;

#[cfg(test)]
mod tests;
