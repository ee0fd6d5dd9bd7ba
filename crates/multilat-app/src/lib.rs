//! Headless multilateration runner.
//!
//! Wires the simulation engine to a fixed-cadence stepping thread, publishes
//! snapshots for readers, and provides scenario loading and logging setup for
//! the `multilat` binary.

pub mod config;
pub mod error;
pub mod game_loop;
pub mod logging;
pub mod state;

pub use multilat_core as core;
