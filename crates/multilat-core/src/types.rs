//! Fundamental simulation types: identifiers, axis bounds, and time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MlatError, MlatResult};
use crate::vector::Vector;

/// Unique, immutable identifier of a sensor or target within one engine.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Axis-aligned box the simulation is confined to.
///
/// Stored flat as `[min0, max0, min1, max1, ...]`, one pair per axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bounds(Vec<f64>);

impl Bounds {
    /// Validate a flat bounds list for the given dimension.
    pub fn new(dimension: usize, limits: Vec<f64>) -> MlatResult<Self> {
        if dimension == 0 {
            return Err(MlatError::Configuration(
                "dimension must be positive, got 0".into(),
            ));
        }
        if limits.len() != dimension * 2 {
            return Err(MlatError::Configuration(format!(
                "bounds length must be dimension * 2, got {}, expected {}",
                limits.len(),
                dimension * 2
            )));
        }
        for (axis, pair) in limits.chunks_exact(2).enumerate() {
            let (min, max) = (pair[0], pair[1]);
            if !min.is_finite() || !max.is_finite() {
                return Err(MlatError::Configuration(format!(
                    "bounds for axis {axis} must be finite, got [{min}, {max}]"
                )));
            }
            if min > max {
                return Err(MlatError::Configuration(format!(
                    "bounds for axis {axis} have min > max: [{min}, {max}]"
                )));
            }
        }
        Ok(Self(limits))
    }

    /// `[-extent, extent]` on every axis.
    pub fn symmetric(dimension: usize, extent: f64) -> MlatResult<Self> {
        let limits = (0..dimension).flat_map(|_| [-extent, extent]).collect();
        Self::new(dimension, limits)
    }

    pub fn dimension(&self) -> usize {
        self.0.len() / 2
    }

    /// `(min, max)` for one axis.
    pub fn axis(&self, axis: usize) -> (f64, f64) {
        (self.0[axis * 2], self.0[axis * 2 + 1])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Whether every coordinate of `point` lies within its axis interval.
    pub fn contains(&self, point: &Vector) -> bool {
        point.dimension() == self.dimension()
            && point.iter().enumerate().all(|(axis, &value)| {
                let (min, max) = self.axis(axis);
                (min..=max).contains(&value)
            })
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of completed steps.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one step of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
