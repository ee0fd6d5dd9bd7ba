//! N-dimensional point/vector arithmetic.
//!
//! `Vector` owns its coordinates, so every clone handed out by an accessor
//! is independent of the engine's internal state.

use std::fmt;
use std::ops::Index;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{MlatError, MlatResult};
use crate::types::Bounds;

/// A point or displacement in D-dimensional space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector(Vec<f64>);

impl Vector {
    /// Zero vector of the given dimension.
    pub fn zeros(dimension: usize) -> Self {
        Self(vec![0.0; dimension])
    }

    pub fn from_slice(coords: &[f64]) -> Self {
        Self(coords.to_vec())
    }

    /// Uniformly random point inside flat `[min0, max0, min1, max1, ...]` bounds.
    pub fn random<R: Rng + ?Sized>(
        dimension: usize,
        bounds: &[f64],
        rng: &mut R,
    ) -> MlatResult<Self> {
        if bounds.len() != dimension * 2 {
            return Err(MlatError::Configuration(format!(
                "bounds length must be dimension * 2, got {}, expected {}",
                bounds.len(),
                dimension * 2
            )));
        }
        let coords = bounds
            .chunks_exact(2)
            .map(|pair| sample_axis(pair[0], pair[1], rng))
            .collect();
        Ok(Self(coords))
    }

    /// Uniformly random point inside already-validated bounds.
    pub fn random_within<R: Rng + ?Sized>(bounds: &Bounds, rng: &mut R) -> Self {
        let coords = bounds
            .as_slice()
            .chunks_exact(2)
            .map(|pair| sample_axis(pair[0], pair[1], rng))
            .collect();
        Self(coords)
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    /// Mutable access to one coordinate. Panics if `axis` is out of range.
    pub fn coord_mut(&mut self, axis: usize) -> &mut f64 {
        &mut self.0[axis]
    }

    /// Euclidean distance. Exactly zero for identical operands.
    pub fn distance(&self, other: &Vector) -> MlatResult<f64> {
        self.check_dimension(other)?;
        let sum: f64 = self
            .0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        Ok(sum.sqrt())
    }

    pub fn checked_add(&self, other: &Vector) -> MlatResult<Vector> {
        self.check_dimension(other)?;
        Ok(Self(self.0.iter().zip(&other.0).map(|(a, b)| a + b).collect()))
    }

    pub fn checked_sub(&self, other: &Vector) -> MlatResult<Vector> {
        self.check_dimension(other)?;
        Ok(Self(self.0.iter().zip(&other.0).map(|(a, b)| a - b).collect()))
    }

    pub fn scale(&self, factor: f64) -> Vector {
        Self(self.0.iter().map(|v| v * factor).collect())
    }

    /// Squared Euclidean norm (dot product with itself).
    pub fn norm_sq(&self) -> f64 {
        self.0.iter().map(|v| v * v).sum()
    }

    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// True when no coordinate is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    fn check_dimension(&self, other: &Vector) -> MlatResult<()> {
        if self.dimension() != other.dimension() {
            return Err(MlatError::mismatch(self.dimension(), other.dimension()));
        }
        Ok(())
    }
}

/// Uniform draw on `[min, max]`, kept inside the interval despite rounding.
fn sample_axis<R: Rng + ?Sized>(min: f64, max: f64, rng: &mut R) -> f64 {
    (min + rng.gen::<f64>() * (max - min)).max(min).min(max)
}

impl From<Vec<f64>> for Vector {
    fn from(coords: Vec<f64>) -> Self {
        Self(coords)
    }
}

impl From<Vector> for Vec<f64> {
    fn from(vector: Vector) -> Self {
        vector.0
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, axis: usize) -> &f64 {
        &self.0[axis]
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value:.3}")?;
        }
        f.write_str("]")
    }
}
