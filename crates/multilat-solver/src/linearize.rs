//! Sphere-equation linearisation.
//!
//! Every measurement defines `‖x − s_i‖² = d_i²`. Subtracting the reference
//! equation (the last measurement) cancels the shared `‖x‖²` term and leaves
//! one linear row per remaining measurement:
//!
//! `2·(s_ref − s_i)·x = d_i² − d_ref² − ‖s_i‖² + ‖s_ref‖²`

use nalgebra::{DMatrix, DVector};

use multilat_core::{MlatError, MlatResult, Measurement};

/// `A·x = b` with `m − 1` rows and `dimension` columns.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    pub a: DMatrix<f64>,
    pub b: DVector<f64>,
}

/// Build the linear system for `measurements`, using the last one as reference.
pub fn linearize(measurements: &[Measurement], dimension: usize) -> MlatResult<LinearSystem> {
    if dimension == 0 {
        return Err(MlatError::Configuration(
            "dimension must be positive, got 0".into(),
        ));
    }
    let required = dimension + 1;
    if measurements.len() < required {
        return Err(MlatError::InsufficientMeasurements {
            got: measurements.len(),
            required,
        });
    }
    for m in measurements {
        if m.sensor_position.dimension() != dimension {
            return Err(MlatError::mismatch(dimension, m.sensor_position.dimension()));
        }
        // Checked before the negative-distance clamp: NaN.max(0.0) is 0.0.
        if !m.distance.is_finite() || !m.sensor_position.is_finite() {
            return Err(MlatError::SolveFailure(format!(
                "non-finite measurement: distance {} from sensor at {}",
                m.distance, m.sensor_position
            )));
        }
    }

    let (reference, others) = measurements
        .split_last()
        .ok_or_else(|| MlatError::SolveFailure("no measurements".into()))?;
    let ref_pos = &reference.sensor_position;
    let ref_dist = reference.distance.max(0.0);
    let ref_dist_sq = ref_dist * ref_dist;
    let ref_norm_sq = ref_pos.norm_sq();

    let rows = others.len();
    let mut a = DMatrix::<f64>::zeros(rows, dimension);
    let mut b = DVector::<f64>::zeros(rows);

    for (i, m) in others.iter().enumerate() {
        let dist = m.distance.max(0.0);
        let diff = ref_pos.checked_sub(&m.sensor_position)?;
        for (j, component) in diff.iter().enumerate() {
            a[(i, j)] = 2.0 * component;
        }
        b[i] = dist * dist - ref_dist_sq - m.sensor_position.norm_sq() + ref_norm_sq;
    }

    Ok(LinearSystem { a, b })
}
