//! Localisation system: measure every target from every sensor and solve.
//!
//! Runs after movement, so targets are measured at their post-update
//! positions. Each target's `LastFix` is overwritten every tick; a target
//! that cannot be localised gets the sentinel, never its previous estimate.

use hecs::{Entity, World};
use rand::Rng;

use multilat_core::components::{Detector, Position};
use multilat_core::{LastFix, Measurement, MlatError, MlatResult, ObjectId, Vector};
use multilat_solver::{localization_error, solve_least_squares};

use crate::sensing;

/// Per-tick outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalizationStats {
    pub localized: usize,
    pub low_confidence: usize,
    pub insufficient: usize,
    pub failed: usize,
}

pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    sensors: &[Entity],
    targets: &[Entity],
    dimension: usize,
    rng: &mut R,
) -> LocalizationStats {
    let readouts: Vec<(ObjectId, Vector, Detector)> = sensors
        .iter()
        .filter_map(|&e| sensor_readout(world, e))
        .collect();

    let mut stats = LocalizationStats::default();

    for &entity in targets {
        let Some((id, truth)) = target_readout(world, entity) else {
            continue;
        };

        let mut measurements = Vec::with_capacity(readouts.len());
        for (sensor_id, sensor_pos, detector) in &readouts {
            match sensing::measure_distance(sensor_pos, detector, &truth, rng) {
                Ok(Some(distance)) => {
                    measurements.push(Measurement::new(sensor_pos.clone(), distance))
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(
                    sensor_id = %sensor_id,
                    target_id = %id,
                    error = %e,
                    "measurement failed"
                ),
            }
        }

        let fix = if measurements.len() < dimension + 1 {
            stats.insufficient += 1;
            tracing::debug!(
                target_id = %id,
                measurements = measurements.len(),
                required = dimension + 1,
                "not enough sensors in range"
            );
            LastFix::default()
        } else {
            match estimate(&measurements, dimension, &truth) {
                Ok(fix) => {
                    stats.localized += 1;
                    if fix.estimate.is_low_confidence() {
                        stats.low_confidence += 1;
                    }
                    tracing::debug!(
                        target_id = %id,
                        measurements = measurements.len(),
                        error = fix.localization_error,
                        residual = fix.estimate.residual_error,
                        "target localised"
                    );
                    fix
                }
                Err(e) => {
                    stats.failed += 1;
                    tracing::debug!(target_id = %id, error = %e, "localisation failed");
                    LastFix::default()
                }
            }
        };

        if let Ok(mut slot) = world.get::<&mut LastFix>(entity) {
            *slot = fix;
        }
    }

    stats
}

/// Solve, then score the estimate against ground truth.
fn estimate(measurements: &[Measurement], dimension: usize, truth: &Vector) -> MlatResult<LastFix> {
    let solution = solve_least_squares(measurements, dimension)?;
    let error = localization_error(truth, solution.position.as_ref())?;
    if !error.is_finite() {
        return Err(MlatError::SolveFailure("non-finite localisation error".into()));
    }
    Ok(LastFix::new(solution, error))
}

fn sensor_readout(world: &World, entity: Entity) -> Option<(ObjectId, Vector, Detector)> {
    let mut query = world
        .query_one::<(&ObjectId, &Position, &Detector)>(entity)
        .ok()?;
    let (id, pos, detector) = query.get()?;
    Some((id.clone(), pos.0.clone(), *detector))
}

fn target_readout(world: &World, entity: Entity) -> Option<(ObjectId, Vector)> {
    let mut query = world.query_one::<(&ObjectId, &Position)>(entity).ok()?;
    let (id, pos) = query.get()?;
    Some((id.clone(), pos.0.clone()))
}
