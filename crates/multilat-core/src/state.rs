//! Simulation state snapshot: the complete read-only view published after each tick.

use serde::{Deserialize, Serialize};

use crate::noise::NoiseModel;
use crate::solution::LastFix;
use crate::types::{Bounds, ObjectId, SimTime};
use crate::vector::Vector;

/// Everything an observer needs to draw or report one tick.
///
/// Built inside a single tick, so a target's position and its last fix
/// always belong to the same step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub dimension: usize,
    pub bounds: Bounds,
    pub sensors: Vec<SensorView>,
    pub targets: Vec<TargetView>,
}

/// A sensor as seen by observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorView {
    pub id: ObjectId,
    pub position: Vector,
    pub detection_radius: f64,
    pub noise: NoiseModel,
}

/// A target with its ground truth and latest estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetView {
    pub id: ObjectId,
    pub position: Vector,
    pub velocity: Vector,
    pub fix: LastFix,
}

impl SimSnapshot {
    pub fn target(&self, id: &ObjectId) -> Option<&TargetView> {
        self.targets.iter().find(|t| &t.id == id)
    }

    /// Number of targets with an available estimate this tick.
    pub fn localized_count(&self) -> usize {
        self.targets.iter().filter(|t| t.fix.is_available()).count()
    }

    /// Mean localisation error over targets with an available estimate.
    pub fn mean_localization_error(&self) -> Option<f64> {
        let errors: Vec<f64> = self
            .targets
            .iter()
            .filter(|t| t.fix.is_available())
            .map(|t| t.fix.localization_error)
            .collect();
        if errors.is_empty() {
            None
        } else {
            Some(errors.iter().sum::<f64>() / errors.len() as f64)
        }
    }
}
