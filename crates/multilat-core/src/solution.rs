//! Measurements fed to the solver and the solutions it produces.

use serde::{Deserialize, Serialize};

use crate::constants::NO_ESTIMATE;
use crate::vector::Vector;

/// One in-range distance report, built fresh each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub sensor_position: Vector,
    /// Measured distance, never negative.
    pub distance: f64,
}

impl Measurement {
    pub fn new(sensor_position: Vector, distance: f64) -> Self {
        Self {
            sensor_position,
            distance,
        }
    }
}

/// How much the solver trusts a position estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SolveQuality {
    /// No estimate was produced.
    #[default]
    None,
    /// The linearised system had full column rank.
    Nominal,
    /// Sensor geometry left some direction unobservable; the estimate is the
    /// minimum-norm least-squares point and should not be trusted along it.
    RankDeficient { rank: usize },
}

/// Position estimate plus a quality score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub position: Option<Vector>,
    /// `‖b − A·x̂‖ / sqrt(m − 1)`; `-1` when there is no solution.
    pub residual_error: f64,
    pub quality: SolveQuality,
}

impl Solution {
    /// The "no solution" sentinel.
    pub fn none() -> Self {
        Self {
            position: None,
            residual_error: NO_ESTIMATE,
            quality: SolveQuality::None,
        }
    }

    pub fn is_none(&self) -> bool {
        self.position.is_none()
    }

    pub fn is_low_confidence(&self) -> bool {
        matches!(self.quality, SolveQuality::RankDeficient { .. })
    }
}

impl Default for Solution {
    fn default() -> Self {
        Self::none()
    }
}

/// A target's most recent estimate and its distance from ground truth.
///
/// Both fields are written together; the default is the sentinel pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastFix {
    pub estimate: Solution,
    /// Euclidean distance between truth and estimate; `-1` when unavailable.
    pub localization_error: f64,
}

impl LastFix {
    pub fn new(estimate: Solution, localization_error: f64) -> Self {
        Self {
            estimate,
            localization_error,
        }
    }

    pub fn is_available(&self) -> bool {
        !self.estimate.is_none() && self.localization_error >= 0.0
    }
}

impl Default for LastFix {
    fn default() -> Self {
        Self {
            estimate: Solution::none(),
            localization_error: NO_ESTIMATE,
        }
    }
}
