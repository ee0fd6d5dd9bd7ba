//! Range measurement: true distance, detection-radius gate, then noise.

use rand::Rng;

use multilat_core::components::Detector;
use multilat_core::{MlatError, MlatResult, Vector};

/// Measure the distance from a sensor at `sensor_position` to `target_position`.
///
/// Returns `Ok(None)` when the target lies beyond a positive detection
/// radius. A radius `<= 0` is unlimited. The noisy distance is never negative.
/// A non-finite true distance is an error, never a reading.
pub fn measure_distance<R: Rng + ?Sized>(
    sensor_position: &Vector,
    detector: &Detector,
    target_position: &Vector,
    rng: &mut R,
) -> MlatResult<Option<f64>> {
    let true_distance = sensor_position.distance(target_position)?;
    if !true_distance.is_finite() {
        return Err(MlatError::Configuration(format!(
            "non-finite distance between {sensor_position} and {target_position}"
        )));
    }
    if detector.detection_radius > 0.0 && true_distance > detector.detection_radius {
        return Ok(None);
    }
    Ok(Some(detector.noise.perturb(true_distance, rng).max(0.0)))
}
