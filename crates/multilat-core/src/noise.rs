//! Range measurement noise models.
//!
//! A noise model turns a true distance into a perturbed one. Every variant
//! clamps its output to be non-negative, and negative parameters are
//! treated as zero.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Perturbation applied by a sensor to each range it reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NoiseModel {
    /// Report the true distance unchanged.
    #[default]
    None,
    /// Add zero-mean normal noise with the given standard deviation.
    Gaussian { std_dev: f64 },
    /// Add noise uniform on `[-max_delta, +max_delta]`.
    Uniform { max_delta: f64 },
    /// Add noise uniform on `[-fraction * d, +fraction * d]` for true distance `d`.
    Percentage { fraction: f64 },
}

impl NoiseModel {
    pub fn gaussian(std_dev: f64) -> Self {
        Self::Gaussian {
            std_dev: std_dev.max(0.0),
        }
    }

    pub fn uniform(max_delta: f64) -> Self {
        Self::Uniform {
            max_delta: max_delta.max(0.0),
        }
    }

    pub fn percentage(fraction: f64) -> Self {
        Self::Percentage {
            fraction: fraction.max(0.0),
        }
    }

    /// Apply the model to a true distance. The result is never negative.
    pub fn perturb<R: Rng + ?Sized>(&self, true_distance: f64, rng: &mut R) -> f64 {
        let noisy = match *self {
            NoiseModel::None => true_distance,
            NoiseModel::Gaussian { std_dev } => {
                // Normal::new only rejects NaN or negative deviations.
                match Normal::new(0.0, std_dev.max(0.0)) {
                    Ok(normal) => true_distance + normal.sample(rng),
                    Err(_) => true_distance,
                }
            }
            NoiseModel::Uniform { max_delta } => {
                true_distance + symmetric_unit(rng) * max_delta.max(0.0)
            }
            NoiseModel::Percentage { fraction } => {
                true_distance + symmetric_unit(rng) * fraction.max(0.0) * true_distance
            }
        };
        noisy.max(0.0)
    }

    /// Short label for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            NoiseModel::None => "none",
            NoiseModel::Gaussian { .. } => "gaussian",
            NoiseModel::Uniform { .. } => "uniform",
            NoiseModel::Percentage { .. } => "percentage",
        }
    }
}

/// Draw uniform on `[-1, 1)`.
fn symmetric_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>() * 2.0 - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_none_is_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for d in [0.0, 1.5, 42.0, 1e6] {
            assert_eq!(NoiseModel::None.perturb(d, &mut rng), d);
        }
    }

    #[test]
    fn test_negative_parameters_clamped() {
        assert_eq!(NoiseModel::gaussian(-1.0), NoiseModel::Gaussian { std_dev: 0.0 });
        assert_eq!(NoiseModel::uniform(-2.0), NoiseModel::Uniform { max_delta: 0.0 });
        assert_eq!(
            NoiseModel::percentage(-0.1),
            NoiseModel::Percentage { fraction: 0.0 }
        );
    }

    #[test]
    fn test_zero_width_models_are_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for model in [
            NoiseModel::gaussian(0.0),
            NoiseModel::uniform(0.0),
            NoiseModel::percentage(0.0),
        ] {
            assert_eq!(model.perturb(12.5, &mut rng), 12.5, "{model:?}");
        }
    }

    #[test]
    fn test_uniform_stays_within_delta() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let model = NoiseModel::uniform(2.0);
        for _ in 0..1000 {
            let d = model.perturb(50.0, &mut rng);
            assert!((48.0..=52.0).contains(&d), "uniform draw out of range: {d}");
        }
    }

    #[test]
    fn test_percentage_scales_with_distance() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let model = NoiseModel::percentage(0.05);
        for _ in 0..1000 {
            let d = model.perturb(200.0, &mut rng);
            assert!((190.0..=210.0).contains(&d), "percentage draw out of range: {d}");
        }
    }

    #[test]
    fn test_gaussian_mean_close_to_truth() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let model = NoiseModel::gaussian(1.0);
        let n = 5000;
        let mean: f64 = (0..n).map(|_| model.perturb(100.0, &mut rng)).sum::<f64>() / n as f64;
        assert!((mean - 100.0).abs() < 0.1, "sample mean drifted: {mean}");
    }

    #[test]
    fn test_near_zero_distance_clamped() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let model = NoiseModel::gaussian(10.0);
        for _ in 0..1000 {
            assert!(model.perturb(0.01, &mut rng) >= 0.0);
        }
    }
}
