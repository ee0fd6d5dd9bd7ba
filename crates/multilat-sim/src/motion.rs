//! Bounded random-walk motion model for targets.
//!
//! Each step nudges the velocity by a random per-axis acceleration, caps the
//! speed, integrates position, and bounces off the world bounds.

use rand::Rng;
use serde::{Deserialize, Serialize};

use multilat_core::constants::{BOUNCE_DAMPING, TARGET_ACCELERATION, TARGET_MAX_SPEED};
use multilat_core::{Bounds, MlatError, MlatResult, Vector};

/// Tuning for the random walk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomWalk {
    /// Maximum velocity change per second on each axis (units/s²).
    pub acceleration: f64,
    /// Speed cap (units/s).
    pub max_speed: f64,
    /// Factor applied to an axis velocity component after a bounce.
    pub bounce_damping: f64,
}

impl Default for RandomWalk {
    fn default() -> Self {
        Self {
            acceleration: TARGET_ACCELERATION,
            max_speed: TARGET_MAX_SPEED,
            bounce_damping: BOUNCE_DAMPING,
        }
    }
}

impl RandomWalk {
    pub fn validate(&self) -> MlatResult<()> {
        if !self.acceleration.is_finite() || self.acceleration < 0.0 {
            return Err(MlatError::Configuration(format!(
                "acceleration must be finite and non-negative, got {}",
                self.acceleration
            )));
        }
        if !self.max_speed.is_finite() || self.max_speed <= 0.0 {
            return Err(MlatError::Configuration(format!(
                "max_speed must be finite and positive, got {}",
                self.max_speed
            )));
        }
        if !(0.0..=1.0).contains(&self.bounce_damping) {
            return Err(MlatError::Configuration(format!(
                "bounce_damping must lie in [0, 1], got {}",
                self.bounce_damping
            )));
        }
        Ok(())
    }

    /// Advance one target by `dt` seconds.
    ///
    /// On error neither `position` nor `velocity` is modified.
    pub fn advance<R: Rng + ?Sized>(
        &self,
        position: &mut Vector,
        velocity: &mut Vector,
        dt: f64,
        bounds: &Bounds,
        rng: &mut R,
    ) -> MlatResult<()> {
        let dimension = position.dimension();
        if bounds.as_slice().len() != dimension * 2 {
            return Err(MlatError::Configuration(format!(
                "bounds length must be dimension * 2, got {}, expected {}",
                bounds.as_slice().len(),
                dimension * 2
            )));
        }
        if velocity.dimension() != dimension {
            return Err(MlatError::mismatch(dimension, velocity.dimension()));
        }

        let mut vel = velocity.clone();
        for axis in 0..dimension {
            *vel.coord_mut(axis) += (rng.gen::<f64>() * 2.0 - 1.0) * self.acceleration * dt;
        }

        let speed = vel.norm();
        if speed > self.max_speed {
            vel = vel.scale(self.max_speed / speed);
        }

        let mut pos = position.checked_add(&vel.scale(dt))?;

        for axis in 0..dimension {
            let (min, max) = bounds.axis(axis);
            let value = pos[axis];
            if value < min {
                *pos.coord_mut(axis) = (min + (min - value)).min(max);
                *vel.coord_mut(axis) *= -self.bounce_damping;
            } else if value > max {
                *pos.coord_mut(axis) = (max - (value - max)).max(min);
                *vel.coord_mut(axis) *= -self.bounce_damping;
            }
        }

        *position = pos;
        *velocity = vel;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn still() -> RandomWalk {
        RandomWalk {
            acceleration: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_straight_line_integration() {
        let bounds = Bounds::symmetric(2, 100.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut pos = Vector::from(vec![0.0, 0.0]);
        let mut vel = Vector::from(vec![3.0, -4.0]);
        still().advance(&mut pos, &mut vel, 2.0, &bounds, &mut rng).unwrap();
        assert!((pos[0] - 6.0).abs() < 1e-12);
        assert!((pos[1] + 8.0).abs() < 1e-12);
        assert_eq!(vel, Vector::from(vec![3.0, -4.0]));
    }

    #[test]
    fn test_speed_capped_preserving_direction() {
        let bounds = Bounds::symmetric(2, 1000.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut pos = Vector::zeros(2);
        let mut vel = Vector::from(vec![30.0, 40.0]);
        still().advance(&mut pos, &mut vel, 0.1, &bounds, &mut rng).unwrap();
        assert!((vel.norm() - TARGET_MAX_SPEED).abs() < 1e-12);
        assert!((vel[0] / vel[1] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_reflection_off_max_bound() {
        let bounds = Bounds::symmetric(2, 100.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut pos = Vector::from(vec![98.0, 0.0]);
        let mut vel = Vector::from(vec![8.0, 0.0]);
        still().advance(&mut pos, &mut vel, 0.5, &bounds, &mut rng).unwrap();
        // 98 + 4 = 102 → mirrored to 98.
        assert!((pos[0] - 98.0).abs() < 1e-12, "x = {}", pos[0]);
        assert!((vel[0] + 8.0 * BOUNCE_DAMPING).abs() < 1e-12, "vx = {}", vel[0]);
        assert_eq!(vel[1], 0.0);
    }

    #[test]
    fn test_reflection_off_min_bound() {
        let bounds = Bounds::new(1, vec![0.0, 50.0]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut pos = Vector::from(vec![1.0]);
        let mut vel = Vector::from(vec![-6.0]);
        still().advance(&mut pos, &mut vel, 0.5, &bounds, &mut rng).unwrap();
        // 1 − 3 = −2 → mirrored to 2.
        assert!((pos[0] - 2.0).abs() < 1e-12);
        assert!((vel[0] - 6.0 * BOUNCE_DAMPING).abs() < 1e-12);
    }

    #[test]
    fn test_overshoot_wider_than_axis_is_clamped() {
        let bounds = Bounds::new(1, vec![0.0, 1.0]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut pos = Vector::from(vec![0.5]);
        let mut vel = Vector::from(vec![10.0]);
        still().advance(&mut pos, &mut vel, 1.0, &bounds, &mut rng).unwrap();
        assert!(bounds.contains(&pos), "position escaped: {pos}");
    }

    #[test]
    fn test_wrong_bounds_leaves_state_untouched() {
        let bounds = Bounds::symmetric(3, 100.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut pos = Vector::from(vec![1.0, 2.0]);
        let mut vel = Vector::from(vec![1.0, 1.0]);
        let err = RandomWalk::default()
            .advance(&mut pos, &mut vel, 1.0, &bounds, &mut rng)
            .unwrap_err();
        assert!(matches!(err, MlatError::Configuration(_)));
        assert_eq!(pos, Vector::from(vec![1.0, 2.0]));
        assert_eq!(vel, Vector::from(vec![1.0, 1.0]));
    }

    #[test]
    fn test_random_walk_stays_in_bounds() {
        let bounds = Bounds::symmetric(3, 10.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let mut pos = Vector::zeros(3);
        let mut vel = Vector::zeros(3);
        let walk = RandomWalk::default();
        for _ in 0..10_000 {
            walk.advance(&mut pos, &mut vel, 0.1, &bounds, &mut rng).unwrap();
            assert!(bounds.contains(&pos), "position escaped: {pos}");
            assert!(vel.norm() <= TARGET_MAX_SPEED + 1e-9);
        }
    }

    #[test]
    fn test_validate_rejects_bad_params() {
        let bad = [
            RandomWalk { acceleration: -1.0, ..Default::default() },
            RandomWalk { max_speed: 0.0, ..Default::default() },
            RandomWalk { bounce_damping: 1.5, ..Default::default() },
            RandomWalk { acceleration: f64::NAN, ..Default::default() },
        ];
        for walk in bad {
            assert!(walk.validate().is_err(), "{walk:?} should be rejected");
        }
        assert!(RandomWalk::default().validate().is_ok());
    }
}
