//! Tests for the shared vocabulary: bounds validation, sentinels, serde, and
//! property checks on vectors and noise.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::constants::NO_ESTIMATE;
use crate::noise::NoiseModel;
use crate::solution::{LastFix, Solution, SolveQuality};
use crate::types::{Bounds, ObjectId, SimTime};
use crate::vector::Vector;
use crate::MlatError;

// ---- Bounds ----

#[test]
fn test_bounds_accepts_valid_config() {
    let bounds = Bounds::new(3, vec![-1.0, 1.0, 0.0, 10.0, 5.0, 5.0]).unwrap();
    assert_eq!(bounds.dimension(), 3);
    assert_eq!(bounds.axis(1), (0.0, 10.0));
}

#[test]
fn test_bounds_rejects_zero_dimension() {
    let err = Bounds::new(0, vec![]).unwrap_err();
    assert!(matches!(err, MlatError::Configuration(_)));
}

#[test]
fn test_bounds_rejects_wrong_length() {
    for limits in [vec![0.0, 1.0], vec![0.0, 1.0, 0.0, 1.0, 0.0]] {
        let err = Bounds::new(2, limits).unwrap_err();
        assert!(matches!(err, MlatError::Configuration(_)));
    }
}

#[test]
fn test_bounds_rejects_inverted_axis() {
    let err = Bounds::new(2, vec![0.0, 1.0, 5.0, -5.0]).unwrap_err();
    assert!(matches!(err, MlatError::Configuration(_)));
}

#[test]
fn test_bounds_rejects_non_finite() {
    let err = Bounds::new(1, vec![f64::NEG_INFINITY, 0.0]).unwrap_err();
    assert!(matches!(err, MlatError::Configuration(_)));
}

#[test]
fn test_bounds_contains() {
    let bounds = Bounds::symmetric(2, 10.0).unwrap();
    assert!(bounds.contains(&Vector::from(vec![10.0, -10.0])));
    assert!(!bounds.contains(&Vector::from(vec![10.5, 0.0])));
    assert!(!bounds.contains(&Vector::from(vec![0.0, 0.0, 0.0])));
}

// ---- Sentinels ----

#[test]
fn test_last_fix_default_is_sentinel_pair() {
    let fix = LastFix::default();
    assert!(fix.estimate.position.is_none());
    assert_eq!(fix.estimate.residual_error, NO_ESTIMATE);
    assert_eq!(fix.estimate.quality, SolveQuality::None);
    assert_eq!(fix.localization_error, NO_ESTIMATE);
    assert!(!fix.is_available());
}

#[test]
fn test_low_confidence_flag() {
    let solution = Solution {
        position: Some(Vector::zeros(2)),
        residual_error: 0.0,
        quality: SolveQuality::RankDeficient { rank: 1 },
    };
    assert!(solution.is_low_confidence());
    assert!(!Solution::none().is_low_confidence());
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    for _ in 0..4 {
        time.advance(0.25);
    }
    assert_eq!(time.tick, 4);
    assert!((time.elapsed_secs - 1.0).abs() < 1e-12);
}

// ---- Serde ----

#[test]
fn test_noise_model_tagged_json() {
    let json = serde_json::to_string(&NoiseModel::gaussian(1.5)).unwrap();
    assert_eq!(json, r#"{"type":"Gaussian","std_dev":1.5}"#);
    let back: NoiseModel = serde_json::from_str(r#"{"type":"None"}"#).unwrap();
    assert_eq!(back, NoiseModel::None);
}

#[test]
fn test_vector_and_id_serialize_transparently() {
    let json = serde_json::to_string(&Vector::from(vec![1.0, 2.0])).unwrap();
    assert_eq!(json, "[1.0,2.0]");
    let json = serde_json::to_string(&ObjectId::new("sensor-0001")).unwrap();
    assert_eq!(json, r#""sensor-0001""#);
}

#[test]
fn test_error_messages() {
    let err = MlatError::DuplicateIdentifier(ObjectId::new("target-0002"));
    assert_eq!(err.to_string(), "object with id target-0002 already exists");
    let err = MlatError::InsufficientMeasurements {
        got: 2,
        required: 3,
    };
    assert_eq!(
        err.to_string(),
        "insufficient measurements: got 2, need at least 3"
    );
}

// ---- Properties ----

fn flat_bounds() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((-1e3f64..1e3, 0.0f64..1e3), 1..6)
        .prop_map(|axes| axes.into_iter().flat_map(|(min, width)| [min, min + width]).collect())
}

proptest! {
    #[test]
    fn prop_random_vector_within_bounds(limits in flat_bounds(), seed in any::<u64>()) {
        let dimension = limits.len() / 2;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for _ in 0..20 {
            let v = Vector::random(dimension, &limits, &mut rng).unwrap();
            for (axis, value) in v.iter().enumerate() {
                prop_assert!(*value >= limits[axis * 2] && *value <= limits[axis * 2 + 1]);
            }
        }
    }

    #[test]
    fn prop_distance_symmetric(
        a in prop::collection::vec(-1e4f64..1e4, 3),
        b in prop::collection::vec(-1e4f64..1e4, 3),
    ) {
        let a = Vector::from(a);
        let b = Vector::from(b);
        prop_assert_eq!(a.distance(&b).unwrap(), b.distance(&a).unwrap());
        prop_assert_eq!(a.distance(&a).unwrap(), 0.0);
    }

    #[test]
    fn prop_noise_never_negative(
        distance in 0.0f64..500.0,
        param in -5.0f64..50.0,
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for model in [
            NoiseModel::None,
            NoiseModel::gaussian(param),
            NoiseModel::uniform(param),
            NoiseModel::percentage(param),
        ] {
            prop_assert!(model.perturb(distance, &mut rng) >= 0.0);
        }
    }
}
