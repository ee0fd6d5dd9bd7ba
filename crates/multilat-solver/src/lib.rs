//! Multilateration solver.
//!
//! Pure functions that turn a set of range measurements into a position
//! estimate: sphere-equation linearisation followed by a QR least-squares
//! solve, with an SVD fallback for rank-deficient sensor geometry.
//! No ECS dependency; operates on plain data.

pub mod linearize;
pub mod lstsq;

use multilat_core::{MlatError, MlatResult, Measurement, Solution, SolveQuality, Vector};

pub use linearize::{linearize, LinearSystem};
pub use multilat_core as core;

/// Estimate a position from `measurements` in `dimension`-space.
///
/// Needs at least `dimension + 1` measurements. The last measurement is the
/// reference sphere subtracted from all others.
pub fn solve_least_squares(measurements: &[Measurement], dimension: usize) -> MlatResult<Solution> {
    let system = linearize(measurements, dimension)?;
    let fit = lstsq::solve(&system.a, &system.b)?;

    let quality = if fit.rank < dimension {
        tracing::warn!(
            rank = fit.rank,
            dimension,
            "rank-deficient multilateration system; estimate is low confidence"
        );
        SolveQuality::RankDeficient { rank: fit.rank }
    } else {
        SolveQuality::Nominal
    };

    let equations = system.a.nrows() as f64;
    Ok(Solution {
        position: Some(Vector::from_slice(fit.x.as_slice())),
        residual_error: fit.residual_norm / equations.sqrt(),
        quality,
    })
}

/// Euclidean distance between ground truth and an estimate.
///
/// Fails if either position is absent or empty.
pub fn localization_error(truth: &Vector, estimate: Option<&Vector>) -> MlatResult<f64> {
    match estimate {
        Some(estimate) if !truth.is_empty() && !estimate.is_empty() => truth.distance(estimate),
        _ => Err(MlatError::MissingPosition),
    }
}
