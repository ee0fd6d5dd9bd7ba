//! Linear least squares: `min ‖A·x − b‖₂`.
//!
//! Householder QR is used directly rather than the normal equations, which
//! would square the condition number. When a diagonal entry of R vanishes the
//! system is rank-deficient and the minimum-norm solution comes from SVD.

use nalgebra::{DMatrix, DVector};

use multilat_core::constants::RANK_TOLERANCE;
use multilat_core::{MlatError, MlatResult};

/// Result of one least-squares fit.
#[derive(Debug, Clone)]
pub struct LeastSquares {
    pub x: DVector<f64>,
    /// Numerical column rank of `A`.
    pub rank: usize,
    /// `‖b − A·x‖₂`.
    pub residual_norm: f64,
}

/// Solve `min ‖A·x − b‖₂`.
pub fn solve(a: &DMatrix<f64>, b: &DVector<f64>) -> MlatResult<LeastSquares> {
    let (rows, cols) = a.shape();
    if rows == 0 || cols == 0 {
        return Err(MlatError::SolveFailure(format!(
            "empty system ({rows}x{cols})"
        )));
    }
    if b.len() != rows {
        return Err(MlatError::mismatch(rows, b.len()));
    }
    if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
        return Err(MlatError::SolveFailure("non-finite coefficients".into()));
    }

    let (x, rank) = match solve_qr(a, b) {
        Some(x) => (x, cols),
        None => solve_svd(a, b)?,
    };

    if x.iter().any(|v| !v.is_finite()) {
        return Err(MlatError::SolveFailure("non-finite solution".into()));
    }

    let residual_norm = (b - a * &x).norm();
    Ok(LeastSquares {
        x,
        rank,
        residual_norm,
    })
}

/// QR path. Returns `None` if R has a negligible pivot or the system is
/// underdetermined.
fn solve_qr(a: &DMatrix<f64>, b: &DVector<f64>) -> Option<DVector<f64>> {
    if a.nrows() < a.ncols() {
        return None;
    }
    let qr = a.clone().qr();
    let r = qr.r();
    let diag = r.diagonal();
    let scale = diag.iter().fold(1.0_f64, |acc, v| acc.max(v.abs()));
    if diag.iter().any(|v| v.abs() <= RANK_TOLERANCE * scale) {
        return None;
    }
    let qtb = qr.q().transpose() * b;
    r.solve_upper_triangular(&qtb)
}

/// SVD path: minimum-norm solution and numerical rank.
fn solve_svd(a: &DMatrix<f64>, b: &DVector<f64>) -> MlatResult<(DVector<f64>, usize)> {
    let svd = a.clone().svd(true, true);
    let largest = svd.singular_values.iter().fold(1.0_f64, |acc, v| acc.max(*v));
    let eps = RANK_TOLERANCE * largest;
    let rank = svd.rank(eps);
    let x = svd
        .solve(b, eps)
        .map_err(|e| MlatError::SolveFailure(e.to_string()))?;
    Ok((x, rank))
}
