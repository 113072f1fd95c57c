//! Ordinary least squares solver.
//!
//! Every trendline in this project is the solution of the same tiny problem:
//!
//! ```text
//! minimize Σ (y_i - (β0 + β1 x_i))^2
//! ```
//!
//! i.e. an OLS solve against the two-column design matrix `[1, x]`.
//!
//! Implementation choices:
//! - We use nalgebra's SVD to solve the least-squares problem, which handles
//!   tall design matrices (many rows, two columns) without special-casing.
//! - Callers are expected to reject degenerate inputs (n < 2, zero x-variance)
//!   *before* solving, so an ill-conditioned system here is an internal error
//!   rather than a user-facing one.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if the strict solve fails.
    for &tol in &[1e-12, 1e-9, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Build the `[1, x]` design matrix for a simple linear regression.
pub fn design_matrix(xs: &[f64]) -> DMatrix<f64> {
    DMatrix::from_fn(xs.len(), 2, |row, col| if col == 0 { 1.0 } else { xs[row] })
}
