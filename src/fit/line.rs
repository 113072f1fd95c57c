//! Single-trendline fitting with degenerate-input checks.
//!
//! The only meaningful failure modes in this tool live here:
//!
//! - fewer than two points (no line is determined)
//! - zero variance in x (every line through the column has equal residuals)
//!
//! Both are reported as computation errors (exit code 3) instead of silently
//! producing a misleading fit.

use nalgebra::DVector;

use crate::domain::{FitQuality, Observation, TrendLine};
use crate::error::AppError;
use crate::math::{design_matrix, solve_least_squares};

/// Fit an OLS trendline through a set of observations.
///
/// Deterministic: the same observations always produce bit-identical output.
pub fn fit_line(obs: &[Observation]) -> Result<(TrendLine, FitQuality), AppError> {
    if obs.len() < 2 {
        return Err(AppError::new(
            3,
            format!(
                "Need at least two points to fit a trendline (got {}).",
                obs.len()
            ),
        ));
    }

    let xs: Vec<f64> = obs.iter().map(|o| o.x).collect();
    let ys: Vec<f64> = obs.iter().map(|o| o.y).collect();

    if xs.iter().any(|v| !v.is_finite()) || ys.iter().any(|v| !v.is_finite()) {
        return Err(AppError::new(3, "Non-finite observation in fit input."));
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let sxx = xs.iter().map(|x| (x - mean_x).powi(2)).sum::<f64>();
    if sxx <= 0.0 {
        return Err(AppError::new(
            3,
            "Zero variance in x; a trendline slope is undefined.",
        ));
    }

    let x = design_matrix(&xs);
    let y = DVector::from_column_slice(&ys);
    let beta = solve_least_squares(&x, &y)
        .ok_or_else(|| AppError::new(4, "Least squares solve failed (ill-conditioned system)."))?;

    let line = TrendLine {
        slope: beta[1],
        intercept: beta[0],
    };
    if !(line.slope.is_finite() && line.intercept.is_finite()) {
        return Err(AppError::new(4, "Non-finite trendline coefficients."));
    }

    Ok((line, quality(&line, &xs, &ys)))
}

fn quality(line: &TrendLine, xs: &[f64], ys: &[f64]) -> FitQuality {
    let n = ys.len();
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut sse = 0.0;
    let mut sst = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        sse += (y - line.predict(x)).powi(2);
        sst += (y - mean_y).powi(2);
    }

    let rmse = (sse / n as f64).sqrt();
    // A flat y column fits exactly; treat it as a perfect (if dull) line.
    let r2 = if sst > 0.0 { 1.0 - sse / sst } else { 1.0 };

    FitQuality { n, rmse, r2 }
}
