//! Ridge (L2-regularized least squares) regression.
//!
//! Used by the lag-feature forecaster. The intercept is fitted by centering
//! features and target, so it is never penalized:
//!
//! ```text
//! beta      = (Xc'Xc + alpha*I)^-1 Xc'yc
//! intercept = mean(y) - mean(X) . beta
//! ```

use crate::error::{ForecastError, Result};

/// Fitted ridge coefficients and intercept.
#[derive(Debug, Clone, PartialEq)]
pub struct RidgeResult {
    /// Regression coefficients (one per feature).
    pub coefficients: Vec<f64>,
    /// Intercept term.
    pub intercept: f64,
}

impl RidgeResult {
    /// Predict a single observation.
    pub fn predict_row(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.coefficients.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: self.coefficients.len(),
                got: features.len(),
            });
        }
        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>())
    }
}

/// Fit ridge regression: y = intercept + X @ coefficients.
///
/// Uses Cholesky decomposition to solve the regularized normal equations.
///
/// # Arguments
/// * `rows` - Design matrix, one feature vector per observation
/// * `y` - Target values (one per row)
/// * `alpha` - Regularization strength, must be > 0
pub fn ridge_fit(rows: &[Vec<f64>], y: &[f64], alpha: f64) -> Result<RidgeResult> {
    let n = y.len();

    if n == 0 {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }
    if rows.len() != n {
        return Err(ForecastError::DimensionMismatch {
            expected: n,
            got: rows.len(),
        });
    }
    if alpha.is_nan() || alpha <= 0.0 {
        return Err(ForecastError::InvalidParameter(
            "ridge alpha must be > 0".to_string(),
        ));
    }

    let k = rows[0].len();
    for row in rows {
        if row.len() != k {
            return Err(ForecastError::DimensionMismatch {
                expected: k,
                got: row.len(),
            });
        }
    }

    let y_mean = y.iter().sum::<f64>() / n as f64;
    let x_mean: Vec<f64> = (0..k)
        .map(|j| rows.iter().map(|r| r[j]).sum::<f64>() / n as f64)
        .collect();

    // Build Xc'Xc + alpha*I and Xc'yc on centered data
    let mut xtx = vec![vec![0.0; k]; k];
    let mut xty = vec![0.0; k];

    for (row, &target) in rows.iter().zip(y) {
        let yc = target - y_mean;
        for i in 0..k {
            let xi = row[i] - x_mean[i];
            xty[i] += xi * yc;
            for j in 0..=i {
                xtx[i][j] += xi * (row[j] - x_mean[j]);
            }
        }
    }
    for i in 0..k {
        for j in 0..i {
            xtx[j][i] = xtx[i][j];
        }
        xtx[i][i] += alpha;
    }

    let coefficients = solve_symmetric(&xtx, &xty).ok_or_else(|| {
        ForecastError::ComputationError(
            "ridge regression failed: matrix not positive definite".into(),
        )
    })?;

    let intercept = y_mean
        - coefficients
            .iter()
            .zip(&x_mean)
            .map(|(c, m)| c * m)
            .sum::<f64>();

    Ok(RidgeResult {
        coefficients,
        intercept,
    })
}

/// Solve symmetric positive definite system using Cholesky decomposition.
///
/// Solves A @ x = b where A is symmetric positive definite.
fn solve_symmetric(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if a.len() != n {
        return None;
    }
    if n == 0 {
        return Some(Vec::new());
    }

    // Cholesky decomposition A = L @ L'
    let mut l = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }

            if i == j {
                if sum <= 0.0 || !sum.is_finite() {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // Forward substitution: L @ y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    // Backward substitution: L' @ x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    Some(x)
}
