//! Accuracy metrics for forecast evaluation.
//!
//! The series-level functions align `actual` and `predicted` on their shared
//! timestamps before comparing, so a forecast may cover only part of the
//! actuals (or vice versa) as long as the overlap is non-empty.

use crate::core::TimeSeries;
use crate::error::{ForecastError, Result};

/// Default floor for the sMAPE denominator.
pub const DEFAULT_SMAPE_EPSILON: f64 = 1e-8;

/// Mean absolute error over the shared timestamps of two series.
pub fn mae(actual: &TimeSeries, predicted: &TimeSeries) -> Result<f64> {
    let (a, p) = aligned(actual, predicted)?;
    Ok(mae_values(&a, &p))
}

/// Symmetric mean absolute percentage error (in %) with the default epsilon.
pub fn smape(actual: &TimeSeries, predicted: &TimeSeries) -> Result<f64> {
    smape_with_epsilon(actual, predicted, DEFAULT_SMAPE_EPSILON)
}

/// Symmetric mean absolute percentage error (in %).
///
/// `100 * mean(2 * |p - a| / max(|a| + |p|, epsilon))`. The epsilon keeps
/// zero-zero pairs finite: they contribute nothing to the mean.
pub fn smape_with_epsilon(
    actual: &TimeSeries,
    predicted: &TimeSeries,
    epsilon: f64,
) -> Result<f64> {
    if epsilon.is_nan() || epsilon <= 0.0 {
        return Err(ForecastError::InvalidParameter(
            "smape epsilon must be > 0".to_string(),
        ));
    }
    let (a, p) = aligned(actual, predicted)?;
    Ok(smape_values(&a, &p, epsilon))
}

fn aligned(actual: &TimeSeries, predicted: &TimeSeries) -> Result<(Vec<f64>, Vec<f64>)> {
    let (a, p) = actual.align(predicted);
    if a.is_empty() {
        return Err(ForecastError::Alignment(
            "actual and predicted have no overlapping timestamps to compare".to_string(),
        ));
    }
    Ok((a, p))
}

/// Calculate MAE between two equally long, non-empty slices.
fn mae_values(actual: &[f64], predicted: &[f64]) -> f64 {
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / actual.len() as f64
}

/// Calculate SMAPE between two equally long, non-empty slices.
fn smape_values(actual: &[f64], predicted: &[f64], epsilon: f64) -> f64 {
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| {
            let denom = (a.abs() + p.abs()).max(epsilon);
            2.0 * (p - a).abs() / denom
        })
        .sum::<f64>()
        * 100.0
        / actual.len() as f64
}
