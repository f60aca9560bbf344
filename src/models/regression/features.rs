//! Lag and trailing rolling-mean features.

use crate::error::{ForecastError, Result};

/// Feature layout: one column per lag, then one per rolling window.
///
/// Every feature for target index `t` is computed from observations strictly
/// before `t`, so the same builder serves training (over known history) and
/// recursive prediction (over history extended with earlier predictions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LagFeatures {
    lags: Vec<usize>,
    rolling_windows: Vec<usize>,
}

impl LagFeatures {
    pub fn new(lags: Vec<usize>, rolling_windows: Vec<usize>) -> Self {
        Self {
            lags,
            rolling_windows,
        }
    }

    /// Number of columns in a feature row.
    pub fn width(&self) -> usize {
        self.lags.len() + self.rolling_windows.len()
    }

    /// Observations needed before the first row can be built.
    pub fn warmup(&self) -> usize {
        self.lags
            .iter()
            .chain(self.rolling_windows.iter())
            .copied()
            .max()
            .unwrap_or(0)
    }

    /// Build the feature row that predicts the value following `past`.
    ///
    /// Fails with `InsufficientData` naming the first lag or window that
    /// `past` is too short for.
    pub fn row_after(&self, past: &[f64]) -> Result<Vec<f64>> {
        let n = past.len();
        let mut row = Vec::with_capacity(self.width());

        for &lag in &self.lags {
            if n < lag {
                return Err(ForecastError::InsufficientData { needed: lag, got: n });
            }
            row.push(past[n - lag]);
        }

        for &window in &self.rolling_windows {
            if n < window {
                return Err(ForecastError::InsufficientData {
                    needed: window,
                    got: n,
                });
            }
            row.push(past[n - window..].iter().sum::<f64>() / window as f64);
        }

        Ok(row)
    }

    /// Build the supervised training set over `values`.
    ///
    /// Rows whose features would reach before the start of the series are
    /// skipped. Returns the feature rows and their targets.
    pub fn training_matrix(&self, values: &[f64]) -> (Vec<Vec<f64>>, Vec<f64>) {
        let first = self.warmup().min(values.len());
        let mut rows = Vec::with_capacity(values.len() - first);
        let mut targets = Vec::with_capacity(values.len() - first);

        for t in first..values.len() {
            if let Ok(row) = self.row_after(&values[..t]) {
                rows.push(row);
                targets.push(values[t]);
            }
        }

        (rows, targets)
    }
}
