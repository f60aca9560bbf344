//! Backtest configuration.

use crate::error::{ForecastError, Result};
use serde::Deserialize;

/// Validated rolling-origin parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawBacktestConfig")]
pub struct BacktestConfig {
    horizon: usize,
    step: usize,
    min_train_points: usize,
}

#[derive(Deserialize)]
struct RawBacktestConfig {
    horizon: usize,
    step: usize,
    min_train_points: usize,
}

impl BacktestConfig {
    /// Create a backtest configuration.
    ///
    /// # Arguments
    /// * `horizon` - Steps forecast per fold, `> 0`
    /// * `step` - Stride between successive cutoffs, `> 0`
    /// * `min_train_points` - History required before the first cutoff, `> 0`
    pub fn new(horizon: usize, step: usize, min_train_points: usize) -> Result<Self> {
        if horizon == 0 || step == 0 {
            return Err(ForecastError::InvalidParameter(
                "horizon and step must be > 0".to_string(),
            ));
        }
        if min_train_points == 0 {
            return Err(ForecastError::InvalidParameter(
                "min_train_points must be > 0".to_string(),
            ));
        }
        Ok(Self {
            horizon,
            step,
            min_train_points,
        })
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn min_train_points(&self) -> usize {
        self.min_train_points
    }

    /// Shortest series that yields at least one fold.
    pub fn required_points(&self) -> usize {
        self.min_train_points + self.horizon
    }

    /// Cutoff indices (0-based, inclusive end of training) for a series of
    /// length `len`.
    ///
    /// The first cutoff is `min_train_points - 1`; cutoffs advance by `step`
    /// while a full horizon still fits after them. Empty when `len` is below
    /// [`required_points`](Self::required_points).
    pub fn cutoffs(&self, len: usize) -> Vec<usize> {
        if len < self.required_points() {
            return Vec::new();
        }
        let last = len - self.horizon - 1;
        (self.min_train_points - 1..=last)
            .step_by(self.step)
            .collect()
    }
}

impl TryFrom<RawBacktestConfig> for BacktestConfig {
    type Error = ForecastError;

    fn try_from(raw: RawBacktestConfig) -> Result<Self> {
        Self::new(raw.horizon, raw.step, raw.min_train_points)
    }
}
