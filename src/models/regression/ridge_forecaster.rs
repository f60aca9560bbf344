//! Recursive ridge regression on lag and rolling-mean features.
//!
//! Multi-step forecasts are produced one step at a time: each prediction is
//! appended to a working copy of the history and becomes an input for the
//! lags and rolling means of the following steps. Errors therefore compound
//! over the horizon, exactly as they would in live use.

use super::features::LagFeatures;
use crate::core::{Frequency, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::ridge::{ridge_fit, RidgeResult};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

/// Validated configuration for [`RidgeForecaster`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawRidgeConfig")]
pub struct RidgeConfig {
    lags: Vec<usize>,
    rolling_windows: Vec<usize>,
    alpha: f64,
}

#[derive(Deserialize)]
struct RawRidgeConfig {
    #[serde(default = "default_lags")]
    lags: Vec<usize>,
    #[serde(default = "default_rolling_windows")]
    rolling_windows: Vec<usize>,
    #[serde(default = "default_alpha")]
    alpha: f64,
}

fn default_lags() -> Vec<usize> {
    vec![1, 7, 14]
}

fn default_rolling_windows() -> Vec<usize> {
    vec![7]
}

fn default_alpha() -> f64 {
    1.0
}

impl RidgeConfig {
    /// Create a configuration.
    ///
    /// Requires at least one lag, every lag > 0, every rolling window > 1
    /// and `alpha > 0`.
    pub fn new(lags: Vec<usize>, rolling_windows: Vec<usize>, alpha: f64) -> Result<Self> {
        if lags.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "lags must not be empty".to_string(),
            ));
        }
        if lags.contains(&0) {
            return Err(ForecastError::InvalidParameter(
                "all lags must be > 0".to_string(),
            ));
        }
        if rolling_windows.iter().any(|&w| w <= 1) {
            return Err(ForecastError::InvalidParameter(
                "rolling windows must be > 1".to_string(),
            ));
        }
        if alpha.is_nan() || alpha <= 0.0 {
            return Err(ForecastError::InvalidParameter(
                "alpha must be > 0".to_string(),
            ));
        }
        Ok(Self {
            lags,
            rolling_windows,
            alpha,
        })
    }

    pub fn lags(&self) -> &[usize] {
        &self.lags
    }

    pub fn rolling_windows(&self) -> &[usize] {
        &self.rolling_windows
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    fn features(&self) -> LagFeatures {
        LagFeatures::new(self.lags.clone(), self.rolling_windows.clone())
    }
}

impl Default for RidgeConfig {
    fn default() -> Self {
        Self {
            lags: default_lags(),
            rolling_windows: default_rolling_windows(),
            alpha: default_alpha(),
        }
    }
}

impl TryFrom<RawRidgeConfig> for RidgeConfig {
    type Error = ForecastError;

    fn try_from(raw: RawRidgeConfig) -> Result<Self> {
        Self::new(raw.lags, raw.rolling_windows, raw.alpha)
    }
}

#[derive(Debug, Clone)]
struct FittedState {
    regressor: RidgeResult,
    history: Vec<f64>,
}

/// Ridge regression forecaster over lag and rolling-mean features.
#[derive(Debug, Clone)]
pub struct RidgeForecaster {
    config: RidgeConfig,
    features: LagFeatures,
    state: Option<FittedState>,
}

impl RidgeForecaster {
    /// Create an unfitted model.
    pub fn new(config: RidgeConfig) -> Self {
        let features = config.features();
        Self {
            config,
            features,
            state: None,
        }
    }

    pub fn config(&self) -> &RidgeConfig {
        &self.config
    }

    /// Fitted regression, if the model has been fitted.
    pub fn regressor(&self) -> Option<&RidgeResult> {
        self.state.as_ref().map(|s| &s.regressor)
    }
}

impl Default for RidgeForecaster {
    fn default() -> Self {
        Self::new(RidgeConfig::default())
    }
}

impl Forecaster for RidgeForecaster {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        let values = series.values();
        let (rows, targets) = self.features.training_matrix(values);

        if targets.is_empty() {
            return Err(ForecastError::InsufficientData {
                needed: self.features.warmup() + 1,
                got: values.len(),
            });
        }

        let regressor = ridge_fit(&rows, &targets, self.config.alpha)?;
        debug!(
            rows = rows.len(),
            features = self.features.width(),
            alpha = self.config.alpha,
            "Ridge fitted"
        );

        self.state = Some(FittedState {
            regressor,
            history: values.to_vec(),
        });
        Ok(())
    }

    fn predict(
        &self,
        start: DateTime<Utc>,
        horizon: usize,
        frequency: Frequency,
    ) -> Result<TimeSeries> {
        let state = self.state.as_ref().ok_or(ForecastError::FitRequired)?;
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "horizon must be > 0".to_string(),
            ));
        }

        // Working copy: grows with each synthetic value, never touches the fit.
        let mut history = Vec::with_capacity(state.history.len() + horizon);
        history.extend_from_slice(&state.history);
        let mut predictions = Vec::with_capacity(horizon);

        for _ in 0..horizon {
            let row = self.features.row_after(&history)?;
            let yhat = state.regressor.predict_row(&row)?;
            history.push(yhat);
            predictions.push(yhat);
        }

        Ok(TimeSeries::regular(start, frequency, predictions))
    }

    fn name(&self) -> &str {
        "Ridge"
    }

    fn is_fitted(&self) -> bool {
        self.state.is_some()
    }
}
