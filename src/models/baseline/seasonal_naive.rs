//! Seasonal Naive forecasting model.
//!
//! Forecasts by repeating the last observed seasonal cycle.

use crate::core::{Frequency, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

/// Validated configuration for [`SeasonalNaive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSeasonalNaiveConfig")]
pub struct SeasonalNaiveConfig {
    season_length: usize,
}

#[derive(Deserialize)]
struct RawSeasonalNaiveConfig {
    #[serde(default = "default_season_length")]
    season_length: usize,
}

fn default_season_length() -> usize {
    7
}

impl SeasonalNaiveConfig {
    /// Create a configuration; the season length must be positive.
    pub fn new(season_length: usize) -> Result<Self> {
        if season_length == 0 {
            return Err(ForecastError::InvalidParameter(
                "season_length must be > 0".to_string(),
            ));
        }
        Ok(Self { season_length })
    }

    pub fn season_length(&self) -> usize {
        self.season_length
    }
}

impl Default for SeasonalNaiveConfig {
    fn default() -> Self {
        Self {
            season_length: default_season_length(),
        }
    }
}

impl TryFrom<RawSeasonalNaiveConfig> for SeasonalNaiveConfig {
    type Error = ForecastError;

    fn try_from(raw: RawSeasonalNaiveConfig) -> Result<Self> {
        Self::new(raw.season_length)
    }
}

/// Seasonal Naive forecaster.
///
/// Each forecast is equal to the observation from the same position in the
/// last complete seasonal cycle of the training history.
#[derive(Debug, Clone)]
pub struct SeasonalNaive {
    config: SeasonalNaiveConfig,
    history: Option<Vec<f64>>,
}

impl SeasonalNaive {
    /// Create an unfitted model.
    pub fn new(config: SeasonalNaiveConfig) -> Self {
        Self {
            config,
            history: None,
        }
    }

    /// Get the seasonal period.
    pub fn period(&self) -> usize {
        self.config.season_length
    }
}

impl Default for SeasonalNaive {
    fn default() -> Self {
        Self::new(SeasonalNaiveConfig::default())
    }
}

impl Forecaster for SeasonalNaive {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        let values = series.values();
        if values.len() < self.period() {
            return Err(ForecastError::InsufficientData {
                needed: self.period(),
                got: values.len(),
            });
        }

        self.history = Some(values.to_vec());
        Ok(())
    }

    fn predict(
        &self,
        start: DateTime<Utc>,
        horizon: usize,
        frequency: Frequency,
    ) -> Result<TimeSeries> {
        let history = self.history.as_ref().ok_or(ForecastError::FitRequired)?;
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "horizon must be > 0".to_string(),
            ));
        }

        let period = self.period();
        let last_season = &history[history.len() - period..];
        debug!(period, horizon, "SeasonalNaive forecasting");

        let predictions: Vec<f64> = (0..horizon).map(|h| last_season[h % period]).collect();

        Ok(TimeSeries::regular(start, frequency, predictions))
    }

    fn name(&self) -> &str {
        "SeasonalNaive"
    }

    fn is_fitted(&self) -> bool {
        self.history.is_some()
    }
}
