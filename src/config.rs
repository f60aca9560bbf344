//! Run configuration loaded from TOML.
//!
//! ```toml
//! frequency = "D"
//!
//! [backtest]
//! horizon = 14
//! step = 7
//! min_train_points = 180
//!
//! [models.seasonal_naive]
//! season_length = 7
//!
//! [models.ridge]
//! lags = [1, 7, 14]
//! rolling_windows = [7]
//! alpha = 1.0
//!
//! [planning]
//! service_level = 0.9
//! units_per_capacity = 20.0
//! over_capacity_cost = 1.0
//! under_capacity_cost = 3.0
//!
//! [sweep]
//! service_levels = [0.7, 0.8, 0.9, 0.95]
//! ```

use crate::backtest::{BacktestConfig, DEFAULT_SERVICE_LEVELS};
use crate::core::Frequency;
use crate::error::{ForecastError, Result};
use crate::models::baseline::{SeasonalNaive, SeasonalNaiveConfig};
use crate::models::regression::{RidgeConfig, RidgeForecaster};
use crate::models::ModelSpec;
use crate::planning::PlanningConfig;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Everything needed to run a backtest and a service-level sweep.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default)]
    pub frequency: Frequency,
    pub backtest: BacktestConfig,
    #[serde(default)]
    pub models: ModelsConfig,
    pub planning: PlanningConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
}

/// Forecasters to evaluate. The seasonal baseline always runs.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelsConfig {
    #[serde(default)]
    pub seasonal_naive: SeasonalNaiveConfig,
    pub ridge: Option<RidgeConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepConfig {
    #[serde(default = "default_service_levels")]
    pub service_levels: Vec<f64>,
}

fn default_service_levels() -> Vec<f64> {
    DEFAULT_SERVICE_LEVELS.to_vec()
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            service_levels: default_service_levels(),
        }
    }
}

impl RunConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| ForecastError::Config(e.to_string()))?;

        for &level in &config.sweep.service_levels {
            config
                .planning
                .with_service_level(level)
                .map_err(|e| ForecastError::Config(format!("sweep: {e}")))?;
        }

        Ok(config)
    }

    /// Load from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ForecastError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&contents)?;
        debug!(
            path = %path.display(),
            ridge = config.models.ridge.is_some(),
            "Loaded run config"
        );
        Ok(config)
    }

    /// Factories for every configured model, baseline first.
    pub fn model_specs(&self) -> Vec<ModelSpec> {
        let seasonal = self.models.seasonal_naive;
        let mut specs = vec![ModelSpec::new("SeasonalNaive", move || {
            Box::new(SeasonalNaive::new(seasonal))
        })];

        if let Some(ridge) = self.models.ridge.clone() {
            specs.push(ModelSpec::new("Ridge", move || {
                Box::new(RidgeForecaster::new(ridge.clone()))
            }));
        }

        specs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Forecaster;
    use std::io::Write;

    const FULL: &str = r#"
frequency = "D"

[backtest]
horizon = 14
step = 7
min_train_points = 180

[models.seasonal_naive]
season_length = 7

[models.ridge]
lags = [1, 7]
rolling_windows = [7]
alpha = 0.5

[planning]
service_level = 0.9
units_per_capacity = 20.0
over_capacity_cost = 1.0
under_capacity_cost = 3.0

[sweep]
service_levels = [0.8, 0.9]
"#;

    const MINIMAL: &str = r#"
[backtest]
horizon = 7
step = 7
min_train_points = 28

[planning]
service_level = 0.95
units_per_capacity = 10.0
over_capacity_cost = 2.0
under_capacity_cost = 5.0
"#;

    #[test]
    fn parses_full_config() {
        let config = RunConfig::from_toml_str(FULL).unwrap();

        assert_eq!(config.frequency, Frequency::Daily);
        assert_eq!(config.backtest.horizon(), 14);
        assert_eq!(config.models.seasonal_naive.season_length(), 7);

        let ridge = config.models.ridge.as_ref().unwrap();
        assert_eq!(ridge.lags(), &[1, 7]);
        assert_eq!(ridge.alpha(), 0.5);

        assert_eq!(config.planning.under_capacity_cost(), 3.0);
        assert_eq!(config.sweep.service_levels, vec![0.8, 0.9]);
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = RunConfig::from_toml_str(MINIMAL).unwrap();

        assert_eq!(config.frequency, Frequency::Daily);
        assert_eq!(config.models.seasonal_naive.season_length(), 7);
        assert!(config.models.ridge.is_none());
        assert_eq!(config.sweep.service_levels, DEFAULT_SERVICE_LEVELS.to_vec());
    }

    #[test]
    fn invalid_values_surface_as_config_errors() {
        let bad_level = MINIMAL.replace("service_level = 0.95", "service_level = 1.0");
        assert!(matches!(
            RunConfig::from_toml_str(&bad_level),
            Err(ForecastError::Config(_))
        ));

        let bad_horizon = MINIMAL.replace("horizon = 7", "horizon = 0");
        assert!(matches!(
            RunConfig::from_toml_str(&bad_horizon),
            Err(ForecastError::Config(_))
        ));

        let bad_sweep = format!("{MINIMAL}\n[sweep]\nservice_levels = [0.3]\n");
        assert!(matches!(
            RunConfig::from_toml_str(&bad_sweep),
            Err(ForecastError::Config(_))
        ));
    }

    #[test]
    fn missing_section_is_rejected() {
        let result =
            RunConfig::from_toml_str("[backtest]\nhorizon = 7\nstep = 7\nmin_train_points = 28\n");
        assert!(matches!(result, Err(ForecastError::Config(_))));
    }

    #[test]
    fn model_specs_follow_models_section() {
        let full = RunConfig::from_toml_str(FULL).unwrap();
        let names: Vec<_> = full.model_specs().iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["SeasonalNaive", "Ridge"]);

        let minimal = RunConfig::from_toml_str(MINIMAL).unwrap();
        let specs = minimal.model_specs();
        assert_eq!(specs.len(), 1);

        let model = specs[0].create();
        assert_eq!(model.name(), "SeasonalNaive");
        assert!(!model.is_fitted());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();

        let config = RunConfig::from_path(file.path()).unwrap();
        assert_eq!(config.backtest.step(), 7);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = RunConfig::from_path(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ForecastError::Config(_))));
    }
}
