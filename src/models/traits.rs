//! Forecaster trait defining the common interface for all models.

use crate::core::{Frequency, TimeSeries};
use crate::error::Result;
use chrono::{DateTime, Utc};

/// Common interface for all forecasting models.
///
/// A forecaster starts unfitted; `fit` stores whatever state the model needs
/// and `predict` produces point forecasts on a regular timestamp grid.
///
/// This trait is object-safe and can be used with `Box<dyn Forecaster>`.
pub trait Forecaster {
    /// Fit the model to the time series data.
    fn fit(&mut self, series: &TimeSeries) -> Result<()>;

    /// Predict `horizon` steps, the first at `start`, spaced at `frequency`.
    fn predict(
        &self,
        start: DateTime<Utc>,
        horizon: usize,
        frequency: Frequency,
    ) -> Result<TimeSeries>;

    /// Get the model name.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool;
}

impl<F: Forecaster + ?Sized> Forecaster for Box<F> {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        (**self).fit(series)
    }

    fn predict(
        &self,
        start: DateTime<Utc>,
        horizon: usize,
        frequency: Frequency,
    ) -> Result<TimeSeries> {
        (**self).predict(start, horizon, frequency)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_fitted(&self) -> bool {
        (**self).is_fitted()
    }
}

/// Type alias for boxed forecaster trait objects.
///
/// # Example
///
/// ```
/// use capacity_forecast::models::{BoxedForecaster, Forecaster};
/// use capacity_forecast::models::baseline::{SeasonalNaive, SeasonalNaiveConfig};
///
/// let config = SeasonalNaiveConfig::new(7).unwrap();
/// let model: BoxedForecaster = Box::new(SeasonalNaive::new(config));
/// assert_eq!(model.name(), "SeasonalNaive");
/// ```
pub type BoxedForecaster = Box<dyn Forecaster>;

/// Named factory producing a fresh, unfitted forecaster on every call.
///
/// # Example
///
/// ```
/// use capacity_forecast::models::{Forecaster, ModelSpec};
/// use capacity_forecast::models::baseline::{SeasonalNaive, SeasonalNaiveConfig};
///
/// let config = SeasonalNaiveConfig::new(7).unwrap();
/// let spec = ModelSpec::new("SeasonalNaive", move || Box::new(SeasonalNaive::new(config)));
///
/// let model = spec.create();
/// assert!(!model.is_fitted());
/// ```
pub struct ModelSpec {
    /// Display name of the model
    pub name: &'static str,
    /// Factory function to create a new instance
    factory: Box<dyn Fn() -> BoxedForecaster + Send + Sync>,
}

impl ModelSpec {
    /// Create a model spec from a factory.
    pub fn new<F>(name: &'static str, factory: F) -> Self
    where
        F: Fn() -> BoxedForecaster + Send + Sync + 'static,
    {
        Self {
            name,
            factory: Box::new(factory),
        }
    }

    /// Create a new model instance.
    pub fn create(&self) -> BoxedForecaster {
        (self.factory)()
    }
}

impl std::fmt::Debug for ModelSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSpec").field("name", &self.name).finish()
    }
}
