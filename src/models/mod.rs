//! Forecasting models.

mod traits;

pub mod baseline;
pub mod regression;

pub use traits::{BoxedForecaster, Forecaster, ModelSpec};
