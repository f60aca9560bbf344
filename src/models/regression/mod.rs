//! Regression forecasters built on engineered lag features.

mod features;
mod ridge_forecaster;

pub use features::LagFeatures;
pub use ridge_forecaster::{RidgeConfig, RidgeForecaster};
