//! Numerical helpers shared by models, planning and backtesting.

pub mod metrics;
pub mod ridge;
pub mod stats;

pub use metrics::{mae, smape, smape_with_epsilon, DEFAULT_SMAPE_EPSILON};
pub use ridge::{ridge_fit, RidgeResult};
pub use stats::{mean, quantile, std_dev, variance};
