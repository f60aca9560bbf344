//! Baseline forecasting models.
//!
//! Simple methods that serve as benchmarks for more complex models.

mod seasonal_naive;

pub use seasonal_naive::{SeasonalNaive, SeasonalNaiveConfig};
