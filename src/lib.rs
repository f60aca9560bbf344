//! # capacity-forecast
//!
//! Demand forecasting and capacity planning with rolling-origin backtests.
//!
//! A backtest repeatedly trains a fresh forecaster on an expanding window,
//! forecasts the next periods, and scores every fold on forecast accuracy
//! (MAE, sMAPE) and on the realized cost of the capacity the forecast would
//! have recommended. Two forecasters are provided: a seasonal-naive baseline
//! and a recursive ridge regression on lag and rolling-mean features.

#![allow(clippy::needless_range_loop)]

pub mod backtest;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod planning;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::backtest::{rolling_origin_backtest, BacktestConfig, FoldResult};
    pub use crate::core::{Frequency, TimeSeries};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::Forecaster;
    pub use crate::planning::{evaluate_capacity_cost, recommend_capacity, PlanningConfig};
    pub use crate::utils::{mae, smape};
}
