//! Rolling-origin backtesting.
//!
//! Each fold trains a fresh model on the history up to a cutoff, forecasts
//! the next `horizon` periods, and scores the forecast twice: for accuracy
//! (MAE, sMAPE) and for the cost of the capacity it would have recommended.

mod config;
mod engine;
mod summary;

pub use config::BacktestConfig;
pub use engine::{rolling_origin_backtest, FoldResult};
pub use summary::{service_level_sweep, BacktestSummary, SweepPoint, DEFAULT_SERVICE_LEVELS};
