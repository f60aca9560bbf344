//! Core data structures for time series forecasting.

mod frequency;
mod time_series;

pub use frequency::Frequency;
pub use time_series::TimeSeries;
