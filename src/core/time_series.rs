//! TimeSeries data structure for representing regularly sampled demand.

use crate::core::Frequency;
use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};

/// A univariate time series with strictly increasing timestamps.
///
/// The core treats a series as immutable input. Forecasters that need to
/// extend history do so on their own copy of the values.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a series from parallel timestamp and value vectors.
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }

        // Validate timestamps are strictly increasing
        for i in 1..timestamps.len() {
            if timestamps[i] <= timestamps[i - 1] {
                return Err(ForecastError::TimestampError(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }

        Ok(Self { timestamps, values })
    }

    /// Create a regular series starting at `start` and spaced at `frequency`.
    pub fn regular(start: DateTime<Utc>, frequency: Frequency, values: Vec<f64>) -> Self {
        Self {
            timestamps: frequency.range(start, values.len()),
            values,
        }
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Timestamp of the last observation.
    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamps.last().copied()
    }

    /// Value observed at `timestamp`, if the series has one.
    ///
    /// NaN entries count as missing.
    pub fn value_at(&self, timestamp: DateTime<Utc>) -> Option<f64> {
        self.timestamps
            .binary_search(&timestamp)
            .ok()
            .map(|i| self.values[i])
            .filter(|v| !v.is_nan())
    }

    /// Extract the observations in `start..end`.
    pub fn slice(&self, start: usize, end: usize) -> Result<TimeSeries> {
        if start > end {
            return Err(ForecastError::InvalidParameter(
                "start must be <= end".to_string(),
            ));
        }
        if end > self.len() {
            return Err(ForecastError::IndexOutOfBounds {
                index: end,
                size: self.len(),
            });
        }

        Ok(TimeSeries {
            timestamps: self.timestamps[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
        })
    }

    /// Look up each timestamp and keep only those with an observed value.
    pub fn reindex(&self, timestamps: &[DateTime<Utc>]) -> TimeSeries {
        let (kept, values): (Vec<_>, Vec<_>) = timestamps
            .iter()
            .filter_map(|&ts| self.value_at(ts).map(|v| (ts, v)))
            .unzip();
        TimeSeries {
            timestamps: kept,
            values,
        }
    }

    /// Pair up observations sharing a timestamp with `other`.
    ///
    /// Returns the aligned `(self, other)` values in timestamp order.
    pub fn align(&self, other: &TimeSeries) -> (Vec<f64>, Vec<f64>) {
        let mut left = Vec::new();
        let mut right = Vec::new();
        let (mut i, mut j) = (0, 0);

        // Both sides are sorted, so a merge walk finds the intersection.
        while i < self.len() && j < other.len() {
            match self.timestamps[i].cmp(&other.timestamps[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    left.push(self.values[i]);
                    right.push(other.values[j]);
                    i += 1;
                    j += 1;
                }
            }
        }

        (left, right)
    }
}
