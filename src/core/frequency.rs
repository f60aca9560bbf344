//! Sampling frequency of a regular time series.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed spacing between consecutive observations.
///
/// Parses from pandas-style aliases: `"h"`, `"D"`, `"W"`, optionally prefixed
/// with a multiplier (`"2D"`, `"15min"`, `"30s"`, `"500ms"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Frequency {
    /// One hour.
    Hourly,
    /// One calendar day.
    #[default]
    Daily,
    /// Seven days.
    Weekly,
    /// Any other positive fixed step.
    Every(Duration),
}

impl Frequency {
    /// Create a custom frequency from a positive duration.
    ///
    /// The step must be a whole number of milliseconds.
    pub fn every(step: Duration) -> Result<Self> {
        if step <= Duration::zero() {
            return Err(ForecastError::InvalidParameter(
                "frequency step must be positive".to_string(),
            ));
        }
        if step.subsec_nanos() % 1_000_000 != 0 {
            return Err(ForecastError::InvalidParameter(
                "frequency step must be a whole number of milliseconds".to_string(),
            ));
        }
        Ok(Self::Every(step))
    }

    /// Length of one step.
    pub fn duration(&self) -> Duration {
        match self {
            Self::Hourly => Duration::hours(1),
            Self::Daily => Duration::days(1),
            Self::Weekly => Duration::weeks(1),
            Self::Every(step) => *step,
        }
    }

    /// Timestamp `steps` periods after `from`.
    ///
    /// Saturates at the latest representable instant.
    pub fn advance(&self, from: DateTime<Utc>, steps: usize) -> DateTime<Utc> {
        i64::try_from(steps)
            .ok()
            .and_then(|steps| self.duration().num_milliseconds().checked_mul(steps))
            .and_then(Duration::try_milliseconds)
            .and_then(|offset| from.checked_add_signed(offset))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// `periods` consecutive timestamps beginning at `start`.
    pub fn range(&self, start: DateTime<Utc>, periods: usize) -> Vec<DateTime<Utc>> {
        (0..periods).map(|i| self.advance(start, i)).collect()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hourly => write!(f, "h"),
            Self::Daily => write!(f, "D"),
            Self::Weekly => write!(f, "W"),
            Self::Every(step) if step.num_milliseconds() % 1000 == 0 => {
                write!(f, "{}s", step.num_seconds())
            }
            Self::Every(step) => write!(f, "{}ms", step.num_milliseconds()),
        }
    }
}

impl FromStr for Frequency {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        let alias = s.trim();
        let split = alias
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| ForecastError::InvalidParameter(format!("unknown frequency '{s}'")))?;
        let (count, unit) = alias.split_at(split);
        let count: i64 = if count.is_empty() {
            1
        } else {
            count
                .parse()
                .map_err(|_| ForecastError::InvalidParameter(format!("unknown frequency '{s}'")))?
        };

        let count = i32::try_from(count)
            .map_err(|_| ForecastError::InvalidParameter(format!("frequency '{s}' is too large")))?;

        let unit_step = match unit {
            "ms" | "L" => Duration::milliseconds(1),
            "s" | "S" => Duration::seconds(1),
            "min" | "T" => Duration::minutes(1),
            "h" | "H" => Duration::hours(1),
            "D" | "d" => Duration::days(1),
            "W" | "w" => Duration::weeks(1),
            _ => {
                return Err(ForecastError::InvalidParameter(format!(
                    "unknown frequency '{s}'"
                )))
            }
        };

        let step = unit_step * count;
        Ok(match step {
            d if d == Duration::hours(1) => Self::Hourly,
            d if d == Duration::days(1) => Self::Daily,
            d if d == Duration::weeks(1) => Self::Weekly,
            d => Self::every(d)?,
        })
    }
}

impl TryFrom<String> for Frequency {
    type Error = ForecastError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Frequency> for String {
    fn from(freq: Frequency) -> Self {
        freq.to_string()
    }
}
