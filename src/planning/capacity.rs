//! Capacity recommendation and cost evaluation.

use crate::core::{Frequency, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::stats::quantile;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validated service and cost parameters shared by every fold of a run.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawPlanningConfig")]
pub struct PlanningConfig {
    service_level: f64,
    units_per_capacity: f64,
    over_capacity_cost: f64,
    under_capacity_cost: f64,
}

#[derive(Deserialize)]
struct RawPlanningConfig {
    service_level: f64,
    units_per_capacity: f64,
    over_capacity_cost: f64,
    under_capacity_cost: f64,
}

impl PlanningConfig {
    /// Create a planning configuration.
    ///
    /// # Arguments
    /// * `service_level` - Demand quantile to provision for, in `[0.5, 1.0)`
    /// * `units_per_capacity` - Work one capacity unit handles per period, `> 0`
    /// * `over_capacity_cost` - Cost per idle capacity unit per period, `>= 0`
    /// * `under_capacity_cost` - Cost per missing capacity unit per period, `>= 0`
    pub fn new(
        service_level: f64,
        units_per_capacity: f64,
        over_capacity_cost: f64,
        under_capacity_cost: f64,
    ) -> Result<Self> {
        if !(0.5..1.0).contains(&service_level) {
            return Err(ForecastError::InvalidParameter(format!(
                "service_level must be in [0.5, 1.0), got {service_level}"
            )));
        }
        if units_per_capacity.is_nan() || units_per_capacity <= 0.0 {
            return Err(ForecastError::InvalidParameter(
                "units_per_capacity must be > 0".to_string(),
            ));
        }
        for (name, rate) in [
            ("over_capacity_cost", over_capacity_cost),
            ("under_capacity_cost", under_capacity_cost),
        ] {
            if rate.is_nan() || rate < 0.0 {
                return Err(ForecastError::InvalidParameter(format!(
                    "{name} must be >= 0"
                )));
            }
        }

        Ok(Self {
            service_level,
            units_per_capacity,
            over_capacity_cost,
            under_capacity_cost,
        })
    }

    /// Same costs and productivity with a different service level.
    pub fn with_service_level(&self, service_level: f64) -> Result<Self> {
        Self::new(
            service_level,
            self.units_per_capacity,
            self.over_capacity_cost,
            self.under_capacity_cost,
        )
    }

    pub fn service_level(&self) -> f64 {
        self.service_level
    }

    pub fn units_per_capacity(&self) -> f64 {
        self.units_per_capacity
    }

    pub fn over_capacity_cost(&self) -> f64 {
        self.over_capacity_cost
    }

    pub fn under_capacity_cost(&self) -> f64 {
        self.under_capacity_cost
    }
}

impl TryFrom<RawPlanningConfig> for PlanningConfig {
    type Error = ForecastError;

    fn try_from(raw: RawPlanningConfig) -> Result<Self> {
        Self::new(
            raw.service_level,
            raw.units_per_capacity,
            raw.over_capacity_cost,
            raw.under_capacity_cost,
        )
    }
}

/// Capacity sized for one forecast horizon, with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityRecommendation {
    /// Quantile level used.
    pub service_level: f64,
    /// Forecast demand at `service_level`.
    pub demand_quantile: f64,
    pub units_per_capacity: f64,
    /// Whole capacity units covering `demand_quantile`.
    pub recommended_capacity: u64,
    pub over_capacity_cost: f64,
    pub under_capacity_cost: f64,
}

impl CapacityRecommendation {
    /// Percentile label of the service level, e.g. `"p90"` for 0.9.
    pub fn quantile_label(&self) -> String {
        format!("p{}", (self.service_level * 100.0).round() as u32)
    }
}

/// Recommend capacity covering the `service_level` quantile of a forecast.
///
/// The quantile is the linear-interpolation sample quantile of the forecast
/// values. Capacity is `ceil(quantile / units_per_capacity)`, never rounded
/// down, and floored at zero for non-positive demand.
///
/// # Example
/// ```
/// use capacity_forecast::core::{Frequency, TimeSeries};
/// use capacity_forecast::planning::{recommend_capacity, PlanningConfig};
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let forecast = TimeSeries::regular(start, Frequency::Daily, vec![100.0, 120.0, 140.0]);
/// let config = PlanningConfig::new(0.9, 20.0, 1.0, 3.0).unwrap();
///
/// let rec = recommend_capacity(&forecast, &config).unwrap();
/// assert_eq!(rec.recommended_capacity, 7); // p90 = 136 -> 6.8 -> 7
/// ```
pub fn recommend_capacity(
    forecast: &TimeSeries,
    config: &PlanningConfig,
) -> Result<CapacityRecommendation> {
    if forecast.is_empty() {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }

    let demand_quantile = quantile(forecast.values(), config.service_level);
    if !demand_quantile.is_finite() {
        return Err(ForecastError::ComputationError(
            "forecast demand quantile is not finite".to_string(),
        ));
    }

    let units = (demand_quantile / config.units_per_capacity).ceil().max(0.0);
    let recommended_capacity = units as u64;

    Ok(CapacityRecommendation {
        service_level: config.service_level,
        demand_quantile,
        units_per_capacity: config.units_per_capacity,
        recommended_capacity,
        over_capacity_cost: config.over_capacity_cost,
        under_capacity_cost: config.under_capacity_cost,
    })
}

/// Cost of running `capacity` units against realized demand.
///
/// For each period `required = ceil(demand / units_per_capacity)`; idle units
/// cost `over_capacity_cost` each and missing units `under_capacity_cost`
/// each. The per-period costs are summed over the whole window.
///
/// Capacity is unsigned, so the negative-capacity case cannot be expressed.
pub fn evaluate_capacity_cost(
    actual_demand: &TimeSeries,
    capacity: u64,
    config: &PlanningConfig,
) -> f64 {
    let capacity = capacity as f64;
    let (over, under) = actual_demand
        .values()
        .iter()
        .map(|demand| (demand / config.units_per_capacity).ceil())
        .fold((0.0, 0.0), |(over, under), required| {
            (
                over + (capacity - required).max(0.0),
                under + (required - capacity).max(0.0),
            )
        });

    config.over_capacity_cost * over + config.under_capacity_cost * under
}

/// A forward forecast together with the capacity sized from it.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityPlan {
    pub forecast: TimeSeries,
    pub recommendation: CapacityRecommendation,
}

/// Fit on the full history and size capacity for the next `horizon` periods.
///
/// The forecast starts one period after the last observation.
pub fn plan_capacity<F: Forecaster>(
    history: &TimeSeries,
    frequency: Frequency,
    mut forecaster: F,
    horizon: usize,
    config: &PlanningConfig,
) -> Result<CapacityPlan> {
    let last = history
        .last_timestamp()
        .ok_or(ForecastError::InsufficientData { needed: 1, got: 0 })?;

    forecaster.fit(history)?;
    let forecast = forecaster.predict(frequency.advance(last, 1), horizon, frequency)?;
    let recommendation = recommend_capacity(&forecast, config)?;

    debug!(
        model = forecaster.name(),
        horizon,
        capacity = recommendation.recommended_capacity,
        "Capacity planned"
    );

    Ok(CapacityPlan {
        forecast,
        recommendation,
    })
}
