//! Aggregation of fold results and service-level sweeps.

use super::{rolling_origin_backtest, BacktestConfig, FoldResult};
use crate::core::{Frequency, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::planning::PlanningConfig;
use crate::utils::stats::{mean, std_dev};
use serde::Serialize;
use tracing::info;

/// Service levels swept when none are configured.
pub const DEFAULT_SERVICE_LEVELS: [f64; 4] = [0.70, 0.80, 0.90, 0.95];

/// Averages over all folds of one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestSummary {
    /// Number of folds evaluated.
    pub n_folds: usize,
    /// Mean MAE across folds.
    pub mae: f64,
    /// Standard deviation of MAE across folds.
    pub mae_std: f64,
    /// Mean sMAPE across folds.
    pub smape: f64,
    /// Mean recommended capacity across folds.
    pub avg_capacity: f64,
    /// Mean planning cost across folds.
    pub avg_planning_cost: f64,
}

impl BacktestSummary {
    /// Summarize a non-empty set of folds.
    pub fn from_folds(folds: &[FoldResult]) -> Result<Self> {
        if folds.is_empty() {
            return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
        }

        let mae_values: Vec<f64> = folds.iter().map(|f| f.mae).collect();
        let smape_values: Vec<f64> = folds.iter().map(|f| f.smape).collect();
        let capacities: Vec<f64> = folds
            .iter()
            .map(|f| f.recommended_capacity as f64)
            .collect();
        let costs: Vec<f64> = folds.iter().map(|f| f.planning_cost).collect();

        Ok(Self {
            n_folds: folds.len(),
            mae: mean(&mae_values),
            mae_std: std_dev(&mae_values),
            smape: mean(&smape_values),
            avg_capacity: mean(&capacities),
            avg_planning_cost: mean(&costs),
        })
    }
}

/// Backtest outcome at one service level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub service_level: f64,
    pub summary: BacktestSummary,
}

/// Re-run the backtest at each service level to expose the cost tradeoff.
///
/// Every level is validated before any backtest runs. Forecast accuracy is
/// identical across points; capacity and planning cost are what move.
pub fn service_level_sweep<F, Factory>(
    series: &TimeSeries,
    frequency: Frequency,
    config: &BacktestConfig,
    model_factory: Factory,
    planning: &PlanningConfig,
    service_levels: &[f64],
) -> Result<Vec<SweepPoint>>
where
    F: Forecaster,
    Factory: Fn() -> F,
{
    let plans = service_levels
        .iter()
        .map(|&level| planning.with_service_level(level))
        .collect::<Result<Vec<_>>>()?;

    let mut points = Vec::with_capacity(plans.len());
    for plan in &plans {
        let folds = rolling_origin_backtest(series, frequency, config, &model_factory, plan)?;
        let summary = BacktestSummary::from_folds(&folds)?;
        info!(
            service_level = plan.service_level(),
            avg_capacity = summary.avg_capacity,
            avg_planning_cost = summary.avg_planning_cost,
            "Sweep point evaluated"
        );
        points.push(SweepPoint {
            service_level: plan.service_level(),
            summary,
        });
    }

    Ok(points)
}
