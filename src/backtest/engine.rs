//! Rolling-origin backtest engine.

use super::BacktestConfig;
use crate::core::{Frequency, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::planning::{evaluate_capacity_cost, recommend_capacity, PlanningConfig};
use crate::utils::metrics::{mae, smape};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Outcome of one train/predict/evaluate cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoldResult {
    /// Fold number, starting at 1.
    pub fold: usize,
    /// Timestamp of the last training observation.
    pub cutoff: DateTime<Utc>,
    pub horizon: usize,
    pub mae: f64,
    /// sMAPE in percent.
    pub smape: f64,
    /// Capacity recommended from this fold's forecast.
    pub recommended_capacity: u64,
    /// Cost of that capacity against this fold's actual demand.
    pub planning_cost: f64,
}

/// Evaluate a forecaster with rolling-origin (expanding window) backtesting.
///
/// # Arguments
/// * `series` - Gap-filled history sampled at `frequency`
/// * `frequency` - Spacing of the series and of every test window
/// * `config` - Horizon, stride and minimum training length
/// * `model_factory` - Function that creates a fresh model instance for each fold
/// * `planning` - Service level and cost rates for the capacity translation
///
/// # Returns
/// One [`FoldResult`] per cutoff, in cutoff order. Any failing fold aborts the
/// whole run; test timestamps without an actual value are excluded from that
/// fold's metrics and cost instead.
///
/// # Example
/// ```
/// use capacity_forecast::backtest::{rolling_origin_backtest, BacktestConfig};
/// use capacity_forecast::core::{Frequency, TimeSeries};
/// use capacity_forecast::models::baseline::{SeasonalNaive, SeasonalNaiveConfig};
/// use capacity_forecast::planning::PlanningConfig;
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let values: Vec<f64> = (0..60).map(|i| 100.0 + (i % 7) as f64).collect();
/// let series = TimeSeries::regular(start, Frequency::Daily, values);
///
/// let config = BacktestConfig::new(7, 7, 28).unwrap();
/// let planning = PlanningConfig::new(0.9, 20.0, 1.0, 3.0).unwrap();
/// let seasonal = SeasonalNaiveConfig::new(7).unwrap();
///
/// let folds = rolling_origin_backtest(
///     &series,
///     Frequency::Daily,
///     &config,
///     || SeasonalNaive::new(seasonal),
///     &planning,
/// )
/// .unwrap();
///
/// assert_eq!(folds.len(), 4);
/// assert!(folds.iter().all(|f| f.mae == 0.0));
/// ```
pub fn rolling_origin_backtest<F, Factory>(
    series: &TimeSeries,
    frequency: Frequency,
    config: &BacktestConfig,
    model_factory: Factory,
    planning: &PlanningConfig,
) -> Result<Vec<FoldResult>>
where
    F: Forecaster,
    Factory: Fn() -> F,
{
    let available = series.len();
    let required = config.required_points();
    if available < required {
        return Err(ForecastError::InsufficientData {
            needed: required,
            got: available,
        });
    }

    let cutoffs = config.cutoffs(available);
    let mut results = Vec::with_capacity(cutoffs.len());

    for (i, &cutoff_idx) in cutoffs.iter().enumerate() {
        let fold = i + 1;
        let cutoff = series.timestamps()[cutoff_idx];
        let train = series.slice(0, cutoff_idx + 1)?;

        let test_start = frequency.advance(cutoff, 1);
        let test_index = frequency.range(test_start, config.horizon());
        let actual = series.reindex(&test_index);
        if actual.len() < test_index.len() {
            warn!(
                fold,
                missing = test_index.len() - actual.len(),
                "Dropping test timestamps without actuals"
            );
        }

        // Create and fit model
        let mut model = model_factory();
        model.fit(&train)?;
        let predicted = model.predict(test_start, config.horizon(), frequency)?;

        let fold_mae = mae(&actual, &predicted)?;
        let fold_smape = smape(&actual, &predicted)?;

        let recommendation = recommend_capacity(&predicted, planning)?;
        let compared = predicted.reindex(actual.timestamps());
        let actual = actual.reindex(compared.timestamps());
        let planning_cost =
            evaluate_capacity_cost(&actual, recommendation.recommended_capacity, planning);

        debug!(
            fold,
            %cutoff,
            train_len = train.len(),
            mae = fold_mae,
            capacity = recommendation.recommended_capacity,
            "Fold evaluated"
        );

        results.push(FoldResult {
            fold,
            cutoff,
            horizon: config.horizon(),
            mae: fold_mae,
            smape: fold_smape,
            recommended_capacity: recommendation.recommended_capacity,
            planning_cost,
        });
    }

    info!(
        folds = results.len(),
        mean_mae = results.iter().map(|r| r.mae).sum::<f64>() / results.len() as f64,
        "Backtest complete"
    );

    Ok(results)
}
