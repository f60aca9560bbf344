//! Property-based tests for metrics, planning and the backtest engine.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated demand series.

use capacity_forecast::backtest::{rolling_origin_backtest, BacktestConfig};
use capacity_forecast::core::{Frequency, TimeSeries};
use capacity_forecast::models::baseline::{SeasonalNaive, SeasonalNaiveConfig};
use capacity_forecast::models::Forecaster;
use capacity_forecast::planning::{evaluate_capacity_cost, recommend_capacity, PlanningConfig};
use capacity_forecast::utils::{mae, smape};
use capacity_forecast::ForecastError;
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Create a daily TimeSeries from a vector of values.
fn make_ts(values: &[f64]) -> TimeSeries {
    TimeSeries::regular(base(), Frequency::Daily, values.to_vec())
}

/// Strategy for non-negative demand values.
fn demand_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0..1000.0_f64, min_len..max_len)
}

/// Strategy for a pair of equally long series, possibly negative.
fn paired_strategy(max_len: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1..max_len).prop_flat_map(|len| {
        (
            prop::collection::vec(-500.0..500.0_f64, len),
            prop::collection::vec(-500.0..500.0_f64, len),
        )
    })
}

// =============================================================================
// Property: Metrics are non-negative and zero on identical series
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn mae_is_non_negative((actual, predicted) in paired_strategy(60)) {
        let value = mae(&make_ts(&actual), &make_ts(&predicted)).unwrap();
        prop_assert!(value >= 0.0);
    }

    #[test]
    fn smape_is_bounded((actual, predicted) in paired_strategy(60)) {
        let value = smape(&make_ts(&actual), &make_ts(&predicted)).unwrap();
        prop_assert!(value >= 0.0);
        prop_assert!(value <= 200.0 + 1e-9);
    }

    #[test]
    fn smape_of_identical_series_is_zero(values in demand_strategy(1, 60)) {
        let ts = make_ts(&values);
        prop_assert_eq!(smape(&ts, &ts).unwrap(), 0.0);
        prop_assert_eq!(mae(&ts, &ts).unwrap(), 0.0);
    }
}

// =============================================================================
// Property: Capacity planning
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn capacity_is_monotone_in_service_level(
        values in demand_strategy(1, 40),
        a in 0.5..0.999_f64,
        b in 0.5..0.999_f64,
        units in 1.0..50.0_f64
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let forecast = make_ts(&values);

        let low_rec = recommend_capacity(&forecast, &PlanningConfig::new(low, units, 1.0, 3.0).unwrap()).unwrap();
        let high_rec = recommend_capacity(&forecast, &PlanningConfig::new(high, units, 1.0, 3.0).unwrap()).unwrap();

        prop_assert!(high_rec.recommended_capacity >= low_rec.recommended_capacity);
    }

    #[test]
    fn capacity_covers_the_quantile(
        values in demand_strategy(1, 40),
        level in 0.5..0.999_f64,
        units in 1.0..50.0_f64
    ) {
        let config = PlanningConfig::new(level, units, 1.0, 3.0).unwrap();
        let rec = recommend_capacity(&make_ts(&values), &config).unwrap();

        prop_assert!(rec.recommended_capacity as f64 * units >= rec.demand_quantile - 1e-9);
        prop_assert!((rec.recommended_capacity as f64 - 1.0) * units < rec.demand_quantile + 1e-9);
    }

    #[test]
    fn exact_capacity_costs_nothing(
        required in 1u64..50,
        shortfalls in prop::collection::vec(0u32..20, 1..30),
        over in 0.0..10.0_f64,
        under in 0.0..10.0_f64
    ) {
        // Every period's demand rounds up to exactly `required` units of 20
        let demand: Vec<f64> = shortfalls
            .iter()
            .map(|&s| 20.0 * required as f64 - s as f64)
            .collect();
        let config = PlanningConfig::new(0.9, 20.0, over, under).unwrap();

        prop_assert_eq!(evaluate_capacity_cost(&make_ts(&demand), required, &config), 0.0);
    }

    #[test]
    fn cost_is_non_negative(
        demand in demand_strategy(1, 30),
        capacity in 0u64..100,
        over in 0.0..10.0_f64,
        under in 0.0..10.0_f64
    ) {
        let config = PlanningConfig::new(0.9, 20.0, over, under).unwrap();
        prop_assert!(evaluate_capacity_cost(&make_ts(&demand), capacity, &config) >= 0.0);
    }
}

// =============================================================================
// Property: Seasonal forecasts tile the last season
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn seasonal_naive_tiles_last_season(
        values in demand_strategy(12, 80),
        period in 1usize..12,
        horizon in 1usize..30
    ) {
        let ts = make_ts(&values);
        let mut model = SeasonalNaive::new(SeasonalNaiveConfig::new(period).unwrap());
        model.fit(&ts).unwrap();

        let start = base() + Duration::days(values.len() as i64);
        let forecast = model.predict(start, horizon, Frequency::Daily).unwrap();

        prop_assert_eq!(forecast.len(), horizon);
        prop_assert_eq!(forecast.timestamps()[0], start);
        let n = values.len();
        for (k, &v) in forecast.values().iter().enumerate() {
            prop_assert_eq!(v, values[n - period + k % period]);
        }
    }
}

// =============================================================================
// Property: Backtest fold layout
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn folds_are_numbered_and_strided(
        values in demand_strategy(10, 120),
        horizon in 1usize..10,
        step in 1usize..10,
        min_train in 7usize..40
    ) {
        let ts = make_ts(&values);
        let config = BacktestConfig::new(horizon, step, min_train).unwrap();
        let planning = PlanningConfig::new(0.9, 20.0, 1.0, 3.0).unwrap();
        let seasonal = SeasonalNaiveConfig::new(7).unwrap();

        let result = rolling_origin_backtest(
            &ts,
            Frequency::Daily,
            &config,
            || SeasonalNaive::new(seasonal),
            &planning,
        );

        if values.len() < min_train + horizon {
            prop_assert_eq!(
                result,
                Err(ForecastError::InsufficientData { needed: min_train + horizon, got: values.len() })
            );
        } else {
            let folds = result.unwrap();
            let expected = (values.len() - horizon - min_train) / step + 1;
            prop_assert_eq!(folds.len(), expected);

            prop_assert_eq!(folds[0].cutoff, base() + Duration::days(min_train as i64 - 1));
            for (i, fold) in folds.iter().enumerate() {
                prop_assert_eq!(fold.fold, i + 1);
                prop_assert_eq!(fold.horizon, horizon);
                prop_assert!(fold.mae >= 0.0);
                prop_assert!(fold.smape >= 0.0);
                prop_assert!(fold.planning_cost >= 0.0);
            }
            for pair in folds.windows(2) {
                prop_assert_eq!(pair[1].cutoff - pair[0].cutoff, Duration::days(step as i64));
            }
        }
    }
}
