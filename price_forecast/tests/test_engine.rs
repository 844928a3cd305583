use chrono::{Days, NaiveDate};
use market_data::utils::{generate_linear_series, generate_test_series};
use market_data::SeriesError;
use price_forecast::{
    EngineConfig, ForecastEngine, ForecastError, ForecastRequest, CONFIDENCE_LEVELS,
};
use pretty_assertions::assert_eq;

fn days_after(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap()
}

#[test]
fn rising_series_extrapolates_above_last_close() {
    // 30 daily closes rising steadily from 100 to 130, target 10 days out
    let series = generate_linear_series("ACME", 30, 100.0, 130.0);
    let target = days_after(series.last().date, 10);
    let request = ForecastRequest::new("ACME", target).unwrap();

    let engine = ForecastEngine::default();
    let result = engine.forecast(&series, &request).unwrap();

    assert_eq!(result.current_price, 130.0);
    assert_eq!(result.target_date, target);
    assert!(result.median_prediction > 130.0);

    let (lower_80, upper_80) = result.confidence_intervals["80"];
    let (lower_95, upper_95) = result.confidence_intervals["95"];
    assert!(lower_95 < lower_80);
    assert!(upper_80 < upper_95);
    assert!(lower_80 <= result.median_prediction);
    assert!(result.median_prediction <= upper_80);

    let p = result.probability_within_5_percent;
    assert!((0.0..=100.0).contains(&p));
}

#[test]
fn flat_series_degenerates_to_current_price() {
    let series = generate_linear_series("FLAT", 40, 100.0, 100.0);
    let request = ForecastRequest::new("FLAT", days_after(series.last().date, 15)).unwrap();

    let result = ForecastEngine::default().forecast(&series, &request).unwrap();

    assert_eq!(result.median_prediction, 100.0);
    for level in CONFIDENCE_LEVELS {
        let (lower, upper) = result.confidence_intervals[&level.to_string()];
        assert_eq!(lower, 100.0);
        assert_eq!(upper, 100.0);
    }
    assert_eq!(result.probability_within_5_percent, 100.0);
}

#[test]
fn short_series_is_rejected() {
    let series = generate_linear_series("ACME", 5, 100.0, 105.0);
    let request = ForecastRequest::new("ACME", days_after(series.last().date, 10)).unwrap();

    let result = ForecastEngine::default().forecast(&series, &request);
    assert!(matches!(
        result,
        Err(ForecastError::InsufficientData { required: 20, actual: 5 })
    ));
}

#[test]
fn non_future_target_dates_are_rejected() {
    let series = generate_linear_series("ACME", 30, 100.0, 130.0);
    let engine = ForecastEngine::default();

    for target in [series.last().date, days_after(series.first().date, 3)] {
        let request = ForecastRequest::new("ACME", target).unwrap();
        let result = engine.forecast(&series, &request);
        assert!(matches!(result, Err(ForecastError::InvalidHorizon(_))));
    }
}

#[test]
fn horizon_cap_is_inclusive() {
    let series = generate_linear_series("ACME", 30, 100.0, 130.0);
    let engine = ForecastEngine::default();

    let at_cap = ForecastRequest::new("ACME", days_after(series.last().date, 365)).unwrap();
    assert!(engine.forecast(&series, &at_cap).is_ok());

    let past_cap = ForecastRequest::new("ACME", days_after(series.last().date, 366)).unwrap();
    assert!(matches!(
        engine.forecast(&series, &past_cap),
        Err(ForecastError::InvalidHorizon(_))
    ));
}

#[test]
fn repeated_calls_are_bit_identical() {
    let series = generate_test_series("ACME", 150, 100.0, 0.0006, 0.018, 3);
    let request = ForecastRequest::new("ACME", days_after(series.last().date, 30)).unwrap();
    let engine = ForecastEngine::default();

    let first = engine.forecast(&series, &request).unwrap();
    let second = engine.forecast(&series, &request).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn response_serializes_to_the_wire_shape() {
    let series = generate_linear_series("ACME", 30, 100.0, 130.0);
    let request = ForecastRequest::new("ACME", days_after(series.last().date, 10)).unwrap();

    let response = ForecastEngine::default()
        .forecast_response(&series, &request)
        .unwrap();
    let value: serde_json::Value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["ticker"], "ACME");

    let prediction = value["prediction"].as_object().unwrap();
    assert!(prediction["current_price"].is_number());
    assert!(prediction["median_prediction"].is_number());
    assert!(prediction["probability_within_5_percent"].is_number());
    assert!(prediction["target_date"].as_str().unwrap().starts_with("2023-"));

    let intervals = prediction["confidence_intervals"].as_object().unwrap();
    assert_eq!(
        intervals.keys().collect::<Vec<_>>(),
        vec!["80", "95"]
    );
    for bounds in intervals.values() {
        assert_eq!(bounds.as_array().unwrap().len(), 2);
    }

    // 30 points cannot support a walk-forward evaluation at this
    // horizon, so the accuracy block is omitted from the JSON
    assert!(!prediction.contains_key("historical_accuracy"));
}

#[test]
fn long_history_attaches_backtested_accuracy() {
    let series = generate_test_series("ACME", 200, 100.0, 0.0006, 0.018, 5);
    let request = ForecastRequest::new("ACME", days_after(series.last().date, 10)).unwrap();

    let result = ForecastEngine::default().forecast(&series, &request).unwrap();
    let accuracy = result.historical_accuracy.unwrap();

    assert_eq!(accuracy.n_predictions, 60);
    assert!(accuracy.mape >= 0.0);
    assert!(accuracy.rmse >= 0.0);
    assert!((0.0..=100.0).contains(&accuracy.directional_accuracy));
}

#[test]
fn backtesting_can_be_disabled() {
    let series = generate_test_series("ACME", 200, 100.0, 0.0006, 0.018, 5);
    let request = ForecastRequest::new("ACME", days_after(series.last().date, 10)).unwrap();

    let engine = ForecastEngine::new(EngineConfig {
        backtest_window: 0,
        ..EngineConfig::default()
    })
    .unwrap();

    let result = engine.forecast(&series, &request).unwrap();
    assert!(result.historical_accuracy.is_none());
}

#[test]
fn ticker_mismatch_is_rejected() {
    let series = generate_linear_series("ACME", 30, 100.0, 130.0);
    let request = ForecastRequest::new("OTHER", days_after(series.last().date, 10)).unwrap();

    let result = ForecastEngine::default().forecast(&series, &request);
    assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));
}

#[test]
fn request_normalizes_and_validates_ticker() {
    let target = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();

    let request = ForecastRequest::new(" acme ", target).unwrap();
    assert_eq!(request.ticker(), "ACME");
    assert_eq!(request.target_date(), target);

    assert!(matches!(
        ForecastRequest::new("   ", target),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn engine_config_is_validated() {
    assert!(ForecastEngine::new(EngineConfig {
        min_observations: 2,
        ..EngineConfig::default()
    })
    .is_err());

    assert!(ForecastEngine::new(EngineConfig {
        max_horizon_days: 0,
        ..EngineConfig::default()
    })
    .is_err());
}

#[test]
fn series_errors_map_to_invalid_series() {
    let err = ForecastError::from(SeriesError::Empty);
    assert!(matches!(err, ForecastError::InvalidSeries(_)));
}
