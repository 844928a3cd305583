//! Utility functions for generating synthetic price series
//!
//! Used by tests and examples in place of a live data feed.

use crate::{DailyClose, HistoricalSeries};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Generate a synthetic daily closing-price series following a lognormal
/// random walk.
///
/// # Arguments
/// * `ticker` - Symbol to attach to the series
/// * `num_points` - Number of daily observations
/// * `start_price` - Close of the first observation
/// * `daily_drift` - Mean daily log-return
/// * `daily_vol` - Standard deviation of daily log-returns
/// * `seed` - RNG seed, so callers get reproducible series
pub fn generate_test_series(
    ticker: &str,
    num_points: usize,
    start_price: f64,
    daily_drift: f64,
    daily_vol: f64,
    seed: u64,
) -> HistoricalSeries {
    let mut rng = StdRng::seed_from_u64(seed);
    let shock = Normal::new(0.0, 1.0).unwrap();

    let base_date = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let mut points = Vec::with_capacity(num_points);
    let mut price = start_price;

    for i in 0..num_points {
        let date = base_date
            .checked_add_days(chrono::Days::new(i as u64))
            .unwrap();
        points.push(DailyClose { date, close: price });

        let z: f64 = shock.sample(&mut rng);
        price *= (daily_drift + daily_vol * z).exp();
    }

    HistoricalSeries::new(ticker, points).unwrap()
}

/// Generate a deterministic series climbing linearly from `start_price`
/// to `end_price` over `num_points` observations.
pub fn generate_linear_series(
    ticker: &str,
    num_points: usize,
    start_price: f64,
    end_price: f64,
) -> HistoricalSeries {
    assert!(num_points >= 2, "need at least two points");

    let base_date = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let step = (end_price - start_price) / (num_points - 1) as f64;

    let points = (0..num_points)
        .map(|i| DailyClose {
            date: base_date
                .checked_add_days(chrono::Days::new(i as u64))
                .unwrap(),
            close: start_price + step * i as f64,
        })
        .collect();

    HistoricalSeries::new(ticker, points).unwrap()
}
