//! Daily log-return estimation from a historical series

use crate::error::{ForecastError, Result};
use market_data::HistoricalSeries;

/// Estimated distribution parameters of daily log-returns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnStatistics {
    /// Mean daily log-return
    pub mu_daily: f64,
    /// Sample standard deviation of daily log-returns (n-1 denominator)
    pub sigma_daily: f64,
    /// Number of return observations the estimates are based on
    pub n_returns: usize,
}

/// Estimate daily log-return statistics from a historical series.
///
/// Requires at least `min_observations` price points (and never fewer
/// than 3, so the unbiased standard deviation is defined). Price
/// positivity and date ordering are guaranteed by
/// [`HistoricalSeries`] construction, so the log of every price ratio
/// is finite here.
pub fn estimate_returns(
    series: &HistoricalSeries,
    min_observations: usize,
) -> Result<ReturnStatistics> {
    let required = min_observations.max(3);
    if series.len() < required {
        return Err(ForecastError::InsufficientData {
            required,
            actual: series.len(),
        });
    }

    let closes = series.closes();
    let log_returns: Vec<f64> = closes.windows(2).map(|w| (w[1] / w[0]).ln()).collect();

    let n = log_returns.len() as f64;
    let mu_daily = log_returns.iter().sum::<f64>() / n;
    let variance = log_returns
        .iter()
        .map(|r| (r - mu_daily).powi(2))
        .sum::<f64>()
        / (n - 1.0);

    Ok(ReturnStatistics {
        mu_daily,
        sigma_daily: variance.sqrt(),
        n_returns: log_returns.len(),
    })
}
