//! The forecast engine: request validation and result assembly

use crate::backtest::{BacktestReport, PredictionBacktester};
use crate::error::{ForecastError, Result};
use crate::projection::HorizonProjection;
use crate::returns::estimate_returns;
use chrono::NaiveDate;
use market_data::HistoricalSeries;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Confidence levels reported with every forecast, in percent
pub const CONFIDENCE_LEVELS: [u8; 2] = [80, 95];

/// Band used for the probability statement: ±5% around the median
const PROBABILITY_BAND: f64 = 0.05;

/// Tunables for the forecast engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum observations required to estimate return statistics
    pub min_observations: usize,
    /// Maximum allowed horizon, in calendar days past the last observation
    pub max_horizon_days: i64,
    /// Number of trailing cutoffs evaluated for the accuracy block;
    /// 0 disables backtesting entirely
    pub backtest_window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_observations: 20,
            max_horizon_days: 365,
            backtest_window: 60,
        }
    }
}

/// A validated forecast request: which ticker, and for which future date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    ticker: String,
    target_date: NaiveDate,
}

impl ForecastRequest {
    /// Build a request. The ticker is uppercase-normalized and must be
    /// non-empty; the target date is validated against the series when
    /// the forecast runs, since the horizon depends on the data.
    pub fn new(ticker: &str, target_date: NaiveDate) -> Result<Self> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "ticker must be non-empty".to_string(),
            ));
        }

        Ok(Self {
            ticker,
            target_date,
        })
    }

    /// Ticker symbol, uppercase-normalized
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Requested forecast date
    pub fn target_date(&self) -> NaiveDate {
        self.target_date
    }
}

/// The engine's output for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Last known closing price, copied from the input series
    pub current_price: f64,
    /// Echoed from the request
    pub target_date: NaiveDate,
    /// Median of the terminal price distribution
    pub median_prediction: f64,
    /// Confidence level (as a string key, e.g. "80") to (lower, upper)
    pub confidence_intervals: BTreeMap<String, (f64, f64)>,
    /// Probability that the terminal price lies within ±5% of the
    /// median, as a percentage rounded to one decimal
    pub probability_within_5_percent: f64,
    /// Backtested accuracy of recent predictions at this horizon;
    /// omitted when the history is too short to evaluate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historical_accuracy: Option<BacktestReport>,
}

/// Wire-shaped wrapper: what an API layer would serialize verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    /// Ticker the forecast is for
    pub ticker: String,
    /// The forecast itself
    pub prediction: ForecastResult,
}

/// Stateless forecast engine.
///
/// A pure function of (series, request): no shared mutable state, no
/// I/O, no caching. Instances are cheap to clone and safe to share
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    config: EngineConfig,
}

impl ForecastEngine {
    /// Create an engine with validated configuration.
    pub fn new(config: EngineConfig) -> Result<Self> {
        if config.min_observations < 3 {
            return Err(ForecastError::InvalidParameter(
                "min_observations must be at least 3".to_string(),
            ));
        }
        if config.max_horizon_days < 1 {
            return Err(ForecastError::InvalidParameter(
                "max_horizon_days must be at least 1".to_string(),
            ));
        }

        Ok(Self { config })
    }

    /// The engine's configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Produce a forecast for `request` from `series`.
    ///
    /// Validation order follows the request contract: the horizon is
    /// checked before any statistics are computed.
    pub fn forecast(
        &self,
        series: &HistoricalSeries,
        request: &ForecastRequest,
    ) -> Result<ForecastResult> {
        if series.ticker() != request.ticker() {
            return Err(ForecastError::InvalidParameter(format!(
                "series is for '{}' but request is for '{}'",
                series.ticker(),
                request.ticker()
            )));
        }

        let last = *series.last();
        let horizon_days = (request.target_date() - last.date).num_days();

        debug!(
            ticker = request.ticker(),
            target_date = %request.target_date(),
            horizon_days,
            observations = series.len(),
            "forecast request"
        );

        if horizon_days <= 0 {
            return Err(ForecastError::InvalidHorizon(format!(
                "target date {} is not after the last observation {}",
                request.target_date(),
                last.date
            )));
        }
        if horizon_days > self.config.max_horizon_days {
            return Err(ForecastError::InvalidHorizon(format!(
                "horizon of {} days exceeds the {}-day maximum",
                horizon_days, self.config.max_horizon_days
            )));
        }

        let stats = estimate_returns(series, self.config.min_observations)?;
        debug!(
            mu_daily = stats.mu_daily,
            sigma_daily = stats.sigma_daily,
            n_returns = stats.n_returns,
            "estimated daily return statistics"
        );

        let projection = HorizonProjection::project(&stats, horizon_days, last.close)?;
        let median_prediction = projection.median();

        let mut confidence_intervals = BTreeMap::new();
        for level in CONFIDENCE_LEVELS {
            let bounds = projection.confidence_interval(f64::from(level))?;
            confidence_intervals.insert(level.to_string(), bounds);
        }

        let probability_within_5_percent =
            round1(projection.probability_within(PROBABILITY_BAND)?);

        let historical_accuracy = self.backtest_accuracy(series, horizon_days);

        debug!(
            median_prediction,
            probability_within_5_percent, "assembled forecast result"
        );

        Ok(ForecastResult {
            current_price: last.close,
            target_date: request.target_date(),
            median_prediction,
            confidence_intervals,
            probability_within_5_percent,
            historical_accuracy,
        })
    }

    /// Produce the wire-shaped response an API layer would return.
    pub fn forecast_response(
        &self,
        series: &HistoricalSeries,
        request: &ForecastRequest,
    ) -> Result<ForecastResponse> {
        Ok(ForecastResponse {
            ticker: request.ticker().to_string(),
            prediction: self.forecast(series, request)?,
        })
    }

    /// Accuracy is advisory: when the history cannot support even one
    /// walk-forward evaluation the block is omitted rather than failing
    /// the forecast.
    fn backtest_accuracy(
        &self,
        series: &HistoricalSeries,
        horizon_days: i64,
    ) -> Option<BacktestReport> {
        if self.config.backtest_window == 0 {
            return None;
        }

        let backtester = PredictionBacktester::new(self.config.min_observations);
        backtester
            .evaluate(series, horizon_days as usize, self.config.backtest_window)
            .ok()
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
