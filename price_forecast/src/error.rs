//! Error types for the price_forecast crate

use thiserror::Error;

/// Custom error types for the price_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Historical data is malformed (non-positive price, unordered dates,
    /// empty series)
    #[error("invalid series: {0}")]
    InvalidSeries(String),

    /// Series present but too short to estimate return statistics
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Target date not strictly after the last observation, or beyond the
    /// maximum allowed horizon
    #[error("invalid horizon: {0}")]
    InvalidHorizon(String),

    /// Invalid engine, request or backtest parameter
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<market_data::SeriesError> for ForecastError {
    fn from(err: market_data::SeriesError) -> Self {
        ForecastError::InvalidSeries(err.to_string())
    }
}
