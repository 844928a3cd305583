//! # Price Forecast
//!
//! A Rust library for probabilistic stock price forecasting from
//! historical daily closing prices.
//!
//! ## Features
//!
//! - Daily log-return estimation (mean and unbiased standard deviation)
//! - Horizon projection under geometric Brownian motion
//! - Median forecast, 80%/95% confidence intervals and a
//!   probability-within-±5% statement
//! - Walk-forward backtesting of prediction accuracy
//! - Monte Carlo sampling of the terminal distribution as a cross-check
//!
//! ## Model
//!
//! Log-prices are modeled as a normal random walk with drift: daily
//! statistics scale to a `T`-day horizon as `mu_t = mu_daily * T` and
//! `sigma_t = sigma_daily * sqrt(T)`, making the terminal price
//! lognormal. The reported point estimate is the distribution's median.
//! Horizons are measured in calendar days; no trading-day or
//! annualization adjustment is applied.
//!
//! ## Quick Start
//!
//! ```
//! use chrono::Days;
//! use market_data::utils::generate_linear_series;
//! use price_forecast::{ForecastEngine, ForecastRequest};
//!
//! // 30 daily closes rising steadily from 100 to 130
//! let series = generate_linear_series("ACME", 30, 100.0, 130.0);
//!
//! let target = series.last().date.checked_add_days(Days::new(10)).unwrap();
//! let request = ForecastRequest::new("ACME", target).unwrap();
//!
//! let engine = ForecastEngine::default();
//! let result = engine.forecast(&series, &request).unwrap();
//!
//! // Positive drift extrapolates above the last close
//! assert!(result.median_prediction > 130.0);
//! ```

pub mod backtest;
pub mod engine;
pub mod error;
pub mod projection;
pub mod returns;
pub mod simulate;

// Re-export commonly used types
pub use crate::backtest::{BacktestReport, PredictionBacktester};
pub use crate::engine::{
    EngineConfig, ForecastEngine, ForecastRequest, ForecastResponse, ForecastResult,
    CONFIDENCE_LEVELS,
};
pub use crate::error::{ForecastError, Result};
pub use crate::projection::HorizonProjection;
pub use crate::returns::{estimate_returns, ReturnStatistics};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
