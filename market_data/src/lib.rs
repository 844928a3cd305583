//! # Market Data
//!
//! `market_data` holds the domain types for historical closing-price
//! series: a validated, chronologically ordered sequence of daily closes
//! for one ticker, plus the provider seam that retrieval layers implement
//! and helpers for loading series from CSV files.
//!
//! ## Usage Example
//!
//! ```
//! use chrono::NaiveDate;
//! use market_data::{DailyClose, HistoricalSeries};
//!
//! let points = vec![
//!     DailyClose { date: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(), close: 100.0 },
//!     DailyClose { date: NaiveDate::from_ymd_opt(2023, 1, 3).unwrap(), close: 101.5 },
//! ];
//!
//! let series = HistoricalSeries::new("aapl", points).unwrap();
//! assert_eq!(series.ticker(), "AAPL");
//! assert_eq!(series.last().close, 101.5);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod loader;
pub mod utils;

pub use loader::{load_csv_series, CsvPriceHistory};

/// Errors that can occur while building or loading a price series
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("series is empty")]
    Empty,

    #[error("non-positive close {price} at {date}")]
    NonPositivePrice { date: NaiveDate, price: f64 },

    #[error("date {date} is not strictly after its predecessor")]
    OutOfOrder { date: NaiveDate },

    #[error("no history available for ticker '{0}'")]
    UnknownTicker(String),

    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One daily observation: the closing price for a calendar date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyClose {
    /// Date of the observation
    pub date: NaiveDate,
    /// Closing price
    pub close: f64,
}

/// A validated historical closing-price series for one ticker.
///
/// Construction enforces the series invariants: at least one point,
/// strictly ascending dates (which also rules out duplicates) and
/// strictly positive closes. Once built, the series is read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    ticker: String,
    points: Vec<DailyClose>,
}

impl HistoricalSeries {
    /// Build a series from raw points, validating the ordering and price
    /// invariants. The ticker is uppercase-normalized.
    pub fn new(ticker: &str, points: Vec<DailyClose>) -> Result<Self, SeriesError> {
        if points.is_empty() {
            return Err(SeriesError::Empty);
        }

        for point in &points {
            if !(point.close > 0.0) || !point.close.is_finite() {
                return Err(SeriesError::NonPositivePrice {
                    date: point.date,
                    price: point.close,
                });
            }
        }

        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(SeriesError::OutOfOrder { date: pair[1].date });
            }
        }

        Ok(Self {
            ticker: ticker.trim().to_uppercase(),
            points,
        })
    }

    /// Ticker symbol, uppercase-normalized
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// All observations, oldest first
    pub fn points(&self) -> &[DailyClose] {
        &self.points
    }

    /// Closing prices, oldest first
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series holds no observations (never true for a
    /// constructed series; kept for the conventional pairing with `len`)
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Oldest observation
    pub fn first(&self) -> &DailyClose {
        &self.points[0]
    }

    /// Most recent observation
    pub fn last(&self) -> &DailyClose {
        &self.points[self.points.len() - 1]
    }

    /// A copy of this series keeping only the first `len` observations.
    /// Used for walk-forward evaluation, where forecasts may only see
    /// data up to a cutoff.
    pub fn truncated(&self, len: usize) -> Result<Self, SeriesError> {
        if len == 0 {
            return Err(SeriesError::Empty);
        }
        let len = len.min(self.points.len());
        Ok(Self {
            ticker: self.ticker.clone(),
            points: self.points[..len].to_vec(),
        })
    }
}

/// The seam a market-data retrieval layer implements to hand historical
/// series to the forecast engine.
pub trait PriceHistoryProvider {
    /// Fetch the full available daily history for `ticker`.
    fn history(&self, ticker: &str) -> Result<HistoricalSeries, SeriesError>;
}
