//! CSV-backed price history loading
//!
//! Offline stand-in for a live market-data feed: one CSV file per ticker,
//! with a header row naming at least a date column and a close column.
//! Extra OHLCV columns are ignored.

use crate::{DailyClose, HistoricalSeries, PriceHistoryProvider, SeriesError};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Load a historical series for `ticker` from a single CSV file.
///
/// The date and close columns are detected by name, case-insensitively,
/// so both bare `date,close` files and full `date,open,high,low,close,volume`
/// exports load without configuration.
pub fn load_csv_series<P: AsRef<Path>>(
    path: P,
    ticker: &str,
) -> Result<HistoricalSeries, SeriesError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let date_idx = detect_column(&headers, &["date", "time", "timestamp"]).ok_or_else(|| {
        SeriesError::MalformedRecord {
            line: 1,
            reason: "no date column found in header".to_string(),
        }
    })?;
    let close_idx = detect_column(&headers, &["close", "price"]).ok_or_else(|| {
        SeriesError::MalformedRecord {
            line: 1,
            reason: "no close column found in header".to_string(),
        }
    })?;

    let mut points = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        // Header occupies line 1
        let line = i + 2;

        let date_field = record
            .get(date_idx)
            .ok_or_else(|| SeriesError::MalformedRecord {
                line,
                reason: "missing date field".to_string(),
            })?;
        let date = parse_date(date_field).ok_or_else(|| SeriesError::MalformedRecord {
            line,
            reason: format!("unparseable date '{}'", date_field),
        })?;

        let close_field = record
            .get(close_idx)
            .ok_or_else(|| SeriesError::MalformedRecord {
                line,
                reason: "missing close field".to_string(),
            })?;
        let close: f64 = close_field
            .trim()
            .parse()
            .map_err(|_| SeriesError::MalformedRecord {
                line,
                reason: format!("unparseable close '{}'", close_field),
            })?;

        points.push(DailyClose { date, close });
    }

    HistoricalSeries::new(ticker, points)
}

/// Find the first header whose lowercased name contains one of the
/// candidate substrings, in candidate order.
fn detect_column(headers: &csv::StringRecord, candidates: &[&str]) -> Option<usize> {
    for candidate in candidates {
        for (idx, name) in headers.iter().enumerate() {
            if name.to_lowercase().contains(candidate) {
                return Some(idx);
            }
        }
    }
    None
}

/// Parse an ISO date, tolerating a trailing time component such as
/// `2023-01-02 00:00:00` as produced by some exports.
fn parse_date(field: &str) -> Option<NaiveDate> {
    let field = field.trim();
    NaiveDate::parse_from_str(field, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            field
                .get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}

/// A [`PriceHistoryProvider`] backed by a directory of per-ticker CSV
/// files (`<DIR>/<TICKER>.csv`).
#[derive(Debug, Clone)]
pub struct CsvPriceHistory {
    dir: PathBuf,
}

impl CsvPriceHistory {
    /// Create a provider rooted at `dir`.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl PriceHistoryProvider for CsvPriceHistory {
    fn history(&self, ticker: &str) -> Result<HistoricalSeries, SeriesError> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(SeriesError::UnknownTicker(ticker));
        }

        let path = self.dir.join(format!("{}.csv", ticker));
        if !path.is_file() {
            return Err(SeriesError::UnknownTicker(ticker));
        }

        load_csv_series(path, &ticker)
    }
}
