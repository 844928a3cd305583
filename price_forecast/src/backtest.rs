//! Walk-forward evaluation of forecast accuracy
//!
//! Replays history: for each cutoff in the evaluation window, forecasts
//! `horizon` rows ahead using only the data visible up to the cutoff,
//! then compares the median prediction with the close that was actually
//! realized.

use crate::error::{ForecastError, Result};
use crate::projection::HorizonProjection;
use crate::returns::estimate_returns;
use market_data::HistoricalSeries;
use serde::{Deserialize, Serialize};

/// Accuracy metrics from a walk-forward evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Mean absolute percentage error of the median predictions
    pub mape: f64,
    /// Root mean squared error, in price units
    pub rmse: f64,
    /// Share of predictions that called the direction of the move
    /// correctly, as a percentage
    pub directional_accuracy: f64,
    /// Number of predictions evaluated
    pub n_predictions: usize,
}

/// Walk-forward backtester for median price predictions
#[derive(Debug, Clone)]
pub struct PredictionBacktester {
    min_observations: usize,
}

impl PredictionBacktester {
    /// `min_observations` is the smallest prefix a forecast may be
    /// estimated from, matching the engine's return-estimation floor.
    pub fn new(min_observations: usize) -> Self {
        Self { min_observations }
    }

    /// Evaluate median-forecast accuracy over at most `window` of the
    /// most recent cutoffs, each forecasting `horizon` rows ahead.
    pub fn evaluate(
        &self,
        series: &HistoricalSeries,
        horizon: usize,
        window: usize,
    ) -> Result<BacktestReport> {
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "backtest horizon must be at least one row".to_string(),
            ));
        }
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "backtest window must be at least one cutoff".to_string(),
            ));
        }

        let n = series.len();
        let min_obs = self.min_observations.max(3);

        // Cutoff index = last visible row. The realized close sits
        // `horizon` rows later, and the visible prefix must be long
        // enough to estimate from.
        let required = min_obs + horizon;
        if n < required + 1 {
            return Err(ForecastError::InsufficientData {
                required: required + 1,
                actual: n,
            });
        }

        let last_cutoff = n - 1 - horizon;
        let first_cutoff = last_cutoff
            .saturating_sub(window - 1)
            .max(min_obs - 1);

        let points = series.points();
        let mut abs_pct_errors = Vec::new();
        let mut sq_errors = Vec::new();
        let mut direction_hits = 0usize;

        for cutoff in first_cutoff..=last_cutoff {
            let visible = series.truncated(cutoff + 1)?;
            let stats = estimate_returns(&visible, min_obs)?;

            let last_seen = visible.last();
            let target = &points[cutoff + horizon];
            let horizon_days = (target.date - last_seen.date).num_days();

            let projection = HorizonProjection::project(&stats, horizon_days, last_seen.close)?;
            let predicted = projection.median();
            let actual = target.close;

            abs_pct_errors.push(((predicted - actual) / actual).abs());
            sq_errors.push((predicted - actual).powi(2));

            let predicted_move = predicted - last_seen.close;
            let actual_move = actual - last_seen.close;
            if predicted_move.signum() == actual_move.signum() {
                direction_hits += 1;
            }
        }

        let count = abs_pct_errors.len();
        let mape = abs_pct_errors.iter().sum::<f64>() / count as f64 * 100.0;
        let rmse = (sq_errors.iter().sum::<f64>() / count as f64).sqrt();
        let directional_accuracy = direction_hits as f64 / count as f64 * 100.0;

        Ok(BacktestReport {
            mape: round2(mape),
            rmse: round2(rmse),
            directional_accuracy: round2(directional_accuracy),
            n_predictions: count,
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
