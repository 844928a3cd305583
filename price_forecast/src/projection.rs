//! Horizon projection under geometric Brownian motion
//!
//! Daily statistics scale to the horizon as `mu_t = mu_daily * T` and
//! `sigma_t = sigma_daily * sqrt(T)`. The log-price at the horizon is
//! then Normal(ln(P0) + mu_t, sigma_t^2), so the price itself is
//! lognormal.

use crate::error::{ForecastError, Result};
use crate::returns::ReturnStatistics;
use statrs::distribution::{ContinuousCDF, Normal};

/// The terminal price distribution for one forecast horizon
#[derive(Debug, Clone, Copy)]
pub struct HorizonProjection {
    current_price: f64,
    mu_t: f64,
    sigma_t: f64,
}

impl HorizonProjection {
    /// Scale daily return statistics to a horizon of `horizon_days`
    /// calendar days from a starting price of `current_price`.
    ///
    /// A non-positive horizon is a request-validation failure and is
    /// rejected before any statistics are computed; the check here is a
    /// re-check of that contract.
    pub fn project(
        stats: &ReturnStatistics,
        horizon_days: i64,
        current_price: f64,
    ) -> Result<Self> {
        if horizon_days <= 0 {
            return Err(ForecastError::InvalidHorizon(format!(
                "horizon must be at least one day, got {}",
                horizon_days
            )));
        }
        if !(current_price > 0.0) || !current_price.is_finite() {
            return Err(ForecastError::InvalidSeries(format!(
                "non-positive current price {}",
                current_price
            )));
        }

        let t = horizon_days as f64;
        Ok(Self {
            current_price,
            mu_t: stats.mu_daily * t,
            sigma_t: stats.sigma_daily * t.sqrt(),
        })
    }

    /// Price the series started from
    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    /// Drift over the horizon, in log-price units
    pub fn mu_t(&self) -> f64 {
        self.mu_t
    }

    /// Standard deviation of the terminal log-price
    pub fn sigma_t(&self) -> f64 {
        self.sigma_t
    }

    /// Median of the terminal price distribution.
    ///
    /// The lognormal median, `exp(ln(P0) + mu_t)`, not the mean (which
    /// sits higher, at `exp(ln(P0) + mu_t + sigma_t^2 / 2)`).
    pub fn median(&self) -> f64 {
        self.current_price * self.mu_t.exp()
    }

    /// Two-sided confidence bounds for `level` percent (e.g. 80.0, 95.0).
    ///
    /// With zero historical variance every quantile collapses to the
    /// median, so both bounds equal it.
    pub fn confidence_interval(&self, level: f64) -> Result<(f64, f64)> {
        if !(level > 0.0 && level < 100.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "confidence level must be in (0, 100), got {}",
                level
            )));
        }

        let median = self.median();
        if self.sigma_t == 0.0 {
            return Ok((median, median));
        }

        let z = standard_normal().inverse_cdf(1.0 - (1.0 - level / 100.0) / 2.0);

        Ok((
            median * (-z * self.sigma_t).exp(),
            median * (z * self.sigma_t).exp(),
        ))
    }

    /// Probability, as a percentage, that the terminal price lies within
    /// ±`band_fraction` of the median (e.g. 0.05 for ±5%).
    ///
    /// The median corresponds exactly to the mean in log-space, so this
    /// reduces to `Phi(ln(1 + b) / sigma_t) - Phi(ln(1 - b) / sigma_t)`.
    pub fn probability_within(&self, band_fraction: f64) -> Result<f64> {
        if !(band_fraction > 0.0 && band_fraction < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "band fraction must be in (0, 1), got {}",
                band_fraction
            )));
        }

        if self.sigma_t == 0.0 {
            return Ok(100.0);
        }

        let normal = standard_normal();
        let upper_z = (1.0 + band_fraction).ln() / self.sigma_t;
        let lower_z = (1.0 - band_fraction).ln() / self.sigma_t;

        Ok((normal.cdf(upper_z) - normal.cdf(lower_z)) * 100.0)
    }
}

// Constant parameters, construction cannot fail
fn standard_normal() -> Normal {
    Normal::new(0.0, 1.0).unwrap()
}
