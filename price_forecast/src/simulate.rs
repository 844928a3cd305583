//! Monte Carlo sampling of terminal prices
//!
//! The closed-form quantiles in [`crate::projection`] are authoritative;
//! this sampler exists as an independent cross-check and for callers who
//! want an empirical view of the terminal distribution.

use crate::error::{ForecastError, Result};
use crate::projection::HorizonProjection;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Draw `n` terminal prices from the projected lognormal distribution.
///
/// Seeded, so callers get reproducible samples.
pub fn sample_terminal_prices(
    projection: &HorizonProjection,
    n: usize,
    seed: u64,
) -> Result<Vec<f64>> {
    if n == 0 {
        return Err(ForecastError::InvalidParameter(
            "sample count must be positive".to_string(),
        ));
    }

    let median = projection.median();
    let sigma_t = projection.sigma_t();
    if sigma_t == 0.0 {
        return Ok(vec![median; n]);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let shock = Normal::new(0.0, 1.0).unwrap();
    let log_median = median.ln();

    Ok((0..n)
        .map(|_| (log_median + sigma_t * shock.sample(&mut rng)).exp())
        .collect())
}

/// Nearest-rank empirical quantile of a sample, `q` in (0, 1).
pub fn empirical_quantile(samples: &[f64], q: f64) -> Result<f64> {
    if samples.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "cannot take a quantile of an empty sample".to_string(),
        ));
    }
    if !(q > 0.0 && q < 1.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "quantile must be in (0, 1), got {}",
            q
        )));
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let idx = ((sorted.len() - 1) as f64 * q).round() as usize;
    Ok(sorted[idx])
}
