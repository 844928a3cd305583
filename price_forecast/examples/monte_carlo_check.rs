use market_data::utils::generate_test_series;
use price_forecast::projection::HorizonProjection;
use price_forecast::returns::estimate_returns;
use price_forecast::simulate::{empirical_quantile, sample_terminal_prices};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Price Forecast: Monte Carlo Cross-Check");
    println!("=======================================\n");

    let series = generate_test_series("ACME", 250, 100.0, 0.0005, 0.02, 7);
    let stats = estimate_returns(&series, 20)?;
    println!(
        "Estimated from {} returns: mu_daily = {:.6}, sigma_daily = {:.6}\n",
        stats.n_returns, stats.mu_daily, stats.sigma_daily
    );

    let projection = HorizonProjection::project(&stats, 21, series.last().close)?;
    let samples = sample_terminal_prices(&projection, 100_000, 99)?;

    println!("21-day terminal distribution, closed form vs 100k samples:");
    println!("  median: {:.2} vs {:.2}", projection.median(), empirical_quantile(&samples, 0.5)?);

    for level in [80.0, 95.0] {
        let (lower, upper) = projection.confidence_interval(level)?;
        let tail = (1.0 - level / 100.0) / 2.0;
        println!(
            "  {}%: ({:.2}, {:.2}) vs ({:.2}, {:.2})",
            level,
            lower,
            upper,
            empirical_quantile(&samples, tail)?,
            empirical_quantile(&samples, 1.0 - tail)?
        );
    }

    let within = samples
        .iter()
        .filter(|&&p| p >= 0.95 * projection.median() && p <= 1.05 * projection.median())
        .count() as f64
        / samples.len() as f64
        * 100.0;
    println!(
        "  P(within ±5%): {:.1}% vs {:.1}% empirical",
        projection.probability_within(0.05)?,
        within
    );

    Ok(())
}
