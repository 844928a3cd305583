use chrono::Days;
use market_data::utils::generate_test_series;
use price_forecast::{ForecastEngine, ForecastRequest};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("Price Forecast: Basic Forecasting Example");
    println!("=========================================\n");

    // Six months of synthetic daily closes with mild upward drift
    println!("Generating sample history...");
    let series = generate_test_series("ACME", 180, 100.0, 0.0008, 0.015, 42);
    println!(
        "Sample history: {} daily closes from {} to {}, last close {:.2}\n",
        series.len(),
        series.first().date,
        series.last().date,
        series.last().close
    );

    // Forecast 30 days past the last observation
    let target = series
        .last()
        .date
        .checked_add_days(Days::new(30))
        .ok_or("target date out of range")?;
    let request = ForecastRequest::new("ACME", target)?;

    let engine = ForecastEngine::default();
    let response = engine.forecast_response(&series, &request)?;
    let prediction = &response.prediction;

    println!("Forecast for {} on {}:", response.ticker, target);
    println!("  Current price:     {:.2}", prediction.current_price);
    println!("  Median prediction: {:.2}", prediction.median_prediction);
    for (level, (lower, upper)) in &prediction.confidence_intervals {
        println!("  {}% interval:      ({:.2}, {:.2})", level, lower, upper);
    }
    println!(
        "  P(within ±5% of median): {:.1}%",
        prediction.probability_within_5_percent
    );
    if let Some(accuracy) = &prediction.historical_accuracy {
        println!(
            "  Backtested accuracy: MAPE {:.2}%, RMSE {:.2}, direction {:.2}% ({} predictions)",
            accuracy.mape, accuracy.rmse, accuracy.directional_accuracy, accuracy.n_predictions
        );
    }

    println!("\nWire-shaped JSON:");
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
