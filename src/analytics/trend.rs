//! Linear trend estimation over the most recent window of a price series.

use crate::analytics::stats::{mean, modal_prices, population_std_dev, round2};
use crate::config;
use crate::models::{PriceRecord, Predictions, TrendDirection, TrendForecast, VolatilityRange};

/// Ordinary least squares on `(index, value)` with 0-based indices.
///
/// Returns `(slope, intercept)`, or `None` with fewer than two points (the
/// slope denominator `nΣx² − (Σx)²` is zero there).
pub fn linear_fit(values: &[f64]) -> Option<(f64, f64)> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return None;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    Some((slope, intercept))
}

/// Fit the last 90 modal prices and project 30 points ahead.
///
/// The projection evaluates the line at indices `n+1 ..= n+30`, where `n` is
/// the window size. With fewer than 10 records there is no forecast.
pub fn forecast(records: &[PriceRecord]) -> Option<TrendForecast> {
    let start = records.len().saturating_sub(config::TREND_WINDOW);
    let window = modal_prices(&records[start..]);
    if window.len() < config::TREND_MIN_POINTS {
        return None;
    }

    let (slope, intercept) = linear_fit(&window)?;
    let n = window.len();
    let next_30_days = (1..=config::FORECAST_HORIZON)
        .map(|i| round2(slope * (n + i) as f64 + intercept))
        .collect();

    Some(TrendForecast {
        slope,
        intercept,
        sample_size: n,
        next_30_days,
    })
}

/// Population standard deviation of the last 30 modal prices.
pub fn recent_volatility(records: &[PriceRecord]) -> Option<f64> {
    let start = records.len().saturating_sub(config::RECENT_VOLATILITY_WINDOW);
    population_std_dev(&modal_prices(&records[start..]))
}

/// Trend direction, strength and forecast with a `[avg − σ₃₀, avg + σ₃₀]`
/// band, where σ₃₀ is the recent volatility.
///
/// Returns `(InsufficientData, None, None)` when no forecast is possible.
pub fn estimate(
    records: &[PriceRecord],
) -> (TrendDirection, Option<f64>, Option<Predictions>) {
    let Some(forecast) = forecast(records) else {
        return (TrendDirection::InsufficientData, None, None);
    };
    let (Some(average), Some(recent)) = (mean(&modal_prices(records)), recent_volatility(records))
    else {
        return (TrendDirection::InsufficientData, None, None);
    };

    let direction = TrendDirection::from_slope(forecast.slope);
    let strength = forecast.slope.abs();
    let volatility_range = VolatilityRange {
        lower: round2(average - recent),
        upper: round2(average + recent),
    };

    (
        direction,
        Some(strength),
        Some(Predictions {
            forecast,
            volatility_range,
        }),
    )
}
