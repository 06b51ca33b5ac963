//! Seasonality: modal prices pooled by calendar month across all years.

use chrono::Datelike;

use crate::analytics::stats::{mean, month_name, round2};
use crate::config;
use crate::models::{PriceRecord, SeasonalInsights, SeasonalPatterns, SeasonalStat};

/// Per-month statistics for the months that have data, January first.
pub fn monthly_stats(records: &[PriceRecord]) -> Vec<SeasonalStat> {
    let mut buckets: [Vec<f64>; 12] = Default::default();
    for record in records {
        buckets[record.date.month0() as usize].push(record.modal_price);
    }

    buckets
        .iter()
        .enumerate()
        .filter_map(|(index, prices)| {
            let average = mean(prices)?;
            let min_price = prices.iter().copied().fold(f64::INFINITY, f64::min);
            let max_price = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let month = index as u32 + 1;
            Some(SeasonalStat {
                month,
                month_name: month_name(month),
                average_price: round2(average),
                min_price,
                max_price,
                price_range: round2(max_price - min_price),
                data_points: prices.len(),
            })
        })
        .collect()
}

/// Seasonal statistics plus cheapest/most expensive and most/least volatile
/// months. `None` when there are no records.
///
/// Months are ranked by average price with a stable sort, so equal averages
/// keep calendar order. The volatility scan keeps the first month on ties.
pub fn seasonal_patterns(records: &[PriceRecord]) -> Option<SeasonalPatterns> {
    let seasonal_patterns = monthly_stats(records);
    let first = seasonal_patterns.first()?.clone();

    let mut ranked = seasonal_patterns.clone();
    ranked.sort_by(|a, b| a.average_price.total_cmp(&b.average_price));

    let n = config::SEASONAL_RANK_N;
    let cheapest_months: Vec<SeasonalStat> = ranked.iter().take(n).cloned().collect();
    let expensive_months: Vec<SeasonalStat> = ranked.iter().rev().take(n).cloned().collect();

    let mut most_volatile_month = first.clone();
    let mut most_stable_month = first;
    for stat in &seasonal_patterns {
        if stat.price_range > most_volatile_month.price_range {
            most_volatile_month = stat.clone();
        }
        if stat.price_range < most_stable_month.price_range {
            most_stable_month = stat.clone();
        }
    }

    Some(SeasonalPatterns {
        seasonal_patterns,
        insights: SeasonalInsights {
            cheapest_months,
            expensive_months,
            most_volatile_month,
            most_stable_month,
        },
    })
}
