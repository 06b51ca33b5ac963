//! Per-commodity market analytics and the faq/non-faq grade premium.

use std::collections::BTreeMap;

use crate::analytics::stats::{mean, modal_prices, population_std_dev, round2};
use crate::analytics::trend;
use crate::config;
use crate::models::{
    Commodity, CommodityAnalytics, GradePremium, GradeSummary, PriceDistribution, PriceRecord,
};

/// Volatility, distribution, per-grade averages and trend for one commodity's
/// date-ordered records. `None` for an empty set.
pub fn commodity_analytics(
    commodity: Commodity,
    records: &[PriceRecord],
) -> Option<CommodityAnalytics> {
    let prices = modal_prices(records);
    let average = mean(&prices)?;
    let volatility = population_std_dev(&prices)?;
    let recent_volatility = trend::recent_volatility(records)?;

    let highest = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lowest = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let (trend_direction, trend_strength, predictions) = trend::estimate(records);

    Some(CommodityAnalytics {
        commodity,
        volatility: round2(volatility),
        recent_volatility: round2(recent_volatility),
        average_price: round2(average),
        grade_analysis: grade_analysis(records),
        price_distribution: distribution(&prices, average, volatility),
        total_data_points: records.len(),
        price_range: round2(highest - lowest),
        trend_direction,
        trend_strength,
        predictions,
    })
}

fn grade_analysis(records: &[PriceRecord]) -> BTreeMap<String, GradeSummary> {
    let mut by_grade: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in records {
        by_grade
            .entry(record.grade.as_str())
            .or_default()
            .push(record.modal_price);
    }

    by_grade
        .into_iter()
        .filter_map(|(grade, prices)| {
            let average = mean(&prices)?;
            Some((
                grade.to_string(),
                GradeSummary {
                    average_price: round2(average),
                    data_points: prices.len(),
                },
            ))
        })
        .collect()
}

/// Bucket prices around the mean (±1σ) and the quartiles `sorted[⌊n/4⌋]` and
/// `sorted[⌊3n/4⌋]`.
///
/// The bands are not a partition: a price between the σ bound and the
/// quartile can land in no band, and "Very Low" can overlap "Average" when the
/// series is skewed.
pub fn distribution(prices: &[f64], average: f64, volatility: f64) -> PriceDistribution {
    let mut sorted = prices.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    let (Some(&q1), Some(&q3)) = (
        sorted.get((n as f64 * 0.25).floor() as usize),
        sorted.get((n as f64 * 0.75).floor() as usize),
    ) else {
        return PriceDistribution::default();
    };

    let (lower, upper) = (average - volatility, average + volatility);
    let count = |keep: &dyn Fn(f64) -> bool| prices.iter().filter(|&&p| keep(p)).count();

    PriceDistribution {
        very_low: count(&|p| p < lower),
        low: count(&|p| p >= lower && p < q1),
        average: count(&|p| p >= q1 && p <= q3),
        high: count(&|p| p > q3 && p <= upper),
        very_high: count(&|p| p > upper),
    }
}

/// Premium of the `faq` grade over `non-faq`, from the rounded grade averages.
///
/// `None` when either grade is missing or the `non-faq` average is zero.
pub fn grade_premium(analytics: &CommodityAnalytics) -> Option<GradePremium> {
    let faq = analytics.grade_analysis.get(config::PREMIUM_GRADE)?;
    let non_faq = analytics.grade_analysis.get(config::BASELINE_GRADE)?;
    if non_faq.average_price == 0.0 {
        return None;
    }

    let premium = faq.average_price - non_faq.average_price;
    Some(GradePremium {
        absolute_premium: round2(premium),
        percent_premium: round2(premium / non_faq.average_price * 100.0),
        faq_price: faq.average_price,
        non_faq_price: non_faq.average_price,
    })
}
