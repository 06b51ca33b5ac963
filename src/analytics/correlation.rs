//! Cross-commodity price correlation over shared dates.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::analytics::stats::round2;
use crate::models::{Correlation, CorrelationDirection, CorrelationStrength, PriceRecord};

/// Pearson correlation via the sum formula.
///
/// `None` when the slices differ in length, hold fewer than two points, or
/// either series is constant (zero variance).
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let n = x.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx, mut sum_yy) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for (&a, &b) in x.iter().zip(y) {
        sum_x += a;
        sum_y += b;
        sum_xy += a * b;
        sum_xx += a * a;
        sum_yy += b * b;
    }

    let variance_base = (n * sum_xx - sum_x * sum_x) * (n * sum_yy - sum_y * sum_y);
    if variance_base <= 0.0 {
        return None;
    }
    let r = (n * sum_xy - sum_x * sum_y) / variance_base.sqrt();
    Some(r.clamp(-1.0, 1.0))
}

/// Modal price by date. A later record on the same date replaces an earlier one.
fn prices_by_date(records: &[PriceRecord]) -> BTreeMap<NaiveDate, f64> {
    records.iter().map(|r| (r.date, r.modal_price)).collect()
}

/// Correlate two commodity series on the dates they share.
///
/// `None` with fewer than two common dates or a constant series.
pub fn cross_correlation(first: &[PriceRecord], second: &[PriceRecord]) -> Option<Correlation> {
    let first_by_date = prices_by_date(first);
    let second_by_date = prices_by_date(second);

    let (xs, ys): (Vec<f64>, Vec<f64>) = first_by_date
        .iter()
        .filter_map(|(date, &a)| second_by_date.get(date).map(|&b| (a, b)))
        .unzip();
    if xs.len() < 2 {
        return None;
    }

    let r = pearson(&xs, &ys)?;
    Some(Correlation {
        coefficient: round2(r),
        strength: strength(r),
        direction: if r > 0.0 {
            CorrelationDirection::Positive
        } else {
            CorrelationDirection::Negative
        },
        data_points: xs.len(),
        interpretation: interpretation(r).to_string(),
    })
}

fn strength(r: f64) -> CorrelationStrength {
    if r.abs() > 0.7 {
        CorrelationStrength::Strong
    } else if r.abs() > 0.3 {
        CorrelationStrength::Moderate
    } else {
        CorrelationStrength::Weak
    }
}

fn interpretation(r: f64) -> &'static str {
    if r > 0.5 {
        "Onion and potato prices tend to move strongly in the same direction"
    } else if r > 0.3 {
        "Onion and potato prices show moderate positive correlation"
    } else if r > -0.3 {
        "Onion and potato prices show weak correlation"
    } else {
        "Onion and potato prices tend to move in opposite directions"
    }
}
