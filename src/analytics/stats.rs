//! Small numeric helpers shared by the analyzers.
//!
//! Every division goes through a guard here so degenerate inputs produce
//! `None` (or an explicit zero) instead of NaN or infinity.

use chrono::Month;

/// Round to two decimals, half away from zero, on `value * 100`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by N), `None` for an empty slice.
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// `(current - previous) / previous * 100`, `None` when `previous` is zero.
pub fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

/// English month name for a 1-based month number.
pub fn month_name(month: u32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_default()
}


/// Modal prices of a record slice, in order.
pub fn modal_prices(records: &[crate::models::PriceRecord]) -> Vec<f64> {
    records.iter().map(|r| r.modal_price).collect()
}

/// Keep the first `n` items of a list after a stable sort by `key`,
/// descending when `descending` is set.
pub fn top_n_by<T, F>(mut items: Vec<T>, n: usize, descending: bool, key: F) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| {
        let ord = key(a).total_cmp(&key(b));
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
    items.truncate(n);
    items
}
