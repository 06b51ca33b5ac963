//! Shared test fixtures for the price SDK integration tests.
//!
//! Provides record constructors for the analyzer tests and
//! `setup_sample_sdk()`, which writes a small two-year data file to a temp
//! directory and loads it through the real loader.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use chrono::{Duration, NaiveDate};
use commodity_prices_sdk::{Commodity, PriceRecord, PriceSdk};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Reference date every fixture SDK is built with.
pub const TODAY: &str = "2024-12-31";

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn record(
    commodity: Commodity,
    day: &str,
    grade: &str,
    min_price: f64,
    max_price: f64,
    modal_price: f64,
) -> PriceRecord {
    PriceRecord {
        commodity,
        date: date(day),
        grade: grade.to_string(),
        min_price,
        max_price,
        modal_price,
        variety: String::new(),
    }
}

/// One record per consecutive day starting at `start`, with min/max 10 below
/// and above the modal price.
pub fn daily_series(commodity: Commodity, grade: &str, start: &str, modal: &[f64]) -> Vec<PriceRecord> {
    let first = date(start);
    modal
        .iter()
        .enumerate()
        .map(|(i, &price)| PriceRecord {
            commodity,
            date: first + Duration::days(i as i64),
            grade: grade.to_string(),
            min_price: price - 10.0,
            max_price: price + 10.0,
            modal_price: price,
            variety: String::new(),
        })
        .collect()
}

pub fn write_data_file(dir: &TempDir, name: &str, payload: &Value) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string(payload).unwrap()).unwrap();
    path
}

// ---------------------------------------------------------------------------
// Sample data set
// ---------------------------------------------------------------------------

/// Modal price of the onion `faq` sample series.
pub fn onion_faq_modal(year: i32, month: u32) -> f64 {
    1000.0 + 100.0 * month as f64 + 200.0 * (year - 2023) as f64
}

/// Modal price of the potato `faq` sample series (same in both years).
pub fn potato_faq_modal(month: u32) -> f64 {
    800.0 + 20.0 * month as f64
}

fn entry(commodity: &str, day: &str, grade: &str, modal: f64, variety: &str) -> Value {
    json!({
        "commodity": commodity,
        "date": day,
        "grade": grade,
        "minPrice": modal - 100.0,
        "maxPrice": modal + 100.0,
        "modalPrice": modal,
        "variety": variety
    })
}

/// Envelope with two observations a month (1st and 15th) for 2023 and 2024:
/// onion `faq` and `non-faq` (200 cheaper), potato `faq` only. Two malformed
/// entries are appended.
pub fn sample_payload() -> Value {
    let mut entries = Vec::new();
    for year in [2023, 2024] {
        for month in 1..=12u32 {
            for day in [1, 15] {
                let d = format!("{}-{:02}-{:02}", year, month, day);
                let onion = onion_faq_modal(year, month);
                entries.push(entry("onion", &d, "faq", onion, "Red"));
                entries.push(entry("onion", &d, "non-faq", onion - 200.0, "Red"));
                entries.push(entry("potato", &d, "faq", potato_faq_modal(month), "Jyoti"));
            }
        }
    }
    entries.push(entry("tomato", "2024-01-01", "faq", 500.0, ""));
    entries.push(entry("onion", "not-a-date", "faq", 500.0, ""));

    json!({
        "metadata": { "source": "fixture", "version": "1.0" },
        "priceData": entries
    })
}

/// SDK over the sample data set, loaded from a temp file.
///
/// Returns `(PriceSdk, TempDir)`; keep the `TempDir` alive for the test.
pub fn setup_sample_sdk() -> (PriceSdk, TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_data_file(&tmp_dir, "market-prices.json", &sample_payload());
    let sdk = PriceSdk::builder()
        .data_path(&path)
        .today(date(TODAY))
        .strict(true)
        .build()
        .unwrap();
    (sdk, tmp_dir)
}

/// SDK over in-memory records.
pub fn sdk_from_records(records: Vec<PriceRecord>) -> PriceSdk {
    PriceSdk::builder()
        .records(records)
        .today(date(TODAY))
        .build()
        .unwrap()
}
