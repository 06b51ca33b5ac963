use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::record::{Commodity, DateRange, PriceRecord, PriceType};

// ---------------------------------------------------------------------------
// All-time extrema
// ---------------------------------------------------------------------------

/// Extreme across the modal, min and max series, tagged with its source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedExtreme {
    pub price: f64,
    pub price_type: PriceType,
    pub date: NaiveDate,
    pub record: PriceRecord,
}

/// Extreme of the modal series only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalExtreme {
    pub price: f64,
    pub date: NaiveDate,
    pub record: PriceRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllTimeRecords {
    pub highest_overall: TaggedExtreme,
    pub lowest_overall: TaggedExtreme,
    pub highest_modal: ModalExtreme,
    pub lowest_modal: ModalExtreme,
}

// ---------------------------------------------------------------------------
// Step changes
// ---------------------------------------------------------------------------

/// Modal price change between two consecutive records of a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyChange {
    pub date: NaiveDate,
    pub previous_date: NaiveDate,
    pub current_price: f64,
    pub previous_price: f64,
    pub absolute_change: f64,
    /// `None` when the previous price is zero.
    pub percent_change: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyChanges {
    pub largest_increases: Vec<DailyChange>,
    pub largest_decreases: Vec<DailyChange>,
    pub largest_percent_increases: Vec<DailyChange>,
    pub largest_percent_decreases: Vec<DailyChange>,
}

// ---------------------------------------------------------------------------
// Sustained runs
// ---------------------------------------------------------------------------

/// A run of at least three consecutive records beyond the streak threshold.
///
/// `extreme_price`/`extreme_date` hold the peak for a high run and the
/// trough for a low run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_price: f64,
    pub end_price: f64,
    pub extreme_price: f64,
    pub extreme_date: NaiveDate,
    pub duration: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SustainedPeriods {
    pub high_periods: Vec<Streak>,
    pub low_periods: Vec<Streak>,
}

// ---------------------------------------------------------------------------
// Summary statistics and per-grade report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordStatistics {
    pub average_price: f64,
    pub total_data_points: usize,
    pub price_range: f64,
    pub volatility: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRecords {
    pub all_time_records: AllTimeRecords,
    pub daily_changes: DailyChanges,
    pub sustained_periods: SustainedPeriods,
    pub statistics: RecordStatistics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsReport {
    pub commodity: Commodity,
    pub date_range: DateRange,
    pub total_data_points: usize,
    pub records: BTreeMap<String, GradeRecords>,
}
