use std::collections::BTreeMap;

use serde::Serialize;

use super::record::{Commodity, DateRange};

// ---------------------------------------------------------------------------
// MonthlyAverage: Per-month, per-grade averages with month-over-month deltas
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAverage {
    /// Calendar month key, `YYYY-MM`.
    pub month: String,
    pub year: i32,
    pub month_name: String,
    pub grades: BTreeMap<String, GradeAverage>,
    /// Change versus the previous month in the sequence, per grade present in both.
    pub changes: BTreeMap<String, PriceChange>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeAverage {
    pub average_modal_price: f64,
    pub average_min_price: f64,
    pub average_max_price: f64,
    pub data_points: usize,
    pub price_range: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChange {
    pub absolute_change: f64,
    pub percent_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub commodity: Commodity,
    pub date_range: DateRange,
    pub total_months: usize,
    pub total_data_points: usize,
    pub monthly_averages: Vec<MonthlyAverage>,
}

// ---------------------------------------------------------------------------
// Year-over-year
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearMonthAverage {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub average_price: f64,
    pub data_points: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YoyComparison {
    pub previous_year: i32,
    pub current_year: i32,
    pub previous_price: f64,
    pub current_price: f64,
    pub absolute_change: f64,
    /// `None` when the previous year's average is zero.
    pub percent_change: Option<f64>,
    pub month_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthComparisons {
    pub month: u32,
    pub month_name: String,
    pub comparisons: Vec<YoyComparison>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YoyInsights {
    pub largest_increases: Vec<YoyComparison>,
    pub largest_decreases: Vec<YoyComparison>,
    pub largest_percent_increases: Vec<YoyComparison>,
    pub largest_percent_decreases: Vec<YoyComparison>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearOverYear {
    pub monthly_averages: Vec<YearMonthAverage>,
    pub yoy_comparisons: Vec<MonthComparisons>,
    pub insights: YoyInsights,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearOverYearReport {
    pub commodity: Commodity,
    /// Actual first and last dates present in the analysed data.
    pub date_range: DateRange,
    pub total_data_points: usize,
    #[serde(flatten)]
    pub analysis: YearOverYear,
}

// ---------------------------------------------------------------------------
// Period-to-period
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Increase,
    Decrease,
    Stable,
}

impl ChangeType {
    pub fn of(change: f64) -> Self {
        if change > 0.0 {
            ChangeType::Increase
        } else if change < 0.0 {
            ChangeType::Decrease
        } else {
            ChangeType::Stable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodAverage {
    pub month: String,
    pub average_price: f64,
    pub data_points: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodChange {
    pub current_period: String,
    pub previous_period: String,
    pub current_price: f64,
    pub previous_price: f64,
    pub absolute_change: f64,
    pub percent_change: Option<f64>,
    pub change_type: ChangeType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodInsights {
    pub largest_increases: Vec<PeriodChange>,
    pub largest_decreases: Vec<PeriodChange>,
    pub average_monthly_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodAnalysis {
    pub period_changes: Vec<PeriodChange>,
    pub insights: PeriodInsights,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub commodity: Commodity,
    pub date_range: DateRange,
    #[serde(flatten)]
    pub analysis: PeriodAnalysis,
}
