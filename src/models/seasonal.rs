use serde::Serialize;

use super::record::{Commodity, DateRange};

// ---------------------------------------------------------------------------
// SeasonalStat: One calendar month pooled across years
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalStat {
    /// Calendar month, 1-12.
    pub month: u32,
    pub month_name: String,
    pub average_price: f64,
    /// Lowest modal price observed in the month (unrounded).
    pub min_price: f64,
    /// Highest modal price observed in the month (unrounded).
    pub max_price: f64,
    pub price_range: f64,
    pub data_points: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalInsights {
    pub cheapest_months: Vec<SeasonalStat>,
    pub expensive_months: Vec<SeasonalStat>,
    pub most_volatile_month: SeasonalStat,
    pub most_stable_month: SeasonalStat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalPatterns {
    pub seasonal_patterns: Vec<SeasonalStat>,
    pub insights: SeasonalInsights,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalReport {
    pub commodity: Commodity,
    pub date_range: DateRange,
    pub total_data_points: usize,
    #[serde(flatten)]
    pub patterns: SeasonalPatterns,
}
