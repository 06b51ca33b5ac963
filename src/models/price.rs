use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::record::{Commodity, DateRange, PricePoint};

// ---------------------------------------------------------------------------
// LatestPrices: Per-grade snapshot at the most recent date
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestPrices {
    pub commodity: Commodity,
    pub latest_date: NaiveDate,
    pub data: BTreeMap<String, GradePrice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradePrice {
    pub min_price: f64,
    pub max_price: f64,
    pub modal_price: f64,
    pub variety: String,
}

// ---------------------------------------------------------------------------
// HistoricalTrends: Raw price points, flat or grouped by grade
// ---------------------------------------------------------------------------

/// Historical price series. A request naming a grade gets a flat list;
/// otherwise points are grouped by grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HistoricalTrends {
    #[serde(rename_all = "camelCase")]
    SingleGrade {
        commodity: Commodity,
        grade: String,
        date_range: DateRange,
        data_points: usize,
        trends: Vec<PricePoint>,
    },
    #[serde(rename_all = "camelCase")]
    ByGrade {
        commodity: Commodity,
        date_range: DateRange,
        total_data_points: usize,
        trends: BTreeMap<String, Vec<PricePoint>>,
    },
}

impl HistoricalTrends {
    pub fn total_points(&self) -> usize {
        match self {
            HistoricalTrends::SingleGrade { data_points, .. } => *data_points,
            HistoricalTrends::ByGrade {
                total_data_points, ..
            } => *total_data_points,
        }
    }
}
