use std::collections::BTreeMap;

use serde::Serialize;

use super::record::{Commodity, DateRange};

// ---------------------------------------------------------------------------
// Trend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
    #[serde(rename = "Insufficient data")]
    InsufficientData,
}

impl TrendDirection {
    /// Direction from the sign of a fitted slope. Exactly zero is `Stable`.
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            TrendDirection::Increasing
        } else if slope < 0.0 {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        }
    }
}

/// Least-squares line over the recent window and its projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendForecast {
    pub slope: f64,
    pub intercept: f64,
    pub sample_size: usize,
    #[serde(rename = "next30Days")]
    pub next_30_days: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolatilityRange {
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Predictions {
    #[serde(flatten)]
    pub forecast: TrendForecast,
    pub volatility_range: VolatilityRange,
}

// ---------------------------------------------------------------------------
// Per-commodity analytics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeSummary {
    pub average_price: f64,
    pub data_points: usize,
}

/// Count of modal prices per band around the mean and quartiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriceDistribution {
    #[serde(rename = "Very Low")]
    pub very_low: usize,
    #[serde(rename = "Low")]
    pub low: usize,
    #[serde(rename = "Average")]
    pub average: usize,
    #[serde(rename = "High")]
    pub high: usize,
    #[serde(rename = "Very High")]
    pub very_high: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommodityAnalytics {
    pub commodity: Commodity,
    pub volatility: f64,
    pub recent_volatility: f64,
    pub average_price: f64,
    pub grade_analysis: BTreeMap<String, GradeSummary>,
    pub price_distribution: PriceDistribution,
    pub total_data_points: usize,
    pub price_range: f64,
    pub trend_direction: TrendDirection,
    pub trend_strength: Option<f64>,
    pub predictions: Option<Predictions>,
}

// ---------------------------------------------------------------------------
// Cross-commodity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CorrelationStrength {
    Strong,
    Moderate,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CorrelationDirection {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Correlation {
    pub coefficient: f64,
    pub strength: CorrelationStrength,
    pub direction: CorrelationDirection,
    /// Number of dates present in both series.
    pub data_points: usize,
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradePremium {
    pub absolute_premium: f64,
    pub percent_premium: f64,
    pub faq_price: f64,
    pub non_faq_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub total_data_points: usize,
    pub analysis_type: String,
    pub commodities_analyzed: Vec<Commodity>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedAnalytics {
    pub date_range: DateRange,
    pub cross_commodity_correlation: Option<Correlation>,
    pub onion_analytics: Option<CommodityAnalytics>,
    pub potato_analytics: Option<CommodityAnalytics>,
    pub grade_premiums: BTreeMap<Commodity, GradePremium>,
    pub market_summary: MarketSummary,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub total_records: usize,
    pub dropped_records: usize,
    pub metadata: Option<serde_json::Value>,
}
