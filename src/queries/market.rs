//! Market-wide queries spanning both commodities.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::analytics::correlation::cross_correlation;
use crate::analytics::market::{commodity_analytics, grade_premium};
use crate::config;
use crate::error::Result;
use crate::models::{AdvancedAnalytics, Commodity, HealthStatus, MarketSummary};
use crate::queries::PriceParams;
use crate::store::RecordStore;

// ---------------------------------------------------------------------------
// MarketQuery
// ---------------------------------------------------------------------------

/// Query interface for cross-commodity analytics and dataset health.
pub struct MarketQuery<'a> {
    store: &'a RecordStore,
    today: NaiveDate,
}

impl<'a> MarketQuery<'a> {
    /// Create a new `MarketQuery` over `store`.
    pub fn new(store: &'a RecordStore, today: NaiveDate) -> Self {
        Self { store, today }
    }

    /// Volatility, distribution and trend for onion and potato, their
    /// correlation, and the faq premium over non-faq.
    ///
    /// Both commodities are always analysed; `params.commodity` is ignored.
    /// Defaults to the two years up to today. A commodity without data in the
    /// window gets no analytics block rather than failing the call.
    pub fn advanced_analytics(&self, params: &PriceParams) -> Result<AdvancedAnalytics> {
        let date_range = params.range_with_lookback(self.today, config::ADVANCED_LOOKBACK_YEARS)?;
        let grade = params.grade();

        let onion = self
            .store
            .filter(Commodity::Onion, date_range.start, date_range.end, grade);
        let potato = self
            .store
            .filter(Commodity::Potato, date_range.start, date_range.end, grade);
        debug!(
            onion = onion.len(),
            potato = potato.len(),
            "advanced analytics input"
        );

        let cross_commodity_correlation = cross_correlation(&onion, &potato);
        let onion_analytics = commodity_analytics(Commodity::Onion, &onion);
        let potato_analytics = commodity_analytics(Commodity::Potato, &potato);

        let mut grade_premiums = BTreeMap::new();
        let mut commodities_analyzed = Vec::new();
        for analytics in [&onion_analytics, &potato_analytics].into_iter().flatten() {
            commodities_analyzed.push(analytics.commodity);
            if let Some(premium) = grade_premium(analytics) {
                grade_premiums.insert(analytics.commodity, premium);
            }
        }

        Ok(AdvancedAnalytics {
            date_range,
            cross_commodity_correlation,
            onion_analytics,
            potato_analytics,
            grade_premiums,
            market_summary: MarketSummary {
                total_data_points: onion.len() + potato.len(),
                analysis_type: "Advanced Analytics".to_string(),
                commodities_analyzed,
            },
        })
    }

    /// Record counts and source metadata of the loaded snapshot.
    pub fn health(&self) -> HealthStatus {
        let report = self.store.load_report();
        HealthStatus {
            status: "healthy".to_string(),
            total_records: self.store.len(),
            dropped_records: report.dropped,
            metadata: self.store.metadata().cloned(),
        }
    }
}
