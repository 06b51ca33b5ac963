//! Latest snapshot, historical series and record/streak queries.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::analytics::records::analyze_grade;
use crate::config;
use crate::error::Result;
use crate::models::{HistoricalTrends, LatestPrices, PricePoint, PriceRecord, RecordsReport};
use crate::queries::{select_records, PriceParams};
use crate::store::RecordStore;

// ---------------------------------------------------------------------------
// PriceQuery
// ---------------------------------------------------------------------------

/// Query interface for raw prices and per-grade records of one commodity.
pub struct PriceQuery<'a> {
    store: &'a RecordStore,
    today: NaiveDate,
}

impl<'a> PriceQuery<'a> {
    /// Create a new `PriceQuery` over `store`, resolving default windows
    /// against `today`.
    pub fn new(store: &'a RecordStore, today: NaiveDate) -> Self {
        Self { store, today }
    }

    /// Every grade's prices on the most recent date with data.
    ///
    /// Only `params.commodity` is read.
    pub fn latest(&self, params: &PriceParams) -> Result<LatestPrices> {
        let commodity = params.commodity()?;
        self.store.latest(commodity)
    }

    /// Price points over the window, flat when a grade is given and grouped
    /// by grade otherwise.
    ///
    /// Defaults to the three years up to today.
    pub fn historical(&self, params: &PriceParams) -> Result<HistoricalTrends> {
        let commodity = params.commodity()?;
        let date_range =
            params.range_with_lookback(self.today, config::HISTORICAL_LOOKBACK_YEARS)?;
        let records = select_records(self.store, commodity, date_range, params.grade())?;

        Ok(match params.grade() {
            Some(grade) => HistoricalTrends::SingleGrade {
                commodity,
                grade: grade.to_string(),
                date_range,
                data_points: records.len(),
                trends: records.iter().map(PricePoint::from).collect(),
            },
            None => {
                let mut trends: BTreeMap<String, Vec<PricePoint>> = BTreeMap::new();
                for record in &records {
                    trends
                        .entry(record.grade.clone())
                        .or_default()
                        .push(PricePoint::from(record));
                }
                HistoricalTrends::ByGrade {
                    commodity,
                    date_range,
                    total_data_points: records.len(),
                    trends,
                }
            }
        })
    }

    /// All-time extrema, largest changes, sustained runs and statistics,
    /// computed separately for each grade.
    ///
    /// Defaults to `[2022-01-01, today]`.
    pub fn records(&self, params: &PriceParams) -> Result<RecordsReport> {
        let commodity = params.commodity()?;
        let date_range = params.range_or(config::history_epoch(), self.today)?;
        let records = select_records(self.store, commodity, date_range, params.grade())?;

        let mut by_grade: BTreeMap<String, Vec<PriceRecord>> = BTreeMap::new();
        for record in &records {
            let key = params.grade().unwrap_or(&record.grade);
            by_grade
                .entry(key.to_string())
                .or_default()
                .push(record.clone());
        }

        let records_by_grade = by_grade
            .into_iter()
            .filter_map(|(grade, series)| analyze_grade(&series).map(|r| (grade, r)))
            .collect();

        Ok(RecordsReport {
            commodity,
            date_range,
            total_data_points: records.len(),
            records: records_by_grade,
        })
    }
}
