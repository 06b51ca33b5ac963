//! Seasonal pattern query.

use chrono::NaiveDate;

use crate::analytics::seasonal::seasonal_patterns;
use crate::config;
use crate::error::{PriceError, Result};
use crate::models::{DateRange, SeasonalReport};
use crate::queries::{select_records, PriceParams};
use crate::store::RecordStore;

/// Query interface for calendar-month seasonality.
pub struct SeasonalQuery<'a> {
    store: &'a RecordStore,
    today: NaiveDate,
}

impl<'a> SeasonalQuery<'a> {
    pub fn new(store: &'a RecordStore, today: NaiveDate) -> Self {
        Self { store, today }
    }

    /// Monthly price statistics pooled across years, with the cheapest,
    /// most expensive, most volatile and most stable months.
    ///
    /// Always covers `[2022-01-01, today]`; only commodity and grade are read.
    pub fn patterns(&self, params: &PriceParams) -> Result<SeasonalReport> {
        let commodity = params.commodity()?;
        let window = DateRange::new(config::history_epoch(), self.today);
        let records = select_records(self.store, commodity, window, params.grade())?;

        let patterns = seasonal_patterns(&records).ok_or_else(|| {
            PriceError::Computation(format!("No seasonal statistics for {}", commodity))
        })?;

        Ok(SeasonalReport {
            commodity,
            date_range: DateRange::spanning(&records).unwrap_or(window),
            total_data_points: records.len(),
            patterns,
        })
    }
}
