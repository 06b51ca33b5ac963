//! Immutable in-memory record store.
//!
//! The store is built once from validated records and never mutated, so it is
//! `Send + Sync` and can be shared across threads by reference or `Arc`
//! without locking.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::{PriceError, Result};
use crate::filter::RecordFilter;
use crate::loader::{LoadReport, LoadedData};
use crate::models::{Commodity, GradePrice, LatestPrices, PriceRecord};

/// Read-only snapshot of every loaded price record.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<PriceRecord>,
    metadata: Option<Value>,
    report: LoadReport,
}

impl RecordStore {
    /// Create a store over records that were validated elsewhere.
    pub fn new(records: Vec<PriceRecord>) -> Self {
        let report = LoadReport {
            loaded: records.len(),
            dropped: 0,
        };
        Self {
            records,
            metadata: None,
            report,
        }
    }

    /// An empty store, used when the data file is missing or unreadable.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every record, in load order.
    pub fn all(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Metadata object from the data file envelope, if there was one.
    pub fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }

    pub fn load_report(&self) -> LoadReport {
        self.report
    }

    /// Records of `commodity` dated within `[start, end]` (inclusive),
    /// restricted to `grade` when given, sorted ascending by date.
    ///
    /// Returns an empty vector when nothing matches.
    pub fn filter(
        &self,
        commodity: Commodity,
        start: NaiveDate,
        end: NaiveDate,
        grade: Option<&str>,
    ) -> Vec<PriceRecord> {
        RecordFilter::new(commodity)
            .date_from(start)
            .date_to(end)
            .grade_opt(grade)
            .apply(&self.records)
    }

    /// Apply an arbitrary [`RecordFilter`].
    pub fn select(&self, filter: &RecordFilter) -> Vec<PriceRecord> {
        filter.apply(&self.records)
    }

    /// Most recent date with any record for `commodity`.
    pub fn latest_date(&self, commodity: Commodity) -> Option<NaiveDate> {
        self.records
            .iter()
            .filter(|r| r.commodity == commodity)
            .map(|r| r.date)
            .max()
    }

    /// Per-grade snapshot at the latest date for `commodity`.
    ///
    /// When several records share a grade on that date, the one loaded last
    /// wins.
    pub fn latest(&self, commodity: Commodity) -> Result<LatestPrices> {
        let latest_date = self.latest_date(commodity).ok_or_else(|| {
            PriceError::NotFound(format!("No price data available for {}", commodity))
        })?;

        let mut data = BTreeMap::new();
        for record in self
            .records
            .iter()
            .filter(|r| r.commodity == commodity && r.date == latest_date)
        {
            data.insert(
                record.grade.clone(),
                GradePrice {
                    min_price: record.min_price,
                    max_price: record.max_price,
                    modal_price: record.modal_price,
                    variety: record.variety.clone(),
                },
            );
        }

        Ok(LatestPrices {
            commodity,
            latest_date,
            data,
        })
    }
}

impl From<LoadedData> for RecordStore {
    fn from(data: LoadedData) -> Self {
        Self {
            records: data.records,
            metadata: data.metadata,
            report: data.report,
        }
    }
}

impl From<Vec<PriceRecord>> for RecordStore {
    fn from(records: Vec<PriceRecord>) -> Self {
        Self::new(records)
    }
}
