//! Record filter with chained criteria.
//!
//! Builder methods return `&mut Self` for chaining. Applying a filter always
//! yields records in ascending date order; records sharing a date keep their
//! load order.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use commodity_prices_sdk::{Commodity, RecordFilter};
//!
//! let filter = RecordFilter::new(Commodity::Onion)
//!     .date_from(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
//!     .date_to(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap())
//!     .grade("faq")
//!     .clone();
//! assert_eq!(filter.commodity(), Commodity::Onion);
//! ```

use chrono::NaiveDate;

use crate::models::{Commodity, DateRange, PriceRecord};

/// Selects the records of one commodity, optionally bounded by an inclusive
/// date window and restricted to an exact grade.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFilter {
    commodity: Commodity,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    grade: Option<String>,
}

impl RecordFilter {
    /// Create a filter matching every record of `commodity`.
    pub fn new(commodity: Commodity) -> Self {
        Self {
            commodity,
            date_from: None,
            date_to: None,
            grade: None,
        }
    }

    /// Inclusive lower date bound.
    pub fn date_from(&mut self, date: NaiveDate) -> &mut Self {
        self.date_from = Some(date);
        self
    }

    /// Inclusive upper date bound.
    pub fn date_to(&mut self, date: NaiveDate) -> &mut Self {
        self.date_to = Some(date);
        self
    }

    /// Set both bounds from a [`DateRange`].
    pub fn range(&mut self, range: DateRange) -> &mut Self {
        self.date_from = Some(range.start);
        self.date_to = Some(range.end);
        self
    }

    /// Restrict to an exact (case-sensitive) grade.
    pub fn grade(&mut self, grade: &str) -> &mut Self {
        self.grade = Some(grade.to_string());
        self
    }

    /// Restrict to a grade when one is given; `None` leaves the filter open.
    pub fn grade_opt(&mut self, grade: Option<&str>) -> &mut Self {
        self.grade = grade.map(str::to_string);
        self
    }

    pub fn commodity(&self) -> Commodity {
        self.commodity
    }

    /// Whether a single record passes every criterion.
    pub fn matches(&self, record: &PriceRecord) -> bool {
        if record.commodity != self.commodity {
            return false;
        }
        if let Some(from) = self.date_from {
            if record.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if record.date > to {
                return false;
            }
        }
        if let Some(ref grade) = self.grade {
            if &record.grade != grade {
                return false;
            }
        }
        true
    }

    /// Copy the matching records out of `records`, sorted by date.
    pub fn apply(&self, records: &[PriceRecord]) -> Vec<PriceRecord> {
        let mut out: Vec<PriceRecord> = records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();
        // stable: equal dates keep load order
        out.sort_by_key(|r| r.date);
        out
    }
}
