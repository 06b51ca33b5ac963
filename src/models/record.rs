use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::PriceError;

// ---------------------------------------------------------------------------
// Commodity
// ---------------------------------------------------------------------------

/// The commodities covered by the price dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commodity {
    Onion,
    Potato,
}

impl Commodity {
    pub const ALL: [Commodity; 2] = [Commodity::Onion, Commodity::Potato];

    pub fn as_str(&self) -> &'static str {
        match self {
            Commodity::Onion => "onion",
            Commodity::Potato => "potato",
        }
    }
}

impl FromStr for Commodity {
    type Err = PriceError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("onion") {
            Ok(Commodity::Onion)
        } else if s.eq_ignore_ascii_case("potato") {
            Ok(Commodity::Potato)
        } else {
            Err(PriceError::InvalidArgument(format!(
                "Commodity must be either {}",
                config::SUPPORTED_COMMODITIES.join(" or ")
            )))
        }
    }
}

impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PriceRecord: One validated daily observation
// ---------------------------------------------------------------------------

/// A single daily market observation for one commodity grade.
///
/// Records are produced by the loader's validation step and never mutated
/// afterwards. `min_price <= modal_price <= max_price` is expected of the
/// source data but not enforced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub commodity: Commodity,
    pub date: NaiveDate,
    pub grade: String,
    pub min_price: f64,
    pub max_price: f64,
    pub modal_price: f64,
    pub variety: String,
}

impl PriceRecord {
    /// Price of the given type for this record.
    pub fn price(&self, price_type: PriceType) -> f64 {
        match price_type {
            PriceType::Modal => self.modal_price,
            PriceType::Min => self.min_price,
            PriceType::Max => self.max_price,
        }
    }
}

/// Which of a record's three prices a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    Modal,
    Min,
    Max,
}

impl PriceType {
    /// Scan order used when several price types tie on the same record.
    pub const SCAN_ORDER: [PriceType; 3] = [PriceType::Modal, PriceType::Min, PriceType::Max];
}

// ---------------------------------------------------------------------------
// DateRange / PricePoint
// ---------------------------------------------------------------------------

/// Inclusive calendar date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Smallest range covering every record, or `None` for an empty slice.
    pub fn spanning(records: &[PriceRecord]) -> Option<Self> {
        let start = records.iter().map(|r| r.date).min()?;
        let end = records.iter().map(|r| r.date).max()?;
        Some(Self { start, end })
    }
}

/// Date plus the three prices, as returned by the historical trend query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub date: NaiveDate,
    pub min_price: f64,
    pub max_price: f64,
    pub modal_price: f64,
}

impl From<&PriceRecord> for PricePoint {
    fn from(r: &PriceRecord) -> Self {
        Self {
            date: r.date,
            min_price: r.min_price,
            max_price: r.max_price,
            modal_price: r.modal_price,
        }
    }
}
