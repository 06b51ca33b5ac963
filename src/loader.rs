//! Reads the market price file and validates it into [`PriceRecord`]s.
//!
//! The file is either an envelope `{ "metadata": ..., "priceData": [...] }`
//! or a bare array of entries. Files ending in `.gz` are decompressed
//! transparently. Each entry is validated on its own: entries with a missing
//! field, an unknown commodity, an unparseable date or a non-finite price are
//! dropped and counted rather than failing the whole load.

use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use flate2::read::GzDecoder;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{PriceError, Result};
use crate::models::{Commodity, PriceRecord};

// ---------------------------------------------------------------------------
// LoadedData
// ---------------------------------------------------------------------------

/// Counts from a load: accepted entries and entries rejected by validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub dropped: usize,
}

/// Validated records plus whatever metadata the envelope carried.
#[derive(Debug, Clone, Default)]
pub struct LoadedData {
    pub records: Vec<PriceRecord>,
    pub metadata: Option<Value>,
    pub report: LoadReport,
}

// ---------------------------------------------------------------------------
// DataLoader
// ---------------------------------------------------------------------------

/// Loads a price data file from disk.
pub struct DataLoader {
    path: PathBuf,
}

impl DataLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the file.
    ///
    /// IO and JSON syntax errors are returned; an unexpected top-level shape
    /// and invalid entries are not errors (see [`parse_value`]).
    pub fn load(&self) -> Result<LoadedData> {
        info!(path = %self.path.display(), "loading market price data");

        if !self.path.exists() {
            return Err(PriceError::NotFound(format!(
                "Data file does not exist at {}",
                self.path.display()
            )));
        }

        let contents = if self.path.extension().and_then(|e| e.to_str()) == Some("gz") {
            let file = fs::File::open(&self.path)?;
            let mut decoder = GzDecoder::new(BufReader::new(file));
            let mut contents = String::new();
            decoder.read_to_string(&mut contents)?;
            contents
        } else {
            fs::read_to_string(&self.path)?
        };

        if contents.trim().is_empty() {
            warn!(path = %self.path.display(), "data file is empty");
            return Ok(LoadedData::default());
        }

        let data = parse_str(&contents)?;
        info!(
            loaded = data.report.loaded,
            dropped = data.report.dropped,
            "market price data loaded"
        );
        Ok(data)
    }
}

// ---------------------------------------------------------------------------
// Parsing and validation
// ---------------------------------------------------------------------------

/// Parse a JSON document (envelope or bare array) into validated records.
pub fn parse_str(contents: &str) -> Result<LoadedData> {
    let value: Value = serde_json::from_str(contents)?;
    Ok(parse_value(value))
}

/// Validate an already-parsed JSON document.
///
/// Anything other than an envelope with a `priceData` array or a bare array
/// yields an empty data set.
pub fn parse_value(value: Value) -> LoadedData {
    let (entries, metadata) = match value {
        Value::Object(mut map) => match map.remove("priceData") {
            Some(Value::Array(arr)) => (arr, map.remove("metadata")),
            _ => {
                warn!("data file has no priceData array; expected an array or an envelope");
                return LoadedData::default();
            }
        },
        Value::Array(arr) => (arr, None),
        _ => {
            warn!("data file is neither an array nor an object");
            return LoadedData::default();
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    let mut dropped = 0usize;

    for (index, entry) in entries.into_iter().enumerate() {
        match validate_entry(entry) {
            Ok(record) => records.push(record),
            Err(reason) => {
                debug!(index, %reason, "dropping malformed price entry");
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        warn!(dropped, "dropped malformed price entries");
    }

    let report = LoadReport {
        loaded: records.len(),
        dropped,
    };
    LoadedData {
        records,
        metadata,
        report,
    }
}

/// Wire shape of one entry before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPriceRecord {
    commodity: String,
    date: String,
    grade: String,
    min_price: f64,
    max_price: f64,
    modal_price: f64,
    #[serde(default)]
    variety: Option<String>,
}

fn validate_entry(entry: Value) -> std::result::Result<PriceRecord, String> {
    let raw: RawPriceRecord = serde_json::from_value(entry).map_err(|e| e.to_string())?;

    let commodity: Commodity = raw.commodity.parse().map_err(|e: PriceError| e.to_string())?;
    let date = parse_calendar_date(&raw.date)
        .ok_or_else(|| format!("invalid date '{}'", raw.date))?;

    for (name, price) in [
        ("minPrice", raw.min_price),
        ("maxPrice", raw.max_price),
        ("modalPrice", raw.modal_price),
    ] {
        if !price.is_finite() {
            return Err(format!("{} is not a finite number", name));
        }
    }

    Ok(PriceRecord {
        commodity,
        date,
        grade: raw.grade,
        min_price: raw.min_price,
        max_price: raw.max_price,
        modal_price: raw.modal_price,
        variety: raw.variety.unwrap_or_default(),
    })
}

/// Parse the calendar-date portion (`YYYY-MM-DD`) of a date or timestamp.
///
/// Anything after the first ten characters (a time of day, an offset) is
/// ignored, so `2024-03-01T23:30:00Z` is 2024-03-01 regardless of zone.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let head = s.get(..s.len().min(10))?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}
