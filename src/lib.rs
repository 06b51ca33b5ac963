//! Commodity price analytics SDK for Rust.
//!
//! Loads a snapshot of daily onion and potato market prices (per quality
//! grade) into memory once, then answers analytical queries over it: latest
//! prices, historical series, monthly and year-over-year aggregation,
//! record and streak detection, seasonality, linear-trend forecasts and
//! cross-commodity correlation.
//!
//! # Quick start
//!
//! ```no_run
//! use commodity_prices_sdk::{PriceParams, PriceSdk};
//!
//! let sdk = PriceSdk::builder()
//!     .data_path("data/market-prices.json")
//!     .build()
//!     .unwrap();
//!
//! // Latest per-grade snapshot
//! let latest = sdk.prices().latest(&PriceParams::for_commodity("onion")).unwrap();
//!
//! // Monthly averages over an explicit window
//! let params = PriceParams::for_commodity("potato").between("2023-01-01", "2023-12-31");
//! let monthly = sdk.periods().monthly(&params).unwrap();
//! ```

pub mod analytics;
#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod queries;
pub mod store;

#[cfg(feature = "async")]
pub use async_client::AsyncPriceSdk;
pub use error::{PriceError, Result};
pub use filter::RecordFilter;
pub use loader::DataLoader;
pub use models::{Commodity, PriceRecord};
pub use queries::PriceParams;
pub use store::RecordStore;

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use tracing::warn;

// ---------------------------------------------------------------------------
// PriceSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`PriceSdk`] instance.
///
/// Use [`PriceSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](PriceSdkBuilder::build) to create the SDK.
#[derive(Debug, Default)]
pub struct PriceSdkBuilder {
    data_path: Option<PathBuf>,
    records: Option<Vec<PriceRecord>>,
    today: Option<NaiveDate>,
    strict: bool,
}

impl PriceSdkBuilder {
    /// Set the data file to load.
    ///
    /// If not set, [`config::default_data_path()`] is used (the
    /// `PRICE_DATA_PATH` environment variable, then the platform data
    /// directory). Paths ending in `.gz` are decompressed.
    pub fn data_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use these records instead of reading a file.
    pub fn records(mut self, records: Vec<PriceRecord>) -> Self {
        self.records = Some(records);
        self
    }

    /// Fix the reference date for default query windows.
    ///
    /// Without it, each query resolves its windows against the current UTC
    /// date at the time of the call.
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Fail [`build()`](Self::build) when the data file is missing or
    /// unreadable.
    ///
    /// Defaults to `false`: the failure is logged and the SDK starts with an
    /// empty store, so every per-commodity query reports no data.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Build the SDK, loading the record snapshot.
    pub fn build(self) -> Result<PriceSdk> {
        let store = match self.records {
            Some(records) => RecordStore::new(records),
            None => {
                let path = self.data_path.unwrap_or_else(config::default_data_path);
                match DataLoader::new(&path).load() {
                    Ok(data) => RecordStore::from(data),
                    Err(e) if self.strict => return Err(e),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "starting with an empty price store");
                        RecordStore::empty()
                    }
                }
            }
        };

        Ok(PriceSdk {
            store,
            today: self.today,
        })
    }
}

// ---------------------------------------------------------------------------
// PriceSdk
// ---------------------------------------------------------------------------

/// The main entry point for the price SDK.
///
/// Owns the immutable [`RecordStore`] and exposes the query interfaces as
/// lightweight borrowing wrappers. `PriceSdk` is `Send + Sync`; share it
/// across threads by reference or in an `Arc`.
///
/// Created via [`PriceSdk::builder()`].
#[derive(Debug, Clone)]
pub struct PriceSdk {
    store: RecordStore,
    today: Option<NaiveDate>,
}

impl PriceSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> PriceSdkBuilder {
        PriceSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access latest prices, historical series and per-grade records.
    pub fn prices(&self) -> queries::PriceQuery<'_> {
        queries::PriceQuery::new(&self.store, self.reference_date())
    }

    /// Access monthly, period-to-period and year-over-year aggregation.
    pub fn periods(&self) -> queries::PeriodQuery<'_> {
        queries::PeriodQuery::new(&self.store, self.reference_date())
    }

    /// Access calendar-month seasonality.
    pub fn seasonal(&self) -> queries::SeasonalQuery<'_> {
        queries::SeasonalQuery::new(&self.store, self.reference_date())
    }

    /// Access cross-commodity analytics and dataset health.
    pub fn market(&self) -> queries::MarketQuery<'_> {
        queries::MarketQuery::new(&self.store, self.reference_date())
    }

    // -- Snapshot ----------------------------------------------------------

    /// Return a reference to the underlying [`RecordStore`].
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// The reference date default windows are resolved against: the pinned
    /// date, or today's UTC date when none was set.
    pub fn reference_date(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// The date pinned through [`PriceSdkBuilder::today`], if any.
    pub fn pinned_today(&self) -> Option<NaiveDate> {
        self.today
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for PriceSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.store.load_report();
        write!(
            f,
            "PriceSdk(records={}, dropped={}, today={})",
            self.store.len(),
            report.dropped,
            self.reference_date()
        )
    }
}
