//! Async wrapper around [`PriceSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs SDK operations on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the analyzers walk the record set.
//!
//! # Example
//!
//! ```no_run
//! use commodity_prices_sdk::{AsyncPriceSdk, PriceParams};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sdk = AsyncPriceSdk::builder()
//!         .data_path("data/market-prices.json")
//!         .build()
//!         .await
//!         .unwrap();
//!
//!     let seasonal = sdk
//!         .run(|s| s.seasonal().patterns(&PriceParams::for_commodity("onion")))
//!         .await
//!         .unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::{PriceError, Result};
use crate::models::{HealthStatus, PriceRecord};
use crate::PriceSdk;

// ---------------------------------------------------------------------------
// AsyncPriceSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncPriceSdk`] instance.
#[derive(Debug, Default)]
pub struct AsyncPriceSdkBuilder {
    data_path: Option<PathBuf>,
    records: Option<Vec<PriceRecord>>,
    today: Option<NaiveDate>,
    strict: bool,
}

impl AsyncPriceSdkBuilder {
    /// Set the data file to load.
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
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Fail the build when the data file cannot be loaded.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Build the async SDK. Loading runs on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncPriceSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = PriceSdk::builder().strict(self.strict);
            if let Some(path) = self.data_path {
                builder = builder.data_path(path);
            }
            if let Some(records) = self.records {
                builder = builder.records(records);
            }
            if let Some(today) = self.today {
                builder = builder.today(today);
            }
            let sdk = builder.build()?;
            Ok(AsyncPriceSdk {
                inner: Arc::new(sdk),
            })
        })
        .await
        .map_err(|e| PriceError::Computation(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncPriceSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`PriceSdk`].
///
/// The wrapped SDK is immutable, so it is shared through an [`Arc`] with no
/// lock; concurrent `run` calls execute in parallel. Cloning is cheap.
///
/// # Usage
///
/// ```no_run
/// # use commodity_prices_sdk::{AsyncPriceSdk, PriceParams};
/// # async fn example() -> commodity_prices_sdk::Result<()> {
/// let sdk = AsyncPriceSdk::builder().build().await?;
/// let report = sdk
///     .run(|s| s.prices().records(&PriceParams::for_commodity("potato")))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AsyncPriceSdk {
    inner: Arc<PriceSdk>,
}

impl AsyncPriceSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncPriceSdkBuilder {
        AsyncPriceSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives a `&PriceSdk` and returns a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&PriceSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || f(&sdk))
            .await
            .map_err(|e| PriceError::Computation(format!("Task join error: {e}")))?
    }

    /// Dataset health, without leaving the async context.
    pub async fn health(&self) -> Result<HealthStatus> {
        self.run(|s| Ok(s.market().health())).await
    }

    /// The wrapped synchronous SDK.
    pub fn inner(&self) -> &PriceSdk {
        &self.inner
    }
}
