//! Query modules for the price SDK.
//!
//! Each module provides a query struct that borrows the
//! [`RecordStore`](crate::store::RecordStore) together with the reference
//! date used for default windows, validates [`PriceParams`], and returns a
//! typed report. An empty selection is [`PriceError::NotFound`], never an
//! empty report.

pub mod market;
pub mod params;
pub mod periods;
pub mod prices;
pub mod seasonal;

pub use market::MarketQuery;
pub use params::PriceParams;
pub use periods::PeriodQuery;
pub use prices::PriceQuery;
pub use seasonal::SeasonalQuery;

use crate::error::{PriceError, Result};
use crate::models::{Commodity, DateRange, PriceRecord};
use crate::store::RecordStore;

/// Filter the store, turning an empty result into `NotFound`.
pub(crate) fn select_records(
    store: &RecordStore,
    commodity: Commodity,
    range: DateRange,
    grade: Option<&str>,
) -> Result<Vec<PriceRecord>> {
    let records = store.filter(commodity, range.start, range.end, grade);
    if records.is_empty() {
        return Err(PriceError::NotFound(format!(
            "No data found for {} in the specified date range",
            commodity
        )));
    }
    Ok(records)
}
