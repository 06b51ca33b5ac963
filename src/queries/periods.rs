//! Calendar aggregation queries: monthly averages, period-to-period changes
//! and year-over-year comparisons.

use chrono::NaiveDate;

use crate::analytics::aggregate;
use crate::config;
use crate::error::Result;
use crate::models::{DateRange, MonthlyReport, PeriodReport, YearOverYearReport};
use crate::queries::{select_records, PriceParams};
use crate::store::RecordStore;

// ---------------------------------------------------------------------------
// PeriodQuery
// ---------------------------------------------------------------------------

/// Query interface for month-bucketed statistics of one commodity.
pub struct PeriodQuery<'a> {
    store: &'a RecordStore,
    today: NaiveDate,
}

impl<'a> PeriodQuery<'a> {
    /// Create a new `PeriodQuery` over `store`.
    pub fn new(store: &'a RecordStore, today: NaiveDate) -> Self {
        Self { store, today }
    }

    // -- Monthly -----------------------------------------------------------

    /// Per-grade monthly averages with month-over-month changes.
    ///
    /// Defaults to the two years up to today. With a grade, every bucket is
    /// keyed by that grade.
    pub fn monthly(&self, params: &PriceParams) -> Result<MonthlyReport> {
        let commodity = params.commodity()?;
        let date_range = params.range_with_lookback(self.today, config::MONTHLY_LOOKBACK_YEARS)?;
        let records = select_records(self.store, commodity, date_range, params.grade())?;

        let monthly_averages = aggregate::monthly_averages(&records, params.grade());
        Ok(MonthlyReport {
            commodity,
            date_range,
            total_months: monthly_averages.len(),
            total_data_points: records.len(),
            monthly_averages,
        })
    }

    // -- Period to period --------------------------------------------------

    /// Consecutive-month changes of the all-grade average.
    ///
    /// Defaults to the three years up to today.
    pub fn period_analysis(&self, params: &PriceParams) -> Result<PeriodReport> {
        let commodity = params.commodity()?;
        let date_range = params.range_with_lookback(self.today, config::PERIOD_LOOKBACK_YEARS)?;
        let records = select_records(self.store, commodity, date_range, params.grade())?;

        Ok(PeriodReport {
            commodity,
            date_range,
            analysis: aggregate::period_analysis(&records),
        })
    }

    // -- Year over year ----------------------------------------------------

    /// Same-month comparisons across years.
    ///
    /// Always covers `[2022-01-01, today]`; date parameters are ignored. The
    /// reported range is the span of the data actually found.
    pub fn year_over_year(&self, params: &PriceParams) -> Result<YearOverYearReport> {
        let commodity = params.commodity()?;
        let window = DateRange::new(config::history_epoch(), self.today);
        let records = select_records(self.store, commodity, window, params.grade())?;
        let date_range = DateRange::spanning(&records).unwrap_or(window);

        Ok(YearOverYearReport {
            commodity,
            date_range,
            total_data_points: records.len(),
            analysis: aggregate::year_over_year(&records),
        })
    }
}
