//! Request parameters and the validation shared by every query.

use chrono::{Months, NaiveDate};

use crate::error::{PriceError, Result};
use crate::loader::parse_calendar_date;
use crate::models::{Commodity, DateRange};

// ---------------------------------------------------------------------------
// PriceParams
// ---------------------------------------------------------------------------

/// Parameters accepted by the query methods.
///
/// All fields are optional strings, as they would arrive from a query string.
/// `commodity` is required by every per-commodity query and ignored by the
/// market-wide ones. Dates are `YYYY-MM-DD`; anything after the first ten
/// characters (a time component, say) is ignored.
#[derive(Debug, Clone, Default)]
pub struct PriceParams {
    pub commodity: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub grade: Option<String>,
}

impl PriceParams {
    /// Parameters naming only a commodity.
    pub fn for_commodity(commodity: &str) -> Self {
        Self {
            commodity: Some(commodity.to_string()),
            ..Self::default()
        }
    }

    /// Set both date bounds.
    pub fn between(mut self, start: &str, end: &str) -> Self {
        self.start_date = Some(start.to_string());
        self.end_date = Some(end.to_string());
        self
    }

    /// Restrict to one grade.
    pub fn with_grade(mut self, grade: &str) -> Self {
        self.grade = Some(grade.to_string());
        self
    }

    /// Validated commodity.
    pub fn commodity(&self) -> Result<Commodity> {
        parse_commodity(self.commodity.as_deref())
    }

    /// The grade filter, with an empty string treated as absent.
    pub fn grade(&self) -> Option<&str> {
        self.grade.as_deref().filter(|g| !g.is_empty())
    }

    /// Requested window, falling back to `[today − lookback_years, today]`
    /// for whichever bound is missing.
    pub fn range_with_lookback(&self, today: NaiveDate, lookback_years: u32) -> Result<DateRange> {
        self.range_or(years_before(today, lookback_years), today)
    }

    /// Requested window, falling back to the given bounds.
    pub fn range_or(&self, default_start: NaiveDate, default_end: NaiveDate) -> Result<DateRange> {
        let start = match self.start_date.as_deref() {
            Some(s) => parse_date(s, "startDate")?,
            None => default_start,
        };
        let end = match self.end_date.as_deref() {
            Some(s) => parse_date(s, "endDate")?,
            None => default_end,
        };
        Ok(DateRange::new(start, end))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Commodity validation: absent is an error distinct from unrecognized.
pub fn parse_commodity(value: Option<&str>) -> Result<Commodity> {
    match value {
        None => Err(PriceError::InvalidArgument(
            "Commodity parameter is required".to_string(),
        )),
        Some(s) if s.trim().is_empty() => Err(PriceError::InvalidArgument(
            "Commodity parameter is required".to_string(),
        )),
        Some(s) => s.parse(),
    }
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate> {
    parse_calendar_date(value).ok_or_else(|| {
        PriceError::InvalidArgument(format!(
            "{} must be a date in YYYY-MM-DD format, got {:?}",
            field, value
        ))
    })
}

/// Same calendar day `years` earlier; Feb 29 clamps to Feb 28.
pub fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(years * 12))
        .unwrap_or(NaiveDate::MIN)
}
