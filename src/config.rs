use chrono::NaiveDate;
use std::path::PathBuf;

/// Environment variable that overrides the default data file location.
pub const DATA_PATH_ENV: &str = "PRICE_DATA_PATH";

pub const DATA_FILE_NAME: &str = "market-prices.json";
pub const DATA_DIR_NAME: &str = "commodity-prices";

pub const SUPPORTED_COMMODITIES: [&str; 2] = ["onion", "potato"];

// Default lookback windows (years before "today") per query.
pub const HISTORICAL_LOOKBACK_YEARS: u32 = 3;
pub const MONTHLY_LOOKBACK_YEARS: u32 = 2;
pub const PERIOD_LOOKBACK_YEARS: u32 = 3;
pub const ADVANCED_LOOKBACK_YEARS: u32 = 2;

// Record/streak analysis
pub const DAILY_CHANGE_TOP_N: usize = 10;
pub const STREAK_TOP_N: usize = 5;
pub const STREAK_MIN_DURATION: usize = 3;
pub const STREAK_THRESHOLD_RATIO: f64 = 0.2;

// Seasonal / year-over-year / period analysis
pub const SEASONAL_RANK_N: usize = 3;
pub const YOY_TOP_N: usize = 5;
pub const PERIOD_TOP_N: usize = 5;

// Trend estimation
pub const TREND_WINDOW: usize = 90;
pub const TREND_MIN_POINTS: usize = 10;
pub const FORECAST_HORIZON: usize = 30;
pub const RECENT_VOLATILITY_WINDOW: usize = 30;

// Grade premium comparison
pub const PREMIUM_GRADE: &str = "faq";
pub const BASELINE_GRADE: &str = "non-faq";

/// First date covered by the full-history queries (seasonal, year-over-year,
/// and the default start of the records query).
pub fn history_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Resolve the data file path: `$PRICE_DATA_PATH`, then the platform data
/// directory, then a relative `data/market-prices.json`.
pub fn default_data_path() -> PathBuf {
    if let Ok(path) = std::env::var(DATA_PATH_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    if let Some(data) = dirs::data_dir() {
        data.join(DATA_DIR_NAME).join(DATA_FILE_NAME)
    } else {
        PathBuf::from("data").join(DATA_FILE_NAME)
    }
}
