//! Query facade tests: parameter validation, default windows and response
//! shapes over the sample data set.

mod common;

use commodity_prices_sdk::models::{Commodity, HistoricalTrends};
use commodity_prices_sdk::queries::params::{parse_commodity, years_before};
use commodity_prices_sdk::{PriceError, PriceParams, PriceSdk};

use common::date;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn missing_commodity_is_invalid_argument() {
    let (sdk, _tmp) = common::setup_sample_sdk();
    let err = sdk.prices().latest(&PriceParams::default()).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(err.to_string(), "Invalid argument: Commodity parameter is required");

    assert!(parse_commodity(Some("  ")).unwrap_err().is_invalid_argument());
}

#[test]
fn unknown_commodity_is_invalid_argument() {
    let (sdk, _tmp) = common::setup_sample_sdk();
    let err = sdk
        .periods()
        .monthly(&PriceParams::for_commodity("tomato"))
        .unwrap_err();
    assert!(matches!(err, PriceError::InvalidArgument(ref m) if m.contains("onion or potato")));
}

#[test]
fn malformed_date_is_invalid_argument() {
    let (sdk, _tmp) = common::setup_sample_sdk();
    let params = PriceParams::for_commodity("onion").between("2024/01/01", "2024-02-01");
    let err = sdk.prices().historical(&params).unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("startDate"));
}

#[test]
fn empty_window_is_not_found() {
    let (sdk, _tmp) = common::setup_sample_sdk();
    let params = PriceParams::for_commodity("potato").between("2010-01-01", "2010-12-31");

    assert!(sdk.prices().historical(&params).unwrap_err().is_not_found());
    assert!(sdk.prices().records(&params).unwrap_err().is_not_found());
    assert!(sdk.periods().monthly(&params).unwrap_err().is_not_found());
    assert!(sdk.periods().period_analysis(&params).unwrap_err().is_not_found());
}

#[test]
fn empty_store_reports_not_found_everywhere() {
    let sdk = common::sdk_from_records(Vec::new());
    let params = PriceParams::for_commodity("onion");

    assert!(sdk.prices().latest(&params).unwrap_err().is_not_found());
    assert!(sdk.seasonal().patterns(&params).unwrap_err().is_not_found());
    assert!(sdk.periods().year_over_year(&params).unwrap_err().is_not_found());
}

// ---------------------------------------------------------------------------
// Default windows
// ---------------------------------------------------------------------------

#[test]
fn years_before_clamps_leap_day() {
    assert_eq!(years_before(date("2024-02-29"), 1), date("2023-02-28"));
    assert_eq!(years_before(date("2024-12-31"), 3), date("2021-12-31"));
}

#[test]
fn historical_defaults_to_three_years() {
    let (sdk, _tmp) = common::setup_sample_sdk();
    let trends = sdk
        .prices()
        .historical(&PriceParams::for_commodity("onion"))
        .unwrap();

    match trends {
        HistoricalTrends::ByGrade {
            date_range,
            total_data_points,
            trends,
            ..
        } => {
            assert_eq!(date_range.start, date("2021-12-31"));
            assert_eq!(date_range.end, date("2024-12-31"));
            assert_eq!(total_data_points, 96);
            assert_eq!(trends.len(), 2);
            assert_eq!(trends["faq"].len(), 48);
        }
        other => panic!("expected grouped trends, got {:?}", other),
    }
}

#[test]
fn historical_with_grade_is_flat() {
    let (sdk, _tmp) = common::setup_sample_sdk();
    let params = PriceParams::for_commodity("onion")
        .between("2024-01-01", "2024-01-31T12:00:00Z")
        .with_grade("faq");
    let trends = sdk.prices().historical(&params).unwrap();

    assert_eq!(trends.total_points(), 2);
    let value = serde_json::to_value(&trends).unwrap();
    assert_eq!(value["grade"], "faq");
    assert_eq!(value["dataPoints"], 2);
    assert_eq!(value["trends"][0]["date"], "2024-01-01");
    assert_eq!(value["trends"][1]["modalPrice"], 1300.0);
}

#[test]
fn open_end_date_defaults_to_today() {
    let (sdk, _tmp) = common::setup_sample_sdk();
    let params = PriceParams {
        commodity: Some("potato".to_string()),
        start_date: Some("2024-12-01".to_string()),
        ..PriceParams::default()
    };
    let report = sdk.periods().monthly(&params).unwrap();
    assert_eq!(report.date_range.end, date(common::TODAY));
    assert_eq!(report.total_data_points, 2);
}

// ---------------------------------------------------------------------------
// Latest
// ---------------------------------------------------------------------------

#[test]
fn latest_snapshot_from_sample() {
    let (sdk, _tmp) = common::setup_sample_sdk();
    let latest = sdk
        .prices()
        .latest(&PriceParams::for_commodity("ONION"))
        .unwrap();

    assert_eq!(latest.commodity, Commodity::Onion);
    assert_eq!(latest.latest_date, date("2024-12-15"));
    assert_eq!(latest.data["faq"].modal_price, 2400.0);
    assert_eq!(latest.data["non-faq"].modal_price, 2200.0);
    assert_eq!(latest.data["faq"].variety, "Red");
}

// ---------------------------------------------------------------------------
// Advanced analytics
// ---------------------------------------------------------------------------

#[test]
fn advanced_analytics_covers_both_commodities() {
    let (sdk, _tmp) = common::setup_sample_sdk();
    let analytics = sdk
        .market()
        .advanced_analytics(&PriceParams::default())
        .unwrap();

    assert_eq!(analytics.date_range.start, date("2022-12-31"));
    assert_eq!(analytics.market_summary.total_data_points, 144);
    assert_eq!(analytics.market_summary.analysis_type, "Advanced Analytics");
    assert_eq!(
        analytics.market_summary.commodities_analyzed,
        vec![Commodity::Onion, Commodity::Potato]
    );
    assert_eq!(analytics.cross_commodity_correlation.unwrap().data_points, 48);

    let onion = analytics.onion_analytics.unwrap();
    assert_eq!(onion.total_data_points, 96);
    assert_eq!(onion.grade_analysis["faq"].average_price, 1750.0);
    assert_eq!(onion.grade_analysis["non-faq"].data_points, 48);
    assert_eq!(onion.predictions.unwrap().forecast.sample_size, 90);
    assert!(onion.price_distribution.average > 0);

    let premium = &analytics.grade_premiums[&Commodity::Onion];
    assert_eq!(premium.absolute_premium, 200.0);
    assert_eq!(premium.percent_premium, 12.9);
    assert_eq!(premium.non_faq_price, 1550.0);
    assert!(!analytics.grade_premiums.contains_key(&Commodity::Potato));
}

#[test]
fn advanced_analytics_tolerates_missing_commodity() {
    let (sdk, _tmp) = common::setup_sample_sdk();
    let params = PriceParams::default().with_grade("non-faq");
    let analytics = sdk.market().advanced_analytics(&params).unwrap();

    assert!(analytics.potato_analytics.is_none());
    assert!(analytics.cross_commodity_correlation.is_none());
    assert_eq!(analytics.market_summary.commodities_analyzed, vec![Commodity::Onion]);
    assert!(analytics.grade_premiums.is_empty());
}

#[test]
fn short_series_has_insufficient_trend() {
    let records = common::daily_series(Commodity::Potato, "faq", "2024-06-01", &[10.0, 11.0, 12.0]);
    let sdk = common::sdk_from_records(records);
    let value = serde_json::to_value(
        sdk.market()
            .advanced_analytics(&PriceParams::default())
            .unwrap(),
    )
    .unwrap();

    let potato = &value["potatoAnalytics"];
    assert_eq!(potato["trendDirection"], "Insufficient data");
    assert!(potato["predictions"].is_null());
    assert!(value["onionAnalytics"].is_null());
    assert_eq!(potato["priceDistribution"]["Very Low"], 1);
}

#[test]
fn advanced_analytics_serializes_forecast_fields() {
    let (sdk, _tmp) = common::setup_sample_sdk();
    let value = serde_json::to_value(
        sdk.market()
            .advanced_analytics(&PriceParams::default())
            .unwrap(),
    )
    .unwrap();

    let predictions = &value["onionAnalytics"]["predictions"];
    assert_eq!(predictions["next30Days"].as_array().unwrap().len(), 30);
    assert!(predictions["volatilityRange"]["lower"].is_number());
    assert!(value["gradePremiums"]["onion"]["percentPremium"].is_number());
    assert!(value["crossCommodityCorrelation"]["coefficient"].is_number());
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn repeated_calls_serialize_identically() {
    let (sdk, _tmp) = common::setup_sample_sdk();
    let params = PriceParams::for_commodity("onion");

    let first = serde_json::to_string(&sdk.prices().records(&params).unwrap()).unwrap();
    let second = serde_json::to_string(&sdk.prices().records(&params).unwrap()).unwrap();
    assert_eq!(first, second);

    let first = serde_json::to_string(&sdk.market().advanced_analytics(&params).unwrap()).unwrap();
    let second = serde_json::to_string(&sdk.market().advanced_analytics(&params).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn sdk_is_shareable_across_threads() {
    let (sdk, _tmp) = common::setup_sample_sdk();
    let sdk = std::sync::Arc::new(sdk);

    let handles: Vec<_> = ["onion", "potato"]
        .into_iter()
        .map(|c| {
            let sdk = std::sync::Arc::clone(&sdk);
            std::thread::spawn(move || {
                sdk.seasonal()
                    .patterns(&PriceParams::for_commodity(c))
                    .map(|r| r.total_data_points)
            })
        })
        .collect();

    let totals: Vec<usize> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();
    assert_eq!(totals, vec![96, 48]);
}

#[test]
fn unpinned_sdk_resolves_windows_against_current_date() {
    let now = chrono::Utc::now().date_naive();
    let records = common::daily_series(
        Commodity::Onion,
        "faq",
        &(now - chrono::Duration::days(5)).format("%Y-%m-%d").to_string(),
        &[10.0, 11.0, 12.0],
    );
    let sdk = PriceSdk::builder().records(records).build().unwrap();
    assert!(sdk.pinned_today().is_none());

    let before = chrono::Utc::now().date_naive();
    let trends = sdk
        .prices()
        .historical(&PriceParams::for_commodity("onion"))
        .unwrap();
    let after = chrono::Utc::now().date_naive();

    let end = match trends {
        HistoricalTrends::ByGrade { date_range, .. } => date_range.end,
        HistoricalTrends::SingleGrade { date_range, .. } => date_range.end,
    };
    assert!(end == before || end == after);
    assert!(sdk.reference_date() >= before);
}
