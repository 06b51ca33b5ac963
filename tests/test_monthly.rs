//! Monthly, year-over-year and period-to-period aggregation tests.

mod common;

use commodity_prices_sdk::analytics::aggregate::{
    monthly_averages, period_analysis, year_over_year,
};
use commodity_prices_sdk::models::ChangeType;
use commodity_prices_sdk::{Commodity, PriceParams};

use common::record;

// ---------------------------------------------------------------------------
// Monthly averages
// ---------------------------------------------------------------------------

#[test]
fn month_over_month_change_matches_worked_example() {
    let records = vec![
        record(Commodity::Onion, "2024-01-01", "faq", 10.0, 20.0, 15.0),
        record(Commodity::Onion, "2024-02-01", "faq", 20.0, 30.0, 25.0),
    ];
    let months = monthly_averages(&records, None);

    assert_eq!(months.len(), 2);
    assert_eq!(months[0].month, "2024-01");
    assert_eq!(months[0].month_name, "January");
    assert!(months[0].changes.is_empty());

    let jan = &months[0].grades["faq"];
    assert_eq!(jan.average_modal_price, 15.0);
    assert_eq!(jan.price_range, 10.0);
    assert_eq!(jan.data_points, 1);

    let change = &months[1].changes["faq"];
    assert_eq!(change.absolute_change, 10.0);
    assert_eq!(change.percent_change, 66.67);
}

#[test]
fn grade_override_rekeys_every_bucket() {
    let records = vec![
        record(Commodity::Onion, "2024-01-01", "faq", 10.0, 20.0, 15.0),
        record(Commodity::Onion, "2024-01-02", "non-faq", 6.0, 10.0, 8.0),
    ];
    let months = monthly_averages(&records, Some("faq"));
    assert_eq!(months[0].grades.len(), 1);
    assert_eq!(months[0].grades["faq"].data_points, 2);
    assert_eq!(months[0].grades["faq"].average_modal_price, 11.5);
}

#[test]
fn grade_missing_from_previous_month_has_no_change() {
    let records = vec![
        record(Commodity::Onion, "2024-01-10", "faq", 10.0, 20.0, 15.0),
        record(Commodity::Onion, "2024-02-10", "faq", 10.0, 20.0, 18.0),
        record(Commodity::Onion, "2024-02-11", "non-faq", 8.0, 12.0, 10.0),
    ];
    let months = monthly_averages(&records, None);
    assert_eq!(months[1].grades.len(), 2);
    assert_eq!(months[1].changes.len(), 1);
    assert!(months[1].changes.contains_key("faq"));
}

#[test]
fn zero_previous_average_skips_change() {
    let records = vec![
        record(Commodity::Potato, "2024-01-10", "faq", 0.0, 0.0, 0.0),
        record(Commodity::Potato, "2024-02-10", "faq", 10.0, 20.0, 15.0),
    ];
    let months = monthly_averages(&records, None);
    assert!(months[1].changes.is_empty());
}

#[test]
fn monthly_report_is_sorted_and_within_bounds() {
    let (sdk, _tmp) = common::setup_sample_sdk();
    let report = sdk
        .periods()
        .monthly(&PriceParams::for_commodity("onion"))
        .unwrap();

    assert_eq!(report.total_months, 24);
    assert_eq!(report.total_data_points, 96);
    assert_eq!(report.date_range.start, common::date("2022-12-31"));

    let keys: Vec<&str> = report.monthly_averages.iter().map(|m| m.month.as_str()).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);

    for month in &report.monthly_averages {
        for avg in month.grades.values() {
            assert!(avg.average_min_price <= avg.average_modal_price);
            assert!(avg.average_modal_price <= avg.average_max_price);
        }
    }

    let feb = &report.monthly_averages[1].changes["faq"];
    assert_eq!(feb.absolute_change, 100.0);
    assert_eq!(feb.percent_change, 9.09);
}

// ---------------------------------------------------------------------------
// Year over year
// ---------------------------------------------------------------------------

#[test]
fn year_over_year_compares_adjacent_years_present() {
    let records = vec![
        record(Commodity::Onion, "2022-03-05", "faq", 0.0, 0.0, 100.0),
        record(Commodity::Onion, "2024-03-05", "faq", 0.0, 0.0, 150.0),
        record(Commodity::Onion, "2024-04-05", "faq", 0.0, 0.0, 90.0),
    ];
    let yoy = year_over_year(&records);

    assert_eq!(yoy.monthly_averages.len(), 3);
    assert_eq!(yoy.yoy_comparisons.len(), 1);
    let march = &yoy.yoy_comparisons[0];
    assert_eq!(march.month, 3);
    assert_eq!(march.comparisons.len(), 1);
    assert_eq!(march.comparisons[0].previous_year, 2022);
    assert_eq!(march.comparisons[0].current_year, 2024);
    assert_eq!(march.comparisons[0].percent_change, Some(50.0));
    assert_eq!(yoy.insights.largest_increases.len(), 1);
    assert!(yoy.insights.largest_decreases.is_empty());
}

#[test]
fn year_over_year_report_uses_actual_data_range() {
    let (sdk, _tmp) = common::setup_sample_sdk();
    let params = PriceParams::for_commodity("onion").between("2000-01-01", "2000-02-01");
    let report = sdk.periods().year_over_year(&params).unwrap();

    assert_eq!(report.date_range.start, common::date("2023-01-01"));
    assert_eq!(report.date_range.end, common::date("2024-12-15"));
    assert_eq!(report.total_data_points, 96);
    assert_eq!(report.analysis.yoy_comparisons.len(), 12);

    let insights = &report.analysis.insights;
    assert_eq!(insights.largest_increases.len(), 5);
    assert!(insights.largest_increases.iter().all(|c| c.absolute_change == 200.0));
    assert_eq!(insights.largest_increases[0].month_name, "January");
    assert_eq!(insights.largest_percent_increases[0].percent_change, Some(20.0));
    assert!(insights.largest_percent_decreases.is_empty());
}

// ---------------------------------------------------------------------------
// Period to period
// ---------------------------------------------------------------------------

#[test]
fn period_analysis_classifies_changes() {
    let (sdk, _tmp) = common::setup_sample_sdk();
    let report = sdk
        .periods()
        .period_analysis(&PriceParams::for_commodity("onion"))
        .unwrap();
    let analysis = &report.analysis;

    assert_eq!(analysis.period_changes.len(), 23);
    let decreases = &analysis.insights.largest_decreases;
    assert_eq!(decreases.len(), 1);
    assert_eq!(decreases[0].current_period, "2024-01");
    assert_eq!(decreases[0].absolute_change, -900.0);
    assert_eq!(decreases[0].change_type, ChangeType::Decrease);

    assert_eq!(analysis.insights.largest_increases.len(), 5);
    assert_eq!(analysis.insights.average_monthly_change, 134.78);
}

#[test]
fn period_analysis_without_previous_price_has_null_percent() {
    let records = vec![
        record(Commodity::Potato, "2024-01-10", "faq", 0.0, 0.0, 0.0),
        record(Commodity::Potato, "2024-02-10", "faq", 0.0, 0.0, 12.0),
        record(Commodity::Potato, "2024-03-10", "faq", 0.0, 0.0, 12.0),
    ];
    let analysis = period_analysis(&records);

    assert_eq!(analysis.period_changes[0].percent_change, None);
    assert_eq!(analysis.period_changes[0].change_type, ChangeType::Increase);
    assert_eq!(analysis.period_changes[1].change_type, ChangeType::Stable);
    assert_eq!(analysis.insights.average_monthly_change, 6.0);
}

#[test]
fn single_month_has_no_period_changes() {
    let records = vec![record(Commodity::Potato, "2024-01-10", "faq", 0.0, 0.0, 5.0)];
    let analysis = period_analysis(&records);
    assert!(analysis.period_changes.is_empty());
    assert_eq!(analysis.insights.average_monthly_change, 0.0);
}
