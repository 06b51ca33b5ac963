//! Record and streak analysis for one grade's date-ordered price series.
//!
//! Every function here expects its input already filtered to a single grade
//! and sorted ascending by date; grouping happens in the query layer.

use crate::analytics::stats::{
    mean, modal_prices, percent_change, population_std_dev, round2, top_n_by,
};
use crate::config;
use crate::models::{
    AllTimeRecords, DailyChange, DailyChanges, GradeRecords, ModalExtreme, PriceRecord, PriceType,
    RecordStatistics, Streak, SustainedPeriods, TaggedExtreme,
};

// ---------------------------------------------------------------------------
// All-time extrema
// ---------------------------------------------------------------------------

/// Highest and lowest prices, across all three price types and for the modal
/// price alone.
///
/// Scan order is date order, and within one record modal, then min, then max.
/// A later candidate replaces the current extreme only when strictly better,
/// so ties go to the first candidate in scan order.
pub fn all_time_records(records: &[PriceRecord]) -> Option<AllTimeRecords> {
    let first = records.first()?;

    let mut highest = (first, PriceType::Modal, first.modal_price);
    let mut lowest = highest;
    for record in records {
        for price_type in PriceType::SCAN_ORDER {
            let price = record.price(price_type);
            if price > highest.2 {
                highest = (record, price_type, price);
            }
            if price < lowest.2 {
                lowest = (record, price_type, price);
            }
        }
    }

    let mut highest_modal = first;
    let mut lowest_modal = first;
    for record in records {
        if record.modal_price > highest_modal.modal_price {
            highest_modal = record;
        }
        if record.modal_price < lowest_modal.modal_price {
            lowest_modal = record;
        }
    }

    Some(AllTimeRecords {
        highest_overall: tagged(highest),
        lowest_overall: tagged(lowest),
        highest_modal: modal(highest_modal),
        lowest_modal: modal(lowest_modal),
    })
}

fn tagged((record, price_type, price): (&PriceRecord, PriceType, f64)) -> TaggedExtreme {
    TaggedExtreme {
        price,
        price_type,
        date: record.date,
        record: record.clone(),
    }
}

fn modal(record: &PriceRecord) -> ModalExtreme {
    ModalExtreme {
        price: record.modal_price,
        date: record.date,
        record: record.clone(),
    }
}

// ---------------------------------------------------------------------------
// Step changes
// ---------------------------------------------------------------------------

/// Modal price change between each pair of consecutive records.
///
/// Consecutive means adjacent in the series; calendar gaps are not filled.
pub fn step_changes(records: &[PriceRecord]) -> Vec<DailyChange> {
    records
        .windows(2)
        .map(|pair| {
            let (previous, current) = (&pair[0], &pair[1]);
            DailyChange {
                date: current.date,
                previous_date: previous.date,
                current_price: current.modal_price,
                previous_price: previous.modal_price,
                absolute_change: round2(current.modal_price - previous.modal_price),
                percent_change: percent_change(previous.modal_price, current.modal_price)
                    .map(round2),
            }
        })
        .collect()
}

/// Top-10 increases and decreases, by absolute and by percent change.
///
/// Zero changes appear in none of the lists; changes without a percent value
/// (previous price zero) appear only in the absolute lists.
pub fn daily_changes(records: &[PriceRecord]) -> DailyChanges {
    let changes = step_changes(records);
    let n = config::DAILY_CHANGE_TOP_N;
    let pct = |c: &DailyChange| c.percent_change.unwrap_or(0.0);

    DailyChanges {
        largest_increases: top_n_by(
            filtered(&changes, |c| c.absolute_change > 0.0),
            n,
            true,
            |c| c.absolute_change,
        ),
        largest_decreases: top_n_by(
            filtered(&changes, |c| c.absolute_change < 0.0),
            n,
            false,
            |c| c.absolute_change,
        ),
        largest_percent_increases: top_n_by(
            filtered(&changes, |c| c.percent_change.is_some_and(|p| p > 0.0)),
            n,
            true,
            pct,
        ),
        largest_percent_decreases: top_n_by(
            filtered(&changes, |c| c.percent_change.is_some_and(|p| p < 0.0)),
            n,
            false,
            pct,
        ),
    }
}

fn filtered<F>(changes: &[DailyChange], keep: F) -> Vec<DailyChange>
where
    F: Fn(&DailyChange) -> bool,
{
    changes.iter().filter(|&c| keep(c)).cloned().collect()
}

// ---------------------------------------------------------------------------
// Sustained runs
// ---------------------------------------------------------------------------

/// Runs of at least three consecutive records more than 20% above (high) or
/// below (low) the series average.
///
/// High runs are ranked by peak price descending and low runs by lowest
/// price ascending; each list keeps the top five.
pub fn sustained_periods(records: &[PriceRecord]) -> SustainedPeriods {
    let Some(average) = mean(&modal_prices(records)) else {
        return SustainedPeriods::default();
    };
    let threshold = average * config::STREAK_THRESHOLD_RATIO;
    let (upper, lower) = (average + threshold, average - threshold);

    let high = collect_streaks(records, |p| p > upper, |p, extreme| p > extreme);
    let low = collect_streaks(records, |p| p < lower, |p, extreme| p < extreme);

    SustainedPeriods {
        high_periods: top_n_by(high, config::STREAK_TOP_N, true, |s| s.extreme_price),
        low_periods: top_n_by(low, config::STREAK_TOP_N, false, |s| s.extreme_price),
    }
}

/// Walk the series and close a run whenever `in_run` fails. `more_extreme`
/// decides whether a price replaces the run's current extreme.
fn collect_streaks<I, E>(records: &[PriceRecord], in_run: I, more_extreme: E) -> Vec<Streak>
where
    I: Fn(f64) -> bool,
    E: Fn(f64, f64) -> bool,
{
    let mut streaks = Vec::new();
    let mut open: Option<Streak> = None;

    for record in records {
        let price = record.modal_price;
        if !in_run(price) {
            if let Some(run) = open.take() {
                if run.duration >= config::STREAK_MIN_DURATION {
                    streaks.push(run);
                }
            }
            continue;
        }

        match open.as_mut() {
            None => {
                open = Some(Streak {
                    start_date: record.date,
                    end_date: record.date,
                    start_price: price,
                    end_price: price,
                    extreme_price: price,
                    extreme_date: record.date,
                    duration: 1,
                });
            }
            Some(run) => {
                run.end_date = record.date;
                run.end_price = price;
                run.duration += 1;
                if more_extreme(price, run.extreme_price) {
                    run.extreme_price = price;
                    run.extreme_date = record.date;
                }
            }
        }
    }

    if let Some(run) = open {
        if run.duration >= config::STREAK_MIN_DURATION {
            streaks.push(run);
        }
    }
    streaks
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Average, modal range and population volatility of the series.
pub fn statistics(records: &[PriceRecord]) -> Option<RecordStatistics> {
    let prices = modal_prices(records);
    let average = mean(&prices)?;
    let volatility = population_std_dev(&prices)?;
    let highest = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lowest = prices.iter().copied().fold(f64::INFINITY, f64::min);

    Some(RecordStatistics {
        average_price: round2(average),
        total_data_points: prices.len(),
        price_range: round2(highest - lowest),
        volatility: round2(volatility),
    })
}

/// Full record analysis for one grade. `None` for an empty series.
pub fn analyze_grade(records: &[PriceRecord]) -> Option<GradeRecords> {
    Some(GradeRecords {
        all_time_records: all_time_records(records)?,
        daily_changes: daily_changes(records),
        sustained_periods: sustained_periods(records),
        statistics: statistics(records)?,
    })
}
