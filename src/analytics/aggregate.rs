//! Calendar aggregation: monthly averages by grade, month-over-month deltas,
//! year-over-year comparisons and period-to-period changes.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::analytics::stats::{mean, month_name, percent_change, round2, top_n_by};
use crate::config;
use crate::models::{
    ChangeType, GradeAverage, MonthComparisons, MonthlyAverage, PeriodAnalysis, PeriodAverage,
    PeriodChange, PeriodInsights, PriceChange, PriceRecord, YearMonthAverage, YearOverYear,
    YoyComparison, YoyInsights,
};

// ---------------------------------------------------------------------------
// Accumulator
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy)]
struct PriceSums {
    modal: f64,
    min: f64,
    max: f64,
    count: usize,
}

impl PriceSums {
    fn push(&mut self, record: &PriceRecord) {
        self.modal += record.modal_price;
        self.min += record.min_price;
        self.max += record.max_price;
        self.count += 1;
    }

    fn average(&self) -> Option<GradeAverage> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        let (avg_modal, avg_min, avg_max) = (self.modal / n, self.min / n, self.max / n);
        Some(GradeAverage {
            average_modal_price: round2(avg_modal),
            average_min_price: round2(avg_min),
            average_max_price: round2(avg_max),
            data_points: self.count,
            price_range: round2(avg_max - avg_min),
        })
    }

    fn average_modal(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(round2(self.modal / self.count as f64))
    }
}

// ---------------------------------------------------------------------------
// Monthly averages
// ---------------------------------------------------------------------------

/// Average prices per calendar month and grade, ascending by month.
///
/// With `grade_override` every record is counted under that grade instead of
/// its own. Each month after the first carries the change of each grade's
/// average modal price versus the preceding month in the sequence; a grade
/// absent from the preceding month (or priced at zero there) has no entry.
pub fn monthly_averages(
    records: &[PriceRecord],
    grade_override: Option<&str>,
) -> Vec<MonthlyAverage> {
    let mut buckets: BTreeMap<(i32, u32), BTreeMap<String, PriceSums>> = BTreeMap::new();
    for record in records {
        let grade = grade_override.unwrap_or(&record.grade);
        buckets
            .entry((record.date.year(), record.date.month()))
            .or_default()
            .entry(grade.to_string())
            .or_default()
            .push(record);
    }

    let mut out: Vec<MonthlyAverage> = Vec::with_capacity(buckets.len());
    for ((year, month), sums) in buckets {
        let grades: BTreeMap<String, GradeAverage> = sums
            .into_iter()
            .filter_map(|(grade, s)| s.average().map(|avg| (grade, avg)))
            .collect();

        let changes = match out.last() {
            Some(previous) => month_over_month(&previous.grades, &grades),
            None => BTreeMap::new(),
        };

        out.push(MonthlyAverage {
            month: format!("{}-{:02}", year, month),
            year,
            month_name: month_name(month),
            grades,
            changes,
        });
    }
    out
}

fn month_over_month(
    previous: &BTreeMap<String, GradeAverage>,
    current: &BTreeMap<String, GradeAverage>,
) -> BTreeMap<String, PriceChange> {
    let mut changes = BTreeMap::new();
    for (grade, cur) in current {
        let Some(prev) = previous.get(grade) else {
            continue;
        };
        let Some(pct) = percent_change(prev.average_modal_price, cur.average_modal_price) else {
            continue;
        };
        changes.insert(
            grade.clone(),
            PriceChange {
                absolute_change: round2(cur.average_modal_price - prev.average_modal_price),
                percent_change: round2(pct),
            },
        );
    }
    changes
}

// ---------------------------------------------------------------------------
// Year over year
// ---------------------------------------------------------------------------

/// Compare each calendar month against the same month in the previous year
/// present in the data.
///
/// Years need not be consecutive: with data for 2022 and 2024 only, March
/// 2024 is compared against March 2022.
pub fn year_over_year(records: &[PriceRecord]) -> YearOverYear {
    let mut buckets: BTreeMap<(i32, u32), PriceSums> = BTreeMap::new();
    for record in records {
        buckets
            .entry((record.date.year(), record.date.month()))
            .or_default()
            .push(record);
    }

    let monthly_averages: Vec<YearMonthAverage> = buckets
        .into_iter()
        .filter_map(|((year, month), sums)| {
            sums.average_modal().map(|average_price| YearMonthAverage {
                year,
                month,
                month_name: month_name(month),
                average_price,
                data_points: sums.count,
            })
        })
        .collect();

    let mut yoy_comparisons = Vec::new();
    let mut all_changes: Vec<YoyComparison> = Vec::new();

    for month in 1..=12u32 {
        let series: Vec<&YearMonthAverage> =
            monthly_averages.iter().filter(|a| a.month == month).collect();
        if series.len() < 2 {
            continue;
        }

        let comparisons: Vec<YoyComparison> = series
            .windows(2)
            .map(|pair| {
                let (previous, current) = (pair[0], pair[1]);
                YoyComparison {
                    previous_year: previous.year,
                    current_year: current.year,
                    previous_price: previous.average_price,
                    current_price: current.average_price,
                    absolute_change: round2(current.average_price - previous.average_price),
                    percent_change: percent_change(previous.average_price, current.average_price)
                        .map(round2),
                    month_name: month_name(month),
                }
            })
            .collect();

        all_changes.extend(comparisons.iter().cloned());
        yoy_comparisons.push(MonthComparisons {
            month,
            month_name: month_name(month),
            comparisons,
        });
    }

    YearOverYear {
        monthly_averages,
        yoy_comparisons,
        insights: yoy_insights(all_changes),
    }
}

fn yoy_insights(all: Vec<YoyComparison>) -> YoyInsights {
    let n = config::YOY_TOP_N;
    let pct = |c: &YoyComparison| c.percent_change.unwrap_or(0.0);

    YoyInsights {
        largest_increases: top_n_by(
            all.iter().filter(|c| c.absolute_change > 0.0).cloned().collect(),
            n,
            true,
            |c| c.absolute_change,
        ),
        largest_decreases: top_n_by(
            all.iter().filter(|c| c.absolute_change < 0.0).cloned().collect(),
            n,
            false,
            |c| c.absolute_change,
        ),
        largest_percent_increases: top_n_by(
            all.iter()
                .filter(|c| c.percent_change.is_some_and(|p| p > 0.0))
                .cloned()
                .collect(),
            n,
            true,
            pct,
        ),
        largest_percent_decreases: top_n_by(
            all.iter()
                .filter(|c| c.percent_change.is_some_and(|p| p < 0.0))
                .cloned()
                .collect(),
            n,
            false,
            pct,
        ),
    }
}

// ---------------------------------------------------------------------------
// Period to period
// ---------------------------------------------------------------------------

/// Average modal price per calendar month across all grades.
pub fn period_averages(records: &[PriceRecord]) -> Vec<PeriodAverage> {
    let mut buckets: BTreeMap<(i32, u32), PriceSums> = BTreeMap::new();
    for record in records {
        buckets
            .entry((record.date.year(), record.date.month()))
            .or_default()
            .push(record);
    }

    buckets
        .into_iter()
        .filter_map(|((year, month), sums)| {
            sums.average_modal().map(|average_price| PeriodAverage {
                month: format!("{}-{:02}", year, month),
                average_price,
                data_points: sums.count,
            })
        })
        .collect()
}

/// Month-to-month changes of the all-grade average modal price.
pub fn period_analysis(records: &[PriceRecord]) -> PeriodAnalysis {
    let averages = period_averages(records);

    let period_changes: Vec<PeriodChange> = averages
        .windows(2)
        .map(|pair| {
            let (previous, current) = (&pair[0], &pair[1]);
            let change = current.average_price - previous.average_price;
            PeriodChange {
                current_period: current.month.clone(),
                previous_period: previous.month.clone(),
                current_price: current.average_price,
                previous_price: previous.average_price,
                absolute_change: round2(change),
                percent_change: percent_change(previous.average_price, current.average_price)
                    .map(round2),
                change_type: ChangeType::of(change),
            }
        })
        .collect();

    let n = config::PERIOD_TOP_N;
    let largest_increases = top_n_by(
        period_changes
            .iter()
            .filter(|c| c.absolute_change > 0.0)
            .cloned()
            .collect(),
        n,
        true,
        |c| c.absolute_change,
    );
    let largest_decreases = top_n_by(
        period_changes
            .iter()
            .filter(|c| c.absolute_change < 0.0)
            .cloned()
            .collect(),
        n,
        false,
        |c| c.absolute_change,
    );

    let magnitudes: Vec<f64> = period_changes.iter().map(|c| c.absolute_change.abs()).collect();
    let average_monthly_change = mean(&magnitudes).map(round2).unwrap_or(0.0);

    PeriodAnalysis {
        period_changes,
        insights: PeriodInsights {
            largest_increases,
            largest_decreases,
            average_monthly_change,
        },
    }
}
