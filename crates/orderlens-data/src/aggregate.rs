//! Derived summary tables and range metrics

use crate::models::{DailySummaryRow, OrderRecord, RangeTotals};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

/// Extract the sequence of present review scores, preserving original
/// relative order. An absent column or empty input yields an empty
/// vector, never an error.
pub fn review_scores(orders: &[OrderRecord]) -> Vec<u8> {
    orders
        .iter()
        .filter_map(|record| record.review_score)
        .collect()
}

/// Tally review scores into (score, count) pairs sorted by score
pub fn review_tally(scores: &[u8]) -> Vec<(u8, u32)> {
    let mut counts: HashMap<u8, u32> = HashMap::new();
    for score in scores {
        *counts.entry(*score).or_insert(0) += 1;
    }

    let mut result: Vec<(u8, u32)> = counts.into_iter().collect();
    result.sort_by_key(|(score, _)| *score);

    debug!("Tallied {} distinct review scores", result.len());
    result
}

/// Group orders by the calendar-date component of `order_approved_at`.
///
/// Records with a missing approval timestamp cannot be assigned to a
/// day and are excluded. A missing `payment_value` contributes 0.0 to
/// the day's revenue. Output rows are unique per date and sorted
/// ascending.
pub fn daily_summary(orders: &[OrderRecord]) -> Vec<DailySummaryRow> {
    let mut daily: HashMap<NaiveDate, (u64, f64)> = HashMap::new();

    for record in orders {
        if let Some(approved_at) = record.order_approved_at {
            let entry = daily.entry(approved_at.date()).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += record.payment_value.unwrap_or(0.0);
        }
    }

    let mut result: Vec<DailySummaryRow> = daily
        .into_iter()
        .map(|(date, (order_count, revenue))| DailySummaryRow {
            date,
            order_count,
            revenue,
        })
        .collect();

    result.sort_by_key(|row| row.date);

    debug!("Aggregated {} daily summary rows", result.len());
    result
}

/// Select the rows whose date falls within `start..=end`.
///
/// An inverted range (`start > end`) yields an empty set; that is a
/// defined outcome, not an error.
pub fn filter_range(
    rows: &[DailySummaryRow],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<DailySummaryRow> {
    rows.iter()
        .filter(|row| row.date >= start && row.date <= end)
        .cloned()
        .collect()
}

/// Sum order count and revenue over the rows within `start..=end`.
/// Pure function of its inputs; `(0, 0.0)` when nothing matches.
pub fn compute_totals(rows: &[DailySummaryRow], start: NaiveDate, end: NaiveDate) -> RangeTotals {
    let mut totals = RangeTotals::empty();
    for row in rows {
        if row.date >= start && row.date <= end {
            totals.total_orders += row.order_count;
            totals.total_revenue += row.revenue;
        }
    }
    totals
}
