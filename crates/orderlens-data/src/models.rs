//! Order dataset types

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One transaction row from the source dataset.
///
/// Every attribute that can be absent or unparseable in the source is
/// an explicit `Option`; a `None` is "missing", never a sentinel value.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,

    #[serde(default, deserialize_with = "crate::loader::de_opt_datetime")]
    pub order_purchase_timestamp: Option<NaiveDateTime>,

    #[serde(default, deserialize_with = "crate::loader::de_opt_datetime")]
    pub order_approved_at: Option<NaiveDateTime>,

    #[serde(default, deserialize_with = "crate::loader::de_opt_f64")]
    pub payment_value: Option<f64>,

    #[serde(default, deserialize_with = "crate::loader::de_opt_score")]
    pub review_score: Option<u8>,
}

/// Per-calendar-day aggregate of order count and revenue.
///
/// Dates are unique within a summary table and the table is kept in
/// ascending date order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummaryRow {
    pub date: NaiveDate,
    pub order_count: u64,
    pub revenue: f64,
}

/// Totals over an inclusive date range of daily summary rows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeTotals {
    pub total_orders: u64,
    pub total_revenue: f64,
}

impl RangeTotals {
    /// The defined empty-range outcome
    pub fn empty() -> Self {
        Self {
            total_orders: 0,
            total_revenue: 0.0,
        }
    }
}
