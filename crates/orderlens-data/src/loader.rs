//! Dataset loading with tolerant per-field coercion

use crate::models::OrderRecord;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use orderlens_common::{DashboardError, Result};
use serde::{Deserialize, Deserializer};
use std::path::Path;
use tracing::{debug, info, warn};

/// Load the order dataset from a CSV file.
///
/// The returned records are sorted ascending by `order_approved_at`;
/// records with a missing approval timestamp sort first (the natural
/// ordering of `Option`, where `None < Some`).
///
/// A missing or unreadable file is fatal and surfaces as
/// [`DashboardError::DataUnavailable`]. Malformed individual rows are
/// skipped with a warning and never abort the load.
pub fn load_orders<P: AsRef<Path>>(path: P) -> Result<Vec<OrderRecord>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        DashboardError::data_unavailable_with_source(
            path.display().to_string(),
            "failed to open dataset",
            e,
        )
    })?;

    let mut orders = Vec::new();
    let mut skipped = 0usize;

    for (line, result) in reader.deserialize::<OrderRecord>().enumerate() {
        match result {
            Ok(record) => orders.push(record),
            Err(e) => {
                warn!("Skipping malformed record at row {}: {}", line + 2, e);
                skipped += 1;
            }
        }
    }

    orders.sort_by_key(|record| record.order_approved_at);

    info!(
        "Loaded {} order records from {} ({} skipped)",
        orders.len(),
        path.display(),
        skipped
    );
    Ok(orders)
}

/// Deserialize an optional timestamp field.
///
/// Accepts `%Y-%m-%d %H:%M:%S` and date-only `%Y-%m-%d`; anything else
/// (including an empty or absent value) becomes `None`.
pub(crate) fn de_opt_datetime<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().map(str::trim).and_then(parse_datetime))
}

/// Deserialize an optional numeric field, tolerating malformed values
pub(crate) fn de_opt_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite()))
}

/// Deserialize an optional review score.
///
/// The source encodes scores as floats (e.g. `5.0`), so parse as f64
/// and round; malformed values and values outside the 1-5 rating
/// scale become `None`.
pub(crate) fn de_opt_score<'de, D>(deserializer: D) -> std::result::Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .map(|v| v.round())
        .filter(|v| (1.0..=5.0).contains(v))
        .map(|v| v as u8))
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    debug!("Unparseable timestamp value: {:?}", value);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_full_dataset() {
        let file = write_csv(
            "order_id,order_purchase_timestamp,order_approved_at,payment_value,review_score\n\
             a1,2024-01-01 09:00:00,2024-01-01 10:00:00,100.0,5.0\n\
             a2,2024-01-01 11:00:00,2024-01-01 12:00:00,50.0,\n\
             a3,2024-01-02 08:00:00,2024-01-02 09:00:00,30.0,4.0\n",
        );

        let orders = load_orders(file.path()).unwrap();
        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0].order_id, "a1");
        assert_eq!(orders[0].payment_value, Some(100.0));
        assert_eq!(orders[0].review_score, Some(5));
        assert_eq!(orders[1].review_score, None);
    }

    #[test]
    fn test_sorted_by_approval_missing_first() {
        let file = write_csv(
            "order_id,order_approved_at,payment_value\n\
             late,2024-02-01 10:00:00,10.0\n\
             missing,,20.0\n\
             early,2024-01-15 10:00:00,30.0\n",
        );

        let orders = load_orders(file.path()).unwrap();
        assert_eq!(orders[0].order_id, "missing");
        assert_eq!(orders[1].order_id, "early");
        assert_eq!(orders[2].order_id, "late");
    }

    #[test]
    fn test_absent_optional_columns() {
        let file = write_csv(
            "order_id,order_approved_at,payment_value\n\
             a1,2024-01-01 10:00:00,100.0\n",
        );

        let orders = load_orders(file.path()).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].review_score, None);
        assert_eq!(orders[0].order_purchase_timestamp, None);
    }

    #[test]
    fn test_malformed_values_become_missing() {
        let file = write_csv(
            "order_id,order_approved_at,payment_value,review_score\n\
             a1,not-a-date,abc,ten\n",
        );

        let orders = load_orders(file.path()).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order_approved_at, None);
        assert_eq!(orders[0].payment_value, None);
        assert_eq!(orders[0].review_score, None);
    }

    #[test]
    fn test_date_only_timestamps_accepted() {
        let file = write_csv(
            "order_id,order_approved_at,payment_value\n\
             a1,2024-01-05,10.0\n",
        );

        let orders = load_orders(file.path()).unwrap();
        let approved = orders[0].order_approved_at.unwrap();
        assert_eq!(approved.date(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn test_missing_file_is_data_unavailable() {
        let result = load_orders("/nonexistent/orders.csv");
        assert!(matches!(
            result,
            Err(DashboardError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn test_empty_file_yields_empty_table() {
        let file = write_csv("order_id,order_approved_at,payment_value\n");
        let orders = load_orders(file.path()).unwrap();
        assert!(orders.is_empty());
    }

    #[test]
    fn test_review_score_float_encoding() {
        let file = write_csv(
            "order_id,order_approved_at,payment_value,review_score\n\
             a1,2024-01-01 10:00:00,10.0,4.0\n\
             a2,2024-01-01 10:00:00,10.0,999\n",
        );

        let orders = load_orders(file.path()).unwrap();
        assert_eq!(orders[0].review_score, Some(4));
        // Out of range scores are treated as missing
        assert_eq!(orders[1].review_score, None);
    }

    #[test]
    fn test_review_score_outside_rating_scale_is_missing() {
        let file = write_csv(
            "order_id,order_approved_at,payment_value,review_score\n\
             a1,2024-01-01 10:00:00,10.0,0.0\n\
             a2,2024-01-01 10:00:00,10.0,6.0\n\
             a3,2024-01-01 10:00:00,10.0,1.0\n\
             a4,2024-01-01 10:00:00,10.0,5.0\n",
        );

        let orders = load_orders(file.path()).unwrap();
        assert_eq!(orders[0].review_score, None);
        assert_eq!(orders[1].review_score, None);
        assert_eq!(orders[2].review_score, Some(1));
        assert_eq!(orders[3].review_score, Some(5));
    }
}
