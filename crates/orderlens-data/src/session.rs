//! Session state owning the loaded dataset and its derived tables

use crate::aggregate::{compute_totals, daily_summary, review_scores, review_tally};
use crate::loader::load_orders;
use crate::models::{DailySummaryRow, OrderRecord, RangeTotals};
use chrono::NaiveDate;
use orderlens_common::Result;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Explicit owner of the loaded dataset and both derived tables.
///
/// Constructed once at startup; the derived tables are computed at load
/// time and held for the lifetime of the session. Per-interaction work
/// only re-runs the range filter — never the loader or aggregations.
#[derive(Debug)]
pub struct DashboardSession {
    dataset_path: PathBuf,
    orders: Vec<OrderRecord>,
    scores: Vec<u8>,
    daily: Vec<DailySummaryRow>,
}

impl DashboardSession {
    /// Load the dataset and compute both derived tables
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let dataset_path = path.as_ref().to_path_buf();
        let orders = load_orders(&dataset_path)?;
        let scores = review_scores(&orders);
        let daily = daily_summary(&orders);

        info!(
            "Session ready: {} orders, {} review scores, {} distinct days",
            orders.len(),
            scores.len(),
            daily.len()
        );

        Ok(Self {
            dataset_path,
            orders,
            scores,
            daily,
        })
    }

    /// Re-run the loader and both aggregations from scratch
    pub fn reload(&mut self) -> Result<()> {
        let fresh = Self::load(&self.dataset_path)?;
        *self = fresh;
        Ok(())
    }

    /// Number of loaded order records
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Grouped review score counts, ready for chart rendering.
    /// Empty when the review column is absent from the source.
    pub fn review_tally(&self) -> Vec<(u8, u32)> {
        review_tally(&self.scores)
    }

    /// The full daily summary projected to (date, order_count) for a
    /// time-series chart
    pub fn daily_series(&self) -> Vec<(NaiveDate, u64)> {
        self.daily
            .iter()
            .map(|row| (row.date, row.order_count))
            .collect()
    }

    /// The full daily summary table
    pub fn daily_rows(&self) -> &[DailySummaryRow] {
        &self.daily
    }

    /// Totals over the inclusive date range
    pub fn compute_totals(&self, start: NaiveDate, end: NaiveDate) -> RangeTotals {
        compute_totals(&self.daily, start, end)
    }

    /// Earliest date in the daily summary; `None` when the table is empty
    pub fn min_date(&self) -> Option<NaiveDate> {
        self.daily.first().map(|row| row.date)
    }

    /// Latest date in the daily summary; `None` when the table is empty
    pub fn max_date(&self) -> Option<NaiveDate> {
        self.daily.last().map(|row| row.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn session_from(content: &str) -> (tempfile::NamedTempFile, DashboardSession) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        let session = DashboardSession::load(file.path()).unwrap();
        (file, session)
    }

    #[test]
    fn test_session_derives_both_tables() {
        let (_file, session) = session_from(
            "order_id,order_approved_at,payment_value,review_score\n\
             a1,2024-01-01 10:00:00,100.0,5.0\n\
             a2,2024-01-01 15:00:00,50.0,\n\
             a3,2024-01-02 09:00:00,30.0,4.0\n",
        );

        assert_eq!(session.order_count(), 3);
        assert_eq!(session.review_tally(), vec![(4, 1), (5, 1)]);
        assert_eq!(session.daily_series().len(), 2);

        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let totals = session.compute_totals(start, start);
        assert_eq!(totals.total_orders, 2);
        assert_eq!(totals.total_revenue, 150.0);
    }

    #[test]
    fn test_date_bounds() {
        let (_file, session) = session_from(
            "order_id,order_approved_at,payment_value\n\
             a1,2024-01-05 10:00:00,1.0\n\
             a2,2024-03-01 10:00:00,2.0\n",
        );

        assert_eq!(session.min_date(), NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(session.max_date(), NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_empty_dataset_has_no_bounds() {
        let (_file, session) =
            session_from("order_id,order_approved_at,payment_value\n");

        assert_eq!(session.min_date(), None);
        assert_eq!(session.max_date(), None);
        assert!(session.review_tally().is_empty());
        assert!(session.daily_series().is_empty());
    }

    #[test]
    fn test_missing_file_fails_load() {
        assert!(DashboardSession::load("/nonexistent/data.csv").is_err());
    }

    #[test]
    fn test_reload_rereads_dataset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "order_id,order_approved_at,payment_value\n\
             a1,2024-01-01 10:00:00,1.0\n"
        )
        .unwrap();
        file.flush().unwrap();

        let mut session = DashboardSession::load(file.path()).unwrap();
        assert_eq!(session.order_count(), 1);

        write!(file, "a2,2024-01-02 10:00:00,2.0\n").unwrap();
        file.flush().unwrap();

        session.reload().unwrap();
        assert_eq!(session.order_count(), 2);
    }
}
