//! Dataset loading, aggregation and range metrics for the Orderlens dashboard

pub mod aggregate;
pub mod loader;
pub mod models;
pub mod session;

// Re-export commonly used types
pub use aggregate::{
    compute_totals, daily_summary, filter_range, review_scores, review_tally,
};
pub use loader::load_orders;
pub use models::{DailySummaryRow, OrderRecord, RangeTotals};
pub use session::DashboardSession;
