//! Chart generation and rendering for the Orderlens dashboard

pub mod daily_orders;
pub mod renderer;
pub mod review_distribution;
pub mod types;

pub use daily_orders::{DailyOrdersChart, DailySeriesPoint};
pub use renderer::ChartRenderer;
pub use review_distribution::ReviewDistributionChart;
pub use types::*;
