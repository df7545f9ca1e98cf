//! Common utilities and types for the Orderlens dashboard

pub mod error;
pub mod logging;
pub mod utils;

// Re-export commonly used types
pub use error::{DashboardError, Result};
pub use logging::{init_logging, LoggingConfig};
pub use utils::{format_currency, format_date};
