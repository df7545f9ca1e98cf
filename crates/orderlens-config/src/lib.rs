//! Configuration management for the Orderlens dashboard

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{ChartsConfig, Config, DatasetConfig, LoggingSettings};
