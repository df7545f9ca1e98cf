//! Application configuration structures

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Config {
    /// Source dataset configuration
    #[validate]
    pub dataset: DatasetConfig,

    /// Chart rendering settings
    #[validate]
    pub charts: ChartsConfig,

    /// Logging configuration
    #[validate]
    pub logging: LoggingSettings,
}

/// Source dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DatasetConfig {
    /// Path to the order dataset CSV file
    #[validate(length(min = 1, message = "Dataset path cannot be empty"))]
    pub path: String,
}

/// Chart rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChartsConfig {
    /// Chart width in pixels
    #[validate(range(min = 100, max = 4000, message = "Width must be between 100 and 4000 pixels"))]
    pub width: u32,

    /// Chart height in pixels
    #[validate(range(min = 100, max = 4000, message = "Height must be between 100 and 4000 pixels"))]
    pub height: u32,

    /// Directory where rendered chart images are written
    #[validate(length(min = 1, message = "Output directory cannot be empty"))]
    pub output_dir: String,

    /// Background color (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Background color must be a valid hex color"))]
    pub background_color: String,

    /// Primary color for chart series (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Primary color must be a valid hex color"))]
    pub primary_color: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingSettings {
    /// Log level filter
    #[validate(custom(function = "crate::validation::validate_log_level", message = "Invalid log level"))]
    pub level: String,

    /// Optional log file path
    pub file: Option<String>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: "data/all_data.csv".to_string(),
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            output_dir: "charts".to_string(),
            background_color: "#FFFFFF".to_string(),
            primary_color: "#1F77B4".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            charts: ChartsConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Config {
    /// Validate the entire configuration tree
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()
    }
}
