//! Configuration loading utilities

use crate::Config;
use orderlens_common::Result as DashboardResult;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for orderlens_common::DashboardError {
    fn from(err: ConfigError) -> Self {
        orderlens_common::DashboardError::config(err.to_string())
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate_all().map_err(ConfigError::ValidationError)?;

        debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load configuration from environment variables and files
    pub fn load() -> DashboardResult<Config> {
        let config = if let Ok(config_path) = env::var("ORDERLENS_CONFIG_PATH") {
            Self::load_config(&config_path)?
        } else if Path::new("orderlens.yaml").exists() {
            Self::load_config("orderlens.yaml")?
        } else if Path::new("orderlens.yml").exists() {
            Self::load_config("orderlens.yml")?
        } else {
            // No config file found, use defaults with env overrides
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config)?;
            config.validate_all().map_err(ConfigError::ValidationError)?;
            config
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DashboardResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        if let Ok(path) = env::var("ORDERLENS_DATASET_PATH") {
            config.dataset.path = path;
        }

        if let Ok(dir) = env::var("ORDERLENS_OUTPUT_DIR") {
            config.charts.output_dir = dir;
        }

        if let Ok(width) = env::var("ORDERLENS_CHART_WIDTH") {
            config.charts.width = width.parse().map_err(|e| ConfigError::EnvParseError {
                var: "ORDERLENS_CHART_WIDTH".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Ok(height) = env::var("ORDERLENS_CHART_HEIGHT") {
            config.charts.height = height.parse().map_err(|e| ConfigError::EnvParseError {
                var: "ORDERLENS_CHART_HEIGHT".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Ok(level) = env::var("ORDERLENS_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_valid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r##"
dataset:
  path: "data/orders.csv"
charts:
  width: 1200
  height: 700
  output_dir: "out"
  background_color: "#F8F9FA"
  primary_color: "#E6194B"
logging:
  level: "debug"
"##
        )
        .unwrap();

        let config = ConfigLoader::load_config(file.path()).unwrap();
        assert_eq!(config.dataset.path, "data/orders.csv");
        assert_eq!(config.charts.width, 1200);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "dataset: [not, a, mapping").unwrap();

        assert!(ConfigLoader::load_config(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = ConfigLoader::load_config("/nonexistent/orderlens.yaml");
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r##"
dataset:
  path: ""
charts:
  width: 1000
  height: 600
  output_dir: "charts"
  background_color: "#FFFFFF"
  primary_color: "#1F77B4"
logging:
  level: "info"
"##
        )
        .unwrap();

        let result = ConfigLoader::load_config(file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
