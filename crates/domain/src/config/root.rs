use serde::{Deserialize, Serialize};
use std::path::Path;

use super::cache::{CacheConfig, MAX_FRESHNESS_WINDOW_SECS};
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::maintenance::MaintenanceConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Root configuration, usually read from a TOML file:
///
/// ```toml
/// [cache]
/// max_age_secs = 172800
/// max_skew_secs = 86400
/// max_intro_points = 10
/// hidden_service_statistics = false
///
/// [maintenance]
/// interval_secs = 60
/// max_allocation_bytes = 0
///
/// [logging]
/// level = "info"
/// safe_logging = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub maintenance: MaintenanceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load from `config_path`, or defaults when no path is given.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = config_path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.max_age_secs == 0 {
            return Err(ConfigError::Validation(
                "cache.max_age_secs must be greater than 0".to_string(),
            ));
        }
        let window = self
            .cache
            .max_age_secs
            .saturating_add(self.cache.max_skew_secs);
        if window > MAX_FRESHNESS_WINDOW_SECS {
            return Err(ConfigError::Validation(format!(
                "cache.max_age_secs + cache.max_skew_secs must not exceed {MAX_FRESHNESS_WINDOW_SECS} (got {window})"
            )));
        }
        if self.cache.max_intro_points == 0 {
            return Err(ConfigError::Validation(
                "cache.max_intro_points must be at least 1".to_string(),
            ));
        }
        if self.maintenance.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "maintenance.interval_secs must be greater than 0".to_string(),
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of trace, debug, info, warn, error (got {:?})",
                self.logging.level
            )));
        }
        Ok(())
    }
}
