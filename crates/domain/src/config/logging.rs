use serde::{Deserialize, Serialize};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (default: "info")
    /// Options: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Scrub service and descriptor ids from log output (default: true)
    #[serde(default = "default_safe_logging")]
    pub safe_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            safe_logging: default_safe_logging(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_safe_logging() -> bool {
    true
}
