//! Configuration module for the rend cache
//!
//! This module contains all configuration structures organized by concern:
//! - `root`: Main configuration, file loading and validation
//! - `cache`: Descriptor freshness and intro-point limits
//! - `maintenance`: Periodic housekeeping and allocation budget
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod cache;
pub mod errors;
pub mod logging;
pub mod maintenance;
pub mod root;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use maintenance::MaintenanceConfig;
pub use root::Config;
