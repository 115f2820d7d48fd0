use serde::{Deserialize, Serialize};

/// Default maximum descriptor age: two days.
pub const DEFAULT_MAX_AGE_SECS: u64 = 2 * 24 * 60 * 60;

/// Default tolerated clock skew: one day.
pub const DEFAULT_MAX_SKEW_SECS: u64 = 24 * 60 * 60;

/// Upper bound on `max_age_secs + max_skew_secs`: one year.
pub const MAX_FRESHNESS_WINDOW_SECS: u64 = 365 * 24 * 60 * 60;

/// Default upper bound on introduction points per descriptor.
pub const DEFAULT_MAX_INTRO_POINTS: usize = 10;

/// Descriptor cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Descriptors published longer ago than `max_age + max_skew` are stale
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,

    /// Tolerated clock skew in both directions
    #[serde(default = "default_max_skew_secs")]
    pub max_skew_secs: u64,

    /// Descriptors listing more introduction points are rejected
    /// (guard enumeration / resource exhaustion)
    #[serde(default = "default_max_intro_points")]
    pub max_intro_points: usize,

    /// Report first-time stored services to the statistics sink
    #[serde(default)]
    pub hidden_service_statistics: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_age_secs: default_max_age_secs(),
            max_skew_secs: default_max_skew_secs(),
            max_intro_points: default_max_intro_points(),
            hidden_service_statistics: false,
        }
    }
}

fn default_max_age_secs() -> u64 {
    DEFAULT_MAX_AGE_SECS
}

fn default_max_skew_secs() -> u64 {
    DEFAULT_MAX_SKEW_SECS
}

fn default_max_intro_points() -> usize {
    DEFAULT_MAX_INTRO_POINTS
}
