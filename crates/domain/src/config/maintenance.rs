use serde::{Deserialize, Serialize};

/// Periodic cache housekeeping configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MaintenanceConfig {
    /// Seconds between two housekeeping runs (default: 60)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Approximate byte budget for both caches. When exceeded, the directory
    /// cache is asked to free the excess. 0 disables the budget.
    #[serde(default)]
    pub max_allocation_bytes: usize,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            max_allocation_bytes: 0,
        }
    }
}

fn default_interval_secs() -> u64 {
    60
}
