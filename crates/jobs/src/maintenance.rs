use rend_cache_domain::MaintenanceConfig;
use rend_cache_infrastructure::rendcache::{EvictionReport, RendCache};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// What one maintenance cycle removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaintenanceReport {
    pub client_removed: usize,
    pub eviction: EvictionReport,
}

/// `tokio::time::interval` panics on a zero period.
fn checked_interval(interval_secs: u64) -> u64 {
    if interval_secs == 0 {
        warn!("Maintenance interval of 0s is invalid, using 1s");
        return 1;
    }
    interval_secs
}

/// Periodic housekeeping of the descriptor caches: drops expired client
/// descriptors and sweeps the directory cache, evicting harder while the
/// allocation exceeds `max_allocation_bytes`.
pub struct CacheMaintenanceJob {
    cache: Arc<Mutex<RendCache>>,
    max_allocation_bytes: usize,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheMaintenanceJob {
    pub fn new(cache: Arc<Mutex<RendCache>>, config: &MaintenanceConfig) -> Self {
        Self {
            cache,
            max_allocation_bytes: config.max_allocation_bytes,
            interval_secs: checked_interval(config.interval_secs),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = checked_interval(interval_secs);
        self
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Bytes the directory cache must give back to get under budget.
    fn eviction_target(&self, total_allocation: usize) -> usize {
        if self.max_allocation_bytes == 0 {
            return 0;
        }
        total_allocation.saturating_sub(self.max_allocation_bytes)
    }

    /// Run one housekeeping cycle as of `now` (unix seconds).
    pub fn run_once(&self, now: i64) -> MaintenanceReport {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);

        let client_removed = cache.clean_client(now);
        let target = self.eviction_target(cache.total_allocation());
        let eviction = cache.evict_dir_under_pressure(now, target);

        let stats = cache.stats();
        debug!(
            client_removed,
            dir_removed = eviction.removed,
            target_bytes = target,
            directory_entries = stats.directory_entries,
            client_entries = stats.client_entries,
            total_allocation = stats.total_allocation,
            "Descriptor cache maintenance completed"
        );

        MaintenanceReport {
            client_removed,
            eviction,
        }
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            max_allocation_bytes = self.max_allocation_bytes,
            "Starting descriptor cache maintenance job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CacheMaintenanceJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let report = self.run_once(chrono::Utc::now().timestamp());
                        if report.client_removed > 0 || report.eviction.removed > 0 {
                            info!(
                                client_removed = report.client_removed,
                                dir_removed = report.eviction.removed,
                                bytes_removed = report.eviction.bytes_removed,
                                "Descriptor cache maintenance removed entries"
                            );
                        }
                    }
                }
            }
        });
    }
}
