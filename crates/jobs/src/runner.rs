use crate::CacheMaintenanceJob;
use std::sync::Arc;
use tracing::info;

/// Central orchestrator for all background jobs.
///
/// Use the builder pattern to register jobs, then call `.start()` once.
///
/// # Example
///
/// ```rust,ignore
/// JobRunner::new()
///     .with_maintenance(CacheMaintenanceJob::new(cache, &config.maintenance))
///     .start()
///     .await;
/// ```
pub struct JobRunner {
    maintenance: Option<CacheMaintenanceJob>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self { maintenance: None }
    }

    pub fn with_maintenance(mut self, job: CacheMaintenanceJob) -> Self {
        self.maintenance = Some(job);
        self
    }

    /// Start all registered background jobs.
    pub async fn start(self) {
        info!("Starting background job runner");

        if let Some(job) = self.maintenance {
            Arc::new(job).start().await;
        }

        info!("All background jobs started");
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
