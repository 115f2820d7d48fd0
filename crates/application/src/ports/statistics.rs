use tracing::trace;

/// Fire-and-forget sink for hidden service statistics.
pub trait StatisticsSink: Send + Sync {
    /// A descriptor for a possibly new service was stored as directory.
    fn notify_new_service(&self, public_key: &[u8]);
}

/// Sink used when statistics collection is not wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStatisticsSink;

impl StatisticsSink for NoopStatisticsSink {
    fn notify_new_service(&self, public_key: &[u8]) {
        trace!(key_len = public_key.len(), "Statistics sink disabled, dropping notification");
    }
}
