use super::allocation::AllocationTracker;
use super::client::{ClientCache, ClientStoreRequest};
use super::context::{CacheContext, Collaborators};
use super::directory::{DirectoryCache, EvictionReport};
use super::entry::CacheEntry;
use super::status::{ClientStoreStatus, DirStoreStatus, Lookup};
use rend_cache_domain::{CacheConfig, Config};
use tracing::{debug, info};

/// Point-in-time counters of a [`RendCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub directory_entries: usize,
    pub client_entries: usize,
    pub total_allocation: usize,
}

/// Owner of both descriptor caches and the allocation counter they share.
///
/// Not internally synchronized. Share it as `Arc<Mutex<RendCache>>` when
/// more than one task needs it.
pub struct RendCache {
    config: CacheConfig,
    safe_logging: bool,
    collaborators: Collaborators,
    directory: DirectoryCache,
    client: ClientCache,
    allocation: AllocationTracker,
}

impl RendCache {
    pub fn init(config: &Config, collaborators: Collaborators) -> Self {
        info!(
            max_age_secs = config.cache.max_age_secs,
            max_skew_secs = config.cache.max_skew_secs,
            max_intro_points = config.cache.max_intro_points,
            "Initializing hidden service descriptor caches"
        );
        Self {
            config: config.cache.clone(),
            safe_logging: config.logging.safe_logging,
            collaborators,
            directory: DirectoryCache::new(),
            client: ClientCache::new(),
            allocation: AllocationTracker::new(),
        }
    }

    /// Release every entry of both caches and zero the allocation counter.
    ///
    /// Calling it again is a no-op; the caches stay usable and empty.
    pub fn free_all(&mut self) {
        let directory = self.directory.free_all(&mut self.allocation);
        let client = self.client.free_all(&mut self.allocation);
        self.allocation.reset();
        debug!(directory, client, "Freed all hidden service descriptor caches");
    }

    /// Drop every descriptor fetched as client.
    pub fn purge(&mut self) {
        self.client.purge(&mut self.allocation);
    }

    /// Drop every descriptor stored as directory.
    pub fn purge_directory(&mut self) {
        self.directory.purge(&mut self.allocation);
    }

    pub fn lookup_dir(&mut self, desc_id: &str, now: i64) -> Lookup<&str> {
        let ctx = CacheContext::new(&self.config, &self.collaborators, self.safe_logging);
        self.directory.lookup(desc_id, now, &ctx)
    }

    pub fn store_dir(&mut self, raw_blob: &str, now: i64) -> DirStoreStatus {
        let ctx = CacheContext::new(&self.config, &self.collaborators, self.safe_logging);
        self.directory.store_batch(raw_blob, now, &ctx, &mut self.allocation)
    }

    pub fn lookup_client(&self, service_id: &str, version: u8) -> Lookup<&CacheEntry> {
        let ctx = CacheContext::new(&self.config, &self.collaborators, self.safe_logging);
        self.client.lookup(service_id, version, &ctx)
    }

    pub fn store_client(
        &mut self,
        request: &ClientStoreRequest<'_>,
        now: i64,
    ) -> ClientStoreStatus<'_> {
        let ctx = CacheContext::new(&self.config, &self.collaborators, self.safe_logging);
        self.client.store(request, now, &ctx, &mut self.allocation)
    }

    /// Remove expired client descriptors. Returns how many were removed.
    pub fn clean_client(&mut self, now: i64) -> usize {
        let ctx = CacheContext::new(&self.config, &self.collaborators, self.safe_logging);
        self.client.clean_expired(now, &ctx, &mut self.allocation)
    }

    /// Remove expired directory descriptors. Returns how many were removed.
    pub fn clean_dir_expired(&mut self, now: i64) -> usize {
        let ctx = CacheContext::new(&self.config, &self.collaborators, self.safe_logging);
        self.directory.clean_expired(now, &ctx, &mut self.allocation)
    }

    /// See [`DirectoryCache::evict_under_pressure`].
    pub fn evict_dir_under_pressure(&mut self, now: i64, target_bytes: usize) -> EvictionReport {
        let ctx = CacheContext::new(&self.config, &self.collaborators, self.safe_logging);
        self.directory
            .evict_under_pressure(now, target_bytes, &ctx, &mut self.allocation)
    }

    #[inline]
    pub fn total_allocation(&self) -> usize {
        self.allocation.total()
    }

    pub fn allocation(&self) -> &AllocationTracker {
        &self.allocation
    }

    pub fn directory(&self) -> &DirectoryCache {
        &self.directory
    }

    pub fn client(&self) -> &ClientCache {
        &self.client
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            directory_entries: self.directory.len(),
            client_entries: self.client.len(),
            total_allocation: self.allocation.total(),
        }
    }
}
