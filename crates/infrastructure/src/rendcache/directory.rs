//! Descriptor cache used while acting as a hidden service directory.
//!
//! Entries are keyed by descriptor id and only accepted for ids inside the
//! hash-ring interval this node is responsible for. Introduction points are
//! never decrypted or parsed here.

use super::allocation::AllocationTracker;
use super::context::CacheContext;
use super::entry::CacheEntry;
use super::freshness::FreshnessWindow;
use super::status::{DirStoreStatus, Lookup};
use super::sweep;
use rend_cache_application::ports::{ParseMode, ParsedRecord};
use rend_cache_domain::DescriptorId;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use tracing::{debug, info, warn};

/// Every record of a concatenated directory upload starts with this keyword.
pub const RECORD_KEYWORD: &str = "rendezvous-service-descriptor ";

/// How far the "not recently served" cutoff advances per eviction pass.
pub const LAST_SERVED_CUTOFF_STEP: i64 = 1800;

/// A fresh upload is treated as served this many seconds ago, so flooding a
/// directory with new descriptors does not protect them from eviction.
pub const NEW_UPLOAD_SERVED_OFFSET: i64 = 3600;

/// What one call to [`DirectoryCache::evict_under_pressure`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvictionReport {
    pub removed: usize,
    pub bytes_removed: usize,
    pub passes: u32,
}

/// Descriptor-id keyed store for descriptors uploaded to this directory.
#[derive(Debug, Default)]
pub struct DirectoryCache {
    entries: FxHashMap<DescriptorId, CacheEntry>,
}

impl DirectoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inspect an entry without touching its last-served time.
    pub fn get(&self, descriptor_id: &DescriptorId) -> Option<&CacheEntry> {
        self.entries.get(descriptor_id)
    }

    pub fn purge(&mut self, tracker: &mut AllocationTracker) {
        let removed = sweep::free_all(&mut self.entries, tracker);
        info!(removed, "Purging hidden service directory cache");
    }

    pub(crate) fn free_all(&mut self, tracker: &mut AllocationTracker) -> usize {
        sweep::free_all(&mut self.entries, tracker)
    }

    /// Remove every descriptor published before `now - max_age - max_skew`.
    pub fn clean_expired(
        &mut self,
        now: i64,
        ctx: &CacheContext<'_>,
        tracker: &mut AllocationTracker,
    ) -> usize {
        let window = FreshnessWindow::new(now, ctx.config);
        let swept = sweep::remove_where(&mut self.entries, tracker, |_, entry| {
            window.is_stale(entry.timestamp())
        });
        if !swept.keys.is_empty() {
            debug!(
                removed = swept.keys.len(),
                bytes = swept.bytes,
                "Removed expired directory descriptors"
            );
        }
        swept.keys.len()
    }

    /// Remove stale, unserved and no-longer-responsible descriptors, trying
    /// to free at least `target_bytes`.
    ///
    /// The first pass removes entries that are too old, were last served
    /// before the age cutoff, or fall outside our responsibility. While
    /// fewer than `target_bytes` have been removed, the last-served cutoff
    /// moves forward by [`LAST_SERVED_CUTOFF_STEP`] and the sweep repeats,
    /// until the cutoff would pass `now`.
    pub fn evict_under_pressure(
        &mut self,
        now: i64,
        target_bytes: usize,
        ctx: &CacheContext<'_>,
        tracker: &mut AllocationTracker,
    ) -> EvictionReport {
        let cutoff = FreshnessWindow::new(now, ctx.config).oldest();
        let oracle = &ctx.collaborators.oracle;
        let mut last_served_cutoff = cutoff;
        let mut report = EvictionReport::default();

        loop {
            report.passes = report.passes.saturating_add(1);
            let swept = sweep::remove_where(&mut self.entries, tracker, |id, entry| {
                entry.timestamp() < cutoff
                    || entry.last_served() < last_served_cutoff
                    || !oracle.is_responsible(id)
            });

            for id in &swept.keys {
                info!(
                    desc_id = %ctx.safe(&id.to_base32()),
                    "Removing descriptor from cache"
                );
            }
            report.removed += swept.keys.len();
            report.bytes_removed = report.bytes_removed.saturating_add(swept.bytes);

            if report.bytes_removed >= target_bytes || self.entries.is_empty() {
                break;
            }
            match last_served_cutoff.checked_add(LAST_SERVED_CUTOFF_STEP) {
                Some(next) if next <= now => last_served_cutoff = next,
                _ => break,
            }
        }

        debug!(
            removed = report.removed,
            bytes_removed = report.bytes_removed,
            target_bytes,
            passes = report.passes,
            "Directory cache eviction finished"
        );
        report
    }

    /// Look up a descriptor by its base32 id and mark it as served at `now`.
    pub fn lookup(&mut self, desc_id: &str, now: i64, ctx: &CacheContext<'_>) -> Lookup<&str> {
        let id = match DescriptorId::from_base32(desc_id) {
            Ok(id) => id,
            Err(err) => {
                warn!(
                    desc_id = %ctx.safe(desc_id),
                    error = %err,
                    "Rejecting v2 rendezvous descriptor request: malformed descriptor ID"
                );
                return Lookup::InvalidId;
            }
        };

        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.mark_served(now);
                Lookup::Found(entry.raw())
            }
            None => Lookup::NotFound,
        }
    }

    /// Parse and store every descriptor of a (possibly concatenated) upload.
    ///
    /// Records we are not responsible for, stale or future-dated records,
    /// and records older than or identical to the cached one are skipped:
    /// they count as parsed but not stored.
    pub fn store_batch(
        &mut self,
        raw_blob: &str,
        now: i64,
        ctx: &CacheContext<'_>,
        tracker: &mut AllocationTracker,
    ) -> DirStoreStatus {
        if !ctx.collaborators.oracle.acting_as_directory() {
            info!("Cannot store descriptors: not acting as hidden service directory");
            return DirStoreStatus::NotActingAsDirectory;
        }

        let window = FreshnessWindow::new(now, ctx.config);
        let mut parsed = 0usize;
        let mut stored = 0usize;
        let mut current = raw_blob;

        loop {
            let record = match ctx.collaborators.parser.parse(current, ParseMode::Directory) {
                Ok(record) => record,
                Err(err) => {
                    debug!(error = %err, "No further descriptor in directory upload");
                    break;
                }
            };
            parsed += 1;

            let next = record
                .next_offset
                .filter(|&offset| offset > 0)
                .and_then(|offset| current.get(offset..));
            let Some(text) = current.get(..record.consumed_len) else {
                warn!(
                    consumed_len = record.consumed_len,
                    "Parser reported a record length outside the upload"
                );
                break;
            };

            if self.store_record(record, text, now, &window, ctx, tracker) {
                stored += 1;
            }

            match next {
                Some(rest) if rest.starts_with(RECORD_KEYWORD) => current = rest,
                _ => break,
            }
        }

        if parsed == 0 {
            info!("Could not parse any descriptor");
            return DirStoreStatus::BadDescriptor;
        }

        info!(parsed, stored, "Parsed and added service descriptors");
        DirStoreStatus::Ok { parsed, stored }
    }

    fn store_record(
        &mut self,
        record: ParsedRecord,
        text: &str,
        now: i64,
        window: &FreshnessWindow,
        ctx: &CacheContext<'_>,
        tracker: &mut AllocationTracker,
    ) -> bool {
        let ParsedRecord {
            descriptor,
            descriptor_id,
            intro_payload,
            ..
        } = record;
        // Directories cannot decrypt introduction points and do not need them.
        drop(intro_payload);

        let id_text = descriptor_id.to_base32();
        let desc_id = ctx.safe(&id_text);

        if !ctx.collaborators.oracle.is_responsible(&descriptor_id) {
            info!(%desc_id, "Service descriptor is not in the interval we are responsible for");
            return false;
        }
        if let Err(reason) = window.check(descriptor.timestamp) {
            info!(%desc_id, %reason, "Skipping service descriptor");
            return false;
        }

        match self.entries.entry(descriptor_id) {
            Entry::Occupied(occupied) => {
                let existing = occupied.into_mut();
                if existing.timestamp() > descriptor.timestamp {
                    info!(%desc_id, "We already have a newer service descriptor with the same desc ID");
                    return false;
                }
                if existing.raw() == text {
                    info!(%desc_id, "We already have this service descriptor");
                    return false;
                }
                existing.replace(descriptor, text.to_owned(), tracker);
            }
            Entry::Vacant(vacant) => {
                let entry = vacant.insert(CacheEntry::new(
                    descriptor,
                    text.to_owned(),
                    now.saturating_sub(NEW_UPLOAD_SERVED_OFFSET),
                ));
                tracker.increment(AllocationTracker::size_of(entry));

                if ctx.config.hidden_service_statistics {
                    ctx.collaborators
                        .statistics
                        .notify_new_service(&entry.descriptor().public_key);
                }
            }
        }

        info!(%desc_id, len = text.len(), "Successfully stored service descriptor");
        true
    }
}
