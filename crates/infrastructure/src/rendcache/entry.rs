use super::allocation::AllocationTracker;
use rend_cache_domain::ServiceDescriptor;

/// A cached descriptor: the parsed record plus the exact text it came from.
///
/// Both caches store this type. An entry that sits in a map has its
/// [`AllocationTracker::size_of`] charged to the tracker; every removal path
/// goes through [`CacheEntry::free`] (or [`CacheEntry::replace`]) so the
/// charge is given back exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    parsed: ServiceDescriptor,
    raw: String,
    last_served: i64,
}

impl CacheEntry {
    pub fn new(parsed: ServiceDescriptor, raw: String, last_served: i64) -> Self {
        Self {
            parsed,
            raw,
            last_served,
        }
    }

    pub fn descriptor(&self) -> &ServiceDescriptor {
        &self.parsed
    }

    /// Encoded descriptor text, exactly as received.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Length of the encoded descriptor in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    #[inline]
    pub fn timestamp(&self) -> i64 {
        self.parsed.timestamp
    }

    /// Last time this entry was handed out by the directory cache.
    #[inline]
    pub fn last_served(&self) -> i64 {
        self.last_served
    }

    pub(crate) fn mark_served(&mut self, now: i64) {
        self.last_served = now;
    }

    /// Swap in a new payload, moving the tracker charge from the old payload
    /// to the new one. `last_served` is kept.
    pub(crate) fn replace(
        &mut self,
        parsed: ServiceDescriptor,
        raw: String,
        tracker: &mut AllocationTracker,
    ) {
        tracker.decrement(AllocationTracker::size_of(self));
        self.parsed = parsed;
        self.raw = raw;
        tracker.increment(AllocationTracker::size_of(self));
    }

    /// Release an entry taken out of a map. No-op on `None`.
    pub fn free(entry: Option<CacheEntry>, tracker: &mut AllocationTracker) {
        if let Some(entry) = entry {
            tracker.decrement(AllocationTracker::size_of(&entry));
            drop(entry);
        }
    }
}
