use super::entry::CacheEntry;
use rend_cache_domain::ServiceDescriptor;
use tracing::warn;

/// Fixed per-entry cost charged on top of the raw descriptor length.
pub const ENTRY_OVERHEAD: usize = std::mem::size_of::<CacheEntry>();

/// Fixed cost of the parsed descriptor owned by an entry.
pub const DESCRIPTOR_OVERHEAD: usize = std::mem::size_of::<ServiceDescriptor>();

/// Approximate number of bytes held by the descriptor caches.
///
/// The counter saturates in both directions. Hitting either bound means the
/// accounting is broken somewhere, so it is reported once per direction and
/// never surfaced to callers.
#[derive(Debug, Default)]
pub struct AllocationTracker {
    total: usize,
    overflowed: bool,
    underflowed: bool,
}

impl AllocationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Approximate cost of `entry`. Introduction points and key material are
    /// not counted.
    #[inline]
    pub fn size_of(entry: &CacheEntry) -> usize {
        ENTRY_OVERHEAD + entry.len() + DESCRIPTOR_OVERHEAD
    }

    pub fn increment(&mut self, n: usize) {
        match self.total.checked_add(n) {
            Some(total) => self.total = total,
            None => {
                self.total = usize::MAX;
                if !self.overflowed {
                    self.overflowed = true;
                    warn!(amount = n, "Overflow in rend cache allocation tracking");
                }
            }
        }
    }

    pub fn decrement(&mut self, n: usize) {
        match self.total.checked_sub(n) {
            Some(total) => self.total = total,
            None => {
                self.total = 0;
                if !self.underflowed {
                    self.underflowed = true;
                    warn!(amount = n, "Underflow in rend cache allocation tracking");
                }
            }
        }
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Zero the counter. The one-shot warning latches survive.
    pub fn reset(&mut self) {
        self.total = 0;
    }

    pub fn has_overflowed(&self) -> bool {
        self.overflowed
    }

    pub fn has_underflowed(&self) -> bool {
        self.underflowed
    }
}
