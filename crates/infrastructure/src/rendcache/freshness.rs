use rend_cache_domain::{CacheConfig, DescriptorRejection};

/// Range of publication timestamps the caches accept at a given `now`.
///
/// A descriptor is fresh when
/// `now - max_age - max_skew <= timestamp <= now + max_skew`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessWindow {
    oldest: i64,
    newest: i64,
}

impl FreshnessWindow {
    pub fn new(now: i64, config: &CacheConfig) -> Self {
        let max_age = i64::try_from(config.max_age_secs).unwrap_or(i64::MAX);
        let max_skew = i64::try_from(config.max_skew_secs).unwrap_or(i64::MAX);
        Self {
            oldest: now.saturating_sub(max_age).saturating_sub(max_skew),
            newest: now.saturating_add(max_skew),
        }
    }

    /// Entries published before this instant are stale.
    #[inline]
    pub fn oldest(&self) -> i64 {
        self.oldest
    }

    #[inline]
    pub fn newest(&self) -> i64 {
        self.newest
    }

    #[inline]
    pub fn is_stale(&self, timestamp: i64) -> bool {
        timestamp < self.oldest
    }

    pub fn check(&self, timestamp: i64) -> Result<(), DescriptorRejection> {
        if timestamp < self.oldest {
            return Err(DescriptorRejection::TooOld);
        }
        if timestamp > self.newest {
            return Err(DescriptorRejection::TooNew);
        }
        Ok(())
    }
}
