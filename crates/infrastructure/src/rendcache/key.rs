use rend_cache_domain::ServiceId;
use std::fmt;

/// Descriptor version every client-side key is stored under.
pub const DEFAULT_CLIENT_VERSION: u8 = 2;

/// Client cache key: one version digit followed by the lowercase service id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClientKey(String);

impl ClientKey {
    /// `version` is a single decimal digit; `ServiceId` is always lowercase.
    #[inline]
    pub fn new(version: u8, service_id: &ServiceId) -> Self {
        debug_assert!(version < 10);
        Self(format!("{version}{service_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
