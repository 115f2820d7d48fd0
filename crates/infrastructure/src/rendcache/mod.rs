pub mod allocation;
pub mod client;
pub mod context;
pub mod directory;
pub mod entry;
pub mod freshness;
pub mod key;
pub mod safe_log;
pub mod service;
pub mod status;
mod sweep;

pub use allocation::{AllocationTracker, DESCRIPTOR_OVERHEAD, ENTRY_OVERHEAD};
pub use client::{ClientCache, ClientStoreRequest};
pub use context::{CacheContext, Collaborators};
pub use directory::{
    DirectoryCache, EvictionReport, LAST_SERVED_CUTOFF_STEP, NEW_UPLOAD_SERVED_OFFSET,
    RECORD_KEYWORD,
};
pub use entry::CacheEntry;
pub use freshness::FreshnessWindow;
pub use key::{ClientKey, DEFAULT_CLIENT_VERSION};
pub use safe_log::SafeLog;
pub use service::{CacheStats, RendCache};
pub use status::{ClientStoreStatus, DirStoreStatus, Lookup};
