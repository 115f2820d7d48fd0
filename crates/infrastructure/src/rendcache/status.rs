use super::entry::CacheEntry;
use rend_cache_domain::{CacheError, DescriptorRejection};

/// Outcome of a cache lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    /// Well-formed identifier, nothing cached under it.
    NotFound,
    /// The identifier could not be decoded.
    InvalidId,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_result(self) -> Result<T, CacheError> {
        match self {
            Lookup::Found(value) => Ok(value),
            Lookup::NotFound => Err(CacheError::NotFound),
            Lookup::InvalidId => Err(CacheError::InvalidIdentifier),
        }
    }
}

/// Outcome of storing an upload as hidden service directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirStoreStatus {
    /// At least one record parsed. Skipped records count as parsed but not stored.
    Ok { parsed: usize, stored: usize },
    /// Not a single record could be parsed.
    BadDescriptor,
    NotActingAsDirectory,
}

impl DirStoreStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, DirStoreStatus::Ok { .. })
    }

    /// `(parsed, stored)` on success.
    pub fn into_result(self) -> Result<(usize, usize), CacheError> {
        match self {
            DirStoreStatus::Ok { parsed, stored } => Ok((parsed, stored)),
            DirStoreStatus::BadDescriptor => Err(DescriptorRejection::NothingParsed.into()),
            DirStoreStatus::NotActingAsDirectory => Err(CacheError::NotActingAsDirectory),
        }
    }
}

/// Outcome of storing a fetched descriptor as client.
#[derive(Debug, PartialEq, Eq)]
pub enum ClientStoreStatus<'a> {
    /// The entry now cached for the service: the new descriptor, or the
    /// existing one when it was at least as recent.
    Ok(&'a CacheEntry),
    BadDescriptor(DescriptorRejection),
}

impl<'a> ClientStoreStatus<'a> {
    pub fn is_ok(&self) -> bool {
        matches!(self, ClientStoreStatus::Ok(_))
    }

    pub fn entry(&self) -> Option<&'a CacheEntry> {
        match self {
            ClientStoreStatus::Ok(entry) => Some(*entry),
            ClientStoreStatus::BadDescriptor(_) => None,
        }
    }

    pub fn into_result(self) -> Result<&'a CacheEntry, CacheError> {
        match self {
            ClientStoreStatus::Ok(entry) => Ok(entry),
            ClientStoreStatus::BadDescriptor(reason) => Err(CacheError::BadDescriptor(reason)),
        }
    }
}
