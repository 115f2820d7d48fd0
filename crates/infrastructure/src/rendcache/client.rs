//! Descriptor cache used as a hidden service client.
//!
//! Entries are keyed by `"2" + service id`. A descriptor is only cached after
//! its identity and descriptor id were checked against what was requested and
//! its introduction points parsed (decrypted first when the service uses
//! client authorization).

use super::allocation::AllocationTracker;
use super::context::CacheContext;
use super::entry::CacheEntry;
use super::freshness::FreshnessWindow;
use super::key::{ClientKey, DEFAULT_CLIENT_VERSION};
use super::safe_log::SafeLog;
use super::status::{ClientStoreStatus, Lookup};
use super::sweep;
use rend_cache_application::ports::{ParseMode, ParsedRecord};
use rend_cache_domain::{
    AuthType, DescriptorCookie, DescriptorId, DescriptorRejection, IntroductionPoint,
    ServiceDescriptor, ServiceId,
};
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use tracing::{debug, info, warn};

/// A descriptor fetched for a service, with what the client asked for.
#[derive(Debug, Clone, Copy)]
pub struct ClientStoreRequest<'a> {
    /// Encoded descriptor as received from the directory.
    pub raw_text: &'a str,
    /// Base32 descriptor id the descriptor was fetched under.
    pub desc_id_base32: &'a str,
    /// Service id we expect; empty to accept any.
    pub onion_address: &'a str,
    pub auth_type: AuthType,
    pub descriptor_cookie: DescriptorCookie,
}

impl<'a> ClientStoreRequest<'a> {
    pub fn new(raw_text: &'a str, desc_id_base32: &'a str, onion_address: &'a str) -> Self {
        Self {
            raw_text,
            desc_id_base32,
            onion_address,
            auth_type: AuthType::NoAuth,
            descriptor_cookie: DescriptorCookie::default(),
        }
    }

    pub fn with_authorization(mut self, auth_type: AuthType, cookie: DescriptorCookie) -> Self {
        self.auth_type = auth_type;
        self.descriptor_cookie = cookie;
        self
    }
}

struct Verified<'r> {
    service_id: ServiceId,
    descriptor: ServiceDescriptor,
    raw: &'r str,
}

/// Service-id keyed store for descriptors fetched as client.
#[derive(Debug, Default)]
pub struct ClientCache {
    entries: FxHashMap<ClientKey, CacheEntry>,
}

impl ClientCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn purge(&mut self, tracker: &mut AllocationTracker) {
        let removed = sweep::free_all(&mut self.entries, tracker);
        info!(removed, "Purging HS descriptor cache");
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
                "Removed expired client descriptors"
            );
        }
        swept.keys.len()
    }

    /// Find the cached descriptor of `service_id`.
    ///
    /// Version 0 descriptors are no longer cached; every other version is
    /// looked up as version 2.
    pub fn lookup(
        &self,
        service_id: &str,
        version: u8,
        ctx: &CacheContext<'_>,
    ) -> Lookup<&CacheEntry> {
        let service_id = match ServiceId::parse(service_id) {
            Ok(id) => id,
            Err(err) => {
                debug!(
                    service_id = %ctx.safe(service_id),
                    error = %err,
                    "Invalid service id in cache lookup"
                );
                return Lookup::InvalidId;
            }
        };

        if version == 0 {
            warn!("Cache lookup of a v0 renddesc is deprecated");
            return Lookup::NotFound;
        }

        let key = ClientKey::new(DEFAULT_CLIENT_VERSION, &service_id);
        match self.entries.get(&key) {
            Some(entry) => {
                debug_assert!(
                    entry.descriptor().intro_points.is_some(),
                    "client cache entry without an introduction point list"
                );
                Lookup::Found(entry)
            }
            None => Lookup::NotFound,
        }
    }

    /// Verify and cache a descriptor fetched for a service.
    ///
    /// When an entry at least as recent is already cached, that entry is
    /// returned unchanged.
    pub fn store(
        &mut self,
        request: &ClientStoreRequest<'_>,
        now: i64,
        ctx: &CacheContext<'_>,
        tracker: &mut AllocationTracker,
    ) -> ClientStoreStatus<'_> {
        let Verified {
            service_id,
            descriptor,
            raw,
        } = match Self::verify(request, now, ctx) {
            Ok(verified) => verified,
            Err(reason) => return ClientStoreStatus::BadDescriptor(reason),
        };

        let sid = ctx.safe(service_id.as_str());
        let key = ClientKey::new(DEFAULT_CLIENT_VERSION, &service_id);

        let entry = match self.entries.entry(key) {
            Entry::Occupied(occupied) => {
                let existing = occupied.into_mut();
                if existing.timestamp() >= descriptor.timestamp {
                    info!(
                        service_id = %sid,
                        "We already have a new enough service descriptor for this service"
                    );
                    return ClientStoreStatus::Ok(existing);
                }
                existing.replace(descriptor, raw.to_owned(), tracker);
                existing
            }
            Entry::Vacant(vacant) => {
                let entry = vacant.insert(CacheEntry::new(descriptor, raw.to_owned(), now));
                tracker.increment(AllocationTracker::size_of(entry));
                entry
            }
        };

        debug!(service_id = %sid, len = entry.len(), "Successfully stored rend desc");
        ClientStoreStatus::Ok(entry)
    }

    fn verify<'r>(
        request: &ClientStoreRequest<'r>,
        now: i64,
        ctx: &CacheContext<'_>,
    ) -> Result<Verified<'r>, DescriptorRejection> {
        let wanted_id = DescriptorId::from_base32(request.desc_id_base32).map_err(|err| {
            warn!(
                desc_id = %ctx.safe(request.desc_id_base32),
                error = %err,
                "Couldn't decode base32 descriptor id"
            );
            DescriptorRejection::InvalidDescriptorId
        })?;

        let ParsedRecord {
            mut descriptor,
            descriptor_id,
            intro_payload,
            consumed_len,
            ..
        } = ctx
            .collaborators
            .parser
            .parse(request.raw_text, ParseMode::Client)
            .map_err(|err| {
                warn!(error = %err, "Could not parse descriptor");
                DescriptorRejection::Unparseable
            })?;

        let service_id = ServiceId::from_public_key(&descriptor.public_key).map_err(|err| {
            warn!(error = %err, "Couldn't compute service ID");
            DescriptorRejection::ServiceIdDerivation
        })?;
        let sid = ctx.safe(service_id.as_str());

        if !request.onion_address.is_empty()
            && !request.onion_address.eq_ignore_ascii_case(service_id.as_str())
        {
            warn!(
                service_id = %sid,
                expected = %ctx.safe(request.onion_address),
                "Received service descriptor for an unexpected service ID"
            );
            return Err(DescriptorRejection::ServiceIdMismatch);
        }

        if descriptor_id != wanted_id {
            warn!(service_id = %sid, "Received service descriptor with incorrect descriptor ID");
            return Err(DescriptorRejection::DescriptorIdMismatch);
        }

        let points = Self::intro_points(&descriptor, intro_payload, request, sid, ctx)?;
        descriptor.intro_points = Some(points);

        if let Err(reason) = FreshnessWindow::new(now, ctx.config).check(descriptor.timestamp) {
            warn!(service_id = %sid, %reason, "Rejecting service descriptor");
            return Err(reason);
        }

        let raw = request.raw_text.get(..consumed_len).ok_or_else(|| {
            warn!(consumed_len, "Parser reported a record length outside the descriptor");
            DescriptorRejection::Unparseable
        })?;

        Ok(Verified {
            service_id,
            descriptor,
            raw,
        })
    }

    fn intro_points(
        descriptor: &ServiceDescriptor,
        payload: Option<Vec<u8>>,
        request: &ClientStoreRequest<'_>,
        sid: SafeLog<'_>,
        ctx: &CacheContext<'_>,
    ) -> Result<Vec<IntroductionPoint>, DescriptorRejection> {
        let Some(payload) = payload.filter(|p| !p.is_empty()) else {
            info!(service_id = %sid, "Descriptor does not contain any introduction points");
            return Ok(Vec::new());
        };

        let payload = if request.auth_type.requires_authorization()
            && !request.descriptor_cookie.is_zero()
        {
            match ctx
                .collaborators
                .decryptor
                .decrypt(&request.descriptor_cookie, &payload)
            {
                Ok(decrypted) => {
                    info!(service_id = %sid, "Successfully decrypted introduction points");
                    decrypted
                }
                Err(err) => {
                    // The ciphertext is never handed to the intro-point parser.
                    warn!(
                        service_id = %sid,
                        error = %err,
                        "Failed to decrypt introduction points"
                    );
                    return Err(DescriptorRejection::DecryptionFailed);
                }
            }
        } else {
            payload
        };

        let points = ctx
            .collaborators
            .intro_parser
            .parse_points(descriptor, &payload)
            .unwrap_or_else(|err| {
                debug!(error = %err, "Introduction point parser failed");
                Vec::new()
            });

        if points.is_empty() {
            warn!(
                service_id = %sid,
                "Failed to parse introduction points. Either the service has published a \
                 corrupt descriptor or you have provided invalid authorization data"
            );
            return Err(DescriptorRejection::NoIntroPoints);
        }

        let max = ctx.config.max_intro_points;
        if points.len() > max {
            warn!(
                service_id = %sid,
                count = points.len(),
                max,
                "Too many introduction points on a hidden service descriptor, rejecting"
            );
            return Err(DescriptorRejection::TooManyIntroPoints {
                count: points.len(),
                max,
            });
        }

        Ok(points)
    }
}
