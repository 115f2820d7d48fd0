#![allow(dead_code)]

use rend_cache_application::ports::{
    DescriptorParser, IntroPointDecryptor, IntroPointParser, ParseMode, ParsedRecord,
    ResponsibilityOracle,
};
use rend_cache_domain::{
    Config, DescriptorCookie, DescriptorError, DescriptorId, IntroductionPoint, ServiceDescriptor,
};
use rend_cache_infrastructure::rendcache::{ClientStoreRequest, Collaborators, RendCache};
use std::sync::{Arc, Mutex};

pub const NOW: i64 = 1_700_000_000;

const KEYWORD: &str = "rendezvous-service-descriptor ";
const END: &str = "signature\n";

// ============================================================================
// Line-based descriptor parser
// ============================================================================

pub struct LineParser;

impl DescriptorParser for LineParser {
    fn parse(&self, input: &str, mode: ParseMode) -> Result<ParsedRecord, DescriptorError> {
        let err = |m: &str| DescriptorError::Parse(m.to_string());
        let end = input.find(END).ok_or_else(|| err("no signature"))? + END.len();
        let mut lines = input[..end].lines();

        let desc_id = lines
            .next()
            .and_then(|l| l.strip_prefix(KEYWORD))
            .and_then(|v| DescriptorId::from_base32(v).ok())
            .ok_or_else(|| err("descriptor id"))?;
        let timestamp = lines
            .next()
            .and_then(|l| l.strip_prefix("timestamp "))
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| err("timestamp"))?;
        let public_key = lines
            .next()
            .and_then(|l| l.strip_prefix("public-key "))
            .ok_or_else(|| err("public key"))?;

        Ok(ParsedRecord {
            descriptor: ServiceDescriptor::new(public_key.as_bytes().to_vec(), timestamp),
            descriptor_id: desc_id,
            intro_payload: None,
            consumed_len: end,
            next_offset: match mode {
                ParseMode::Directory if end < input.len() => Some(end),
                _ => None,
            },
        })
    }
}

pub struct NeverDecrypts;

impl IntroPointDecryptor for NeverDecrypts {
    fn decrypt(&self, _: &DescriptorCookie, _: &[u8]) -> Result<Vec<u8>, DescriptorError> {
        Err(DescriptorError::Decrypt("not supported".to_string()))
    }
}

pub struct NoIntroPoints;

impl IntroPointParser for NoIntroPoints {
    fn parse_points(
        &self,
        _: &ServiceDescriptor,
        _: &[u8],
    ) -> Result<Vec<IntroductionPoint>, DescriptorError> {
        Ok(Vec::new())
    }
}

pub struct AlwaysResponsible;

impl ResponsibilityOracle for AlwaysResponsible {
    fn is_responsible(&self, _: &DescriptorId) -> bool {
        true
    }

    fn acting_as_directory(&self) -> bool {
        true
    }
}

// ============================================================================
// Builders
// ============================================================================

pub fn shared_cache() -> Arc<Mutex<RendCache>> {
    let collaborators = Collaborators::new(
        Arc::new(LineParser),
        Arc::new(NeverDecrypts),
        Arc::new(NoIntroPoints),
        Arc::new(AlwaysResponsible),
    );
    Arc::new(Mutex::new(RendCache::init(&Config::default(), collaborators)))
}

pub fn descriptor(seed: u8, timestamp: i64) -> String {
    format!(
        "{KEYWORD}{}\ntimestamp {timestamp}\npublic-key key-{seed}\n{END}",
        DescriptorId::from_bytes([seed; 20]).to_base32()
    )
}

pub fn desc_id(seed: u8) -> String {
    DescriptorId::from_bytes([seed; 20]).to_base32()
}

pub fn store_dir(cache: &Mutex<RendCache>, seed: u8, timestamp: i64) {
    let mut cache = cache.lock().unwrap();
    assert!(cache.store_dir(&descriptor(seed, timestamp), NOW).is_ok());
}

pub fn store_client(cache: &Mutex<RendCache>, seed: u8, timestamp: i64) {
    store_client_at(cache, seed, timestamp, NOW);
}

pub fn store_client_at(cache: &Mutex<RendCache>, seed: u8, timestamp: i64, now: i64) {
    let raw = descriptor(seed, timestamp);
    let id = desc_id(seed);
    let mut cache = cache.lock().unwrap();
    assert!(cache
        .store_client(&ClientStoreRequest::new(&raw, &id, ""), now)
        .is_ok());
}
