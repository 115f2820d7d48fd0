#![allow(dead_code)]

use rend_cache_application::ports::{
    DescriptorParser, IntroPointDecryptor, IntroPointParser, ParseMode, ParsedRecord,
    ResponsibilityOracle, StatisticsSink,
};
use rend_cache_domain::{
    Config, DescriptorCookie, DescriptorError, DescriptorId, IntroductionPoint, ServiceDescriptor,
    ServiceId,
};
use rend_cache_infrastructure::rendcache::{Collaborators, RendCache};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

pub const NOW: i64 = 1_700_000_000;

// ============================================================================
// Fake wire parser
// ============================================================================
//
// Records look like:
//
//   rendezvous-service-descriptor <base32 desc id>
//   timestamp <unix secs>
//   public-key <text>
//   introduction-points <payload>     (optional)
//   signature
//

const KEYWORD: &str = "rendezvous-service-descriptor ";
const END: &str = "signature\n";

pub struct FakeDescriptorParser {
    call_count: AtomicU64,
}

impl FakeDescriptorParser {
    pub fn new() -> Self {
        Self {
            call_count: AtomicU64::new(0),
        }
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

fn parse_err(msg: &str) -> DescriptorError {
    DescriptorError::Parse(msg.to_string())
}

impl DescriptorParser for FakeDescriptorParser {
    fn parse(&self, input: &str, mode: ParseMode) -> Result<ParsedRecord, DescriptorError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        if !input.starts_with(KEYWORD) {
            return Err(parse_err("missing keyword"));
        }
        let end = input.find(END).ok_or_else(|| parse_err("missing signature"))? + END.len();
        let record = &input[..end];

        let mut desc_id = None;
        let mut timestamp = None;
        let mut public_key = None;
        let mut intro_payload = None;
        for line in record.lines() {
            if let Some(v) = line.strip_prefix(KEYWORD) {
                desc_id = Some(DescriptorId::from_base32(v).map_err(|e| parse_err(&e.to_string()))?);
            } else if let Some(v) = line.strip_prefix("timestamp ") {
                timestamp = Some(v.parse::<i64>().map_err(|e| parse_err(&e.to_string()))?);
            } else if let Some(v) = line.strip_prefix("public-key ") {
                public_key = Some(v.as_bytes().to_vec());
            } else if let Some(v) = line.strip_prefix("introduction-points ") {
                intro_payload = Some(v.as_bytes().to_vec());
            }
        }

        let descriptor = ServiceDescriptor::new(
            public_key.ok_or_else(|| parse_err("missing public-key"))?,
            timestamp.ok_or_else(|| parse_err("missing timestamp"))?,
        );

        let next_offset = match mode {
            ParseMode::Directory if end < input.len() => Some(end),
            _ => None,
        };

        Ok(ParsedRecord {
            descriptor,
            descriptor_id: desc_id.ok_or_else(|| parse_err("missing descriptor id"))?,
            intro_payload,
            consumed_len: end,
            next_offset,
        })
    }
}

// ============================================================================
// Fake intro-point decryptor: strips "enc:" when the cookie matches
// ============================================================================

pub struct FakeDecryptor {
    key: DescriptorCookie,
    call_count: AtomicU64,
}

impl FakeDecryptor {
    pub fn new(key: DescriptorCookie) -> Self {
        Self {
            key,
            call_count: AtomicU64::new(0),
        }
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl IntroPointDecryptor for FakeDecryptor {
    fn decrypt(
        &self,
        cookie: &DescriptorCookie,
        payload: &[u8],
    ) -> Result<Vec<u8>, DescriptorError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if *cookie != self.key {
            return Err(DescriptorError::Decrypt("wrong cookie".to_string()));
        }
        payload
            .strip_prefix(b"enc:")
            .map(<[u8]>::to_vec)
            .ok_or_else(|| DescriptorError::Decrypt("not encrypted".to_string()))
    }
}

// ============================================================================
// Fake intro-point parser: comma separated identities
// ============================================================================

pub struct FakeIntroParser {
    call_count: AtomicU64,
}

impl FakeIntroParser {
    pub fn new() -> Self {
        Self {
            call_count: AtomicU64::new(0),
        }
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl IntroPointParser for FakeIntroParser {
    fn parse_points(
        &self,
        _descriptor: &ServiceDescriptor,
        payload: &[u8],
    ) -> Result<Vec<IntroductionPoint>, DescriptorError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        let text = std::str::from_utf8(payload)
            .map_err(|e| DescriptorError::IntroPoints(e.to_string()))?;
        if text.starts_with("enc:") || text == "garbage" {
            return Err(DescriptorError::IntroPoints("unreadable".to_string()));
        }
        Ok(text
            .split(',')
            .filter(|s| !s.is_empty() && *s != "none")
            .map(|identity| IntroductionPoint {
                identity: identity.to_string(),
                address: "127.0.0.1".to_string(),
                port: 9001,
            })
            .collect())
    }
}

// ============================================================================
// Mock ResponsibilityOracle
// ============================================================================

pub struct MockOracle {
    acting: AtomicBool,
    /// `None` means responsible for everything.
    responsible: RwLock<Option<HashSet<DescriptorId>>>,
}

impl MockOracle {
    pub fn new() -> Self {
        Self {
            acting: AtomicBool::new(true),
            responsible: RwLock::new(None),
        }
    }

    pub fn set_acting(&self, acting: bool) {
        self.acting.store(acting, Ordering::Relaxed);
    }

    pub fn responsible_only_for(&self, ids: &[DescriptorId]) {
        *self.responsible.write().unwrap() = Some(ids.iter().copied().collect());
    }

    pub fn responsible_for_all(&self) {
        *self.responsible.write().unwrap() = None;
    }
}

impl ResponsibilityOracle for MockOracle {
    fn is_responsible(&self, descriptor_id: &DescriptorId) -> bool {
        match &*self.responsible.read().unwrap() {
            Some(ids) => ids.contains(descriptor_id),
            None => true,
        }
    }

    fn acting_as_directory(&self) -> bool {
        self.acting.load(Ordering::Relaxed)
    }
}

// ============================================================================
// Recording StatisticsSink
// ============================================================================

#[derive(Default)]
pub struct RecordingStatisticsSink {
    keys: Mutex<Vec<Vec<u8>>>,
}

impl RecordingStatisticsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Vec<u8>> {
        self.keys.lock().unwrap().clone()
    }
}

impl StatisticsSink for RecordingStatisticsSink {
    fn notify_new_service(&self, public_key: &[u8]) {
        self.keys.lock().unwrap().push(public_key.to_vec());
    }
}

// ============================================================================
// Harness
// ============================================================================

pub fn cookie(byte: u8) -> DescriptorCookie {
    DescriptorCookie::new([byte; 16])
}

pub struct TestCache {
    pub cache: RendCache,
    pub oracle: Arc<MockOracle>,
    pub stats: Arc<RecordingStatisticsSink>,
    pub parser: Arc<FakeDescriptorParser>,
    pub decryptor: Arc<FakeDecryptor>,
    pub intro_parser: Arc<FakeIntroParser>,
}

impl TestCache {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let oracle = Arc::new(MockOracle::new());
        let stats = Arc::new(RecordingStatisticsSink::new());
        let parser = Arc::new(FakeDescriptorParser::new());
        let decryptor = Arc::new(FakeDecryptor::new(cookie(7)));
        let intro_parser = Arc::new(FakeIntroParser::new());

        let collaborators = Collaborators::new(
            parser.clone(),
            decryptor.clone(),
            intro_parser.clone(),
            oracle.clone(),
        )
        .with_statistics(stats.clone());

        Self {
            cache: RendCache::init(&config, collaborators),
            oracle,
            stats,
            parser,
            decryptor,
            intro_parser,
        }
    }

    pub fn with_statistics_enabled() -> Self {
        let mut config = Config::default();
        config.cache.hidden_service_statistics = true;
        Self::with_config(config)
    }
}

// ============================================================================
// Descriptor builder
// ============================================================================

pub fn desc_id(seed: u8) -> DescriptorId {
    DescriptorId::from_bytes([seed; 20])
}

pub struct DescriptorBuilder {
    desc_id: DescriptorId,
    timestamp: i64,
    public_key: String,
    intro_points: Option<String>,
}

impl DescriptorBuilder {
    pub fn new(seed: u8) -> Self {
        Self {
            desc_id: desc_id(seed),
            timestamp: NOW,
            public_key: format!("service-key-{seed}"),
            intro_points: Some("ip1,ip2,ip3".to_string()),
        }
    }

    pub fn desc_id(mut self, id: DescriptorId) -> Self {
        self.desc_id = id;
        self
    }

    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn public_key(mut self, key: &str) -> Self {
        self.public_key = key.to_string();
        self
    }

    pub fn intro_points(mut self, payload: &str) -> Self {
        self.intro_points = Some(payload.to_string());
        self
    }

    pub fn intro_point_count(self, count: usize) -> Self {
        let payload = (0..count)
            .map(|i| format!("ip{i}"))
            .collect::<Vec<_>>()
            .join(",");
        self.intro_points(&payload)
    }

    pub fn without_intro_points(mut self) -> Self {
        self.intro_points = None;
        self
    }

    pub fn desc_id_base32(&self) -> String {
        self.desc_id.to_base32()
    }

    pub fn service_id(&self) -> ServiceId {
        ServiceId::from_public_key(self.public_key.as_bytes()).unwrap()
    }

    pub fn build(&self) -> String {
        let mut out = format!(
            "{KEYWORD}{}\ntimestamp {}\npublic-key {}\n",
            self.desc_id.to_base32(),
            self.timestamp,
            self.public_key
        );
        if let Some(payload) = &self.intro_points {
            out.push_str(&format!("introduction-points {payload}\n"));
        }
        out.push_str(END);
        out
    }
}
