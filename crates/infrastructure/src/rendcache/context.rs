use super::safe_log::SafeLog;
use rend_cache_application::ports::{
    DescriptorParser, IntroPointDecryptor, IntroPointParser, NoopStatisticsSink,
    ResponsibilityOracle, StatisticsSink,
};
use rend_cache_domain::CacheConfig;
use std::sync::Arc;

/// External services the caches call into.
#[derive(Clone)]
pub struct Collaborators {
    pub parser: Arc<dyn DescriptorParser>,
    pub decryptor: Arc<dyn IntroPointDecryptor>,
    pub intro_parser: Arc<dyn IntroPointParser>,
    pub oracle: Arc<dyn ResponsibilityOracle>,
    pub statistics: Arc<dyn StatisticsSink>,
}

impl Collaborators {
    pub fn new(
        parser: Arc<dyn DescriptorParser>,
        decryptor: Arc<dyn IntroPointDecryptor>,
        intro_parser: Arc<dyn IntroPointParser>,
        oracle: Arc<dyn ResponsibilityOracle>,
    ) -> Self {
        Self {
            parser,
            decryptor,
            intro_parser,
            oracle,
            statistics: Arc::new(NoopStatisticsSink),
        }
    }

    pub fn with_statistics(mut self, statistics: Arc<dyn StatisticsSink>) -> Self {
        self.statistics = statistics;
        self
    }
}

/// Everything a cache operation reads besides the map it mutates.
#[derive(Clone, Copy)]
pub struct CacheContext<'a> {
    pub config: &'a CacheConfig,
    pub collaborators: &'a Collaborators,
    pub safe_logging: bool,
}

impl<'a> CacheContext<'a> {
    pub fn new(config: &'a CacheConfig, collaborators: &'a Collaborators, safe_logging: bool) -> Self {
        Self {
            config,
            collaborators,
            safe_logging,
        }
    }

    #[inline]
    pub(crate) fn safe<'v>(&self, value: &'v str) -> SafeLog<'v> {
        SafeLog::new(value, self.safe_logging)
    }
}
