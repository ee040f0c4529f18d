//! Metrics hooks and TTL policy.

use std::time::Duration;

/// Hook for recording cache outcomes.
///
/// All methods default to no-ops so implementors only override what they
/// report on.
pub trait CacheMetrics: Send + Sync {
    fn record_hit(&self, _key: &str, _duration: Duration) {}

    fn record_miss(&self, _key: &str, _duration: Duration) {}

    fn record_error(&self, _key: &str, _error: &str) {}
}

/// Default metrics handler that records nothing.
pub struct NoOpMetrics;

impl CacheMetrics for NoOpMetrics {}

/// Time-to-live handed to the backend on cache writes.
///
/// Aging out entries is the backend's job; the policy layer only forwards
/// the configured value. `None` (the default) writes entries without expiry.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TtlPolicy {
    #[default]
    None,
    Fixed(Duration),
}

impl TtlPolicy {
    /// TTL to apply to the next cache write.
    pub fn get_ttl(&self) -> Option<Duration> {
        match self {
            TtlPolicy::None => None,
            TtlPolicy::Fixed(d) => Some(*d),
        }
    }
}
