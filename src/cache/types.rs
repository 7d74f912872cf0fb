use std::time::{Duration, Instant};

use crate::scoring::VerificationResult;

/// A cached verification outcome and when it was produced.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub result: VerificationResult,
    pub timestamp: Instant,
}

impl CacheEntry {
    pub fn new(result: VerificationResult) -> Self {
        Self {
            result,
            timestamp: Instant::now(),
        }
    }

    /// Returns `true` once the entry is older than `ttl`.
    #[inline]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.timestamp.elapsed() > ttl
    }
}

/// Hit/miss counters for the result cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: u64,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
