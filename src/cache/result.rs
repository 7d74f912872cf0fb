//! Result cache keyed by a request fingerprint.
//!
//! Entries expire after a fixed TTL. [`ResultCache::sweep`] drops expired entries in bulk and
//! lookups refuse anything past its TTL, so a stale result is never returned even between
//! sweeps. Capacity is bounded by moka's eviction policy.

use moka::sync::Cache;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::debug;

use super::types::{CacheEntry, CacheStats};
use crate::constants::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL_SECS};
use crate::hashing::fingerprint_request;
use crate::labels::IssueCategory;
use crate::scoring::VerificationResult;

/// In-memory result cache keyed by [`fingerprint_request`] hashes.
pub struct ResultCache {
    entries: Cache<[u8; 32], CacheEntry>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResultCache {
    /// Creates a cache with the default TTL and capacity.
    #[inline]
    pub fn new() -> Self {
        Self::with_settings(
            Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            DEFAULT_CACHE_CAPACITY,
        )
    }

    /// Creates a cache with an explicit TTL and max entry count.
    pub fn with_settings(ttl: Duration, capacity: u64) -> Self {
        Self {
            entries: Cache::builder().max_capacity(capacity).build(),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the configured TTL.
    #[inline]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Computes the key for a request.
    #[inline]
    pub fn key_for(
        category: IssueCategory,
        description: &str,
        image: &str,
        prefix_len: usize,
    ) -> [u8; 32] {
        fingerprint_request(category, description, image, prefix_len)
    }

    /// Looks up a fresh result by key.
    pub fn lookup(&self, key: &[u8; 32]) -> Option<VerificationResult> {
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired(self.ttl) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.result)
            }
            Some(_) => {
                self.entries.invalidate(key);
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Stores (or replaces) the result for a key, stamped with the current time.
    #[inline]
    pub fn store(&self, key: [u8; 32], result: VerificationResult) {
        self.entries.insert(key, CacheEntry::new(result));
    }

    /// Removes every entry older than the TTL and returns how many were removed.
    pub fn sweep(&self) -> usize {
        let expired: Vec<Arc<[u8; 32]>> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(self.ttl))
            .map(|(key, _)| key)
            .collect();

        for key in &expired {
            self.entries.invalidate(&**key);
        }
        if !expired.is_empty() {
            self.entries.run_pending_tasks();
            debug!(removed = expired.len(), "Swept expired verification results");
        }
        expired.len()
    }

    /// Returns the number of cached entries (including not-yet-swept expired ones).
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all entries.
    #[inline]
    pub fn clear(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks();
    }

    /// Returns current size and hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("entries", &self.entries.entry_count())
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[derive(Clone)]
/// Shared handle to a [`ResultCache`].
pub struct ResultCacheHandle {
    inner: Arc<ResultCache>,
}

impl ResultCacheHandle {
    /// Creates a new handle with default TTL and capacity.
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ResultCache::new()),
        }
    }

    /// Creates a new handle with explicit TTL and capacity.
    #[inline]
    pub fn with_settings(ttl: Duration, capacity: u64) -> Self {
        Self {
            inner: Arc::new(ResultCache::with_settings(ttl, capacity)),
        }
    }

    #[inline]
    pub fn lookup(&self, key: &[u8; 32]) -> Option<VerificationResult> {
        self.inner.lookup(key)
    }

    #[inline]
    pub fn store(&self, key: [u8; 32], result: VerificationResult) {
        self.inner.store(key, result)
    }

    #[inline]
    pub fn sweep(&self) -> usize {
        self.inner.sweep()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn clear(&self) {
        self.inner.clear();
    }

    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.inner.stats()
    }

    #[inline]
    pub fn ttl(&self) -> Duration {
        self.inner.ttl()
    }

    /// Returns the number of strong references to the underlying cache.
    #[inline]
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl Default for ResultCacheHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResultCacheHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCacheHandle")
            .field("strong_count", &self.strong_count())
            .finish()
    }
}
