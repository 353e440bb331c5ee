//! Response Cache Module
//!
//! In-memory map from cache keys to upstream responses, with lazy TTL
//! expiry and a bounded size.

use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::{CacheEntry, CacheStats, CachedResult, Clock, SystemClock};

// == Response Cache ==
/// Keyed storage for upstream responses.
///
/// At most one entry exists per key; storing overwrites. Expired entries are
/// treated as absent and removed on the access that finds them. When the
/// cache is at capacity, the entry with the oldest `stored_at` is evicted.
#[derive(Debug)]
pub struct ResponseCache {
    /// Cache-key to entry storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL in seconds applied to every entry
    ttl_secs: u64,
    /// Injectable time source
    clock: Arc<dyn Clock>,
}

impl ResponseCache {
    // == Constructors ==
    /// Creates a cache with the given capacity and TTL, on the system clock.
    pub fn new(max_entries: usize, ttl_secs: u64) -> Self {
        Self::with_clock(max_entries, ttl_secs, Arc::new(SystemClock))
    }

    /// Creates a cache driven by an injected clock.
    pub fn with_clock(max_entries: usize, ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            max_entries,
            ttl_secs,
            clock,
        }
    }

    // == Lookup ==
    /// Returns the payload for `key` if a non-expired entry exists.
    ///
    /// An expired entry is removed and counted as a miss.
    pub fn lookup(&mut self, key: &str) -> Option<CachedResult> {
        let now = self.clock.now_ms();

        match self.entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                self.entries.remove(key);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_miss();
                None
            }
            Some(entry) => {
                let payload = entry.payload.clone();
                self.stats.record_hit();
                Some(payload)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Store ==
    /// Stores a payload under `key`, overwriting any existing entry.
    ///
    /// If the key is new and the cache is at capacity, the oldest entry by
    /// `stored_at` is evicted first.
    pub fn store(&mut self, key: String, payload: CachedResult) {
        let now = self.clock.now_ms();

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(key, _)| key.clone());

            if let Some(oldest_key) = oldest {
                self.entries.remove(&oldest_key);
                self.stats.record_eviction();
            }
        }

        let entry = CacheEntry::new(payload, now, self.ttl_secs);
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Sweep Expired ==
    /// Removes every expired entry, returning how many were removed.
    pub fn sweep_expired(&mut self) -> usize {
        let now = self.clock.now_ms();

        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.entries.remove(&key);
        }

        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Current number of entries, expired ones included until collected.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
