//! Cache Entry Module
//!
//! Defines the structure of one cached upstream response with TTL support.

use crate::upstream::{ApiErrorCode, RawQuestion};

// == Cached Result ==
/// Cacheable payload: a question batch, or a deterministic upstream error
/// code. Network failures are never stored, so they do not appear here.
pub type CachedResult = Result<Vec<RawQuestion>, ApiErrorCode>;

// == Cache Entry ==
/// A single cached response with its storage time and TTL.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached upstream payload
    pub payload: CachedResult,
    /// When the entry was stored (Unix milliseconds)
    pub stored_at: u64,
    /// Time-to-live in milliseconds
    pub ttl_ms: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stored at `stored_at` with a TTL in seconds.
    pub fn new(payload: CachedResult, stored_at: u64, ttl_secs: u64) -> Self {
        Self {
            payload,
            stored_at,
            ttl_ms: ttl_secs * 1000,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired at `now_ms`.
    ///
    /// Boundary condition: the entry is valid only while
    /// `now < stored_at + ttl`; at exactly `stored_at + ttl` it is expired.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.stored_at + self.ttl_ms
    }

    // == Time To Live ==
    /// Remaining TTL in milliseconds at `now_ms`, zero once expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        (self.stored_at + self.ttl_ms).saturating_sub(now_ms)
    }
}
