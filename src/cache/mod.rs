//! Cache Module
//!
//! The API-response cache: TTL expiry, bounded size, and the fetch layer
//! that decides what gets stored.

mod clock;
mod entry;
mod service;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CacheEntry, CachedResult};
pub use service::{FetchCache, FetchError, FetchResult};
pub use stats::CacheStats;
pub use store::ResponseCache;
