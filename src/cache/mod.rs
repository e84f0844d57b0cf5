//! Cache Module
//!
//! In-memory performance cache with TTL expiration, glob-pattern
//! invalidation, an optional LRU bound and hit/miss statistics.

mod clock;
mod entry;
mod lru;
mod pattern;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use pattern::KeyPattern;
pub use shared::PerformanceCache;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;
