//! perf_cache - process-wide performance cache
//!
//! Key/value caching with per-entry TTL, glob-pattern invalidation and
//! hit/miss statistics, plus a small HTTP admin surface.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheStats, PerformanceCache};
pub use config::{CacheConfig, Config};
pub use tasks::spawn_cleanup_task;
