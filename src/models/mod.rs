//! Request and Response models for the cache admin API
//!
//! DTOs used for serializing/deserializing HTTP request and response bodies.
//! Cache statistics are served directly as [`CacheStats`](crate::cache::CacheStats).

pub mod requests;
pub mod responses;

pub use requests::{ClearPatternQuery, SetRequest, MAX_VALUE_SIZE};
pub use responses::{
    ClearPatternResponse, DeleteResponse, ErrorResponse, GetResponse, HealthResponse, SetResponse,
};
