//! API Handlers
//!
//! HTTP request handlers for each cache admin endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::cache::{CacheStats, KeyPattern, PerformanceCache};
use crate::config::{CacheConfig, Config};
use crate::error::{CacheError, Result};
use crate::models::{
    ClearPatternQuery, ClearPatternResponse, DeleteResponse, GetResponse, HealthResponse,
    SetRequest, SetResponse,
};

/// Long-lived application context.
///
/// Owns the single cache instance of the process; cloning shares it.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<PerformanceCache<Value>>,
}

impl AppState {
    /// Wraps an existing shared cache.
    pub fn new(cache: Arc<PerformanceCache<Value>>) -> Self {
        Self { cache }
    }

    pub fn with_cache_config(config: CacheConfig) -> Self {
        Self::new(PerformanceCache::shared(config))
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::with_cache_config(config.cache_config())
    }
}

/// Handler for PUT /set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl();
    if !state.cache.set(req.key.clone(), req.value, ttl) {
        return Err(CacheError::InvalidRequest(format!(
            "Key '{}' was rejected",
            req.key
        )));
    }

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = state
        .cache
        .get(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if !state.cache.delete(&key) {
        return Err(CacheError::NotFound(key));
    }

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for DELETE /keys?pattern=...
///
/// Unlike [`PerformanceCache::clear_pattern`], a malformed pattern is
/// reported to the caller instead of being ignored.
pub async fn clear_pattern_handler(
    State(state): State<AppState>,
    Query(query): Query<ClearPatternQuery>,
) -> Result<Json<ClearPatternResponse>> {
    let pattern = KeyPattern::parse(&query.pattern)?;
    let removed = state.cache.clear_matching(&pattern);
    info!(pattern = %pattern, removed, "pattern invalidation via API");

    Ok(Json(ClearPatternResponse::new(query.pattern, removed)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
