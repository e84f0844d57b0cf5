//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use perf_cache::{
    api::create_router,
    cache::{ManualClock, PerformanceCache},
    AppState, CacheConfig,
};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    create_router(AppState::with_cache_config(CacheConfig::default()))
}

fn create_clocked_app() -> (Router, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(0));
    let cache = PerformanceCache::with_clock(CacheConfig::default(), clock.clone());
    let app = create_router(AppState::new(Arc::new(cache)));
    (app, clock)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

// == SET / GET ==

#[tokio::test]
async fn test_set_then_get_json_value() {
    let app = create_test_app();

    let value = json!({"sku": "WID-9", "on_hand": 12, "bins": ["A1", "C4"]});
    let (status, json) = send(
        &app,
        "PUT",
        "/set",
        Some(json!({"key": "product:WID-9", "value": value})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].as_str().unwrap().contains("product:WID-9"));

    let (status, json) = send(&app, "GET", "/get/product:WID-9", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "product:WID-9");
    assert_eq!(json["value"], value);
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/get/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("missing"));
}

#[tokio::test]
async fn test_ttl_expiration_via_api() {
    let (app, clock) = create_clocked_app();

    send(
        &app,
        "PUT",
        "/set",
        Some(json!({"key": "session", "value": "abc", "ttl": 60})),
    )
    .await;

    clock.advance(Duration::from_millis(59_999));
    let (status, _) = send(&app, "GET", "/get/session", None).await;
    assert_eq!(status, StatusCode::OK);

    clock.advance(Duration::from_millis(1));
    let (status, _) = send(&app, "GET", "/get/session", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_negative_ttl_expires_immediately() {
    let app = create_test_app();

    let (status, _) = send(
        &app,
        "PUT",
        "/set",
        Some(json!({"key": "gone", "value": 1, "ttl": -10})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/get/gone", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == DELETE ==

#[tokio::test]
async fn test_delete_endpoint() {
    let app = create_test_app();

    send(&app, "PUT", "/set", Some(json!({"key": "d", "value": true}))).await;

    let (status, json) = send(&app, "DELETE", "/del/d", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "d");

    let (status, _) = send(&app, "DELETE", "/del/d", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == Pattern invalidation ==

#[tokio::test]
async fn test_clear_pattern_endpoint() {
    let app = create_test_app();

    for key in ["user:1", "user:2", "order:1"] {
        send(&app, "PUT", "/set", Some(json!({"key": key, "value": key}))).await;
    }

    let (status, json) = send(&app, "DELETE", "/keys?pattern=user:*", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], 2);
    assert_eq!(json["pattern"], "user:*");

    let (status, _) = send(&app, "GET", "/get/order:1", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", "/get/user:1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clear_pattern_malformed() {
    let app = create_test_app();

    // Trailing backslash, URL-encoded
    let (status, json) = send(&app, "DELETE", "/keys?pattern=user%5C", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("Invalid pattern"));
}

// == STATS ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app();

    let (_, json) = send(&app, "GET", "/stats", None).await;
    assert_eq!(json["hit_rate"], 0.0);

    send(&app, "PUT", "/set", Some(json!({"key": "s", "value": 1}))).await;
    send(&app, "GET", "/get/s", None).await;
    send(&app, "GET", "/get/nope", None).await;
    send(&app, "DELETE", "/del/s", None).await;

    let (status, json) = send(&app, "GET", "/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["sets"], 1);
    assert_eq!(json["deletes"], 1);
    assert_eq!(json["current_size"], 0);
    assert_eq!(json["hit_rate"], 0.5);
}

// == HEALTH ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}

// == Error Responses ==

#[tokio::test]
async fn test_missing_value_field() {
    let app = create_test_app();

    // Axum returns 422 when the JSON is well-formed but the shape is wrong
    let (status, _) = send(&app, "PUT", "/set", Some(json!({"key": "only"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_empty_key_request() {
    let app = create_test_app();

    let (status, json) = send(&app, "PUT", "/set", Some(json!({"key": "", "value": 1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("error").is_some());
}
