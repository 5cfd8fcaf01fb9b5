//! End-to-end HTTP API tests.
//!
//! Requests go through the full router (body limit, CORS, tracing layers)
//! via `tower::ServiceExt::oneshot`, with a scripted backend behind it.

mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use common::{verdict_json, ScriptedBackend};
use scamshield::analysis::Analyzer;
use scamshield::server::{create_router, AppState, ServerConfig, SharedBackend};
use serde_json::{json, Value};
use tower::ServiceExt;

fn router_with(backend: ScriptedBackend, config: ServerConfig) -> Router {
    let backend: SharedBackend = Arc::new(backend);
    let analyzer = Analyzer::new(backend).with_model("gemini-test");
    create_router(Arc::new(AppState::new(config, analyzer)))
}

fn router(backend: ScriptedBackend) -> Router {
    router_with(backend, ServerConfig::default().without_logging())
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn post_analyze(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(router(ScriptedBackend::empty()), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], scamshield::VERSION);
}

#[tokio::test]
async fn test_status_reports_backend() {
    let (status, body) = send(router(ScriptedBackend::empty()), get("/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backend"], "scripted");
    assert_eq!(body["model"], "gemini-test");
}

#[tokio::test]
async fn test_modes_listing() {
    let (status, body) = send(router(ScriptedBackend::empty()), get("/modes")).await;
    assert_eq!(status, StatusCode::OK);

    let modes = body.as_array().unwrap();
    let names: Vec<&str> = modes.iter().filter_map(|m| m["mode"].as_str()).collect();
    assert_eq!(names, ["URL", "EMAIL", "TRANSACTION", "CODE", "PASSWORD"]);
    assert_eq!(modes[2]["title"], "Transaction Anomaly Detector");
    assert!(modes[2]["sample"].as_str().unwrap().contains("TXN_99283"));
}

#[tokio::test]
async fn test_analyze_success() {
    let app = router(ScriptedBackend::text(&verdict_json("SUSPICIOUS", 45)));
    let (status, body) = send(
        app,
        post_analyze(json!({"mode": "url", "input": "https://example.com/suspicious-path"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "URL");
    assert_eq!(body["riskLevel"], "SUSPICIOUS");
    assert_eq!(body["score"], 45);
    assert_eq!(body["safetyBand"], "low");
    assert_eq!(body["details"].as_array().unwrap().len(), 2);
    assert_eq!(body["scanId"].as_str().unwrap().len(), 9);
}

#[tokio::test]
async fn test_analyze_backend_failure_is_still_ok() {
    let app = router(ScriptedBackend::transport_error());
    let (status, body) = send(
        app,
        post_analyze(json!({"mode": "PASSWORD", "input": "123456"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["riskLevel"], "UNKNOWN");
    assert_eq!(body["score"], 0);
    assert_eq!(body["summary"], "Error checking password");
    assert_eq!(body["details"], json!([]));
    assert_eq!(body["recommendation"], "Use a longer password.");
}

#[tokio::test]
async fn test_analyze_rejects_blank_input() {
    let backend = Arc::new(ScriptedBackend::text(&verdict_json("SAFE", 90)));
    let shared: SharedBackend = backend.clone();
    let app = create_router(Arc::new(AppState::new(
        ServerConfig::default().without_logging(),
        Analyzer::new(shared),
    )));

    let (status, body) = send(
        app,
        post_analyze(json!({"mode": "email", "input": "  \n "})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("empty"));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_analyze_rejects_unknown_mode() {
    let (status, body) = send(
        router(ScriptedBackend::empty()),
        post_analyze(json!({"mode": "fax", "input": "hello"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Unknown analysis mode"));
}

#[tokio::test]
async fn test_analyze_body_limit() {
    let app = router_with(
        ScriptedBackend::text(&verdict_json("SAFE", 90)),
        ServerConfig::default().without_logging().with_max_body_size(64),
    );
    let big = "a".repeat(1024);
    let (status, body) = send(app, post_analyze(json!({"mode": "code", "input": big}))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_analyze_malformed_json_has_error_body() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"mode\": \"url\", "))
        .unwrap();
    let (status, body) = send(router(ScriptedBackend::empty()), request).await;

    assert!(status.is_client_error());
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_analyze_missing_field_has_error_body() {
    let (status, body) = send(
        router(ScriptedBackend::empty()),
        post_analyze(json!({"mode": "url"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("input"));
}

#[tokio::test]
async fn test_analyze_missing_content_type_has_error_body() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/analyze")
        .body(Body::from(json!({"mode": "url", "input": "x"}).to_string()))
        .unwrap();
    let (status, body) = send(router(ScriptedBackend::empty()), request).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_cors_header_present() {
    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = router(ScriptedBackend::empty()).oneshot(request).await.unwrap();
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));

    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let no_cors = router_with(
        ScriptedBackend::empty(),
        ServerConfig::default().without_logging().without_cors(),
    );
    let response = no_cors.oneshot(request).await.unwrap();
    assert!(!response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
