//! End-to-end Gemini backend tests.
//!
//! A local axum stub plays the `generateContent` endpoint so the real HTTP
//! client path (serialization, status handling, envelope parsing, timeouts)
//! is exercised without network access.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::{Json, Router};
use scamshield::analysis::{AnalysisMode, Analyzer, RiskLevel};
use scamshield::inference::GeminiBackend;
use scamshield::{FailureKind, ScamShieldError};
use serde_json::{json, Value};

/// What the stub saw for one request
#[derive(Debug, Clone)]
struct Seen {
    path: String,
    api_key: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    reply: Value,
    delay: Duration,
    seen: Arc<Mutex<Vec<Seen>>>,
}

async fn stub_handler(
    State(stub): State<Stub>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    stub.seen.lock().unwrap().push(Seen {
        path: uri.path().to_string(),
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });
    tokio::time::sleep(stub.delay).await;
    (stub.status, Json(stub.reply.clone()))
}

/// Start the stub on an ephemeral port; returns its base URL and request log.
async fn start_stub(
    status: StatusCode,
    reply: Value,
    delay: Duration,
) -> (String, Arc<Mutex<Vec<Seen>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let stub = Stub {
        status,
        reply,
        delay,
        seen: seen.clone(),
    };
    let app = Router::new().fallback(stub_handler).with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{addr}/v1beta"), seen)
}

fn candidate(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

fn backend(base_url: &str) -> GeminiBackend {
    GeminiBackend::new("test-key", base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_gemini_success_roundtrip() {
    let verdict = json!({
        "riskLevel": "MALICIOUS",
        "score": 3,
        "summary": "Known phishing kit path.",
        "details": ["Brand impersonation"],
        "recommendation": "Block the domain."
    });
    let (url, seen) = start_stub(
        StatusCode::OK,
        candidate(&verdict.to_string()),
        Duration::ZERO,
    )
    .await;

    let analyzer = Analyzer::new(backend(&url)).with_model("gemini-2.5-flash");
    let result = analyzer
        .try_analyze(AnalysisMode::Url, "http://paypa1-login.example/verify")
        .await
        .unwrap();

    assert_eq!(result.risk_level, RiskLevel::Malicious);
    assert_eq!(result.score, 3);
    assert_eq!(result.details, vec!["Brand impersonation"]);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0].path,
        "/v1beta/models/gemini-2.5-flash:generateContent"
    );
    assert_eq!(seen[0].api_key.as_deref(), Some("test-key"));
    assert!(seen[0].body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .contains("paypa1-login"));
    assert_eq!(
        seen[0].body["generationConfig"]["responseMimeType"],
        "application/json"
    );
    assert_eq!(
        seen[0].body["generationConfig"]["responseSchema"]["required"],
        json!(["riskLevel", "score", "summary", "details", "recommendation"])
    );
}

#[tokio::test]
async fn test_gemini_error_status() {
    let (url, _) = start_stub(
        StatusCode::TOO_MANY_REQUESTS,
        json!({
            "error": {
                "code": 429,
                "message": "Resource has been exhausted",
                "status": "RESOURCE_EXHAUSTED"
            }
        }),
        Duration::ZERO,
    )
    .await;

    let analyzer = Analyzer::new(backend(&url));
    let err = analyzer
        .try_analyze(AnalysisMode::Email, "Dear user")
        .await
        .unwrap_err();

    match err {
        ScamShieldError::Upstream { status, ref message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "Resource has been exhausted");
        },
        ref other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.failure_kind(), Some(FailureKind::Transport));

    let result = analyzer.analyze(AnalysisMode::Email, "Dear user").await;
    assert!(result.is_fallback_for(AnalysisMode::Email));
}

#[tokio::test]
async fn test_gemini_blocked_prompt_is_empty() {
    let (url, _) = start_stub(
        StatusCode::OK,
        json!({"promptFeedback": {"blockReason": "SAFETY"}}),
        Duration::ZERO,
    )
    .await;

    let analyzer = Analyzer::new(backend(&url));
    let err = analyzer
        .try_analyze(AnalysisMode::Code, "rm -rf /")
        .await
        .unwrap_err();
    assert!(matches!(err, ScamShieldError::EmptyResponse));
}

#[tokio::test]
async fn test_gemini_non_conforming_text() {
    let (url, _) = start_stub(
        StatusCode::OK,
        candidate("```json\n{\"riskLevel\":\"SAFE\"}\n```"),
        Duration::ZERO,
    )
    .await;

    let analyzer = Analyzer::new(backend(&url));
    let result = analyzer.analyze(AnalysisMode::Code, "x = 1").await;
    assert!(result.is_fallback_for(AnalysisMode::Code));
}

#[tokio::test]
async fn test_gemini_timeout_falls_back() {
    let (url, _) = start_stub(
        StatusCode::OK,
        candidate("{}"),
        Duration::from_secs(2),
    )
    .await;

    let slow = GeminiBackend::new("test-key", &url, Duration::from_millis(100)).unwrap();
    let analyzer = Analyzer::new(slow);

    let err = analyzer
        .try_analyze(AnalysisMode::Password, "hunter2")
        .await
        .unwrap_err();
    assert_eq!(err.failure_kind(), Some(FailureKind::Transport));

    let result = analyzer.analyze(AnalysisMode::Password, "hunter2").await;
    assert!(result.is_fallback_for(AnalysisMode::Password));
}

#[tokio::test]
async fn test_gemini_connection_refused() {
    // Bind then drop to get a port nobody is listening on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let analyzer = Analyzer::new(backend(&format!("http://{addr}/v1beta")));
    let err = analyzer
        .try_analyze(AnalysisMode::Url, "https://example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, ScamShieldError::Transport(_)));
}
