//! HTTP request handlers.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::state::AppState;
use crate::analysis::{require_input, AnalysisMode};
use crate::inference::InferenceBackend;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let max_body_size = state.config.max_body_size;
    let cors_enabled = state.config.cors_enabled;
    let logging = state.config.logging;

    let mut router = Router::new()
        // Health and status
        .route("/health", get(health_check))
        .route("/status", get(status))
        // Analysis
        .route("/modes", get(list_modes))
        .route("/analyze", post(analyze))
        .layer(DefaultBodyLimit::max(max_body_size))
        .with_state(state);

    if cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }
    if logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Status response
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
    pub backend: &'static str,
    pub model: String,
}

/// Status endpoint
async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.uptime().as_secs(),
        backend: state.analyzer.backend().name(),
        model: state.analyzer.model().to_string(),
    })
}

/// Mode description
#[derive(Serialize)]
pub struct ModeInfo {
    pub mode: AnalysisMode,
    pub title: &'static str,
    pub description: &'static str,
    pub sample: &'static str,
}

/// List available analysis modes
async fn list_modes() -> impl IntoResponse {
    let modes: Vec<ModeInfo> = AnalysisMode::ALL
        .into_iter()
        .map(|mode| ModeInfo {
            mode,
            title: mode.title(),
            description: mode.description(),
            sample: mode.sample_input(),
        })
        .collect();
    Json(modes)
}

/// Analyze request
#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub mode: String,
    pub input: String,
}

/// Analyze a submission.
///
/// Backend failures still answer 200 with the fallback verdict; only bad
/// requests are rejected, always with a JSON `{"error": ...}` body.
async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(req) => req,
        Err(rejection) => return error_response(rejection.status(), &rejection.body_text()),
    };
    let mode = match AnalysisMode::from_str(&req.mode) {
        Ok(mode) => mode,
        Err(e) => return bad_request(&e.to_string()),
    };
    let input = match require_input(&req.input) {
        Ok(input) => input,
        Err(e) => return bad_request(&e.to_string()),
    };

    let report = state.analyzer.scan(mode, input).await;
    if report.is_fallback() {
        tracing::info!(
            scan_id = %report.scan_id,
            mode = %mode,
            "Scan completed with fallback verdict"
        );
    }

    (StatusCode::OK, Json(report)).into_response()
}

fn bad_request(message: &str) -> Response {
    error_response(StatusCode::BAD_REQUEST, message)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({"error": message}))).into_response()
}
