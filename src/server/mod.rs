//! ScamShield HTTP server.
//!
//! Exposes the analyzer to presentation layers:
//!
//! | Method | Path       | Purpose                                   |
//! |--------|------------|-------------------------------------------|
//! | GET    | `/health`  | Liveness                                  |
//! | GET    | `/status`  | Uptime, backend and model                 |
//! | GET    | `/modes`   | Modes with title, description and sample  |
//! | POST   | `/analyze` | `{mode, input}` -> scan report            |
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use scamshield::server::{serve, AppState, ServerConfig};
//!
//! let state = Arc::new(AppState::new(ServerConfig::default(), analyzer));
//! serve(state).await?;
//! ```

mod config;
mod handlers;
mod state;

pub use config::ServerConfig;
pub use handlers::{create_router, health_check, AnalyzeRequest, ModeInfo};
pub use state::{AppState, SharedBackend};

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::error::{Result, ScamShieldError};

/// Bind the configured address and serve until the process exits.
pub async fn serve(state: Arc<AppState>) -> Result<()> {
    let addr = state.config.addr;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ScamShieldError::Server(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("ScamShield server listening on http://{}", addr);

    axum::serve(listener, create_router(state))
        .await
        .map_err(|e| ScamShieldError::Server(format!("Server error: {e}")))
}
