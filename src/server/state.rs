//! Server state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::config::ServerConfig;
use crate::analysis::Analyzer;
use crate::inference::InferenceBackend;

/// Backend shared by all requests
pub type SharedBackend = Arc<dyn InferenceBackend>;

/// Application state shared across handlers
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
    /// Analyzer used for every request
    pub analyzer: Analyzer<SharedBackend>,
    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(config: ServerConfig, analyzer: Analyzer<SharedBackend>) -> Self {
        Self {
            config,
            analyzer,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}
