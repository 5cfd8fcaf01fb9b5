//! ScamShield error types.
//!
//! Every failure on the analysis path falls into one of three kinds:
//!
//! | Kind              | Raised when                                              |
//! |-------------------|----------------------------------------------------------|
//! | `Transport`       | network error, timeout, non-2xx, backend-reported error  |
//! | `EmptyResponse`   | the backend answered but produced no usable text         |
//! | `SchemaViolation` | the text is not JSON or breaks the result contract       |
//!
//! [`Analyzer::analyze`](crate::analysis::Analyzer::analyze) converts all of
//! them into the mode's fallback result. The remaining variants cover the
//! surfaces around the core (configuration, the HTTP server, caller input).

use std::fmt;

use thiserror::Error;

/// ScamShield errors.
#[derive(Error, Debug)]
pub enum ScamShieldError {
    /// Network communication with the inference backend failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The inference backend answered with a non-success status or an error body.
    #[error("Upstream error ({status}): {message}")]
    Upstream {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Message reported by the backend.
        message: String,
    },

    /// The backend call succeeded but carried no text.
    #[error("Empty response from inference backend")]
    EmptyResponse,

    /// The backend text does not satisfy the analysis result contract.
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Caller-supplied input was rejected before analysis.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Server-side error.
    #[error("Server error: {0}")]
    Server(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ScamShield operations
pub type Result<T> = std::result::Result<T, ScamShieldError>;

/// Classification of analysis-path failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network, timeout, non-2xx or backend-reported error.
    Transport,
    /// Backend returned no usable text.
    EmptyResponse,
    /// Returned text failed validation.
    SchemaViolation,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transport => "transport",
            Self::EmptyResponse => "empty_response",
            Self::SchemaViolation => "schema_violation",
        };
        f.write_str(name)
    }
}

impl ScamShieldError {
    /// Which analysis failure this error represents, if any.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Transport(_) | Self::Upstream { .. } => Some(FailureKind::Transport),
            Self::EmptyResponse => Some(FailureKind::EmptyResponse),
            Self::SchemaViolation(_) | Self::Json(_) => Some(FailureKind::SchemaViolation),
            Self::InvalidInput(_) | Self::Config(_) | Self::Server(_) | Self::Io(_) => None,
        }
    }
}

impl From<reqwest::Error> for ScamShieldError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ScamShieldError::Transport(format!("request timed out: {err}"))
        } else {
            ScamShieldError::Transport(err.to_string())
        }
    }
}

impl From<toml::de::Error> for ScamShieldError {
    fn from(err: toml::de::Error) -> Self {
        ScamShieldError::Config(err.to_string())
    }
}
