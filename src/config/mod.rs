//! Configuration management.
//!
//! Supports configuration from:
//! - TOML config files
//! - Environment variables
//! - CLI arguments (for the server)

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScamShieldError};
use crate::inference::{DEFAULT_API_URL, DEFAULT_MODEL};

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Inference backend configuration
    #[serde(default)]
    pub backend: BackendConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerSettings,
}

impl Config {
    /// Default config file location (`<config dir>/scamshield/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("scamshield").join("config.toml"))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ScamShieldError::Config(format!("Failed to read config file: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ScamShieldError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::default().apply_lookup(env_lookup)
    }

    /// Override settings with the variables `lookup` knows about.
    ///
    /// A variable that is set always wins, even when its value equals the
    /// default. Unparseable numbers and a zero timeout are ignored.
    fn apply_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Backend settings
        if let Some(model) = lookup("SCAMSHIELD_MODEL") {
            self.backend.model = model;
        }
        if let Some(url) = lookup("SCAMSHIELD_API_URL") {
            self.backend.api_url = url;
        }
        if let Some(timeout) = lookup("SCAMSHIELD_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => self.backend.timeout_secs = secs,
                _ => tracing::warn!(value = %timeout, "Ignoring invalid SCAMSHIELD_TIMEOUT_SECS"),
            }
        }
        if let Some(key) = lookup("GEMINI_API_KEY").or_else(|| lookup("API_KEY")) {
            self.backend.api_key = Some(key);
        }

        // Server settings
        if let Some(host) = lookup("SCAMSHIELD_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SCAMSHIELD_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid SCAMSHIELD_PORT"),
            }
        }

        self
    }

    /// Load from `path` (or the default location) when the file exists, then
    /// apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, env_lookup)
    }

    fn load_with(path: Option<&Path>, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let file_path = path.map(Path::to_path_buf).or_else(Self::default_path);

        let base = match file_path {
            Some(p) if p.exists() => {
                tracing::debug!(path = %p.display(), "Loading config file");
                Self::from_file(p)?
            },
            Some(p) if path.is_some() => {
                return Err(ScamShieldError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            },
            _ => Self::default(),
        };

        Ok(base.apply_lookup(lookup))
    }

    /// Reject settings that would make every analysis fail.
    pub fn validate(&self) -> Result<()> {
        if self.backend.timeout_secs == 0 {
            return Err(ScamShieldError::Config(
                "backend.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Inference backend configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Model identifier
    pub model: String,

    /// Base URL of the Gemini REST API
    pub api_url: String,

    /// API key (never written back out)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            timeout_secs: 60,
        }
    }
}

impl BackendConfig {
    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Maximum request body size in bytes
    pub max_body_size: usize,

    /// Enable permissive CORS
    pub cors: bool,

    /// Enable per-request trace logging
    pub request_logging: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_body_size: 1024 * 1024, // 1 MB
            cors: true,
            request_logging: true,
        }
    }
}

impl ServerSettings {
    /// Get the full listen address
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
