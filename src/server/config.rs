//! Server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::config::ServerSettings;
use crate::error::{Result, ScamShieldError};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub addr: SocketAddr,
    /// Maximum request body size (bytes)
    pub max_body_size: usize,
    /// Enable request logging
    pub logging: bool,
    /// CORS enabled
    pub cors_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_body_size: 1024 * 1024, // 1MB
            logging: true,
            cors_enabled: true,
        }
    }
}

impl ServerConfig {
    /// Build from file/env settings
    pub fn from_settings(settings: &ServerSettings) -> Result<Self> {
        let addr: SocketAddr = settings.listen_addr().parse().map_err(|e| {
            ScamShieldError::Config(format!(
                "Invalid listen address {}: {e}",
                settings.listen_addr()
            ))
        })?;

        Ok(Self {
            addr,
            max_body_size: settings.max_body_size,
            logging: settings.request_logging,
            cors_enabled: settings.cors,
        })
    }

    /// Create with custom port
    pub fn with_port(mut self, port: u16) -> Self {
        self.addr.set_port(port);
        self
    }

    /// Bind to all interfaces
    pub fn bind_all(mut self) -> Self {
        self.addr.set_ip(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        self
    }

    /// Set max body size
    pub fn with_max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    /// Disable logging
    pub fn without_logging(mut self) -> Self {
        self.logging = false;
        self
    }

    /// Disable CORS
    pub fn without_cors(mut self) -> Self {
        self.cors_enabled = false;
        self
    }
}
