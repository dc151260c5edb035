//! Server configuration
//!
//! This module provides the HTTP server configuration type and the
//! default port constants.

use crate::error::{Result, ServerError};
use std::net::SocketAddr;
use std::time::Duration;

/// Default port assignments
pub mod ports {
    /// Settings API HTTP port
    pub const SETTINGS_HTTP: u16 = 8000;
}

/// Default grace period for in-flight requests on shutdown
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP server configuration
///
/// # Example
///
/// ```
/// use server::config::ServerConfig;
/// use std::time::Duration;
///
/// let config = ServerConfig::new("127.0.0.1", 8000)
///     .with_shutdown_timeout(Duration::from_secs(5));
/// assert_eq!(config.http_port, 8000);
/// ```
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to (e.g., "0.0.0.0" or "127.0.0.1")
    pub host: String,
    /// HTTP port. `0` asks the OS for an ephemeral port.
    pub http_port: u16,
    /// How long to wait for in-flight requests after shutdown is signalled
    pub shutdown_timeout: Duration,
}

impl ServerConfig {
    /// Create a new server config
    pub fn new(host: impl Into<String>, http_port: u16) -> Self {
        Self {
            host: host.into(),
            http_port,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }

    /// Set the shutdown grace period
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Get the HTTP socket address
    pub fn http_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.http_port)
            .parse()
            .map_err(|_| ServerError::InvalidAddress(format!("{}:{}", self.host, self.http_port)))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("0.0.0.0", ports::SETTINGS_HTTP)
    }
}
