//! Port validation utilities
//!
//! Checking a port before binding is racy: another process can take it in
//! between. These checks give early, readable startup errors; the real bind
//! in [`HttpServer::run`](crate::HttpServer) remains authoritative.

use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};

/// Validate that the configured HTTP port plus any extra named ports are free
///
/// Port `0` entries are skipped since the OS picks one at bind time.
pub async fn validate_ports_available(config: &ServerConfig, extra: &[(&str, u16)]) -> Result<()> {
    let mut ports_to_check = vec![("HTTP", config.http_port)];
    ports_to_check.extend_from_slice(extra);

    for (purpose, port) in ports_to_check {
        if port == 0 {
            debug!(purpose, "Skipping ephemeral port check");
            continue;
        }
        validate_single_port(&config.host, port, purpose).await?;
    }

    info!("Server ports validated");
    Ok(())
}

async fn validate_single_port(host: &str, port: u16, purpose: &str) -> Result<()> {
    let addr = format!("{}:{}", host, port);
    debug!(purpose, port, "Checking port");

    match TcpListener::bind(&addr).await {
        Ok(listener) => {
            let local_addr = listener
                .local_addr()
                .map_err(|e| ServerError::bind(addr.clone(), e))?;
            drop(listener);

            debug!(purpose, %local_addr, "Port is available");
            Ok(())
        }
        Err(e) => {
            error!(purpose, port, %e, "Port is not available");
            Err(ServerError::port_in_use(port, e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_validate_ports_available() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let taken = listener.local_addr().unwrap().port();

        let free = ServerConfig::new("127.0.0.1", 0);
        assert!(validate_ports_available(&free, &[]).await.is_ok());

        let busy = ServerConfig::new("127.0.0.1", taken);
        let err = validate_ports_available(&busy, &[]).await;
        assert!(matches!(err, Err(ServerError::PortInUse { port, .. }) if port == taken));

        let err = validate_ports_available(&free, &[("metrics", taken)]).await;
        assert!(matches!(err, Err(ServerError::PortInUse { .. })));
    }
}
