//! HTTP server implementation using Axum
//!
//! This module provides an HTTP server built on Axum, implementing the
//! [`Server`](crate::Server) trait for consistent lifecycle management,
//! plus the layer stack (CORS, tracing, metrics) every API router gets.

use async_trait::async_trait;
use axum::extract::{MatchedPath, Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use observability::ApiMetrics;
use parking_lot::RwLock;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::ServerConfig;
use crate::cors::{build_cors_layer, CorsPolicy};
use crate::error::{Result, ServerError};
use crate::traits::Server;

/// HTTP server implementation using Axum
///
/// # Example
///
/// ```ignore
/// use server::{HttpServer, ServerConfig, ServerExt};
///
/// let config = ServerConfig::new("127.0.0.1", 8000);
/// let server = HttpServer::new(config, router);
///
/// // Run with Ctrl+C handling
/// server.run_with_ctrl_c().await?;
/// ```
#[derive(Clone)]
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
    running: Arc<AtomicBool>,
    bound_addr: Arc<RwLock<Option<SocketAddr>>>,
}

impl HttpServer {
    /// Create a new HTTP server with a custom router
    pub fn new(config: ServerConfig, router: Router) -> Self {
        Self {
            config,
            router,
            running: Arc::new(AtomicBool::new(false)),
            bound_addr: Arc::new(RwLock::new(None)),
        }
    }
}

#[async_trait]
impl Server for HttpServer {
    fn name(&self) -> &str {
        "http"
    }

    fn address(&self) -> Option<SocketAddr> {
        *self.bound_addr.read()
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    async fn run(&self, shutdown_token: CancellationToken) -> Result<()> {
        let addr = self.config.http_addr()?;

        info!(%addr, "Starting HTTP server");

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::bind(addr.to_string(), e))?;

        let local_addr = listener.local_addr().map_err(ServerError::Io)?;
        *self.bound_addr.write() = Some(local_addr);

        info!(%local_addr, "HTTP server listening");

        self.running.store(true, Ordering::SeqCst);

        let drain_token = shutdown_token.clone();
        let grace = self.config.shutdown_timeout;

        let serve = axum::serve(listener, self.router.clone())
            .with_graceful_shutdown(async move {
                shutdown_token.cancelled().await;
                info!("HTTP server received shutdown signal");
            })
            .into_future();

        // In-flight requests get `grace` to finish once shutdown starts
        let result = tokio::select! {
            result = serve => result,
            _ = async move {
                drain_token.cancelled().await;
                tokio::time::sleep(grace).await;
            } => {
                warn!(?grace, "Timed out waiting for in-flight requests");
                Ok(())
            }
        };

        self.running.store(false, Ordering::SeqCst);
        *self.bound_addr.write() = None;

        match result {
            Ok(()) => {
                info!("HTTP server shutdown complete");
                Ok(())
            }
            Err(e) => {
                error!(%e, "HTTP server error");
                Err(ServerError::Io(e))
            }
        }
    }
}

/// Wrap an API router with the standard layer stack
///
/// From the outside in: CORS, request tracing, request metrics. CORS sits
/// outermost so preflight requests are answered before routing.
pub fn with_standard_layers(router: Router, cors: &CorsPolicy, metrics: ApiMetrics) -> Router {
    router
        .layer(middleware::from_fn_with_state(metrics, track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(cors))
}

/// Record count, status and latency per matched route
async fn track_metrics(State(metrics): State<ApiMetrics>, request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let start = Instant::now();
    let response = next.run(request).await;
    metrics.record_request(&route, start.elapsed(), response.status().as_u16());

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::{health_routes, HealthState};
    use crate::traits::ServerExt;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn health_only(config: ServerConfig) -> HttpServer {
        HttpServer::new(config, health_routes(Arc::new(HealthState::new("test"))))
    }

    fn ephemeral_config() -> ServerConfig {
        // Port 0 asks the OS for a free port
        ServerConfig::new("127.0.0.1", 0).with_shutdown_timeout(Duration::from_secs(2))
    }

    async fn wait_for_address(server: &HttpServer) -> SocketAddr {
        for _ in 0..50 {
            if let Some(addr) = server.address() {
                return addr;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("server did not bind in time");
    }

    #[tokio::test]
    async fn test_http_server_shutdown() {
        let server = health_only(ephemeral_config());
        let (handle, token) = server.spawn();

        // Give server time to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        token.cancel();

        let result = tokio::time::timeout(Duration::from_secs(5), handle).await;
        assert!(result.is_ok(), "Server should shutdown within timeout");
    }

    #[tokio::test]
    async fn test_http_server_serves_health() {
        let server = health_only(ephemeral_config());
        let observer = server.clone();
        let (handle, token) = server.spawn();

        let addr = wait_for_address(&observer).await;
        assert!(observer.is_running());

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        assert!(response.starts_with("HTTP/1.1 200"), "got: {response}");
        assert!(response.contains("\"status\":\"ok\""));

        token.cancel();
        let result = tokio::time::timeout(Duration::from_secs(5), handle).await;
        assert!(result.is_ok());
        assert!(!observer.is_running());
        assert!(observer.address().is_none());
    }

    #[tokio::test]
    async fn test_bind_failure_is_reported() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let server = health_only(ServerConfig::new("127.0.0.1", port));
        let result = server.run(CancellationToken::new()).await;

        assert!(matches!(result, Err(ServerError::BindError { .. })));
    }

    #[test]
    fn test_http_server_name() {
        let server = health_only(ServerConfig::new("127.0.0.1", 8000));
        assert_eq!(server.name(), "http");
        assert!(!server.is_running());
    }
}
