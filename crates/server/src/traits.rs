//! Server lifecycle traits
//!
//! [`Server`] is what a runnable server implements. [`ServerExt`] adds the
//! spawn and signal-driven helpers on top of it.

use async_trait::async_trait;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;

use crate::error::Result;

/// Core server trait.
///
/// # Implementors
///
/// - [`HttpServer`](crate::http::HttpServer) - HTTP server using Axum
#[async_trait]
pub trait Server: Send + Sync + 'static {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Address the server is bound to, or `None` when not listening.
    fn address(&self) -> Option<SocketAddr>;

    fn is_running(&self) -> bool;

    /// Runs the server until the shutdown token is cancelled.
    ///
    /// Implementations bind, serve until `shutdown` fires, drain in-flight
    /// requests, then return `Ok(())`.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind or hits a fatal I/O error.
    async fn run(&self, shutdown: CancellationToken) -> Result<()>;
}

/// Convenience methods, implemented for every [`Server`].
pub trait ServerExt: Server + Sized {
    /// Spawns the server on a new task with a fresh shutdown token.
    ///
    /// ```ignore
    /// let (handle, token) = HttpServer::new(config, router).spawn();
    /// token.cancel();
    /// handle.await??;
    /// ```
    fn spawn(self) -> (tokio::task::JoinHandle<Result<()>>, CancellationToken) {
        self.spawn_with(CancellationToken::new())
    }

    /// Spawns the server on a new task driven by an existing token.
    fn spawn_with(
        self,
        token: CancellationToken,
    ) -> (tokio::task::JoinHandle<Result<()>>, CancellationToken) {
        let server_token = token.clone();
        let handle = tokio::spawn(async move { self.run(server_token).await });
        (handle, token)
    }

    /// Runs the server until Ctrl+C or SIGTERM.
    fn run_with_ctrl_c(self) -> impl std::future::Future<Output = Result<()>> + Send {
        async move {
            let shutdown = crate::shutdown::ShutdownController::with_signals();
            self.run(shutdown.child_token()).await
        }
    }
}

impl<T: Server + Sized> ServerExt for T {}
