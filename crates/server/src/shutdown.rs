//! Graceful shutdown coordination
//!
//! A [`ShutdownController`] owns the root `CancellationToken`. Servers get
//! child tokens, so cancelling the controller stops every server while a
//! single server can still be stopped on its own.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Coordinates graceful shutdown across the running servers
///
/// # Example
///
/// ```ignore
/// let shutdown = ShutdownController::with_signals();
///
/// let (handle, _) = http_server.spawn_with(shutdown.child_token());
/// handle.await??;
/// ```
#[derive(Clone)]
pub struct ShutdownController {
    token: CancellationToken,
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownController {
    /// Create a controller that only shuts down when told to
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Create a controller cancelled by Ctrl+C, or SIGTERM on unix
    ///
    /// Must be called from within a Tokio runtime.
    pub fn with_signals() -> Self {
        let controller = Self::new();
        let token = controller.token.clone();

        tokio::spawn(async move {
            let signal = wait_for_signal().await;
            info!(signal, "Received shutdown signal, draining requests");
            token.cancel();
        });

        controller
    }

    /// Token cancelled together with this controller
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }

    /// Trigger shutdown manually
    pub fn shutdown(&self) {
        info!("Manual shutdown triggered");
        self.token.cancel();
    }
}

/// Resolve with the name of the first termination signal received
async fn wait_for_signal() -> &'static str {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(%e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(%e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => "SIGINT",
        _ = terminate => "SIGTERM",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_manual_shutdown_cancels_children() {
        let controller = ShutdownController::new();
        let token = controller.child_token();

        assert!(!token.is_cancelled());

        controller.shutdown();

        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_child_cancel_does_not_propagate_up() {
        let controller = ShutdownController::new();
        let first = controller.child_token();
        let second = controller.child_token();

        first.cancel();
        assert!(!second.is_cancelled());

        controller.shutdown();
        assert!(second.is_cancelled());
    }

    #[tokio::test]
    async fn test_signal_controller_can_be_shut_down_manually() {
        let controller = ShutdownController::with_signals();
        let token = controller.child_token();
        let trigger = controller.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.shutdown();
        });

        let waited = tokio::time::timeout(Duration::from_secs(1), token.cancelled()).await;
        assert!(waited.is_ok());
    }
}
