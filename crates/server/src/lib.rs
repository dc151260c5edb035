//! Server infrastructure for the Fridge Settings API
//!
//! This crate provides the HTTP server, its layer stack and the lifecycle
//! plumbing (graceful shutdown, port checks, health endpoint). It knows
//! nothing about settings records; API crates hand it a [`axum::Router`].
//!
//! # Architecture
//!
//! Servers implement the [`Server`] trait, which provides a consistent
//! interface for running and monitoring them. The [`ServerExt`] trait
//! provides `spawn()` and `run_with_ctrl_c()`.
//!
//! Shutdown coordination uses `CancellationToken` from `tokio_util`:
//! cancelling a parent token cancels all of its children.
//!
//! # Quick Start
//!
//! ```ignore
//! use server::{with_standard_layers, CorsPolicy, HttpServer, ServerConfig, ServerExt};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let app = with_standard_layers(api_router, &CorsPolicy::permissive(), metrics);
//!     HttpServer::new(ServerConfig::default(), app)
//!         .run_with_ctrl_c()
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`] - Server configuration and port constants
//! - [`cors`] - Cross-origin policy
//! - [`traits`] - `Server` and `ServerExt` traits
//! - [`http`] - HTTP server using Axum, plus the standard layers
//! - [`health`] - Health check endpoint
//! - [`shutdown`] - Graceful shutdown utilities
//! - [`port_validator`] - Early port availability checks

pub mod config;
pub mod cors;
pub mod error;
pub mod health;
pub mod http;
pub mod port_validator;
pub mod shutdown;
pub mod traits;

pub use config::{ports, ServerConfig};
pub use cors::{build_cors_layer, CorsPolicy};
pub use error::{Result, ServerError};
pub use health::{health_routes, HealthState, HealthStatus};
pub use http::{with_standard_layers, HttpServer};
pub use port_validator::validate_ports_available;
pub use shutdown::ShutdownController;
pub use traits::{Server, ServerExt};
