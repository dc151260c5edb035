//! Observability infrastructure for the Fridge Settings API
//!
//! This crate provides:
//! - Structured logging via tracing
//! - Prometheus metrics
//! - Per-route request metric helpers
//!
//! # Quick Start
//!
//! ```ignore
//! use observability::{init_logging, LogFormat};
//!
//! // Initialize logging
//! init_logging("fridge-settings", LogFormat::Pretty)?;
//!
//! // Initialize metrics (optional)
//! observability::metrics::init_metrics("0.0.0.0", 9100)?;
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LogFormat};
pub use metrics::{init_metrics, ApiMetrics};
