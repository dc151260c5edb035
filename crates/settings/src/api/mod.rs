//! HTTP API for fridge settings.
//!
//! ## Modules
//!
//! - `handlers` - Axum handlers and shared state
//! - `routes` - Axum router
//! - `models` - Request/response types

pub mod handlers;
pub mod models;
pub mod routes;

pub use handlers::SettingsApiState;
pub use routes::settings_routes;
