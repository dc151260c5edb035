//! Axum route definitions for the settings API.

use crate::api::handlers::{self, SettingsApiState};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

/// Create all settings routes.
///
/// # Routes
///
/// - `GET /` - Welcome message and endpoint list
/// - `GET /settings` - List settings with optional filters
/// - `GET /stats` - Aggregate statistics over all settings
pub fn settings_routes(state: Arc<SettingsApiState>) -> Router {
    Router::new()
        .route("/", get(handlers::read_root))
        .route("/settings", get(handlers::list_settings))
        .route("/stats", get(handlers::get_stats))
        .with_state(state)
}
