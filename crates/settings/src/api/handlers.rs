//! HTTP request handlers for the settings API.

use crate::api::models::*;
use crate::error::SettingsResult;
use crate::query::{aggregate_settings, filter_settings, FilterCriteria};
use crate::source::SettingsSource;
use crate::time::TimeZoneSetting;
use crate::types::SettingsStats;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use tracing::{debug, warn};

/// Greeting returned by `GET /`.
pub const WELCOME_MESSAGE: &str = "Welcome to the Fridge Settings API";

/// Endpoints advertised by `GET /`. `/stats` is served but not listed.
pub const ENDPOINTS: [&str; 1] = ["/settings"];

/// Shared state for settings API handlers.
pub struct SettingsApiState {
    /// Record source. Read-only, shared across requests.
    pub source: Arc<dyn SettingsSource>,
    /// Zone used for `formatted_time`.
    pub time_zone: TimeZoneSetting,
}

impl SettingsApiState {
    /// Create state from a source and an explicit time zone.
    pub fn new(source: Arc<dyn SettingsSource>, time_zone: TimeZoneSetting) -> Self {
        Self { source, time_zone }
    }

    /// Create state from the `api` configuration section.
    pub fn from_config(
        source: Arc<dyn SettingsSource>,
        config: &config::ApiConfig,
    ) -> SettingsResult<Self> {
        let time_zone = TimeZoneSetting::parse(&config.time_zone)?;
        Ok(Self::new(source, time_zone))
    }
}

/// GET /
pub async fn read_root() -> Json<RootResponse> {
    Json(RootResponse {
        message: WELCOME_MESSAGE.to_string(),
        endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
    })
}

/// GET /settings
pub async fn list_settings(
    State(state): State<Arc<SettingsApiState>>,
    params: Result<Query<SettingsParams>, QueryRejection>,
) -> Result<Json<SettingsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Query(params) = params.map_err(|rejection| {
        warn!(%rejection, "Rejected settings query");
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                detail: rejection.body_text(),
            }),
        )
    })?;

    let criteria: FilterCriteria = params.into();
    let data = filter_settings(state.source.records(), &criteria, state.time_zone);

    debug!(?criteria, matched = data.len(), "Filtered settings");

    Ok(Json(SettingsResponse { data }))
}

/// GET /stats
pub async fn get_stats(State(state): State<Arc<SettingsApiState>>) -> Json<SettingsStats> {
    let stats = aggregate_settings(state.source.records());
    debug!(total = stats.total_settings, "Computed settings statistics");
    Json(stats)
}
