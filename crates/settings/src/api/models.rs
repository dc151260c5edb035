//! API request/response models.

use crate::query::FilterCriteria;
use crate::types::FormattedSetting;
use serde::{Deserialize, Serialize};

/// Query parameters for `GET /settings`.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsParams {
    pub fridge_id: Option<i64>,
    pub instrument_name: Option<String>,
    pub parameter_name: Option<String>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

impl From<SettingsParams> for FilterCriteria {
    fn from(params: SettingsParams) -> Self {
        Self {
            fridge_id: params.fridge_id,
            instrument_name: params.instrument_name,
            parameter_name: params.parameter_name,
            min_value: params.min_value,
            max_value: params.max_value,
        }
    }
}

/// Response for `GET /`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub endpoints: Vec<String>,
}

/// Response for `GET /settings`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub data: Vec<FormattedSetting>,
}

/// Error response. `detail` is what API clients display.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
