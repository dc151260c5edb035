//! # Settings Crate
//!
//! Read-only view over fridge instrument settings. Each record is one
//! observation of a parameter applied to an instrument on a fridge.
//!
//! ## Key Components
//!
//! - **Domain Types**: `SettingRecord`, `FormattedSetting`, `SettingsStats`
//! - **Source**: `SettingsSource` trait and the `StaticSettings` dataset
//! - **Query Engine**: `filter_settings` and `aggregate_settings`, pure
//!   functions taking the record slice as an explicit argument
//! - **Time**: `TimeZoneSetting` controls how `formatted_time` renders
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       HTTP layer (api)                      │
//! │   GET /            GET /settings?...          GET /stats    │
//! └──────────────────────────────┬──────────────────────────────┘
//!                                │ FilterCriteria
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Query Engine                         │
//! │   filter_settings(records, criteria, tz) -> Vec<Formatted>  │
//! │   aggregate_settings(records)            -> SettingsStats   │
//! └──────────────────────────────┬──────────────────────────────┘
//!                                │ &[SettingRecord]
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │            SettingsSource (StaticSettings today)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod query;
pub mod source;
pub mod time;
pub mod types;

#[cfg(feature = "api")]
pub mod api;

// Re-export main types for convenience
pub use error::{SettingsError, SettingsResult};
pub use query::{aggregate_settings, filter_settings, matching_records, FilterCriteria};
pub use source::{sample_records, SettingsSource, StaticSettings};
pub use time::{TimeZoneSetting, TIMESTAMP_FORMAT};
pub use types::{FormattedSetting, SettingRecord, SettingsStats};
