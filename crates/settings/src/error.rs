//! Error types for the settings crate.
//!
//! Filtering and aggregation never fail; errors only arise while turning
//! configuration into runtime settings.

use thiserror::Error;

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors that can occur while preparing the settings service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// Time zone string is neither `UTC`, `local`, nor a `+HH:MM` offset.
    #[error("Invalid time zone: {0}. Expected UTC, local, or an offset like +05:30")]
    InvalidTimeZone(String),
}
