//! Timestamp rendering.
//!
//! The zone used for `formatted_time` is explicit configuration. `Utc` is
//! the default; `Local` reads the host zone and is only used when a
//! deployment asks for it.

use crate::error::{SettingsError, SettingsResult};
use chrono::{DateTime, FixedOffset, Local, Utc};
use std::fmt;
use std::str::FromStr;

/// Display format for `formatted_time`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Time zone used when rendering record timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeZoneSetting {
    /// Coordinated Universal Time.
    #[default]
    Utc,
    /// The host's local zone.
    Local,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl TimeZoneSetting {
    /// Parse `UTC`, `Z`, `local` (case-insensitive) or a `+HH:MM` / `-HH:MM` offset.
    pub fn parse(s: &str) -> SettingsResult<Self> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "utc" | "z" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            _ => parse_offset(trimmed)
                .map(Self::Fixed)
                .ok_or_else(|| SettingsError::InvalidTimeZone(s.to_string())),
        }
    }

    /// Render a Unix timestamp as `YYYY-MM-DD HH:MM:SS` in this zone.
    ///
    /// Timestamps outside chrono's range fall back to the raw integer.
    pub fn format_timestamp(&self, timestamp: i64) -> String {
        let Some(utc) = DateTime::<Utc>::from_timestamp(timestamp, 0) else {
            return timestamp.to_string();
        };

        match self {
            Self::Utc => utc.format(TIMESTAMP_FORMAT).to_string(),
            Self::Local => utc.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string(),
            Self::Fixed(offset) => utc.with_timezone(offset).format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

impl fmt::Display for TimeZoneSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => write!(f, "UTC"),
            Self::Local => write!(f, "local"),
            Self::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

impl FromStr for TimeZoneSetting {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };

    let (hours, minutes) = rest.split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
