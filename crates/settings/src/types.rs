//! Core domain types for fridge settings.
//!
//! - `SettingRecord`: one applied parameter value on an instrument
//! - `FormattedSetting`: a record copy carrying a rendered timestamp
//! - `SettingsStats`: summary statistics over a record set

use serde::{Deserialize, Serialize};

/// One observation of a parameter applied to an instrument.
///
/// Records carry no identity beyond their field values. Two records with
/// identical fields are distinct, independent entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingRecord {
    /// Fridge identifier. Shared by every instrument in the same fridge.
    pub fridge_id: i64,
    /// Instrument label.
    pub instrument_name: String,
    /// Parameter label.
    pub parameter_name: String,
    /// Applied value (signed, unbounded).
    pub applied_value: f64,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
}

impl SettingRecord {
    /// Create a new record.
    pub fn new(
        fridge_id: i64,
        instrument_name: impl Into<String>,
        parameter_name: impl Into<String>,
        applied_value: f64,
        timestamp: i64,
    ) -> Self {
        Self {
            fridge_id,
            instrument_name: instrument_name.into(),
            parameter_name: parameter_name.into(),
            applied_value,
            timestamp,
        }
    }
}

/// A setting record with its timestamp rendered for display.
///
/// Serializes flat: the record fields and `formatted_time` share one
/// JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedSetting {
    #[serde(flatten)]
    pub record: SettingRecord,
    pub formatted_time: String,
}

/// Summary statistics over a record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsStats {
    pub total_settings: usize,
    pub unique_fridges: usize,
    pub unique_instruments: usize,
    pub unique_parameters: usize,
    pub min_value: f64,
    pub max_value: f64,
    /// Mean applied value, rounded to two decimals.
    pub avg_value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_setting_serializes_flat() {
        let setting = FormattedSetting {
            record: SettingRecord::new(1, "instrument_one", "flux_bias", 0.37, 1739596596),
            formatted_time: "2025-02-15 05:16:36".to_string(),
        };

        let json = serde_json::to_value(&setting).unwrap();
        assert_eq!(json["fridge_id"], 1);
        assert_eq!(json["instrument_name"], "instrument_one");
        assert_eq!(json["parameter_name"], "flux_bias");
        assert_eq!(json["applied_value"], 0.37);
        assert_eq!(json["timestamp"], 1739596596);
        assert_eq!(json["formatted_time"], "2025-02-15 05:16:36");
        assert!(json.get("record").is_none());
    }

    #[test]
    fn test_default_stats_are_zero() {
        let stats = SettingsStats::default();
        assert_eq!(stats.total_settings, 0);
        assert_eq!(stats.min_value, 0.0);
        assert_eq!(stats.max_value, 0.0);
        assert_eq!(stats.avg_value, 0.0);
    }
}
