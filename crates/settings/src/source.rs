//! Settings sources.
//!
//! `SettingsSource` hides where records come from. The query engine only
//! ever sees a `&[SettingRecord]`, so a database-backed source can replace
//! `StaticSettings` without touching filtering or aggregation.

use crate::types::SettingRecord;
use std::sync::Arc;

/// Trait for read-only access to a record set.
///
/// Implementations must hand out the same records for the lifetime of the
/// process; callers may share them across threads without locking.
///
/// # Example
///
/// ```ignore
/// use settings::{aggregate_settings, SettingsSource, StaticSettings};
///
/// let source = StaticSettings::sample();
/// let stats = aggregate_settings(source.records());
/// assert_eq!(stats.total_settings, 5);
/// ```
pub trait SettingsSource: Send + Sync {
    /// All records, in their original order.
    fn records(&self) -> &[SettingRecord];

    /// Short name of the source, used in logs.
    fn name(&self) -> &str {
        "static"
    }
}

/// Immutable in-memory record set, fixed at construction.
#[derive(Debug, Clone)]
pub struct StaticSettings {
    records: Arc<[SettingRecord]>,
}

impl StaticSettings {
    /// Build a source over the built-in sample dataset.
    pub fn sample() -> Self {
        Self::from_records(sample_records())
    }

    /// Build a source over an arbitrary record list.
    pub fn from_records(records: Vec<SettingRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Get the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the source holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for StaticSettings {
    fn default() -> Self {
        Self::sample()
    }
}

impl SettingsSource for StaticSettings {
    fn records(&self) -> &[SettingRecord] {
        &self.records
    }
}

/// The built-in five-record dataset served by the API.
pub fn sample_records() -> Vec<SettingRecord> {
    vec![
        SettingRecord::new(1, "instrument_one", "flux_bias", 0.37, 1739596596),
        SettingRecord::new(2, "instrument_two", "temperature", -0.12, 1739597890),
        SettingRecord::new(3, "instrument_three", "power_level", 1.25, 1739601234),
        SettingRecord::new(1, "instrument_four", "current_bias", 0.89, 1739612345),
        SettingRecord::new(2, "instrument_five", "voltage", 0.02, 1739623456),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_source() {
        let source = StaticSettings::sample();
        assert_eq!(source.len(), 5);
        assert!(!source.is_empty());
        assert_eq!(source.name(), "static");
        assert_eq!(source.records()[0].instrument_name, "instrument_one");
        assert_eq!(source.records()[4].parameter_name, "voltage");
    }

    #[test]
    fn test_clones_share_records() {
        let source = StaticSettings::sample();
        let clone = source.clone();
        assert!(std::ptr::eq(source.records(), clone.records()));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let record = SettingRecord::new(7, "dup", "dup", 1.0, 0);
        let source = StaticSettings::from_records(vec![record.clone(), record]);
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn test_empty_source() {
        let source = StaticSettings::from_records(Vec::new());
        assert!(source.is_empty());
        assert!(source.records().is_empty());
    }
}
