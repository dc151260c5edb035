//! Query engine: filtering and aggregate statistics.
//!
//! Both operations are pure and total. They take the record slice as an
//! argument and never touch process-wide state.

use crate::time::TimeZoneSetting;
use crate::types::{FormattedSetting, SettingRecord, SettingsStats};
use std::collections::HashSet;

/// Optional predicates applied to records. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Exact fridge id.
    pub fridge_id: Option<i64>,
    /// Case-insensitive substring of the instrument name.
    pub instrument_name: Option<String>,
    /// Case-insensitive substring of the parameter name.
    pub parameter_name: Option<String>,
    /// Inclusive lower bound on the applied value.
    pub min_value: Option<f64>,
    /// Inclusive upper bound on the applied value.
    pub max_value: Option<f64>,
}

impl FilterCriteria {
    /// Create a new empty criteria set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by fridge id.
    pub fn with_fridge_id(mut self, fridge_id: i64) -> Self {
        self.fridge_id = Some(fridge_id);
        self
    }

    /// Filter by instrument name fragment.
    pub fn with_instrument_name(mut self, name: impl Into<String>) -> Self {
        self.instrument_name = Some(name.into());
        self
    }

    /// Filter by parameter name fragment.
    pub fn with_parameter_name(mut self, name: impl Into<String>) -> Self {
        self.parameter_name = Some(name.into());
        self
    }

    /// Filter by applied value range. Either bound may be open.
    pub fn with_value_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    /// True when no predicate is set.
    pub fn is_empty(&self) -> bool {
        self.fridge_id.is_none()
            && self.instrument_name.is_none()
            && self.parameter_name.is_none()
            && self.min_value.is_none()
            && self.max_value.is_none()
    }

    /// Check if a record satisfies every set predicate.
    ///
    /// A NaN applied value never satisfies a value bound.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn matches(&self, record: &SettingRecord) -> bool {
        if let Some(fridge_id) = self.fridge_id {
            if record.fridge_id != fridge_id {
                return false;
            }
        }

        if let Some(ref name) = self.instrument_name {
            if !contains_ignore_case(&record.instrument_name, name) {
                return false;
            }
        }

        if let Some(ref name) = self.parameter_name {
            if !contains_ignore_case(&record.parameter_name, name) {
                return false;
            }
        }

        if let Some(min_value) = self.min_value {
            if !(record.applied_value >= min_value) {
                return false;
            }
        }

        if let Some(max_value) = self.max_value {
            if !(record.applied_value <= max_value) {
                return false;
            }
        }

        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Records matching `criteria`, in their original order.
pub fn matching_records<'a>(
    records: &'a [SettingRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a SettingRecord> {
    records.iter().filter(|r| criteria.matches(r)).collect()
}

/// Filter records and attach `formatted_time` to each match.
///
/// The output is a stable subsequence of `records`. Matching nothing, or
/// an inverted value range, yields an empty vector.
pub fn filter_settings(
    records: &[SettingRecord],
    criteria: &FilterCriteria,
    time_zone: TimeZoneSetting,
) -> Vec<FormattedSetting> {
    matching_records(records, criteria)
        .into_iter()
        .map(|record| FormattedSetting {
            formatted_time: time_zone.format_timestamp(record.timestamp),
            record: record.clone(),
        })
        .collect()
}

/// Summary statistics over `records`.
///
/// Distinct name counts are case-sensitive, unlike the name filters.
/// `avg_value` is rounded to two decimals, half away from zero. An empty
/// slice yields all zeros.
pub fn aggregate_settings(records: &[SettingRecord]) -> SettingsStats {
    if records.is_empty() {
        return SettingsStats::default();
    }

    let unique_fridges = records
        .iter()
        .map(|r| r.fridge_id)
        .collect::<HashSet<_>>()
        .len();
    let unique_instruments = records
        .iter()
        .map(|r| r.instrument_name.as_str())
        .collect::<HashSet<_>>()
        .len();
    let unique_parameters = records
        .iter()
        .map(|r| r.parameter_name.as_str())
        .collect::<HashSet<_>>()
        .len();

    let values = records.iter().map(|r| r.applied_value);
    let min_value = values.clone().fold(f64::INFINITY, f64::min);
    let max_value = values.clone().fold(f64::NEG_INFINITY, f64::max);
    let avg_value = values.sum::<f64>() / records.len() as f64;

    SettingsStats {
        total_settings: records.len(),
        unique_fridges,
        unique_instruments,
        unique_parameters,
        min_value,
        max_value,
        avg_value: round_to_cents(avg_value),
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::sample_records;

    fn names(settings: &[FormattedSetting]) -> Vec<&str> {
        settings
            .iter()
            .map(|s| s.record.instrument_name.as_str())
            .collect()
    }

    #[test]
    fn test_empty_criteria_returns_everything() {
        let records = sample_records();
        let result = filter_settings(&records, &FilterCriteria::new(), TimeZoneSetting::Utc);

        assert_eq!(result.len(), records.len());
        for (setting, record) in result.iter().zip(&records) {
            assert_eq!(&setting.record, record);
            assert_eq!(
                setting.formatted_time,
                TimeZoneSetting::Utc.format_timestamp(record.timestamp)
            );
        }
        assert_eq!(result[0].formatted_time, "2025-02-15 05:16:36");
    }

    #[test]
    fn test_filter_by_fridge_id() {
        let records = sample_records();
        let criteria = FilterCriteria::new().with_fridge_id(1);
        let result = filter_settings(&records, &criteria, TimeZoneSetting::Utc);

        assert_eq!(names(&result), vec!["instrument_one", "instrument_four"]);
        assert_eq!(result[0].record.parameter_name, "flux_bias");
        assert_eq!(result[1].record.parameter_name, "current_bias");
    }

    #[test]
    fn test_filter_unknown_fridge_is_empty() {
        let records = sample_records();
        let criteria = FilterCriteria::new().with_fridge_id(42);
        assert!(filter_settings(&records, &criteria, TimeZoneSetting::Utc).is_empty());
    }

    #[test]
    fn test_filter_by_min_value() {
        let records = sample_records();
        let criteria = FilterCriteria::new().with_value_range(Some(0.5), None);
        let result = filter_settings(&records, &criteria, TimeZoneSetting::Utc);

        assert_eq!(names(&result), vec!["instrument_three", "instrument_four"]);
    }

    #[test]
    fn test_value_bounds_are_inclusive() {
        let records = sample_records();
        let criteria = FilterCriteria::new().with_value_range(Some(0.37), Some(0.89));
        let result = filter_settings(&records, &criteria, TimeZoneSetting::Utc);

        assert_eq!(names(&result), vec!["instrument_one", "instrument_four"]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let records = sample_records();
        let criteria = FilterCriteria::new().with_value_range(Some(2.0), Some(1.0));
        assert!(filter_settings(&records, &criteria, TimeZoneSetting::Utc).is_empty());
    }

    #[test]
    fn test_instrument_name_is_case_insensitive() {
        let records = sample_records();
        let criteria = FilterCriteria::new().with_instrument_name("INSTRUMENT_ONE");
        let result = filter_settings(&records, &criteria, TimeZoneSetting::Utc);

        assert_eq!(names(&result), vec!["instrument_one"]);
    }

    #[test]
    fn test_name_filters_match_substrings() {
        let records = sample_records();

        let criteria = FilterCriteria::new().with_parameter_name("Bias");
        let result = filter_settings(&records, &criteria, TimeZoneSetting::Utc);
        assert_eq!(names(&result), vec!["instrument_one", "instrument_four"]);

        let criteria = FilterCriteria::new().with_instrument_name("t");
        let result = filter_settings(&records, &criteria, TimeZoneSetting::Utc);
        assert_eq!(result.len(), 5);

        let criteria = FilterCriteria::new().with_instrument_name("");
        assert_eq!(matching_records(&records, &criteria).len(), 5);
    }

    #[test]
    fn test_predicates_are_anded() {
        let records = sample_records();
        let criteria = FilterCriteria::new()
            .with_fridge_id(2)
            .with_parameter_name("volt")
            .with_value_range(Some(0.0), None);
        let result = filter_settings(&records, &criteria, TimeZoneSetting::Utc);

        assert_eq!(names(&result), vec!["instrument_five"]);

        let criteria = criteria.with_instrument_name("two");
        assert!(filter_settings(&records, &criteria, TimeZoneSetting::Utc).is_empty());
    }

    #[test]
    fn test_filter_preserves_order() {
        let records = sample_records();
        let criteria = FilterCriteria::new().with_value_range(Some(0.0), None);
        let selected = matching_records(&records, &criteria);

        let positions: Vec<usize> = selected
            .iter()
            .map(|s| records.iter().position(|r| std::ptr::eq(r, *s)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(positions, vec![0, 2, 3, 4]);
    }

    #[test]
    fn test_filter_does_not_mutate_input() {
        let records = sample_records();
        let before = records.clone();
        let _ = filter_settings(&records, &FilterCriteria::new(), TimeZoneSetting::Utc);
        assert_eq!(records, before);
    }

    #[test]
    fn test_criteria_is_empty() {
        assert!(FilterCriteria::new().is_empty());
        assert!(!FilterCriteria::new().with_fridge_id(1).is_empty());
        assert!(!FilterCriteria::new().with_value_range(None, Some(1.0)).is_empty());
    }

    #[test]
    fn test_aggregate_sample() {
        let stats = aggregate_settings(&sample_records());

        assert_eq!(stats.total_settings, 5);
        assert_eq!(stats.unique_fridges, 3);
        assert_eq!(stats.unique_instruments, 5);
        assert_eq!(stats.unique_parameters, 5);
        assert_eq!(stats.min_value, -0.12);
        assert_eq!(stats.max_value, 1.25);
        assert_eq!(stats.avg_value, 0.48);
    }

    #[test]
    fn test_aggregate_empty() {
        let stats = aggregate_settings(&[]);
        assert_eq!(stats, SettingsStats::default());
    }

    #[test]
    fn test_aggregate_distinct_names_are_case_sensitive() {
        let records = vec![
            SettingRecord::new(1, "Sensor", "bias", 1.0, 0),
            SettingRecord::new(1, "sensor", "BIAS", 2.0, 0),
            SettingRecord::new(1, "sensor", "bias", 3.0, 0),
        ];
        let stats = aggregate_settings(&records);

        assert_eq!(stats.total_settings, 3);
        assert_eq!(stats.unique_fridges, 1);
        assert_eq!(stats.unique_instruments, 2);
        assert_eq!(stats.unique_parameters, 2);
        assert_eq!(stats.avg_value, 2.0);
    }

    #[test]
    fn test_aggregate_rounds_half_away_from_zero() {
        let records = vec![
            SettingRecord::new(1, "a", "p", 0.125, 0),
            SettingRecord::new(2, "b", "q", 0.125, 0),
        ];
        assert_eq!(aggregate_settings(&records).avg_value, 0.13);

        let records = vec![SettingRecord::new(1, "a", "p", -0.125, 0)];
        assert_eq!(aggregate_settings(&records).avg_value, -0.13);
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(0.482), 0.48);
        assert_eq!(round_to_cents(-1.0), -1.0);
        assert_eq!(round_to_cents(0.0), 0.0);
    }
}
