//! Aggregate statistics over a smart band's readings.
//!
//! The database computes the raw aggregates; this module turns them into
//! the response shape and owns the rounding and empty-set rules.

use serde::Serialize;

use crate::types::SmartBandId;

/// Reading counts per status band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct StatusDistribution {
    pub normal: i64,
    pub low: i64,
    pub high: i64,
    pub critical: i64,
}

impl StatusDistribution {
    /// Readings outside the `NORMAL` band.
    pub fn abnormal(&self) -> i64 {
        self.low + self.high + self.critical
    }
}

/// Raw aggregate values as returned by the statistics query.
///
/// `average`, `min` and `max` are `None` when there are no readings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PulseAggregates {
    pub total: i64,
    pub average: Option<f64>,
    pub min: Option<i32>,
    pub max: Option<i32>,
    pub distribution: StatusDistribution,
}

/// Statistics response for one smart band.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateStatistics {
    pub smart_band_id: SmartBandId,
    pub total: i64,
    /// Mean pulse rounded to two decimals; `0.0` when there are no readings.
    pub average: f64,
    pub min: Option<i32>,
    pub max: Option<i32>,
    pub abnormal_count: i64,
    pub distribution: StatusDistribution,
}

impl HeartRateStatistics {
    /// Build the response from raw aggregates.
    pub fn from_aggregates(smart_band_id: SmartBandId, agg: PulseAggregates) -> Self {
        if agg.total == 0 {
            return Self::empty(smart_band_id);
        }

        Self {
            smart_band_id,
            total: agg.total,
            average: round_two_decimals(agg.average.unwrap_or(0.0)),
            min: agg.min,
            max: agg.max,
            abnormal_count: agg.distribution.abnormal(),
            distribution: agg.distribution,
        }
    }

    /// Statistics for a band with no readings.
    pub fn empty(smart_band_id: SmartBandId) -> Self {
        Self {
            smart_band_id,
            total: 0,
            average: 0.0,
            min: None,
            max: None,
            abnormal_count: 0,
            distribution: StatusDistribution::default(),
        }
    }
}

fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distribution(normal: i64, low: i64, high: i64, critical: i64) -> StatusDistribution {
        StatusDistribution {
            normal,
            low,
            high,
            critical,
        }
    }

    #[test]
    fn empty_aggregates_produce_zeroed_statistics() {
        let stats = HeartRateStatistics::from_aggregates(9, PulseAggregates::default());
        assert_eq!(stats, HeartRateStatistics::empty(9));
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average, 0.0);
        assert!(stats.min.is_none());
        assert!(stats.max.is_none());
    }

    #[test]
    fn abnormal_count_sums_non_normal_bands() {
        let stats = HeartRateStatistics::from_aggregates(
            1,
            PulseAggregates {
                total: 10,
                average: Some(88.0),
                min: Some(30),
                max: Some(170),
                distribution: distribution(4, 3, 2, 1),
            },
        );
        assert_eq!(stats.abnormal_count, 6);
        assert_eq!(stats.distribution.low, 3);
    }

    #[test]
    fn average_is_rounded_to_two_decimals() {
        let stats = HeartRateStatistics::from_aggregates(
            1,
            PulseAggregates {
                total: 3,
                average: Some(71.666_666),
                min: Some(70),
                max: Some(73),
                distribution: distribution(3, 0, 0, 0),
            },
        );
        assert_eq!(stats.average, 71.67);
    }

    #[test]
    fn serializes_with_upper_case_distribution_keys() {
        let json = serde_json::to_value(HeartRateStatistics::empty(4)).unwrap();
        assert_eq!(json["smartBandId"], 4);
        assert_eq!(json["abnormalCount"], 0);
        assert_eq!(json["distribution"]["NORMAL"], 0);
        assert_eq!(json["distribution"]["CRITICAL"], 0);
        assert!(json["min"].is_null());
    }
}
