//! Metric Record - one logged metric data point

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metric Record represents a single metric data point inside a run.
///
/// Points are kept in logging order; when the same key is logged twice the
/// read path resolves to the latest point, matching the tracking server's
/// own last-value-wins semantics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricRecord {
    key: String,
    value: f64,
    step: u64,
    timestamp: DateTime<Utc>,
}

impl MetricRecord {
    /// Create a new metric record with the current timestamp.
    #[must_use]
    pub fn new(key: impl Into<String>, value: f64, step: u64) -> Self {
        Self {
            key: key.into(),
            value,
            step,
            timestamp: Utc::now(),
        }
    }

    /// Set an explicit timestamp (useful for deserialization/testing).
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Get the metric key/name.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the metric value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Get the step number.
    #[must_use]
    pub const fn step(&self) -> u64 {
        self.step
    }

    /// Get the timestamp when the metric was recorded.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
