//! Run Record - client-side mirror of one logged run

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MetricRecord;

/// Status of a run, in the tracking server's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// Run is scheduled but not yet started.
    Scheduled,
    /// Run is currently executing.
    Running,
    /// Run completed successfully.
    Finished,
    /// Run failed with an error.
    Failed,
    /// Run was killed by user or system.
    Killed,
}

impl RunStatus {
    /// Wire form of the status (`RUNNING`, `FINISHED`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Running => "RUNNING",
            Self::Finished => "FINISHED",
            Self::Failed => "FAILED",
            Self::Killed => "KILLED",
        }
    }
}

/// Run Record mirrors one run held by the tracking server.
///
/// The record accumulates params and metric points while the run scope is
/// open. Params are an ordered mapping; logging the same key twice keeps the
/// last value. The record is finalized exactly once via [`RunRecord::finish`]
/// and must not be mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunRecord {
    run_id: String,
    experiment_id: String,
    status: RunStatus,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    artifact_uri: Option<String>,
    params: BTreeMap<String, String>,
    metrics: Vec<MetricRecord>,
}

impl RunRecord {
    /// Create a new running record.
    ///
    /// # Arguments
    ///
    /// * `run_id` - Server-assigned identifier for the run
    /// * `experiment_id` - ID of the parent experiment
    #[must_use]
    pub fn new(run_id: impl Into<String>, experiment_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            experiment_id: experiment_id.into(),
            status: RunStatus::Running,
            start_time: Utc::now(),
            end_time: None,
            artifact_uri: None,
            params: BTreeMap::new(),
            metrics: Vec::new(),
        }
    }

    /// Attach the server-reported artifact URI.
    #[must_use]
    pub fn with_artifact_uri(mut self, artifact_uri: impl Into<String>) -> Self {
        self.artifact_uri = Some(artifact_uri.into());
        self
    }

    /// Get the run ID.
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Get the parent experiment ID.
    #[must_use]
    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    /// Get the current run status.
    #[must_use]
    pub const fn status(&self) -> RunStatus {
        self.status
    }

    /// Get the start timestamp.
    #[must_use]
    pub const fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Get the end timestamp, if the run has been finalized.
    #[must_use]
    pub const fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Get the artifact URI, if the server reported one.
    #[must_use]
    pub fn artifact_uri(&self) -> Option<&str> {
        self.artifact_uri.as_deref()
    }

    /// Ordered view of the logged params.
    #[must_use]
    pub const fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Look up one param value.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// All logged metric points, in logging order.
    #[must_use]
    pub fn metrics(&self) -> &[MetricRecord] {
        &self.metrics
    }

    /// Latest metric point logged under `key`, if any.
    #[must_use]
    pub fn metric(&self, key: &str) -> Option<&MetricRecord> {
        self.metrics.iter().rev().find(|m| m.key() == key)
    }

    /// Record a param in the mirror. Last value wins for repeated keys.
    pub fn insert_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Record a metric point in the mirror.
    pub fn push_metric(&mut self, metric: MetricRecord) {
        self.metrics.push(metric);
    }

    /// Finalize the run with the given terminal status.
    ///
    /// Sets the `end_time` timestamp to now.
    pub fn finish(&mut self, status: RunStatus) {
        self.status = status;
        self.end_time = Some(Utc::now());
    }
}
