//! Wire payloads for the tracking server REST API (MLflow 2.0)

use serde::{Deserialize, Serialize};

use crate::experiment::{MetricRecord, RunStatus};

/// Error body returned by the server on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error_code: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CreateExperimentRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CreateExperimentResponse {
    pub experiment_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ExperimentPayload {
    pub experiment_id: String,
    pub name: String,
    #[serde(default)]
    pub artifact_location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GetExperimentResponse {
    pub experiment: ExperimentPayload,
}

#[derive(Debug, Serialize)]
pub struct CreateRunRequest<'a> {
    pub experiment_id: &'a str,
    pub start_time: i64,
}

#[derive(Debug, Deserialize)]
pub struct RunInfoPayload {
    pub run_id: String,
    pub experiment_id: String,
    #[serde(default)]
    pub artifact_uri: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RunPayload {
    pub info: RunInfoPayload,
}

#[derive(Debug, Deserialize)]
pub struct CreateRunResponse {
    pub run: RunPayload,
}

#[derive(Debug, Serialize)]
pub struct ParamPayload {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct MetricPayload {
    pub key: String,
    pub value: f64,
    pub timestamp: i64,
    pub step: u64,
}

impl MetricPayload {
    pub fn from_record(metric: &MetricRecord) -> Self {
        Self {
            key: metric.key().to_string(),
            value: metric.value(),
            timestamp: metric.timestamp().timestamp_millis(),
            step: metric.step(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogBatchRequest<'a> {
    pub run_id: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamPayload>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<MetricPayload>,
}

#[derive(Debug, Serialize)]
pub struct UpdateRunRequest<'a> {
    pub run_id: &'a str,
    pub status: RunStatus,
    pub end_time: i64,
}

#[derive(Debug, Serialize)]
pub struct CreateRegisteredModelRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CreateModelVersionRequest<'a> {
    pub name: &'a str,
    pub source: &'a str,
    pub run_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ModelVersionPayload {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateModelVersionResponse {
    pub model_version: ModelVersionPayload,
}
