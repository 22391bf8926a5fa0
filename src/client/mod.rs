//! Tracking server REST client
//!
//! [`TrackingClient`] is an explicitly passed handle to one tracking server:
//! no process-global state, so two clients with different endpoints can
//! coexist and run logging stays testable. Every operation is one blocking
//! round-trip with the configured timeout; there are no retries — the caller
//! sees the first failure.

mod protocol;

use std::collections::BTreeMap;

use chrono::Utc;
use reqwest::blocking::{Client as HttpClient, Response};
use serde::Serialize;

use crate::config::TrackingConfig;
use crate::error::{Error, Result};
use crate::experiment::{ExperimentRecord, MetricRecord, RunRecord, RunStatus};
use self::protocol::{
    CreateExperimentRequest, CreateExperimentResponse, CreateModelVersionRequest,
    CreateModelVersionResponse, CreateRegisteredModelRequest, CreateRunRequest, CreateRunResponse,
    ErrorBody, GetExperimentResponse, LogBatchRequest, MetricPayload, ParamPayload,
    UpdateRunRequest,
};

const RESOURCE_DOES_NOT_EXIST: &str = "RESOURCE_DOES_NOT_EXIST";
const RESOURCE_ALREADY_EXISTS: &str = "RESOURCE_ALREADY_EXISTS";

/// Client for an MLflow-compatible tracking server.
#[derive(Debug)]
pub struct TrackingClient {
    http: HttpClient,
    config: TrackingConfig,
}

impl TrackingClient {
    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] when the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: TrackingConfig) -> Result<Self> {
        let http = HttpClient::builder().timeout(config.timeout()).build()?;
        Ok(Self { http, config })
    }

    /// Create a client from the process environment.
    ///
    /// Reads [`TRACKING_URI_VAR`](crate::config::TRACKING_URI_VAR); absence
    /// fails before any server call is attempted. Calling this twice simply
    /// reapplies the same configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingTrackingUri`] when the variable is not set.
    pub fn from_env() -> Result<Self> {
        Self::new(TrackingConfig::from_env()?)
    }

    /// The configured tracking URI (no trailing slash).
    #[must_use]
    pub fn tracking_uri(&self) -> &str {
        self.config.tracking_uri()
    }

    /// Resolve an experiment by name.
    ///
    /// # Errors
    ///
    /// Returns `Ok(None)` when the server reports the experiment does not
    /// exist; any other rejection or transport failure is an error.
    pub fn experiment_by_name(&self, name: &str) -> Result<Option<ExperimentRecord>> {
        let endpoint = "experiments/get-by-name";
        let url = format!(
            "{}?experiment_name={}",
            self.api_url(endpoint),
            urlencoding::encode(name)
        );
        let response = self.http.get(url).send()?;
        match Self::check(endpoint, response) {
            Ok(response) => {
                let payload: GetExperimentResponse = response.json()?;
                let mut record = ExperimentRecord::new(
                    payload.experiment.experiment_id,
                    payload.experiment.name,
                );
                if let Some(location) = payload.experiment.artifact_location {
                    record = record.with_artifact_location(location);
                }
                Ok(Some(record))
            }
            Err(Error::Api { code, .. }) if code == RESOURCE_DOES_NOT_EXIST => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Create an experiment and return its server-assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error when the server rejects the create call.
    pub fn create_experiment(&self, name: &str) -> Result<String> {
        let response = self.post("experiments/create", &CreateExperimentRequest { name })?;
        let payload: CreateExperimentResponse = response.json()?;
        tracing::debug!(experiment_id = %payload.experiment_id, name, "experiment created");
        Ok(payload.experiment_id)
    }

    /// Resolve an experiment by name, creating it when absent.
    ///
    /// Idempotent: repeated calls with the same name resolve to the same
    /// experiment without issuing a second create.
    ///
    /// # Errors
    ///
    /// Returns an error when resolution and creation both fail.
    pub fn get_or_create_experiment(&self, name: &str) -> Result<ExperimentRecord> {
        if let Some(experiment) = self.experiment_by_name(name)? {
            tracing::debug!(experiment_id = %experiment.experiment_id(), name, "experiment reused");
            return Ok(experiment);
        }
        let experiment_id = self.create_experiment(name)?;
        Ok(ExperimentRecord::new(experiment_id, name))
    }

    /// Open a run scope in the given experiment.
    ///
    /// The returned guard finalizes the remote run on every exit path: call
    /// [`ActiveRun::finish`] for a successful close, or let the guard drop to
    /// mark the run `FAILED`.
    ///
    /// # Errors
    ///
    /// Returns an error when the run cannot be created on the server.
    pub fn start_run(&self, experiment_id: &str) -> Result<ActiveRun<'_>> {
        let request = CreateRunRequest {
            experiment_id,
            start_time: Utc::now().timestamp_millis(),
        };
        let response = self.post("runs/create", &request)?;
        let payload: CreateRunResponse = response.json()?;
        let info = payload.run.info;
        let mut record = RunRecord::new(info.run_id, info.experiment_id);
        if let Some(uri) = info.artifact_uri {
            record = record.with_artifact_uri(uri);
        }
        tracing::debug!(run_id = %record.run_id(), experiment_id, "run started");
        Ok(ActiveRun {
            client: self,
            record,
            open: true,
        })
    }

    /// Log params and metric points against a run in one batch call.
    ///
    /// # Errors
    ///
    /// Returns an error when the server rejects the batch.
    pub fn log_batch(
        &self,
        run_id: &str,
        params: &BTreeMap<String, String>,
        metrics: &[MetricRecord],
    ) -> Result<()> {
        let request = LogBatchRequest {
            run_id,
            params: params
                .iter()
                .map(|(key, value)| ParamPayload {
                    key: key.clone(),
                    value: value.clone(),
                })
                .collect(),
            metrics: metrics.iter().map(MetricPayload::from_record).collect(),
        };
        self.post("runs/log-batch", &request)?;
        Ok(())
    }

    /// Set a run's terminal status and end time.
    ///
    /// # Errors
    ///
    /// Returns an error when the server rejects the update.
    pub fn update_run(&self, run_id: &str, status: RunStatus) -> Result<()> {
        let request = UpdateRunRequest {
            run_id,
            status,
            end_time: Utc::now().timestamp_millis(),
        };
        self.post("runs/update", &request)?;
        Ok(())
    }

    /// Upload one artifact file into a run's artifact store.
    ///
    /// Uses the server's artifact proxy
    /// (`/api/2.0/mlflow-artifacts/artifacts/...`), so no direct object-store
    /// access is needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the upload is rejected or the transport fails.
    pub fn upload_artifact(
        &self,
        experiment_id: &str,
        run_id: &str,
        path: &str,
        bytes: Vec<u8>,
    ) -> Result<()> {
        let url = format!(
            "{}/api/2.0/mlflow-artifacts/artifacts/{experiment_id}/{run_id}/artifacts/{path}",
            self.config.tracking_uri()
        );
        let response = self.http.put(url).body(bytes).send()?;
        Self::check("mlflow-artifacts/artifacts", response)?;
        tracing::debug!(run_id, path, "artifact uploaded");
        Ok(())
    }

    /// Create a registered model entry, reusing it when it already exists.
    ///
    /// # Errors
    ///
    /// Returns an error for any rejection other than
    /// `RESOURCE_ALREADY_EXISTS`.
    pub fn create_registered_model(&self, name: &str) -> Result<()> {
        match self.post(
            "registered-models/create",
            &CreateRegisteredModelRequest { name },
        ) {
            Ok(_) => Ok(()),
            Err(Error::Api { code, .. }) if code == RESOURCE_ALREADY_EXISTS => {
                tracing::debug!(name, "registered model reused");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Cut a new version of a registered model from a run's artifact.
    ///
    /// Returns the server-assigned version string.
    ///
    /// # Errors
    ///
    /// Returns an error when the server rejects the call.
    pub fn create_model_version(&self, name: &str, source: &str, run_id: &str) -> Result<String> {
        let response = self.post(
            "model-versions/create",
            &CreateModelVersionRequest {
                name,
                source,
                run_id,
            },
        )?;
        let payload: CreateModelVersionResponse = response.json()?;
        tracing::debug!(
            name = %payload.model_version.name,
            version = %payload.model_version.version,
            "model version created"
        );
        Ok(payload.model_version.version)
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/api/2.0/mlflow/{endpoint}", self.config.tracking_uri())
    }

    fn post<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<Response> {
        let response = self.http.post(self.api_url(endpoint)).json(body).send()?;
        Self::check(endpoint, response)
    }

    fn check(endpoint: &str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_else(|_| ErrorBody {
            error_code: status.to_string(),
            message: text.clone(),
        });
        Err(Error::Api {
            endpoint: endpoint.to_string(),
            code: body.error_code,
            message: body.message,
        })
    }
}

/// Guard over one open run scope.
///
/// Logging through the guard keeps a local [`RunRecord`] mirror of what the
/// server accepted. The scope closes on every exit path: [`finish`] marks the
/// run `FINISHED`; dropping an unfinished guard (error return, panic) marks
/// it `FAILED` best-effort.
///
/// [`finish`]: ActiveRun::finish
pub struct ActiveRun<'a> {
    client: &'a TrackingClient,
    record: RunRecord,
    open: bool,
}

impl ActiveRun<'_> {
    /// The local mirror of the run.
    #[must_use]
    pub const fn record(&self) -> &RunRecord {
        &self.record
    }

    /// Server-assigned run ID.
    #[must_use]
    pub fn run_id(&self) -> &str {
        self.record.run_id()
    }

    /// Parent experiment ID.
    #[must_use]
    pub fn experiment_id(&self) -> &str {
        self.record.experiment_id()
    }

    /// Log a set of params against the run.
    ///
    /// # Errors
    ///
    /// Returns an error when the server rejects the batch; the local mirror
    /// is only updated on success.
    pub fn log_params(&mut self, params: &BTreeMap<String, String>) -> Result<()> {
        if params.is_empty() {
            return Ok(());
        }
        self.client
            .log_batch(self.record.run_id(), params, &[])?;
        for (key, value) in params {
            self.record.insert_param(key.clone(), value.clone());
        }
        Ok(())
    }

    /// Log one scalar metric against the run.
    ///
    /// # Errors
    ///
    /// Returns an error when the server rejects the metric.
    pub fn log_metric(&mut self, key: &str, value: f64) -> Result<()> {
        let metric = MetricRecord::new(key, value, 0);
        self.client
            .log_batch(self.record.run_id(), &BTreeMap::new(), std::slice::from_ref(&metric))?;
        self.record.push_metric(metric);
        Ok(())
    }

    /// Close the run scope as `FINISHED` and return the finalized record.
    ///
    /// # Errors
    ///
    /// Returns an error when the server rejects the status update; the
    /// guard is consumed either way, so no second finalization happens.
    pub fn finish(mut self) -> Result<RunRecord> {
        self.open = false;
        self.client
            .update_run(self.record.run_id(), RunStatus::Finished)?;
        self.record.finish(RunStatus::Finished);
        Ok(self.record.clone())
    }
}

impl Drop for ActiveRun<'_> {
    fn drop(&mut self) {
        if self.open {
            // Error path: the primary failure is already propagating, so a
            // termination failure here is only worth a warning.
            if let Err(err) = self
                .client
                .update_run(self.record.run_id(), RunStatus::Failed)
            {
                tracing::warn!(run_id = %self.record.run_id(), error = %err, "run termination failed");
            }
            self.record.finish(RunStatus::Failed);
        }
    }
}
