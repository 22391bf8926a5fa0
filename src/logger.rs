//! Model run logging
//!
//! [`log_model`] reproduces one strictly sequential logging pass: resolve the
//! experiment, open a scoped run, log params and an optional metric, infer
//! the model signature from a sample prediction, upload the model artifact,
//! register it, print the two tracking links, and return the registry handle.
//! Any failure is printed once and re-raised unchanged.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;

use crate::client::{ActiveRun, TrackingClient};
use crate::data::Dataset;
use crate::error::Result;
use crate::experiment::ModelInfo;
use crate::model::{short_type_name, Model};
use crate::signature::{infer_signature, Signature};

/// Artifact path under which the model is logged within its run.
pub const MODEL_ARTIFACT_PATH: &str = "model_artifact";

/// Metric name used when the caller does not supply one.
pub const DEFAULT_METRIC_NAME: &str = "metric";

/// Options for one [`log_model`] call.
#[derive(Debug, Clone)]
pub struct LogOptions {
    metric_name: String,
    model_name: Option<String>,
    params: BTreeMap<String, String>,
    score: Option<f64>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            metric_name: DEFAULT_METRIC_NAME.to_string(),
            model_name: None,
            params: BTreeMap::new(),
            score: None,
        }
    }
}

impl LogOptions {
    /// Start from the defaults: metric name `"metric"`, no params, no score,
    /// model name derived from the model's type.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Name under which `score` is logged.
    #[must_use]
    pub fn with_metric_name(mut self, name: impl Into<String>) -> Self {
        self.metric_name = name.into();
        self
    }

    /// Explicit registered-model name, overriding the type-name default.
    #[must_use]
    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self
    }

    /// Add one param. Values are logged in string form; last value wins for
    /// repeated keys.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// The score to log, if any.
    #[must_use]
    pub const fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Configured metric name.
    #[must_use]
    pub fn metric_name(&self) -> &str {
        &self.metric_name
    }

    /// Configured model name, if explicitly set.
    #[must_use]
    pub fn model_name(&self) -> Option<&str> {
        self.model_name.as_deref()
    }

    /// Configured params.
    #[must_use]
    pub const fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Configured score, if set.
    #[must_use]
    pub const fn score(&self) -> Option<f64> {
        self.score
    }
}

/// Format the link to one run in the tracking UI.
#[must_use]
pub fn run_link(tracking_uri: &str, experiment_id: &str, run_id: &str) -> String {
    format!("{tracking_uri}/#/experiments/{experiment_id}/runs/{run_id}")
}

/// Format the link to one experiment in the tracking UI.
#[must_use]
pub fn experiment_link(tracking_uri: &str, experiment_id: &str) -> String {
    format!("{tracking_uri}/#/experiments/{experiment_id}")
}

/// Log a trained model, its params, and its metric to the tracking server.
///
/// The steps run strictly in order inside one scoped run: params (when
/// any), score under the configured metric name (when present), signature
/// inference via `model.predict` on `input_data`, artifact upload under
/// [`MODEL_ARTIFACT_PATH`], and model registration under the resolved name.
/// On success the two tracking links are printed and the registry handle is
/// returned.
///
/// The run scope closes on every exit path: `FINISHED` on success, `FAILED`
/// when any step errors out.
///
/// # Errors
///
/// Any failure is printed as one `❌` diagnostic line and then propagated
/// unchanged — never wrapped, never swallowed.
pub fn log_model<M>(
    client: &TrackingClient,
    model: &M,
    input_data: &Dataset,
    experiment_name: &str,
    options: &LogOptions,
) -> Result<ModelInfo>
where
    M: Model + Serialize,
{
    match try_log_model(client, model, input_data, experiment_name, options) {
        Ok(info) => Ok(info),
        Err(err) => {
            println!("❌ Error logging to MLflow: {err}");
            Err(err)
        }
    }
}

fn try_log_model<M>(
    client: &TrackingClient,
    model: &M,
    input_data: &Dataset,
    experiment_name: &str,
    options: &LogOptions,
) -> Result<ModelInfo>
where
    M: Model + Serialize,
{
    let experiment = client.get_or_create_experiment(experiment_name)?;
    let mut run = client.start_run(experiment.experiment_id())?;

    run.log_params(options.params())?;

    if let Some(score) = options.score() {
        run.log_metric(options.metric_name(), score)?;
    }

    let output = model.predict(input_data)?;
    let signature = infer_signature(input_data, &output);

    let model_name = options
        .model_name()
        .map_or_else(|| short_type_name::<M>().to_string(), ToString::to_string);

    let info = register_model(client, &run, model, input_data, &signature, &model_name)?;

    println!(
        "🔗 View run at: {}",
        run_link(client.tracking_uri(), run.experiment_id(), run.run_id())
    );
    println!(
        "📂 View experiment at: {}",
        experiment_link(client.tracking_uri(), run.experiment_id())
    );

    run.finish()?;

    Ok(info)
}

/// Metadata file stored alongside the model artifact (`MLmodel`).
#[derive(Serialize)]
struct ModelMetadata<'a> {
    artifact_path: &'a str,
    run_id: &'a str,
    model_class: &'a str,
    utc_time_created: String,
    signature: &'a Signature,
    saved_input_example_info: InputExampleInfo<'a>,
}

#[derive(Serialize)]
struct InputExampleInfo<'a> {
    artifact_path: &'a str,
    #[serde(rename = "type")]
    example_type: &'a str,
}

fn register_model<M>(
    client: &TrackingClient,
    run: &ActiveRun<'_>,
    model: &M,
    input_data: &Dataset,
    signature: &Signature,
    model_name: &str,
) -> Result<ModelInfo>
where
    M: Model + Serialize,
{
    let metadata = ModelMetadata {
        artifact_path: MODEL_ARTIFACT_PATH,
        run_id: run.run_id(),
        model_class: short_type_name::<M>(),
        utc_time_created: Utc::now().to_rfc3339(),
        signature,
        saved_input_example_info: InputExampleInfo {
            artifact_path: "input_example.json",
            example_type: "dataframe",
        },
    };

    let metadata_yaml = serde_yaml::to_string(&metadata)?;
    let model_dump = serde_json::to_vec_pretty(model)?;
    let input_example = serde_json::to_vec_pretty(&input_data.to_split_json())?;

    for (file_name, bytes) in [
        ("MLmodel", metadata_yaml.into_bytes()),
        ("model.json", model_dump),
        ("input_example.json", input_example),
    ] {
        client.upload_artifact(
            run.experiment_id(),
            run.run_id(),
            &format!("{MODEL_ARTIFACT_PATH}/{file_name}"),
            bytes,
        )?;
    }

    let source = format!("runs:/{}/{MODEL_ARTIFACT_PATH}", run.run_id());
    client.create_registered_model(model_name)?;
    let version = client.create_model_version(model_name, &source, run.run_id())?;

    Ok(ModelInfo::new(
        model_name,
        version,
        run.run_id(),
        source,
        MODEL_ARTIFACT_PATH,
        signature.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_options_defaults() {
        let options = LogOptions::new();
        assert_eq!(options.metric_name(), DEFAULT_METRIC_NAME);
        assert!(options.model_name().is_none());
        assert!(options.params().is_empty());
        assert!(options.score().is_none());
    }

    #[test]
    fn test_log_options_builder() {
        let options = LogOptions::new()
            .with_metric_name("accuracy")
            .with_model_name("MyModel")
            .with_param("alpha", 0.5)
            .with_param("solver", "lbfgs")
            .with_score(0.93);

        assert_eq!(options.metric_name(), "accuracy");
        assert_eq!(options.model_name(), Some("MyModel"));
        assert_eq!(options.params().get("alpha").unwrap(), "0.5");
        assert_eq!(options.params().get("solver").unwrap(), "lbfgs");
        assert_eq!(options.score(), Some(0.93));
    }

    #[test]
    fn test_link_formats() {
        let uri = "http://tracking.internal:5000";
        assert_eq!(
            run_link(uri, "7", "abc123"),
            "http://tracking.internal:5000/#/experiments/7/runs/abc123"
        );
        assert_eq!(
            experiment_link(uri, "7"),
            "http://tracking.internal:5000/#/experiments/7"
        );
    }
}
