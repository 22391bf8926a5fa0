//! Error types for rastro
//!
//! Two failure families: configuration errors (missing tracking endpoint,
//! surfaced before any server call) and logging errors (anything raised while
//! talking to the tracking server or preparing artifacts).

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Rastro error types
#[derive(Error, Debug)]
pub enum Error {
    /// Required tracking endpoint variable is absent from the environment.
    /// There is no default endpoint; runs must never silently go to a local fallback.
    #[error("environment variable {0} is not set; no tracking server configured")]
    MissingTrackingUri(&'static str),

    /// HTTP transport failure (connect, timeout, malformed response body)
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Tracking server rejected a request with an MLflow error payload
    #[error("tracking server rejected {endpoint}: {code}: {message}")]
    Api {
        /// Endpoint path that was called
        endpoint: String,
        /// MLflow error code (e.g. `RESOURCE_DOES_NOT_EXIST`)
        code: String,
        /// Human-readable server message
        message: String,
    },

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization failure (MLmodel metadata)
    #[error("model metadata error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Malformed input sample (ragged columns, no columns)
    #[error("invalid dataset: {0}")]
    Schema(String),

    /// Model inference failed while inferring the signature
    #[error("model inference failed: {0}")]
    Inference(String),
}

impl Error {
    /// Shorthand for an inference failure with a formatted message.
    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference(message.into())
    }

    /// Shorthand for a malformed-dataset failure.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }
}
