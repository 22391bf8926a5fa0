//! Model Info - handle to a registered model artifact

use serde::{Deserialize, Serialize};

use crate::signature::Signature;

/// Handle describing a registered model artifact.
///
/// Returned to the caller after logging; the artifact itself lives in the
/// remote registry and outlives this handle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelInfo {
    name: String,
    version: String,
    run_id: String,
    source: String,
    artifact_path: String,
    signature: Signature,
}

impl ModelInfo {
    /// Create a new model handle.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        run_id: impl Into<String>,
        source: impl Into<String>,
        artifact_path: impl Into<String>,
        signature: Signature,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            run_id: run_id.into(),
            source: source.into(),
            artifact_path: artifact_path.into(),
            signature,
        }
    }

    /// Registered model name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registry version assigned to this artifact.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Run that produced the artifact.
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Registry source URI (`runs:/{run_id}/{artifact_path}`).
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Artifact path within the run.
    #[must_use]
    pub fn artifact_path(&self) -> &str {
        &self.artifact_path
    }

    /// Inferred signature stored with the artifact.
    #[must_use]
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }
}
