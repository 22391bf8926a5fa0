//! Experiment Record - named grouping of runs on the tracking server

use serde::{Deserialize, Serialize};

/// Experiment Record represents a tracked experiment.
///
/// Experiments are resolved or created by name on the tracking server; the
/// `experiment_id` is server-assigned and is what every child run refers to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExperimentRecord {
    experiment_id: String,
    name: String,
    artifact_location: Option<String>,
}

impl ExperimentRecord {
    /// Create a new experiment record with the given ID and name.
    #[must_use]
    pub fn new(experiment_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            experiment_id: experiment_id.into(),
            name: name.into(),
            artifact_location: None,
        }
    }

    /// Attach the server-reported artifact location.
    #[must_use]
    pub fn with_artifact_location(mut self, location: impl Into<String>) -> Self {
        self.artifact_location = Some(location.into());
        self
    }

    /// Get the server-assigned experiment ID.
    #[must_use]
    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    /// Get the experiment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the artifact location, if the server reported one.
    #[must_use]
    pub fn artifact_location(&self) -> Option<&str> {
        self.artifact_location.as_deref()
    }
}
