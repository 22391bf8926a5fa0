//! # Rastro: Experiment Tracking Client
//!
//! Rastro is a synchronous client for MLflow-compatible tracking servers.
//! It logs a trained model — params, metric, inferred signature, registered
//! artifact — inside one scoped run that is guaranteed to close on every
//! exit path.
//!
//! The tracking endpoint comes from the `MLFLOW_TRACKING_URI` environment
//! variable; there is no default endpoint and no local fallback.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use rastro::data::{Column, ColumnData, Dataset};
//! use rastro::{log_model, LogOptions, Model, TrackingClient};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct ThresholdModel {
//!     cutoff: f64,
//! }
//!
//! impl Model for ThresholdModel {
//!     fn predict(&self, input: &Dataset) -> rastro::Result<ColumnData> {
//!         let column = input
//!             .column("score")
//!             .ok_or_else(|| rastro::Error::inference("missing 'score' column"))?;
//!         match column.data() {
//!             ColumnData::Double(values) => Ok(ColumnData::Boolean(
//!                 values.iter().map(|v| *v >= self.cutoff).collect(),
//!             )),
//!             _ => Err(rastro::Error::inference("'score' must be double")),
//!         }
//!     }
//! }
//!
//! // Requires MLFLOW_TRACKING_URI to be set
//! let client = TrackingClient::from_env()?;
//!
//! let sample = Dataset::from_columns(vec![Column::new(
//!     "score",
//!     ColumnData::Double(vec![0.2, 0.8]),
//! )])?;
//!
//! let model = ThresholdModel { cutoff: 0.5 };
//! let options = LogOptions::new()
//!     .with_metric_name("accuracy")
//!     .with_param("cutoff", 0.5)
//!     .with_score(0.93);
//!
//! let info = log_model(&client, &model, &sample, "churn-models", &options)?;
//! println!("registered {} v{}", info.name(), info.version());
//! # Ok::<(), rastro::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod client;
pub mod config;
pub mod data;
pub mod error;
pub mod experiment;
pub mod logger;
pub mod model;
pub mod signature;

pub use client::{ActiveRun, TrackingClient};
pub use config::TrackingConfig;
pub use error::{Error, Result};
pub use experiment::{ExperimentRecord, MetricRecord, ModelInfo, RunRecord, RunStatus};
pub use logger::{log_model, LogOptions};
pub use model::Model;
pub use signature::{infer_signature, Signature};
