//! Model signature inference
//!
//! A signature is the structural schema of a model's call shape: named,
//! typed input fields plus the output field. It is inferred from a sample of
//! input data and the model's prediction on that sample, then embedded in the
//! `MLmodel` metadata uploaded with the artifact.

use serde::{Deserialize, Serialize};

use crate::data::{ColumnData, ColumnType, Dataset};

/// One field of a signature: an optional name and a scalar dtype.
///
/// Input fields carry the column name; the output field is unnamed, matching
/// how single-output predictions are described by the tracking service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(rename = "type")]
    dtype: ColumnType,
}

impl FieldSpec {
    /// Create a named field.
    #[must_use]
    pub fn named(name: impl Into<String>, dtype: ColumnType) -> Self {
        Self {
            name: Some(name.into()),
            dtype,
        }
    }

    /// Create an unnamed field.
    #[must_use]
    pub const fn unnamed(dtype: ColumnType) -> Self {
        Self { name: None, dtype }
    }

    /// Field name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Field dtype.
    #[must_use]
    pub const fn dtype(&self) -> ColumnType {
        self.dtype
    }
}

/// Inferred input/output schema of a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    inputs: Vec<FieldSpec>,
    outputs: Vec<FieldSpec>,
}

impl Signature {
    /// Construct a signature from explicit field lists.
    #[must_use]
    pub fn new(inputs: Vec<FieldSpec>, outputs: Vec<FieldSpec>) -> Self {
        Self { inputs, outputs }
    }

    /// Input fields.
    #[must_use]
    pub fn inputs(&self) -> &[FieldSpec] {
        &self.inputs
    }

    /// Output fields.
    #[must_use]
    pub fn outputs(&self) -> &[FieldSpec] {
        &self.outputs
    }
}

/// Infer a signature from an input sample and the prediction it produced.
///
/// Inputs are the dataset's columns, in order, with their names and dtypes.
/// The output is a single unnamed field with the prediction's dtype.
#[must_use]
pub fn infer_signature(input: &Dataset, output: &ColumnData) -> Signature {
    let inputs = input
        .columns()
        .iter()
        .map(|column| FieldSpec::named(column.name(), column.column_type()))
        .collect();

    let outputs = vec![FieldSpec::unnamed(output.column_type())];

    Signature::new(inputs, outputs)
}
