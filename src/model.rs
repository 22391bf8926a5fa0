//! The model collaborator
//!
//! Anything logged as a model must expose one inference operation over a
//! [`Dataset`] sample. The logger derives the registered-model name from the
//! implementing type when the caller does not supply one.

use crate::data::{ColumnData, Dataset};
use crate::error::Result;

/// A fitted model that can run inference on a tabular sample.
///
/// `predict` is called once during logging, on the input example, to infer
/// the model signature. Implementations should return
/// [`Error::Inference`](crate::Error::Inference) when the sample cannot be
/// scored (missing column, wrong dtype).
pub trait Model {
    /// Run inference on the sample and return one output column.
    ///
    /// # Errors
    ///
    /// Returns an error when the sample cannot be scored.
    fn predict(&self, input: &Dataset) -> Result<ColumnData>;
}

/// Short type name of `M`: the final path segment of
/// [`std::any::type_name`], with any generic suffix removed.
///
/// This is the runtime-type fallback for the registered model name, the
/// equivalent of reading a model object's class name.
#[must_use]
pub fn short_type_name<M: ?Sized>() -> &'static str {
    let full = std::any::type_name::<M>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
