//! Tabular input samples
//!
//! A [`Dataset`] is a small named-column sample of model input. It serves two
//! purposes during model logging: signature inference (column names and
//! dtypes) and the uploaded input example (MLflow "split" JSON orientation).
//! It is a sample holder, not a data frame; no compute happens here.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Scalar column type, using MLflow dtype vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Boolean values
    Boolean,
    /// 64-bit signed integers
    Long,
    /// 64-bit floats
    Double,
    /// UTF-8 strings
    String,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Boolean => "boolean",
            Self::Long => "long",
            Self::Double => "double",
            Self::String => "string",
        };
        f.write_str(name)
    }
}

/// Typed column payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnData {
    /// Boolean column
    Boolean(Vec<bool>),
    /// Integer column
    Long(Vec<i64>),
    /// Float column
    Double(Vec<f64>),
    /// String column
    String(Vec<String>),
}

impl ColumnData {
    /// Scalar type of this column.
    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        match self {
            Self::Boolean(_) => ColumnType::Boolean,
            Self::Long(_) => ColumnType::Long,
            Self::Double(_) => ColumnType::Double,
            Self::String(_) => ColumnType::String,
        }
    }

    /// Number of values in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Boolean(v) => v.len(),
            Self::Long(v) => v.len(),
            Self::Double(v) => v.len(),
            Self::String(v) => v.len(),
        }
    }

    /// Whether the column holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert the column to a vector of JSON values, one per row.
    #[must_use]
    pub fn to_json_values(&self) -> Vec<serde_json::Value> {
        match self {
            Self::Boolean(v) => v.iter().map(|b| serde_json::Value::from(*b)).collect(),
            Self::Long(v) => v.iter().map(|n| serde_json::Value::from(*n)).collect(),
            Self::Double(v) => v.iter().map(|x| serde_json::Value::from(*x)).collect(),
            Self::String(v) => v.iter().map(|s| serde_json::Value::from(s.clone())).collect(),
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Create a named column.
    #[must_use]
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column payload.
    #[must_use]
    pub const fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Scalar type of the column.
    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        self.data.column_type()
    }
}

/// A tabular sample of model input: named columns of equal length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Build a dataset from columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] when no columns are given or the columns
    /// have differing lengths.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let Some(first) = columns.first() else {
            return Err(Error::schema("dataset requires at least one column"));
        };
        let rows = first.data().len();
        for column in &columns {
            if column.data().len() != rows {
                return Err(Error::schema(format!(
                    "column '{}' has {} rows, expected {}",
                    column.name(),
                    column.data().len(),
                    rows
                )));
            }
        }
        Ok(Self { columns })
    }

    /// The columns of the dataset.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of rows (all columns agree by construction).
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.data().len())
    }

    /// Number of columns.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Look up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Render the sample in MLflow "split" orientation:
    /// `{"columns": [names...], "data": [[row values...], ...]}`.
    #[must_use]
    pub fn to_split_json(&self) -> serde_json::Value {
        let names: Vec<serde_json::Value> = self
            .columns
            .iter()
            .map(|c| serde_json::Value::from(c.name().to_string()))
            .collect();

        let per_column: Vec<Vec<serde_json::Value>> =
            self.columns.iter().map(|c| c.data().to_json_values()).collect();

        let rows: Vec<serde_json::Value> = (0..self.num_rows())
            .map(|row| {
                let cells: Vec<serde_json::Value> =
                    per_column.iter().map(|col| col[row].clone()).collect();
                serde_json::Value::from(cells)
            })
            .collect();

        serde_json::json!({
            "columns": names,
            "data": rows,
        })
    }
}
