//! Lightweight value/column/batch types carried between the scan layers.

use serde::{Deserialize, Serialize};

use crate::schema::DataType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    Str(String),
}

impl Scalar {
    pub fn data_type(&self) -> DataType {
        match self {
            Scalar::Null => DataType::Utf8,
            Scalar::Bool(_) => DataType::Boolean,
            Scalar::I64(_) => DataType::Int64,
            Scalar::F64(_) => DataType::Float64,
            Scalar::Str(_) => DataType::Utf8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Scalar>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One typed table chunk. Values are already cast, filtered, and projected
/// by the time a batch reaches the consumer, who then owns it outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowBatch {
    pub columns: Vec<Column>,
}

impl RowBatch {
    pub fn num_rows(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Drop all rows past `len` (used to honor a row cap mid-batch).
    pub fn truncate(&mut self, len: usize) {
        for col in &mut self.columns {
            col.values.truncate(len);
        }
    }

    /// Append `other`'s rows below this batch's rows. Column names must
    /// match pairwise in order.
    pub fn vstack(&mut self, other: RowBatch) -> Result<(), String> {
        if self.columns.len() != other.columns.len() {
            return Err(format!(
                "cannot vstack batches with different column counts: {} vs {}",
                self.columns.len(),
                other.columns.len()
            ));
        }
        for (dst, src) in self.columns.iter_mut().zip(other.columns) {
            if dst.name != src.name {
                return Err(format!(
                    "cannot vstack mismatched columns: '{}' vs '{}'",
                    dst.name, src.name
                ));
            }
            dst.values.extend(src.values);
        }
        Ok(())
    }
}
