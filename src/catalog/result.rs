//! Tabular results returned by the executor

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rusqlite::types::ValueRef;
use serde::{Serialize, Serializer};

use super::errors::QueryFailure;

/// A single column value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    /// Serialized as a base64 string
    Blob(Vec<u8>),
}

impl From<ValueRef<'_>> for Scalar {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Scalar::Null,
            ValueRef::Integer(v) => Scalar::Integer(v),
            ValueRef::Real(v) => Scalar::Real(v),
            ValueRef::Text(bytes) => Scalar::Text(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(bytes) => Scalar::Blob(bytes.to_vec()),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Real(value)
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Integer(v) => serializer.serialize_i64(*v),
            Scalar::Real(v) => serializer.serialize_f64(*v),
            Scalar::Text(v) => serializer.serialize_str(v),
            Scalar::Blob(v) => serializer.serialize_str(&STANDARD.encode(v)),
        }
    }
}

/// Ordered column names plus ordered rows aligned to them
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabularResult {
    columns: Vec<String>,
    rows: Vec<Vec<Scalar>>,
}

impl TabularResult {
    /// Create an empty result with the given columns
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. Rejects rows whose width differs from the column count.
    pub fn push_row(&mut self, row: Vec<Scalar>) -> Result<(), QueryFailure> {
        if row.len() != self.columns.len() {
            return Err(QueryFailure::new(format!(
                "Row has {} values, expected {}",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Build a result from columns and rows, checking every row's width
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Scalar>>) -> Result<Self, QueryFailure> {
        let mut result = Self::new(columns);
        for row in rows {
            result.push_row(row)?;
        }
        Ok(result)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Scalar>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Consume into columns and rows
    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<Scalar>>) {
        (self.columns, self.rows)
    }
}

/// What the executor hands to the projector
pub type QueryOutcome = Result<TabularResult, QueryFailure>;
