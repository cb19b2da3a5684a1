//! # Result Projector
//!
//! Turns an executor outcome into a response payload. Row order and column
//! order are kept exactly as the catalog returned them.

use serde::{Deserialize, Serialize};

use crate::catalog::{QueryOutcome, Scalar, TabularResult};
use crate::observability::{Event, Logger};
use crate::query::to_camel_case;

use super::payload::{Envelope, ResponsePayload, ResultRecord};

/// How column names become JSON keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStyle {
    /// Column names exactly as the catalog reports them
    Verbatim,
    /// lowerCamelCase column names
    CamelCase,
}

impl KeyStyle {
    pub fn key(&self, column: &str) -> String {
        match self {
            KeyStyle::Verbatim => column.to_string(),
            KeyStyle::CamelCase => to_camel_case(column),
        }
    }
}

/// Project an executor outcome into a response payload
pub fn project(outcome: QueryOutcome, style: KeyStyle) -> ResponsePayload {
    match outcome {
        Err(failure) => ResponsePayload::Envelope(Envelope::query_failure(failure.reason())),
        Ok(result) if result.is_empty() => ResponsePayload::Envelope(Envelope::no_results()),
        Ok(result) => ResponsePayload::Records(project_rows(result, style)),
    }
}

/// Build one record per row
///
/// Columns that map to an already used key share its slot: the key keeps its
/// first position and the later column's value wins.
fn project_rows(result: TabularResult, style: KeyStyle) -> Vec<ResultRecord> {
    let (columns, rows) = result.into_parts();

    let mut keys: Vec<String> = Vec::with_capacity(columns.len());
    let mut slots: Vec<usize> = Vec::with_capacity(columns.len());
    for column in &columns {
        let key = style.key(column);
        match keys.iter().position(|k| *k == key) {
            Some(slot) => {
                Logger::warn(
                    Event::DuplicateColumnKey,
                    &[("column", column.as_str()), ("key", key.as_str())],
                );
                slots.push(slot);
            }
            None => {
                slots.push(keys.len());
                keys.push(key);
            }
        }
    }

    rows.into_iter()
        .map(|row| {
            let mut values: Vec<Scalar> = vec![Scalar::Null; keys.len()];
            for (slot, value) in slots.iter().zip(row) {
                values[*slot] = value;
            }

            let mut record = ResultRecord::with_capacity(keys.len());
            for (key, value) in keys.iter().zip(values) {
                record.insert(key.clone(), value);
            }
            record
        })
        .collect()
}
