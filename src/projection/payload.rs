//! # Response Payloads
//!
//! A response body is either a non-empty array of row objects or an
//! envelope object describing why there are no rows.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::catalog::Scalar;

/// Envelope message for a query that matched nothing
pub const NO_RESULTS_MESSAGE: &str = "no results found";

/// Envelope message for a database-layer failure
pub const QUERY_ERROR_MESSAGE: &str = "Internal Database Query Error";

/// Envelope message for a rejected request parameter
pub const INVALID_PARAM_MESSAGE: &str = "Invalid query parameter";

/// One row as an ordered key/value object
///
/// Keys serialize in insertion order, which is the catalog's column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultRecord {
    entries: Vec<(String, Scalar)>,
}

impl ResultRecord {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert a value. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: Scalar) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ResultRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Object body used for empty results and errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub error: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Envelope {
    /// `{error: true, message: "no results found"}`
    pub fn no_results() -> Self {
        Self {
            error: true,
            message: NO_RESULTS_MESSAGE.to_string(),
            reason: None,
        }
    }

    /// `{error: true, message: "Internal Database Query Error", reason}`
    pub fn query_failure(reason: impl Into<String>) -> Self {
        Self {
            error: true,
            message: QUERY_ERROR_MESSAGE.to_string(),
            reason: Some(reason.into()),
        }
    }

    /// `{error: true, message: "Invalid query parameter", reason}`
    pub fn invalid_param(reason: impl Into<String>) -> Self {
        Self {
            error: true,
            message: INVALID_PARAM_MESSAGE.to_string(),
            reason: Some(reason.into()),
        }
    }

    /// Drop the `reason` field
    pub fn without_reason(mut self) -> Self {
        self.reason = None;
        self
    }
}

/// Response body: rows, or an envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponsePayload {
    Records(Vec<ResultRecord>),
    Envelope(Envelope),
}

impl ResponsePayload {
    /// Returns the envelope if this payload is not a row array
    pub fn envelope(&self) -> Option<&Envelope> {
        match self {
            ResponsePayload::Envelope(envelope) => Some(envelope),
            ResponsePayload::Records(_) => None,
        }
    }

    /// Returns the rows if this payload is a row array
    pub fn records(&self) -> Option<&[ResultRecord]> {
        match self {
            ResponsePayload::Records(records) => Some(records),
            ResponsePayload::Envelope(_) => None,
        }
    }

    pub fn is_query_failure(&self) -> bool {
        self.envelope()
            .map(|e| e.message == QUERY_ERROR_MESSAGE)
            .unwrap_or(false)
    }

    pub fn is_no_results(&self) -> bool {
        self.envelope()
            .map(|e| e.message == NO_RESULTS_MESSAGE)
            .unwrap_or(false)
    }
}
