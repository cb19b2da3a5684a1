//! Catalog error types

use thiserror::Error;

/// A statement failed at the database layer.
///
/// Carries only the driver's description. Failures never propagate to the
/// transport layer; the projector turns them into the error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct QueryFailure {
    reason: String,
}

impl QueryFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The underlying error description
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<rusqlite::Error> for QueryFailure {
    fn from(err: rusqlite::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Errors raised while opening the catalog at startup
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No data source configured
    #[error("No catalog database configured")]
    NotConfigured,

    /// Driver refused to open the data source
    #[error("Failed to open catalog '{source_name}': {cause}")]
    Open {
        source_name: String,
        #[source]
        cause: rusqlite::Error,
    },
}

/// Result type for catalog startup operations
pub type CatalogResult<T> = Result<T, CatalogError>;
