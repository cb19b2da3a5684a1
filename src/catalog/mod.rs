//! # Catalog
//!
//! The relational data source behind every route: connection handling,
//! statement execution and the tabular results it produces.

mod config;
mod connection;
mod errors;
mod executor;
mod result;

pub use config::{CatalogConfig, MEMORY_SOURCE};
pub use connection::Catalog;
pub use errors::{CatalogError, CatalogResult, QueryFailure};
pub use executor::{run_query, FailingExecutor, QueryExecutor};
pub use result::{QueryOutcome, Scalar, TabularResult};
