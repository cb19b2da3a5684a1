//! catalog-api - read-only JSON endpoints over a relational catalog
//!
//! Request-to-result pipeline:
//! handler → quoting/binding → executor → projector → JSON body

pub mod catalog;
pub mod cli;
pub mod context;
pub mod http_server;
pub mod observability;
pub mod projection;
pub mod query;
