//! # HTTP Server Module
//!
//! Axum server exposing the catalog over JSON.
//!
//! # Endpoints
//!
//! - `/` - Customer listing (customers profile)
//! - `/listServices` - Service search (services profile)
//! - `/health` - Health check
//! - `/observability/*` - Health and counters

pub mod catalog_routes;
pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod server;

pub use catalog_routes::{CatalogState, ListServicesQuery, MAX_SEARCH_LEN};
pub use config::{HttpServerConfig, Profile, RouteConfig};
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
