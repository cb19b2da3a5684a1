//! # Projection
//!
//! Tabular results to JSON-ready payloads.

mod payload;
mod projector;

pub use payload::{
    Envelope, ResponsePayload, ResultRecord, INVALID_PARAM_MESSAGE, NO_RESULTS_MESSAGE,
    QUERY_ERROR_MESSAGE,
};
pub use projector::{project, KeyStyle};
