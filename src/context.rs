//! Request Context
//!
//! Per-request metadata carried from the handler into the executor so that
//! query events can be correlated.

use std::time::Instant;

use uuid::Uuid;

/// Context carried through one request-to-result pipeline run
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Request ID for log correlation
    pub request_id: Uuid,

    /// Route that produced the request
    pub route: &'static str,

    /// Start time for duration tracking
    started_at: Instant,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(route: &'static str) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            route,
            started_at: Instant::now(),
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.started_at.elapsed().as_millis()
    }
}
