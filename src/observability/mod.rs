//! Observability for the catalog service
//!
//! - Structured JSON logging with typed events
//! - Atomic request/query counters
//!
//! # Usage
//!
//! ```ignore
//! use catalog_api::observability::{Event, Logger, MetricsRegistry};
//!
//! Logger::info(Event::QueryComplete, &[("rows", "42")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.record_query(42);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event, at FATAL for fatal events and INFO otherwise
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event, fields);
}
