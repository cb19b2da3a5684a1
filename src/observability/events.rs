//! Observable events
//!
//! Every log line carries one of these as its `event` field.

use std::fmt;

/// Observable events in the catalog service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Process startup begins
    BootStart,
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Catalog connection opened
    CatalogOpened,
    /// Catalog could not be opened (FATAL)
    CatalogOpenFailed,
    /// Listener bound, ready for requests
    ServerListening,
    /// Shutdown signal received
    ShutdownStart,
    /// Listener closed
    ShutdownComplete,

    // Requests
    /// Request parameter failed validation
    RequestRejected,

    // Queries
    /// Query returned at least one row
    QueryComplete,
    /// Query returned no rows
    QueryEmpty,
    /// Query failed at the database layer
    QueryFailed,
    /// Two columns projected onto the same JSON key
    DuplicateColumnKey,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::CatalogOpened => "CATALOG_OPENED",
            Event::CatalogOpenFailed => "CATALOG_OPEN_FAILED",
            Event::ServerListening => "SERVER_LISTENING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::RequestRejected => "REQUEST_REJECTED",

            Event::QueryComplete => "QUERY_COMPLETE",
            Event::QueryEmpty => "QUERY_EMPTY",
            Event::QueryFailed => "QUERY_FAILED",
            Event::DuplicateColumnKey => "DUPLICATE_COLUMN_KEY",
        }
    }

    /// Returns true if this event ends the process
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::CatalogOpenFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
