//! Catalog Configuration

use serde::{Deserialize, Serialize};

/// Data source used for the in-process catalog
pub const MEMORY_SOURCE: &str = ":memory:";

/// Catalog connection configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path of the SQLite catalog, or `:memory:`
    #[serde(default)]
    pub database: Option<String>,

    /// Driver-level busy timeout in milliseconds
    #[serde(default)]
    pub busy_timeout_ms: Option<u64>,
}

impl CatalogConfig {
    /// Config pointing at the given data source
    pub fn with_database(database: impl Into<String>) -> Self {
        Self {
            database: Some(database.into()),
            ..Default::default()
        }
    }

    /// Returns true when the catalog lives only in this process
    pub fn is_memory(&self) -> bool {
        self.database.as_deref() == Some(MEMORY_SOURCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_database() {
        let config = CatalogConfig::default();
        assert!(config.database.is_none());
        assert!(config.busy_timeout_ms.is_none());
        assert!(!config.is_memory());
    }

    #[test]
    fn test_memory_source() {
        assert!(CatalogConfig::with_database(":memory:").is_memory());
        assert!(!CatalogConfig::with_database("/var/lib/catalog.db").is_memory());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: CatalogConfig = serde_json::from_str(r#"{"database": "c.db"}"#).unwrap();
        assert_eq!(config.database.as_deref(), Some("c.db"));
        assert!(config.busy_timeout_ms.is_none());
    }
}
