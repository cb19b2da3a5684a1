//! # Catalog Connection
//!
//! One connection per process, opened at startup and shared by every request.
//! `rusqlite::Connection` is `Send` but not `Sync`, so access is serialized
//! through a mutex.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

use super::config::CatalogConfig;
use super::errors::{CatalogError, CatalogResult};

/// Shared handle to the relational catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    conn: Arc<Mutex<Connection>>,
    source: String,
}

impl Catalog {
    /// Open the configured catalog.
    ///
    /// File catalogs are opened read-only; `:memory:` opens an empty
    /// read-write database owned by this process.
    pub fn open(config: &CatalogConfig) -> CatalogResult<Self> {
        let source = config
            .database
            .clone()
            .ok_or(CatalogError::NotConfigured)?;

        let open_err = |cause: rusqlite::Error| CatalogError::Open {
            source_name: source.clone(),
            cause,
        };

        let conn = if config.is_memory() {
            Connection::open_in_memory().map_err(open_err)?
        } else {
            Connection::open_with_flags(
                &source,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI,
            )
            .map_err(open_err)?
        };

        if let Some(ms) = config.busy_timeout_ms {
            conn.busy_timeout(Duration::from_millis(ms))
                .map_err(open_err)?;
        }

        Ok(Self::from_connection(conn, source))
    }

    /// Wrap an already open connection
    pub fn from_connection(conn: Connection, source: impl Into<String>) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            source: source.into(),
        }
    }

    /// Name of the data source this catalog was opened from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Acquire exclusive use of the connection for one statement.
    ///
    /// A poisoned lock is taken over as-is: statements hold no state on the
    /// connection past their own call.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_requires_database() {
        let err = Catalog::open(&CatalogConfig::default()).unwrap_err();
        assert!(matches!(err, CatalogError::NotConfigured));
    }

    #[test]
    fn test_open_memory() {
        let catalog = Catalog::open(&CatalogConfig::with_database(":memory:")).unwrap();
        assert_eq!(catalog.source(), ":memory:");
        assert!(catalog.lock().execute_batch("select 1").is_ok());
    }

    #[test]
    fn test_open_missing_file_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.db");
        let config = CatalogConfig::with_database(path.to_string_lossy());

        let err = Catalog::open(&config).unwrap_err();
        assert!(matches!(err, CatalogError::Open { .. }));
    }

    #[test]
    fn test_file_catalog_is_read_only() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch("create table t (a text); insert into t values ('x');")
                .unwrap();
        }

        let mut config = CatalogConfig::with_database(path.to_string_lossy());
        config.busy_timeout_ms = Some(250);
        let catalog = Catalog::open(&config).unwrap();

        let conn = catalog.lock();
        assert!(conn.execute("insert into t values ('y')", []).is_err());
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let catalog = Catalog::open(&CatalogConfig::with_database(":memory:")).unwrap();
        let shared = catalog.clone();

        let joined = std::thread::spawn(move || {
            let _guard = shared.lock();
            panic!("statement panicked while holding the connection");
        })
        .join();
        assert!(joined.is_err());
        assert!(catalog.conn.is_poisoned());

        let conn = catalog.lock();
        let one: i64 = conn.query_row("select 1", [], |row| row.get(0)).unwrap();
        assert_eq!(one, 1);
    }
}
