//! CLI command implementations
//!
//! `serve` and `check` share the same boot sequence:
//! load config → apply overrides → open catalog. `serve` then runs the
//! HTTP server on a tokio runtime until Ctrl-C.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CatalogConfig};
use crate::http_server::{HttpServer, HttpServerConfig, RouteConfig};
use crate::observability::{log_event, Event};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Configuration file structure
///
/// All sections are flattened into one JSON object, e.g.
/// `{"port": 60300, "database": "catalog.db", "profile": "services"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub server: HttpServerConfig,

    #[serde(flatten)]
    pub catalog: CatalogConfig,

    #[serde(flatten)]
    pub routes: RouteConfig,
}

impl Config {
    /// Load configuration from file. A missing file yields the defaults.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(CliError::config_error(format!(
                    "Failed to read config '{}': {}",
                    path.display(),
                    e
                )))
            }
        };

        Self::parse(&content)
    }

    /// Parse and validate configuration JSON
    pub fn parse(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line and environment overrides
    pub fn with_overrides(mut self, database: Option<String>, port: Option<u16>) -> Self {
        if let Some(database) = database {
            self.catalog.database = Some(database);
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self
    }

    fn validate(&self) -> CliResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(CliError::config_error("host must not be empty"));
        }

        if matches!(self.catalog.database.as_deref(), Some(db) if db.trim().is_empty()) {
            return Err(CliError::config_error("database must not be empty"));
        }

        Ok(())
    }
}

/// Parse CLI arguments and run the command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            database,
            port,
        } => serve(&config, database, port),
        Command::Check { config, database } => check(&config, database),
    }
}

/// Load configuration and open the catalog
fn boot(
    config_path: &Path,
    database: Option<String>,
    port: Option<u16>,
) -> CliResult<(Config, Catalog)> {
    log_event(Event::BootStart, &[]);

    let config = Config::load(config_path)?.with_overrides(database, port);
    let config_display = config_path.display().to_string();
    log_event(Event::ConfigLoaded, &[("config", &config_display)]);

    let catalog = match Catalog::open(&config.catalog) {
        Ok(catalog) => catalog,
        Err(e) => {
            let reason = e.to_string();
            log_event(Event::CatalogOpenFailed, &[("reason", &reason)]);
            return Err(e.into());
        }
    };
    log_event(Event::CatalogOpened, &[("source", catalog.source())]);

    Ok((config, catalog))
}

/// Open the catalog and serve HTTP requests
pub fn serve(config_path: &Path, database: Option<String>, port: Option<u16>) -> CliResult<()> {
    let (config, catalog) = boot(config_path, database, port)?;

    let server = HttpServer::new(config.server, config.routes, Arc::new(catalog));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Validate configuration and catalog access without serving
pub fn check(config_path: &Path, database: Option<String>) -> CliResult<()> {
    let (config, _catalog) = boot(config_path, database, None)?;
    println!(
        "ok: profile={:?} listen={}",
        config.routes.profile,
        config.server.socket_addr()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_server::Profile;
    use crate::query::Binding;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load(&tmp.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_flattened_config() {
        let config = Config::parse(
            r#"{
                "port": 8080,
                "database": "/srv/catalog.db",
                "busy_timeout_ms": 500,
                "profile": "customers",
                "root_table": "qiws.qcustcdt",
                "binding": "inline",
                "strict_status": true,
                "expose_error_reason": false
            }"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.catalog.database.as_deref(), Some("/srv/catalog.db"));
        assert_eq!(config.catalog.busy_timeout_ms, Some(500));
        assert_eq!(config.routes.profile, Profile::Customers);
        assert_eq!(config.routes.binding, Binding::Inline);
        assert!(config.routes.strict_status);
        assert!(!config.routes.expose_error_reason);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = Config::parse("{not json").unwrap_err();
        assert!(err.to_string().starts_with("CATALOG_CLI_CONFIG_ERROR"));
    }

    #[test]
    fn test_invalid_identifier_is_config_error() {
        assert!(Config::parse(r#"{"services_table": "x; drop"}"#).is_err());
    }

    #[test]
    fn test_empty_database_rejected() {
        assert!(Config::parse(r#"{"database": "  "}"#).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(Some(":memory:".to_string()), Some(9000));
        assert_eq!(config.catalog.database.as_deref(), Some(":memory:"));
        assert_eq!(config.server.port, 9000);

        let untouched = Config::default().with_overrides(None, None);
        assert_eq!(untouched, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog.json");
        fs::write(&path, r#"{"database": ":memory:", "profile": "services"}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.catalog.is_memory());
        assert_eq!(config.routes.profile, Profile::Services);
    }

    #[test]
    fn test_check_opens_memory_catalog() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.json");
        assert!(check(&path, Some(":memory:".to_string())).is_ok());
    }

    #[test]
    fn test_check_without_database_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.json");
        let err = check(&path, None).unwrap_err();
        assert!(err.to_string().contains("No catalog database configured"));
    }
}
