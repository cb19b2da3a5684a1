//! CLI argument definitions using clap
//!
//! Commands:
//! - catalog-api serve --config <path> [--database <path>] [--port <n>]
//! - catalog-api check --config <path> [--database <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// catalog-api - read-only JSON endpoints over a relational catalog
#[derive(Parser, Debug)]
#[command(name = "catalog-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the catalog and serve HTTP requests until Ctrl-C
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./catalog.json")]
        config: PathBuf,

        /// Catalog data source, overrides the config file
        #[arg(long, env = "CATALOG_DATABASE")]
        database: Option<String>,

        /// Listen port, overrides the config file
        #[arg(long, env = "CATALOG_PORT")]
        port: Option<u16>,
    },

    /// Load the configuration, open the catalog, and exit
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./catalog.json")]
        config: PathBuf,

        /// Catalog data source, overrides the config file
        #[arg(long, env = "CATALOG_DATABASE")]
        database: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["catalog-api", "serve"]).unwrap();
        match cli.command {
            Command::Serve { config, .. } => {
                assert_eq!(config, PathBuf::from("./catalog.json"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from([
            "catalog-api",
            "serve",
            "--config",
            "/etc/catalog.json",
            "--database",
            "/srv/catalog.db",
            "--port",
            "8080",
        ])
        .unwrap();
        match cli.command {
            Command::Serve {
                config,
                database,
                port,
            } => {
                assert_eq!(config, PathBuf::from("/etc/catalog.json"));
                assert_eq!(database.as_deref(), Some("/srv/catalog.db"));
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["catalog-api", "check", "--database", ":memory:"]).unwrap();
        assert!(matches!(cli.command, Command::Check { .. }));
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Cli::try_parse_from(["catalog-api", "serve", "--port", "http"]).is_err());
    }
}
