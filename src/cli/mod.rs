//! CLI module for catalog-api
//!
//! Provides command-line interface for:
//! - serve: Open the catalog and serve HTTP requests
//! - check: Validate configuration and catalog access

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
