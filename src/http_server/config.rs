//! HTTP Server Configuration
//!
//! Listener settings plus the per-route settings of the catalog endpoints.

use serde::{Deserialize, Serialize};

use crate::query::{Binding, SqlIdentifier};

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 60300)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins (default: none, which means permissive)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    60300
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which catalog routes a process mounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// `GET /` over the customer table
    Customers,
    /// `GET /listServices`
    Services,
    /// Both route sets on one listener
    #[default]
    All,
}

impl Profile {
    pub fn mounts_customers(&self) -> bool {
        matches!(self, Profile::Customers | Profile::All)
    }

    pub fn mounts_services(&self) -> bool {
        matches!(self, Profile::Services | Profile::All)
    }
}

/// Settings of the catalog routes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default)]
    pub profile: Profile,

    /// Table listed by `GET /`
    #[serde(default = "default_root_table")]
    pub root_table: SqlIdentifier,

    /// Table searched by `GET /listServices`
    #[serde(default = "default_services_table")]
    pub services_table: SqlIdentifier,

    /// Column matched by the `search` parameter
    #[serde(default = "default_search_column")]
    pub search_column: SqlIdentifier,

    #[serde(default)]
    pub binding: Binding,

    /// Use 404/500 for empty results and query failures instead of 200
    #[serde(default)]
    pub strict_status: bool,

    /// Include the driver's error text in query failure bodies
    #[serde(default = "default_expose_error_reason")]
    pub expose_error_reason: bool,
}

fn default_root_table() -> SqlIdentifier {
    SqlIdentifier::parse("qiws.qcustcdt").expect("default table name is valid")
}

fn default_services_table() -> SqlIdentifier {
    SqlIdentifier::parse("qsys2.services_info").expect("default table name is valid")
}

fn default_search_column() -> SqlIdentifier {
    SqlIdentifier::parse("service_name").expect("default column name is valid")
}

fn default_expose_error_reason() -> bool {
    true
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            root_table: default_root_table(),
            services_table: default_services_table(),
            search_column: default_search_column(),
            binding: Binding::default(),
            strict_status: false,
            expose_error_reason: default_expose_error_reason(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 60300);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_socket_addr() {
        let config = HttpServerConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_default_routes() {
        let routes = RouteConfig::default();
        assert_eq!(routes.profile, Profile::All);
        assert_eq!(routes.root_table.as_str(), "qiws.qcustcdt");
        assert_eq!(routes.services_table.as_str(), "qsys2.services_info");
        assert_eq!(routes.search_column.as_str(), "service_name");
        assert_eq!(routes.binding, Binding::Parameters);
        assert!(!routes.strict_status);
        assert!(routes.expose_error_reason);
    }

    #[test]
    fn test_profile_mounts() {
        assert!(Profile::Customers.mounts_customers());
        assert!(!Profile::Customers.mounts_services());
        assert!(Profile::Services.mounts_services());
        assert!(!Profile::Services.mounts_customers());
        assert!(Profile::All.mounts_customers() && Profile::All.mounts_services());
    }

    #[test]
    fn test_route_config_deserialize() {
        let routes: RouteConfig = serde_json::from_str(
            r#"{"profile": "services", "services_table": "services_info", "binding": "inline"}"#,
        )
        .unwrap();
        assert_eq!(routes.profile, Profile::Services);
        assert_eq!(routes.services_table.as_str(), "services_info");
        assert_eq!(routes.binding, Binding::Inline);
        assert_eq!(routes.root_table.as_str(), "qiws.qcustcdt");
    }

    #[test]
    fn test_route_config_rejects_bad_identifier() {
        let result: Result<RouteConfig, _> =
            serde_json::from_str(r#"{"root_table": "t; drop table t"}"#);
        assert!(result.is_err());
    }
}
