//! # HTTP Server
//!
//! Combines the catalog routes selected by the profile with the
//! observability routes into one axum server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::catalog::QueryExecutor;
use crate::observability::{log_event, Event, MetricsRegistry};

use super::catalog_routes::{customer_routes, services_routes, CatalogState};
use super::config::{HttpServerConfig, RouteConfig};
use super::observability_routes::{health_routes, observability_routes};

/// HTTP server for the catalog endpoints
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over the given executor
    pub fn new(
        config: HttpServerConfig,
        routes: RouteConfig,
        executor: Arc<dyn QueryExecutor>,
    ) -> Self {
        Self::with_metrics(config, routes, executor, Arc::new(MetricsRegistry::new()))
    }

    /// Create a server that reports into an existing metrics registry
    pub fn with_metrics(
        config: HttpServerConfig,
        routes: RouteConfig,
        executor: Arc<dyn QueryExecutor>,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        let router = Self::build_router(&config, routes, executor, metrics);
        Self { config, router }
    }

    fn build_router(
        config: &HttpServerConfig,
        routes: RouteConfig,
        executor: Arc<dyn QueryExecutor>,
        metrics: Arc<MetricsRegistry>,
    ) -> Router {
        let profile = routes.profile;
        let catalog_state = Arc::new(CatalogState::new(executor, Arc::clone(&metrics), routes));

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        let mut router = Router::new()
            .merge(health_routes())
            .nest("/observability", observability_routes(metrics));

        if profile.mounts_customers() {
            router = router.merge(customer_routes(Arc::clone(&catalog_state)));
        }
        if profile.mounts_services() {
            router = router.merge(services_routes(catalog_state));
        }

        router.layer(ServiceBuilder::new().layer(cors))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let local = listener.local_addr()?.to_string();
        log_event(Event::ServerListening, &[("addr", &local)]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log_event(Event::ShutdownComplete, &[]);
        Ok(())
    }
}

async fn shutdown_signal() {
    // If the handler cannot be installed, serve until the process is killed
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    log_event(Event::ShutdownStart, &[]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FailingExecutor;

    fn executor() -> Arc<dyn QueryExecutor> {
        Arc::new(FailingExecutor::new("unused"))
    }

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new(HttpServerConfig::default(), RouteConfig::default(), executor());
        assert_eq!(server.socket_addr(), "0.0.0.0:60300");
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = HttpServerConfig::with_port(8080);
        let server = HttpServer::new(config, RouteConfig::default(), executor());
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds_with_cors_origins() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let server = HttpServer::new(config, RouteConfig::default(), executor());
        let _router = server.router();
    }
}
