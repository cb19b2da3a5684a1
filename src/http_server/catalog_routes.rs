//! Catalog HTTP Routes
//!
//! - `GET /` lists the customer table with verbatim column keys
//! - `GET /listServices?search=<term>` searches the services table with
//!   camelCase keys
//!
//! Every body is JSON: a row array, or an envelope object when there are no
//! rows to return.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::catalog::{run_query, QueryExecutor, QueryFailure};
use crate::context::RequestContext;
use crate::observability::{Event, Logger, MetricsRegistry};
use crate::projection::{project, KeyStyle, ResponsePayload};
use crate::query::Statement;

use super::config::RouteConfig;
use super::errors::{ApiError, ApiResult};

/// Longest accepted `search` value, in characters
pub const MAX_SEARCH_LEN: usize = 50;

// ==================
// Shared State
// ==================

/// Catalog state shared across handlers
pub struct CatalogState {
    executor: Arc<dyn QueryExecutor>,
    metrics: Arc<MetricsRegistry>,
    routes: RouteConfig,
}

impl CatalogState {
    pub fn new(
        executor: Arc<dyn QueryExecutor>,
        metrics: Arc<MetricsRegistry>,
        routes: RouteConfig,
    ) -> Self {
        Self {
            executor,
            metrics,
            routes,
        }
    }

    /// Run a statement off the async runtime and project the outcome
    async fn fetch(
        &self,
        statement: Statement,
        ctx: RequestContext,
        style: KeyStyle,
    ) -> ResponsePayload {
        let executor = Arc::clone(&self.executor);
        let metrics = Arc::clone(&self.metrics);
        let request_id = ctx.request_id.to_string();

        let outcome = tokio::task::spawn_blocking(move || {
            run_query(executor.as_ref(), &statement, &ctx, &metrics)
        })
        .await
        .unwrap_or_else(|join_err| {
            let reason = format!("Query task failed: {}", join_err);
            self.metrics.increment_queries_failed();
            Logger::error(
                Event::QueryFailed,
                &[("request_id", &request_id), ("reason", &reason)],
            );
            Err(QueryFailure::new(reason))
        });

        project(outcome, style)
    }

    /// Serialize a payload with the configured status and reason policy
    fn respond(&self, payload: ResponsePayload) -> Response {
        let status = if !self.routes.strict_status {
            StatusCode::OK
        } else if payload.is_query_failure() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else if payload.is_no_results() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::OK
        };

        let payload = match payload {
            ResponsePayload::Envelope(envelope) if !self.routes.expose_error_reason => {
                ResponsePayload::Envelope(envelope.without_reason())
            }
            other => other,
        };

        (status, Json(payload)).into_response()
    }

    /// Count and log a rejected request
    fn reject(&self, ctx: &RequestContext, err: ApiError) -> ApiError {
        self.metrics.increment_requests_rejected();
        let request_id = ctx.request_id.to_string();
        let reason = err.to_string();
        Logger::warn(
            Event::RequestRejected,
            &[
                ("request_id", &request_id),
                ("route", ctx.route),
                ("reason", &reason),
            ],
        );
        err
    }
}

// ==================
// Request Types
// ==================

#[derive(Debug, Default, Deserialize)]
pub struct ListServicesQuery {
    #[serde(default)]
    pub search: Option<String>,
}

// ==================
// Catalog Routes
// ==================

/// Create the customer-list route (`GET /`)
pub fn customer_routes(state: Arc<CatalogState>) -> Router {
    Router::new()
        .route("/", get(list_customers_handler))
        .with_state(state)
}

/// Create the services-info route (`GET /listServices`)
pub fn services_routes(state: Arc<CatalogState>) -> Router {
    Router::new()
        .route("/listServices", get(list_services_handler))
        .with_state(state)
}

/// Check the `search` parameter
pub fn validate_search(term: &str) -> ApiResult<()> {
    let len = term.chars().count();
    if len > MAX_SEARCH_LEN {
        return Err(ApiError::InvalidQueryParam(format!(
            "search must be at most {} characters, got {}",
            MAX_SEARCH_LEN, len
        )));
    }
    Ok(())
}

// ==================
// Handlers
// ==================

async fn list_customers_handler(State(state): State<Arc<CatalogState>>) -> Response {
    let ctx = RequestContext::new("/");
    let statement = Statement::select_all(&state.routes.root_table);

    let payload = state.fetch(statement, ctx, KeyStyle::Verbatim).await;
    state.respond(payload)
}

async fn list_services_handler(
    State(state): State<Arc<CatalogState>>,
    query: Result<Query<ListServicesQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let ctx = RequestContext::new("/listServices");
    let routes = &state.routes;

    let Query(query) = query.map_err(|rejection| {
        state.reject(&ctx, ApiError::InvalidQueryParam(rejection.body_text()))
    })?;

    // Without a search term the whole table is listed
    let statement = match query.search {
        Some(term) => {
            validate_search(&term).map_err(|err| state.reject(&ctx, err))?;
            Statement::select_like(
                &routes.services_table,
                &routes.search_column,
                &term,
                routes.binding,
            )
        }
        None => Statement::select_all(&routes.services_table),
    };

    let payload = state.fetch(statement, ctx, KeyStyle::CamelCase).await;
    Ok(state.respond(payload))
}
