//! # Query Executor
//!
//! Runs one statement and collects the full result set. Database failures
//! become [`QueryFailure`] values and are logged where they happen.

use rusqlite::params_from_iter;

use crate::context::RequestContext;
use crate::observability::{Event, Logger, MetricsRegistry};
use crate::query::Statement;

use super::connection::Catalog;
use super::errors::QueryFailure;
use super::result::{QueryOutcome, Scalar, TabularResult};

/// Something that can run a statement against the catalog
pub trait QueryExecutor: Send + Sync {
    /// Execute the statement and return every row
    fn execute(&self, statement: &Statement) -> QueryOutcome;
}

impl QueryExecutor for Catalog {
    fn execute(&self, statement: &Statement) -> QueryOutcome {
        // Guard, prepared statement and cursor all drop on every return path
        let conn = self.lock();
        let mut stmt = conn.prepare(statement.sql())?;

        let columns: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        let width = columns.len();
        let mut result = TabularResult::new(columns);

        let mut rows = stmt.query(params_from_iter(statement.params().iter()))?;
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(width);
            for idx in 0..width {
                values.push(Scalar::from(row.get_ref(idx)?));
            }
            result.push_row(values)?;
        }

        Ok(result)
    }
}

/// Execute a statement, logging and counting the outcome
pub fn run_query(
    executor: &dyn QueryExecutor,
    statement: &Statement,
    ctx: &RequestContext,
    metrics: &MetricsRegistry,
) -> QueryOutcome {
    let outcome = executor.execute(statement);
    let request_id = ctx.request_id.to_string();
    let elapsed = ctx.elapsed_ms().to_string();

    match &outcome {
        Ok(result) => {
            metrics.record_query(result.len());
            let rows = result.len().to_string();
            let event = if result.is_empty() {
                Event::QueryEmpty
            } else {
                Event::QueryComplete
            };
            Logger::info(
                event,
                &[
                    ("request_id", &request_id),
                    ("route", ctx.route),
                    ("rows", &rows),
                    ("elapsed_ms", &elapsed),
                ],
            );
        }
        Err(failure) => {
            metrics.increment_queries_failed();
            Logger::error(
                Event::QueryFailed,
                &[
                    ("request_id", &request_id),
                    ("route", ctx.route),
                    ("sql", &statement.inline_sql()),
                    ("reason", failure.reason()),
                    ("elapsed_ms", &elapsed),
                ],
            );
        }
    }

    outcome
}

/// Executor that fails every statement with a fixed reason
#[derive(Debug, Clone)]
pub struct FailingExecutor {
    reason: String,
}

impl FailingExecutor {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl QueryExecutor for FailingExecutor {
    fn execute(&self, _statement: &Statement) -> QueryOutcome {
        Err(QueryFailure::new(self.reason.clone()))
    }
}
