//! # HTTP Errors
//!
//! Errors raised before a request reaches the catalog.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::projection::Envelope;

/// Result type for request validation
pub type ApiResult<T> = Result<T, ApiError>;

/// Client errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Query parameter failed validation
    #[error("{0}")]
    InvalidQueryParam(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidQueryParam(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<ApiError> for Envelope {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidQueryParam(reason) => Envelope::invalid_param(reason),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(Envelope::from(self))).into_response()
    }
}
