//! HTTP-facing error type.
//!
//! Every failure a handler can report maps to a status code and a
//! `{ "message": ... }` body. Details stay in the server log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::provider::ProviderError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Invalid body")]
    InvalidBody,

    #[error("Invalid database")]
    InvalidDatabase,

    #[error("Conflicting settings")]
    ConflictingSettings,

    #[error("Too many requests")]
    RateLimited,

    #[error("Provider request failed")]
    Provider(#[from] ProviderError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InvalidBody | ApiError::InvalidDatabase | ApiError::ConflictingSettings => {
                StatusCode::BAD_REQUEST
            }
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Provider(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::Provider(e) => tracing::error!("Provider error: {}", e),
            other => tracing::warn!("Rejected request: {}", other),
        }
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
