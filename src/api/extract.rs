//! JSON body extractor with total validation.
//!
//! axum's `Json` rejects with its own status codes and plain-text bodies; the
//! API promises `400 { "message": "Invalid body" }` for every malformed body.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::{AskBody, DocsGetBody};

/// Shape checks beyond what deserialization enforces.
pub trait Validate {
    fn is_valid(&self) -> bool;
}

impl Validate for AskBody {
    fn is_valid(&self) -> bool {
        AskBody::is_valid(self)
    }
}

impl Validate for DocsGetBody {
    fn is_valid(&self) -> bool {
        true
    }
}

pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!("Failed to read body: {}", e);
            ApiError::InvalidBody
        })?;

        let value: T = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!("Body does not match schema: {}", e);
            ApiError::InvalidBody
        })?;

        if value.is_valid() {
            Ok(ValidJson(value))
        } else {
            Err(ApiError::InvalidBody)
        }
    }
}
