//! HTTP client for a running AskYourStack server.
//!
//! Configuration is via environment variables:
//! - `ASKYOURSTACK_URL` - Base URL (default: `http://127.0.0.1:3000`)

use futures::stream::{BoxStream, StreamExt};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{AskBody, DocRecord, DocsGetBody};
use crate::sse::{self, SseEvent};

/// Default URL for local development.
pub const DEFAULT_URL: &str = "http://127.0.0.1:3000";

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Too many requests")]
    RateLimited,

    #[error("Server error: {0}")]
    Server(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Raw events of one relayed answer.
pub type EventStream = BoxStream<'static, Result<SseEvent, ClientError>>;

#[derive(Debug, Clone)]
pub struct RelayClient {
    base_url: String,
    client: Client,
}

impl RelayClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("ASKYOURSTACK_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Convert error statuses to [`ClientError`], keeping the server's message.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or(body);
        match status {
            StatusCode::BAD_REQUEST | StatusCode::METHOD_NOT_ALLOWED => {
                Err(ClientError::BadRequest(message))
            }
            StatusCode::TOO_MANY_REQUESTS => Err(ClientError::RateLimited),
            _ => Err(ClientError::Server(format!("{}: {}", status, message))),
        }
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<T, ClientError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Ask a question; events arrive as the server relays them.
    ///
    /// The stream ends when the server closes it. A transport error means the
    /// answer failed part way.
    pub async fn ask(&self, body: &AskBody) -> Result<EventStream, ClientError> {
        let response = self
            .client
            .post(self.url("/ask"))
            .json(body)
            .send()
            .await?;
        let response = Self::check(response).await?;

        Ok(sse::events(response.bytes_stream())
            .map(|event| event.map_err(ClientError::from))
            .boxed())
    }

    pub async fn docs_get(
        &self,
        ids: &[String],
        database: Option<&str>,
    ) -> Result<Vec<DocRecord>, ClientError> {
        let body = DocsGetBody {
            ids: ids.to_vec(),
            database: database.map(str::to_string),
        };
        self.post_json("/docs-get", &body).await
    }

    /// Databases, documentation sections and directives the server offers.
    pub async fn catalog(&self) -> Result<serde_json::Value, ClientError> {
        let response = self.client.get(self.url("/catalog")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn health(&self) -> Result<serde_json::Value, ClientError> {
        let response = self.client.get(self.url("/health")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }
}
