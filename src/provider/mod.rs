//! The hosted search/answer provider.
//!
//! Handlers only see [`AskProvider`], so tests can swap the HTTP client for
//! an in-memory fake.

mod xata;

use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

use crate::models::{DocRecord, ProviderMessage, ProviderOptions};

pub use xata::{XataClient, DEFAULT_BRANCH};

/// Provider errors.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Messages of one answer, in provider order.
pub type AnswerStream = BoxStream<'static, Result<ProviderMessage, ProviderError>>;

/// A document search and question answering backend.
#[async_trait]
pub trait AskProvider: Send + Sync {
    /// Ask a question against `table`, streaming the answer.
    ///
    /// Dropping the returned stream abandons the upstream request.
    async fn ask(
        &self,
        table: &str,
        question: &str,
        options: &ProviderOptions,
    ) -> Result<AnswerStream, ProviderError>;

    /// Fetch the pages with the given ids.
    async fn get_records(&self, table: &str, ids: &[String])
        -> Result<Vec<DocRecord>, ProviderError>;

    /// Number of indexed pages in `table`.
    async fn count_records(&self, table: &str) -> Result<u64, ProviderError>;
}
