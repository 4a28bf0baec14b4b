//! HTTP client for the Xata REST API.
//!
//! Only the three table endpoints the relay needs are wrapped: `ask`
//! (streamed as server-sent events), `query` and `aggregate`.

use async_trait::async_trait;
use futures::future;
use futures::stream::StreamExt;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

use super::{AnswerStream, AskProvider, ProviderError};
use crate::models::{DocRecord, ProviderMessage, ProviderOptions};
use crate::sse;

/// Branch used when none is configured.
pub const DEFAULT_BRANCH: &str = "main";

/// Largest page the query endpoint accepts.
const MAX_PAGE_SIZE: usize = 200;

const RECORD_COLUMNS: [&str; 4] = ["id", "title", "url", "website"];

/// Client for a single Xata database.
#[derive(Debug, Clone)]
pub struct XataClient {
    database_url: String,
    branch: String,
    api_key: Option<String>,
    client: Client,
}

#[derive(Serialize)]
struct AskPayload<'a> {
    question: &'a str,
    #[serde(flatten)]
    options: &'a ProviderOptions,
}

#[derive(Deserialize)]
struct QueryResponse {
    records: Vec<DocRecord>,
}

#[derive(Deserialize)]
struct AggregateResponse {
    aggs: TotalAgg,
}

#[derive(Deserialize)]
struct TotalAgg {
    total: u64,
}

impl XataClient {
    pub fn new(
        database_url: impl Into<String>,
        branch: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            database_url: database_url.into(),
            branch: branch.into(),
            api_key,
            client: Client::new(),
        }
    }

    fn table_url(&self, table: &str, operation: &str) -> String {
        format!(
            "{}:{}/tables/{}/{}",
            self.database_url.trim_end_matches('/'),
            self.branch,
            table,
            operation
        )
    }

    /// Build a POST request with optional auth header.
    fn request(&self, table: &str, operation: &str) -> reqwest::RequestBuilder {
        let mut req = self.client.post(self.table_url(table, operation));
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }
        req
    }

    /// Turn non-2xx responses into [`ProviderError::Status`].
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ProviderError::Status { status, body })
        }
    }
}

/// Decode the `ask` event stream into answer messages.
fn answer_stream(response: reqwest::Response) -> AnswerStream {
    sse::events(response.bytes_stream())
        .filter_map(|event| {
            future::ready(match event {
                Ok(event) => match ProviderMessage::parse(&event.data) {
                    Ok(message) => Some(Ok(message)),
                    Err(e) => {
                        tracing::warn!("Skipping undecodable provider event: {}", e);
                        None
                    }
                },
                Err(e) => {
                    tracing::error!("Provider stream error: {}", e);
                    Some(Err(ProviderError::from(e)))
                }
            })
        })
        .boxed()
}

#[async_trait]
impl AskProvider for XataClient {
    async fn ask(
        &self,
        table: &str,
        question: &str,
        options: &ProviderOptions,
    ) -> Result<AnswerStream, ProviderError> {
        tracing::debug!(table, rules = options.rules.len(), "Sending ask request");

        let response = self
            .request(table, "ask")
            .header(header::ACCEPT, "text/event-stream")
            .json(&AskPayload { question, options })
            .send()
            .await?;
        let response = Self::check(response).await?;

        Ok(answer_stream(response))
    }

    async fn get_records(
        &self,
        table: &str,
        ids: &[String],
    ) -> Result<Vec<DocRecord>, ProviderError> {
        let mut unique: Vec<&String> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }

        let mut records = Vec::with_capacity(unique.len());
        for page in unique.chunks(MAX_PAGE_SIZE) {
            let any: Vec<_> = page.iter().map(|id| serde_json::json!({ "id": id })).collect();
            let response = self
                .request(table, "query")
                .json(&serde_json::json!({
                    "filter": { "$any": any },
                    "columns": RECORD_COLUMNS,
                    "page": { "size": page.len() }
                }))
                .send()
                .await?;
            let response = Self::check(response).await?;

            let body: QueryResponse = serde_json::from_slice(&response.bytes().await?)?;
            records.extend(body.records);
        }
        if unique.len() > MAX_PAGE_SIZE {
            tracing::debug!(table, ids = unique.len(), "Fetched records in several pages");
        }
        Ok(records)
    }

    async fn count_records(&self, table: &str) -> Result<u64, ProviderError> {
        let response = self
            .request(table, "aggregate")
            .json(&serde_json::json!({ "aggs": { "total": { "count": "*" } } }))
            .send()
            .await?;
        let response = Self::check(response).await?;

        let body: AggregateResponse = serde_json::from_slice(&response.bytes().await?)?;
        Ok(body.aggs.total)
    }
}
