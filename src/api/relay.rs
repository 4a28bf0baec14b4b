//! The streaming relay: provider answer stream in, SSE frames out.

use std::sync::Arc;

use axum::{
    body::Body,
    http::header,
    response::{IntoResponse, Response},
};
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use uuid::Uuid;

use crate::models::ProviderOptions;
use crate::provider::{AskProvider, ProviderError};
use crate::sse;

/// One question to relay.
pub struct RelayRequest {
    pub id: Uuid,
    pub table: &'static str,
    pub question: String,
    pub options: ProviderOptions,
}

/// Stream of encoded SSE frames for one question.
///
/// The provider is only contacted once the stream is first polled, and every
/// provider failure ends the stream with an error so the response body aborts.
/// Every message is framed with its payload untouched, references included;
/// recognizing the end of an answer is up to the client.
pub fn frames(
    provider: Arc<dyn AskProvider>,
    request: RelayRequest,
) -> impl Stream<Item = Result<String, ProviderError>> + Send + 'static {
    let RelayRequest {
        id,
        table,
        question,
        options,
    } = request;

    stream::once(async move { provider.ask(table, &question, &options).await })
        .try_flatten()
        .map(move |item| match item {
            Ok(message) => {
                if message.is_terminal() {
                    tracing::info!(request_id = %id, "Relayed references");
                }
                Ok(sse::frame(message.payload()))
            }
            Err(e) => {
                tracing::error!(request_id = %id, "Answer stream aborted: {}", e);
                Err(e)
            }
        })
}

/// Wrap a frame stream in an event-stream response.
pub fn into_response<S>(frames: S) -> Response
where
    S: Stream<Item = Result<String, ProviderError>> + Send + 'static,
{
    (
        [
            (header::CONTENT_TYPE, sse::CONTENT_TYPE),
            (header::CONNECTION, "keep-alive"),
            (header::CACHE_CONTROL, "no-cache, no-transform"),
        ],
        Body::from_stream(frames),
    )
        .into_response()
}
