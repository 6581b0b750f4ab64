//! Streaming relay endpoint.
//!
//! `GET /api/search?q=<keyword>` answers with Server-Sent Events: token
//! events while text is generated, then exactly one terminal event, either
//! `end` or `error`. Cached responses are replayed as a simulated token
//! stream so the consumer sees the same incremental contract either way.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use serde::Deserialize;
use tracing::{debug, error, info};

use sidebase_protocols::error::ServiceError;
use sidebase_protocols::events::{END_EVENT, ERROR_EVENT};
use sidebase_protocols::generate::FinishReason;

use crate::error::ApiError;
use crate::state::AppState;

/// Cache replay chunk size, in characters.
pub const REPLAY_CHUNK_CHARS: usize = 5;

/// Delay between replayed chunks, to simulate streaming.
pub const REPLAY_CHUNK_DELAY: Duration = Duration::from_millis(20);

/// Query parameters for the relay.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Split text into fixed-size character chunks (never inside a code point).
pub fn replay_chunks(text: &str, size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for ch in text.chars() {
        current.push(ch);
        count += 1;
        if count == size {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn token_event(token: &str) -> Event {
    // JSON escaping keeps the payload on a single SSE data line.
    Event::default().data(serde_json::json!({ "token": token }).to_string())
}

fn end_event(message: &str) -> Event {
    Event::default().event(END_EVENT).data(message.to_string())
}

fn error_event(err: &ServiceError) -> Event {
    Event::default()
        .event(ERROR_EVENT)
        .data(serde_json::json!({ "error": err.to_string() }).to_string())
}

/// `GET /api/search` handler.
pub async fn search_stream(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let keyword = match params.q {
        Some(q) if !q.is_empty() => q,
        _ => {
            return Err(
                ServiceError::InvalidRequest("Query parameter 'q' is required.".to_string()).into(),
            )
        }
    };

    info!("search stream requested: q={}", keyword);
    let cache_key = format!("search-stream:{}:{}", state.mode.as_str(), keyword);

    let stream = async_stream::stream! {
        // Cache hit: replay the full text as a simulated token stream.
        if let Some(cached) = state.response_cache.get(&cache_key) {
            debug!("relay cache hit: {}", cache_key);
            for chunk in replay_chunks(&cached, REPLAY_CHUNK_CHARS) {
                yield Ok::<_, Infallible>(token_event(&chunk));
                tokio::time::sleep(REPLAY_CHUNK_DELAY).await;
            }
            yield Ok(end_event("Stream ended from cache."));
            return;
        }

        let prompt = state.prompts.render_sidebar(state.mode, &keyword);
        let mut upstream = match state.backend.generate_stream(&prompt).await {
            Ok(stream) => stream,
            Err(e) => {
                error!("failed to open generation stream: {}", e);
                yield Ok(error_event(&e.into()));
                return;
            }
        };

        let mut full_text = String::new();
        let mut finish_reason: Option<FinishReason> = None;
        let mut failure: Option<ServiceError> = None;

        while let Some(item) = upstream.next().await {
            match item {
                Ok(chunk) => {
                    if let Some(delta) = chunk.delta {
                        full_text.push_str(&delta);
                        yield Ok(token_event(&delta));
                    }
                    if let Some(reason) = chunk.finish_reason {
                        finish_reason = Some(reason);
                    }
                }
                Err(e) => {
                    error!("error in search stream: {}", e);
                    failure = Some(e.into());
                    break;
                }
            }
        }

        // Exactly one terminal event, even after partial tokens were flushed.
        if let Some(err) = failure {
            yield Ok(error_event(&err));
            return;
        }

        // A missing finish reason counts as a normal stop.
        match finish_reason {
            Some(reason) if !reason.is_success() => {
                error!("stream aborted upstream: {}", reason);
                yield Ok(error_event(&ServiceError::StreamAborted(reason.to_string())));
            }
            _ => {
                state.response_cache.insert(cache_key, full_text);
                yield Ok(end_event("Stream ended successfully."));
            }
        }
    };

    Ok(Sse::new(stream).into_response())
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
