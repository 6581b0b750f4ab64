//! Server-Sent-Events consumption of the relay's search stream.
//!
//! The decoder is a plain byte-fed state machine so it can be tested
//! without a socket; [`SseClient`] wires it to a reqwest byte stream.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use tracing::{debug, warn};

use sidebase_protocols::error::ClientError;
use sidebase_protocols::events::{StreamEvent, TokenPayload, END_EVENT, ERROR_EVENT};

use crate::sidebar::{EventStream, TokenStreamSource};

/// Incremental SSE frame decoder.
///
/// Feed it raw bytes as they arrive; it returns the events completed by
/// each feed. Partial frames stay buffered until their terminating blank
/// line shows up.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: String,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a chunk of bytes, returning any events it completed.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<StreamEvent> {
        self.buffer.push_str(&String::from_utf8_lossy(bytes));

        let mut events = Vec::new();
        while let Some(boundary) = self.buffer.find("\n\n") {
            let frame = self.buffer[..boundary].to_string();
            self.buffer.drain(..boundary + 2);
            if let Some(event) = parse_frame(&frame) {
                events.push(event);
            }
        }
        events
    }
}

fn parse_frame(frame: &str) -> Option<StreamEvent> {
    let mut name: Option<&str> = None;
    let mut data = String::new();

    for line in frame.lines() {
        if let Some(value) = line.strip_prefix("event:") {
            name = Some(value.trim());
        } else if let Some(value) = line.strip_prefix("data:") {
            if !data.is_empty() {
                data.push('\n');
            }
            data.push_str(value.strip_prefix(' ').unwrap_or(value));
        }
    }

    match name {
        None | Some("message") => {
            // Unparseable token frames are dropped rather than aborting the
            // whole stream.
            match serde_json::from_str::<TokenPayload>(&data) {
                Ok(payload) => Some(StreamEvent::Token(payload.token)),
                Err(e) => {
                    warn!("dropping malformed token frame: {}", e);
                    None
                }
            }
        }
        Some(END_EVENT) => Some(StreamEvent::End),
        Some(ERROR_EVENT) => {
            let message = serde_json::from_str::<serde_json::Value>(&data)
                .ok()
                .and_then(|body| body["error"].as_str().map(|m| m.to_string()));
            Some(StreamEvent::Error(message))
        }
        Some(other) => {
            debug!("ignoring unknown event type: {}", other);
            None
        }
    }
}

/// HTTP stream source talking to the relay's search endpoint.
pub struct SseClient {
    client: Client,
    base_url: String,
}

impl SseClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TokenStreamSource for SseClient {
    async fn open(&self, keyword: &str) -> Result<EventStream, ClientError> {
        let url = format!("{}/api/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", keyword)])
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body["error"].as_str().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("The server responded with status {}", status));
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!("search stream opened");
        let mut bytes = response.bytes_stream();
        let stream = async_stream::stream! {
            let mut decoder = SseDecoder::new();
            while let Some(chunk) = bytes.next().await {
                match chunk {
                    Ok(chunk) => {
                        for event in decoder.feed(&chunk) {
                            let terminal = event.is_terminal();
                            yield event;
                            if terminal {
                                return;
                            }
                        }
                    }
                    Err(e) => {
                        yield StreamEvent::Error(Some(e.to_string()));
                        return;
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
#[path = "sse_tests.rs"]
mod tests;
