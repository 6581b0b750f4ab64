//! Wire types for the relay's Server-Sent-Events stream.
//!
//! The relay emits three kinds of SSE events:
//! - default event with `data: {"token": "<chunk>"}`
//! - named `end` event when the stream completed normally
//! - named `error` event with `data: {"error": "<message>"}`

use serde::{Deserialize, Serialize};

/// SSE event name for normal stream completion.
pub const END_EVENT: &str = "end";

/// SSE event name for a terminal stream error.
pub const ERROR_EVENT: &str = "error";

/// Payload of a default (token) event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPayload {
    pub token: String,
}

/// Payload of a named `error` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

/// A decoded event on the relay token stream, as seen by the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// One incremental chunk of generated text.
    Token(String),
    /// The stream completed normally.
    End,
    /// The stream failed. `None` when the error payload was unparseable.
    Error(Option<String>),
}

impl StreamEvent {
    /// Whether this event terminates the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::End | Self::Error(_))
    }
}
