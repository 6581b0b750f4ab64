//! Generative backend trait definition.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::error::ProviderError;

/// Stream of incremental generation chunks.
pub type GenerationStream =
    Pin<Box<dyn Stream<Item = Result<GenerationChunk, ProviderError>> + Send>>;

/// Upstream-reported cause for stream termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    /// Normal stop.
    Stop,
    /// Output hit the length limit. Still counts as a complete response.
    MaxTokens,
    /// Anything else (safety block, recitation, ...).
    Other(String),
}

impl FinishReason {
    /// Parse the reason string reported by the provider.
    pub fn parse(reason: &str) -> Self {
        match reason {
            "STOP" => Self::Stop,
            "MAX_TOKENS" => Self::MaxTokens,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether this reason counts as a successful completion.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Stop | Self::MaxTokens)
    }
}

impl std::fmt::Display for FinishReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stop => write!(f, "STOP"),
            Self::MaxTokens => write!(f, "MAX_TOKENS"),
            Self::Other(reason) => write!(f, "{}", reason),
        }
    }
}

/// One incremental piece of a streaming generation.
#[derive(Debug, Clone, Default)]
pub struct GenerationChunk {
    /// New text produced since the previous chunk.
    pub delta: Option<String>,
    /// Present on the final chunk of the stream.
    pub finish_reason: Option<FinishReason>,
}

/// An opaque generative model capability.
///
/// The rest of the system only ever needs a full generation or a token
/// stream for a single rendered prompt.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Returns the backend ID.
    fn id(&self) -> &str;

    /// Generate the full response text for a prompt.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Generate a response as an incremental token stream.
    async fn generate_stream(&self, prompt: &str) -> Result<GenerationStream, ProviderError>;
}

#[cfg(test)]
#[path = "generate_tests.rs"]
mod tests;
