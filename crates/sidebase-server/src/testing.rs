//! Stub generative backend for handler tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use sidebase_protocols::error::ProviderError;
use sidebase_protocols::generate::{
    FinishReason, GenerationChunk, GenerationStream, GenerativeBackend,
};

/// Scripted non-streaming outcome.
#[derive(Clone)]
pub(crate) enum StubResponse {
    Text(String),
    Quota,
    Network,
}

/// Scripted stream item.
#[derive(Clone)]
pub(crate) enum StubChunk {
    Delta(String),
    Finish(String),
    Error(String),
}

/// Backend stub that counts invocations and replays scripted output.
pub(crate) struct StubBackend {
    response: StubResponse,
    chunks: Vec<StubChunk>,
    fail_stream_open: bool,
    calls: AtomicUsize,
}

impl StubBackend {
    pub fn with_response(text: &str) -> Self {
        Self {
            response: StubResponse::Text(text.to_string()),
            chunks: Vec::new(),
            fail_stream_open: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_chunks(chunks: Vec<StubChunk>) -> Self {
        Self {
            response: StubResponse::Network,
            chunks,
            fail_stream_open: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(response: StubResponse) -> Self {
        Self {
            response,
            chunks: Vec::new(),
            fail_stream_open: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_stream_open() -> Self {
        Self {
            response: StubResponse::Network,
            chunks: Vec::new(),
            fail_stream_open: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Total backend invocations (generate + generate_stream).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeBackend for StubBackend {
    fn id(&self) -> &str {
        "stub"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            StubResponse::Text(text) => Ok(text.clone()),
            StubResponse::Quota => Err(ProviderError::RateLimited("quota".to_string())),
            StubResponse::Network => Err(ProviderError::Network("unreachable".to_string())),
        }
    }

    async fn generate_stream(&self, _prompt: &str) -> Result<GenerationStream, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_stream_open {
            return Err(ProviderError::Network("unreachable".to_string()));
        }
        let items: Vec<Result<GenerationChunk, ProviderError>> = self
            .chunks
            .iter()
            .cloned()
            .map(|chunk| match chunk {
                StubChunk::Delta(text) => Ok(GenerationChunk {
                    delta: Some(text),
                    finish_reason: None,
                }),
                StubChunk::Finish(reason) => Ok(GenerationChunk {
                    delta: None,
                    finish_reason: Some(FinishReason::parse(&reason)),
                }),
                StubChunk::Error(message) => Err(ProviderError::StreamError(message)),
            })
            .collect();
        Ok(Box::pin(futures::stream::iter(items)))
    }
}
