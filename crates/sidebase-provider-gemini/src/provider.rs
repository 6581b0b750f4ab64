//! Gemini backend implementation.

use async_trait::async_trait;
use futures::StreamExt;
use tracing::debug;

use sidebase_protocols::error::ProviderError;
use sidebase_protocols::generate::{
    FinishReason, GenerationChunk, GenerationStream, GenerativeBackend,
};

use crate::client::GeminiClient;
use crate::types::*;
use crate::DEFAULT_MODEL;

/// Gemini generative backend.
pub struct GeminiProvider {
    client: GeminiClient,
    model: String,
}

impl GeminiProvider {
    /// Create a provider with the default model.
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL.to_string())
    }

    /// Create a provider for a specific model.
    pub fn with_model(api_key: String, model: String) -> Self {
        Self {
            client: GeminiClient::new(api_key),
            model,
        }
    }

    fn build_request(prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            generation_config: None,
        }
    }

    fn convert_chunk(chunk: StreamChunk) -> GenerationChunk {
        let mut converted = GenerationChunk::default();

        if let Some(candidates) = chunk.candidates {
            if let Some(candidate) = candidates.first() {
                let text = candidate.content.text();
                if !text.is_empty() {
                    converted.delta = Some(text);
                }
                if let Some(reason) = &candidate.finish_reason {
                    converted.finish_reason = Some(FinishReason::parse(reason));
                }
            }
        }

        converted
    }
}

#[async_trait]
impl GenerativeBackend for GeminiProvider {
    fn id(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        debug!("Gemini generate: model={}", self.model);

        let request = Self::build_request(prompt);
        let response = self.client.generate_content(&self.model, request).await?;

        let candidate = response
            .candidates
            .first()
            .ok_or_else(|| ProviderError::StreamError("response had no candidates".to_string()))?;

        Ok(candidate.content.text())
    }

    async fn generate_stream(&self, prompt: &str) -> Result<GenerationStream, ProviderError> {
        debug!("Gemini stream: model={}", self.model);

        let request = Self::build_request(prompt);
        let stream = self
            .client
            .generate_content_stream(&self.model, request)
            .await?;

        Ok(Box::pin(stream.map(|result| result.map(Self::convert_chunk))))
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
