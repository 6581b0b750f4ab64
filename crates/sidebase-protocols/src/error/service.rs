//! Relay service errors.
//!
//! These are the failures the HTTP layer reports to clients, either as a
//! JSON error response (extraction) or as a named `error` SSE event (relay).

use thiserror::Error;

use super::ProviderError;

/// Message returned when the upstream provider reports quota exhaustion.
/// Kept distinct so the UI can tell the user something actionable.
pub const QUOTA_MESSAGE: &str =
    "You have exceeded your API quota. Please check your plan and billing details.";

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or malformed request input.
    #[error("{0}")]
    InvalidRequest(String),

    /// Model output did not contain valid JSON per the contract.
    #[error("Failed to parse model output: {0}")]
    ParseError(String),

    /// Rate or billing limit reported by the model provider.
    #[error("{0}")]
    QuotaExceeded(String),

    /// Any other upstream generation failure.
    #[error("Failed to process request with the generative model: {0}")]
    GenerationFailed(String),

    /// Stream finished with a reason other than normal stop or length limit.
    #[error("The stream ended unexpectedly due to: {0}")]
    StreamAborted(String),

    /// A prompt template could not be loaded.
    #[error("Failed to load prompt template: {0}")]
    Template(String),
}

impl From<ProviderError> for ServiceError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::RateLimited(_) => Self::QuotaExceeded(QUOTA_MESSAGE.to_string()),
            other => Self::GenerationFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_maps_to_quota() {
        let err: ServiceError = ProviderError::RateLimited("429".to_string()).into();
        assert!(matches!(err, ServiceError::QuotaExceeded(_)));
        assert!(err.to_string().contains("billing"));
    }

    #[test]
    fn test_other_provider_errors_map_to_generation_failed() {
        let err: ServiceError = ProviderError::Network("refused".to_string()).into();
        assert!(matches!(err, ServiceError::GenerationFailed(_)));
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn test_stream_aborted_display() {
        let err = ServiceError::StreamAborted("SAFETY".to_string());
        assert!(err.to_string().contains("ended unexpectedly"));
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_invalid_request_display_is_bare_message() {
        let err = ServiceError::InvalidRequest("Text content is required.".to_string());
        assert_eq!(err.to_string(), "Text content is required.");
    }
}
