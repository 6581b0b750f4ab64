//! Generative provider errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Quota exceeded: {0}")]
    RateLimited(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Stream error: {0}")]
    StreamError(String),
}

impl ProviderError {
    /// Classify an HTTP error response from the provider API.
    pub fn from_api_response(status: u16, message: String) -> Self {
        match status {
            400 => Self::InvalidRequest(message),
            401 | 403 => Self::AuthenticationFailed(message),
            429 => Self::RateLimited(message),
            _ => Self::ApiError { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_api_response_invalid_request() {
        let err = ProviderError::from_api_response(400, "bad body".to_string());
        assert!(matches!(err, ProviderError::InvalidRequest(_)));
    }

    #[test]
    fn test_from_api_response_auth() {
        let err = ProviderError::from_api_response(401, "no key".to_string());
        assert!(matches!(err, ProviderError::AuthenticationFailed(_)));
        let err = ProviderError::from_api_response(403, "forbidden".to_string());
        assert!(matches!(err, ProviderError::AuthenticationFailed(_)));
    }

    #[test]
    fn test_from_api_response_rate_limited() {
        let err = ProviderError::from_api_response(429, "quota".to_string());
        assert!(matches!(err, ProviderError::RateLimited(_)));
        assert!(err.to_string().contains("Quota exceeded"));
    }

    #[test]
    fn test_from_api_response_generic() {
        let err = ProviderError::from_api_response(500, "boom".to_string());
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_stream_error_display() {
        let err = ProviderError::StreamError("connection reset".to_string());
        assert!(err.to_string().contains("Stream error"));
    }
}
