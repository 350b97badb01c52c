//! Completion provider errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API request failed: {status} {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response format: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_api_error() {
        let err = ProviderError::ApiError {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("Internal Server Error"));
    }

    #[test]
    fn test_provider_error_network() {
        let err = ProviderError::Network("Connection refused".to_string());
        assert!(err.to_string().contains("Network error"));
    }

    #[test]
    fn test_provider_error_invalid_response() {
        let err = ProviderError::InvalidResponse("missing choices".to_string());
        assert!(err.to_string().contains("Invalid API response format"));
        assert!(err.to_string().contains("missing choices"));
    }

    #[test]
    fn test_provider_error_invalid_request() {
        let err = ProviderError::InvalidRequest("empty url".to_string());
        assert!(err.to_string().contains("Invalid request"));
    }

    #[test]
    fn test_provider_error_timeout() {
        let err = ProviderError::Timeout(30);
        assert!(err.to_string().contains("Timeout"));
        assert!(err.to_string().contains("30"));
    }
}
