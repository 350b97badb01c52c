//! Errors surfaced to the user when a translation request fails.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ProviderError;

/// Message the background service uses for a missing API key.
///
/// Older bridges only send the message text, so the content side also
/// recognises a configuration failure by this string.
pub const MISSING_API_KEY_MESSAGE: &str = "API key not configured";

/// Coarse failure classes, each handled differently by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// Missing API key: point the user at the settings page, never retry.
    Configuration,
    /// Network failure or non-2xx response.
    Transport,
    /// Response body without the expected completion field.
    Protocol,
    /// No source text found; never reaches the network.
    Extraction,
}

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("API request failed: {status} {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response format: {0}")]
    InvalidResponse(String),

    #[error("No source text found")]
    NoSourceText,

    #[error("Bridge error: {0}")]
    Bridge(String),
}

impl TranslateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingApiKey => ErrorKind::Configuration,
            Self::Http { .. } | Self::Network(_) | Self::Bridge(_) => ErrorKind::Transport,
            Self::InvalidResponse(_) => ErrorKind::Protocol,
            Self::NoSourceText => ErrorKind::Extraction,
        }
    }

    /// Rebuild a typed error from what came back over the messaging bridge.
    pub fn from_remote(message: String, kind: Option<ErrorKind>) -> Self {
        match kind {
            Some(ErrorKind::Configuration) => Self::MissingApiKey,
            Some(ErrorKind::Protocol) => Self::InvalidResponse(message),
            Some(ErrorKind::Extraction) => Self::NoSourceText,
            Some(ErrorKind::Transport) => Self::Bridge(message),
            None if message.contains(MISSING_API_KEY_MESSAGE) => Self::MissingApiKey,
            None => Self::Bridge(message),
        }
    }
}

impl From<ProviderError> for TranslateError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::ApiError { status, message } => Self::Http { status, message },
            ProviderError::InvalidResponse(msg) => Self::InvalidResponse(msg),
            ProviderError::Network(msg) | ProviderError::InvalidRequest(msg) => Self::Network(msg),
            ProviderError::Timeout(secs) => Self::Network(format!("timeout after {secs}s")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_taxonomy() {
        assert_eq!(TranslateError::MissingApiKey.kind(), ErrorKind::Configuration);
        assert_eq!(
            TranslateError::Http { status: 401, message: "Unauthorized".into() }.kind(),
            ErrorKind::Transport
        );
        assert_eq!(TranslateError::Network("down".into()).kind(), ErrorKind::Transport);
        assert_eq!(TranslateError::InvalidResponse("x".into()).kind(), ErrorKind::Protocol);
        assert_eq!(TranslateError::NoSourceText.kind(), ErrorKind::Extraction);
    }

    #[test]
    fn test_missing_key_message_matches_constant() {
        assert_eq!(TranslateError::MissingApiKey.to_string(), MISSING_API_KEY_MESSAGE);
    }

    #[test]
    fn test_from_remote_with_kind() {
        let err = TranslateError::from_remote("whatever".into(), Some(ErrorKind::Configuration));
        assert!(matches!(err, TranslateError::MissingApiKey));

        let err = TranslateError::from_remote("bad body".into(), Some(ErrorKind::Protocol));
        assert!(matches!(err, TranslateError::InvalidResponse(_)));
    }

    #[test]
    fn test_from_remote_without_kind_sniffs_message() {
        let err = TranslateError::from_remote("API key not configured".into(), None);
        assert!(matches!(err, TranslateError::MissingApiKey));

        let err = TranslateError::from_remote("boom".into(), None);
        assert!(matches!(err, TranslateError::Bridge(ref m) if m == "boom"));
    }

    #[test]
    fn test_from_provider_error() {
        let err: TranslateError = ProviderError::ApiError {
            status: 429,
            message: "Too Many Requests".into(),
        }
        .into();
        assert!(matches!(err, TranslateError::Http { status: 429, .. }));
        assert!(err.to_string().contains("429"));

        let err: TranslateError = ProviderError::InvalidResponse("no choices".into()).into();
        assert_eq!(err.kind(), ErrorKind::Protocol);
    }
}
