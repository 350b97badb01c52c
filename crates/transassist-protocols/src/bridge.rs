//! Messaging between the content-side controller and the background service.
//!
//! The wire shape is the one the extension pages exchange:
//! `{"action": "translate", "sourceText": ...}` answered by
//! `{"translation": ...}` or `{"error": ...}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, TranslateError};

/// Request sent to the background service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum BridgeRequest {
    #[serde(rename_all = "camelCase")]
    Translate { source_text: String },
    CheckSiteSupport { hostname: String },
    GetSettings,
}

/// Non-secret view of the API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSummary {
    pub api_provider: String,
    pub api_url: String,
    pub model: String,
    pub custom_model: String,
    pub api_key_configured: bool,
}

/// Response from the background service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BridgeResponse {
    Translation {
        translation: String,
    },
    Supported {
        supported: bool,
    },
    Error {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        kind: Option<ErrorKind>,
    },
    Settings(SettingsSummary),
}

impl BridgeResponse {
    pub fn error(err: &TranslateError) -> Self {
        Self::Error {
            error: err.to_string(),
            kind: Some(err.kind()),
        }
    }

    /// Interpret a response to a `translate` request.
    pub fn into_translation(self) -> Result<String, TranslateError> {
        match self {
            Self::Translation { translation } => Ok(translation),
            Self::Error { error, kind } => Err(TranslateError::from_remote(error, kind)),
            other => Err(TranslateError::Bridge(format!(
                "unexpected response to translate: {other:?}"
            ))),
        }
    }
}

/// Content-side handle on the background service.
///
/// At most one call per target input is in flight at a time; the caller
/// enforces that, implementations need not.
#[async_trait]
pub trait TranslationBridge: Send + Sync {
    /// Translate a source string with the user's current settings.
    async fn translate(&self, source_text: &str) -> Result<String, TranslateError>;

    /// Whether the registry knows a non-default config for `hostname`.
    async fn check_site_support(&self, hostname: &str) -> bool;
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;
