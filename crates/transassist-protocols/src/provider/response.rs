//! Completion response types.

use serde::{Deserialize, Serialize};

/// Response from a completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Model that produced the completion.
    pub model: String,

    /// Completion text, already trimmed.
    pub content: String,

    /// Why generation stopped, if the API reported it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl CompletionResponse {
    pub fn new(model: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            content: content.into(),
            finish_reason: None,
        }
    }
}
