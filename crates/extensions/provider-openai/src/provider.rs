//! OpenAI provider implementation.

use async_trait::async_trait;
use tracing::{debug, warn};

use transassist_protocols::{CompletionProvider, CompletionRequest, CompletionResponse, ProviderError};

use crate::api::{ApiRequest, ApiResponse};

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Chat-completions client for OpenAI and compatible endpoints.
pub struct OpenAIProvider {
    api_key: String,
    api_url: String,
    client: reqwest::Client,
}

impl OpenAIProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_url(api_key, DEFAULT_API_URL)
    }

    /// Create provider with custom API URL (for OpenAI-compatible APIs).
    pub fn with_url(api_key: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: api_url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn build_request<'a>(&self, request: &'a CompletionRequest) -> ApiRequest<'a> {
        ApiRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }

    async fn send_request(&self, api_request: &ApiRequest<'_>) -> Result<reqwest::Response, ProviderError> {
        if self.api_url.trim().is_empty() {
            return Err(ProviderError::InvalidRequest("API URL is empty".to_string()));
        }

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(api_request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Completion request failed with {}", status);
            debug!("Error body: {}", body);
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl CompletionProvider for OpenAIProvider {
    fn id(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        let api_request = self.build_request(&request);
        debug!("POST {} model={}", self.api_url, request.model);
        let response = self.send_request(&api_request).await?;

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        let api_response: ApiResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let content = api_response.first_content().ok_or_else(|| {
            ProviderError::InvalidResponse("missing choices[0].message.content".to_string())
        })?;

        Ok(CompletionResponse {
            model: api_response.model.clone().unwrap_or(request.model),
            content: content.trim().to_string(),
            finish_reason: api_response.finish_reason().map(str::to_string),
        })
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
