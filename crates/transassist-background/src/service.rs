//! Background message handling.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use transassist_config::{ConfigError, Settings, SettingsStore};
use transassist_core::SiteRegistry;
use transassist_protocols::bridge::SettingsSummary;
use transassist_protocols::{BridgeRequest, BridgeResponse, TranslateError, TranslationBridge};

use crate::prompt;
use crate::provider::ProviderFactory;

/// Holds the settings store, the site registry and the provider factory.
/// Every request reads settings afresh; nothing is cached between calls.
pub struct BackgroundService {
    store: Arc<dyn SettingsStore>,
    registry: Arc<SiteRegistry>,
    providers: Arc<dyn ProviderFactory>,
}

impl BackgroundService {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        registry: Arc<SiteRegistry>,
        providers: Arc<dyn ProviderFactory>,
    ) -> Self {
        Self {
            store,
            registry,
            providers,
        }
    }

    pub fn registry(&self) -> &SiteRegistry {
        &self.registry
    }

    pub async fn settings(&self) -> Result<Settings, ConfigError> {
        self.store.load().await
    }

    /// Answer one message from the content side.
    pub async fn handle(&self, request: BridgeRequest) -> BridgeResponse {
        match request {
            BridgeRequest::Translate { source_text } => match self.translate_text(&source_text).await {
                Ok(translation) => BridgeResponse::Translation { translation },
                Err(e) => BridgeResponse::error(&e),
            },
            BridgeRequest::CheckSiteSupport { hostname } => BridgeResponse::Supported {
                supported: self.is_site_supported(&hostname),
            },
            BridgeRequest::GetSettings => match self.settings_summary().await {
                Ok(summary) => BridgeResponse::Settings(summary),
                Err(e) => BridgeResponse::error(&TranslateError::Bridge(e.to_string())),
            },
        }
    }

    /// Translate with the current settings: key check, prompt, completion.
    pub async fn translate_text(&self, source_text: &str) -> Result<String, TranslateError> {
        if source_text.trim().is_empty() {
            return Err(TranslateError::NoSourceText);
        }
        let settings = self
            .store
            .load()
            .await
            .map_err(|e| TranslateError::Bridge(e.to_string()))?;
        if !settings.has_api_key() {
            warn!("Translation requested without an API key");
            return Err(TranslateError::MissingApiKey);
        }

        let provider = self.providers.create(&settings)?;
        let request = prompt::build_request(&settings, source_text);
        debug!(
            "Translating {} chars with {} ({})",
            source_text.chars().count(),
            request.model,
            provider.id()
        );
        let response = provider.complete(request).await?;
        Ok(response.content)
    }

    pub fn is_site_supported(&self, hostname: &str) -> bool {
        self.registry.is_supported(hostname)
    }

    /// API settings without the key itself.
    pub async fn settings_summary(&self) -> Result<SettingsSummary, ConfigError> {
        let settings = self.store.load().await?;
        Ok(SettingsSummary {
            api_provider: settings.api_provider.as_str().to_string(),
            api_url: settings.effective_api_url().to_string(),
            model: settings.model.clone(),
            custom_model: settings.custom_model.clone(),
            api_key_configured: settings.has_api_key(),
        })
    }

    /// Whether a page on `hostname` gets the assistant: a registered site,
    /// or one the user force-enabled.
    pub async fn should_inject(&self, hostname: &str) -> bool {
        if self.is_site_supported(hostname) {
            return true;
        }
        match self.store.load().await {
            Ok(settings) => settings.is_force_enabled(hostname),
            Err(e) => {
                warn!("Failed to load settings for {}: {}", hostname, e);
                false
            }
        }
    }

    /// Add or remove `hostname` from the force-enabled list and persist it.
    /// Returns whether the list changed.
    pub async fn set_force_enabled(&self, hostname: &str, enabled: bool) -> Result<bool, ConfigError> {
        let hostname = hostname.trim();
        if hostname.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "forceEnabledSites".to_string(),
                message: "hostname is empty".to_string(),
            });
        }
        let mut settings = self.store.load().await?;
        if !settings.set_force_enabled(hostname, enabled) {
            return Ok(false);
        }
        self.store.save(&settings).await?;
        info!(
            "{} {}",
            if enabled { "Force-enabled" } else { "Removed force-enable for" },
            hostname
        );
        Ok(true)
    }
}

#[async_trait]
impl TranslationBridge for BackgroundService {
    async fn translate(&self, source_text: &str) -> Result<String, TranslateError> {
        self.translate_text(source_text).await
    }

    async fn check_site_support(&self, hostname: &str) -> bool {
        self.is_site_supported(hostname)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
