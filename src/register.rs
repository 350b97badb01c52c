//! Provider and service registration for TransAssist.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use transassist_background::{BackgroundService, ProviderFactory};
use transassist_config::{Config, ConfigLoader, JsonFileStore, Settings, SettingsStore};
use transassist_core::SiteRegistry;
use transassist_protocols::{CompletionProvider, TranslateError};
use transassist_provider_openai::OpenAIProvider;

/// Every preset speaks the chat-completions format, so one provider type
/// covers them all; only the URL differs.
pub(crate) struct OpenAIProviderFactory;

impl ProviderFactory for OpenAIProviderFactory {
    fn create(&self, settings: &Settings) -> Result<Arc<dyn CompletionProvider>, TranslateError> {
        let url = settings.effective_api_url();
        debug!("Using {} endpoint {}", settings.api_provider, url);
        Ok(Arc::new(OpenAIProvider::with_url(settings.api_key.clone(), url)))
    }
}

/// The settings file named by `[settings] path`.
pub(crate) fn settings_store(config: &Config) -> Arc<dyn SettingsStore> {
    let path = PathBuf::from(ConfigLoader::expand_path(&config.settings.path));
    Arc::new(JsonFileStore::new(path))
}

pub(crate) fn create_background_service(config: &Config, registry: Arc<SiteRegistry>) -> BackgroundService {
    BackgroundService::new(
        settings_store(config),
        registry,
        Arc::new(OpenAIProviderFactory),
    )
}
