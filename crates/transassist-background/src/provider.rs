//! Completion provider construction.

use std::sync::Arc;

use transassist_config::Settings;
use transassist_protocols::{CompletionProvider, TranslateError};

/// Builds a provider for the settings in force at request time. Called
/// once per translation.
pub trait ProviderFactory: Send + Sync {
    fn create(&self, settings: &Settings) -> Result<Arc<dyn CompletionProvider>, TranslateError>;
}
