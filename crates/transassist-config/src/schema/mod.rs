//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

mod site;

pub use site::*;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub settings: SettingsConfig,

    #[serde(default)]
    pub watcher: WatcherConfig,

    #[serde(default)]
    pub assistant: AssistantConfig,

    #[serde(default)]
    pub ui: UiStrings,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Extra or overriding site profiles, in match order.
    #[serde(default)]
    pub sites: Vec<SiteSpec>,

    #[serde(default)]
    pub aliases: Vec<AliasSpec>,
}

impl Config {
    /// The built-in catalog with this config's sites and aliases merged in.
    pub fn site_catalog(&self) -> Result<SiteCatalog, ConfigError> {
        let mut catalog = SiteCatalog::builtin()?;
        catalog.merge(self.sites.iter().cloned(), self.aliases.iter().cloned());
        Ok(catalog)
    }
}

/// Where user settings are persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    #[serde(default = "default_settings_path")]
    pub path: String,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            path: default_settings_path(),
        }
    }
}

fn default_settings_path() -> String {
    "~/.transassist/settings.json".to_string()
}

/// Mutation watcher timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// Quiet period after the last relevant mutation before a rescan.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Minimum spacing between two rescans.
    #[serde(default = "default_min_rescan_interval_ms")]
    pub min_rescan_interval_ms: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_rescan_interval_ms: default_min_rescan_interval_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_min_rescan_interval_ms() -> u64 {
    1000
}

/// Page controller behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Delay between discovering a target and clicking its translate
    /// button when auto-translate is on.
    #[serde(default = "default_auto_translate_delay_ms")]
    pub auto_translate_delay_ms: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            auto_translate_delay_ms: default_auto_translate_delay_ms(),
        }
    }
}

fn default_auto_translate_delay_ms() -> u64 {
    100
}

/// User-visible strings of the injected controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiStrings {
    pub translate_button: String,
    pub translating: String,
    pub original_label: String,
    pub apply_button: String,
    pub no_source_text: String,
    pub configure_api: String,
    /// Prefix of the alert shown for any other failure.
    pub translation_error: String,
}

impl Default for UiStrings {
    fn default() -> Self {
        Self {
            translate_button: "AI Translate".to_string(),
            translating: "Translating...".to_string(),
            original_label: "Original:".to_string(),
            apply_button: "Apply".to_string(),
            no_source_text: "No source text found".to_string(),
            configure_api: "Please configure API settings first".to_string(),
            translation_error: "Translation error: ".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for the daily rolling log file.
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: default_log_dir(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "~/.transassist/logs".to_string()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
