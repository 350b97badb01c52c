//! Settings storage backends.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::ConfigError;
use crate::settings::Settings;

/// Where user settings live.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Current settings. Nothing stored yet yields the defaults.
    async fn load(&self) -> Result<Settings, ConfigError>;

    async fn save(&self, settings: &Settings) -> Result<(), ConfigError>;
}

/// Settings in a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsStore for JsonFileStore {
    async fn load(&self) -> Result<Settings, ConfigError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", self.path.display());
                Ok(Settings::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(settings)?;
        tokio::fs::write(&self.path, content).await?;
        debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

/// Settings held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    settings: RwLock<Settings>,
}

impl MemoryStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn load(&self) -> Result<Settings, ConfigError> {
        Ok(self.settings.read().clone())
    }

    async fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        *self.settings.write() = settings.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_store_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("settings.json"));
        assert_eq!(store.load().await.unwrap(), Settings::default());
    }

    #[tokio::test]
    async fn test_file_store_round_trip_creates_parent() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("settings.json"));
        let mut settings = Settings::default();
        settings.api_key = "sk-test".to_string();
        settings.set_force_enabled("example.org", true);

        store.save(&settings).await.unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn test_file_store_reads_extension_export() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"apiKey":"sk-1","glossary":[{"source":"cell","target":"Zelle"}],"autoTranslate":true}"#,
        )
        .unwrap();

        let settings = JsonFileStore::new(&path).load().await.unwrap();
        assert_eq!(settings.glossary[0].target, "Zelle");
        assert!(settings.auto_translate);
        assert_eq!(settings.model, "gpt-3.5-turbo");
    }

    #[tokio::test]
    async fn test_file_store_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        let result = JsonFileStore::new(&path).load().await;
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryStore::default();
        let mut settings = store.load().await.unwrap();
        settings.target_lang = "fr".to_string();
        store.save(&settings).await.unwrap();
        assert_eq!(store.load().await.unwrap().target_lang, "fr");
    }
}
