//! Configuration loader.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from `path`, or the defaults if there is no file.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => {
                tracing::debug!("No config at {}, using defaults", path.display());
                Ok(Config::default())
            }
            other => other,
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in ENV_VAR.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.transassist`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }

    /// The default config file location: `~/.transassist/config.toml`.
    pub fn default_path() -> std::path::PathBuf {
        dirs::home_dir()
            .unwrap_or_default()
            .join(".transassist")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ButtonPosition, SourceTextMethod};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.watcher.debounce_ms, 500);
        assert!(config.sites.is_empty());
    }

    #[test]
    fn test_load_basic_config() {
        let content = r#"
            [watcher]
            debounce_ms = 250

            [assistant]
            auto_translate_delay_ms = 50
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.watcher.debounce_ms, 250);
        assert_eq!(config.watcher.min_rescan_interval_ms, 1000);
        assert_eq!(config.assistant.auto_translate_delay_ms, 50);
    }

    #[test]
    fn test_load_user_site_and_alias() {
        let content = r##"
            [[sites]]
            host = "pontoon.mozilla.org"
            name = "Pontoon"

            [sites.selectors]
            translationTextarea = ["#translation"]
            sourceText = [".original"]
            formContainer = "#editor"

            [sites.textExtraction]
            sourceTextMethods = ["sourceElements"]

            [[aliases]]
            host = "weblate.example.org"
            target = "translations.documentfoundation.org"
            name = "Example Weblate"
        "##;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.sites.len(), 1);
        let site = &config.sites[0];
        assert_eq!(site.host, "pontoon.mozilla.org");
        assert_eq!(site.ui.button_position, ButtonPosition::After);
        assert_eq!(
            site.text_extraction.source_text_methods,
            vec![SourceTextMethod::SourceElements]
        );
        assert_eq!(config.aliases[0].target, "translations.documentfoundation.org");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[settings]").unwrap();
        writeln!(file, "path = \"/tmp/settings.json\"").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.settings.path, "/tmp/settings.json");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/config.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config =
            ConfigLoader::load_or_default(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config.watcher.min_rescan_interval_ms, 1000);
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_unknown_extraction_method_rejected() {
        let content = r#"
            [[sites]]
            host = "x.org"
            name = "X"
            [sites.selectors]
            translationTextarea = ["textarea"]
            sourceText = []
            formContainer = "form"
            [sites.textExtraction]
            sourceTextMethods = ["telepathy"]
        "#;
        assert!(ConfigLoader::load_str(content).is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test-only variable name, not read elsewhere
        unsafe {
            std::env::set_var("TRANSASSIST_TEST_SETTINGS_DIR", "/srv/ta");
        }
        let content = "path = \"${TRANSASSIST_TEST_SETTINGS_DIR}/settings.json\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, "path = \"/srv/ta/settings.json\"");
        unsafe {
            std::env::remove_var("TRANSASSIST_TEST_SETTINGS_DIR");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_TRANSASSIST_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_path() {
        assert_eq!(ConfigLoader::expand_path("/usr/local/bin"), "/usr/local/bin");
        let expanded = ConfigLoader::expand_path("~/test");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/test"));
    }

    #[test]
    fn test_default_path() {
        assert!(ConfigLoader::default_path().ends_with(".transassist/config.toml"));
    }
}
