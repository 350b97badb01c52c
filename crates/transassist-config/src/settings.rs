//! Persisted user settings.
//!
//! Keys are camelCase so a settings file exported from the browser
//! extension's synced storage loads unchanged. Missing keys take their
//! defaults.

use serde::{Deserialize, Serialize};

/// User settings read by the translation path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub api_provider: ApiProvider,
    /// Chat-completions endpoint. Empty means the provider preset URL.
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    /// Takes precedence over `model` when non-empty.
    pub custom_model: String,
    pub source_lang: String,
    pub target_lang: String,
    pub prompts: Vec<PromptTemplate>,
    pub active_prompt_id: String,
    pub glossary: Vec<GlossaryEntry>,
    pub auto_translate: bool,
    /// Hostnames the user enabled injection for although no site profile
    /// supports them.
    pub force_enabled_sites: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_provider: ApiProvider::OpenAi,
            api_url: String::new(),
            api_key: String::new(),
            model: "gpt-3.5-turbo".to_string(),
            custom_model: String::new(),
            source_lang: "auto".to_string(),
            target_lang: "zh-CN".to_string(),
            prompts: default_prompts(),
            active_prompt_id: "default".to_string(),
            glossary: Vec::new(),
            auto_translate: false,
            force_enabled_sites: Vec::new(),
        }
    }
}

impl Settings {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// The model to request: `customModel` if set, else `model`.
    pub fn effective_model(&self) -> &str {
        if self.custom_model.trim().is_empty() {
            &self.model
        } else {
            &self.custom_model
        }
    }

    /// The endpoint to call: `apiUrl` if set, else the provider preset.
    pub fn effective_api_url(&self) -> &str {
        if !self.api_url.trim().is_empty() {
            return &self.api_url;
        }
        self.api_provider.preset().map(|p| p.url).unwrap_or_default()
    }

    /// The template selected by `activePromptId`, else the first one
    /// flagged active.
    pub fn active_prompt(&self) -> Option<&PromptTemplate> {
        self.prompts
            .iter()
            .find(|p| p.id == self.active_prompt_id)
            .or_else(|| self.prompts.iter().find(|p| p.active))
    }

    pub fn is_force_enabled(&self, hostname: &str) -> bool {
        self.force_enabled_sites.iter().any(|h| h == hostname)
    }

    /// Add or remove `hostname` from the force-enabled list. Returns whether
    /// the list changed.
    pub fn set_force_enabled(&mut self, hostname: &str, enabled: bool) -> bool {
        let present = self.is_force_enabled(hostname);
        match (enabled, present) {
            (true, false) => {
                self.force_enabled_sites.push(hostname.to_string());
                true
            }
            (false, true) => {
                self.force_enabled_sites.retain(|h| h != hostname);
                true
            }
            _ => false,
        }
    }
}

/// A prompt template. `{source_lang}`, `{dest_lang}` and `{glossary_list}`
/// are substituted before the source text is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub id: String,
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub source: String,
    pub target: String,
}

/// The built-in templates.
pub fn default_prompts() -> Vec<PromptTemplate> {
    let template = |id: &str, name: &str, content: &str, active: bool| PromptTemplate {
        id: id.to_string(),
        name: name.to_string(),
        content: content.to_string(),
        active,
    };
    vec![
        template(
            "default",
            "Default",
            "Please translate the following {source_lang} text into {dest_lang}, maintaining the \
             tone and style of the original text. If there are any specialized terms, please refer \
             to the glossary: {glossary_list}\n\nOriginal text:",
            true,
        ),
        template(
            "formal",
            "Formal",
            "Please translate the following {source_lang} text into formal {dest_lang}, using \
             standard written language. Terminology reference: {glossary_list}\n\nOriginal text:",
            false,
        ),
        template(
            "casual",
            "Casual",
            "Please translate the following {source_lang} text into colloquial {dest_lang}, using \
             an everyday conversational tone. Terminology reference: {glossary_list}\n\nOriginal \
             text:",
            false,
        ),
    ]
}

/// Known completion API vendors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiProvider {
    #[default]
    #[serde(rename = "openai")]
    OpenAi,
    Anthropic,
    Google,
    Custom,
}

/// Endpoint and model suggestions for a vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderPreset {
    pub url: &'static str,
    pub models: &'static [&'static str],
}

impl ApiProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
            Self::Custom => "custom",
        }
    }

    /// `None` for custom endpoints.
    pub fn preset(&self) -> Option<ProviderPreset> {
        match self {
            Self::OpenAi => Some(ProviderPreset {
                url: "https://api.openai.com/v1/chat/completions",
                models: &["gpt-4", "gpt-3.5-turbo", "gpt-4-turbo"],
            }),
            Self::Anthropic => Some(ProviderPreset {
                url: "https://api.anthropic.com/v1/messages",
                models: &[
                    "claude-3-sonnet-20240229",
                    "claude-3-haiku-20240307",
                    "claude-3-opus-20240229",
                ],
            }),
            Self::Google => Some(ProviderPreset {
                url: "https://generativelanguage.googleapis.com/v1beta/models",
                models: &["gemini-pro", "gemini-pro-vision"],
            }),
            Self::Custom => None,
        }
    }
}

impl std::fmt::Display for ApiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
