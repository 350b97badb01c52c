//! Declarative site profiles.
//!
//! Field names follow the camelCase keys used in the site catalog files.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The key of the fallback profile.
pub const DEFAULT_SITE: &str = "default";

const BUILTIN_SITES: &str = include_str!("../../sites/builtin.toml");

/// How one site is adapted: which inputs to decorate and where its
/// source text lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSpec {
    /// Hostname key. `default` marks the fallback profile.
    pub host: String,
    pub name: String,
    pub selectors: SelectorSpec,
    #[serde(default)]
    pub ui: UiSpec,
    pub text_extraction: TextExtractionSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorSpec {
    pub translation_textarea: Vec<String>,
    #[serde(default)]
    pub source_text: Vec<String>,
    pub form_container: String,
    /// Elements whose appearance should trigger a rescan. Defaults to the
    /// site's textarea and source selectors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutation_markers: Option<MutationMarkerSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationMarkerSpec {
    #[serde(default)]
    pub translation_input: Vec<String>,
    #[serde(default)]
    pub source_text: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSpec {
    #[serde(default)]
    pub button_position: ButtonPosition,
    #[serde(default = "default_button_class")]
    pub button_class: String,
    #[serde(default = "default_container_class")]
    pub container_class: String,
}

impl Default for UiSpec {
    fn default() -> Self {
        Self {
            button_position: ButtonPosition::default(),
            button_class: default_button_class(),
            container_class: default_container_class(),
        }
    }
}

fn default_button_class() -> String {
    "llm-generic-btn".to_string()
}

fn default_container_class() -> String {
    "llm-generic-container".to_string()
}

/// Where the control container goes relative to the target input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonPosition {
    Before,
    #[default]
    After,
    /// Appended as the last child of the input's parent.
    Inside,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextExtractionSpec {
    pub source_text_methods: Vec<SourceTextMethod>,
}

/// A named source-text extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceTextMethod {
    DataClipboardValue,
    DataCloneValue,
    ListGroupItemText,
    SourceElements,
    ReadonlyTextarea,
    PreviousTextarea,
    DataAttributes,
    DataTestId,
    DataQa,
}

impl SourceTextMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataClipboardValue => "dataClipboardValue",
            Self::DataCloneValue => "dataCloneValue",
            Self::ListGroupItemText => "listGroupItemText",
            Self::SourceElements => "sourceElements",
            Self::ReadonlyTextarea => "readonlyTextarea",
            Self::PreviousTextarea => "previousTextarea",
            Self::DataAttributes => "dataAttributes",
            Self::DataTestId => "dataTestId",
            Self::DataQa => "dataQa",
        }
    }
}

impl std::fmt::Display for SourceTextMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Another hostname served by an existing profile under its own name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasSpec {
    pub host: String,
    pub target: String,
    pub name: String,
}

/// An ordered set of site profiles plus aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteCatalog {
    #[serde(default)]
    pub sites: Vec<SiteSpec>,
    #[serde(default)]
    pub aliases: Vec<AliasSpec>,
}

impl SiteCatalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml(BUILTIN_SITES)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay user entries. A site or alias whose host is already present
    /// replaces it in place; new ones are appended. Hosts are compared
    /// case-insensitively and stored lowercased.
    pub fn merge(
        &mut self,
        sites: impl IntoIterator<Item = SiteSpec>,
        aliases: impl IntoIterator<Item = AliasSpec>,
    ) {
        for mut site in sites {
            site.host = normalize_host(&site.host);
            match self
                .sites
                .iter_mut()
                .find(|s| normalize_host(&s.host) == site.host)
            {
                Some(existing) => {
                    tracing::debug!("Overriding site profile {}", site.host);
                    *existing = site;
                }
                None => self.sites.push(site),
            }
        }
        for mut alias in aliases {
            alias.host = normalize_host(&alias.host);
            alias.target = normalize_host(&alias.target);
            match self
                .aliases
                .iter_mut()
                .find(|a| normalize_host(&a.host) == alias.host)
            {
                Some(existing) => *existing = alias,
                None => self.aliases.push(alias),
            }
        }
    }

    pub fn get(&self, host: &str) -> Option<&SiteSpec> {
        let host = normalize_host(host);
        self.sites.iter().find(|s| normalize_host(&s.host) == host)
    }
}

/// Hostnames are matched trimmed and lowercased.
pub fn normalize_host(host: &str) -> String {
    host.trim().to_ascii_lowercase()
}
