//! Site registry: one compiled profile per known hostname plus a fallback.

use std::sync::Arc;

use tracing::{debug, info};
use transassist_config::{
    ButtonPosition, Config, DEFAULT_SITE, SiteCatalog, SiteSpec, SourceTextMethod, UiSpec,
    normalize_host,
};
use transassist_dom::SelectorList;

use crate::error::RegistryError;

/// A site profile with its selectors parsed.
#[derive(Debug)]
pub struct SiteProfile {
    pub translation_textarea: Vec<SelectorList>,
    pub source_text: Vec<SelectorList>,
    pub form_container: SelectorList,
    /// Elements whose arrival, removal or class change warrants a rescan.
    pub mutation_markers: Vec<SelectorList>,
    pub ui: UiSpec,
    pub source_text_methods: Vec<SourceTextMethod>,
}

impl SiteProfile {
    /// Compile a declarative profile. Any unparsable selector fails here,
    /// never at match time.
    pub fn compile(spec: &SiteSpec) -> Result<Self, RegistryError> {
        let parse = |field: &'static str, selector: &str| {
            SelectorList::parse(selector).map_err(|source| RegistryError::InvalidSelector {
                host: spec.host.clone(),
                field,
                source,
            })
        };
        let parse_all = |field: &'static str, selectors: &[String]| {
            selectors
                .iter()
                .map(|s| parse(field, s))
                .collect::<Result<Vec<_>, _>>()
        };

        let translation_textarea =
            parse_all("translationTextarea", spec.selectors.translation_textarea.as_slice())?;
        let source_text = parse_all("sourceText", spec.selectors.source_text.as_slice())?;
        let mutation_markers = match &spec.selectors.mutation_markers {
            Some(markers) => {
                let mut compiled = parse_all("mutationMarkers", markers.translation_input.as_slice())?;
                compiled.extend(parse_all("mutationMarkers", markers.source_text.as_slice())?);
                compiled
            }
            None => translation_textarea
                .iter()
                .chain(&source_text)
                .cloned()
                .collect(),
        };

        Ok(Self {
            form_container: parse("formContainer", &spec.selectors.form_container)?,
            translation_textarea,
            source_text,
            mutation_markers,
            ui: spec.ui.clone(),
            source_text_methods: spec.text_extraction.source_text_methods.clone(),
        })
    }
}

/// The configuration resolved for one hostname.
///
/// Cloning is cheap; aliases share the profile of their target.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    key: String,
    name: String,
    profile: Arc<SiteProfile>,
}

impl SiteConfig {
    pub fn new(key: impl Into<String>, name: impl Into<String>, profile: Arc<SiteProfile>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            profile,
        }
    }

    /// The registry key this config was found under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn profile(&self) -> &SiteProfile {
        &self.profile
    }

    pub fn is_default(&self) -> bool {
        self.key == DEFAULT_SITE
    }

    pub fn button_position(&self) -> ButtonPosition {
        self.profile.ui.button_position
    }

    /// Whether two configs share the same compiled profile.
    pub fn shares_profile_with(&self, other: &SiteConfig) -> bool {
        Arc::ptr_eq(&self.profile, &other.profile)
    }
}

/// Hostname to site configuration resolution.
#[derive(Debug, Clone)]
pub struct SiteRegistry {
    /// Non-default entries in match order.
    entries: Vec<SiteConfig>,
    default: SiteConfig,
}

impl SiteRegistry {
    /// Build from a catalog: compile every profile, then apply aliases.
    pub fn from_catalog(catalog: &SiteCatalog) -> Result<Self, RegistryError> {
        let mut entries: Vec<SiteConfig> = Vec::new();
        let mut default = None;

        for spec in &catalog.sites {
            let key = normalize_host(&spec.host);
            let config = SiteConfig::new(
                key.clone(),
                spec.name.clone(),
                Arc::new(SiteProfile::compile(spec)?),
            );
            if key == DEFAULT_SITE {
                if default.is_none() {
                    default = Some(config);
                }
            } else if entries.iter().any(|e| e.key == key) {
                debug!("Ignoring duplicate site profile {}", key);
            } else {
                entries.push(config);
            }
        }

        let mut registry = Self {
            entries,
            default: default.ok_or(RegistryError::MissingDefault)?,
        };
        for alias in &catalog.aliases {
            registry.alias(&alias.host, &alias.target, &alias.name)?;
        }

        info!(
            "Site registry ready: {} sites, {} aliases",
            catalog.sites.len(),
            catalog.aliases.len()
        );
        Ok(registry)
    }

    /// The built-in catalog only.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_catalog(&SiteCatalog::builtin()?)
    }

    /// Built-in catalog plus the sites and aliases of `config`.
    pub fn from_config(config: &Config) -> Result<Self, RegistryError> {
        Self::from_catalog(&config.site_catalog()?)
    }

    /// Resolve a hostname: exact key, then the first key the hostname
    /// contains, then the default profile. Never fails.
    pub fn resolve(&self, hostname: &str) -> &SiteConfig {
        self.lookup(hostname).unwrap_or(&self.default)
    }

    /// Whether an exact or substring match exists. The default profile
    /// never counts.
    pub fn is_supported(&self, hostname: &str) -> bool {
        self.lookup(hostname).is_some()
    }

    fn lookup(&self, hostname: &str) -> Option<&SiteConfig> {
        let host = normalize_host(hostname);
        if host.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| e.key == host)
            .or_else(|| self.entries.iter().find(|e| host.contains(e.key.as_str())))
    }

    /// Register `host` as another name for `target`'s profile, shown as
    /// `name`. The profile is shared, not copied. An existing entry for
    /// `host` is replaced.
    pub fn alias(&mut self, host: &str, target: &str, name: &str) -> Result<(), RegistryError> {
        let host = normalize_host(host);
        if host.is_empty() || host == DEFAULT_SITE {
            return Err(RegistryError::ReservedHost(host));
        }

        let target_key = normalize_host(target);
        let profile = if target_key == DEFAULT_SITE {
            self.default.profile.clone()
        } else {
            self.entries
                .iter()
                .find(|e| e.key == target_key)
                .map(|e| e.profile.clone())
                .ok_or_else(|| RegistryError::UnknownAliasTarget {
                    host: host.clone(),
                    target: target.to_string(),
                })?
        };

        let config = SiteConfig::new(host.clone(), name, profile);
        match self.entries.iter_mut().find(|e| e.key == host) {
            Some(existing) => *existing = config,
            None => self.entries.push(config),
        }
        debug!("Aliased {} to {}", host, target_key);
        Ok(())
    }

    /// Registered non-default sites in match order.
    pub fn sites(&self) -> impl Iterator<Item = &SiteConfig> {
        self.entries.iter()
    }

    pub fn default_config(&self) -> &SiteConfig {
        &self.default
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
