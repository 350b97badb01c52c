//! Configuration validation.

use std::collections::HashSet;

use transassist_dom::SelectorList;

use crate::error::ConfigError;
use crate::schema::{Config, DEFAULT_SITE, SiteCatalog, SiteSpec, SourceTextMethod};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration, including the merged site catalog.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_watcher(config, &mut result);
        Self::validate_paths(config, &mut result);
        Self::validate_catalog(&config.site_catalog()?, &mut result);

        Ok(result)
    }

    fn validate_watcher(config: &Config, result: &mut ValidationResult) {
        if config.watcher.debounce_ms == 0 {
            result.add_error(ValidationError::new(
                "watcher.debounce_ms",
                "debounce_ms must be greater than 0",
            ));
        }

        if config.watcher.min_rescan_interval_ms == 0 {
            result.add_error(ValidationError::new(
                "watcher.min_rescan_interval_ms",
                "min_rescan_interval_ms must be greater than 0",
            ));
        }

        if config.watcher.debounce_ms > config.watcher.min_rescan_interval_ms {
            result.add_warning(ValidationWarning::new(
                "watcher.debounce_ms",
                "debounce_ms exceeds min_rescan_interval_ms, the throttle will never apply",
            ));
        }

        if config.assistant.auto_translate_delay_ms > 10_000 {
            result.add_warning(ValidationWarning::new(
                "assistant.auto_translate_delay_ms",
                "auto_translate_delay_ms is very high (>10s)",
            ));
        }
    }

    fn validate_paths(config: &Config, result: &mut ValidationResult) {
        if config.settings.path.trim().is_empty() {
            result.add_error(ValidationError::new(
                "settings.path",
                "Settings path cannot be empty",
            ));
        }
    }

    /// Validate a site catalog on its own.
    pub fn validate_catalog(catalog: &SiteCatalog, result: &mut ValidationResult) {
        if catalog.get(DEFAULT_SITE).is_none() {
            result.add_error(ValidationError::new(
                "sites",
                format!("A '{DEFAULT_SITE}' site profile is required"),
            ));
        }

        let mut seen = HashSet::new();
        for site in &catalog.sites {
            if !seen.insert(site.host.as_str()) {
                result.add_warning(ValidationWarning::new(
                    format!("sites.{}", site.host),
                    "Duplicate host, only the first entry is used",
                ));
            }
            Self::validate_site(site, result);
        }

        for (i, alias) in catalog.aliases.iter().enumerate() {
            let path = format!("aliases[{i}]");
            if alias.host.trim().is_empty() || alias.host == DEFAULT_SITE {
                result.add_error(ValidationError::new(
                    format!("{path}.host"),
                    format!("Alias host must be a hostname other than '{DEFAULT_SITE}'"),
                ));
            }
            if catalog.get(&alias.target).is_none() {
                result.add_error(ValidationError::new(
                    format!("{path}.target"),
                    format!("Unknown site '{}'", alias.target),
                ));
            }
        }
    }

    fn validate_site(site: &SiteSpec, result: &mut ValidationResult) {
        let path = format!("sites.{}", site.host);

        if site.host.trim().is_empty() {
            result.add_error(ValidationError::new(
                format!("{path}.host"),
                "Host cannot be empty",
            ));
        }

        if site.selectors.translation_textarea.is_empty() {
            result.add_error(ValidationError::new(
                format!("{path}.selectors.translationTextarea"),
                "At least one target input selector is required",
            ));
        }

        let methods = &site.text_extraction.source_text_methods;
        if methods.is_empty() {
            result.add_error(ValidationError::new(
                format!("{path}.textExtraction.sourceTextMethods"),
                "At least one extraction method is required",
            ));
        }
        let mut seen = HashSet::new();
        for method in methods {
            if !seen.insert(*method) {
                result.add_warning(ValidationWarning::new(
                    format!("{path}.textExtraction.sourceTextMethods"),
                    format!("'{method}' is listed more than once"),
                ));
            }
        }
        if methods.contains(&SourceTextMethod::SourceElements)
            && site.selectors.source_text.is_empty()
        {
            result.add_warning(ValidationWarning::new(
                format!("{path}.selectors.sourceText"),
                "sourceElements is enabled but no source selectors are set",
            ));
        }

        let mut selectors: Vec<(String, &str)> = Vec::new();
        for (i, s) in site.selectors.translation_textarea.iter().enumerate() {
            selectors.push((format!("{path}.selectors.translationTextarea[{i}]"), s));
        }
        for (i, s) in site.selectors.source_text.iter().enumerate() {
            selectors.push((format!("{path}.selectors.sourceText[{i}]"), s));
        }
        selectors.push((
            format!("{path}.selectors.formContainer"),
            &site.selectors.form_container,
        ));
        if let Some(markers) = &site.selectors.mutation_markers {
            for (i, s) in markers.translation_input.iter().enumerate() {
                selectors.push((
                    format!("{path}.selectors.mutationMarkers.translationInput[{i}]"),
                    s,
                ));
            }
            for (i, s) in markers.source_text.iter().enumerate() {
                selectors.push((format!("{path}.selectors.mutationMarkers.sourceText[{i}]"), s));
            }
        }

        for (field, selector) in selectors {
            if let Err(e) = SelectorList::parse(selector) {
                result.add_error(ValidationError::new(field, e.to_string()));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
