use super::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.settings.path, "~/.transassist/settings.json");
    assert_eq!(config.watcher.debounce_ms, 500);
    assert_eq!(config.watcher.min_rescan_interval_ms, 1000);
    assert_eq!(config.assistant.auto_translate_delay_ms, 100);
    assert_eq!(config.logging.level, "info");
    assert!(config.sites.is_empty());
    assert!(config.aliases.is_empty());
}

#[test]
fn test_ui_strings_default() {
    let ui = UiStrings::default();
    assert_eq!(ui.translate_button, "AI Translate");
    assert_eq!(ui.translating, "Translating...");
    assert_eq!(ui.original_label, "Original:");
    assert_eq!(ui.apply_button, "Apply");
}

#[test]
fn test_ui_strings_partial_override() {
    let config: Config = toml::from_str(
        r#"
        [ui]
        translate_button = "KI-Übersetzung"
    "#,
    )
    .unwrap();
    assert_eq!(config.ui.translate_button, "KI-Übersetzung");
    assert_eq!(config.ui.apply_button, "Apply");
}

#[test]
fn test_builtin_catalog_parses() {
    let catalog = SiteCatalog::builtin().unwrap();
    let hosts: Vec<&str> = catalog.sites.iter().map(|s| s.host.as_str()).collect();
    assert_eq!(
        hosts,
        [
            "translations.documentfoundation.org",
            "wiki.documentfoundation.org",
            "translate.google.com",
            "www.deepl.com",
            "crowdin.com",
            DEFAULT_SITE,
        ]
    );
    assert_eq!(catalog.aliases.len(), 1);
    assert_eq!(catalog.aliases[0].host, "hosted.weblate.org");
}

#[test]
fn test_builtin_libreoffice_profile() {
    let catalog = SiteCatalog::builtin().unwrap();
    let site = catalog.get("translations.documentfoundation.org").unwrap();
    assert_eq!(site.name, "LibreOffice Weblate");
    assert_eq!(site.ui.button_class, "llm-weblate-btn");
    assert_eq!(site.ui.button_position, ButtonPosition::After);
    assert_eq!(
        site.text_extraction.source_text_methods,
        vec![
            SourceTextMethod::DataCloneValue,
            SourceTextMethod::ListGroupItemText,
            SourceTextMethod::ReadonlyTextarea,
            SourceTextMethod::SourceElements,
            SourceTextMethod::PreviousTextarea,
        ]
    );
    assert!(site.selectors.mutation_markers.is_none());
}

#[test]
fn test_builtin_wiki_profile_has_markers() {
    let catalog = SiteCatalog::builtin().unwrap();
    let site = catalog.get("wiki.documentfoundation.org").unwrap();
    let markers = site.selectors.mutation_markers.as_ref().unwrap();
    assert_eq!(markers.translation_input, ["textarea.tux-textarea-translation"]);
    assert_eq!(markers.source_text, [".sourcemessage"]);
}

#[test]
fn test_merge_overrides_in_place_and_appends() {
    let mut catalog = SiteCatalog::builtin().unwrap();
    let mut crowdin = catalog.get("crowdin.com").unwrap().clone();
    crowdin.name = "Crowdin (custom)".to_string();
    let mut extra = crowdin.clone();
    extra.host = "pontoon.mozilla.org".to_string();

    catalog.merge(
        [crowdin, extra],
        [AliasSpec {
            host: "hosted.weblate.org".to_string(),
            target: "crowdin.com".to_string(),
            name: "Moved".to_string(),
        }],
    );

    assert_eq!(catalog.sites[4].host, "crowdin.com");
    assert_eq!(catalog.sites[4].name, "Crowdin (custom)");
    assert_eq!(catalog.sites.last().unwrap().host, "pontoon.mozilla.org");
    assert_eq!(catalog.aliases.len(), 1);
    assert_eq!(catalog.aliases[0].target, "crowdin.com");
}

#[test]
fn test_merge_matches_hosts_case_insensitively() {
    let mut catalog = SiteCatalog::builtin().unwrap();
    let builtin_count = catalog.sites.len();
    let mut crowdin = catalog.get("crowdin.com").unwrap().clone();
    crowdin.host = " Crowdin.COM ".to_string();
    crowdin.name = "Crowdin (custom)".to_string();

    catalog.merge(
        [crowdin],
        [AliasSpec {
            host: "Weblate.Example.org".to_string(),
            target: "Crowdin.com".to_string(),
            name: "Example".to_string(),
        }],
    );

    assert_eq!(catalog.sites.len(), builtin_count);
    assert_eq!(catalog.get("CROWDIN.com").unwrap().name, "Crowdin (custom)");
    assert_eq!(catalog.sites[4].host, "crowdin.com");
    let alias = catalog.aliases.last().unwrap();
    assert_eq!(alias.host, "weblate.example.org");
    assert_eq!(alias.target, "crowdin.com");
}

#[test]
fn test_site_catalog_from_config() {
    let config: Config = toml::from_str(
        r#"
        [[aliases]]
        host = "weblate.example.org"
        target = "translations.documentfoundation.org"
        name = "Example"
    "#,
    )
    .unwrap();
    let catalog = config.site_catalog().unwrap();
    assert_eq!(catalog.aliases.len(), 2);
}

#[test]
fn test_ui_spec_defaults() {
    let ui = UiSpec::default();
    assert_eq!(ui.button_position, ButtonPosition::After);
    assert_eq!(ui.button_class, "llm-generic-btn");
    assert_eq!(ui.container_class, "llm-generic-container");
}

#[test]
fn test_method_names_match_serde() {
    for method in [
        SourceTextMethod::DataClipboardValue,
        SourceTextMethod::DataTestId,
        SourceTextMethod::DataQa,
        SourceTextMethod::PreviousTextarea,
    ] {
        let json = serde_json::to_string(&method).unwrap();
        assert_eq!(json, format!("\"{method}\""));
    }
}
