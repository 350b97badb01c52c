use std::sync::Arc;

use super::*;
use crate::registry::{SiteProfile, SiteRegistry};
use transassist_config::SiteCatalog;
use transassist_dom::parse_html;

fn site(host: &str) -> SiteConfig {
    SiteRegistry::builtin().unwrap().resolve(host).clone()
}

/// The default profile with its method list replaced.
fn with_methods(methods: &[SourceTextMethod]) -> SiteConfig {
    let catalog = SiteCatalog::builtin().unwrap();
    let mut spec = catalog.get("default").unwrap().clone();
    spec.text_extraction.source_text_methods = methods.to_vec();
    SiteConfig::new(
        "default",
        "Test",
        Arc::new(SiteProfile::compile(&spec).unwrap()),
    )
}

fn target(doc: &Document) -> NodeId {
    doc.query_selector(doc.root(), &SelectorList::parse("#target").unwrap())
        .unwrap()
}

#[test]
fn test_readonly_sibling_in_form() {
    let doc = parse_html(
        r#"<form>
            <textarea readonly>  Hello world  </textarea>
            <textarea id="target" name="target-field"></textarea>
        </form>"#,
    )
    .unwrap();
    let config = with_methods(&[SourceTextMethod::ReadonlyTextarea]);
    assert_eq!(find_source_text(&doc, target(&doc), &config), "Hello world");
}

#[test]
fn test_clone_value_wins_without_trying_list_text() {
    let doc = parse_html(
        r#"<form>
            <div data-clone-value="  Open file  "></div>
            <div class="list-group-item-text"><span>List text</span></div>
            <textarea id="target"></textarea>
        </form>"#,
    )
    .unwrap();
    let config = with_methods(&[
        SourceTextMethod::DataCloneValue,
        SourceTextMethod::ListGroupItemText,
    ]);
    assert_eq!(find_source_text(&doc, target(&doc), &config), "Open file");
}

#[test]
fn test_list_group_text_skips_badges() {
    let doc = parse_html(
        r#"<form>
            <div class="list-group-item-text">
                <span class="badge">Source</span><span>  </span><span>Save as</span>
            </div>
            <textarea id="target"></textarea>
        </form>"#,
    )
    .unwrap();
    let config = with_methods(&[
        SourceTextMethod::DataCloneValue,
        SourceTextMethod::ListGroupItemText,
    ]);
    assert_eq!(find_source_text(&doc, target(&doc), &config), "Save as");
}

#[test]
fn test_clipboard_value_blank_is_skipped() {
    let doc = parse_html(
        r#"<form>
            <i data-clipboard-value="   "></i>
            <i data-clipboard-value="Print"></i>
            <textarea id="target"></textarea>
        </form>"#,
    )
    .unwrap();
    let config = with_methods(&[SourceTextMethod::DataClipboardValue]);
    assert_eq!(find_source_text(&doc, target(&doc), &config), "Print");
}

#[test]
fn test_source_elements_follow_selector_order() {
    let doc = parse_html(
        r#"<form>
            <div class="original-pane">From class match</div>
            <textarea readonly>From readonly</textarea>
            <textarea id="target"></textarea>
        </form>"#,
    )
    .unwrap();
    // The default profile lists `textarea[readonly]` before `[class*="original"]`.
    let config = with_methods(&[SourceTextMethod::SourceElements]);
    assert_eq!(
        find_source_text(&doc, target(&doc), &config),
        "From readonly"
    );
}

#[test]
fn test_previous_textarea() {
    let doc = parse_html(
        r#"<form>
            <textarea> first </textarea>
            <textarea id="target"></textarea>
        </form>
        <form><textarea id="other"></textarea></form>"#,
    )
    .unwrap();
    let config = with_methods(&[SourceTextMethod::PreviousTextarea]);
    assert_eq!(find_source_text(&doc, target(&doc), &config), "first");

    let other = doc
        .query_selector(doc.root(), &SelectorList::parse("#other").unwrap())
        .unwrap();
    assert_eq!(find_source_text(&doc, other, &config), "");
}

#[test]
fn test_scope_is_limited_to_form_container() {
    let doc = parse_html(
        r#"<form><textarea readonly>Unit one</textarea></form>
        <form><textarea readonly></textarea><textarea id="target"></textarea></form>"#,
    )
    .unwrap();
    let config = with_methods(&[SourceTextMethod::ReadonlyTextarea]);
    assert_eq!(find_source_text(&doc, target(&doc), &config), "");
}

#[test]
fn test_scope_falls_back_to_document() {
    let doc = parse_html(
        r#"<section><textarea readonly>Whole page</textarea></section>
        <section><textarea id="target"></textarea></section>"#,
    )
    .unwrap();
    let config = with_methods(&[SourceTextMethod::ReadonlyTextarea]);
    assert_eq!(source_scope(&doc, target(&doc), &config), doc.root());
    assert_eq!(find_source_text(&doc, target(&doc), &config), "Whole page");
}

#[test]
fn test_data_attribute_family() {
    let doc = parse_html(
        r#"<div class="tlid-translation">
            <div data-language-for-alternatives="source">Bonjour</div>
            <div data-testid="translator-source-input">Hallo</div>
            <div data-qa="source-text">Hola</div>
            <textarea id="target"></textarea>
        </div>"#,
    )
    .unwrap();
    let t = target(&doc);
    let google = site("translate.google.com");
    assert_eq!(
        find_source_text(&doc, t, &with_methods(&[SourceTextMethod::DataAttributes])),
        "Bonjour"
    );
    assert_eq!(
        find_source_text(&doc, t, &with_methods(&[SourceTextMethod::DataTestId])),
        "Hallo"
    );
    assert_eq!(
        find_source_text(&doc, t, &with_methods(&[SourceTextMethod::DataQa])),
        "Hola"
    );
    assert_eq!(find_source_text(&doc, t, &google), "Bonjour");
}

#[test]
fn test_input_values_are_read() {
    let mut doc = parse_html(
        r#"<form><input readonly value="x"><div data-qa="source"><input value=" typed "></div>
        <textarea id="target"></textarea></form>"#,
    )
    .unwrap();
    let config = with_methods(&[SourceTextMethod::DataQa]);
    // The matched div has no text of its own.
    assert_eq!(find_source_text(&doc, target(&doc), &config), "");

    let input = doc
        .query_selector(doc.root(), &SelectorList::parse("input[readonly]").unwrap())
        .unwrap();
    doc.set_attr(input, "data-qa", "source-value");
    assert_eq!(find_source_text(&doc, target(&doc), &config), "x");
}

#[test]
fn test_nothing_found_is_empty() {
    let doc = parse_html(r#"<form><textarea id="target"></textarea></form>"#).unwrap();
    let config = site("translations.documentfoundation.org");
    assert_eq!(find_source_text(&doc, target(&doc), &config), "");
}

#[test]
fn test_weblate_markup() {
    let doc = parse_html(
        r#"<form class="translation-form">
            <div class="source-language-group">
                <div class="list-group-item-text"><span class="badge">en</span><span>Insert Table</span></div>
                <button data-clone-value="Insert Table"></button>
            </div>
            <textarea id="target" name="target_0" class="translation-editor"></textarea>
        </form>"#,
    )
    .unwrap();
    let config = site("translations.documentfoundation.org");
    assert_eq!(find_source_text(&doc, target(&doc), &config), "Insert Table");
}

#[test]
fn test_injected_control_is_ignored() {
    let doc = parse_html(
        r#"<form>
            <div class="llm-assistant-container">
                <div class="llm-source-text">Original: </div>
                <textarea readonly>stale</textarea>
            </div>
            <textarea id="target" name="target-field"></textarea>
        </form>"#,
    )
    .unwrap();
    let config = site("example.org");
    assert_eq!(find_source_text(&doc, target(&doc), &config), "");
}
