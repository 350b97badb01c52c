//! Source-text locator.
//!
//! Each [`SourceTextMethod`] maps to one extraction function. A site lists
//! the methods it wants in priority order; the first one that yields
//! non-blank text wins.

use std::sync::LazyLock;

use tracing::debug;
use transassist_config::SourceTextMethod;
use transassist_dom::{Document, NodeId, SelectorList};

use crate::injector::is_own_ui;
use crate::registry::SiteConfig;

fn selector(source: &str) -> SelectorList {
    SelectorList::parse(source).expect("built-in selector")
}

static DATA_CLIPBOARD_VALUE: LazyLock<SelectorList> =
    LazyLock::new(|| selector("[data-clipboard-value]"));
static DATA_CLONE_VALUE: LazyLock<SelectorList> = LazyLock::new(|| selector("[data-clone-value]"));
static LIST_GROUP_ITEM_TEXT: LazyLock<SelectorList> =
    LazyLock::new(|| selector(".list-group-item-text span:not(.badge)"));
static READONLY_TEXTAREA: LazyLock<SelectorList> =
    LazyLock::new(|| selector("textarea[readonly], textarea[disabled]"));
static TEXTAREA: LazyLock<SelectorList> = LazyLock::new(|| selector("textarea"));
static DATA_LANGUAGE_SOURCE: LazyLock<SelectorList> =
    LazyLock::new(|| selector(r#"[data-language-for-alternatives="source"]"#));
static DATA_TESTID_SOURCE: LazyLock<SelectorList> =
    LazyLock::new(|| selector(r#"[data-testid*="source"]"#));
static DATA_QA_SOURCE: LazyLock<SelectorList> = LazyLock::new(|| selector(r#"[data-qa*="source"]"#));

/// What every extraction function sees.
struct Extraction<'a> {
    doc: &'a Document,
    /// Nearest `formContainer` ancestor of the target, else the document.
    scope: NodeId,
    target: NodeId,
    config: &'a SiteConfig,
}

type Extractor = fn(&Extraction<'_>) -> String;

fn extractor(method: SourceTextMethod) -> Extractor {
    match method {
        SourceTextMethod::DataClipboardValue => {
            |x| first_attr(x, &DATA_CLIPBOARD_VALUE, "data-clipboard-value")
        }
        SourceTextMethod::DataCloneValue => {
            |x| first_attr(x, &DATA_CLONE_VALUE, "data-clone-value")
        }
        SourceTextMethod::ListGroupItemText => |x| first_text(x, &LIST_GROUP_ITEM_TEXT),
        SourceTextMethod::SourceElements => source_elements,
        SourceTextMethod::ReadonlyTextarea => |x| first_text(x, &READONLY_TEXTAREA),
        SourceTextMethod::PreviousTextarea => previous_textarea,
        SourceTextMethod::DataAttributes => |x| first_text(x, &DATA_LANGUAGE_SOURCE),
        SourceTextMethod::DataTestId => |x| first_text(x, &DATA_TESTID_SOURCE),
        SourceTextMethod::DataQa => |x| first_text(x, &DATA_QA_SOURCE),
    }
}

/// Find the source text belonging to `target`, or an empty string.
pub fn find_source_text(doc: &Document, target: NodeId, config: &SiteConfig) -> String {
    let extraction = Extraction {
        doc,
        scope: source_scope(doc, target, config),
        target,
        config,
    };

    for &method in &config.profile().source_text_methods {
        let text = extractor(method)(&extraction);
        if !text.is_empty() {
            debug!("Source text found via {} ({} chars)", method, text.len());
            return text;
        }
    }
    String::new()
}

/// The element source/target pairing is confined to.
pub fn source_scope(doc: &Document, target: NodeId, config: &SiteConfig) -> NodeId {
    doc.closest(target, &config.profile().form_container)
        .unwrap_or_else(|| doc.root())
}

/// Trimmed value for text controls, trimmed text content otherwise.
fn element_text(doc: &Document, node: NodeId) -> String {
    if doc.is_form_control(node) {
        doc.value(node).trim().to_string()
    } else {
        doc.text_content(node).trim().to_string()
    }
}

/// Page elements in scope matching `selector`. Our own controls never
/// count as source text.
fn page_elements(x: &Extraction<'_>, selector: &SelectorList) -> Vec<NodeId> {
    x.doc
        .query_selector_all(x.scope, selector)
        .into_iter()
        .filter(|&n| !is_own_ui(x.doc, n))
        .collect()
}

fn first_text(x: &Extraction<'_>, selector: &SelectorList) -> String {
    page_elements(x, selector)
        .into_iter()
        .map(|n| element_text(x.doc, n))
        .find(|t| !t.is_empty())
        .unwrap_or_default()
}

fn first_attr(x: &Extraction<'_>, selector: &SelectorList, name: &str) -> String {
    page_elements(x, selector)
        .into_iter()
        .filter_map(|n| x.doc.attr(n, name))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_default()
}

fn source_elements(x: &Extraction<'_>) -> String {
    x.config
        .profile()
        .source_text
        .iter()
        .map(|s| first_text(x, s))
        .find(|t| !t.is_empty())
        .unwrap_or_default()
}

/// The textarea right before the target, in document order within scope.
fn previous_textarea(x: &Extraction<'_>) -> String {
    let textareas = page_elements(x, &TEXTAREA);
    match textareas.iter().position(|&t| t == x.target) {
        Some(index) if index > 0 => x.doc.value(textareas[index - 1]).trim().to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;
