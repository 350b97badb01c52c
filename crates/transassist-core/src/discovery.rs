//! Target-input discovery and validation.

use tracing::debug;
use transassist_dom::{Document, NodeId};

use crate::locator::find_source_text;
use crate::registry::SiteConfig;

/// Candidate target inputs: every element matched by any of the site's
/// `translationTextarea` selectors, selector by selector, each element once.
pub fn discover_targets(doc: &Document, config: &SiteConfig) -> Vec<NodeId> {
    let mut targets: Vec<NodeId> = Vec::new();
    for selector in &config.profile().translation_textarea {
        for node in doc.query_selector_all(doc.root(), selector) {
            if !targets.contains(&node) {
                targets.push(node);
            }
        }
    }
    debug!("{} candidate target inputs on {}", targets.len(), config.name());
    targets
}

/// Whether a candidate really is a translation input.
///
/// Read-only and disabled fields never are. Otherwise the field must either
/// be named like one (class, id or name) or sit inside the site's form
/// container next to findable source text.
pub fn is_valid_target(doc: &Document, node: NodeId, config: &SiteConfig) -> bool {
    if doc.is_readonly(node) || doc.is_disabled(node) {
        return false;
    }
    if has_translation_indicators(doc, node) {
        return true;
    }
    doc.closest(node, &config.profile().form_container).is_some()
        && !find_source_text(doc, node, config).is_empty()
}

fn has_translation_indicators(doc: &Document, node: NodeId) -> bool {
    let class = doc.class_name(node);
    let id = doc.attr(node, "id").unwrap_or_default();
    let name = doc.attr(node, "name").unwrap_or_default();
    class.contains("translation")
        || class.contains("target")
        || id.contains("translation")
        || name.contains("translation")
        || name.contains("target")
}
