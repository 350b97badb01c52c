//! Selector queries over a [`Document`].

use crate::{Document, NodeId, SelectorList};

impl Document {
    /// Elements under `scope` matching `selector`, in document order.
    ///
    /// As with `Element.querySelectorAll`, the selector is evaluated against
    /// the whole document; only the results are restricted to `scope`.
    pub fn query_selector_all(&self, scope: NodeId, selector: &SelectorList) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&n| selector.matches(self, n))
            .collect()
    }

    /// First element under `scope` matching `selector`.
    pub fn query_selector(&self, scope: NodeId, selector: &SelectorList) -> Option<NodeId> {
        self.descendants(scope).find(|&n| selector.matches(self, n))
    }

    pub fn matches(&self, node: NodeId, selector: &SelectorList) -> bool {
        selector.matches(self, node)
    }

    /// Nearest inclusive ancestor element matching `selector`.
    pub fn closest(&self, node: NodeId, selector: &SelectorList) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(n) = current {
            if selector.matches(self, n) {
                return Some(n);
            }
            current = self.parent_element(n);
        }
        None
    }

    /// Whether `node` matches, or has a descendant matching, `selector`.
    pub fn is_or_contains(&self, node: NodeId, selector: &SelectorList) -> bool {
        self.matches(node, selector) || self.query_selector(node, selector).is_some()
    }
}
