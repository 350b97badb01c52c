//! The document tree.

use std::collections::HashMap;
use std::fmt;

use crate::event::{DomEvent, EventKind, Listener};
use crate::mutation::MutationRecord;
use crate::node::{ElementData, Node, NodeKind};
use crate::NodeId;

/// An HTML document held in an arena.
///
/// Node handles index into the arena, so passing a [`NodeId`] from another
/// document is a logic error and panics.
pub struct Document {
    nodes: Vec<Node>,
    observing: bool,
    records: Vec<MutationRecord>,
    listeners: HashMap<(NodeId, EventKind), Vec<Listener>>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("observing", &self.observing)
            .field("pending_records", &self.records.len())
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document)],
            observing: false,
            records: Vec::new(),
            listeners: HashMap::new(),
        }
    }

    /// The document node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The `<body>` element, or the document node when there is none.
    pub fn body(&self) -> NodeId {
        self.descendants(self.root())
            .find(|&n| self.tag_name(n) == Some("body"))
            .unwrap_or(self.root())
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.node(id).kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.node_mut(id).kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    // ---- mutation records ----

    /// Start recording mutations.
    pub fn start_observing(&mut self) {
        self.observing = true;
    }

    /// Stop recording and drop anything pending.
    pub fn stop_observing(&mut self) {
        self.observing = false;
        self.records.clear();
    }

    /// Drain the pending mutation records.
    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.records)
    }

    fn record(&mut self, record: MutationRecord) {
        if self.observing {
            self.records.push(record);
        }
    }

    // ---- tree construction ----

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes
            .push(Node::new(NodeKind::Element(ElementData::new(tag))));
        id
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(NodeKind::Text(text.to_string())));
        id
    }

    /// Append `child` as the last child of `parent`, moving it if attached.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_before(parent, child, None);
    }

    /// Insert `child` before `reference` (or at the end when `None`).
    ///
    /// A `reference` that is not a child of `parent` appends instead.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        if child == parent || self.is_inclusive_ancestor(child, parent) {
            tracing::warn!(?child, ?parent, "refusing to insert a node into itself");
            return;
        }
        self.detach(child);

        let siblings = &self.node(parent).children;
        let position = reference
            .and_then(|r| siblings.iter().position(|&c| c == r))
            .unwrap_or(siblings.len());
        self.node_mut(parent).children.insert(position, child);
        self.node_mut(child).parent = Some(parent);

        self.record(MutationRecord::ChildList {
            target: parent,
            added: vec![child],
            removed: Vec::new(),
        });
    }

    /// Detach `node` from its parent. The subtree stays intact and queryable.
    pub fn remove(&mut self, node: NodeId) {
        self.detach(node);
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.node(node).parent else {
            return;
        };
        self.node_mut(parent).children.retain(|&c| c != node);
        self.node_mut(node).parent = None;
        self.record(MutationRecord::ChildList {
            target: parent,
            added: Vec::new(),
            removed: vec![node],
        });
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    // ---- navigation ----

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    /// The parent when it is an element (not the document node).
    pub fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node).filter(|&p| self.is_element(p))
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let index = siblings.iter().position(|&c| c == node)?;
        siblings.get(index + 1).copied()
    }

    /// Whether `node` is reachable from the document node.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.is_inclusive_ancestor(self.root(), node)
    }

    /// Descendants of `node` in document (pre-)order, excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: self.children(node).iter().rev().copied().collect(),
        }
    }

    // ---- element data ----

    pub fn is_element(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.tag.as_str())
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attr(name)
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    pub fn attrs(&self, node: NodeId) -> &[(String, String)] {
        self.element(node).map(|e| e.attrs.as_slice()).unwrap_or(&[])
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        let Some(element) = self.element_mut(node) else {
            return;
        };
        match element.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => element.attrs.push((name.clone(), value.to_string())),
        }
        self.record(MutationRecord::Attributes { target: node, name });
    }

    /// Remove an attribute. Returns whether it was present.
    pub fn remove_attr(&mut self, node: NodeId, name: &str) -> bool {
        let Some(element) = self.element_mut(node) else {
            return false;
        };
        let before = element.attrs.len();
        element.attrs.retain(|(k, _)| k != name);
        let removed = element.attrs.len() != before;
        if removed {
            self.record(MutationRecord::Attributes {
                target: node,
                name: name.to_string(),
            });
        }
        removed
    }

    /// Class attribute as written, or an empty string.
    pub fn class_name(&self, node: NodeId) -> &str {
        self.attr(node, "class").unwrap_or("")
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.class_name(node).split_ascii_whitespace().any(|c| c == class)
    }

    pub fn is_readonly(&self, node: NodeId) -> bool {
        self.has_attr(node, "readonly")
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.has_attr(node, "disabled")
    }

    // ---- content ----

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, node: NodeId) -> String {
        if let NodeKind::Text(text) = &self.node(node).kind {
            return text.clone();
        }
        self.descendants(node)
            .filter_map(|n| match &self.node(n).kind {
                NodeKind::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Replace all children of `node` with a single text node.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        if let NodeKind::Text(existing) = &mut self.node_mut(node).kind {
            *existing = text.to_string();
            return;
        }
        let old: Vec<NodeId> = self.children(node).to_vec();
        for child in old {
            self.detach(child);
        }
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(node, text_node);
        }
    }

    /// Whether the element behaves like a text control (`value` property).
    pub fn is_form_control(&self, node: NodeId) -> bool {
        matches!(self.tag_name(node), Some("textarea" | "input"))
    }

    /// Current value of a form control.
    ///
    /// A textarea defaults to its text, an input to its `value` attribute.
    /// Non-controls have no value and return an empty string.
    pub fn value(&self, node: NodeId) -> String {
        let Some(element) = self.element(node) else {
            return String::new();
        };
        if let Some(value) = &element.value {
            return value.clone();
        }
        match element.tag.as_str() {
            "textarea" => self.text_content(node),
            "input" => element.attr("value").unwrap_or_default().to_string(),
            _ => String::new(),
        }
    }

    /// Set the live value of a form control. Like the DOM property, this
    /// does not produce a mutation record.
    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(element) = self.element_mut(node) {
            element.value = Some(value.to_string());
        }
    }

    // ---- events ----

    pub fn add_event_listener(&mut self, node: NodeId, kind: EventKind, listener: Listener) {
        self.listeners.entry((node, kind)).or_default().push(listener);
    }

    /// Dispatch an event on `target`, bubbling through ancestors if asked.
    /// Returns how many listeners ran.
    pub fn dispatch_event(&mut self, target: NodeId, kind: EventKind, bubbles: bool) -> usize {
        let mut path = vec![target];
        if bubbles {
            let mut current = self.parent(target);
            while let Some(n) = current {
                path.push(n);
                current = self.parent(n);
            }
        }

        let mut invoked = 0;
        for current_target in path {
            let Some(listeners) = self.listeners.get_mut(&(current_target, kind)) else {
                continue;
            };
            let event = DomEvent {
                kind,
                target,
                current_target,
                bubbles,
            };
            for listener in listeners.iter_mut() {
                listener(&event);
                invoked += 1;
            }
        }
        invoked
    }

    pub(crate) fn text_of(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(node).iter().rev().copied());
        Some(node)
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
