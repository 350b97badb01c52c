//! HTML import (html5ever) and serialisation.

use std::io;

use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope, serialize};
use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, QualName, namespace_url, ns, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::DomError;
use crate::{Document, NodeId};

/// Parse an HTML page into a [`Document`].
///
/// Comments, doctypes and processing instructions are dropped; the returned
/// document is not observing mutations yet.
pub fn parse_html(html: &str) -> Result<Document, DomError> {
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| DomError::Parse(e.to_string()))?;

    let mut doc = Document::new();
    let root = doc.root();
    for child in dom.document.children.borrow().iter() {
        import_node(&mut doc, root, child);
    }
    Ok(doc)
}

fn import_node(doc: &mut Document, parent: NodeId, handle: &Handle) {
    match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let element = doc.create_element(&name.local);
            for attr in attrs.borrow().iter() {
                doc.set_attr(element, &attr.name.local, &attr.value);
            }
            doc.append_child(parent, element);
            for child in handle.children.borrow().iter() {
                import_node(doc, element, child);
            }
        }
        NodeData::Text { contents } => {
            let text = doc.create_text(&contents.borrow());
            doc.append_child(parent, text);
        }
        _ => {}
    }
}

impl Document {
    /// Serialise the whole document.
    pub fn to_html(&self) -> String {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_html(&mut out);
        String::from_utf8_lossy(&out).into_owned()
    }

    /// Serialise the whole document into `writer`.
    pub fn write_html<W: io::Write>(&self, writer: W) -> io::Result<()> {
        let page = PageNode {
            doc: self,
            node: self.root(),
        };
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::IncludeNode,
            ..Default::default()
        };
        serialize(writer, &page, opts)
    }

    /// Serialise `node` and its subtree. Form controls are written with
    /// their live value.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = Vec::new();
        let page = PageNode { doc: self, node };
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::IncludeNode,
            ..Default::default()
        };
        let _ = serialize(&mut out, &page, opts);
        String::from_utf8_lossy(&out).into_owned()
    }

    fn serialize_node<S: Serializer>(&self, node: NodeId, serializer: &mut S) -> io::Result<()> {
        if let Some(text) = self.text_of(node) {
            return serializer.write_text(text);
        }
        let Some(tag) = self.tag_name(node) else {
            if self
                .children(node)
                .iter()
                .any(|&c| self.tag_name(c) == Some("html"))
            {
                serializer.write_doctype("html")?;
            }
            return self.serialize_children(node, serializer);
        };

        let name = QualName::new(None, ns!(html), LocalName::from(tag));
        let attrs = self.serialized_attrs(node, tag);
        serializer.start_elem(name.clone(), attrs.iter().map(|(k, v)| (k, v.as_str())))?;
        if tag == "textarea" {
            serializer.write_text(&self.value(node))?;
        } else {
            self.serialize_children(node, serializer)?;
        }
        serializer.end_elem(name)
    }

    fn serialize_children<S: Serializer>(
        &self,
        node: NodeId,
        serializer: &mut S,
    ) -> io::Result<()> {
        for &child in self.children(node) {
            self.serialize_node(child, serializer)?;
        }
        Ok(())
    }

    /// Attributes as written, with an input's `value` replaced by its live
    /// value.
    fn serialized_attrs(&self, node: NodeId, tag: &str) -> Vec<(QualName, String)> {
        let attr_name = |name: &str| QualName::new(None, ns!(), LocalName::from(name));
        let is_input = tag == "input";
        let mut attrs: Vec<_> = self
            .attrs(node)
            .iter()
            .filter(|(name, _)| !(is_input && name == "value"))
            .map(|(name, value)| (attr_name(name), value.clone()))
            .collect();
        if is_input {
            let value = self.value(node);
            if !value.is_empty() || self.has_attr(node, "value") {
                attrs.push((attr_name("value"), value));
            }
        }
        attrs
    }
}

/// A subtree of a [`Document`] handed to html5ever's serializer.
struct PageNode<'a> {
    doc: &'a Document,
    node: NodeId,
}

impl Serialize for PageNode<'_> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        match traversal_scope {
            TraversalScope::IncludeNode => self.doc.serialize_node(self.node, serializer),
            TraversalScope::ChildrenOnly(_) => self.doc.serialize_children(self.node, serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SelectorList;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_builds_body() {
        let doc = parse_html("<p class=\"x\">Hi</p>").unwrap();
        let body = doc.body();
        assert_eq!(doc.tag_name(body), Some("body"));
        let p = doc
            .query_selector(body, &SelectorList::parse("p.x").unwrap())
            .unwrap();
        assert_eq!(doc.text_content(p), "Hi");
    }

    #[test]
    fn test_parse_keeps_attributes_and_textarea_text() {
        let doc = parse_html(
            r#"<form><textarea readonly data-clone-value="Hello &amp; bye">Hello</textarea></form>"#,
        )
        .unwrap();
        let ta = doc
            .query_selector(doc.root(), &SelectorList::parse("textarea").unwrap())
            .unwrap();
        assert!(doc.is_readonly(ta));
        assert_eq!(doc.attr(ta, "data-clone-value"), Some("Hello & bye"));
        assert_eq!(doc.value(ta), "Hello");
    }

    #[test]
    fn test_parse_is_not_observed() {
        let mut doc = parse_html("<div><span>a</span></div>").unwrap();
        assert!(doc.take_records().is_empty());
    }

    #[test]
    fn test_outer_html_writes_live_values() {
        let mut doc = parse_html(r#"<div><textarea name="t">old</textarea><input value="a"></div>"#)
            .unwrap();
        let ta = doc
            .query_selector(doc.root(), &SelectorList::parse("textarea").unwrap())
            .unwrap();
        let input = doc
            .query_selector(doc.root(), &SelectorList::parse("input").unwrap())
            .unwrap();
        doc.set_value(ta, "new <text>");
        doc.set_value(input, "b\"c");

        let div = doc.parent(ta).unwrap();
        assert_eq!(
            doc.outer_html(div),
            r#"<div><textarea name="t">new &lt;text&gt;</textarea><input value="b&quot;c"></div>"#
        );
    }

    #[test]
    fn test_to_html_has_doctype() {
        let doc = parse_html("<p>x</p>").unwrap();
        let html = doc.to_html();
        assert!(html.starts_with("<!DOCTYPE html><html>"));
        assert!(html.contains("<body><p>x</p></body>"));
    }
}
