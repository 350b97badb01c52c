//! CSS selectors over a [`Document`], parsed and matched by the `selectors`
//! crate.

use std::fmt;
use std::str::FromStr;

use cssparser::{ParseError, ParseErrorKind, ParserInput, ToCss};
use selectors::attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint};
use selectors::matching::{
    self, ElementSelectorFlags, IgnoreNthChildForInvalidation, MatchingContext, MatchingMode,
    NeedsSelectorFlags, QuirksMode,
};
use selectors::parser::{self, ParseRelative, SelectorImpl, SelectorParseErrorKind};
use selectors::{Element, NthIndexCache, OpaqueElement};

use crate::error::SelectorError;
use crate::{Document, NodeId};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// A parsed, comma-separated selector list.
#[derive(Clone)]
pub struct SelectorList {
    source: String,
    selectors: selectors::SelectorList<PageSelectors>,
}

impl SelectorList {
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut input = ParserInput::new(source);
        let mut css = cssparser::Parser::new(&mut input);
        let selectors = selectors::SelectorList::parse(&PageParser, &mut css, ParseRelative::No)
            .map_err(|e| parse_error(source, e))?;
        Ok(Self {
            source: source.to_string(),
            selectors,
        })
    }

    /// The selector text as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub(crate) fn matches(&self, doc: &Document, node: NodeId) -> bool {
        if !doc.is_element(node) {
            return false;
        }
        let element = PageElement { doc, id: node };
        let mut nth_index_cache = NthIndexCache::default();
        let mut context = MatchingContext::new(
            MatchingMode::Normal,
            None,
            &mut nth_index_cache,
            QuirksMode::NoQuirks,
            NeedsSelectorFlags::No,
            IgnoreNthChildForInvalidation::No,
        );
        self.selectors
            .0
            .iter()
            .any(|s| matching::matches_selector(s, 0, None, &element, &mut context))
    }
}

impl fmt::Debug for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SelectorList").field(&self.source).finish()
    }
}

impl PartialEq for SelectorList {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for SelectorList {}

impl FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_error<'i>(source: &str, err: ParseError<'i, SelectorParseErrorKind<'i>>) -> SelectorError {
    let reason = match err.kind {
        ParseErrorKind::Custom(SelectorParseErrorKind::UnsupportedPseudoClassOrElement(name)) => {
            return SelectorError::UnsupportedPseudo(String::from(&*name));
        }
        ParseErrorKind::Custom(SelectorParseErrorKind::EmptySelector) => {
            "empty entry in selector list".to_string()
        }
        ParseErrorKind::Custom(SelectorParseErrorKind::DanglingCombinator) => {
            "combinator without a selector after it".to_string()
        }
        ParseErrorKind::Custom(kind) => format!("{kind:?}"),
        ParseErrorKind::Basic(kind) => kind.to_string(),
    };
    SelectorError::Invalid {
        selector: source.to_string(),
        column: err.location.column,
        reason,
    }
}

// ---- selector implementation ----

/// Pages carry no pseudo-classes or pseudo-elements of their own; only the
/// tree-structural ones built into the parser are available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelectors;

impl SelectorImpl for PageSelectors {
    type ExtraMatchingData<'a> = ();
    type AttrValue = CssString;
    type Identifier = CssIdent;
    type LocalName = CssIdent;
    type NamespaceUrl = CssString;
    type NamespacePrefix = CssIdent;
    type BorrowedNamespaceUrl = CssString;
    type BorrowedLocalName = CssIdent;
    type NonTSPseudoClass = PseudoClass;
    type PseudoElement = PseudoElement;
}

struct PageParser;

impl<'i> parser::Parser<'i> for PageParser {
    type Impl = PageSelectors;
    type Error = SelectorParseErrorKind<'i>;
}

/// A quoted value: attribute values and namespace URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssString(String);

impl From<&str> for CssString {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for CssString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ToCss for CssString {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        cssparser::serialize_string(&self.0, dest)
    }
}

/// An identifier: tag names, ids, classes and attribute names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssIdent(String);

impl From<&str> for CssIdent {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl ToCss for CssIdent {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        cssparser::serialize_identifier(&self.0, dest)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PseudoClass {}

impl parser::NonTSPseudoClass for PseudoClass {
    type Impl = PageSelectors;

    fn is_active_or_hover(&self) -> bool {
        match *self {}
    }

    fn is_user_action_state(&self) -> bool {
        match *self {}
    }
}

impl ToCss for PseudoClass {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PseudoElement {}

impl parser::PseudoElement for PseudoElement {
    type Impl = PageSelectors;
}

impl ToCss for PseudoElement {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

// ---- element view ----

/// An element of a [`Document`] as seen by the matcher.
#[derive(Clone, Copy)]
struct PageElement<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl fmt::Debug for PageElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PageElement").field(&self.id).finish()
    }
}

impl<'a> PageElement<'a> {
    fn at(&self, id: NodeId) -> Self {
        Self { doc: self.doc, id }
    }

    fn siblings(&self) -> &'a [NodeId] {
        let doc = self.doc;
        doc.parent(self.id)
            .map(|p| doc.children(p))
            .unwrap_or_default()
    }

    fn position(&self) -> usize {
        self.siblings()
            .iter()
            .position(|&n| n == self.id)
            .unwrap_or_default()
    }
}

impl Element for PageElement<'_> {
    type Impl = PageSelectors;

    fn opaque(&self) -> OpaqueElement {
        OpaqueElement::new(self.doc.node(self.id))
    }

    fn parent_element(&self) -> Option<Self> {
        self.doc.parent_element(self.id).map(|p| self.at(p))
    }

    fn parent_node_is_shadow_root(&self) -> bool {
        false
    }

    fn containing_shadow_host(&self) -> Option<Self> {
        None
    }

    fn is_pseudo_element(&self) -> bool {
        false
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        self.siblings()[..self.position()]
            .iter()
            .rev()
            .find(|&&n| self.doc.is_element(n))
            .map(|&n| self.at(n))
    }

    fn next_sibling_element(&self) -> Option<Self> {
        self.siblings()
            .iter()
            .skip(self.position() + 1)
            .find(|&&n| self.doc.is_element(n))
            .map(|&n| self.at(n))
    }

    fn first_element_child(&self) -> Option<Self> {
        self.doc
            .children(self.id)
            .iter()
            .find(|&&n| self.doc.is_element(n))
            .map(|&n| self.at(n))
    }

    fn is_html_element_in_html_document(&self) -> bool {
        true
    }

    fn has_local_name(&self, local_name: &CssIdent) -> bool {
        self.doc.tag_name(self.id) == Some(local_name.0.as_str())
    }

    fn has_namespace(&self, ns: &CssString) -> bool {
        ns.0 == HTML_NAMESPACE
    }

    fn is_same_type(&self, other: &Self) -> bool {
        self.doc.tag_name(self.id) == other.doc.tag_name(other.id)
    }

    fn attr_matches(
        &self,
        ns: &NamespaceConstraint<&CssString>,
        local_name: &CssIdent,
        operation: &AttrSelectorOperation<&CssString>,
    ) -> bool {
        if let NamespaceConstraint::Specific(url) = ns {
            if !url.0.is_empty() {
                return false;
            }
        }
        self.doc
            .attr(self.id, &local_name.0)
            .is_some_and(|value| operation.eval_str(value))
    }

    fn match_non_ts_pseudo_class(
        &self,
        pc: &PseudoClass,
        _context: &mut MatchingContext<'_, PageSelectors>,
    ) -> bool {
        match *pc {}
    }

    fn match_pseudo_element(
        &self,
        pe: &PseudoElement,
        _context: &mut MatchingContext<'_, PageSelectors>,
    ) -> bool {
        match *pe {}
    }

    fn apply_selector_flags(&self, _flags: ElementSelectorFlags) {}

    fn is_link(&self) -> bool {
        matches!(self.doc.tag_name(self.id), Some("a" | "area" | "link"))
            && self.doc.has_attr(self.id, "href")
    }

    fn is_html_slot_element(&self) -> bool {
        false
    }

    fn has_id(&self, id: &CssIdent, case_sensitivity: CaseSensitivity) -> bool {
        self.doc
            .attr(self.id, "id")
            .is_some_and(|value| case_sensitivity.eq(value.as_bytes(), id.0.as_bytes()))
    }

    fn has_class(&self, name: &CssIdent, case_sensitivity: CaseSensitivity) -> bool {
        self.doc
            .class_name(self.id)
            .split_ascii_whitespace()
            .any(|class| case_sensitivity.eq(class.as_bytes(), name.0.as_bytes()))
    }

    fn imported_part(&self, _name: &CssIdent) -> Option<CssIdent> {
        None
    }

    fn is_part(&self, _name: &CssIdent) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        self.doc.children(self.id).iter().all(|&n| {
            !self.doc.is_element(n) && self.doc.text_of(n).is_none_or(str::is_empty)
        })
    }

    fn is_root(&self) -> bool {
        self.doc.parent(self.id) == Some(self.doc.root())
    }
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
