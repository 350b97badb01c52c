//! UI injector: the translate/apply control attached next to a target input.

use std::sync::LazyLock;

use tracing::{debug, info, warn};
use transassist_config::{ButtonPosition, UiStrings};
use transassist_dom::{Document, EventKind, NodeId, SelectorList};

use crate::registry::SiteConfig;

/// Attribute set on a target input once a control is attached to it.
pub const ATTACHMENT_MARKER: &str = "data-llm-assistant-added";

/// Class carried by every injected container.
pub const OWN_CONTAINER_CLASS: &str = "llm-assistant-container";

static OWN_CONTAINER: LazyLock<SelectorList> = LazyLock::new(|| {
    SelectorList::parse(&format!(".{OWN_CONTAINER_CLASS}")).expect("container selector")
});

/// Whether `node` is, or sits inside, one of our injected containers.
pub fn is_own_ui(doc: &Document, node: NodeId) -> bool {
    doc.closest(node, &OWN_CONTAINER).is_some()
}

const HIDDEN: &str = "display: none;";
const SHOWN: &str = "display: block;";

/// Where a control is in its translate cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Idle,
    Requesting,
    ShowingResult,
}

/// One injected control and the nodes it is made of.
#[derive(Debug, Clone)]
pub struct Control {
    pub target: NodeId,
    pub index: usize,
    pub container: NodeId,
    pub translate_button: NodeId,
    pub result_panel: NodeId,
    pub source_content: NodeId,
    pub result_text: NodeId,
    pub apply_button: NodeId,
    pub state: ControlState,
}

/// Owns the controls attached to one document.
#[derive(Debug)]
pub struct Injector {
    strings: UiStrings,
    controls: Vec<Control>,
}

impl Injector {
    pub fn new(strings: UiStrings) -> Self {
        Self {
            strings,
            controls: Vec::new(),
        }
    }

    pub fn strings(&self) -> &UiStrings {
        &self.strings
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn control_for(&self, target: NodeId) -> Option<&Control> {
        self.controls.iter().find(|c| c.target == target)
    }

    fn control_mut(&mut self, target: NodeId) -> Option<&mut Control> {
        self.controls.iter_mut().find(|c| c.target == target)
    }

    pub fn is_attached(doc: &Document, target: NodeId) -> bool {
        doc.has_attr(target, ATTACHMENT_MARKER)
    }

    /// Attach a control to `target`. Returns `false` without touching the
    /// document if the target is already marked or has no parent to host
    /// the control.
    pub fn attach(
        &mut self,
        doc: &mut Document,
        target: NodeId,
        index: usize,
        config: &SiteConfig,
    ) -> bool {
        if Self::is_attached(doc, target) {
            return false;
        }
        let Some(parent) = doc.parent(target) else {
            warn!("Target input has no parent, skipping");
            return false;
        };
        doc.set_attr(target, ATTACHMENT_MARKER, "true");

        let ui = &config.profile().ui;
        let container_class = format!("{OWN_CONTAINER_CLASS} {}", ui.container_class);
        let button_class = format!("llm-translate-btn {}", ui.button_class);
        let index_attr = index.to_string();

        let container = element(doc, "div", &[("class", container_class.as_str())]);
        let translate_button = element(
            doc,
            "button",
            &[
                ("type", "button"),
                ("class", button_class.as_str()),
                ("data-textarea-index", index_attr.as_str()),
            ],
        );
        doc.set_text_content(translate_button, &self.strings.translate_button);

        let result_panel = element(
            doc,
            "div",
            &[("class", "llm-result-container"), ("style", HIDDEN)],
        );
        let source_line = element(doc, "div", &[("class", "llm-source-text")]);
        let label = element(doc, "strong", &[]);
        doc.set_text_content(label, &self.strings.original_label);
        let gap = doc.create_text(" ");
        let source_content = element(doc, "span", &[("class", "llm-source-content")]);
        let result_text = element(doc, "div", &[("class", "llm-result-text")]);
        let apply_button = element(
            doc,
            "button",
            &[("type", "button"), ("class", "llm-apply-btn")],
        );
        doc.set_text_content(apply_button, &self.strings.apply_button);

        for child in [label, gap, source_content] {
            doc.append_child(source_line, child);
        }
        for child in [source_line, result_text, apply_button] {
            doc.append_child(result_panel, child);
        }
        doc.append_child(container, translate_button);
        doc.append_child(container, result_panel);

        match config.button_position() {
            ButtonPosition::Before => doc.insert_before(parent, container, Some(target)),
            ButtonPosition::After => {
                let next = doc.next_sibling(target);
                doc.insert_before(parent, container, next);
            }
            ButtonPosition::Inside => doc.append_child(parent, container),
        }

        self.controls.push(Control {
            target,
            index,
            container,
            translate_button,
            result_panel,
            source_content,
            result_text,
            apply_button,
            state: ControlState::Idle,
        });
        info!("Attached translate control #{} on {}", index, config.name());
        true
    }

    /// Enter `requesting`: show the captured source, disable and relabel
    /// the button. Returns `false` if there is no control or a request is
    /// already in flight.
    pub fn begin_request(&mut self, doc: &mut Document, target: NodeId, source_text: &str) -> bool {
        let translating = self.strings.translating.clone();
        let Some(control) = self.control_mut(target) else {
            return false;
        };
        if control.state == ControlState::Requesting {
            return false;
        }
        control.state = ControlState::Requesting;
        doc.set_text_content(control.source_content, source_text);
        doc.set_text_content(control.translate_button, &translating);
        doc.set_attr(control.translate_button, "disabled", "");
        doc.set_attr(control.result_panel, "style", SHOWN);
        true
    }

    /// Leave `requesting`. The button is re-enabled and relabelled whatever
    /// the outcome; a translation is shown in the result panel.
    pub fn finish_request(&mut self, doc: &mut Document, target: NodeId, translation: Option<&str>) {
        let label = self.strings.translate_button.clone();
        let Some(control) = self.control_mut(target) else {
            return;
        };
        doc.set_text_content(control.translate_button, &label);
        doc.remove_attr(control.translate_button, "disabled");
        match translation {
            Some(text) => {
                doc.set_text_content(control.result_text, text);
                control.state = ControlState::ShowingResult;
            }
            None => control.state = ControlState::Idle,
        }
    }

    /// Write the shown translation into the target, fire bubbling `input`
    /// and `change` events, then collapse the result panel.
    pub fn apply(&mut self, doc: &mut Document, target: NodeId) -> bool {
        let Some(control) = self.control_mut(target) else {
            return false;
        };
        let text = doc.text_content(control.result_text);
        doc.set_value(target, &text);
        doc.dispatch_event(target, EventKind::Input, true);
        doc.dispatch_event(target, EventKind::Change, true);
        doc.set_attr(control.result_panel, "style", HIDDEN);
        control.state = ControlState::Idle;
        debug!("Applied translation to control #{}", control.index);
        true
    }

    /// Remove every injected container and every attachment marker in the
    /// document, including ones this injector did not create.
    pub fn cleanup(&mut self, doc: &mut Document) {
        let root = doc.root();
        let stale: Vec<NodeId> = doc
            .descendants(root)
            .filter(|&n| doc.has_class(n, OWN_CONTAINER_CLASS))
            .collect();
        for container in &stale {
            doc.remove(*container);
        }
        let marked: Vec<NodeId> = doc
            .descendants(root)
            .filter(|&n| doc.has_attr(n, ATTACHMENT_MARKER))
            .collect();
        for node in &marked {
            doc.remove_attr(*node, ATTACHMENT_MARKER);
        }
        for control in self.controls.drain(..) {
            doc.remove(control.container);
            doc.remove_attr(control.target, ATTACHMENT_MARKER);
        }
        info!(
            "Removed {} controls and {} markers",
            stale.len(),
            marked.len()
        );
    }

    /// Drop controls whose target or container has left the document. The
    /// target's marker is cleared so it can be decorated again if it
    /// comes back.
    pub fn prune_orphans(&mut self, doc: &mut Document) -> usize {
        let (orphans, live): (Vec<Control>, Vec<Control>) =
            self.controls.drain(..).partition(|c| {
                !doc.is_connected(c.target) || !doc.is_connected(c.container)
            });
        self.controls = live;
        for control in &orphans {
            doc.remove(control.container);
            doc.remove_attr(control.target, ATTACHMENT_MARKER);
        }
        if !orphans.is_empty() {
            debug!("Pruned {} orphaned controls", orphans.len());
        }
        orphans.len()
    }
}

fn element(doc: &mut Document, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let node = doc.create_element(tag);
    for (name, value) in attrs {
        doc.set_attr(node, name, value);
    }
    node
}

#[cfg(test)]
#[path = "injector_tests.rs"]
mod tests;
