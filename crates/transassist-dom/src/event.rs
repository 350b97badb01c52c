//! Synthetic DOM events.

use crate::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Input,
    Change,
    Click,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Change => "change",
            Self::Click => "click",
        }
    }
}

/// An event as seen by a listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub kind: EventKind,
    /// Node the event was dispatched on.
    pub target: NodeId,
    /// Node whose listener is running (differs from `target` while bubbling).
    pub current_target: NodeId,
    pub bubbles: bool,
}

pub type Listener = Box<dyn FnMut(&DomEvent)>;
