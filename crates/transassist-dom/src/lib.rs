//! Document scope for TransAssist.
//!
//! The site-adaptation layer never touches a browser directly. It is handed a
//! [`Document`]: an arena-backed tree with the small slice of the DOM it
//! needs: attribute and text access, live form values, CSS selectors,
//! mutation records and synthetic events. Pages are loaded with
//! [`parse_html`] (html5ever) and written back with [`Document::to_html`].
//!
//! ## Selectors
//!
//! [`SelectorList`] is parsed and matched by the `selectors` crate, the
//! engine behind browser and scraper selector matching. Type, id, class,
//! attribute, combinator, `:not()` and the structural pseudo-classes
//! are available. Anything that needs live browser state (`:hover`,
//! `:checked`, pseudo-elements) is rejected when a site config is loaded
//! rather than silently matching nothing.

mod document;
mod error;
mod event;
mod html;
mod mutation;
mod node;
mod query;
mod selector;

pub use document::{Descendants, Document};
pub use error::{DomError, SelectorError};
pub use event::{DomEvent, EventKind, Listener};
pub use html::parse_html;
pub use mutation::MutationRecord;
pub use node::NodeId;
pub use selector::SelectorList;
