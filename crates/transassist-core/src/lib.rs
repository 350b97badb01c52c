//! # TransAssist Core
//!
//! The site adaptation layer: decides whether a page is supported, finds
//! translation inputs and their source text in foreign markup, attaches the
//! translate/apply controls and keeps them in step with a mutating page.
//!
//! ## Components
//!
//! - [`SiteRegistry`] - hostname to [`SiteConfig`] resolution
//! - [`locator`] - ordered source-text extraction strategies
//! - [`discovery`] - candidate target inputs and their validation
//! - [`Injector`] - control attachment, apply and site-wide cleanup
//! - [`MutationWatcher`] - relevance filter, debounce and rescan throttle
//! - [`TranslationAssistant`] - the owned page controller tying them together

pub mod assistant;
pub mod discovery;
pub mod error;
pub mod injector;
pub mod locator;
pub mod notifier;
pub mod registry;
pub mod watcher;

pub use assistant::{ScanReport, TranslateOutcome, TranslationAssistant};
pub use discovery::{discover_targets, is_valid_target};
pub use error::RegistryError;
pub use injector::{ATTACHMENT_MARKER, Control, ControlState, Injector, OWN_CONTAINER_CLASS};
pub use locator::find_source_text;
pub use notifier::{Notifier, TracingNotifier};
pub use registry::{SiteConfig, SiteProfile, SiteRegistry};
pub use watcher::MutationWatcher;
