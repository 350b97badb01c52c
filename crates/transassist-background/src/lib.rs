//! # TransAssist Background
//!
//! The privileged half of the assistant. It owns the user's settings and
//! the completion provider, answers the content side's messages and
//! decides whether a page gets the assistant at all.
//!
//! - [`BackgroundService`] - message handling, injection decision, force-enable list
//! - [`prompt`] - prompt rendering from settings
//! - [`serve_lines`] - newline-delimited JSON transport for the service

pub mod prompt;

mod provider;
mod service;
mod stdio;

pub use provider::ProviderFactory;
pub use service::BackgroundService;
pub use stdio::serve_lines;
