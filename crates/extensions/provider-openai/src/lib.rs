//! OpenAI-compatible completion provider for TransAssist.
//!
//! Any endpoint speaking the `/v1/chat/completions` wire format works,
//! so the same provider serves the OpenAI, Anthropic and Google presets
//! as well as custom URLs.

mod api;
mod provider;

pub use provider::{DEFAULT_API_URL, OpenAIProvider};
