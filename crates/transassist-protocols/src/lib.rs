//! # TransAssist Protocols
//!
//! Contracts shared between the content-side controller, the background
//! service and the completion providers. Contains interface definitions and
//! wire types only - no implementations.
//!
//! ## Core Traits
//!
//! - [`CompletionProvider`] - Chat-completion backends (OpenAI-compatible APIs)
//! - [`TranslationBridge`] - Content-side view of the background service

pub mod bridge;
pub mod error;
pub mod provider;

pub use bridge::{BridgeRequest, BridgeResponse, TranslationBridge};
pub use error::{ErrorKind, ProviderError, TranslateError};
pub use provider::{CompletionProvider, CompletionRequest, CompletionResponse, Message, MessageRole};
