//! Completion provider protocol definitions.
//!
//! Providers connect to chat-completion APIs (OpenAI and compatible
//! endpoints) and turn a prompt into a single completion string.

mod request;
mod response;
mod traits;

pub use request::*;
pub use response::*;
pub use traits::*;
