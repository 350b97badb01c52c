//! Error types for the TransAssist protocol layer.

mod provider;
mod translate;

pub use provider::*;
pub use translate::*;
