//! DOM and selector errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("HTML parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Selector(#[from] SelectorError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    #[error("Invalid selector `{selector}` at column {column}: {reason}")]
    Invalid {
        selector: String,
        column: u32,
        reason: String,
    },

    #[error("Unsupported pseudo-class ':{0}'")]
    UnsupportedPseudo(String),
}
