//! Registry errors.

use thiserror::Error;
use transassist_config::ConfigError;
use transassist_dom::SelectorError;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Invalid selector for {host} ({field}): {source}")]
    InvalidSelector {
        host: String,
        field: &'static str,
        #[source]
        source: SelectorError,
    },

    #[error("No 'default' site profile")]
    MissingDefault,

    #[error("Alias {host} points at unknown site {target}")]
    UnknownAliasTarget { host: String, target: String },

    #[error("'{0}' cannot be used as an alias host")]
    ReservedHost(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
