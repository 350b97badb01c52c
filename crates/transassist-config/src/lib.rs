//! # TransAssist Config
//!
//! Application configuration, the declarative site catalog and persistent
//! user settings for TransAssist.

mod error;
mod loader;
mod schema;
mod settings;
mod store;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use settings::{
    ApiProvider, GlossaryEntry, PromptTemplate, ProviderPreset, Settings, default_prompts,
};
pub use store::{JsonFileStore, MemoryStore, SettingsStore};
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
