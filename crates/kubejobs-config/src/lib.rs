//! # kubejobs config
//!
//! Configuration for the kubejobs service: a TOML file with `${VAR}`
//! expansion, environment overrides on top, then validation.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::{ConfigLoader, DEFAULT_CONFIG_PATH};
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
