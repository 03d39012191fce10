//! Data model shared across the kubejobs crates.

mod defaults;
mod info;
mod kind;
mod metadata;
mod request;

pub use defaults::*;
pub use info::*;
pub use kind::*;
pub use metadata::*;
pub use request::*;
