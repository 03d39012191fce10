//! # kubejobs protocols
//!
//! Shared data model, the [`JobKindHandler`] trait and the pure manifest
//! builder. Nothing in this crate performs I/O.

pub mod error;
pub mod handler;
pub mod manifest;
pub mod types;

pub use error::KindError;
pub use handler::JobKindHandler;
pub use types::*;
