//! Error types for the kubejobs protocol layer.

mod kind;

pub use kind::*;
