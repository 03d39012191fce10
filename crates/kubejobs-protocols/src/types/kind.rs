//! Job kind identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a job kind ("timer", later "weather", "healthcheck").
///
/// Immutable once a handler has been registered under it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobKind(String);

impl JobKind {
    /// Identifier of the timer kind.
    pub const TIMER: &'static str = "timer";

    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn timer() -> Self {
        Self::new(Self::TIMER)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}
