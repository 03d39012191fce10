//! Job kind handler errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KindError {
    #[error("Invalid job configuration: {0}")]
    InvalidConfig(String),

    #[error("Job has no containers")]
    MissingContainer,

    #[error("Failed to extract job details: {0}")]
    Extraction(String),
}

impl KindError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
