//! Error types for the core layer.

use std::time::Duration;
use thiserror::Error;

use kubejobs_cluster::ClusterError;
use kubejobs_protocols::{JobKind, JobStatus, KindError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Handler for kind '{actual}' cannot be registered as '{expected}'")]
    KindMismatch { expected: JobKind, actual: JobKind },

    #[error("Job kind already registered: {0}")]
    AlreadyRegistered(JobKind),

    #[error("Job kind not registered: {0}")]
    NotRegistered(JobKind),
}

/// Caller-facing error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidConfig,
    InvalidArgument,
    NotFound,
    Internal,
}

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Job configuration is required")]
    MissingConfig,

    #[error("Unsupported job kind: {0}")]
    UnknownKind(JobKind),

    #[error(transparent)]
    Kind(#[from] KindError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Job not found: {0}")]
    NotFound(String),

    #[error("Job {job_id} is already {status} and cannot be cancelled")]
    TerminalState { job_id: String, status: JobStatus },

    /// `target` is the job id, or the namespace for list calls.
    #[error("Cluster {operation} failed for {target}: {source}")]
    Cluster {
        operation: &'static str,
        target: String,
        #[source]
        source: ClusterError,
    },

    #[error("Cluster {operation} for {target} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        target: String,
        after: Duration,
    },

    #[error("Unreadable job object: {0}")]
    Conversion(String),
}

impl JobError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingConfig | Self::UnknownKind(_) | Self::Kind(_) => ErrorKind::InvalidConfig,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Cluster { source, .. } if source.is_not_found() => ErrorKind::NotFound,
            Self::TerminalState { .. }
            | Self::Cluster { .. }
            | Self::Timeout { .. }
            | Self::Conversion(_) => ErrorKind::Internal,
        }
    }
}
