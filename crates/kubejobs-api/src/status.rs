//! RPC status codes returned by the facade.

use kubejobs_core::{ErrorKind, JobError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-visible failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RpcCode {
    InvalidArgument,
    NotFound,
    Internal,
}

impl RpcCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
        }
    }
}

impl From<ErrorKind> for RpcCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidConfig | ErrorKind::InvalidArgument => Self::InvalidArgument,
            ErrorKind::NotFound => Self::NotFound,
            ErrorKind::Internal => Self::Internal,
        }
    }
}

impl fmt::Display for RpcCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed RPC: a code plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcStatus {
    pub code: RpcCode,
    pub message: String,
}

impl RpcStatus {
    pub fn new(code: RpcCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(RpcCode::InvalidArgument, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(RpcCode::NotFound, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(RpcCode::Internal, message)
    }

    /// Wrap a job error, prefixing its message with what was being attempted.
    pub fn from_job_error(context: &str, err: &JobError) -> Self {
        Self::new(err.kind().into(), format!("{context}: {err}"))
    }
}

impl From<JobError> for RpcStatus {
    fn from(err: JobError) -> Self {
        Self::new(err.kind().into(), err.to_string())
    }
}

impl fmt::Display for RpcStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for RpcStatus {}

#[cfg(test)]
mod tests {
    use super::*;
    use kubejobs_protocols::{JobKind, JobStatus, KindError};

    #[test]
    fn test_code_from_error_kind() {
        assert_eq!(RpcCode::from(ErrorKind::InvalidConfig), RpcCode::InvalidArgument);
        assert_eq!(RpcCode::from(ErrorKind::InvalidArgument), RpcCode::InvalidArgument);
        assert_eq!(RpcCode::from(ErrorKind::NotFound), RpcCode::NotFound);
        assert_eq!(RpcCode::from(ErrorKind::Internal), RpcCode::Internal);
    }

    #[test]
    fn test_status_from_job_error() {
        let status = RpcStatus::from(JobError::Kind(KindError::invalid("duration out of range")));
        assert_eq!(status.code, RpcCode::InvalidArgument);
        assert!(status.message.contains("duration out of range"));

        let status = RpcStatus::from(JobError::UnknownKind(JobKind::from("weather")));
        assert_eq!(status.code, RpcCode::InvalidArgument);

        let status = RpcStatus::from(JobError::NotFound("job-1".to_string()));
        assert_eq!(status.code, RpcCode::NotFound);
    }

    #[test]
    fn test_terminal_state_is_internal() {
        let err = JobError::TerminalState {
            job_id: "job-1".to_string(),
            status: JobStatus::Succeeded,
        };
        let status = RpcStatus::from_job_error("failed to cancel job", &err);
        assert_eq!(status.code, RpcCode::Internal);
        assert!(status.message.starts_with("failed to cancel job: "));
        assert!(status.message.contains("succeeded"));
    }

    #[test]
    fn test_code_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&RpcCode::InvalidArgument).unwrap(),
            "\"invalid_argument\""
        );
        assert_eq!(RpcCode::NotFound.to_string(), "not_found");
    }
}
