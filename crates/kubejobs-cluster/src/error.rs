//! Cluster client errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClusterError {
    #[error("Job not found: {namespace}/{name}")]
    NotFound { namespace: String, name: String },

    #[error("Job already exists: {namespace}/{name}")]
    AlreadyExists { namespace: String, name: String },

    #[error("Invalid job object: {0}")]
    InvalidObject(String),

    #[error("Cluster request '{operation}' failed: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },

    #[error("Cluster connection failed: {0}")]
    Connection(String),
}

impl ClusterError {
    pub fn request(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Request {
            operation,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = ClusterError::NotFound {
            namespace: "default".to_string(),
            name: "timer-job-1".to_string(),
        };
        assert!(err.to_string().contains("default/timer-job-1"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_request_display() {
        let err = ClusterError::request("create", "connection reset");
        assert!(err.to_string().contains("'create'"));
        assert!(err.to_string().contains("connection reset"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_connection_display() {
        let err = ClusterError::Connection("no route".to_string());
        assert!(err.to_string().contains("connection failed"));
    }
}
