//! Site-wide job defaults.

use serde::{Deserialize, Serialize};

/// Fallback values applied to every manifest. Read-only after start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDefaults {
    pub namespace: String,
    pub cpu_request: String,
    pub memory_request: String,
    pub cpu_limit: String,
    pub memory_limit: String,
    /// Registry prefix for handler default images. Empty means none.
    pub registry: String,
    /// Seconds a finished object is retained. Zero disables the TTL.
    pub ttl_seconds_after_finished: i32,
    pub restart_policy: String,
    pub backoff_limit: i32,
    pub parallelism: i32,
    pub completions: i32,
    pub completion_mode: String,
}

impl Default for JobDefaults {
    fn default() -> Self {
        Self {
            namespace: "default".to_string(),
            cpu_request: "100m".to_string(),
            memory_request: "64Mi".to_string(),
            cpu_limit: "200m".to_string(),
            memory_limit: "128Mi".to_string(),
            registry: String::new(),
            ttl_seconds_after_finished: 86400,
            restart_policy: "Never".to_string(),
            backoff_limit: 3,
            parallelism: 1,
            completions: 1,
            completion_mode: "NonIndexed".to_string(),
        }
    }
}
