//! Cluster connection configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which cluster client backs the service.
pub const BACKEND_CLUSTER: &str = "cluster";
pub const BACKEND_MEMORY: &str = "memory";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KubernetesConfig {
    /// Namespace used when a request names none.
    #[serde(default = "default_namespace")]
    pub default_namespace: String,

    /// Use the pod service account instead of a kubeconfig.
    #[serde(default = "default_in_cluster")]
    pub in_cluster: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig_path: Option<String>,

    /// Seconds finished jobs are kept before the orchestrator removes them.
    #[serde(default = "default_job_ttl")]
    pub job_ttl_seconds: i32,

    /// Upper bound on every cluster call.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// `cluster` or `memory`.
    #[serde(default = "default_backend")]
    pub backend: String,
}

impl KubernetesConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for KubernetesConfig {
    fn default() -> Self {
        Self {
            default_namespace: default_namespace(),
            in_cluster: default_in_cluster(),
            kubeconfig_path: None,
            job_ttl_seconds: default_job_ttl(),
            request_timeout_seconds: default_request_timeout(),
            backend: default_backend(),
        }
    }
}

fn default_namespace() -> String {
    "default".to_string()
}

fn default_in_cluster() -> bool {
    true
}

fn default_job_ttl() -> i32 {
    86400
}

fn default_request_timeout() -> u64 {
    30
}

fn default_backend() -> String {
    BACKEND_CLUSTER.to_string()
}
