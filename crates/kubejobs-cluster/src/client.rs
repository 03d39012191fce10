use async_trait::async_trait;
use k8s_openapi::api::batch::v1::Job;
use std::collections::BTreeMap;

use crate::ClusterError;

/// CRUD and list over `batch/v1` Job objects.
///
/// Implementations hold no job state of their own; every call reads or
/// writes the orchestrator's store.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Submit a job object. The namespace comes from the object metadata.
    async fn create_job(&self, job: &Job) -> Result<Job, ClusterError>;

    async fn get_job(&self, namespace: &str, name: &str) -> Result<Job, ClusterError>;

    /// List jobs in `namespace` carrying every label in `selector`.
    async fn list_jobs(
        &self,
        namespace: &str,
        selector: &BTreeMap<String, String>,
    ) -> Result<Vec<Job>, ClusterError>;

    /// Delete a job and, in the foreground, everything it owns.
    async fn delete_job(&self, namespace: &str, name: &str) -> Result<(), ClusterError>;

    /// Cheap connectivity probe.
    async fn ping(&self) -> Result<(), ClusterError>;
}

/// Render a selector as `k1=v1,k2=v2`.
pub(crate) fn selector_string(selector: &BTreeMap<String, String>) -> String {
    selector
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(",")
}
