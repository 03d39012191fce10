//! In-process cluster for tests and local development.

use async_trait::async_trait;
use chrono::Utc;
use k8s_openapi::api::batch::v1::{Job, JobCondition, JobStatus as NativeStatus};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use crate::{ClusterClient, ClusterError};

type Key = (String, String);

/// Job objects held in a map keyed by namespace and name.
///
/// Nothing runs: status changes only through [`InMemoryCluster::set_status`]
/// and the `mark_*` helpers.
pub struct InMemoryCluster {
    jobs: RwLock<BTreeMap<Key, Job>>,
    next_uid: AtomicU64,
    fail_requests: AtomicBool,
    latency: Option<Duration>,
}

impl InMemoryCluster {
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(BTreeMap::new()),
            next_uid: AtomicU64::new(1),
            fail_requests: AtomicBool::new(false),
            latency: None,
        }
    }

    /// Delay every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make every subsequent call fail with a request error.
    pub fn set_failing(&self, failing: bool) {
        self.fail_requests.store(failing, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.jobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.read().is_empty()
    }

    pub fn contains(&self, namespace: &str, name: &str) -> bool {
        self.jobs
            .read()
            .contains_key(&(namespace.to_string(), name.to_string()))
    }

    /// Replace the status of a stored job.
    pub fn set_status(&self, namespace: &str, name: &str, status: NativeStatus) -> Result<(), ClusterError> {
        let mut jobs = self.jobs.write();
        let job = jobs
            .get_mut(&(namespace.to_string(), name.to_string()))
            .ok_or_else(|| not_found(namespace, name))?;
        job.status = Some(status);
        Ok(())
    }

    pub fn mark_running(&self, namespace: &str, name: &str) -> Result<(), ClusterError> {
        self.set_status(
            namespace,
            name,
            NativeStatus {
                active: Some(1),
                start_time: Some(Time(Utc::now())),
                ..Default::default()
            },
        )
    }

    pub fn mark_succeeded(&self, namespace: &str, name: &str) -> Result<(), ClusterError> {
        let now = Time(Utc::now());
        self.set_status(
            namespace,
            name,
            NativeStatus {
                succeeded: Some(1),
                start_time: Some(now.clone()),
                completion_time: Some(now),
                conditions: Some(vec![true_condition("Complete")]),
                ..Default::default()
            },
        )
    }

    pub fn mark_failed(&self, namespace: &str, name: &str) -> Result<(), ClusterError> {
        self.set_status(
            namespace,
            name,
            NativeStatus {
                failed: Some(1),
                start_time: Some(Time(Utc::now())),
                conditions: Some(vec![true_condition("Failed")]),
                ..Default::default()
            },
        )
    }

    async fn simulate(&self, operation: &'static str) -> Result<(), ClusterError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.fail_requests.load(Ordering::SeqCst) {
            return Err(ClusterError::request(operation, "simulated cluster failure"));
        }
        Ok(())
    }
}

impl Default for InMemoryCluster {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(namespace: &str, name: &str) -> ClusterError {
    ClusterError::NotFound {
        namespace: namespace.to_string(),
        name: name.to_string(),
    }
}

fn true_condition(kind: &str) -> JobCondition {
    JobCondition {
        type_: kind.to_string(),
        status: "True".to_string(),
        last_transition_time: Some(Time(Utc::now())),
        ..Default::default()
    }
}

fn matches_selector(job: &Job, selector: &BTreeMap<String, String>) -> bool {
    let labels = job.metadata.labels.as_ref();
    selector
        .iter()
        .all(|(k, v)| labels.and_then(|l| l.get(k)) == Some(v))
}

#[async_trait]
impl ClusterClient for InMemoryCluster {
    async fn create_job(&self, job: &Job) -> Result<Job, ClusterError> {
        self.simulate("create").await?;

        let namespace = job
            .metadata
            .namespace
            .clone()
            .ok_or_else(|| ClusterError::InvalidObject("job has no namespace".to_string()))?;
        let name = job
            .metadata
            .name
            .clone()
            .ok_or_else(|| ClusterError::InvalidObject("job has no name".to_string()))?;

        let mut jobs = self.jobs.write();
        let key = (namespace, name);
        if jobs.contains_key(&key) {
            return Err(ClusterError::AlreadyExists {
                namespace: key.0,
                name: key.1,
            });
        }

        let mut stored = job.clone();
        let uid = self.next_uid.fetch_add(1, Ordering::SeqCst);
        stored.metadata.uid = Some(format!("uid-{uid}"));
        stored.metadata.creation_timestamp = Some(Time(Utc::now()));
        stored.status = Some(NativeStatus::default());
        jobs.insert(key, stored.clone());
        Ok(stored)
    }

    async fn get_job(&self, namespace: &str, name: &str) -> Result<Job, ClusterError> {
        self.simulate("get").await?;
        self.jobs
            .read()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| not_found(namespace, name))
    }

    async fn list_jobs(
        &self,
        namespace: &str,
        selector: &BTreeMap<String, String>,
    ) -> Result<Vec<Job>, ClusterError> {
        self.simulate("list").await?;
        Ok(self
            .jobs
            .read()
            .iter()
            .filter(|((ns, _), job)| ns == namespace && matches_selector(job, selector))
            .map(|(_, job)| job.clone())
            .collect())
    }

    async fn delete_job(&self, namespace: &str, name: &str) -> Result<(), ClusterError> {
        self.simulate("delete").await?;
        self.jobs
            .write()
            .remove(&(namespace.to_string(), name.to_string()))
            .map(|_| ())
            .ok_or_else(|| not_found(namespace, name))
    }

    async fn ping(&self) -> Result<(), ClusterError> {
        self.simulate("ping").await
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
