//! Job creator: schedule, status, list and cancel.

use k8s_openapi::api::batch::v1::Job;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use kubejobs_cluster::status::{completed_at, created_at, started_at};
use kubejobs_cluster::{ClusterClient, ClusterError, derive_status};
use kubejobs_protocols::manifest::{
    ANNOTATION_CREATED_BY, ANNOTATION_JOB_NAME, LABEL_JOB_ID, LABEL_JOB_KIND, is_dns1123_label,
    is_valid_label_key, is_valid_label_value, job_id_selector, managed_selector, render,
    sanitize_job_name, user_visible,
};
use kubejobs_protocols::{JobDefaults, JobDetails, JobInfo, JobKind, JobStatus, ScheduleRequest};

use crate::{JobError, KindRegistry, generate_job_id};

/// Result of a successful schedule call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledJob {
    /// Logical id, caller-supplied or generated.
    pub job_id: String,
    /// Name of the object created in the cluster.
    pub native_name: String,
    pub namespace: String,
    /// Always [`JobStatus::Pending`].
    pub status: JobStatus,
}

/// Filters for [`JobCreator::list`].
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub namespace: Option<String>,
    pub labels: BTreeMap<String, String>,
    /// Empty means every status.
    pub statuses: Vec<JobStatus>,
}

/// Result of [`JobCreator::list`].
#[derive(Debug, Clone)]
pub struct JobList {
    pub jobs: Vec<JobInfo>,
    /// Number of entries in `jobs`, after filtering.
    pub total_count: usize,
}

/// Turns requests into cluster objects and reads them back.
///
/// Holds no per-job state. Every query goes to the cluster.
pub struct JobCreator {
    cluster: Arc<dyn ClusterClient>,
    registry: Arc<KindRegistry>,
    defaults: JobDefaults,
    cluster_timeout: Duration,
}

impl JobCreator {
    /// Every cluster call made through this creator is bounded by
    /// `cluster_timeout`.
    pub fn new(
        cluster: Arc<dyn ClusterClient>,
        registry: Arc<KindRegistry>,
        defaults: JobDefaults,
        cluster_timeout: Duration,
    ) -> Self {
        Self {
            cluster,
            registry,
            defaults,
            cluster_timeout,
        }
    }

    /// Kinds this creator can schedule.
    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }

    /// Site defaults applied to every manifest.
    pub fn defaults(&self) -> &JobDefaults {
        &self.defaults
    }

    /// Validate, render and submit a job. Returns it as Pending.
    ///
    /// A caller-supplied id must be a DNS-1123 label; it becomes part of
    /// the object name and a label value. When absent, an id is generated.
    ///
    /// # Errors
    ///
    /// Config, kind and id problems are reported before any cluster call.
    /// Cluster failures, name collisions included, surface as
    /// [`JobError::Cluster`] or [`JobError::Timeout`].
    pub async fn schedule(&self, mut request: ScheduleRequest) -> Result<ScheduledJob, JobError> {
        let kind = request.kind().ok_or(JobError::MissingConfig)?;
        let handler = self
            .registry
            .lookup(&kind)
            .map_err(|_| JobError::UnknownKind(kind.clone()))?;

        handler.validate(&request)?;

        if let Some(id) = request.job_id.as_deref() {
            if id.trim().is_empty() {
                return Err(JobError::InvalidArgument(
                    "job id, when supplied, must not be blank".to_string(),
                ));
            }
            if !is_dns1123_label(id) {
                return Err(JobError::InvalidArgument(format!(
                    "job id {id:?} must be a DNS-1123 label (lowercase alphanumerics and '-', at most 63 characters), e.g. {:?}",
                    sanitize_job_name(id)
                )));
            }
        }
        if request.job_id.is_none() {
            request.job_id = Some(generate_job_id());
        }
        let job_id = request.job_id().to_string();

        let manifest = render(handler.as_ref(), &request, &self.defaults)?;
        let native_name = manifest.metadata.name.clone().unwrap_or_default();
        let namespace = manifest.metadata.namespace.clone().unwrap_or_default();

        self.call("create", &job_id, self.cluster.create_job(&manifest))
            .await?;

        info!(
            job_id = %job_id,
            kind = %kind,
            namespace = %namespace,
            native_name = %native_name,
            "Scheduled job"
        );

        Ok(ScheduledJob {
            job_id,
            native_name,
            namespace,
            status: JobStatus::Pending,
        })
    }

    /// Look up one job by its logical id.
    ///
    /// The id must be a valid label value since it is matched through a
    /// label selector. When several objects carry the id, the first is used.
    pub async fn get_status(
        &self,
        job_id: &str,
        namespace: Option<&str>,
    ) -> Result<JobInfo, JobError> {
        if job_id.trim().is_empty() {
            return Err(JobError::InvalidArgument("job id is required".to_string()));
        }
        if !is_valid_label_value(job_id) {
            return Err(JobError::InvalidArgument(format!(
                "job id {job_id:?} is not a valid label value"
            )));
        }
        let namespace = self.namespace(namespace);

        let jobs = self
            .call(
                "list",
                job_id,
                self.cluster.list_jobs(namespace, &job_id_selector(job_id)),
            )
            .await?;

        let Some(first) = jobs.first() else {
            return Err(JobError::NotFound(job_id.to_string()));
        };
        if jobs.len() > 1 {
            warn!(
                job_id,
                namespace,
                matches = jobs.len(),
                "Several jobs share one job id, using the first"
            );
        }

        self.to_job_info(first)
    }

    /// List managed jobs, optionally filtered by labels and status.
    ///
    /// Label filters are ANDed with the managed-by selector and cannot
    /// override it. Objects that cannot be read back are skipped.
    ///
    /// # Errors
    ///
    /// [`JobError::InvalidArgument`] when a filter key or value is not
    /// valid label syntax. Nothing is sent to the cluster in that case.
    pub async fn list(&self, query: ListQuery) -> Result<JobList, JobError> {
        for (key, value) in &query.labels {
            if !is_valid_label_key(key) {
                return Err(JobError::InvalidArgument(format!(
                    "label filter key {key:?} is not a valid label key"
                )));
            }
            if !is_valid_label_value(value) {
                return Err(JobError::InvalidArgument(format!(
                    "label filter value {value:?} for {key:?} is not a valid label value"
                )));
            }
        }
        let namespace = self.namespace(query.namespace.as_deref());

        let mut selector = managed_selector();
        for (key, value) in query.labels {
            selector.entry(key).or_insert(value);
        }

        let objects = self
            .call("list", namespace, self.cluster.list_jobs(namespace, &selector))
            .await?;

        let jobs: Vec<JobInfo> = objects
            .iter()
            .filter_map(|job| match self.to_job_info(job) {
                Ok(info) => Some(info),
                Err(e) => {
                    warn!(
                        native_name = job.metadata.name.as_deref().unwrap_or_default(),
                        error = %e,
                        "Skipping unreadable job"
                    );
                    None
                }
            })
            .filter(|info| query.statuses.is_empty() || query.statuses.contains(&info.status))
            .collect();

        debug!(namespace, count = jobs.len(), "Listed jobs");
        let total_count = jobs.len();
        Ok(JobList { jobs, total_count })
    }

    /// Delete a job that has not finished yet.
    ///
    /// Pending and Running jobs are deleted and returned as Cancelled.
    /// Succeeded and Failed jobs are left alone with
    /// [`JobError::TerminalState`].
    pub async fn cancel(&self, job_id: &str, namespace: Option<&str>) -> Result<JobInfo, JobError> {
        let mut info = self.get_status(job_id, namespace).await?;
        if matches!(info.status, JobStatus::Succeeded | JobStatus::Failed) {
            return Err(JobError::TerminalState {
                job_id: job_id.to_string(),
                status: info.status,
            });
        }

        self.call(
            "delete",
            job_id,
            self.cluster.delete_job(&info.namespace, &info.native_name),
        )
        .await?;

        info!(job_id, native_name = %info.native_name, "Cancelled job");
        info.status = JobStatus::Cancelled;
        Ok(info)
    }

    fn namespace<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .filter(|ns| !ns.is_empty())
            .unwrap_or(self.defaults.namespace.as_str())
    }

    /// Run a cluster call under the configured timeout.
    async fn call<T>(
        &self,
        operation: &'static str,
        target: &str,
        request: impl Future<Output = Result<T, ClusterError>>,
    ) -> Result<T, JobError> {
        match tokio::time::timeout(self.cluster_timeout, request).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(source)) => Err(JobError::Cluster {
                operation,
                target: target.to_string(),
                source,
            }),
            Err(_) => Err(JobError::Timeout {
                operation,
                target: target.to_string(),
                after: self.cluster_timeout,
            }),
        }
    }

    fn to_job_info(&self, job: &Job) -> Result<JobInfo, JobError> {
        let empty = BTreeMap::new();
        let labels = job.metadata.labels.as_ref().unwrap_or(&empty);
        let annotations = job.metadata.annotations.as_ref().unwrap_or(&empty);

        let job_id = labels
            .get(LABEL_JOB_ID)
            .cloned()
            .ok_or_else(|| JobError::Conversion(format!("missing label {LABEL_JOB_ID}")))?;
        let kind = labels.get(LABEL_JOB_KIND).map(|k| JobKind::from(k.as_str()));
        let details = kind.as_ref().and_then(|kind| self.details(kind, job));

        Ok(JobInfo {
            job_id,
            name: annotations.get(ANNOTATION_JOB_NAME).cloned().unwrap_or_default(),
            native_name: job.metadata.name.clone().unwrap_or_default(),
            namespace: job.metadata.namespace.clone().unwrap_or_default(),
            kind,
            status: derive_status(job),
            created_at: created_at(job),
            started_at: started_at(job),
            completed_at: completed_at(job),
            created_by: annotations
                .get(ANNOTATION_CREATED_BY)
                .cloned()
                .unwrap_or_default(),
            labels: user_visible(labels),
            annotations: user_visible(annotations),
            details,
        })
    }

    fn details(&self, kind: &JobKind, job: &Job) -> Option<JobDetails> {
        let handler = self.registry.lookup(kind).ok()?;
        handler
            .extract_details(job)
            .inspect_err(|e| debug!(kind = %kind, error = %e, "No details for job"))
            .ok()
    }
}

#[cfg(test)]
#[path = "creator_tests.rs"]
mod tests;
