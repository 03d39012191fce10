//! Job scheduler RPC facade.
//!
//! Validates call-level arguments, forwards to the [`JobCreator`] and turns
//! every failure into an [`RpcStatus`]. Transport bindings stay thin.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info};

use kubejobs_core::{ErrorKind, JobCreator, JobError, ListQuery};
use kubejobs_protocols::{JobInfo, JobKind, JobStatus, ScheduleRequest};

use crate::status::RpcStatus;

const SCHEDULED_MESSAGE: &str = "Job successfully scheduled";
const CANCELLED_MESSAGE: &str = "Job successfully cancelled";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleJobResponse {
    pub job_id: String,
    pub status: JobStatus,
    pub message: String,
    pub native_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetJobStatusResponse {
    pub job_id: String,
    pub job_info: JobInfo,
    pub status: JobStatus,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListJobsRequest {
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub label_filters: BTreeMap<String, String>,
    #[serde(default)]
    pub status_filters: Vec<JobStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListJobsResponse {
    pub jobs: Vec<JobInfo>,
    pub total_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelJobResponse {
    pub success: bool,
    pub message: String,
}

/// The four scheduler RPCs plus kind discovery.
pub struct JobSchedulerService {
    creator: Arc<JobCreator>,
}

impl JobSchedulerService {
    pub fn new(creator: Arc<JobCreator>) -> Self {
        Self { creator }
    }

    pub fn creator(&self) -> &JobCreator {
        &self.creator
    }

    pub async fn schedule_job(
        &self,
        request: ScheduleRequest,
    ) -> Result<ScheduleJobResponse, RpcStatus> {
        let kind = request.kind();
        info!(
            name = %request.name,
            kind = kind.as_ref().map(JobKind::as_str).unwrap_or(""),
            "Received ScheduleJob"
        );

        if let Err(message) = check_schedule_request(&request) {
            error!(name = %request.name, %message, "Rejected ScheduleJob");
            return Err(RpcStatus::invalid_argument(format!(
                "invalid request: {message}"
            )));
        }

        match self.creator.schedule(request).await {
            Ok(scheduled) => Ok(ScheduleJobResponse {
                job_id: scheduled.job_id,
                status: scheduled.status,
                message: SCHEDULED_MESSAGE.to_string(),
                native_name: scheduled.native_name,
            }),
            Err(err) => {
                let status = RpcStatus::from_job_error("failed to schedule job", &err);
                error!(code = %status.code, error = %err, "ScheduleJob failed");
                Err(status)
            }
        }
    }

    pub async fn get_job_status(
        &self,
        job_id: &str,
        namespace: Option<&str>,
    ) -> Result<GetJobStatusResponse, RpcStatus> {
        debug!(job_id, "Received GetJobStatus");
        if job_id.trim().is_empty() {
            return Err(RpcStatus::invalid_argument("job_id is required"));
        }

        match self.creator.get_status(job_id, namespace).await {
            Ok(info) => Ok(GetJobStatusResponse {
                job_id: info.job_id.clone(),
                status: info.status,
                message: info.status.message().to_string(),
                job_info: info,
            }),
            Err(err) => {
                let status = RpcStatus::from_job_error("failed to get job status", &err);
                error!(job_id, code = %status.code, error = %err, "GetJobStatus failed");
                Err(status)
            }
        }
    }

    pub async fn list_jobs(&self, request: ListJobsRequest) -> Result<ListJobsResponse, RpcStatus> {
        debug!(
            namespace = request.namespace.as_deref().unwrap_or(""),
            labels = request.label_filters.len(),
            statuses = request.status_filters.len(),
            "Received ListJobs"
        );

        let query = ListQuery {
            namespace: request.namespace,
            labels: request.label_filters,
            statuses: request.status_filters,
        };
        match self.creator.list(query).await {
            Ok(list) => Ok(ListJobsResponse {
                jobs: list.jobs,
                total_count: list.total_count,
            }),
            Err(err) => {
                let status = RpcStatus::from_job_error("failed to list jobs", &err);
                error!(code = %status.code, error = %err, "ListJobs failed");
                Err(status)
            }
        }
    }

    pub async fn cancel_job(
        &self,
        job_id: &str,
        namespace: Option<&str>,
    ) -> Result<CancelJobResponse, RpcStatus> {
        info!(job_id, "Received CancelJob");
        if job_id.trim().is_empty() {
            return Err(RpcStatus::invalid_argument("job_id is required"));
        }

        match self.creator.cancel(job_id, namespace).await {
            Ok(_) => Ok(CancelJobResponse {
                success: true,
                message: CANCELLED_MESSAGE.to_string(),
            }),
            Err(err) => {
                let status = cancel_status(&err);
                error!(job_id, code = %status.code, error = %err, "CancelJob failed");
                Err(status)
            }
        }
    }

    /// Kinds that can currently be scheduled, sorted.
    pub fn list_kinds(&self) -> Vec<JobKind> {
        self.creator.registry().list()
    }

    /// Ready once at least one kind can be scheduled.
    pub fn is_ready(&self) -> bool {
        self.creator.registry().count() > 0
    }
}

/// Cancel reports bad arguments as such and every other failure,
/// unknown ids included, as Internal.
fn cancel_status(err: &JobError) -> RpcStatus {
    match err.kind() {
        ErrorKind::InvalidArgument => {
            RpcStatus::invalid_argument(format!("invalid cancel request: {err}"))
        }
        _ => RpcStatus::internal(format!("failed to cancel job: {err}")),
    }
}

fn check_schedule_request(request: &ScheduleRequest) -> Result<(), &'static str> {
    if request.name.trim().is_empty() {
        return Err("name is required");
    }
    if request.config.is_none() {
        return Err("job configuration is required");
    }
    if request.job_id.as_deref().is_some_and(|id| id.trim().is_empty()) {
        return Err("job_id must not be blank when supplied");
    }
    Ok(())
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
