//! Status derivation from native job objects.
//!
//! Status is never stored. It is recomputed from the object each time.

use chrono::{DateTime, Utc};
use k8s_openapi::api::batch::v1::Job;
use kubejobs_protocols::JobStatus;

/// Derive the caller-facing status of a job.
///
/// A true `Complete` condition wins over a true `Failed` condition, and both
/// win over the active count. No conditions and no active pods is Pending.
pub fn derive_status(job: &Job) -> JobStatus {
    let Some(status) = job.status.as_ref() else {
        return JobStatus::Pending;
    };

    let conditions = status.conditions.as_deref().unwrap_or_default();
    let holds = |kind: &str| {
        conditions
            .iter()
            .any(|c| c.type_ == kind && c.status == "True")
    };

    if holds("Complete") {
        JobStatus::Succeeded
    } else if holds("Failed") {
        JobStatus::Failed
    } else if status.active.unwrap_or(0) > 0 {
        JobStatus::Running
    } else {
        JobStatus::Pending
    }
}

pub fn created_at(job: &Job) -> Option<DateTime<Utc>> {
    job.metadata.creation_timestamp.as_ref().map(|t| t.0)
}

pub fn started_at(job: &Job) -> Option<DateTime<Utc>> {
    job.status.as_ref()?.start_time.as_ref().map(|t| t.0)
}

pub fn completed_at(job: &Job) -> Option<DateTime<Utc>> {
    job.status.as_ref()?.completion_time.as_ref().map(|t| t.0)
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
