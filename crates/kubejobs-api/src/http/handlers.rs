//! Job endpoint handlers.
//!
//! Each handler decodes the request, calls [`JobSchedulerService`] and
//! encodes the outcome. Failures become `{ "code", "message" }` bodies.
//!
//! [`JobSchedulerService`]: crate::service::JobSchedulerService

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use kubejobs_protocols::{JobKind, JobStatus, ScheduleRequest};

use crate::service::{
    CancelJobResponse, GetJobStatusResponse, ListJobsRequest, ListJobsResponse,
    ScheduleJobResponse,
};
use crate::state::AppState;
use crate::status::{RpcCode, RpcStatus};

impl RpcCode {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidArgument => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RpcStatus {
    fn into_response(self) -> Response {
        (self.code.http_status(), Json(self)).into_response()
    }
}

/// `?namespace=` on single-job endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct NamespaceParams {
    pub namespace: Option<String>,
}

/// Query string of `GET /v1/jobs`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub namespace: Option<String>,
    /// `k=v,k2=v2`
    pub labels: Option<String>,
    /// `running,pending`
    pub status: Option<String>,
}

impl ListParams {
    fn into_request(self) -> Result<ListJobsRequest, RpcStatus> {
        let label_filters = match self.labels.as_deref() {
            Some(raw) => parse_labels(raw)?,
            None => BTreeMap::new(),
        };
        let status_filters = match self.status.as_deref() {
            Some(raw) => parse_statuses(raw)?,
            None => Vec::new(),
        };
        Ok(ListJobsRequest {
            namespace: self.namespace.filter(|ns| !ns.is_empty()),
            label_filters,
            status_filters,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct KindsResponse {
    pub kinds: Vec<JobKind>,
}

/// POST /v1/jobs
pub async fn schedule_job(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ScheduleJobResponse>), RpcStatus> {
    let Json(request) = body.map_err(|rejection| {
        RpcStatus::invalid_argument(format!("invalid request: {}", rejection.body_text()))
    })?;
    let response = state.service.schedule_job(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /v1/jobs/{job_id}
pub async fn get_job_status(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
    Query(params): Query<NamespaceParams>,
) -> Result<Json<GetJobStatusResponse>, RpcStatus> {
    let response = state
        .service
        .get_job_status(&job_id, params.namespace.as_deref())
        .await?;
    Ok(Json(response))
}

/// GET /v1/jobs
pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListJobsResponse>, RpcStatus> {
    let request = params.into_request()?;
    let response = state.service.list_jobs(request).await?;
    Ok(Json(response))
}

/// DELETE /v1/jobs/{job_id}
pub async fn cancel_job(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
    Query(params): Query<NamespaceParams>,
) -> Result<Json<CancelJobResponse>, RpcStatus> {
    let response = state
        .service
        .cancel_job(&job_id, params.namespace.as_deref())
        .await?;
    Ok(Json(response))
}

/// GET /v1/kinds
pub async fn list_kinds(State(state): State<Arc<AppState>>) -> Json<KindsResponse> {
    Json(KindsResponse {
        kinds: state.service.list_kinds(),
    })
}

fn parse_labels(raw: &str) -> Result<BTreeMap<String, String>, RpcStatus> {
    let mut labels = BTreeMap::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = pair
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| {
                RpcStatus::invalid_argument(format!("invalid label filter '{pair}', expected key=value"))
            })?;
        labels.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(labels)
}

fn parse_statuses(raw: &str) -> Result<Vec<JobStatus>, RpcStatus> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<JobStatus>()
                .map_err(|err| RpcStatus::invalid_argument(err.to_string()))
        })
        .collect()
}
