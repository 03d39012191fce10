//! HTTP route definitions.
//!
//! Route structure:
//! - POST   /v1/jobs           - ScheduleJob
//! - GET    /v1/jobs           - ListJobs (?namespace=&labels=k=v&status=running)
//! - GET    /v1/jobs/{job_id}  - GetJobStatus (?namespace=)
//! - DELETE /v1/jobs/{job_id}  - CancelJob (?namespace=)
//! - GET    /v1/kinds          - registered job kinds
//! - GET    /livez             - liveness probe
//! - GET    /readyz            - readiness probe

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{cancel_job, get_job_status, list_jobs, list_kinds, schedule_job};
use super::monitoring::{liveness_probe, readiness_probe};
use crate::state::AppState;

/// Build the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/jobs", get(list_jobs).post(schedule_job))
        .route("/v1/jobs/{job_id}", get(get_job_status).delete(cancel_job))
        .route("/v1/kinds", get(list_kinds))
        .route("/readyz", get(readiness_probe))
        .route("/livez", get(liveness_probe))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
