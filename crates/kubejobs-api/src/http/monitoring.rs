//! Probe handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

/// Probe outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    Alive,
    Ready,
    NotReady,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResponse {
    pub status: ProbeStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub kinds: usize,
}

/// Liveness probe (Kubernetes).
pub async fn liveness_probe() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": ProbeStatus::Alive
    }))
}

/// Readiness probe (Kubernetes). Ready once a job kind is registered.
pub async fn readiness_probe(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let kinds = state.service.list_kinds().len();
    let (code, status) = if state.service.is_ready() {
        (StatusCode::OK, ProbeStatus::Ready)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, ProbeStatus::NotReady)
    };

    let body = ProbeResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        kinds,
    };
    (code, Json(body))
}
