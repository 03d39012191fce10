//! HTTP/JSON binding of the scheduler RPCs.
//!
//! - Job endpoints under `/v1/jobs`
//! - Kind discovery at `/v1/kinds`
//! - Kubernetes probes at `/livez` and `/readyz`

pub mod handlers;
pub mod routes;

pub(crate) mod monitoring;
