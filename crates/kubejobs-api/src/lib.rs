//! # kubejobs API
//!
//! External interface of the scheduler.
//!
//! - [`JobSchedulerService`] is the transport-agnostic facade: four RPCs
//!   (schedule, status, list, cancel) mapped onto [`kubejobs_core::JobCreator`].
//! - [`http`] binds the facade to JSON over HTTP with axum.
//! - [`ApiServer`] serves the router until a shutdown signal fires.
//!
//! ```text
//!   HTTP request ──► http::handlers ──► JobSchedulerService ──► JobCreator ──► cluster
//!                          ▲                     │
//!                          └──── RpcStatus ◄─────┘
//! ```

pub mod error;
pub mod http;
pub mod server;
pub mod service;
pub mod state;
pub mod status;

pub use error::ApiError;
pub use http::routes::create_router;
pub use server::{ApiServer, ServerConfig};
pub use service::{
    CancelJobResponse, GetJobStatusResponse, JobSchedulerService, ListJobsRequest,
    ListJobsResponse, ScheduleJobResponse,
};
pub use state::AppState;
pub use status::{RpcCode, RpcStatus};
