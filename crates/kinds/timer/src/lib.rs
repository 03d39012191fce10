//! # Timer job kind
//!
//! Runs `timer-service` in a single container. The timer counts down for
//! the requested duration and reports completion to a control plane
//! endpoint. All parameters travel as environment variables, which is also
//! how details are read back from a live job.

mod container;
mod handler;

pub use container::{
    ENV_DURATION, ENV_ENDPOINT, ENV_GRPC_PORT, ENV_JOB_NAME, ENV_LOG_LEVEL, ENV_TIMER_ID,
    ENV_TIMER_NAME, GRPC_PORT, RESERVED_ENV,
};
pub use handler::{DEFAULT_IMAGE, MAX_DURATION_SECONDS, TimerHandler, VALID_LOG_LEVELS};
