//! Application state.

use std::sync::Arc;
use std::time::Instant;

use crate::service::JobSchedulerService;

/// Application state shared across handlers.
pub struct AppState {
    pub service: Arc<JobSchedulerService>,
    start_time: Instant,
}

impl AppState {
    pub fn new(service: Arc<JobSchedulerService>) -> Self {
        Self {
            service,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
