//! Timer job kind handler.

use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::PodSpec;
use tracing::debug;

use kubejobs_protocols::manifest::{resolve_image, resolve_resources};
use kubejobs_protocols::{
    JobDefaults, JobDetails, JobKind, JobKindHandler, KindError, ScheduleRequest, TimerConfig,
    TimerDetails,
};

use crate::container::{
    CONTAINER_NAME, ENV_DURATION, ENV_ENDPOINT, ENV_LOG_LEVEL, ENV_TIMER_NAME, RESERVED_ENV,
    environment, timer_container,
};

pub const DEFAULT_IMAGE: &str = "timer-service:latest";

/// One day.
pub const MAX_DURATION_SECONDS: i64 = 86_400;

pub const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Handler for [`JobKind::TIMER`] jobs.
#[derive(Debug, Clone)]
pub struct TimerHandler {
    default_image: String,
}

impl TimerHandler {
    pub fn new() -> Self {
        Self {
            default_image: DEFAULT_IMAGE.to_string(),
        }
    }

    /// Use a site-configured default image instead of [`DEFAULT_IMAGE`].
    pub fn with_image(image: impl Into<String>) -> Self {
        Self {
            default_image: image.into(),
        }
    }

    fn config<'a>(&self, request: &'a ScheduleRequest) -> Result<&'a TimerConfig, KindError> {
        request
            .timer()
            .ok_or_else(|| KindError::invalid("timer job configuration is required"))
    }
}

impl Default for TimerHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl JobKindHandler for TimerHandler {
    fn kind(&self) -> JobKind {
        JobKind::timer()
    }

    fn validate(&self, request: &ScheduleRequest) -> Result<(), KindError> {
        let config = self.config(request)?;

        if config.duration_seconds <= 0 {
            return Err(KindError::invalid(format!(
                "timer duration must be positive, got: {}",
                config.duration_seconds
            )));
        }
        if config.duration_seconds > MAX_DURATION_SECONDS {
            return Err(KindError::invalid(format!(
                "timer duration cannot exceed 24 hours, got: {} seconds",
                config.duration_seconds
            )));
        }
        if config.timer_name.trim().is_empty() {
            return Err(KindError::invalid("timer name is required"));
        }
        if config.report_endpoint.trim().is_empty() {
            return Err(KindError::invalid("report endpoint is required"));
        }
        if let Some(level) = config.log_level.as_deref().filter(|l| !l.is_empty()) {
            if !VALID_LOG_LEVELS.contains(&level) {
                return Err(KindError::invalid(format!("invalid log level: {level}")));
            }
        }
        if let Some(key) = config.env.keys().find(|k| RESERVED_ENV.contains(&k.as_str())) {
            return Err(KindError::invalid(format!(
                "environment variable {key} is set by the timer and cannot be overridden"
            )));
        }

        Ok(())
    }

    fn build_manifest(
        &self,
        request: &ScheduleRequest,
        defaults: &JobDefaults,
    ) -> Result<PodSpec, KindError> {
        let config = self.config(request)?;
        if let Some(key) = config.env.keys().find(|k| RESERVED_ENV.contains(&k.as_str())) {
            return Err(KindError::invalid(format!(
                "environment variable {key} collides with a timer variable"
            )));
        }

        let image = resolve_image(config.image.as_deref(), &self.default_image, &defaults.registry);
        let resources = resolve_resources(request.resources.as_ref(), defaults)?;
        let env = environment(config, request.job_id(), &request.name);

        debug!(
            job_id = request.job_id(),
            timer_name = %config.timer_name,
            duration_seconds = config.duration_seconds,
            image = %image,
            "Built timer manifest"
        );

        Ok(PodSpec {
            containers: vec![timer_container(image, env, resources)],
            ..Default::default()
        })
    }

    fn extract_details(&self, job: &Job) -> Result<JobDetails, KindError> {
        let containers = job
            .spec
            .as_ref()
            .and_then(|spec| spec.template.spec.as_ref())
            .map(|pod| pod.containers.as_slice())
            .unwrap_or_default();

        let container = containers
            .iter()
            .find(|c| c.name == CONTAINER_NAME)
            .or_else(|| containers.first())
            .ok_or(KindError::MissingContainer)?;

        let mut details = TimerDetails::default();
        for var in container.env.iter().flatten() {
            let value = var.value.clone().unwrap_or_default();
            match var.name.as_str() {
                ENV_DURATION => {
                    details.duration_seconds = value.parse().map_err(|_| {
                        KindError::Extraction(format!("invalid {ENV_DURATION}: {value:?}"))
                    })?;
                }
                ENV_TIMER_NAME => details.timer_name = value,
                ENV_ENDPOINT => details.report_endpoint = value,
                ENV_LOG_LEVEL => details.log_level = Some(value),
                _ => {}
            }
        }

        Ok(JobDetails::Timer(details))
    }

    fn default_image(&self) -> &str {
        &self.default_image
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
