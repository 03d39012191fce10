//! Configuration validation.

use std::fmt;

use kubejobs_protocols::manifest::is_valid_quantity;

use crate::error::ConfigError;
use crate::schema::{BACKEND_CLUSTER, BACKEND_MEMORY, Config};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["json", "text"];
const BACKENDS: [&str; 2] = [BACKEND_CLUSTER, BACKEND_MEMORY];

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Collapse the errors into one [`ConfigError`], if there are any.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        if self.is_valid() {
            return Ok(self.warnings);
        }
        let message = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(ConfigError::Invalid(message))
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_kubernetes(config, &mut result);
        Self::validate_job_defaults(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.trim().is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_kubernetes(config: &Config, result: &mut ValidationResult) {
        let kube = &config.kubernetes;

        if kube.default_namespace.trim().is_empty() {
            result.add_error(ValidationError::new(
                "kubernetes.default_namespace",
                "Default namespace cannot be empty",
            ));
        }

        if kube.request_timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "kubernetes.request_timeout_seconds",
                "request_timeout_seconds must be greater than 0",
            ));
        }

        if kube.job_ttl_seconds < 0 {
            result.add_error(ValidationError::new(
                "kubernetes.job_ttl_seconds",
                "job_ttl_seconds cannot be negative",
            ));
        } else if kube.job_ttl_seconds == 0 {
            result.add_warning(ValidationWarning::new(
                "kubernetes.job_ttl_seconds",
                "job_ttl_seconds is 0, finished jobs will not be cleaned up automatically",
            ));
        }

        if !BACKENDS.contains(&kube.backend.as_str()) {
            result.add_error(ValidationError::new(
                "kubernetes.backend",
                format!(
                    "Unknown backend '{}', valid values: {:?}",
                    kube.backend, BACKENDS
                ),
            ));
        }

        if !kube.in_cluster && kube.backend == BACKEND_CLUSTER && kube.kubeconfig_path.is_none() {
            result.add_warning(ValidationWarning::new(
                "kubernetes.kubeconfig_path",
                "kubeconfig_path not set, falling back to $KUBECONFIG or ~/.kube/config",
            ));
        }
    }

    fn validate_job_defaults(config: &Config, result: &mut ValidationResult) {
        let jobs = &config.job_defaults;

        for (field, value) in [
            ("cpu_request", &jobs.cpu_request),
            ("memory_request", &jobs.memory_request),
            ("cpu_limit", &jobs.cpu_limit),
            ("memory_limit", &jobs.memory_limit),
        ] {
            if !is_valid_quantity(value) {
                result.add_error(ValidationError::new(
                    format!("job_defaults.{field}"),
                    format!("'{value}' is not a valid resource quantity"),
                ));
            }
        }

        if jobs.backoff_limit < 0 {
            result.add_error(ValidationError::new(
                "job_defaults.backoff_limit",
                "backoff_limit cannot be negative",
            ));
        }

        for (field, value) in [
            ("parallelism", jobs.parallelism),
            ("completions", jobs.completions),
        ] {
            if value < 1 {
                result.add_error(ValidationError::new(
                    format!("job_defaults.{field}"),
                    format!("{field} must be at least 1"),
                ));
            }
        }

        if jobs.timer.image.trim().is_empty() {
            result.add_error(ValidationError::new(
                "job_defaults.timer.image",
                "Timer image cannot be empty",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
            result.add_error(ValidationError::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    config.logging.level, LOG_LEVELS
                ),
            ));
        }

        if !LOG_FORMATS.contains(&config.logging.format.as_str()) {
            result.add_error(ValidationError::new(
                "logging.format",
                format!(
                    "Unknown log format '{}', valid values: {:?}",
                    config.logging.format, LOG_FORMATS
                ),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
