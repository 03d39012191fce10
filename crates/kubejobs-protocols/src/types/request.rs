//! Schedule request types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::JobKind;

/// CPU and memory quantities, each independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
}

impl ResourceSpec {
    pub fn new(cpu: impl Into<String>, memory: impl Into<String>) -> Self {
        Self {
            cpu: Some(cpu.into()),
            memory: Some(memory.into()),
        }
    }

    pub fn cpu(cpu: impl Into<String>) -> Self {
        Self {
            cpu: Some(cpu.into()),
            memory: None,
        }
    }

    pub fn memory(memory: impl Into<String>) -> Self {
        Self {
            cpu: None,
            memory: Some(memory.into()),
        }
    }
}

/// Caller overrides for container requests and limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests: Option<ResourceSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<ResourceSpec>,
}

/// Configuration payload of a timer job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Countdown length in seconds.
    #[serde(default)]
    pub duration_seconds: i64,
    /// Human-readable timer name.
    #[serde(default)]
    pub timer_name: String,
    /// Endpoint the timer reports completion to.
    #[serde(default)]
    pub report_endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// Image override. Used verbatim, the registry prefix is not applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Extra environment variables appended after the fixed ones.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl TimerConfig {
    pub fn new(
        duration_seconds: i64,
        timer_name: impl Into<String>,
        report_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            duration_seconds,
            timer_name: timer_name.into(),
            report_endpoint: report_endpoint.into(),
            ..Default::default()
        }
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

/// Kind-specific configuration. Exactly one variant per supported kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobConfig {
    Timer(TimerConfig),
}

impl JobConfig {
    /// The kind this payload belongs to.
    pub fn kind(&self) -> JobKind {
        match self {
            Self::Timer(_) => JobKind::timer(),
        }
    }

    pub fn as_timer(&self) -> Option<&TimerConfig> {
        match self {
            Self::Timer(config) => Some(config),
        }
    }
}

impl From<TimerConfig> for JobConfig {
    fn from(config: TimerConfig) -> Self {
        Self::Timer(config)
    }
}

/// A declarative request for one unit of work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Logical job name.
    #[serde(default)]
    pub name: String,
    /// Caller-supplied job id, used verbatim when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceOverrides>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<JobConfig>,
}

impl ScheduleRequest {
    pub fn new(name: impl Into<String>, config: impl Into<JobConfig>) -> Self {
        Self {
            name: name.into(),
            config: Some(config.into()),
            ..Default::default()
        }
    }

    pub fn with_job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_resources(mut self, resources: ResourceOverrides) -> Self {
        self.resources = Some(resources);
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = Some(created_by.into());
        self
    }

    /// Kind of the configuration payload, if any.
    pub fn kind(&self) -> Option<JobKind> {
        self.config.as_ref().map(JobConfig::kind)
    }

    pub fn timer(&self) -> Option<&TimerConfig> {
        self.config.as_ref().and_then(JobConfig::as_timer)
    }

    /// The job id, or an empty string before one has been assigned.
    pub fn job_id(&self) -> &str {
        self.job_id.as_deref().unwrap_or_default()
    }
}
