//! Job default configuration.

use serde::{Deserialize, Serialize};

/// Site-wide fallbacks applied to every job manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDefaultsConfig {
    #[serde(default = "default_cpu_request")]
    pub cpu_request: String,

    #[serde(default = "default_memory_request")]
    pub memory_request: String,

    #[serde(default = "default_cpu_limit")]
    pub cpu_limit: String,

    #[serde(default = "default_memory_limit")]
    pub memory_limit: String,

    /// Prefix for kind default images. Empty for none.
    #[serde(default)]
    pub registry: String,

    #[serde(default = "default_backoff_limit")]
    pub backoff_limit: i32,

    #[serde(default = "default_one")]
    pub parallelism: i32,

    #[serde(default = "default_one")]
    pub completions: i32,

    #[serde(default)]
    pub timer: TimerKindConfig,
}

impl Default for JobDefaultsConfig {
    fn default() -> Self {
        Self {
            cpu_request: default_cpu_request(),
            memory_request: default_memory_request(),
            cpu_limit: default_cpu_limit(),
            memory_limit: default_memory_limit(),
            registry: String::new(),
            backoff_limit: default_backoff_limit(),
            parallelism: default_one(),
            completions: default_one(),
            timer: TimerKindConfig::default(),
        }
    }
}

/// Timer kind settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerKindConfig {
    #[serde(default = "default_timer_image")]
    pub image: String,
}

impl Default for TimerKindConfig {
    fn default() -> Self {
        Self {
            image: default_timer_image(),
        }
    }
}

fn default_cpu_request() -> String {
    "100m".to_string()
}

fn default_memory_request() -> String {
    "64Mi".to_string()
}

fn default_cpu_limit() -> String {
    "200m".to_string()
}

fn default_memory_limit() -> String {
    "128Mi".to_string()
}

fn default_backoff_limit() -> i32 {
    3
}

fn default_one() -> i32 {
    1
}

fn default_timer_image() -> String {
    "timer-service:latest".to_string()
}
