//! Timer container definition.

use k8s_openapi::api::core::v1::{
    Container, ContainerPort, EnvVar, ExecAction, Probe, ResourceRequirements,
};

use kubejobs_protocols::TimerConfig;

pub const ENV_DURATION: &str = "TIMER_DURATION_SECONDS";
pub const ENV_TIMER_NAME: &str = "TIMER_NAME";
pub const ENV_JOB_NAME: &str = "JOB_NAME";
pub const ENV_ENDPOINT: &str = "CONTROL_PLANE_ENDPOINT";
pub const ENV_TIMER_ID: &str = "TIMER_ID";
pub const ENV_GRPC_PORT: &str = "GRPC_PORT";
pub const ENV_LOG_LEVEL: &str = "RUST_LOG";

/// Keys written by the handler. Callers may not set these.
pub const RESERVED_ENV: [&str; 7] = [
    ENV_DURATION,
    ENV_TIMER_NAME,
    ENV_JOB_NAME,
    ENV_ENDPOINT,
    ENV_TIMER_ID,
    ENV_GRPC_PORT,
    ENV_LOG_LEVEL,
];

pub const GRPC_PORT: i32 = 50051;
pub(crate) const CONTAINER_NAME: &str = "timer";
const DEFAULT_LOG_LEVEL: &str = "info";
const HEALTH_COMMAND: [&str; 2] = ["timer-service", "health"];

fn env(name: &str, value: impl Into<String>) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value: Some(value.into()),
        value_from: None,
    }
}

/// Fixed variables first, in a stable order, then caller variables by key.
pub(crate) fn environment(config: &TimerConfig, job_id: &str, job_name: &str) -> Vec<EnvVar> {
    let log_level = config
        .log_level
        .as_deref()
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let mut vars = vec![
        env(ENV_DURATION, config.duration_seconds.to_string()),
        env(ENV_TIMER_NAME, config.timer_name.as_str()),
        env(ENV_JOB_NAME, job_name),
        env(ENV_ENDPOINT, config.report_endpoint.as_str()),
        env(ENV_TIMER_ID, job_id),
        env(ENV_GRPC_PORT, GRPC_PORT.to_string()),
        env(ENV_LOG_LEVEL, log_level),
    ];
    vars.extend(config.env.iter().map(|(k, v)| env(k, v.as_str())));
    vars
}

fn health_probe(initial_delay: i32, period: i32) -> Probe {
    Probe {
        exec: Some(ExecAction {
            command: Some(HEALTH_COMMAND.iter().map(|s| s.to_string()).collect()),
        }),
        initial_delay_seconds: Some(initial_delay),
        period_seconds: Some(period),
        timeout_seconds: Some(5),
        failure_threshold: Some(3),
        ..Default::default()
    }
}

pub(crate) fn timer_container(
    image: String,
    env: Vec<EnvVar>,
    resources: ResourceRequirements,
) -> Container {
    Container {
        name: CONTAINER_NAME.to_string(),
        image: Some(image),
        image_pull_policy: Some("IfNotPresent".to_string()),
        env: Some(env),
        resources: Some(resources),
        ports: Some(vec![ContainerPort {
            name: Some("grpc".to_string()),
            container_port: GRPC_PORT,
            protocol: Some("TCP".to_string()),
            ..Default::default()
        }]),
        liveness_probe: Some(health_probe(10, 30)),
        readiness_probe: Some(health_probe(5, 10)),
        ..Default::default()
    }
}
