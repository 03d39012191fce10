use super::*;

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 50054);
    assert_eq!(config.kubernetes.default_namespace, "default");
    assert!(config.kubernetes.in_cluster);
    assert!(config.kubernetes.kubeconfig_path.is_none());
    assert_eq!(config.kubernetes.job_ttl_seconds, 86400);
    assert_eq!(config.kubernetes.request_timeout_seconds, 30);
    assert_eq!(config.kubernetes.backend, BACKEND_CLUSTER);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, "json");
}

#[test]
fn test_job_defaults() {
    let defaults = JobDefaultsConfig::default();
    assert_eq!(defaults.cpu_request, "100m");
    assert_eq!(defaults.memory_request, "64Mi");
    assert_eq!(defaults.cpu_limit, "200m");
    assert_eq!(defaults.memory_limit, "128Mi");
    assert_eq!(defaults.registry, "");
    assert_eq!(defaults.backoff_limit, 3);
    assert_eq!(defaults.parallelism, 1);
    assert_eq!(defaults.completions, 1);
    assert_eq!(defaults.timer.image, "timer-service:latest");
}

#[test]
fn test_partial_sections_fill_defaults() {
    let config: Config = toml::from_str(
        r#"
        [kubernetes]
        in_cluster = false

        [job_defaults.timer]
        image = "timer:dev"
        "#,
    )
    .unwrap();
    assert!(!config.kubernetes.in_cluster);
    assert_eq!(config.kubernetes.default_namespace, "default");
    assert_eq!(config.job_defaults.timer.image, "timer:dev");
    assert_eq!(config.job_defaults.cpu_request, "100m");
}

#[test]
fn test_request_timeout() {
    let config = KubernetesConfig {
        request_timeout_seconds: 7,
        ..Default::default()
    };
    assert_eq!(config.request_timeout().as_secs(), 7);
}
