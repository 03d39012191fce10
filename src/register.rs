//! Composition helpers: config to domain types, kind registration, backend.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use kubejobs_cluster::{ClusterClient, ConnectionSettings, InMemoryCluster, KubeClusterClient};
use kubejobs_config::{BACKEND_MEMORY, Config};
use kubejobs_core::{KindRegistry, RegistryError};
use kubejobs_kind_timer::TimerHandler;
use kubejobs_protocols::{JobDefaults, JobKind};

/// Register every job kind built into this binary.
pub(crate) fn register_default_kinds(
    registry: &KindRegistry,
    config: &Config,
) -> Result<(), RegistryError> {
    let timer = TimerHandler::with_image(config.job_defaults.timer.image.clone());
    registry.register(JobKind::timer(), Arc::new(timer))?;
    Ok(())
}

/// Site defaults applied to every manifest.
pub(crate) fn job_defaults_from(config: &Config) -> JobDefaults {
    let jobs = &config.job_defaults;
    JobDefaults {
        namespace: config.kubernetes.default_namespace.clone(),
        cpu_request: jobs.cpu_request.clone(),
        memory_request: jobs.memory_request.clone(),
        cpu_limit: jobs.cpu_limit.clone(),
        memory_limit: jobs.memory_limit.clone(),
        registry: jobs.registry.clone(),
        ttl_seconds_after_finished: config.kubernetes.job_ttl_seconds,
        backoff_limit: jobs.backoff_limit,
        parallelism: jobs.parallelism,
        completions: jobs.completions,
        ..JobDefaults::default()
    }
}

pub(crate) fn connection_settings(config: &Config) -> ConnectionSettings {
    ConnectionSettings {
        in_cluster: config.kubernetes.in_cluster,
        kubeconfig_path: config.kubernetes.kubeconfig_path.as_ref().map(PathBuf::from),
    }
}

/// Build the configured cluster backend.
pub(crate) async fn build_cluster(
    config: &Config,
) -> Result<Arc<dyn ClusterClient>, Box<dyn std::error::Error>> {
    if config.kubernetes.backend == BACKEND_MEMORY {
        info!("Using in-memory cluster backend");
        return Ok(Arc::new(InMemoryCluster::new()));
    }
    let client = KubeClusterClient::connect(&connection_settings(config)).await?;
    Ok(Arc::new(client))
}
