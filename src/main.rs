//! kubejobs - Kubernetes batch job scheduling service
//!
//! Main entry point: loads configuration, wires the cluster backend, the kind
//! registry and the job creator, then serves the scheduler API.

mod cli;
mod register;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use kubejobs_api::{ApiServer, AppState, JobSchedulerService, ServerConfig};
use kubejobs_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig, DEFAULT_CONFIG_PATH};
use kubejobs_core::{JobCreator, KindRegistry, ListQuery};

use crate::cli::{Cli, Commands};
use crate::register::{build_cluster, job_defaults_from, register_default_kinds};

/// Initialize tracing. `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let layer = if logging.format == "text" {
        fmt::layer().with_target(true).boxed()
    } else {
        fmt::layer().json().with_current_span(false).boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .init();
}

/// Load the file (explicit path must exist), apply env overrides, validate.
fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) => ConfigLoader::load(path)?,
        None => ConfigLoader::load_optional(Path::new(DEFAULT_CONFIG_PATH))?,
    };
    ConfigLoader::apply_env(&mut config)?;
    Ok(config)
}

async fn build_creator(config: &Config) -> Result<Arc<JobCreator>, Box<dyn std::error::Error>> {
    let registry = Arc::new(KindRegistry::new());
    register_default_kinds(&registry, config)?;

    let cluster = build_cluster(config).await?;
    Ok(Arc::new(JobCreator::new(
        cluster,
        registry,
        job_defaults_from(config),
        config.kubernetes.request_timeout(),
    )))
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let creator = build_creator(&config).await?;
    let service = Arc::new(JobSchedulerService::new(creator));
    info!(kinds = ?service.list_kinds(), "Job kinds registered");

    let server = ApiServer::new(
        ServerConfig::new(config.server.host.clone(), config.server.port),
        Arc::new(AppState::new(service)),
    );
    server.run_until(shutdown_signal()).await?;
    Ok(())
}

/// Connect and list jobs in the default namespace.
async fn health_check(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let creator = build_creator(&config).await?;
    let list = creator.list(ListQuery::default()).await?;
    info!(
        namespace = %config.kubernetes.default_namespace,
        jobs = list.total_count,
        "Health check passed"
    );
    println!("ok");
    Ok(())
}

fn print_kinds(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let registry = KindRegistry::new();
    register_default_kinds(&registry, config)?;
    for kind in registry.list() {
        let image = registry
            .lookup(&kind)
            .map(|handler| handler.default_image().to_string())?;
        println!("{kind}\t{image}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.logging);

    let warnings = ConfigValidator::validate(&config).into_result()?;
    for warning in &warnings {
        warn!(path = %warning.path, "{}", warning.message);
    }

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            info!(version = env!("CARGO_PKG_VERSION"), "Starting kubejobs");
            run_server(config).await
        }
        Commands::Health => health_check(config).await,
        Commands::Kinds => print_kinds(&config),
    };

    if let Err(e) = &result {
        error!("{}", e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[job_defaults]\nbackoff_limit = 7").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.job_defaults.backoff_limit, 7);
    }

    #[test]
    fn test_load_config_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(dir.path().join("absent.toml").as_path())).is_err());
    }

    #[test]
    fn test_sample_config_is_valid() {
        let content = include_str!("../config/kubejobs.toml");
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config, Config::default());
        assert!(ConfigValidator::validate(&config).is_valid());
    }

    #[test]
    fn test_print_kinds() {
        print_kinds(&Config::default()).unwrap();
    }
}
