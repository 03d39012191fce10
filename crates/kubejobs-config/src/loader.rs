//! Configuration loader.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::schema::Config;

/// Path read when no `--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/kubejobs.toml";

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load a file if it exists, otherwise the built-in defaults.
    pub fn load_optional(path: &Path) -> Result<Config, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |name| std::env::var(name).ok())
    }

    /// Apply overrides read through `lookup`.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(port) = get("PORT") {
            config.server.port = parse("PORT", &port)?;
        }
        if let Some(port) = get("GRPC_PORT") {
            config.server.port = parse("GRPC_PORT", &port)?;
        }
        if let Some(host) = get("HOST") {
            config.server.host = host;
        }

        let kube = &mut config.kubernetes;
        if let Some(ns) = get("K8S_NAMESPACE") {
            kube.default_namespace = ns;
        }
        if let Some(flag) = get("IN_CLUSTER") {
            kube.in_cluster = parse_bool("IN_CLUSTER", &flag)?;
        }
        if let Some(path) = get("KUBECONFIG") {
            kube.kubeconfig_path = Some(path);
        }
        if let Some(ttl) = get("JOB_TTL_SECONDS") {
            kube.job_ttl_seconds = parse("JOB_TTL_SECONDS", &ttl)?;
        }
        if let Some(timeout) = get("CLUSTER_TIMEOUT_SECONDS") {
            kube.request_timeout_seconds = parse("CLUSTER_TIMEOUT_SECONDS", &timeout)?;
        }
        if let Some(backend) = get("CLUSTER_BACKEND") {
            kube.backend = backend;
        }
        if let Some(path) = kube.kubeconfig_path.as_deref() {
            kube.kubeconfig_path = Some(Self::expand_path(path));
        }

        let jobs = &mut config.job_defaults;
        for (name, slot) in [
            ("DEFAULT_CPU_REQUEST", &mut jobs.cpu_request),
            ("DEFAULT_MEMORY_REQUEST", &mut jobs.memory_request),
            ("DEFAULT_CPU_LIMIT", &mut jobs.cpu_limit),
            ("DEFAULT_MEMORY_LIMIT", &mut jobs.memory_limit),
            ("DEFAULT_REGISTRY", &mut jobs.registry),
            ("TIMER_IMAGE", &mut jobs.timer.image),
        ] {
            if let Some(value) = get(name) {
                *slot = value;
            }
        }

        if let Some(level) = get("LOG_LEVEL") {
            config.logging.level = level.to_lowercase();
        }
        if let Some(format) = get("LOG_FORMAT") {
            config.logging.format = format.to_lowercase();
        }

        Ok(())
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid");

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.kube/config`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

fn parse<T: FromStr>(field: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::invalid_value(field, format!("{value:?}: {e}")))
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::invalid_value(
            field,
            format!("{value:?} is not a boolean"),
        )),
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
