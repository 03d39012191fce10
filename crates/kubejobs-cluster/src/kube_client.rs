//! Kubernetes-backed cluster client.

use async_trait::async_trait;
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::Namespace;
use kube::api::{DeleteParams, ListParams, PostParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::client::selector_string;
use crate::{ClusterClient, ClusterError};

/// How to reach the API server.
#[derive(Debug, Clone, Default)]
pub struct ConnectionSettings {
    /// Use the pod's service account.
    pub in_cluster: bool,
    /// Kubeconfig file. `None` means `$KUBECONFIG` or `~/.kube/config`.
    pub kubeconfig_path: Option<PathBuf>,
}

pub struct KubeClusterClient {
    client: Client,
}

impl KubeClusterClient {
    /// Build a client and verify the API server answers.
    pub async fn connect(settings: &ConnectionSettings) -> Result<Self, ClusterError> {
        let config = Self::load_config(settings).await?;
        let client = Client::try_from(config)
            .map_err(|e| ClusterError::Connection(format!("failed to build client: {e}")))?;

        let this = Self { client };
        this.ping().await?;
        info!(in_cluster = settings.in_cluster, "Connected to Kubernetes API server");
        Ok(this)
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    async fn load_config(settings: &ConnectionSettings) -> Result<Config, ClusterError> {
        if settings.in_cluster {
            return Config::incluster().map_err(|e| {
                ClusterError::Connection(format!("in-cluster configuration unavailable: {e}"))
            });
        }

        let kubeconfig = match &settings.kubeconfig_path {
            Some(path) => Kubeconfig::read_from(path).map_err(|e| {
                ClusterError::Connection(format!(
                    "failed to read kubeconfig {}: {e}",
                    path.display()
                ))
            })?,
            None => Kubeconfig::read()
                .map_err(|e| ClusterError::Connection(format!("failed to read kubeconfig: {e}")))?,
        };

        Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .map_err(|e| ClusterError::Connection(format!("invalid kubeconfig: {e}")))
    }

    fn jobs(&self, namespace: &str) -> Api<Job> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

/// Map a kube error, translating 404 and 409 responses.
fn map_error(operation: &'static str, namespace: &str, name: &str, err: kube::Error) -> ClusterError {
    match err {
        kube::Error::Api(response) if response.code == 404 => ClusterError::NotFound {
            namespace: namespace.to_string(),
            name: name.to_string(),
        },
        kube::Error::Api(response) if response.code == 409 => ClusterError::AlreadyExists {
            namespace: namespace.to_string(),
            name: name.to_string(),
        },
        other => ClusterError::request(operation, other.to_string()),
    }
}

#[async_trait]
impl ClusterClient for KubeClusterClient {
    async fn create_job(&self, job: &Job) -> Result<Job, ClusterError> {
        let namespace = job
            .metadata
            .namespace
            .as_deref()
            .ok_or_else(|| ClusterError::InvalidObject("job has no namespace".to_string()))?;
        let name = job.metadata.name.as_deref().unwrap_or_default();

        debug!(namespace, name, "Creating job");
        self.jobs(namespace)
            .create(&PostParams::default(), job)
            .await
            .map_err(|e| map_error("create", namespace, name, e))
    }

    async fn get_job(&self, namespace: &str, name: &str) -> Result<Job, ClusterError> {
        self.jobs(namespace)
            .get(name)
            .await
            .map_err(|e| map_error("get", namespace, name, e))
    }

    async fn list_jobs(
        &self,
        namespace: &str,
        selector: &BTreeMap<String, String>,
    ) -> Result<Vec<Job>, ClusterError> {
        let selector = selector_string(selector);
        let params = ListParams::default().labels(&selector);

        debug!(namespace, selector = %selector, "Listing jobs");
        let list = self
            .jobs(namespace)
            .list(&params)
            .await
            .map_err(|e| map_error("list", namespace, "", e))?;
        Ok(list.items)
    }

    async fn delete_job(&self, namespace: &str, name: &str) -> Result<(), ClusterError> {
        debug!(namespace, name, "Deleting job");
        self.jobs(namespace)
            .delete(name, &DeleteParams::foreground())
            .await
            .map(|_| ())
            .map_err(|e| map_error("delete", namespace, name, e))
    }

    async fn ping(&self) -> Result<(), ClusterError> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        namespaces
            .list(&ListParams::default().limit(1))
            .await
            .map(|_| ())
            .map_err(|e| ClusterError::Connection(format!("API server unreachable: {e}")))
    }
}
