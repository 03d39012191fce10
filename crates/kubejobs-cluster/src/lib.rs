//! # kubejobs cluster
//!
//! The [`ClusterClient`] seam between the job creator and the orchestrator
//! that owns job objects, plus status derivation from object conditions.
//!
//! - [`KubeClusterClient`] talks to a real Kubernetes API server.
//! - [`InMemoryCluster`] keeps objects in process, for tests and local runs.

mod client;
mod error;
mod kube_client;
mod memory;
pub mod status;

pub use client::ClusterClient;
pub use error::ClusterError;
pub use kube_client::{ConnectionSettings, KubeClusterClient};
pub use memory::InMemoryCluster;
pub use status::derive_status;
