use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{JobDefaults, ScheduleRequest};

/// Identity of a job derived from its request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMetadata {
    pub job_id: String,
    pub name: String,
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
    pub created_by: String,
}

impl JobMetadata {
    /// Derive metadata, falling back to the default namespace.
    pub fn from_request(request: &ScheduleRequest, defaults: &JobDefaults) -> Self {
        let namespace = request
            .namespace
            .as_deref()
            .filter(|ns| !ns.is_empty())
            .unwrap_or(defaults.namespace.as_str())
            .to_string();

        Self {
            job_id: request.job_id().to_string(),
            name: request.name.clone(),
            namespace,
            labels: request.labels.clone(),
            annotations: request.annotations.clone(),
            created_by: request.created_by.clone().unwrap_or_default(),
        }
    }
}
