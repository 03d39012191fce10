//! System labels and annotations.
//!
//! Every object this service creates carries a fixed set of system keys.
//! Caller-supplied labels and annotations are merged in but never replace
//! a system key.

use std::collections::BTreeMap;

use crate::types::{JobKind, JobMetadata};

/// Fixed application name label, always [`APP_NAME`].
pub const LABEL_APP_NAME: &str = "app.kubernetes.io/name";
/// Component label, set to the job kind.
pub const LABEL_COMPONENT: &str = "app.kubernetes.io/component";
/// Ownership label. [`managed_selector`] matches on it.
pub const LABEL_MANAGED_BY: &str = "app.kubernetes.io/managed-by";
/// Job kind, used to pick the handler when reading an object back.
pub const LABEL_JOB_KIND: &str = "kubejobs.io/job-kind";
/// Logical job id. [`job_id_selector`] matches on it.
pub const LABEL_JOB_ID: &str = "kubejobs.io/job-id";

// Annotations repeat what labels cannot hold: free-form names and creators.
pub const ANNOTATION_JOB_ID: &str = "kubejobs.io/job-id";
pub const ANNOTATION_JOB_NAME: &str = "kubejobs.io/job-name";
pub const ANNOTATION_CREATED_BY: &str = "kubejobs.io/created-by";

/// Value of [`LABEL_APP_NAME`].
pub const APP_NAME: &str = "kubejobs-job";
/// Value of [`LABEL_MANAGED_BY`].
pub const MANAGER_NAME: &str = "kubejobs";

const SYSTEM_PREFIXES: [&str; 2] = ["app.kubernetes.io/", "kubejobs.io/"];

/// System labels for a job, plus non-colliding user labels.
pub fn common_labels(kind: &JobKind, metadata: &JobMetadata) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::from([
        (LABEL_APP_NAME.to_string(), APP_NAME.to_string()),
        (LABEL_COMPONENT.to_string(), kind.to_string()),
        (LABEL_MANAGED_BY.to_string(), MANAGER_NAME.to_string()),
        (LABEL_JOB_KIND.to_string(), kind.to_string()),
        (LABEL_JOB_ID.to_string(), metadata.job_id.clone()),
    ]);
    merge_user(&mut labels, &metadata.labels);
    labels
}

/// System annotations for a job, plus non-colliding user annotations.
///
/// The creator annotation is omitted when the creator is empty.
pub fn common_annotations(metadata: &JobMetadata) -> BTreeMap<String, String> {
    let mut annotations = BTreeMap::from([
        (ANNOTATION_JOB_ID.to_string(), metadata.job_id.clone()),
        (ANNOTATION_JOB_NAME.to_string(), metadata.name.clone()),
    ]);
    if !metadata.created_by.is_empty() {
        annotations.insert(ANNOTATION_CREATED_BY.to_string(), metadata.created_by.clone());
    }
    merge_user(&mut annotations, &metadata.annotations);
    annotations
}

fn merge_user(system: &mut BTreeMap<String, String>, user: &BTreeMap<String, String>) {
    for (key, value) in user {
        system.entry(key.clone()).or_insert_with(|| value.clone());
    }
}

/// Selector matching every object managed by this service.
pub fn managed_selector() -> BTreeMap<String, String> {
    BTreeMap::from([(LABEL_MANAGED_BY.to_string(), MANAGER_NAME.to_string())])
}

/// Selector matching the object(s) of one logical job.
///
/// `job_id` must already be a valid label value; see
/// [`is_valid_label_value`](super::is_valid_label_value).
pub fn job_id_selector(job_id: &str) -> BTreeMap<String, String> {
    BTreeMap::from([(LABEL_JOB_ID.to_string(), job_id.to_string())])
}

/// Whether a label or annotation key is reserved for this service.
pub fn is_system_key(key: &str) -> bool {
    SYSTEM_PREFIXES.iter().any(|prefix| key.starts_with(prefix))
}

/// Drop system keys, keeping what callers supplied.
pub fn user_visible(entries: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    entries
        .iter()
        .filter(|(key, _)| !is_system_key(key))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

#[cfg(test)]
#[path = "labels_tests.rs"]
mod tests;
