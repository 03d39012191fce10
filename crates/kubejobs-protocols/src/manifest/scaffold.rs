//! Object-level scaffolding shared by every job kind.

use k8s_openapi::api::batch::v1::{Job, JobSpec};
use k8s_openapi::api::core::v1::{PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use super::{common_annotations, common_labels, native_object_name};
use crate::error::KindError;
use crate::handler::JobKindHandler;
use crate::types::{JobDefaults, JobKind, JobMetadata, ScheduleRequest};

/// Job object with metadata and policy fields, but an empty pod template.
///
/// The object name comes from [`native_object_name`]; labels and
/// annotations from [`common_labels`] and [`common_annotations`].
pub fn base_job(kind: &JobKind, metadata: &JobMetadata, defaults: &JobDefaults) -> Job {
    let ttl = (defaults.ttl_seconds_after_finished > 0).then_some(defaults.ttl_seconds_after_finished);

    Job {
        metadata: ObjectMeta {
            name: Some(native_object_name(kind, &metadata.job_id)),
            namespace: Some(metadata.namespace.clone()),
            labels: Some(common_labels(kind, metadata)),
            annotations: Some(common_annotations(metadata)),
            ..Default::default()
        },
        spec: Some(JobSpec {
            ttl_seconds_after_finished: ttl,
            backoff_limit: Some(defaults.backoff_limit),
            completions: Some(defaults.completions),
            parallelism: Some(defaults.parallelism),
            completion_mode: Some(defaults.completion_mode.clone()),
            ..Default::default()
        }),
        status: None,
    }
}

/// Attach a kind-built pod spec to the scaffold.
///
/// The pod template carries the same labels as the job, and the restart
/// policy always comes from the defaults.
pub fn assemble(
    mut job: Job,
    kind: &JobKind,
    metadata: &JobMetadata,
    defaults: &JobDefaults,
    mut pod: PodSpec,
) -> Job {
    pod.restart_policy = Some(defaults.restart_policy.clone());
    let template = PodTemplateSpec {
        metadata: Some(ObjectMeta {
            labels: Some(common_labels(kind, metadata)),
            ..Default::default()
        }),
        spec: Some(pod),
    };
    job.spec.get_or_insert_with(JobSpec::default).template = template;
    job
}

/// Build the full manifest for a request whose job id is already assigned.
///
/// # Errors
///
/// Whatever the handler's `build_manifest` reports, typically invalid
/// resource or image overrides.
pub fn render(
    handler: &dyn JobKindHandler,
    request: &ScheduleRequest,
    defaults: &JobDefaults,
) -> Result<Job, KindError> {
    let kind = handler.kind();
    let metadata = JobMetadata::from_request(request, defaults);
    let pod = handler.build_manifest(request, defaults)?;
    let job = base_job(&kind, &metadata, defaults);
    Ok(assemble(job, &kind, &metadata, defaults, pod))
}

#[cfg(test)]
#[path = "scaffold_tests.rs"]
mod tests;
