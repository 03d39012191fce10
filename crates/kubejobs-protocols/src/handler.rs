//! Job kind handler trait.
//!
//! One implementation per job kind. The registry dispatches on [`JobKind`]
//! to the handler that validates, builds and reads back jobs of that kind.

use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::PodSpec;

use crate::error::KindError;
use crate::types::{JobDefaults, JobDetails, JobKind, ScheduleRequest};

pub trait JobKindHandler: Send + Sync {
    /// The kind this handler serves.
    fn kind(&self) -> JobKind;

    /// Check the kind-specific payload of a request.
    ///
    /// Fails with [`KindError::InvalidConfig`] when the payload is missing
    /// or violates a constraint of the kind.
    fn validate(&self, request: &ScheduleRequest) -> Result<(), KindError>;

    /// Build the kind-specific pod spec: containers, image, env, ports,
    /// probes and resources. Object-level scaffolding is added by
    /// [`crate::manifest::render`].
    fn build_manifest(
        &self,
        request: &ScheduleRequest,
        defaults: &JobDefaults,
    ) -> Result<PodSpec, KindError>;

    /// Recover the details payload from a job built by [`Self::build_manifest`].
    fn extract_details(&self, job: &Job) -> Result<JobDetails, KindError>;

    /// Image used when the request does not override it.
    fn default_image(&self) -> &str;
}
