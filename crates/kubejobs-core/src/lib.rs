//! # kubejobs core
//!
//! - [`KindRegistry`] maps job kinds to their handlers.
//! - [`JobCreator`] schedules, inspects, lists and cancels jobs by composing
//!   the registry, a [`kubejobs_cluster::ClusterClient`] and site defaults.

mod creator;
mod error;
pub mod job_id;
mod registry;

pub use creator::{JobCreator, JobList, ListQuery, ScheduledJob};
pub use error::{ErrorKind, JobError, RegistryError};
pub use job_id::generate_job_id;
pub use registry::KindRegistry;
