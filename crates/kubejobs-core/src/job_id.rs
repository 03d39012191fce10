//! Job id generation.

use chrono::Utc;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::warn;

const PREFIX: &str = "job-";

/// `job-` followed by 16 hex characters from the OS random source.
///
/// Falls back to a timestamp-derived id if the random source fails.
pub fn generate_job_id() -> String {
    generate_with(&mut OsRng)
}

pub(crate) fn generate_with<R: RngCore>(rng: &mut R) -> String {
    let mut bytes = [0u8; 8];
    match rng.try_fill_bytes(&mut bytes) {
        Ok(()) => format!("{PREFIX}{}", hex::encode(bytes)),
        Err(e) => {
            warn!(error = %e, "Random source failed, using timestamp job id");
            fallback_job_id()
        }
    }
}

fn fallback_job_id() -> String {
    let now = Utc::now();
    let nanos = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1000));
    format!("{PREFIX}{nanos}")
}
