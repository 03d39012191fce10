//! Object naming rules.

use crate::types::JobKind;

/// Orchestrator ceiling on object name length.
pub const MAX_NAME_LEN: usize = 63;

/// Name used when sanitizing leaves nothing behind.
pub const PLACEHOLDER_NAME: &str = "unnamed-job";

/// Turn an arbitrary string into a DNS-1123 label.
///
/// The result is lowercase, holds only `[a-z0-9-]`, never starts or ends
/// with `-`, is at most [`MAX_NAME_LEN`] bytes and is never empty.
/// Sanitizing a sanitized name returns it unchanged.
pub fn sanitize_job_name(name: &str) -> String {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' || c == ' ' { '-' } else { c })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();

    let trimmed = cleaned.trim_matches('-');
    if trimmed.is_empty() {
        return PLACEHOLDER_NAME.to_string();
    }

    // ASCII only at this point, so byte slicing is safe.
    let truncated = &trimmed[..trimmed.len().min(MAX_NAME_LEN)];
    truncated.trim_end_matches('-').to_string()
}

/// Deterministic native object name: `<kind>-<job_id>`.
///
/// The id is used as given, so distinct ids never collapse onto one name.
/// Callers pass ids that are already DNS-1123 labels (see
/// [`is_dns1123_label`](super::is_dns1123_label)); the joined name is only
/// cut to [`MAX_NAME_LEN`] with any trailing `-` dropped.
pub fn native_object_name(kind: &JobKind, job_id: &str) -> String {
    let joined: String = format!("{kind}-{job_id}").chars().take(MAX_NAME_LEN).collect();
    joined.trim_end_matches('-').to_string()
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
