//! Kubernetes name and label syntax checks.
//!
//! Values that flow into object names or label selectors are checked here
//! before any request reaches the cluster. A selector is a comma-separated
//! list of `key=value` terms, so a key or value outside this grammar could
//! add terms of its own.

use regex::Regex;
use std::sync::LazyLock;

use super::naming::MAX_NAME_LEN;

/// Longest DNS subdomain, and so the longest label key prefix.
pub const MAX_PREFIX_LEN: usize = 253;

static DNS1123_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("dns label pattern is valid")
});

static DNS1123_SUBDOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("dns subdomain pattern is valid")
});

static QUALIFIED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]([-A-Za-z0-9_.]*[A-Za-z0-9])?$")
        .expect("qualified name pattern is valid")
});

/// Whether `value` is a DNS-1123 label: lowercase alphanumerics and `-`,
/// alphanumeric at both ends, at most [`MAX_NAME_LEN`] characters.
pub fn is_dns1123_label(value: &str) -> bool {
    value.len() <= MAX_NAME_LEN && DNS1123_LABEL.is_match(value)
}

/// Whether `key` is a valid label key: `[prefix/]name`.
pub fn is_valid_label_key(key: &str) -> bool {
    let (prefix, name) = match key.split_once('/') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, key),
    };
    if let Some(prefix) = prefix {
        if prefix.len() > MAX_PREFIX_LEN || !DNS1123_SUBDOMAIN.is_match(prefix) {
            return false;
        }
    }
    name.len() <= MAX_NAME_LEN && QUALIFIED_NAME.is_match(name)
}

/// Whether `value` is a valid label value. The empty string is allowed.
pub fn is_valid_label_value(value: &str) -> bool {
    value.is_empty() || (value.len() <= MAX_NAME_LEN && QUALIFIED_NAME.is_match(value))
}
