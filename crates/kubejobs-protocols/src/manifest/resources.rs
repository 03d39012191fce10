//! Resource and image resolution.

use k8s_openapi::api::core::v1::ResourceRequirements;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::error::KindError;
use crate::types::{JobDefaults, ResourceOverrides, ResourceSpec};

static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+|Ki|Mi|Gi|Ti|Pi|Ei|[numkMGTPE])?$")
        .expect("quantity pattern is valid")
});

/// Whether `value` parses as a Kubernetes resource quantity.
pub fn is_valid_quantity(value: &str) -> bool {
    QUANTITY.is_match(value)
}

/// Resolve container requests and limits.
///
/// CPU and memory fall back to the site defaults independently, and
/// requests are resolved independently of limits.
pub fn resolve_resources(
    overrides: Option<&ResourceOverrides>,
    defaults: &JobDefaults,
) -> Result<ResourceRequirements, KindError> {
    let requests = overrides.and_then(|o| o.requests.as_ref());
    let limits = overrides.and_then(|o| o.limits.as_ref());

    Ok(ResourceRequirements {
        requests: Some(resolve_list(
            "requests",
            requests,
            &defaults.cpu_request,
            &defaults.memory_request,
        )?),
        limits: Some(resolve_list(
            "limits",
            limits,
            &defaults.cpu_limit,
            &defaults.memory_limit,
        )?),
        ..Default::default()
    })
}

fn resolve_list(
    section: &str,
    spec: Option<&ResourceSpec>,
    default_cpu: &str,
    default_memory: &str,
) -> Result<BTreeMap<String, Quantity>, KindError> {
    let cpu = pick(spec.and_then(|s| s.cpu.as_deref()), default_cpu);
    let memory = pick(spec.and_then(|s| s.memory.as_deref()), default_memory);

    let mut list = BTreeMap::new();
    for (name, value) in [("cpu", cpu), ("memory", memory)] {
        if !is_valid_quantity(value) {
            return Err(KindError::invalid(format!(
                "invalid {name} {section} quantity: {value:?}"
            )));
        }
        list.insert(name.to_string(), Quantity(value.to_string()));
    }
    Ok(list)
}

fn pick<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|v| !v.is_empty()).unwrap_or(fallback)
}

/// Resolve the container image.
///
/// A non-empty override is used verbatim. Otherwise the handler default is
/// used, prefixed with `registry` when that is non-empty.
pub fn resolve_image(image_override: Option<&str>, default_image: &str, registry: &str) -> String {
    match image_override.filter(|image| !image.is_empty()) {
        Some(image) => image.to_string(),
        None if registry.is_empty() => default_image.to_string(),
        None => format!("{}/{}", registry.trim_end_matches('/'), default_image),
    }
}

#[cfg(test)]
#[path = "resources_tests.rs"]
mod tests;
