use super::*;

fn quantity(list: &Option<BTreeMap<String, Quantity>>, name: &str) -> String {
    list.as_ref().unwrap().get(name).unwrap().0.clone()
}

#[test]
fn test_valid_quantities() {
    for value in ["100m", "1", "0.5", "64Mi", "1Gi", "2k", "1e3", "128974848", ".5"] {
        assert!(is_valid_quantity(value), "{value}");
    }
}

#[test]
fn test_invalid_quantities() {
    for value in ["", "abc", "10 Mi", "1.2.3", "Mi", "5mb", "-"] {
        assert!(!is_valid_quantity(value), "{value}");
    }
}

#[test]
fn test_defaults_without_override() {
    let defaults = JobDefaults::default();
    let resources = resolve_resources(None, &defaults).unwrap();
    assert_eq!(quantity(&resources.requests, "cpu"), "100m");
    assert_eq!(quantity(&resources.requests, "memory"), "64Mi");
    assert_eq!(quantity(&resources.limits, "cpu"), "200m");
    assert_eq!(quantity(&resources.limits, "memory"), "128Mi");
}

#[test]
fn test_partial_override_falls_back_per_field() {
    let defaults = JobDefaults::default();
    let overrides = ResourceOverrides {
        requests: Some(ResourceSpec::cpu("250m")),
        limits: None,
    };
    let resources = resolve_resources(Some(&overrides), &defaults).unwrap();
    assert_eq!(quantity(&resources.requests, "cpu"), "250m");
    assert_eq!(quantity(&resources.requests, "memory"), "64Mi");
    assert_eq!(quantity(&resources.limits, "cpu"), "200m");
    assert_eq!(quantity(&resources.limits, "memory"), "128Mi");
}

#[test]
fn test_limits_resolved_independently() {
    let defaults = JobDefaults::default();
    let overrides = ResourceOverrides {
        requests: None,
        limits: Some(ResourceSpec::memory("1Gi")),
    };
    let resources = resolve_resources(Some(&overrides), &defaults).unwrap();
    assert_eq!(quantity(&resources.requests, "memory"), "64Mi");
    assert_eq!(quantity(&resources.limits, "memory"), "1Gi");
    assert_eq!(quantity(&resources.limits, "cpu"), "200m");
}

#[test]
fn test_empty_override_treated_as_absent() {
    let defaults = JobDefaults::default();
    let overrides = ResourceOverrides {
        requests: Some(ResourceSpec::new("", "")),
        limits: None,
    };
    let resources = resolve_resources(Some(&overrides), &defaults).unwrap();
    assert_eq!(quantity(&resources.requests, "cpu"), "100m");
}

#[test]
fn test_malformed_override_rejected() {
    let defaults = JobDefaults::default();
    let overrides = ResourceOverrides {
        requests: None,
        limits: Some(ResourceSpec::cpu("lots")),
    };
    let err = resolve_resources(Some(&overrides), &defaults).unwrap_err();
    assert!(matches!(err, KindError::InvalidConfig(_)));
    assert!(err.to_string().contains("cpu limits"));
}

#[test]
fn test_resolve_image() {
    assert_eq!(resolve_image(None, "timer-service:latest", ""), "timer-service:latest");
    assert_eq!(
        resolve_image(None, "timer-service:latest", "registry.local/"),
        "registry.local/timer-service:latest"
    );
    assert_eq!(
        resolve_image(Some("custom:1"), "timer-service:latest", "registry.local"),
        "custom:1"
    );
    assert_eq!(
        resolve_image(Some(""), "timer-service:latest", "registry.local"),
        "registry.local/timer-service:latest"
    );
}
