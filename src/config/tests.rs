//! Tests for config functionality.

use crate::config::types::*;
use crate::config::{Config, EventSinkKind, UpstreamPolicy};
use crate::error::SockError;
use serial_test::serial;
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::TempDir;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.event_bus_name, "sock-matcher-events");
    assert_eq!(config.model_id, "anthropic.claude-3-5-sonnet-20241022-v2:0");
    assert_eq!(config.region, "us-west-2");
    assert_eq!(config.max_tool_rounds, 5);
    assert_eq!(config.upstream_policy, UpstreamPolicy::Lenient);
    assert!(!config.tools_enabled);
    assert!(config.event_endpoint.is_none());
    assert!(config.event_log.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
region: eu-central-1
upstream_policy: strict
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.region, "eu-central-1");
    assert_eq!(config.upstream_policy, UpstreamPolicy::Strict);

    // Unspecified values keep their defaults
    assert_eq!(config.event_bus_name, "sock-matcher-events");
    assert_eq!(config.max_tool_rounds, 5);
}

#[test]
fn test_unknown_fields_ignored() {
    let yaml = r#"
model_id: my-model
future_feature: 42
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.model_id, "my-model");
}

#[test]
fn test_invalid_yaml_is_config_error() {
    let err = Config::from_yaml("max_tool_rounds: [not, a, number]").unwrap_err();
    assert!(matches!(err, SockError::ConfigError(_)));
}

#[test]
fn test_validation_rejects_zero_tool_rounds() {
    let err = Config::from_yaml("max_tool_rounds: 0").unwrap_err();
    assert!(err.to_string().contains("max_tool_rounds"));
}

#[test]
fn test_validation_rejects_empty_model_id() {
    let config = Config {
        model_id: "  ".to_string(),
        ..Config::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("model_id"));
}

#[test]
fn test_validation_rejects_two_event_sinks() {
    let config = Config {
        event_endpoint: Some("http://localhost:4000/events".to_string()),
        event_log: Some(PathBuf::from("events.ndjson")),
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_bearer_token_never_serialized() {
    let config = Config {
        bearer_token: Some("secret".to_string()),
        ..Config::default()
    };
    let yaml = config.to_yaml().unwrap();
    assert!(!yaml.contains("secret"));
    assert!(!yaml.contains("bearer_token"));
}

#[test]
fn test_yaml_round_trip_preserves_settings() {
    let config = Config {
        tools_enabled: true,
        event_log: Some(PathBuf::from("/tmp/events.ndjson")),
        ..Config::default()
    };
    let parsed = Config::from_yaml(&config.to_yaml().unwrap()).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_load_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("sockmatch.yaml");
    std::fs::write(&path, "event_bus_name: committee-bus\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.event_bus_name, "committee-bus");
}

#[test]
fn test_load_missing_file_is_config_error() {
    let temp = TempDir::new().unwrap();
    let err = Config::load(temp.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, SockError::ConfigError(_)));
}

#[test]
fn test_env_overrides_apply() {
    let config = Config::default()
        .with_env_overrides(lookup(&[
            (ENV_EVENT_BUS_NAME, "other-bus"),
            (ENV_MODEL_ID, "anthropic.claude-3-haiku"),
            (ENV_REGION, "ap-southeast-2"),
            (ENV_BEARER_TOKEN, "tok"),
            (ENV_UPSTREAM_POLICY, "STRICT"),
            (ENV_MAX_TOOL_ROUNDS, "2"),
        ]))
        .unwrap();

    assert_eq!(config.event_bus_name, "other-bus");
    assert_eq!(config.model_id, "anthropic.claude-3-haiku");
    assert_eq!(config.region, "ap-southeast-2");
    assert_eq!(config.bearer_token.as_deref(), Some("tok"));
    assert_eq!(config.upstream_policy, UpstreamPolicy::Strict);
    assert_eq!(config.max_tool_rounds, 2);
}

#[test]
fn test_empty_env_values_are_ignored() {
    let config = Config::default()
        .with_env_overrides(lookup(&[(ENV_REGION, ""), (ENV_EVENT_LOG, "   ")]))
        .unwrap();
    assert_eq!(config.region, "us-west-2");
    assert!(config.event_log.is_none());
}

#[test]
fn test_bad_env_values_are_rejected() {
    let err = Config::default()
        .with_env_overrides(lookup(&[(ENV_UPSTREAM_POLICY, "anarchic")]))
        .unwrap_err();
    assert!(err.to_string().contains(ENV_UPSTREAM_POLICY));

    let err = Config::default()
        .with_env_overrides(lookup(&[(ENV_MAX_TOOL_ROUNDS, "many")]))
        .unwrap_err();
    assert!(matches!(err, SockError::ConfigError(_)));
}

#[test]
fn test_runtime_endpoint_derivation() {
    let config = Config::default();
    assert_eq!(
        config.runtime_endpoint(),
        "https://bedrock-runtime.us-west-2.amazonaws.com"
    );

    let config = Config {
        model_endpoint: Some("http://localhost:8080/".to_string()),
        ..Config::default()
    };
    assert_eq!(config.runtime_endpoint(), "http://localhost:8080");
}

#[test]
fn test_event_sink_selection() {
    assert_eq!(Config::default().event_sink(), EventSinkKind::Disabled);

    let config = Config {
        event_log: Some(PathBuf::from("events.ndjson")),
        ..Config::default()
    };
    assert_eq!(
        config.event_sink(),
        EventSinkKind::File(PathBuf::from("events.ndjson"))
    );

    let config = Config {
        event_endpoint: Some("http://bus".to_string()),
        ..Config::default()
    };
    assert_eq!(config.event_sink(), EventSinkKind::Http("http://bus".to_string()));
}

#[test]
fn test_upstream_policy_parsing() {
    assert_eq!(UpstreamPolicy::from_str(" Lenient "), Some(UpstreamPolicy::Lenient));
    assert_eq!(UpstreamPolicy::from_str("strict"), Some(UpstreamPolicy::Strict));
    assert_eq!(UpstreamPolicy::from_str("whatever"), None);
}

#[test]
#[serial]
fn test_resolve_reads_process_environment() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("sockmatch.yaml");
    std::fs::write(&path, "region: eu-west-1\nmodel_id: from-file\n").unwrap();

    // SAFETY: guarded by #[serial]; no other test touches this variable concurrently.
    unsafe {
        std::env::set_var(ENV_MODEL_ID, "from-env");
    }
    let resolved = Config::resolve(Some(&path));
    unsafe {
        std::env::remove_var(ENV_MODEL_ID);
    }

    let config = resolved.unwrap();
    assert_eq!(config.model_id, "from-env");
}
