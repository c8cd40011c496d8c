use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "COLLABDESK_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.seed_path.to_str(), Some("./config/seed.yaml"));
    assert_eq!(cfg.store_latency_ms, 500);
    assert!(!cfg.enforce_campaign_refs);
    assert_eq!(cfg.api_url, "http://127.0.0.1:3000");
    assert_eq!(cfg.client_timeout_secs, 10);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("COLLABDESK_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "COLLABDESK_BIND_ADDR"),
        "expected InvalidEnvVar(COLLABDESK_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn store_latency_override() {
    let mut map = HashMap::new();
    map.insert("COLLABDESK_STORE_LATENCY_MS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.store_latency_ms, 0);
}

#[test]
fn store_latency_invalid() {
    let mut map = HashMap::new();
    map.insert("COLLABDESK_STORE_LATENCY_MS", "fast");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "COLLABDESK_STORE_LATENCY_MS"),
        "expected InvalidEnvVar(COLLABDESK_STORE_LATENCY_MS), got: {result:?}"
    );
}

#[test]
fn enforce_campaign_refs_accepts_common_spellings() {
    for raw in ["true", "TRUE", "1", "yes", "on"] {
        let mut map = HashMap::new();
        map.insert("COLLABDESK_ENFORCE_CAMPAIGN_REFS", raw);
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.enforce_campaign_refs, "'{raw}' should enable enforcement");
    }
}

#[test]
fn enforce_campaign_refs_invalid() {
    let mut map = HashMap::new();
    map.insert("COLLABDESK_ENFORCE_CAMPAIGN_REFS", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "COLLABDESK_ENFORCE_CAMPAIGN_REFS"),
        "expected InvalidEnvVar(COLLABDESK_ENFORCE_CAMPAIGN_REFS), got: {result:?}"
    );
}

#[test]
fn api_url_must_parse() {
    let mut map = HashMap::new();
    map.insert("COLLABDESK_API_URL", "not a url");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "COLLABDESK_API_URL"),
        "expected InvalidEnvVar(COLLABDESK_API_URL), got: {result:?}"
    );
}

#[test]
fn production_env_and_custom_bind() {
    let mut map = HashMap::new();
    map.insert("COLLABDESK_ENV", "production");
    map.insert("COLLABDESK_BIND_ADDR", "127.0.0.1:8080");
    map.insert("COLLABDESK_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.bind_addr.port(), 8080);
    assert_eq!(cfg.log_level, "debug");
}

#[test]
fn client_timeout_of_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("COLLABDESK_CLIENT_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "COLLABDESK_CLIENT_TIMEOUT_SECS"),
        "expected InvalidEnvVar(COLLABDESK_CLIENT_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn client_timeout_override() {
    let mut map = HashMap::new();
    map.insert("COLLABDESK_CLIENT_TIMEOUT_SECS", "3");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.client_timeout_secs, 3);
}
