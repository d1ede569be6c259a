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
fn parse_environment_known_values() {
    assert_eq!(parse_environment("development"), Environment::Development);
    assert_eq!(parse_environment("test"), Environment::Test);
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should load");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.gemini_api_key.is_none());
    assert_eq!(cfg.gemini_model, "gemini-2.5-flash");
    assert_eq!(
        cfg.gemini_base_url,
        "https://generativelanguage.googleapis.com/v1beta/"
    );
    assert_eq!(cfg.gemini_request_timeout_secs, 120);
    assert_eq!(cfg.gemini_max_output_tokens, 8192);
    assert_eq!(cfg.gemini_thinking_budget, 4096);
    assert_eq!(cfg.page_delay_ms, 1000);
    assert_eq!(
        cfg.preferences_path.to_string_lossy(),
        "./.leadminer/preferences.yaml"
    );
    assert_eq!(cfg.export_dir.to_string_lossy(), ".");
}

#[test]
fn build_app_config_reads_api_key() {
    let mut map = HashMap::new();
    map.insert("GEMINI_API_KEY", "  secret-key ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.gemini_api_key.as_deref(), Some("secret-key"));
}

#[test]
fn build_app_config_treats_blank_api_key_as_missing() {
    let mut map = HashMap::new();
    map.insert("GEMINI_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.gemini_api_key.is_none());
}

#[test]
fn debug_output_redacts_api_key() {
    let mut map = HashMap::new();
    map.insert("GEMINI_API_KEY", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("super-secret"), "key leaked: {debug}");
    assert!(debug.contains("[redacted]"));
}

#[test]
fn build_app_config_overrides() {
    let mut map = HashMap::new();
    map.insert("LEADMINER_ENV", "production");
    map.insert("LEADMINER_BIND_ADDR", "127.0.0.1:8080");
    map.insert("GEMINI_MODEL", "gemini-2.5-pro");
    map.insert("GEMINI_THINKING_BUDGET", "0");
    map.insert("LEADMINER_PAGE_DELAY_MS", "0");
    map.insert("LEADMINER_EXPORT_DIR", "/tmp/leads");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:8080");
    assert_eq!(cfg.gemini_model, "gemini-2.5-pro");
    assert_eq!(cfg.gemini_thinking_budget, 0);
    assert_eq!(cfg.page_delay_ms, 0);
    assert_eq!(cfg.export_dir.to_string_lossy(), "/tmp/leads");
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("LEADMINER_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADMINER_BIND_ADDR"),
        "expected InvalidEnvVar(LEADMINER_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_page_delay() {
    let mut map = HashMap::new();
    map.insert("LEADMINER_PAGE_DELAY_MS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADMINER_PAGE_DELAY_MS"),
        "expected InvalidEnvVar(LEADMINER_PAGE_DELAY_MS), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_zero_timeout() {
    let mut map = HashMap::new();
    map.insert("GEMINI_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GEMINI_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(GEMINI_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_negative_max_output_tokens() {
    let mut map = HashMap::new();
    map.insert("GEMINI_MAX_OUTPUT_TOKENS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GEMINI_MAX_OUTPUT_TOKENS"),
        "expected InvalidEnvVar(GEMINI_MAX_OUTPUT_TOKENS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_blank_model() {
    let mut map = HashMap::new();
    map.insert("GEMINI_MODEL", " ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GEMINI_MODEL"),
        "expected InvalidEnvVar(GEMINI_MODEL), got: {result:?}"
    );
}
