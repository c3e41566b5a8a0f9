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
    assert_eq!(parse_environment("development"), Environment::Development);
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test"), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.orders_max_depth, 5);
    assert_eq!(cfg.orders_missing_id, MissingIdPolicy::Generate);
    assert_eq!(cfg.orders_sample_len, 240);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("GUESTDESK_ENV", "production");
    map.insert("GUESTDESK_LOG_LEVEL", "debug");
    map.insert("GUESTDESK_ORDERS_MAX_DEPTH", "8");
    map.insert("GUESTDESK_ORDERS_MISSING_ID", "Drop");
    map.insert("GUESTDESK_ORDERS_SAMPLE_LEN", "80");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.orders_max_depth, 8);
    assert_eq!(cfg.orders_missing_id, MissingIdPolicy::Drop);
    assert_eq!(cfg.orders_sample_len, 80);
}

#[test]
fn build_app_config_fails_with_invalid_max_depth() {
    let mut map = HashMap::new();
    map.insert("GUESTDESK_ORDERS_MAX_DEPTH", "deep");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GUESTDESK_ORDERS_MAX_DEPTH"),
        "expected InvalidEnvVar(GUESTDESK_ORDERS_MAX_DEPTH), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_negative_sample_len() {
    let mut map = HashMap::new();
    map.insert("GUESTDESK_ORDERS_SAMPLE_LEN", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GUESTDESK_ORDERS_SAMPLE_LEN"),
        "expected InvalidEnvVar(GUESTDESK_ORDERS_SAMPLE_LEN), got: {result:?}"
    );
}

#[test]
fn parse_missing_id_policy_rejects_unknown_value() {
    let err = parse_missing_id_policy("random").unwrap_err();
    assert!(
        matches!(err, ConfigError::InvalidEnvVar { ref var, ref reason }
            if var == "GUESTDESK_ORDERS_MISSING_ID" && reason.contains("random"))
    );
}

#[test]
fn missing_id_policy_display_round_trips_through_parser() {
    for policy in [MissingIdPolicy::Generate, MissingIdPolicy::Drop] {
        assert_eq!(parse_missing_id_policy(&policy.to_string()).unwrap(), policy);
    }
}
