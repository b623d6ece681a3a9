use std::env;
use std::fs;
use std::path::Path;

use birthbook_core::MalformedBirthdayPolicy;
use crate::config::{MetricsProfile, ServerConfig};

use super::ConfigWarning;

pub(super) fn load_config(path: &str, warnings: &mut Vec<ConfigWarning>) -> ServerConfig {
    if !Path::new(path).exists() {
        return ServerConfig::default();
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            warnings.push(ConfigWarning::new("config_read_failed", path, err.to_string()));
            return ServerConfig::default();
        }
    };
    match serde_yaml::from_str(&contents) {
        Ok(config) => config,
        Err(err) => {
            warnings.push(ConfigWarning::new("config_parse_failed", path, err.to_string()));
            ServerConfig::default()
        }
    }
}

pub(super) fn apply_server_env_overrides(
    config: &mut ServerConfig,
    warnings: &mut Vec<ConfigWarning>,
) {
    if let Ok(value) = env::var("BIRTHBOOK_MAX_BODY_BYTES") {
        match value.trim().parse::<usize>() {
            Ok(bytes) if bytes > 0 => config.server.max_body_bytes = bytes,
            _ => warnings.push(ConfigWarning::invalid("BIRTHBOOK_MAX_BODY_BYTES", &value)),
        }
    }
    if let Ok(value) = env::var("BIRTHBOOK_SERVER_NAME") {
        let value = value.trim();
        if !value.is_empty() {
            config.server.name = Some(value.to_string());
        }
    }
}

pub(super) fn apply_database_env_overrides(
    config: &mut ServerConfig,
    warnings: &mut Vec<ConfigWarning>,
) {
    if let Ok(value) = env::var("BIRTHBOOK_DB_AUTO_MIGRATE") {
        if let Some(enabled) = parse_bool(&value) {
            config.database.auto_migrate = enabled;
        } else {
            warnings.push(ConfigWarning::invalid("BIRTHBOOK_DB_AUTO_MIGRATE", &value));
        }
    }
}

pub(super) fn apply_search_env_overrides(
    config: &mut ServerConfig,
    warnings: &mut Vec<ConfigWarning>,
) {
    if let Ok(value) = env::var("BIRTHBOOK_SEARCH_MALFORMED_BIRTHDAYS") {
        if let Some(policy) = parse_malformed_policy(&value) {
            config.search.malformed_birthdays = policy;
        } else {
            warnings.push(ConfigWarning::invalid(
                "BIRTHBOOK_SEARCH_MALFORMED_BIRTHDAYS",
                &value,
            ));
        }
    }
}

pub(super) fn apply_tracing_env_overrides(
    config: &mut ServerConfig,
    warnings: &mut Vec<ConfigWarning>,
) {
    if let Ok(value) = env::var("BIRTHBOOK_TRACING_OTEL_ENABLED") {
        if let Some(enabled) = parse_bool(&value) {
            config.tracing.otel.enabled = enabled;
        } else {
            warnings.push(ConfigWarning::invalid("BIRTHBOOK_TRACING_OTEL_ENABLED", &value));
        }
    }
    if let Ok(value) = env::var("BIRTHBOOK_TRACING_OTEL_ENDPOINT") {
        let value = value.trim();
        if !value.is_empty() {
            config.tracing.otel.endpoint = Some(value.to_string());
        }
    }
}

pub(super) fn apply_metrics_env_overrides(
    config: &mut ServerConfig,
    warnings: &mut Vec<ConfigWarning>,
) {
    if let Ok(value) = env::var("BIRTHBOOK_METRICS_ENABLED") {
        if let Some(enabled) = parse_bool(&value) {
            config.metrics.enabled = enabled;
        } else {
            warnings.push(ConfigWarning::invalid("BIRTHBOOK_METRICS_ENABLED", &value));
        }
    }
    if let Ok(value) = env::var("BIRTHBOOK_METRICS_ENDPOINT") {
        let value = value.trim();
        if !value.is_empty() {
            config.metrics.endpoint = value.to_string();
        }
    }
    if let Ok(value) = env::var("BIRTHBOOK_METRICS_PROFILE") {
        if let Some(profile) = parse_metrics_profile(&value) {
            config.metrics.profile = Some(profile);
        } else {
            warnings.push(ConfigWarning::invalid("BIRTHBOOK_METRICS_PROFILE", &value));
        }
    }
}

pub(super) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn normalize_enum(value: &str) -> String {
    value.trim().to_ascii_lowercase().replace('-', "_")
}

fn parse_malformed_policy(value: &str) -> Option<MalformedBirthdayPolicy> {
    match normalize_enum(value).as_str() {
        "skip" => Some(MalformedBirthdayPolicy::Skip),
        "reject" => Some(MalformedBirthdayPolicy::Reject),
        _ => None,
    }
}

fn parse_metrics_profile(value: &str) -> Option<MetricsProfile> {
    match normalize_enum(value).as_str() {
        "prod" | "production" => Some(MetricsProfile::Prod),
        "staging" => Some(MetricsProfile::Staging),
        "debug" => Some(MetricsProfile::Debug),
        _ => None,
    }
}
