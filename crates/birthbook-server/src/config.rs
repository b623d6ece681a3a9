use birthbook_core::MalformedBirthdayPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerRuntimeConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub sentry: SentryConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub tracing: TracingConfig,
}

pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerRuntimeConfig {
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    #[serde(default)]
    pub name: Option<String>,
}

impl Default for ServerRuntimeConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: default_max_body_bytes(),
            name: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DatabaseConfig {
    /// Apply embedded migrations when the server starts.
    #[serde(default)]
    pub auto_migrate: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchConfig {
    #[serde(default)]
    pub malformed_birthdays: MalformedBirthdayPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SentryConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub dsn: String,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub release: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_metrics_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub profile: Option<MetricsProfile>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_metrics_endpoint(),
            profile: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MetricsProfile {
    #[default]
    Prod,
    Staging,
    Debug,
}

impl MetricsConfig {
    #[must_use]
    pub fn effective_profile(&self) -> MetricsProfile {
        self.profile.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TracingConfig {
    #[serde(default)]
    pub otel: OtelConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OtelConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub sampling_ratio: Option<f64>,
}

fn default_metrics_endpoint() -> String {
    "/metrics".to_string()
}

const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config: ServerConfig = serde_yaml::from_str("{}").expect("parse");
        assert_eq!(config.server.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert!(!config.database.auto_migrate);
        assert_eq!(
            config.search.malformed_birthdays,
            MalformedBirthdayPolicy::Skip
        );
        assert_eq!(config.metrics.endpoint, "/metrics");
        assert_eq!(config.metrics.effective_profile(), MetricsProfile::Prod);
    }

    #[test]
    fn sections_parse_from_yaml() {
        let config: ServerConfig = serde_yaml::from_str(
            r#"
server:
  name: birthbook-eu
database:
  auto_migrate: true
search:
  malformed_birthdays: reject
metrics:
  enabled: true
  profile: staging
"#,
        )
        .expect("parse");
        assert_eq!(config.server.name.as_deref(), Some("birthbook-eu"));
        assert!(config.database.auto_migrate);
        assert_eq!(
            config.search.malformed_birthdays,
            MalformedBirthdayPolicy::Reject
        );
        assert_eq!(config.metrics.effective_profile(), MetricsProfile::Staging);
    }
}
