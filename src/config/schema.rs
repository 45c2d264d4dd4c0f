//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::registry::addressing::{FAMILY_NAME, FAMILY_VERSION};

/// Root configuration for the Consensource client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Ledger node REST API settings.
    pub rest_api: RestApiConfig,

    /// Availability and commit polling.
    pub polling: PollingConfig,

    /// Transaction family identity.
    pub family: FamilyConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// REST API connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RestApiConfig {
    /// Base URL, or bare `host:port` (http is assumed).
    pub url: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for RestApiConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8008".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Attempts made while waiting for the REST API to come up.
    pub availability_tries: u32,

    /// Linear backoff step; attempt n sleeps n * step.
    pub backoff_step_ms: u64,

    /// Server-side wait passed to `/batch_statuses`.
    pub status_wait_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            availability_tries: 5,
            backoff_step_ms: 2000,
            status_wait_secs: 10,
        }
    }
}

/// Transaction family name and version.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FamilyConfig {
    pub name: String,
    pub version: String,
}

impl Default for FamilyConfig {
    fn default() -> Self {
        Self {
            name: FAMILY_NAME.to_string(),
            version: FAMILY_VERSION.to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.rest_api.url, "http://localhost:8008");
        assert_eq!(config.polling.availability_tries, 5);
        assert_eq!(config.polling.backoff_step_ms, 2000);
        assert_eq!(config.polling.status_wait_secs, 10);
        assert_eq!(config.family.name, "certificate_registry");
        assert_eq!(config.family.version, "0.1");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
            [rest_api]
            url = "rest-api:8008"

            [polling]
            availability_tries = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.rest_api.url, "rest-api:8008");
        assert_eq!(config.rest_api.request_timeout_secs, 30);
        assert_eq!(config.polling.availability_tries, 10);
        assert_eq!(config.polling.backoff_step_ms, 2000);
        assert_eq!(config.observability.log_level, "info");
    }
}
