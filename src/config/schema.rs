//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream RAWG API settings.
    pub rawg: RawgApiConfig,

    /// Inbound API key authentication.
    pub api_key: ApiKeyConfig,

    /// Cross-origin resource sharing.
    pub cors: CorsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream RAWG API configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RawgApiConfig {
    /// Credential injected as `key` into every upstream call.
    pub api_key: String,

    /// Base URL of the upstream API.
    pub base_url: String,

    /// Per-attempt request timeout in seconds.
    pub timeout_secs: u64,

    /// Additional attempts after the first one. Zero disables retries.
    pub max_retries: u32,

    /// Backoff time unit in milliseconds. Retry `n` waits `2^n` units.
    pub backoff_unit_ms: u64,
}

impl RawgApiConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl Default for RawgApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.rawg.io/api".to_string(),
            timeout_secs: 30,
            max_retries: 3,
            backoff_unit_ms: 1000,
        }
    }
}

// The credential must never reach a log line.
impl std::fmt::Debug for RawgApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawgApiConfig")
            .field("api_key", &if self.is_configured() { "<redacted>" } else { "" })
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("backoff_unit_ms", &self.backoff_unit_ms)
            .finish()
    }
}

/// Inbound API key authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiKeyConfig {
    /// Whether callers must present a valid key.
    pub require_api_key: bool,

    /// Accepted caller keys, compared by exact match.
    pub valid_api_keys: Vec<String>,

    /// Header checked first for the caller key.
    pub header_name: String,

    /// Query parameter checked when the header is absent.
    pub query_parameter_name: String,

    /// Per-key quotas. Parsed and reported, not enforced.
    pub rate_limit: RateLimitConfig,
}

impl Default for ApiKeyConfig {
    fn default() -> Self {
        Self {
            require_api_key: false,
            valid_api_keys: Vec::new(),
            header_name: "X-API-Key".to_string(),
            query_parameter_name: "api_key".to_string(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

/// Per-key rate limit quotas.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub requests_per_minute: u32,
    pub requests_per_hour: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 100,
            requests_per_hour: 1000,
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Enable the CORS layer.
    pub enabled: bool,

    /// Allowed origins. `*` allows any origin.
    pub allowed_origins: Vec<String>,

    /// Allowed request methods.
    pub allowed_methods: Vec<String>,

    /// Allowed request headers.
    pub allowed_headers: Vec<String>,

    /// Send `Access-Control-Allow-Credentials: true`.
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            allowed_origins: Vec::new(),
            allowed_methods: vec!["GET".to_string()],
            allowed_headers: vec!["Content-Type".to_string()],
            allow_credentials: false,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.rawg.base_url, "https://api.rawg.io/api");
        assert_eq!(config.rawg.max_retries, 3);
        assert_eq!(config.rawg.timeout_secs, 30);
        assert!(!config.api_key.require_api_key);
        assert_eq!(config.api_key.header_name, "X-API-Key");
        assert_eq!(config.api_key.query_parameter_name, "api_key");
        assert_eq!(config.api_key.rate_limit.requests_per_minute, 100);
        assert!(!config.cors.enabled);
    }

    #[test]
    fn test_debug_redacts_upstream_key() {
        let rawg = RawgApiConfig {
            api_key: "super-secret".into(),
            ..Default::default()
        };
        let printed = format!("{:?}", rawg);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
