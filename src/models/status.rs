use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStatus {
    /// `OK` or `Degraded`.
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub rawg_api_configured: bool,
    /// `Connected`, `Error` or `Not Configured`.
    pub rawg_api_status: String,
    pub api_key_authentication_enabled: bool,
    pub valid_api_keys_count: usize,
}

/// Body of `GET /api/status/health`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: BTreeMap<String, String>,
}
