//! Status and health reporting. Both routes bypass the API key gate.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;

use crate::http::server::AppState;
use crate::models::{ApiStatus, HealthStatus};
use crate::observability::metrics;
use crate::upstream::QueryParams;

const PROBE_ENDPOINT: &str = "games";

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/status", get(api_status))
        .route("/api/status/health", get(health))
}

/// Live status, including a one-item probe of the upstream when a credential
/// is configured.
async fn api_status(State(state): State<AppState>) -> Json<ApiStatus> {
    let start = Instant::now();
    let configured = state.config.rawg.is_configured();

    let (status, upstream_status) = if configured {
        let mut probe = QueryParams::new();
        probe.insert("page_size", "1");
        match state.upstream.get(PROBE_ENDPOINT, &probe).await {
            Ok(_) => ("OK", "Connected"),
            Err(e) => {
                tracing::warn!(kind = e.kind(), error = %e, "Upstream connectivity probe failed");
                ("Degraded", "Error")
            }
        }
    } else {
        ("OK", "Not Configured")
    };

    metrics::record_request("/api/status", 200, start);
    Json(ApiStatus {
        status: status.to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        rawg_api_configured: configured,
        rawg_api_status: upstream_status.to_string(),
        api_key_authentication_enabled: state.gate.is_required(),
        valid_api_keys_count: state.config.api_key.valid_api_keys.len(),
    })
}

/// Local configuration flags only; never calls the upstream.
async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let mut checks = BTreeMap::new();
    checks.insert(
        "rawg_api_configured".to_string(),
        if state.config.rawg.is_configured() { "OK" } else { "Not Configured" }.to_string(),
    );
    checks.insert(
        "api_key_auth".to_string(),
        if state.gate.is_required() { "Enabled" } else { "Disabled" }.to_string(),
    );

    Json(HealthStatus {
        status: "Healthy".to_string(),
        timestamp: Utc::now(),
        checks,
    })
}
