//! Startup orchestration.
//!
//! # Order
//! ```text
//! CLI → config (file + overrides, validated) → logging → metrics
//!     → outbound client + gate → bind → serve until signal
//! ```
//!
//! Any startup error is fatal and returned to `main`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::http::header::InvalidHeaderName;
use clap::Parser;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_with_overrides, ConfigError, ConfigOverrides, GatewayConfig};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::{logging, metrics};
use crate::resilience::backoff::worst_case_delay;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build upstream HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid API key header name: {0}")]
    HeaderName(#[from] InvalidHeaderName),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Command line of the gateway binary.
#[derive(Debug, Parser)]
#[command(name = "rawg-gateway", version, about = "Authenticated gateway for the RAWG game-data API")]
pub struct Cli {
    /// TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Upstream RAWG API key, overriding `rawg.api_key`.
    #[arg(long, env = "RAWG_API_KEY", hide_env_values = true)]
    pub rawg_api_key: Option<String>,

    /// Listener address, overriding `listener.bind_address`.
    #[arg(long)]
    pub bind: Option<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            rawg_api_key: self.rawg_api_key.clone(),
            bind_address: self.bind.clone(),
        }
    }
}

/// Parse the command line and run the gateway until a shutdown signal.
pub async fn run() -> Result<(), StartupError> {
    let cli = Cli::parse();
    let config = load_with_overrides(cli.config.as_deref(), &cli.overrides())?;

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "rawg-gateway starting");
    log_config(&config);

    if config.observability.metrics_enabled {
        // Address format is checked by validation.
        if let Ok(addr) = config.observability.metrics_address.parse::<SocketAddr>() {
            metrics::init_metrics(addr);
        }
    }

    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            addr: bind_address.clone(),
            source,
        })?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    server
        .run(listener, server_shutdown)
        .await
        .map_err(StartupError::Serve)?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn log_config(config: &GatewayConfig) {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        base_url = %config.rawg.base_url,
        rawg_api_configured = config.rawg.is_configured(),
        timeout_secs = config.rawg.timeout_secs,
        max_retries = config.rawg.max_retries,
        backoff_unit_ms = config.rawg.backoff_unit_ms,
        worst_case_backoff = ?worst_case_delay(
            config.rawg.max_retries,
            Duration::from_millis(config.rawg.backoff_unit_ms),
        ),
        require_api_key = config.api_key.require_api_key,
        valid_api_keys = config.api_key.valid_api_keys.len(),
        cors_enabled = config.cors.enabled,
        "Configuration loaded"
    );

    if !config.rawg.is_configured() {
        tracing::warn!("No upstream RAWG API key configured; data routes will fail");
    }

    let limits = &config.api_key.rate_limit;
    tracing::warn!(
        requests_per_minute = limits.requests_per_minute,
        requests_per_hour = limits.requests_per_hour,
        "Per-key rate limits are configured but not enforced"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_overrides() {
        let cli = Cli::try_parse_from([
            "rawg-gateway",
            "--config",
            "gateway.toml",
            "--rawg-api-key",
            "secret",
            "--bind",
            "127.0.0.1:9000",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("gateway.toml")));
        let overrides = cli.overrides();
        assert_eq!(overrides.rawg_api_key.as_deref(), Some("secret"));
        assert_eq!(overrides.bind_address.as_deref(), Some("127.0.0.1:9000"));
    }

    #[test]
    fn test_startup_error_display() {
        let err = StartupError::Bind {
            addr: "0.0.0.0:80".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().starts_with("failed to bind 0.0.0.0:80"));
    }
}
