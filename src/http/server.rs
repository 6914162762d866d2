//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the shared `AppState` (upstream forwarder, admission gate, config)
//! - Assemble the Axum router with its middleware stack
//! - Serve on a bound listener until the shutdown broadcast fires
//!
//! # Layer Order (outermost first)
//! ```text
//! SetRequestId → PropagateRequestId → Trace → [Cors] → ApiKey gate → routes
//! ```

use std::sync::Arc;

use axum::{body::Body, http::Request, middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::GatewayConfig;
use crate::http::middleware::api_key_middleware;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::lifecycle::startup::StartupError;
use crate::security::{cors::cors_layer, ApiKeyGate};
use crate::upstream::{Forwarder, Upstream};

/// Application state injected into handlers and the gate.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn Upstream>,
    pub gate: Arc<ApiKeyGate>,
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    pub fn new(config: GatewayConfig, upstream: Arc<dyn Upstream>) -> Result<Self, StartupError> {
        let gate = ApiKeyGate::from_config(&config.api_key)?;
        Ok(Self {
            upstream,
            gate: Arc::new(gate),
            config: Arc::new(config),
        })
    }
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server forwarding to the configured upstream over HTTP.
    pub fn new(config: GatewayConfig) -> Result<Self, StartupError> {
        let forwarder = Forwarder::from_config(&config.rawg).map_err(StartupError::Client)?;
        Self::with_upstream(config, Arc::new(forwarder))
    }

    /// Create a server over any upstream implementation.
    pub fn with_upstream(config: GatewayConfig, upstream: Arc<dyn Upstream>) -> Result<Self, StartupError> {
        let state = AppState::new(config, upstream)?;
        Ok(Self {
            router: build_router(state),
        })
    }

    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    let mut router = api::routes()
        .layer(middleware::from_fn_with_state(state.clone(), api_key_middleware))
        .with_state(state);

    if let Some(cors) = cors {
        router = router.layer(cors);
    }

    router
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                path = %req.uri().path(),
                request_id = %request_id(req.headers()),
            )
        }))
        .layer(propagate_request_id_layer())
        .layer(set_request_id_layer())
}
