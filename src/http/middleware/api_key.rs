//! API key admission middleware.
//! Applies the `ApiKeyGate` decision before a request reaches its handler.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::http::request::request_id;
use crate::http::response::unauthorized;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::security::AdmissionDecision;

pub async fn api_key_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let decision = state
        .gate
        .evaluate(req.uri().path(), req.headers(), req.uri().query());

    match decision {
        AdmissionDecision::Allowed { credential } => {
            metrics::record_admission("allowed");
            if let Some(ctx) = credential {
                req.extensions_mut().insert(ctx);
            }
            next.run(req).await
        }
        AdmissionDecision::Denied(reason) => {
            metrics::record_admission("denied");
            tracing::warn!(
                request_id = %request_id(req.headers()),
                path = %req.uri().path(),
                reason = reason.message(),
                "Request rejected by API key check"
            );
            unauthorized(reason)
        }
    }
}
