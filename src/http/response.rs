//! Error responses.
//!
//! # Design Decisions
//! - Every failure after admission is an opaque 500; the classification is
//!   logged, never returned
//! - Admission failures are the only caller-visible reason strings

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::security::DenialReason;
use crate::upstream::GatewayError;

/// Failure of a route handler, tagged with the operation for the log line.
#[derive(Debug)]
pub struct ApiError {
    operation: &'static str,
    source: GatewayError,
}

impl ApiError {
    pub fn new(operation: &'static str, source: impl Into<GatewayError>) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(
            operation = self.operation,
            kind = self.source.kind(),
            error = %self.source,
            "Upstream request failed"
        );
        internal_error()
    }
}

/// 500 with the generic body.
pub fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}

/// 401 carrying the denial reason.
pub fn unauthorized(reason: DenialReason) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Unauthorized", "message": reason.message() })),
    )
        .into_response()
}
