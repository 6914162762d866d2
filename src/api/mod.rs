//! Inbound route handlers.
//!
//! Each handler maps its path and query onto an upstream endpoint with
//! [`QueryParams`](crate::upstream::QueryParams), forwards through the shared
//! `Upstream`, and returns the decoded model as JSON.

mod games;
mod genres;
pub mod params;
mod platforms;
mod status;

#[cfg(test)]
pub(crate) mod fake;

use std::time::Instant;

use axum::{Json, Router};

use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::upstream::GatewayError;

/// Every route the gateway serves.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(games::routes())
        .merge(platforms::routes())
        .merge(genres::routes())
        .merge(status::routes())
}

/// Record the request histogram and turn a forwarding result into a response.
fn respond<T>(
    route: &'static str,
    operation: &'static str,
    start: Instant,
    result: Result<T, GatewayError>,
) -> Result<Json<T>, ApiError> {
    match result {
        Ok(body) => {
            metrics::record_request(route, 200, start);
            Ok(Json(body))
        }
        Err(err) => {
            metrics::record_request(route, 500, start);
            Err(ApiError::new(operation, err))
        }
    }
}
