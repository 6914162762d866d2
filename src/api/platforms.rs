use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use super::params::OrderedPageQuery;
use super::respond;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::models::{Game, Paginated, Platform};
use crate::upstream::{fetch, QueryParams};

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/platforms", get(list_platforms))
        .route("/api/platforms/{id}", get(platform_details))
        .route("/api/platforms/{id}/games", get(platform_games))
}

async fn list_platforms(
    State(state): State<AppState>,
    Query(query): Query<OrderedPageQuery>,
) -> Result<Json<Paginated<Platform>>, ApiError> {
    let start = Instant::now();
    let result = fetch(state.upstream.as_ref(), "platforms", &query.to_params()).await;
    respond("/api/platforms", "list platforms", start, result)
}

async fn platform_details(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Platform>, ApiError> {
    let start = Instant::now();
    let endpoint = format!("platforms/{id}");
    let result = fetch(state.upstream.as_ref(), &endpoint, &QueryParams::new()).await;
    respond("/api/platforms/{id}", "get platform", start, result)
}

async fn platform_games(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<OrderedPageQuery>,
) -> Result<Json<Paginated<Game>>, ApiError> {
    let start = Instant::now();
    let endpoint = format!("platforms/{id}/games");
    let result = fetch(state.upstream.as_ref(), &endpoint, &query.to_params()).await;
    respond("/api/platforms/{id}/games", "list platform games", start, result)
}
