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
use crate::models::{Game, Genre, Paginated};
use crate::upstream::{fetch, QueryParams};

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/genres", get(list_genres))
        .route("/api/genres/{id}", get(genre_details))
        .route("/api/genres/{id}/games", get(genre_games))
}

async fn list_genres(
    State(state): State<AppState>,
    Query(query): Query<OrderedPageQuery>,
) -> Result<Json<Paginated<Genre>>, ApiError> {
    let start = Instant::now();
    let result = fetch(state.upstream.as_ref(), "genres", &query.to_params()).await;
    respond("/api/genres", "list genres", start, result)
}

async fn genre_details(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Genre>, ApiError> {
    let start = Instant::now();
    let endpoint = format!("genres/{id}");
    let result = fetch(state.upstream.as_ref(), &endpoint, &QueryParams::new()).await;
    respond("/api/genres/{id}", "get genre", start, result)
}

async fn genre_games(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<OrderedPageQuery>,
) -> Result<Json<Paginated<Game>>, ApiError> {
    let start = Instant::now();
    let endpoint = format!("genres/{id}/games");
    let result = fetch(state.upstream.as_ref(), &endpoint, &query.to_params()).await;
    respond("/api/genres/{id}/games", "list genre games", start, result)
}
