use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use super::params::{GamesQuery, PageQuery};
use super::respond;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::models::{Game, Paginated, Screenshot, StoreInfo};
use crate::upstream::{fetch, QueryParams};

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/games", get(list_games))
        .route("/api/games/{id}", get(game_details))
        .route("/api/games/{id}/screenshots", get(game_screenshots))
        .route("/api/games/{id}/additions", get(game_additions))
        .route("/api/games/{id}/parent-games", get(parent_games))
        .route("/api/games/{id}/game-series", get(game_series))
        .route("/api/games/{id}/stores", get(game_stores))
}

async fn list_games(
    State(state): State<AppState>,
    Query(query): Query<GamesQuery>,
) -> Result<Json<Paginated<Game>>, ApiError> {
    let start = Instant::now();
    let result = fetch(state.upstream.as_ref(), "games", &query.to_params()).await;
    respond("/api/games", "list games", start, result)
}

async fn game_details(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Game>, ApiError> {
    let start = Instant::now();
    let endpoint = format!("games/{id}");
    let result = fetch(state.upstream.as_ref(), &endpoint, &QueryParams::new()).await;
    respond("/api/games/{id}", "get game", start, result)
}

async fn game_screenshots(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paginated<Screenshot>>, ApiError> {
    let start = Instant::now();
    let endpoint = format!("games/{id}/screenshots");
    let result = fetch(state.upstream.as_ref(), &endpoint, &query.to_params()).await;
    respond("/api/games/{id}/screenshots", "list game screenshots", start, result)
}

async fn game_additions(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paginated<Game>>, ApiError> {
    let start = Instant::now();
    let endpoint = format!("games/{id}/additions");
    let result = fetch(state.upstream.as_ref(), &endpoint, &query.to_params()).await;
    respond("/api/games/{id}/additions", "list game additions", start, result)
}

async fn parent_games(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paginated<Game>>, ApiError> {
    let start = Instant::now();
    let endpoint = format!("games/{id}/parent-games");
    let result = fetch(state.upstream.as_ref(), &endpoint, &query.to_params()).await;
    respond("/api/games/{id}/parent-games", "list parent games", start, result)
}

async fn game_series(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paginated<Game>>, ApiError> {
    let start = Instant::now();
    let endpoint = format!("games/{id}/game-series");
    let result = fetch(state.upstream.as_ref(), &endpoint, &query.to_params()).await;
    respond("/api/games/{id}/game-series", "list game series", start, result)
}

async fn game_stores(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paginated<StoreInfo>>, ApiError> {
    let start = Instant::now();
    let endpoint = format!("games/{id}/stores");
    let result = fetch(state.upstream.as_ref(), &endpoint, &query.to_params()).await;
    respond("/api/games/{id}/stores", "list game stores", start, result)
}
