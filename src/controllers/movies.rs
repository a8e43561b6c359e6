use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::models::{Movie, Theater};
use crate::services::catalog::{filter_movies, GENRES};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(list_movies))
        .route("/movies/{id}", get(get_movie))
        .route("/genres", get(list_genres))
        .route("/theaters", get(list_theaters))
        .route("/theaters/{id}", get(get_theater))
}

#[derive(Debug, Deserialize)]
pub struct MoviesQuery {
    pub search: Option<String>,
    pub genre: Option<String>,
}

// GET /api/movies?search=&genre=
async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MoviesQuery>,
) -> Json<Vec<Movie>> {
    let movies = state.catalog.list_movies().await;
    let filtered = filter_movies(
        &movies,
        params.search.as_deref().unwrap_or_default(),
        params.genre.as_deref(),
    );
    tracing::debug!("{} of {} movies match", filtered.len(), movies.len());
    Json(filtered.into_iter().cloned().collect())
}

// GET /api/movies/{id}
async fn get_movie(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> ApiResult<Json<Movie>> {
    state
        .catalog
        .find_movie(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("movie {} not found", id)))
}

async fn list_genres() -> Json<&'static [&'static str]> {
    Json(&GENRES[..])
}

// GET /api/theaters
async fn list_theaters(State(state): State<Arc<AppState>>) -> Json<Vec<Theater>> {
    Json(state.catalog.list_theaters().await)
}

// GET /api/theaters/{id}
async fn get_theater(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> ApiResult<Json<Theater>> {
    state
        .catalog
        .find_theater(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("theater {} not found", id)))
}
