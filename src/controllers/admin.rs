use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::models::{BookingRecord, Movie, NewMovie, NewShowtime, NewTheater, Showtime, Theater};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stats", get(stats))
        .route("/movies", get(list_movies).post(add_movie))
        .route("/movies/{id}", delete(delete_movie))
        .route("/theaters", get(list_theaters).post(add_theater))
        .route("/theaters/{id}", delete(delete_theater))
        .route("/showtimes", get(list_showtimes).post(add_showtime))
        .route("/showtimes/{id}", delete(delete_showtime))
        .route("/bookings", get(list_bookings))
        .route("/bookings/{id}", delete(delete_booking))
}

fn deleted(removed: bool, what: &str, id: u64) -> ApiResult<StatusCode> {
    if removed {
        tracing::info!("Deleted {} {}", what, id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("{} {} not found", what, id)))
    }
}

/* ---------- dashboard ---------- */

#[derive(Debug, Serialize)]
struct StatsResponse {
    total_movies: usize,
    total_theaters: usize,
    active_screens: u32,
    total_bookings: usize,
    revenue: u64,
    open_seat_maps: usize,
}

// GET /api/admin/stats
async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let theaters = state.catalog.theaters.list().await;
    let bookings = state.bookings.list().await;

    Json(StatsResponse {
        total_movies: state.catalog.movies.len().await,
        total_theaters: theaters.len(),
        active_screens: theaters.iter().map(|t| t.screens).sum(),
        total_bookings: bookings.len(),
        revenue: bookings.iter().map(|b| u64::from(b.amount)).sum(),
        open_seat_maps: state.sessions.len().await,
    })
}

/* ---------- movies ---------- */

async fn list_movies(State(state): State<Arc<AppState>>) -> Json<Vec<Movie>> {
    Json(state.catalog.movies.list().await)
}

async fn add_movie(
    State(state): State<Arc<AppState>>,
    Json(form): Json<NewMovie>,
) -> ApiResult<(StatusCode, Json<Movie>)> {
    form.validate()?;
    let movie = state.catalog.movies.add(form).await?;
    tracing::info!("Added movie {} ({})", movie.id, movie.title);
    Ok((StatusCode::CREATED, Json(movie)))
}

async fn delete_movie(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> ApiResult<StatusCode> {
    deleted(state.catalog.movies.delete(id).await?, "movie", id)
}

/* ---------- theaters ---------- */

async fn list_theaters(State(state): State<Arc<AppState>>) -> Json<Vec<Theater>> {
    Json(state.catalog.theaters.list().await)
}

async fn add_theater(
    State(state): State<Arc<AppState>>,
    Json(form): Json<NewTheater>,
) -> ApiResult<(StatusCode, Json<Theater>)> {
    form.validate()?;
    let theater = state.catalog.theaters.add(form).await?;
    tracing::info!("Added theater {} ({})", theater.id, theater.name);
    Ok((StatusCode::CREATED, Json(theater)))
}

async fn delete_theater(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> ApiResult<StatusCode> {
    deleted(state.catalog.theaters.delete(id).await?, "theater", id)
}

/* ---------- showtimes ---------- */

async fn list_showtimes(State(state): State<Arc<AppState>>) -> Json<Vec<Showtime>> {
    Json(state.showtimes.list().await)
}

async fn add_showtime(
    State(state): State<Arc<AppState>>,
    Json(form): Json<NewShowtime>,
) -> ApiResult<(StatusCode, Json<Showtime>)> {
    form.validate()?;
    let showtime = state.showtimes.add(form).await?;
    Ok((StatusCode::CREATED, Json(showtime)))
}

async fn delete_showtime(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> ApiResult<StatusCode> {
    deleted(state.showtimes.delete(id).await?, "showtime", id)
}

/* ---------- bookings ---------- */

async fn list_bookings(State(state): State<Arc<AppState>>) -> Json<Vec<BookingRecord>> {
    Json(state.bookings.list().await)
}

async fn delete_booking(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> ApiResult<StatusCode> {
    deleted(state.bookings.delete(id).await?, "booking", id)
}
