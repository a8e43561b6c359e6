pub mod admin;
pub mod auth;
pub mod movies;
pub mod seats;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(movies::routes())
        .merge(seats::routes())
        .merge(auth::routes())
        .nest("/admin", admin::routes())
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: &'static str,
    pub store_reachable: bool,
    pub database: &'static str,
    pub catalog: &'static str,
    pub open_seat_maps: usize,
}

// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let store_reachable = state.store.ping().await;
    let database = match &state.db {
        None => "disabled",
        Some(db) if db.ping().await => "connected",
        Some(_) => "unreachable",
    };

    Json(HealthResponse {
        status: if store_reachable { "ok" } else { "degraded" },
        store: state.store.backend_name(),
        store_reachable,
        database,
        catalog: state.catalog.source(),
        open_seat_maps: state.sessions.len().await,
    })
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"success": false, "message": "not found"})),
    )
}
