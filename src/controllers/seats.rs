use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{NewBooking, SeatStatus};
use crate::services::receipt::Receipt;
use crate::services::seat_map::{SeatMap, SeatRow, SelectionSummary};
use crate::services::sessions::{SeatSession, Showing};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies/{id}/seats", post(open_seat_map))
        .route("/seat-maps/{session_id}", get(get_seat_map))
        .route("/seat-maps/{session_id}", delete(discard_seat_map))
        .route("/seat-maps/{session_id}/seats/{seat_id}", patch(toggle_seat))
        .route("/seat-maps/{session_id}/checkout", post(checkout))
}

/* ---------- responses ---------- */

#[derive(Debug, Serialize)]
struct SeatMapResponse<'a> {
    session_id: Uuid,
    showing: &'a Showing,
    rows: Vec<SeatRow<'a>>,
    summary: SelectionSummary,
}

impl<'a> SeatMapResponse<'a> {
    fn new(session: &'a SeatSession) -> Self {
        Self {
            session_id: session.id,
            showing: &session.showing,
            rows: session.seat_map.rows(),
            summary: session.seat_map.summary(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ToggleResponse {
    seat_id: String,
    status: SeatStatus,
    summary: SelectionSummary,
}

/* ---------- handlers ---------- */

#[derive(Debug, Default, Deserialize)]
struct OpenSeatMapParams {
    theater: Option<String>,
    screen: Option<String>,
    date: Option<String>,
    time: Option<String>,
}

// POST /api/movies/{id}/seats
async fn open_seat_map(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<u64>,
    Query(params): Query<OpenSeatMapParams>,
) -> ApiResult<Response> {
    let movie = state
        .catalog
        .find_movie(movie_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("movie {} not found", movie_id)))?;

    let showing = Showing {
        movie_id,
        movie_title: movie.title,
        language: movie.language,
        theater: params.theater.unwrap_or_else(|| "PVR Cinemas - Mall of India".to_string()),
        screen: params.screen.unwrap_or_else(|| "Screen 3".to_string()),
        show_date: params.date.unwrap_or_else(|| "Today".to_string()),
        show_time: params.time.unwrap_or_else(|| "7:30 PM".to_string()),
    };

    // ThreadRng is not Send; keep it out of the await points
    let seat_map = {
        let mut rng = rand::rng();
        SeatMap::generate(&mut rng, state.config.seat_map.booked_probability)
    };

    let session = state.sessions.open(showing, seat_map).await;
    Ok((StatusCode::CREATED, Json(SeatMapResponse::new(&session))).into_response())
}

// GET /api/seat-maps/{session_id}
async fn get_seat_map(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Response> {
    let session = state.sessions.get(session_id).await?;
    Ok(Json(SeatMapResponse::new(&session)).into_response())
}

// PATCH /api/seat-maps/{session_id}/seats/{seat_id}
async fn toggle_seat(
    State(state): State<Arc<AppState>>,
    Path((session_id, seat_id)): Path<(Uuid, String)>,
) -> ApiResult<Json<ToggleResponse>> {
    let seat_id = seat_id.to_uppercase();
    let (status, summary) = state.sessions.toggle(session_id, &seat_id).await?;
    Ok(Json(ToggleResponse { seat_id, status, summary }))
}

// DELETE /api/seat-maps/{session_id}
async fn discard_seat_map(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if state.sessions.discard(session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("seat map {} not found", session_id)))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ReceiptFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Deserialize)]
struct CheckoutParams {
    #[serde(default)]
    format: ReceiptFormat,
    user: Option<String>,
}

// POST /api/seat-maps/{session_id}/checkout
async fn checkout(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Query(params): Query<CheckoutParams>,
) -> ApiResult<Response> {
    let session = state.sessions.checkout(session_id).await?;
    let receipt = Receipt::from_session(&session, chrono::Utc::now());

    let booking = NewBooking {
        user: params
            .user
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| "guest".to_string()),
        movie: receipt.movie_title.clone(),
        theater: receipt.theater.clone(),
        seats: receipt.seats.len() as u32,
        amount: receipt.total_price,
    };
    // The receipt is still issued if the admin table cannot be written
    if let Err(e) = state.bookings.add(booking).await {
        tracing::error!("Failed to record booking {}: {}", receipt.reference, e);
    }

    tracing::info!(
        "Issued receipt {} for {} seats, total {}",
        receipt.reference,
        receipt.seats.len(),
        receipt.total_price
    );

    let response = match params.format {
        ReceiptFormat::Json => (StatusCode::CREATED, Json(receipt)).into_response(),
        ReceiptFormat::Text => {
            let disposition = format!("attachment; filename=\"{}\"", receipt.file_name());
            (
                StatusCode::CREATED,
                [
                    (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                receipt.render_text(),
            )
                .into_response()
        }
    };
    Ok(response)
}
