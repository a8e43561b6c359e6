//! End-to-end checks of the HTTP surface against the in-memory store.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use cinema_booking::{build_router, config::Config, storage::LocalStore, AppState};

/// Router over a memory store where no seat starts out booked.
async fn app() -> Router {
    let config = Config::from_lookup(|key| match key {
        "SEAT_BOOKED_PROBABILITY" => Some("0".to_string()),
        _ => None,
    })
    .unwrap();
    let state = AppState::build(config, LocalStore::memory(), None, None).await.unwrap();
    build_router(Arc::new(state))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, _, bytes) = send_raw(app, method, uri, body).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, bytes.to_vec())
}

fn titles(movies: &Value) -> Vec<&str> {
    movies
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect()
}

async fn open_seat_map(app: &Router, movie_id: u64) -> String {
    let (status, body) = send(app, Method::POST, &format!("/api/movies/{}/seats", movie_id), None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_reports_memory_store() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
    assert_eq!(body["database"], "disabled");
    assert_eq!(body["catalog"], "local");
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn movie_listing_filters_by_search_and_genre() {
    let app = app().await;

    let (_, all) = send(&app, Method::GET, "/api/movies", None).await;
    assert_eq!(titles(&all).len(), 6);

    let (_, all_genre) = send(&app, Method::GET, "/api/movies?genre=All", None).await;
    assert_eq!(titles(&all_genre).len(), 6);

    let (_, spider) = send(&app, Method::GET, "/api/movies?search=SPIDER", None).await;
    assert_eq!(titles(&spider), vec!["Spider-Man: No Way Home"]);

    let (_, crime) = send(&app, Method::GET, "/api/movies?genre=Crime", None).await;
    assert_eq!(titles(&crime), vec!["The Batman"]);

    let (_, both) = send(&app, Method::GET, "/api/movies?search=the&genre=Drama", None).await;
    assert_eq!(titles(&both), vec!["The Batman"]);

    let (_, none) = send(&app, Method::GET, "/api/movies?search=matrix", None).await;
    assert!(titles(&none).is_empty());
}

#[tokio::test]
async fn genres_and_single_lookups() {
    let app = app().await;

    let (_, genres) = send(&app, Method::GET, "/api/genres", None).await;
    assert_eq!(genres, json!(["All", "Action", "Adventure", "Drama", "Sci-Fi", "Crime"]));

    let (status, dune) = send(&app, Method::GET, "/api/movies/4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dune["title"], "Dune");

    let (status, _) = send(&app, Method::GET, "/api/movies/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, theater) = send(&app, Method::GET, "/api/theaters/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(theater["name"], "Cinepolis Pune");
}

#[tokio::test]
async fn seat_map_has_ten_priced_rows() {
    let app = app().await;
    let session = open_seat_map(&app, 1).await;

    let (status, map) = send(&app, Method::GET, &format!("/api/seat-maps/{}", session), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(map["showing"]["movie_title"], "Avengers: Endgame");
    assert_eq!(map["showing"]["theater"], "PVR Cinemas - Mall of India");

    let rows = map["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0]["row"], "A");
    assert_eq!(rows[0]["price"], 200);
    assert_eq!(rows[5]["price"], 150);
    assert_eq!(rows[9]["price"], 100);
    assert!(rows.iter().all(|r| r["seats"].as_array().unwrap().len() == 12));
    assert_eq!(map["summary"]["count"], 0);
}

#[tokio::test]
async fn toggling_seats_updates_the_summary() {
    let app = app().await;
    let session = open_seat_map(&app, 2).await;
    let seat = |id: &str| format!("/api/seat-maps/{}/seats/{}", session, id);

    let (status, a1) = send(&app, Method::PATCH, &seat("A1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(a1["status"], "selected");
    assert_eq!(a1["summary"]["total_price"], 200);

    let (_, j12) = send(&app, Method::PATCH, &seat("j12"), None).await;
    assert_eq!(j12["seat_id"], "J12");
    assert_eq!(j12["summary"]["count"], 2);
    assert_eq!(j12["summary"]["total_price"], 300);

    let (_, again) = send(&app, Method::PATCH, &seat("A1"), None).await;
    assert_eq!(again["status"], "available");
    assert_eq!(again["summary"]["seats"], json!(["J12"]));
    assert_eq!(again["summary"]["total_price"], 100);

    let (status, _) = send(&app, Method::PATCH, &seat("K1"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn checkout_needs_a_selection_and_records_a_booking() {
    let app = app().await;
    let session = open_seat_map(&app, 4).await;
    let checkout = format!("/api/seat-maps/{}/checkout?user=asha", session);

    let (status, body) = send(&app, Method::POST, &checkout, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    send(&app, Method::PATCH, &format!("/api/seat-maps/{}/seats/D5", session), None).await;
    send(&app, Method::PATCH, &format!("/api/seat-maps/{}/seats/D6", session), None).await;

    let (status, receipt) = send(&app, Method::POST, &checkout, None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(receipt["movie_title"], "Dune");
    assert_eq!(receipt["seats"], json!(["D5", "D6"]));
    assert_eq!(receipt["total_price"], 300);
    assert_eq!(receipt["booking_status"], "confirmed");
    assert_eq!(receipt["payment_status"], "pending");
    assert!(receipt["reference"].as_str().unwrap().starts_with("CB-"));

    // The session is gone after checkout
    let (status, _) = send(&app, Method::GET, &format!("/api/seat-maps/{}", session), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, bookings) = send(&app, Method::GET, "/api/admin/bookings", None).await;
    let bookings = bookings.as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["user"], "asha");
    assert_eq!(bookings[0]["seats"], 2);
    assert_eq!(bookings[0]["amount"], 300);
}

#[tokio::test]
async fn text_receipt_is_an_attachment() {
    let app = app().await;
    let session = open_seat_map(&app, 3).await;
    send(&app, Method::PATCH, &format!("/api/seat-maps/{}/seats/A2", session), None).await;

    let uri = format!("/api/seat-maps/{}/checkout?format=text", session);
    let (status, headers, body) = send_raw(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::CREATED);

    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.contains("BookingReceipt_The_Batman.txt"));

    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("Movie: The Batman"));
    assert!(text.contains("Seats: A2"));
    assert!(text.contains("Total Amount: ₹200"));
    assert!(text.contains("Booking Status: confirmed"));
}

#[tokio::test]
async fn discarding_a_seat_map() {
    let app = app().await;
    let session = open_seat_map(&app, 5).await;
    let uri = format!("/api/seat-maps/{}", session);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_manages_movies() {
    let app = app().await;

    let form = json!({
        "title": "Jawan",
        "duration_minutes": 169,
        "genre": "Action, Thriller",
        "language": "Hindi"
    });
    let (status, movie) = send(&app, Method::POST, "/api/admin/movies", Some(form)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(movie["duration"], "2h 49m");
    assert_eq!(movie["genre"], json!(["Action", "Thriller"]));

    let (_, thrillers) = send(&app, Method::GET, "/api/movies?genre=Thriller", None).await;
    assert_eq!(titles(&thrillers), vec!["Jawan"]);

    let id = movie["id"].as_u64().unwrap();
    let (status, _) = send(&app, Method::DELETE, &format!("/api/admin/movies/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/admin/movies/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_rejects_invalid_forms() {
    let app = app().await;

    let movie = json!({"title": "", "duration_minutes": 120, "genre": "Drama", "language": "English"});
    let (status, body) = send(&app, Method::POST, "/api/admin/movies", Some(movie)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let theater = json!({"name": "PVR", "location": "Pune", "capacity": 0, "screens": 2});
    let (status, _) = send(&app, Method::POST, "/api/admin/theaters", Some(theater)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_showtimes_and_stats() {
    let app = app().await;

    let (_, showtimes) = send(&app, Method::GET, "/api/admin/showtimes", None).await;
    assert_eq!(showtimes.as_array().unwrap().len(), 2);

    let form = json!({
        "movie": "Dune",
        "theater": "INOX Camp",
        "date": "2025-09-22",
        "time": "21:15",
        "screen": 3
    });
    let (status, showtime) = send(&app, Method::POST, "/api/admin/showtimes", Some(form)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(showtime["time"], "21:15");

    open_seat_map(&app, 1).await;

    let (status, stats) = send(&app, Method::GET, "/api/admin/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_movies"], 6);
    assert_eq!(stats["total_theaters"], 2);
    assert_eq!(stats["active_screens"], 7);
    assert_eq!(stats["total_bookings"], 0);
    assert_eq!(stats["revenue"], 0);
    assert_eq!(stats["open_seat_maps"], 1);
}

#[tokio::test]
async fn auth_forms_are_acknowledged_only() {
    let app = app().await;

    let login = json!({"email": "asha@example.com", "password": "secret"});
    let (status, body) = send(&app, Method::POST, "/api/login", Some(login)).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["email"], "asha@example.com");
    assert!(body.get("password").is_none());

    let bad = json!({"name": "Asha", "email": "not-an-email", "password": "x"});
    let (status, _) = send(&app, Method::POST, "/api/register", Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
