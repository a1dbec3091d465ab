//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use hustle_core::clock::Clock;
use hustle_narrative::domain::hustle::HUSTLE;
use hustle_store::pg_progress_repository::PgProgressRepository;
use hustle_test_support::{FixedClock, RecordingGateway};
use sqlx::PgPool;
use tower::ServiceExt;

use hustle_api::routes;
use hustle_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build the full app router with a real `PgProgressRepository` and a
/// gateway that discards replies.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_gateway(pool, Arc::new(RecordingGateway::new()))
}

/// Build the full app router, recording outbound replies in `gateway`. Uses
/// the same route structure as `main.rs`.
pub fn build_test_app_with_gateway(pool: PgPool, gateway: Arc<RecordingGateway>) -> Router {
    let progress_repository = Arc::new(PgProgressRepository::new(pool));
    let app_state = AppState::new(fixed_clock(), progress_repository, gateway, &HUSTLE);

    Router::new()
        .merge(routes::health::router())
        .nest("/sms", routes::sms::router())
        .nest("/api/v1/players", routes::players::router())
        .with_state(app_state)
}

/// Send a POST request with a form-encoded body and return the response.
pub async fn post_form(app: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send an inbound SMS from `from` with body `text`.
pub async fn send_sms(app: Router, from: &str, text: &str) -> (StatusCode, serde_json::Value) {
    let body = format!(
        "from={}&text={}&to=12345&linkId=link-1",
        from.replace('+', "%2B"),
        text.replace(' ', "+")
    );
    post_form(app, "/sms/inbound", &body).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
