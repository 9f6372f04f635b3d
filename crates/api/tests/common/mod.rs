#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use academy_api::config::ServerConfig;
use academy_api::router::build_app_router;
use academy_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        password_min_length: 8,
        max_generation_days: 366,
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// on the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// POST `body` to `uri`, assert 201 and return the created `data.id`.
pub async fn create_id(pool: &PgPool, uri: &str, body: Value) -> i64 {
    let response = post_json(build_test_app(pool.clone()), uri, body).await;
    let status = response.status();
    let json = body_json(response).await;
    assert_eq!(status.as_u16(), 201, "POST {uri} failed: {json}");
    json["data"]["id"].as_i64().unwrap()
}

pub async fn create_student(pool: &PgPool, name: &str) -> i64 {
    create_id(pool, "/api/v1/students", serde_json::json!({ "name": name })).await
}

pub async fn create_subject(pool: &PgPool, name: &str) -> i64 {
    create_id(pool, "/api/v1/subjects", serde_json::json!({ "name": name })).await
}

pub async fn create_teacher(pool: &PgPool, name: &str, email: &str) -> i64 {
    create_id(
        pool,
        "/api/v1/teachers",
        serde_json::json!({
            "name": name,
            "email": email,
            "password": "s3cret-pass",
            "password_confirmation": "s3cret-pass",
        }),
    )
    .await
}

/// A class group meeting Mondays 16:00 and Thursdays 17:30 for the two
/// weeks starting Monday 2026-09-07.
pub async fn create_class_group(pool: &PgPool) -> i64 {
    let subject_id = create_subject(pool, "Mathematics").await;
    let teacher_id = create_teacher(pool, "Grace Hopper", "grace@academy.test").await;
    create_id(
        pool,
        "/api/v1/class-groups",
        serde_json::json!({
            "name": "Algebra A",
            "subject_id": subject_id,
            "teacher_id": teacher_id,
            "term_start": "2026-09-07",
            "term_end": "2026-09-20",
            "default_duration_minutes": 90,
            "hourly_rate": "20.00",
            "weekly_schedule": [
                { "weekday": "monday", "start_time": "16:00" },
                { "weekday": "thursday", "start_time": "17:30" },
            ],
        }),
    )
    .await
}

/// A mentorship at 25.00 per hour with freshly created parties.
pub async fn create_mentorship(pool: &PgPool) -> i64 {
    let student_id = create_student(pool, "Ada Lovelace").await;
    let teacher_id = create_teacher(pool, "Alan Turing", "alan@academy.test").await;
    create_id(
        pool,
        "/api/v1/mentorships",
        serde_json::json!({
            "student_id": student_id,
            "teacher_id": teacher_id,
            "hourly_rate": "25.00",
        }),
    )
    .await
}

/// Parse a serialized decimal (`"4.00"`) for numeric comparison.
pub fn decimal(value: &Value) -> rust_decimal::Decimal {
    value
        .as_str()
        .map(|s| s.parse().unwrap())
        .unwrap_or_else(|| panic!("expected a decimal string, got {value}"))
}
