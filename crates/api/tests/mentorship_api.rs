//! HTTP-level tests for mentorships, sessions, payments and the hour balance.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_mentorship, decimal, delete, get, post_json, put_json};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_session(pool: &PgPool, mentorship_id: i64, body: Value) -> (StatusCode, Value) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/mentorships/{mentorship_id}/sessions"),
        body,
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}

async fn scheduled_session(pool: &PgPool, mentorship_id: i64, minutes: i32) -> i64 {
    let (status, json) = create_session(
        pool,
        mentorship_id,
        json!({ "session_date": "2026-10-05", "start_time": "15:00", "duration_minutes": minutes }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["data"]["id"].as_i64().unwrap()
}

async fn balance(pool: &PgPool, mentorship_id: i64) -> Value {
    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/mentorships/{mentorship_id}/balance")).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

async fn pay(pool: &PgPool, mentorship_id: i64, body: Value) -> (StatusCode, Value) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/mentorships/{mentorship_id}/payments"),
        body,
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}

fn hours(n: i64) -> Decimal {
    Decimal::from(n)
}

// ---------------------------------------------------------------------------
// Mentorships
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn mentorship_defaults_to_active(pool: PgPool) {
    let id = create_mentorship(&pool).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/mentorships/{id}")).await).await;
    assert_eq!(json["data"]["status"], "active");
    assert_eq!(decimal(&json["data"]["hourly_rate"]), Decimal::new(2500, 2));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mentorship_subject_and_end_date_can_be_cleared(pool: PgPool) {
    let id = create_mentorship(&pool).await;
    let subject_id = common::create_subject(&pool, "Piano").await;
    let uri = format!("/api/v1/mentorships/{id}");

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &uri,
        json!({ "subject_id": subject_id, "started_at": "2026-09-01", "ended_at": "2026-12-20" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["subject_id"], subject_id);
    assert_eq!(json["data"]["ended_at"], "2026-12-20");

    // Omitted fields stay put.
    let app = common::build_test_app(pool.clone());
    let json = body_json(put_json(app, &uri, json!({ "notes": "Grade 3 exam" })).await).await;
    assert_eq!(json["data"]["subject_id"], subject_id);
    assert_eq!(json["data"]["ended_at"], "2026-12-20");

    let app = common::build_test_app(pool.clone());
    let response = put_json(app, &uri, json!({ "subject_id": null, "ended_at": null })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["subject_id"].is_null());
    assert!(json["data"]["ended_at"].is_null());
    assert_eq!(json["data"]["started_at"], "2026-09-01");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mentorship_rejects_zero_rate(pool: PgPool) {
    let student_id = common::create_student(&pool, "Ada").await;
    let teacher_id = common::create_teacher(&pool, "Alan", "alan@academy.test").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/mentorships",
        json!({ "student_id": student_id, "teacher_id": teacher_id, "hourly_rate": "0.00" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mentorships_filter_by_student(pool: PgPool) {
    let id = create_mentorship(&pool).await;
    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/mentorships/{id}")).await).await;
    let student_id = json["data"]["student_id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/mentorships?student_id={student_id}")).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/mentorships?student_id={}", student_id + 1)).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn session_duration_must_be_whole_hours(pool: PgPool) {
    let id = create_mentorship(&pool).await;

    let (status, json) = create_session(
        &pool,
        id,
        json!({ "session_date": "2026-10-05", "start_time": "15:00", "duration_minutes": 90 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("multiple of 60"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completing_a_session_debits_once(pool: PgPool) {
    let id = create_mentorship(&pool).await;
    let session_id = scheduled_session(&pool, id, 60).await;
    let uri = format!("/api/v1/mentorships/{id}/sessions/{session_id}/complete");

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, &uri, json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["session"]["status_id"], 2);
    assert_eq!(decimal(&json["data"]["debit"]["hours"]), hours(1));

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, &uri, json!({})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/mentorships/{id}/debits")).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool);
    let json = body_json(
        get(app, &format!("/api/v1/mentorships/{id}/sessions/{session_id}/attendance")).await,
    )
    .await;
    assert_eq!(json["data"]["status_id"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cancelled_session_is_not_debited(pool: PgPool) {
    let id = create_mentorship(&pool).await;
    let session_id = scheduled_session(&pool, id, 120).await;
    let base = format!("/api/v1/mentorships/{id}/sessions/{session_id}");

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, &format!("{base}/cancel"), json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, &format!("{base}/complete"), json!({})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    assert_eq!(decimal(&balance(&pool, id).await["debited_hours"]), hours(0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn session_created_as_completed_is_debited_immediately(pool: PgPool) {
    let id = create_mentorship(&pool).await;

    let (status, json) = create_session(
        &pool,
        id,
        json!({
            "session_date": "2026-10-01",
            "start_time": "09:00",
            "duration_minutes": 120,
            "status": "completed",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["status_id"], 2);
    let session_id = json["data"]["id"].as_i64().unwrap();

    let totals = balance(&pool, id).await;
    assert_eq!(decimal(&totals["debited_hours"]), hours(2));
    assert_eq!(decimal(&totals["balance_hours"]), hours(-2));

    // Deleting the session removes its debit.
    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/mentorships/{id}/sessions/{session_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let totals = balance(&pool, id).await;
    assert_eq!(decimal(&totals["debited_hours"]), hours(0));
    assert_eq!(totals["debit_count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completed_session_cannot_be_rescheduled(pool: PgPool) {
    let id = create_mentorship(&pool).await;
    let session_id = scheduled_session(&pool, id, 60).await;
    let base = format!("/api/v1/mentorships/{id}/sessions/{session_id}");

    let app = common::build_test_app(pool.clone());
    post_json(app, &format!("{base}/complete"), json!({})).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(app, &base, json!({ "duration_minutes": 120 })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let app = common::build_test_app(pool);
    let response = put_json(app, &base, json!({ "notes": "Covered recursion" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["notes"], "Covered recursion");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn session_attendance_discards_notification_unless_absent(pool: PgPool) {
    let id = create_mentorship(&pool).await;
    let session_id = scheduled_session(&pool, id, 60).await;
    let uri = format!("/api/v1/mentorships/{id}/sessions/{session_id}/attendance");

    let app = common::build_test_app(pool.clone());
    let response = get(app, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool.clone());
    let response = put_json(app, &uri, json!({ "status": "late", "absence_notified": true })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status_id"], 2);
    assert_eq!(json["data"]["absence_notified"], false);

    let app = common::build_test_app(pool);
    let response = put_json(app, &uri, json!({ "status": "absent", "absence_notified": true })).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status_id"], 3);
    assert_eq!(json["data"]["absence_notified"], true);
}

// ---------------------------------------------------------------------------
// Payments and balance
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn payment_hours_derive_from_hourly_rate(pool: PgPool) {
    let id = create_mentorship(&pool).await;

    let (status, json) = pay(&pool, id, json!({ "amount": "100.00" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(decimal(&json["data"]["hours"]), hours(4));
    assert!(json["data"]["paid_at"].is_null());

    let (status, json) = pay(
        &pool,
        id,
        json!({ "amount": "50.00", "hours": "3", "paid_at": "2026-10-02" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(decimal(&json["data"]["hours"]), hours(3));
    assert_eq!(json["data"]["paid_at"], "2026-10-02");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn payment_amount_must_be_positive(pool: PgPool) {
    let id = create_mentorship(&pool).await;

    let (status, _) = pay(&pool, id, json!({ "amount": "0" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = pay(&pool, id, json!({ "amount": "10.00", "paid_at": "yesterday" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn payment_values_must_fit_their_columns(pool: PgPool) {
    let id = create_mentorship(&pool).await;

    let (status, json) = pay(&pool, id, json!({ "amount": "1000000000.00", "hours": "1" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("amount must be at most"));

    let (status, _) = pay(&pool, id, json!({ "amount": "10.00", "hours": "100000000" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = pay(&pool, id, json!({ "amount": "99999999.99", "hours": "1" })).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn derived_hours_beyond_range_are_rejected(pool: PgPool) {
    let id = create_mentorship(&pool).await;
    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/mentorships/{id}"),
        json!({ "hourly_rate": "0.01" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let (status, json) = pay(&pool, id, json!({ "amount": "1000000.00" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{json}");
    assert!(json["error"].as_str().unwrap().contains("hours must be at most"));
    assert_eq!(balance(&pool, id).await["payment_count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn balance_combines_payments_and_debits(pool: PgPool) {
    let id = create_mentorship(&pool).await;

    let empty = balance(&pool, id).await;
    assert_eq!(decimal(&empty["balance_hours"]), hours(0));
    assert_eq!(empty["payment_count"], 0);

    pay(&pool, id, json!({ "amount": "100.00" })).await;
    let session_id = scheduled_session(&pool, id, 180).await;
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        &format!("/api/v1/mentorships/{id}/sessions/{session_id}/complete"),
        json!({}),
    )
    .await;

    let totals = balance(&pool, id).await;
    assert_eq!(totals["mentorship_id"], id);
    assert_eq!(decimal(&totals["credited_hours"]), hours(4));
    assert_eq!(decimal(&totals["debited_hours"]), hours(3));
    assert_eq!(decimal(&totals["balance_hours"]), hours(1));
    assert_eq!(decimal(&totals["total_paid"]), Decimal::new(10000, 2));
    assert_eq!(totals["payment_count"], 1);
    assert_eq!(totals["debit_count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_a_payment_reduces_credit(pool: PgPool) {
    let id = create_mentorship(&pool).await;
    let (_, json) = pay(&pool, id, json!({ "amount": "50.00" })).await;
    let payment_id = json["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/mentorships/{id}/payments/{payment_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let totals = balance(&pool, id).await;
    assert_eq!(decimal(&totals["credited_hours"]), hours(0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rate_change_only_affects_future_payments(pool: PgPool) {
    let id = create_mentorship(&pool).await;
    pay(&pool, id, json!({ "amount": "100.00" })).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(app, &format!("/api/v1/mentorships/{id}"), json!({ "hourly_rate": "50.00" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let (_, json) = pay(&pool, id, json!({ "amount": "100.00" })).await;
    assert_eq!(decimal(&json["data"]["hours"]), hours(2));

    let totals = balance(&pool, id).await;
    assert_eq!(decimal(&totals["credited_hours"]), hours(6));
}
