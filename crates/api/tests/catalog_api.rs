//! HTTP-level tests for students, subjects and teachers.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_student, create_subject, create_teacher, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_student_returns_201_with_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/students",
        json!({ "name": "Ada Lovelace", "email": "ada@example.test", "phone": "" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Ada Lovelace");
    assert_eq!(json["data"]["email"], "ada@example.test");
    assert!(json["data"]["phone"].is_null(), "blank phone is stored as null");
    assert!(json["data"]["id"].is_number());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn student_name_is_required_and_bounded(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/students", json!({ "name": "   " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/students", json!({ "name": "a".repeat(256) })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/students", json!({ "name": "a".repeat(255) })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn student_invalid_email_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/students",
        json!({ "name": "Ada", "email": "not-an-email" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn student_search_filters_by_name(pool: PgPool) {
    create_student(&pool, "Ada Lovelace").await;
    create_student(&pool, "Charles Babbage").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/students?search=love").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let students = json["data"].as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["name"], "Ada Lovelace");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_and_delete_student(pool: PgPool) {
    let id = create_student(&pool, "Original").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/students/{id}"),
        json!({ "name": "Renamed", "notes": "Prefers mornings" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Renamed");
    assert_eq!(json["data"]["notes"], "Prefers mornings");

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/students/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/students/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn student_with_mentorship_cannot_be_deleted(pool: PgPool) {
    let student_id = create_student(&pool, "Ada").await;
    let teacher_id = create_teacher(&pool, "Alan", "alan@academy.test").await;
    common::create_id(
        &pool,
        "/api/v1/mentorships",
        json!({ "student_id": student_id, "teacher_id": teacher_id, "hourly_rate": "30.00" }),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/students/{student_id}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Subjects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn subject_crud(pool: PgPool) {
    let id = create_subject(&pool, "Physics").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/subjects/{id}"),
        json!({ "description": "Mechanics and optics" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Physics");
    assert_eq!(json["data"]["description"], "Mechanics and optics");

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/subjects").await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/subjects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn subject_taught_by_a_group_cannot_be_deleted(pool: PgPool) {
    let group_id = common::create_class_group(&pool).await;

    let app = common::build_test_app(pool.clone());
    let group = body_json(get(app, &format!("/api/v1/class-groups/{group_id}")).await).await;
    let subject_id = group["data"]["subject_id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/subjects/{subject_id}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Teachers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_teacher_never_exposes_the_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/teachers",
        json!({
            "name": "Grace Hopper",
            "email": "Grace@Academy.test",
            "password": "cobol-forever",
            "password_confirmation": "cobol-forever",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "grace@academy.test");
    assert!(json["data"]["user_id"].is_number());
    assert!(json["data"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_teacher_email_returns_409(pool: PgPool) {
    create_teacher(&pool, "Grace", "grace@academy.test").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/teachers",
        json!({
            "name": "Another Grace",
            "email": "grace@academy.test",
            "password": "s3cret-pass",
            "password_confirmation": "s3cret-pass",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn teacher_password_policy_is_enforced(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/teachers",
        json!({
            "name": "Short",
            "email": "short@academy.test",
            "password": "abc",
            "password_confirmation": "abc",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/teachers",
        json!({
            "name": "Mismatch",
            "email": "mismatch@academy.test",
            "password": "long-enough-1",
            "password_confirmation": "long-enough-2",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("password_confirmation"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_a_teacher_removes_the_user_account(pool: PgPool) {
    let id = create_teacher(&pool, "Temp", "temp@academy.test").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/teachers/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (users,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind("temp@academy.test")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(users, 0);
}
