//! Handlers for the `/teachers` resource.
//!
//! Each teacher owns a user account; creating a teacher creates the
//! account with an Argon2id password hash.

use academy_core::error::CoreError;
use academy_core::types::DbId;
use academy_core::validation::{validate_email, validate_name};
use academy_db::models::teacher::{CreateTeacher, Teacher, UpdateTeacher};
use academy_db::repositories::TeacherRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::validate;
use crate::password::{hash_password, validate_new_password};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /teachers`.
#[derive(Debug, Deserialize)]
pub struct CreateTeacherRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Teacher",
        id,
    })
}

/// POST /api/v1/teachers
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTeacherRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Teacher>>)> {
    validate(validate_name("name", &input.name))?;
    let email = input.email.trim().to_lowercase();
    validate(validate_email("email", &email))?;
    validate(validate_new_password(
        &input.password,
        &input.password_confirmation,
        state.config.password_min_length,
    ))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let teacher = TeacherRepo::create(
        &state.pool,
        &CreateTeacher {
            name: input.name,
            email,
            password_hash,
        },
    )
    .await?;
    tracing::info!(teacher_id = teacher.id, user_id = teacher.user_id, "Teacher created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: teacher })))
}

/// GET /api/v1/teachers
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Teacher>>>> {
    let (limit, offset) = params.resolve();
    let teachers = TeacherRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: teachers }))
}

/// GET /api/v1/teachers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Teacher>>> {
    let teacher = TeacherRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: teacher }))
}

/// PUT /api/v1/teachers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateTeacher>,
) -> AppResult<Json<DataResponse<Teacher>>> {
    if let Some(name) = &input.name {
        validate(validate_name("name", name))?;
    }
    if let Some(email) = input.email.take() {
        let email = email.trim().to_lowercase();
        validate(validate_email("email", &email))?;
        input.email = Some(email);
    }

    let teacher = TeacherRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(teacher_id = id, "Teacher updated");
    Ok(Json(DataResponse { data: teacher }))
}

/// DELETE /api/v1/teachers/{id}
///
/// Removes the teacher's user account too. Refused with 409 while class
/// groups or mentorships reference the teacher.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if TeacherRepo::delete(&state.pool, id).await? {
        tracing::info!(teacher_id = id, "Teacher deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
