//! Handlers for the `/students` resource.

use academy_core::error::CoreError;
use academy_core::types::DbId;
use academy_core::validation::{blank_to_none, validate_email, validate_name, validate_notes};
use academy_db::models::student::{CreateStudent, Student, UpdateStudent};
use academy_db::repositories::StudentRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::handlers::validate;
use crate::query::{page, StudentListParams};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Student",
        id,
    })
}

fn validate_contact(email: Option<&str>, notes: Option<&str>) -> AppResult<()> {
    if let Some(email) = email {
        validate(validate_email("email", email))?;
    }
    validate(validate_notes(notes))
}

/// POST /api/v1/students
pub async fn create(
    State(state): State<AppState>,
    Json(mut input): Json<CreateStudent>,
) -> AppResult<(StatusCode, Json<DataResponse<Student>>)> {
    validate(validate_name("name", &input.name))?;
    input.email = blank_to_none(input.email);
    input.phone = blank_to_none(input.phone);
    validate_contact(input.email.as_deref(), input.notes.as_deref())?;

    let student = StudentRepo::create(&state.pool, &input).await?;
    tracing::info!(student_id = student.id, "Student created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: student })))
}

/// GET /api/v1/students?search=&limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<StudentListParams>,
) -> AppResult<Json<DataResponse<Vec<Student>>>> {
    let (limit, offset) = page(params.limit, params.offset);
    let search = blank_to_none(params.search);
    let students = StudentRepo::list(&state.pool, search.as_deref(), limit, offset).await?;
    Ok(Json(DataResponse { data: students }))
}

/// GET /api/v1/students/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Student>>> {
    let student = StudentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: student }))
}

/// PUT /api/v1/students/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateStudent>,
) -> AppResult<Json<DataResponse<Student>>> {
    if let Some(name) = &input.name {
        validate(validate_name("name", name))?;
    }
    // Blank contact fields leave the stored value untouched.
    input.email = blank_to_none(input.email);
    input.phone = blank_to_none(input.phone);
    validate_contact(input.email.as_deref(), input.notes.as_deref())?;

    let student = StudentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(student_id = id, "Student updated");
    Ok(Json(DataResponse { data: student }))
}

/// DELETE /api/v1/students/{id}
///
/// Enrollments and class attendance go with the student; a student with
/// mentorships is refused with 409 by `fk_mentorships_student`.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if StudentRepo::delete(&state.pool, id).await? {
        tracing::info!(student_id = id, "Student deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
